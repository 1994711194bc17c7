// src/application/comments/mod.rs
//! Live comment feeds.
//!
//! `CommentHub` keeps one watch channel per article that has at least one
//! subscriber. Every committed comment triggers a re-read of the article's
//! ordered list, which is pushed to all subscribers at once. Local writes
//! publish directly; writes from other processes arrive through a
//! `CommentChangeFeed` that the hub follows.
mod composer;
mod hub;
mod subscription;

pub use composer::{CommentComposer, Notice};
pub use hub::CommentHub;
pub use subscription::{CommentFeed, CommentSubscription, SubscriptionState};
