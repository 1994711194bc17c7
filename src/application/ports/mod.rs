// src/application/ports/mod.rs
pub mod cache;
pub mod comment_feed;
pub mod security;
pub mod storage;
pub mod time;
