// tests/support/mocks/mod.rs
#![allow(dead_code)]
#![allow(unused_imports)]

pub mod cache;
pub mod events;
pub mod feed;
pub mod repos;
pub mod security;
pub mod storage;
pub mod time;

pub use cache::FlakyCache;
pub use events::EventLog;
pub use feed::ChannelChangeFeed;
pub use repos::{InMemoryArticleStore, InMemoryCommentStore, ListGate};
pub use security::{
    DummyTokenManager, EXPIRED_TOKEN, OTHER_TOKEN, READER_TOKEN, TEST_TOKEN, member_user,
    other_user, reader_user, viewer_user,
};
pub use storage::{RecordingUploader, StaticBlobUrlResolver, StubUploadUrlIssuer, UploadMode};
pub use time::{ManualClock, fixed_now};
