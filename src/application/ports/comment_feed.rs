// src/application/ports/comment_feed.rs
use crate::domain::article::ArticleId;
use async_trait::async_trait;
use thiserror::Error;

/// Signal from the shared store that comments changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommentChange {
    /// A comment on this article committed, from any writer.
    Article(ArticleId),
    /// The feed reconnected and signals in between may be gone.
    Lost,
}

#[derive(Debug, Error)]
pub enum ChangeFeedError {
    #[error("comment change feed failed: {0}")]
    Backend(String),
}

/// Changes committed by every process writing to the comment store, not just
/// this one.
#[async_trait]
pub trait CommentChangeFeed: Send {
    /// `Ok(None)` once the feed has closed for good.
    async fn next_change(&mut self) -> Result<Option<CommentChange>, ChangeFeedError>;
}
