use crate::domain::article::ArticleId;
use crate::domain::comment::entity::{Comment, NewComment};
use crate::domain::errors::DomainResult;
use async_trait::async_trait;

#[async_trait]
pub trait CommentRepository: Send + Sync {
    /// Fails with `DomainError::NotFound` when the parent article does not exist.
    async fn insert(&self, comment: NewComment) -> DomainResult<Comment>;
    async fn list_by_article(&self, article_id: ArticleId) -> DomainResult<Vec<Comment>>;
}
