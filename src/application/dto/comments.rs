use crate::domain::comment::Comment;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CommentDto {
    pub id: i64,
    pub article_id: i64,
    pub author_name: String,
    pub body: String,
    pub created_at: DateTime<Utc>,
}

impl From<Comment> for CommentDto {
    fn from(comment: Comment) -> Self {
        Self {
            id: comment.id.into(),
            article_id: comment.article_id.into(),
            author_name: comment.author_name.into(),
            body: comment.body.into_inner(),
            created_at: comment.created_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CommentListDto {
    pub count: usize,
    pub items: Vec<CommentDto>,
}

impl From<Vec<CommentDto>> for CommentListDto {
    fn from(items: Vec<CommentDto>) -> Self {
        Self {
            count: items.len(),
            items,
        }
    }
}
