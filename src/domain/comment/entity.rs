// src/domain/comment/entity.rs
use crate::domain::article::ArticleId;
use crate::domain::comment::value_objects::{CommentBody, CommentId};
use crate::domain::user::DisplayName;
use chrono::{DateTime, Utc};

/// Append-only reader comment attached to an article.
#[derive(Debug, Clone)]
pub struct Comment {
    pub id: CommentId,
    pub article_id: ArticleId,
    pub author_name: DisplayName,
    pub body: CommentBody,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewComment {
    pub article_id: ArticleId,
    pub author_name: DisplayName,
    pub body: CommentBody,
}

impl NewComment {
    pub fn into_comment(self, id: CommentId, created_at: DateTime<Utc>) -> Comment {
        Comment {
            id,
            article_id: self.article_id,
            author_name: self.author_name,
            body: self.body,
            created_at,
        }
    }
}

/// Sort into feed order: oldest first, ties broken by id.
pub fn order_comments(comments: &mut [Comment]) {
    comments.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
}
