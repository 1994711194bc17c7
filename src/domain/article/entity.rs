// src/domain/article/entity.rs
use crate::domain::article::value_objects::{ArticleBody, ArticleId, ArticleTitle};
use crate::domain::storage::StorageId;
use crate::domain::user::UserId;
use chrono::{DateTime, Utc};

/// A committed article. Articles are created once and never edited.
#[derive(Debug, Clone)]
pub struct Article {
    pub id: ArticleId,
    pub title: ArticleTitle,
    pub body: ArticleBody,
    pub image: Option<StorageId>,
    pub author_id: UserId,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewArticle {
    pub title: ArticleTitle,
    pub body: ArticleBody,
    pub image: Option<StorageId>,
    pub author_id: UserId,
}

impl NewArticle {
    /// Materialise the record the store hands back once it has assigned
    /// `id` and `created_at`.
    pub fn into_article(self, id: ArticleId, created_at: DateTime<Utc>) -> Article {
        Article {
            id,
            title: self.title,
            body: self.body,
            image: self.image,
            author_id: self.author_id,
            created_at,
        }
    }
}
