use crate::application::ports::storage::BlobUrlResolver;
use crate::domain::article::{Article, ArticleId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Where the client should go after a successful publication.
pub const LISTING_PATH: &str = "/blog";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ArticleDto {
    pub id: i64,
    pub title: String,
    pub body: String,
    /// Retrieval URL for the attached image, resolved at read time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub author_id: i64,
    pub created_at: DateTime<Utc>,
}

impl ArticleDto {
    pub fn from_article(article: Article, resolver: &dyn BlobUrlResolver) -> Self {
        Self {
            id: article.id.into(),
            title: article.title.into_inner(),
            body: article.body.into_inner(),
            image_url: article.image.as_ref().map(|id| resolver.resolve(id)),
            author_id: article.author_id.into(),
            created_at: article.created_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PublicationReceipt {
    pub article_id: i64,
    pub redirect_to: String,
}

impl PublicationReceipt {
    pub fn new(article_id: ArticleId) -> Self {
        Self {
            article_id: article_id.into(),
            redirect_to: LISTING_PATH.to_string(),
        }
    }
}
