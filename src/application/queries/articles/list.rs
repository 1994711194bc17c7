// src/application/queries/articles/list.rs
use super::ArticleQueryService;
use crate::application::{
    dto::ArticleDto,
    error::{ApplicationError, ApplicationResult},
    ports::cache::{CacheLookup, CacheTag},
};

impl ArticleQueryService {
    /// Article listing, newest first, served through the `article-listing` tag.
    ///
    /// A cache backend failure never fails the read: the listing is rebuilt
    /// from the record store instead. The rebuilt listing is only stored if
    /// no publication invalidated the tag while it was being read.
    pub async fn list_articles(&self) -> ApplicationResult<Vec<ArticleDto>> {
        let tag = CacheTag::article_listing();

        let seen = match self.cache.get(&tag).await {
            Ok(CacheLookup::Hit(cached)) => {
                match serde_json::from_str::<Vec<ArticleDto>>(&cached) {
                    Ok(items) => {
                        tracing::debug!(count = items.len(), "article listing served from cache");
                        return Ok(items);
                    }
                    Err(err) => {
                        tracing::warn!(error = %err, "discarding undecodable listing cache entry");
                        if let Err(err) = self.cache.invalidate(&tag).await {
                            tracing::warn!(error = %err, "listing cache invalidation failed");
                        }
                        None
                    }
                }
            }
            Ok(CacheLookup::Miss(generation)) => {
                tracing::debug!(%generation, "article listing cache miss");
                Some(generation)
            }
            Err(err) => {
                tracing::warn!(error = %err, "listing cache read failed");
                None
            }
        };

        let items: Vec<ArticleDto> = self
            .read_repo
            .list()
            .await?
            .into_iter()
            .map(|article| ArticleDto::from_article(article, self.resolver.as_ref()))
            .collect();

        let Some(seen) = seen else {
            return Ok(items);
        };

        let payload = serde_json::to_string(&items)
            .map_err(|err| ApplicationError::infrastructure(err.to_string()))?;
        match self.cache.populate(&tag, payload, self.listing_life, seen).await {
            Ok(true) => {}
            Ok(false) => tracing::debug!("listing changed during rebuild; not cached"),
            Err(err) => tracing::warn!(error = %err, "listing cache populate failed"),
        }

        Ok(items)
    }
}
