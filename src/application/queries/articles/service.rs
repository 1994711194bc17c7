use std::sync::Arc;

use crate::{
    application::ports::{
        cache::{CacheLife, TagCache},
        storage::BlobUrlResolver,
    },
    domain::article::ArticleReadRepository,
};

pub struct ArticleQueryService {
    pub(super) read_repo: Arc<dyn ArticleReadRepository>,
    pub(super) cache: Arc<dyn TagCache>,
    pub(super) resolver: Arc<dyn BlobUrlResolver>,
    pub(super) listing_life: CacheLife,
}

impl ArticleQueryService {
    pub fn new(
        read_repo: Arc<dyn ArticleReadRepository>,
        cache: Arc<dyn TagCache>,
        resolver: Arc<dyn BlobUrlResolver>,
        listing_life: CacheLife,
    ) -> Self {
        Self {
            read_repo,
            cache,
            resolver,
            listing_life,
        }
    }
}
