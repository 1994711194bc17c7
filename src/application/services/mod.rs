// src/application/services/mod.rs
use std::sync::Arc;

use crate::{
    application::{
        commands::{articles::ArticleCommandService, comments::CommentCommandService},
        comments::CommentHub,
        gateway::MutationGateway,
        ports::{
            cache::{CacheLife, TagCache},
            security::TokenManager,
            storage::{BlobUrlResolver, ObjectUploader, UploadUrlIssuer},
        },
        queries::{articles::ArticleQueryService, comments::CommentQueryService},
    },
    domain::{
        article::{ArticleReadRepository, ArticleWriteRepository},
        comment::CommentRepository,
    },
};

/// Everything the application needs from the outside world.
pub struct ServicePorts {
    pub article_write_repo: Arc<dyn ArticleWriteRepository>,
    pub article_read_repo: Arc<dyn ArticleReadRepository>,
    pub comment_repo: Arc<dyn CommentRepository>,
    pub upload_urls: Arc<dyn UploadUrlIssuer>,
    pub uploader: Arc<dyn ObjectUploader>,
    pub blob_urls: Arc<dyn BlobUrlResolver>,
    pub cache: Arc<dyn TagCache>,
    pub token_manager: Arc<dyn TokenManager>,
    pub listing_life: CacheLife,
}

pub struct ApplicationServices {
    pub article_commands: Arc<ArticleCommandService>,
    pub article_queries: Arc<ArticleQueryService>,
    pub comment_commands: Arc<CommentCommandService>,
    pub comment_queries: Arc<CommentQueryService>,
    pub comment_hub: Arc<CommentHub>,
    token_manager: Arc<dyn TokenManager>,
}

impl ApplicationServices {
    pub fn new(ports: ServicePorts) -> Self {
        let gateway = Arc::new(MutationGateway::new(
            Arc::clone(&ports.article_write_repo),
            Arc::clone(&ports.comment_repo),
            Arc::clone(&ports.upload_urls),
        ));

        let article_commands = Arc::new(ArticleCommandService::new(
            Arc::clone(&gateway),
            Arc::clone(&ports.uploader),
            Arc::clone(&ports.cache),
        ));

        let article_queries = Arc::new(ArticleQueryService::new(
            Arc::clone(&ports.article_read_repo),
            Arc::clone(&ports.cache),
            Arc::clone(&ports.blob_urls),
            ports.listing_life,
        ));

        let comment_hub = Arc::new(CommentHub::new(Arc::clone(&ports.comment_repo)));

        let comment_commands = Arc::new(CommentCommandService::new(
            Arc::clone(&gateway),
            Arc::clone(&ports.article_read_repo),
            Arc::clone(&comment_hub),
        ));
        let comment_queries = Arc::new(CommentQueryService::new(Arc::clone(&comment_hub)));

        Self {
            article_commands,
            article_queries,
            comment_commands,
            comment_queries,
            comment_hub,
            token_manager: ports.token_manager,
        }
    }

    pub fn token_manager(&self) -> Arc<dyn TokenManager> {
        Arc::clone(&self.token_manager)
    }
}
