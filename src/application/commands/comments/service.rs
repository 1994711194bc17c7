// src/application/commands/comments/service.rs
use std::sync::Arc;

use crate::{
    application::{comments::CommentHub, gateway::MutationGateway},
    domain::article::ArticleReadRepository,
};

pub struct CommentCommandService {
    pub(super) gateway: Arc<MutationGateway>,
    pub(super) articles: Arc<dyn ArticleReadRepository>,
    pub(super) hub: Arc<CommentHub>,
}

impl CommentCommandService {
    pub fn new(
        gateway: Arc<MutationGateway>,
        articles: Arc<dyn ArticleReadRepository>,
        hub: Arc<CommentHub>,
    ) -> Self {
        Self {
            gateway,
            articles,
            hub,
        }
    }
}
