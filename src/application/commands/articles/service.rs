// src/application/commands/articles/service.rs
use std::sync::Arc;

use super::InFlightPublications;
use crate::application::{
    gateway::MutationGateway,
    ports::{cache::TagCache, storage::ObjectUploader},
};

pub struct ArticleCommandService {
    pub(super) gateway: Arc<MutationGateway>,
    pub(super) uploader: Arc<dyn ObjectUploader>,
    pub(super) cache: Arc<dyn TagCache>,
    pub(super) in_flight: InFlightPublications,
}

impl ArticleCommandService {
    pub fn new(
        gateway: Arc<MutationGateway>,
        uploader: Arc<dyn ObjectUploader>,
        cache: Arc<dyn TagCache>,
    ) -> Self {
        Self {
            gateway,
            uploader,
            cache,
            in_flight: InFlightPublications::default(),
        }
    }

    /// Whether `caller` currently has a publication running.
    pub fn is_publishing(&self, caller: crate::domain::user::UserId) -> bool {
        self.in_flight.contains(caller)
    }
}
