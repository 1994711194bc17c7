// src/application/commands/articles/publish.rs
use super::ArticleCommandService;
use crate::{
    application::{
        dto::{AuthenticatedUser, PublicationReceipt},
        gateway::ArticleDraft,
        ports::cache::CacheTag,
        validation::{FieldErrors, RawPostInput, validate_post},
    },
    domain::article::ArticleId,
};
use thiserror::Error;
use tracing::Instrument;

pub struct PublishArticleCommand {
    pub input: RawPostInput,
}

/// Outcome of a publication that did not complete.
///
/// Display strings are safe to show to end users; the underlying cause is
/// logged where the step fails and never carried across this boundary.
#[derive(Debug, Error)]
pub enum PublicationError {
    #[error("invalid input")]
    InvalidInput(FieldErrors),
    #[error("a publication is already in progress")]
    AlreadyPending,
    #[error("could not prepare upload")]
    PrepareUpload,
    #[error("image upload failed")]
    ImageUpload,
    #[error("failed to create post")]
    CreatePost,
    #[error("post created but the listing could not be refreshed")]
    ListingRefresh { article_id: ArticleId },
}

impl ArticleCommandService {
    /// Validate, upload the image, create the record, then invalidate the
    /// article listing. Steps run strictly in that order and the first failure
    /// aborts the rest.
    pub async fn publish_article(
        &self,
        actor: &AuthenticatedUser,
        command: PublishArticleCommand,
    ) -> Result<PublicationReceipt, PublicationError> {
        let span = tracing::info_span!("publish_article", caller = %actor.id);
        self.run_publication(actor, command).instrument(span).await
    }

    async fn run_publication(
        &self,
        actor: &AuthenticatedUser,
        command: PublishArticleCommand,
    ) -> Result<PublicationReceipt, PublicationError> {
        let post = validate_post(command.input).map_err(|errors| {
            tracing::debug!(%errors, "publication input rejected");
            PublicationError::InvalidInput(errors)
        })?;

        let _guard = self.in_flight.try_begin(actor.id).ok_or_else(|| {
            tracing::info!("publication already pending for caller");
            PublicationError::AlreadyPending
        })?;

        let image = match post.image {
            Some(payload) => {
                let target = self.gateway.issue_upload_url(actor).await.map_err(|err| {
                    tracing::warn!(error = %err, "upload url issuance failed");
                    PublicationError::PrepareUpload
                })?;

                let storage_id = self
                    .uploader
                    .upload(&target, &payload)
                    .await
                    .map_err(|err| {
                        tracing::warn!(error = %err, bytes = payload.len(), "image upload failed");
                        PublicationError::ImageUpload
                    })?;
                Some(storage_id)
            }
            None => None,
        };

        let draft = ArticleDraft {
            title: post.title,
            body: post.body,
            image: image.clone(),
        };
        let article = self.gateway.create_article(actor, draft).await.map_err(|err| {
            match &image {
                Some(orphan) => tracing::warn!(
                    error = %err,
                    storage_id = %orphan,
                    "article creation failed; uploaded image is now unreferenced"
                ),
                None => tracing::warn!(error = %err, "article creation failed"),
            }
            PublicationError::CreatePost
        })?;

        // The record is committed; only now may the listing be invalidated.
        self.cache
            .invalidate(&CacheTag::article_listing())
            .await
            .map_err(|err| {
                tracing::error!(error = %err, article_id = %article.id, "listing invalidation failed");
                PublicationError::ListingRefresh {
                    article_id: article.id,
                }
            })?;

        tracing::info!(article_id = %article.id, "article published");
        Ok(PublicationReceipt::new(article.id))
    }
}
