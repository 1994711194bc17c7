// src/application/commands/comments/create.rs
use super::CommentCommandService;
use crate::application::{
    dto::{AuthenticatedUser, CommentDto},
    error::{ApplicationError, ApplicationResult},
    gateway::{CommentDraft, GatewayError},
    validation::{RawCommentInput, validate_comment},
};

const FAILED: &str = "failed to post comment";

pub struct CreateCommentCommand {
    pub input: RawCommentInput,
}

impl CommentCommandService {
    pub async fn create_comment(
        &self,
        actor: &AuthenticatedUser,
        command: CreateCommentCommand,
    ) -> ApplicationResult<CommentDto> {
        let comment = validate_comment(command.input)?;
        let article_id = comment.article_id;

        if self.articles.find_by_id(article_id).await?.is_none() {
            return Err(ApplicationError::not_found("article not found"));
        }

        let draft = CommentDraft {
            article_id,
            body: comment.body,
        };
        let created = self
            .gateway
            .create_comment(actor, draft)
            .await
            .map_err(|err| {
                tracing::warn!(error = %err, %article_id, caller = %actor.id, "comment creation failed");
                match err {
                    GatewayError::Auth(_) => ApplicationError::forbidden(FAILED),
                    GatewayError::Validation(_) | GatewayError::Backend(_) => {
                        ApplicationError::infrastructure(FAILED)
                    }
                }
            })?;

        // Committed. A failed fan-out only delays subscribers until the next
        // update, which always carries the full list.
        if let Err(err) = self.hub.publish(article_id).await {
            tracing::warn!(error = %err, %article_id, "comment feed refresh failed");
        }

        Ok(created.into())
    }
}
