// src/application/comments/composer.rs
use crate::{
    application::{
        commands::comments::{CommentCommandService, CreateCommentCommand},
        dto::{AuthenticatedUser, CommentDto},
        error::ApplicationResult,
        validation::RawCommentInput,
    },
    domain::article::ArticleId,
};

pub const POSTED: &str = "Comment posted";
pub const FAILED: &str = "Failed to post comment";

/// Transient, dismissible message shown after a submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Success(String),
    Error(String),
}

/// Writer-side state of the comment form for one article.
#[derive(Debug, Clone)]
pub struct CommentComposer {
    article_id: ArticleId,
    body: String,
    pending: bool,
    notice: Option<Notice>,
}

impl CommentComposer {
    pub const fn new(article_id: ArticleId) -> Self {
        Self {
            article_id,
            body: String::new(),
            pending: false,
            notice: None,
        }
    }

    pub fn set_body(&mut self, body: impl Into<String>) {
        self.body = body.into();
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    pub const fn is_pending(&self) -> bool {
        self.pending
    }

    pub const fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }

    /// Mark the form pending and build the command. `None` while a previous
    /// submission is still in flight.
    pub fn begin_submit(&mut self) -> Option<CreateCommentCommand> {
        if self.pending {
            return None;
        }
        self.pending = true;
        self.notice = None;
        Some(CreateCommentCommand {
            input: RawCommentInput {
                article_id: Some(self.article_id.into()),
                body: Some(self.body.clone()),
                unknown_fields: Vec::new(),
            },
        })
    }

    /// Settle a submission: success clears the body, failure keeps it so the
    /// writer can retry without retyping.
    pub fn finish_submit(&mut self, outcome: &ApplicationResult<CommentDto>) {
        self.pending = false;
        match outcome {
            Ok(_) => {
                self.body.clear();
                self.notice = Some(Notice::Success(POSTED.into()));
            }
            Err(_) => {
                self.notice = Some(Notice::Error(FAILED.into()));
            }
        }
    }

    pub async fn submit(
        &mut self,
        service: &CommentCommandService,
        actor: &AuthenticatedUser,
    ) -> Option<CommentDto> {
        let command = self.begin_submit()?;
        let outcome = service.create_comment(actor, command).await;
        self.finish_submit(&outcome);
        outcome.ok()
    }
}
