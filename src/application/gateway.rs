// src/application/gateway.rs
//! Authenticated entry point for every write against the record store.
//!
//! Each call names an operation and carries the caller. The gateway checks the
//! caller's rights, stamps authorship, and forwards to the store, which
//! assigns ids and creation times. It keeps no state between calls and never
//! retries.

use std::sync::Arc;

use crate::{
    application::{
        dto::AuthenticatedUser,
        ports::storage::{PresignedUpload, UploadUrlIssuer},
    },
    domain::{
        article::{Article, ArticleBody, ArticleId, ArticleTitle, ArticleWriteRepository, NewArticle},
        comment::{Comment, CommentBody, CommentRepository, NewComment},
        errors::DomainError,
        storage::StorageId,
    },
};
use thiserror::Error;

#[derive(Debug, Clone)]
pub struct ArticleDraft {
    pub title: ArticleTitle,
    pub body: ArticleBody,
    pub image: Option<StorageId>,
}

#[derive(Debug, Clone)]
pub struct CommentDraft {
    pub article_id: ArticleId,
    pub body: CommentBody,
}

#[derive(Debug, Clone)]
pub enum Mutation {
    IssueUploadUrl,
    CreateArticle(ArticleDraft),
    CreateComment(CommentDraft),
}

impl Mutation {
    pub const fn name(&self) -> &'static str {
        match self {
            Self::IssueUploadUrl => "issueUploadUrl",
            Self::CreateArticle(_) => "createArticle",
            Self::CreateComment(_) => "createComment",
        }
    }

    const fn required_capability(&self) -> (&'static str, &'static str) {
        match self {
            Self::IssueUploadUrl => ("uploads", "create"),
            Self::CreateArticle(_) => ("articles", "create"),
            Self::CreateComment(_) => ("comments", "create"),
        }
    }
}

#[derive(Debug, Clone)]
pub enum MutationOutput {
    UploadUrl(PresignedUpload),
    Article(Article),
    Comment(Comment),
}

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("not permitted: {0}")]
    Auth(String),
    #[error("rejected by store: {0}")]
    Validation(String),
    #[error("backend failure: {0}")]
    Backend(String),
}

impl From<DomainError> for GatewayError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Validation(msg) | DomainError::Conflict(msg) | DomainError::NotFound(msg) => {
                Self::Validation(msg)
            }
            DomainError::Persistence(msg) => Self::Backend(msg),
        }
    }
}

pub struct MutationGateway {
    articles: Arc<dyn ArticleWriteRepository>,
    comments: Arc<dyn CommentRepository>,
    upload_urls: Arc<dyn UploadUrlIssuer>,
}

impl MutationGateway {
    pub fn new(
        articles: Arc<dyn ArticleWriteRepository>,
        comments: Arc<dyn CommentRepository>,
        upload_urls: Arc<dyn UploadUrlIssuer>,
    ) -> Self {
        Self {
            articles,
            comments,
            upload_urls,
        }
    }

    pub async fn invoke(
        &self,
        caller: &AuthenticatedUser,
        mutation: Mutation,
    ) -> Result<MutationOutput, GatewayError> {
        let operation = mutation.name();
        let (resource, action) = mutation.required_capability();
        if !caller.has_capability(resource, action) {
            tracing::warn!(operation, caller = %caller.id, "caller lacks {resource}:{action}");
            return Err(GatewayError::Auth(format!(
                "missing capability {resource}:{action}"
            )));
        }

        tracing::debug!(operation, caller = %caller.id, "invoking mutation");

        let output = match mutation {
            Mutation::IssueUploadUrl => self
                .upload_urls
                .issue(caller.id)
                .map(MutationOutput::UploadUrl)
                .map_err(|err| GatewayError::Backend(err.to_string()))?,
            Mutation::CreateArticle(draft) => {
                let new_article = NewArticle {
                    title: draft.title,
                    body: draft.body,
                    image: draft.image,
                    author_id: caller.id,
                };
                MutationOutput::Article(self.articles.insert(new_article).await?)
            }
            Mutation::CreateComment(draft) => {
                let new_comment = NewComment {
                    article_id: draft.article_id,
                    author_name: caller.display_name.clone(),
                    body: draft.body,
                };
                MutationOutput::Comment(self.comments.insert(new_comment).await?)
            }
        };

        Ok(output)
    }

    pub async fn issue_upload_url(
        &self,
        caller: &AuthenticatedUser,
    ) -> Result<PresignedUpload, GatewayError> {
        match self.invoke(caller, Mutation::IssueUploadUrl).await? {
            MutationOutput::UploadUrl(upload) => Ok(upload),
            other => Err(unexpected("issueUploadUrl", &other)),
        }
    }

    pub async fn create_article(
        &self,
        caller: &AuthenticatedUser,
        draft: ArticleDraft,
    ) -> Result<Article, GatewayError> {
        match self.invoke(caller, Mutation::CreateArticle(draft)).await? {
            MutationOutput::Article(article) => Ok(article),
            other => Err(unexpected("createArticle", &other)),
        }
    }

    pub async fn create_comment(
        &self,
        caller: &AuthenticatedUser,
        draft: CommentDraft,
    ) -> Result<Comment, GatewayError> {
        match self.invoke(caller, Mutation::CreateComment(draft)).await? {
            MutationOutput::Comment(comment) => Ok(comment),
            other => Err(unexpected("createComment", &other)),
        }
    }
}

fn unexpected(operation: &str, output: &MutationOutput) -> GatewayError {
    GatewayError::Backend(format!("{operation} returned unexpected output {output:?}"))
}
