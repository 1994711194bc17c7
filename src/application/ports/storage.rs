// src/application/ports/storage.rs
use crate::domain::{
    storage::{ImagePayload, StorageId},
    user::UserId,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;

/// Short-lived, pre-authorised upload target. One per publication attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PresignedUpload {
    pub url: String,
    pub expires_at: DateTime<Utc>,
}

#[derive(Debug, Error)]
pub enum UploadUrlError {
    #[error("upload url signing failed: {0}")]
    Signing(String),
}

#[derive(Debug, Error)]
pub enum UploadError {
    #[error("transport error: {0}")]
    Transport(String),
    #[error("storage rejected upload with status {0}")]
    Rejected(u16),
    #[error("malformed storage response: {0}")]
    MalformedResponse(String),
}

pub trait UploadUrlIssuer: Send + Sync {
    fn issue(&self, owner: UserId) -> Result<PresignedUpload, UploadUrlError>;
}

/// Single direct transfer to object storage. Implementations never retry.
#[async_trait]
pub trait ObjectUploader: Send + Sync {
    async fn upload(
        &self,
        target: &PresignedUpload,
        image: &ImagePayload,
    ) -> Result<StorageId, UploadError>;
}

pub trait BlobUrlResolver: Send + Sync {
    fn resolve(&self, id: &StorageId) -> String;
}
