// src/infrastructure/storage/uploader.rs
use crate::{
    application::ports::storage::{ObjectUploader, PresignedUpload, UploadError},
    domain::storage::{ImagePayload, StorageId},
};
use async_trait::async_trait;
use reqwest::{Client, header::CONTENT_TYPE};
use serde::Deserialize;
use std::time::Duration;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UploadResponse {
    storage_id: String,
}

/// Sends image bytes straight to object storage with a single POST.
#[derive(Debug, Clone)]
pub struct HttpObjectUploader {
    client: Client,
}

impl HttpObjectUploader {
    pub fn new(timeout: Duration) -> Result<Self, UploadError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| UploadError::Transport(err.to_string()))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl ObjectUploader for HttpObjectUploader {
    async fn upload(
        &self,
        target: &PresignedUpload,
        image: &ImagePayload,
    ) -> Result<StorageId, UploadError> {
        let response = self
            .client
            .post(&target.url)
            .header(CONTENT_TYPE, image.media_type().as_str())
            .body(image.bytes().clone())
            .send()
            .await
            .map_err(|err| UploadError::Transport(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            tracing::debug!(status = status.as_u16(), "storage refused upload");
            return Err(UploadError::Rejected(status.as_u16()));
        }

        let body: UploadResponse = response
            .json()
            .await
            .map_err(|err| UploadError::MalformedResponse(err.to_string()))?;

        StorageId::new(body.storage_id)
            .map_err(|err| UploadError::MalformedResponse(err.to_string()))
    }
}
