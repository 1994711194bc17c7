// tests/support/mocks/storage.rs
use super::events::EventLog;
use async_trait::async_trait;
use chrono::Duration;
use quill_core::{
    application::ports::storage::{
        BlobUrlResolver, ObjectUploader, PresignedUpload, UploadError, UploadUrlError,
        UploadUrlIssuer,
    },
    domain::{
        storage::{ImagePayload, MediaType, StorageId},
        user::UserId,
    },
};
use std::sync::{
    Mutex,
    atomic::{AtomicBool, AtomicUsize, Ordering},
};
use tokio::sync::{Notify, Semaphore};

pub struct StubUploadUrlIssuer {
    issued: AtomicUsize,
    pub fail: AtomicBool,
    events: EventLog,
}

impl StubUploadUrlIssuer {
    pub fn new(events: EventLog) -> Self {
        Self {
            issued: AtomicUsize::new(0),
            fail: AtomicBool::new(false),
            events,
        }
    }

    pub fn issued(&self) -> usize {
        self.issued.load(Ordering::SeqCst)
    }
}

impl UploadUrlIssuer for StubUploadUrlIssuer {
    fn issue(&self, owner: UserId) -> Result<PresignedUpload, UploadUrlError> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(UploadUrlError::Signing("key unavailable".into()));
        }
        self.events.push("issue");
        let n = self.issued.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(PresignedUpload {
            url: format!("http://storage.test/upload?owner={owner}&n={n}"),
            expires_at: super::time::fixed_now() + Duration::minutes(5),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadMode {
    Accept,
    Reject(u16),
    Unreachable,
}

#[derive(Debug, Clone)]
pub struct RecordedUpload {
    pub url: String,
    pub len: usize,
    pub media_type: MediaType,
    pub storage_id: StorageId,
}

/// Uploader that remembers every accepted blob. Optionally holds each upload
/// until the test releases it.
pub struct RecordingUploader {
    mode: Mutex<UploadMode>,
    uploads: Mutex<Vec<RecordedUpload>>,
    gate: Option<Semaphore>,
    pub started: Notify,
    events: EventLog,
}

impl RecordingUploader {
    pub fn new(events: EventLog) -> Self {
        Self {
            mode: Mutex::new(UploadMode::Accept),
            uploads: Mutex::new(Vec::new()),
            gate: None,
            started: Notify::new(),
            events,
        }
    }

    pub fn gated(events: EventLog) -> Self {
        Self {
            gate: Some(Semaphore::new(0)),
            ..Self::new(events)
        }
    }

    pub fn release(&self, uploads: usize) {
        if let Some(gate) = &self.gate {
            gate.add_permits(uploads);
        }
    }

    pub fn set_mode(&self, mode: UploadMode) {
        *self.mode.lock().unwrap() = mode;
    }

    pub fn uploads(&self) -> Vec<RecordedUpload> {
        self.uploads.lock().unwrap().clone()
    }
}

#[async_trait]
impl ObjectUploader for RecordingUploader {
    async fn upload(
        &self,
        target: &PresignedUpload,
        image: &ImagePayload,
    ) -> Result<StorageId, UploadError> {
        self.started.notify_one();
        if let Some(gate) = &self.gate {
            gate.acquire()
                .await
                .expect("upload gate closed")
                .forget();
        }

        let mode = *self.mode.lock().unwrap();
        match mode {
            UploadMode::Reject(status) => Err(UploadError::Rejected(status)),
            UploadMode::Unreachable => Err(UploadError::Transport("connection refused".into())),
            UploadMode::Accept => {
                self.events.push("upload");
                let mut uploads = self.uploads.lock().unwrap();
                let storage_id =
                    StorageId::new(format!("blob-{}", uploads.len() + 1)).expect("storage id");
                uploads.push(RecordedUpload {
                    url: target.url.clone(),
                    len: image.len(),
                    media_type: image.media_type(),
                    storage_id: storage_id.clone(),
                });
                Ok(storage_id)
            }
        }
    }
}

pub struct StaticBlobUrlResolver;

impl BlobUrlResolver for StaticBlobUrlResolver {
    fn resolve(&self, id: &StorageId) -> String {
        format!("https://cdn.test/{id}")
    }
}
