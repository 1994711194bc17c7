// src/infrastructure/storage/presign.rs
use crate::{
    application::ports::{
        storage::{PresignedUpload, UploadUrlError, UploadUrlIssuer},
        time::Clock,
    },
    domain::user::UserId,
};
use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use chrono::{DateTime, Duration as ChronoDuration, Utc};
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use std::{sync::Arc, time::Duration};
use uuid::Uuid;

type HmacSha256 = Hmac<Sha256>;

/// Query parameters carried by a signed upload URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadGrant {
    pub owner: i64,
    pub expires: i64,
    pub nonce: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signature: Option<String>,
}

impl UploadGrant {
    fn signing_input(&self) -> String {
        format!("{}:{}:{}", self.owner, self.expires, self.nonce)
    }
}

/// Issues one-shot upload URLs signed with HMAC-SHA256. Object storage
/// verifies the signature and the expiry before accepting bytes.
pub struct SignedUploadUrlIssuer {
    upload_url: String,
    secret: Vec<u8>,
    ttl: Duration,
    clock: Arc<dyn Clock>,
}

impl SignedUploadUrlIssuer {
    pub fn new(
        upload_url: impl Into<String>,
        secret: impl Into<Vec<u8>>,
        ttl: Duration,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            upload_url: upload_url.into(),
            secret: secret.into(),
            ttl,
            clock,
        }
    }

    fn sign(&self, grant: &UploadGrant) -> Result<String, UploadUrlError> {
        let mut mac = HmacSha256::new_from_slice(&self.secret)
            .map_err(|err| UploadUrlError::Signing(err.to_string()))?;
        mac.update(grant.signing_input().as_bytes());
        Ok(URL_SAFE_NO_PAD.encode(mac.finalize().into_bytes()))
    }

    /// Check a grant received back from a client. Returns the owner when the
    /// signature matches and the grant has not expired at `now`.
    pub fn verify(&self, grant: &UploadGrant, now: DateTime<Utc>) -> Option<UserId> {
        let signature = grant.signature.as_deref()?;
        let provided = URL_SAFE_NO_PAD.decode(signature).ok()?;

        let mut mac = HmacSha256::new_from_slice(&self.secret).ok()?;
        mac.update(grant.signing_input().as_bytes());
        mac.verify_slice(&provided).ok()?;

        if now.timestamp() > grant.expires {
            return None;
        }
        UserId::new(grant.owner).ok()
    }
}

impl UploadUrlIssuer for SignedUploadUrlIssuer {
    fn issue(&self, owner: UserId) -> Result<PresignedUpload, UploadUrlError> {
        let ttl = ChronoDuration::from_std(self.ttl)
            .map_err(|err| UploadUrlError::Signing(err.to_string()))?;
        let expires_at = self.clock.now() + ttl;

        let mut grant = UploadGrant {
            owner: owner.into(),
            expires: expires_at.timestamp(),
            nonce: Uuid::new_v4().simple().to_string(),
            signature: None,
        };
        grant.signature = Some(self.sign(&grant)?);

        let query = serde_urlencoded::to_string(&grant)
            .map_err(|err| UploadUrlError::Signing(err.to_string()))?;
        let separator = if self.upload_url.contains('?') { '&' } else { '?' };

        Ok(PresignedUpload {
            url: format!("{}{separator}{query}", self.upload_url),
            expires_at,
        })
    }
}
