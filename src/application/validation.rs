// src/application/validation.rs
//! Form validation for article submissions and comments.
//!
//! Validation is pure: it never touches the network or storage, and it checks
//! every field before answering so callers get the full set of problems at once.
//! Unknown fields are rejected rather than ignored.

use crate::domain::{
    article::{ArticleBody, ArticleId, ArticleTitle},
    comment::CommentBody,
    storage::{ImagePayload, MAX_IMAGE_BYTES, MediaType},
};
use base64::{Engine as _, engine::general_purpose::STANDARD};
use bytes::Bytes;
use serde::Serialize;
use std::{collections::BTreeMap, fmt};

const REQUIRED: &str = "is required";
const EMPTY: &str = "must not be empty";
const UNRECOGNIZED: &str = "unrecognized field";

/// Field name → messages. Never empty when returned as an error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.entry(field.into()).or_default().push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn messages(&self, field: &str) -> &[String] {
        self.0.get(field).map_or(&[][..], Vec::as_slice)
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    fn into_result<T>(self, value: impl FnOnce() -> T) -> Result<T, Self> {
        if self.is_empty() { Ok(value()) } else { Err(self) }
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, messages) in &self.0 {
            for message in messages {
                if !first {
                    f.write_str("; ")?;
                }
                write!(f, "{field} {message}")?;
                first = false;
            }
        }
        Ok(())
    }
}

/// Image bytes as they arrive from a client.
#[derive(Debug, Clone)]
pub enum ImageSource {
    Bytes(Bytes),
    Base64(String),
}

#[derive(Debug, Clone)]
pub struct RawImage {
    pub source: ImageSource,
    pub media_type: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct RawPostInput {
    pub title: Option<String>,
    pub body: Option<String>,
    pub image: Option<RawImage>,
    /// Names of fields the client sent that the form does not declare.
    pub unknown_fields: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct ValidatedPost {
    pub title: ArticleTitle,
    pub body: ArticleBody,
    pub image: Option<ImagePayload>,
}

#[derive(Debug, Clone, Default)]
pub struct RawCommentInput {
    pub article_id: Option<i64>,
    pub body: Option<String>,
    pub unknown_fields: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct ValidatedComment {
    pub article_id: ArticleId,
    pub body: CommentBody,
}

pub fn validate_post(input: RawPostInput) -> Result<ValidatedPost, FieldErrors> {
    let mut errors = FieldErrors::new();
    reject_unknown(&mut errors, &input.unknown_fields);

    let title = required_text(&mut errors, "title", input.title, ArticleTitle::new);
    let body = required_text(&mut errors, "body", input.body, ArticleBody::new);
    let image = input
        .image
        .and_then(|raw| validate_image(&mut errors, raw));

    match (title, body) {
        (Some(title), Some(body)) => errors.into_result(|| ValidatedPost { title, body, image }),
        _ => Err(errors),
    }
}

pub fn validate_comment(input: RawCommentInput) -> Result<ValidatedComment, FieldErrors> {
    let mut errors = FieldErrors::new();
    reject_unknown(&mut errors, &input.unknown_fields);

    let article_id = match input.article_id {
        None => {
            errors.add("article_id", REQUIRED);
            None
        }
        Some(raw) => ArticleId::new(raw)
            .map_err(|_| errors.add("article_id", "must be a positive id"))
            .ok(),
    };
    let body = required_text(&mut errors, "body", input.body, CommentBody::new);

    match (article_id, body) {
        (Some(article_id), Some(body)) => {
            errors.into_result(|| ValidatedComment { article_id, body })
        }
        _ => Err(errors),
    }
}

fn reject_unknown(errors: &mut FieldErrors, unknown: &[String]) {
    for field in unknown {
        errors.add(field.clone(), UNRECOGNIZED);
    }
}

fn required_text<T, E>(
    errors: &mut FieldErrors,
    field: &str,
    value: Option<String>,
    build: impl FnOnce(String) -> Result<T, E>,
) -> Option<T> {
    let Some(value) = value else {
        errors.add(field, REQUIRED);
        return None;
    };
    build(value).map_err(|_| errors.add(field, EMPTY)).ok()
}

fn validate_image(errors: &mut FieldErrors, raw: RawImage) -> Option<ImagePayload> {
    let media_type = match raw.media_type.as_deref() {
        None => {
            errors.add("image", "media type is required");
            None
        }
        Some(declared) => declared
            .parse::<MediaType>()
            .map_err(|_| errors.add("image", format!("unsupported media type '{declared}'")))
            .ok(),
    };

    let bytes = match raw.source {
        ImageSource::Bytes(bytes) => Some(bytes),
        ImageSource::Base64(encoded) => STANDARD
            .decode(encoded.trim())
            .map(Bytes::from)
            .map_err(|_| errors.add("image", "is not valid base64"))
            .ok(),
    };

    let bytes = bytes?;
    if bytes.is_empty() {
        errors.add("image", EMPTY);
        return None;
    }
    if bytes.len() > MAX_IMAGE_BYTES {
        errors.add("image", format!("must be at most {MAX_IMAGE_BYTES} bytes"));
        return None;
    }

    ImagePayload::new(bytes, media_type?).ok()
}
