// tests/support/helpers.rs
use super::mocks::{
    DummyTokenManager, EventLog, FlakyCache, InMemoryArticleStore, InMemoryCommentStore,
    ManualClock, RecordingUploader, StaticBlobUrlResolver, StubUploadUrlIssuer, fixed_now,
};
use axum::{
    body::{self, Body},
    http::StatusCode,
    response::Response,
};
use chrono::Duration;
use quill_core::{
    application::{
        ports::cache::CacheLife,
        services::{ApplicationServices, ServicePorts},
    },
    domain::{
        article::{Article, ArticleBody, ArticleId, ArticleTitle, NewArticle},
        comment::{CommentBody, NewComment},
        user::{DisplayName, UserId},
    },
    presentation::http::{routes::build_router, state::HttpState},
};
use serde_json::Value;
use std::sync::Arc;

/// Application services wired to in-memory collaborators the test can poke.
pub struct TestHarness {
    pub services: Arc<ApplicationServices>,
    pub articles: Arc<InMemoryArticleStore>,
    pub comments: Arc<InMemoryCommentStore>,
    pub issuer: Arc<StubUploadUrlIssuer>,
    pub uploader: Arc<RecordingUploader>,
    pub cache: Arc<FlakyCache>,
    pub clock: Arc<ManualClock>,
    pub events: EventLog,
}

impl TestHarness {
    pub fn new() -> Self {
        let events = EventLog::default();
        Self::with_uploader(RecordingUploader::new(events.clone()), events)
    }

    /// Uploads block until `uploader.release` is called.
    pub fn gated() -> Self {
        let events = EventLog::default();
        Self::with_uploader(RecordingUploader::gated(events.clone()), events)
    }

    fn with_uploader(uploader: RecordingUploader, events: EventLog) -> Self {
        let clock = Arc::new(ManualClock::default());
        let articles = Arc::new(InMemoryArticleStore::new(clock.clone(), events.clone()));
        let comments = Arc::new(InMemoryCommentStore::new(
            Arc::clone(&articles),
            clock.clone(),
        ));
        let issuer = Arc::new(StubUploadUrlIssuer::new(events.clone()));
        let uploader = Arc::new(uploader);
        let cache = Arc::new(FlakyCache::new(clock.clone(), events.clone()));

        let services = Arc::new(ApplicationServices::new(ServicePorts {
            article_write_repo: articles.clone(),
            article_read_repo: articles.clone(),
            comment_repo: comments.clone(),
            upload_urls: issuer.clone(),
            uploader: uploader.clone(),
            blob_urls: Arc::new(StaticBlobUrlResolver),
            cache: cache.clone(),
            token_manager: Arc::new(DummyTokenManager),
            listing_life: CacheLife::Hours,
        }));

        Self {
            services,
            articles,
            comments,
            issuer,
            uploader,
            cache,
            clock,
            events,
        }
    }

    pub fn router(&self) -> axum::Router {
        let state = HttpState {
            services: Arc::clone(&self.services),
        };
        build_router(state, &["http://localhost:3000".to_string()])
    }

    pub fn seed_article(&self, title: &str) -> Article {
        self.articles.seed(NewArticle {
            title: ArticleTitle::new(title).unwrap(),
            body: ArticleBody::new(format!("{title} body")).unwrap(),
            image: None,
            author_id: UserId(1),
        })
    }

    /// Seed a comment `offset_secs` after the fixed epoch, with an explicit id.
    pub fn seed_comment(&self, article: ArticleId, id: i64, offset_secs: i64, body: &str) {
        self.comments.seed_with_id(
            id,
            NewComment {
                article_id: article,
                author_name: DisplayName::new("seed").unwrap(),
                body: CommentBody::new(body).unwrap(),
            },
            fixed_now() + Duration::seconds(offset_secs),
        );
    }
}

pub async fn make_test_router() -> axum::Router {
    TestHarness::new().router()
}

pub async fn body_json(resp: Response) -> Value {
    let bytes = body::to_bytes(resp.into_body(), 1024 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&bytes).expect("expected json body")
}

/// Assert that a response is an ErrorResponse JSON with the expected status and error string.
pub async fn assert_error_response(resp: Response, expected_status: StatusCode, expected_error: &str) -> Value {
    assert_eq!(resp.status(), expected_status);
    let ct = resp
        .headers()
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string();
    assert!(ct.starts_with("application/json"), "unexpected content-type: {ct}");
    let json = body_json(resp).await;
    let err_field = json.get("error").and_then(Value::as_str).unwrap_or("");
    let msg_field = json.get("message").and_then(Value::as_str).unwrap_or("");
    assert_eq!(err_field, expected_error, "unexpected error field: {err_field}");
    assert!(!msg_field.is_empty(), "expected non-empty message field in ErrorResponse");
    json
}

pub fn empty_request(method: &str, uri: &str) -> axum::http::Request<Body> {
    axum::http::Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

pub fn json_request(uri: &str, token: Option<&str>, payload: &Value) -> axum::http::Request<Body> {
    let mut builder = axum::http::Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json");
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    builder.body(Body::from(payload.to_string())).unwrap()
}
