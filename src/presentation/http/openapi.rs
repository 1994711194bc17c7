// src/presentation/http/openapi.rs
use crate::application::dto::{ArticleDto, CommentDto, CommentListDto, PublicationReceipt};
use axum::{
    Router,
    body::Body,
    http::{HeaderMap, StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::sync::OnceLock;
use utoipa::openapi::{
    Components,
    security::{Http, HttpAuthScheme, SecurityScheme},
};
use utoipa::{Modify, OpenApi, ToSchema};

pub const OPENAPI_PATH: &str = "/api-docs/openapi.json";

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct StatusResponse {
    pub status: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ArticleListResponse {
    pub items: Vec<ArticleDto>,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::presentation::http::controllers::articles::list_articles,
        crate::presentation::http::controllers::articles::get_article,
        crate::presentation::http::controllers::articles::create_article,
        crate::presentation::http::controllers::comments::list_comments,
        crate::presentation::http::controllers::comments::create_comment,
        crate::presentation::http::controllers::comments::live_comments,
        super::routes::health
    ),
    components(
        schemas(
            StatusResponse,
            ArticleListResponse,
            ArticleDto,
            PublicationReceipt,
            CommentDto,
            CommentListDto,
            crate::presentation::http::error::ErrorResponse,
            crate::presentation::http::controllers::articles::CreateArticleRequest,
            crate::presentation::http::controllers::articles::ImageUpload,
            crate::presentation::http::controllers::comments::CreateCommentRequest
        )
    ),
    tags(
        (name = "Articles", description = "Publication and listing"),
        (name = "Comments", description = "Comments and live comment feeds"),
        (name = "System", description = "System level endpoints")
    ),
    modifiers(&ApiDocCustomizer),
    info(
        title = "Quill API",
        description = "Article publication and comments backend",
        version = "0.1.0"
    )
)]
pub struct ApiDoc;

struct ApiDocCustomizer;

impl Modify for ApiDocCustomizer {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Components::default);
        let mut http = Http::new(HttpAuthScheme::Bearer);
        http.bearer_format = Some("Biscuit".into());
        components.add_security_scheme("bearerAuth", SecurityScheme::Http(http));
    }
}

struct RenderedDoc {
    bytes: Vec<u8>,
    etag: String,
}

fn rendered() -> &'static RenderedDoc {
    static DOC: OnceLock<RenderedDoc> = OnceLock::new();
    DOC.get_or_init(|| {
        let bytes = serde_json::to_vec(&ApiDoc::openapi()).unwrap_or_default();
        let digest = Sha256::digest(&bytes);
        let etag = format!("\"{}\"", hex_prefix(&digest));
        RenderedDoc { bytes, etag }
    })
}

fn hex_prefix(digest: &[u8]) -> String {
    use std::fmt::Write as _;
    digest.iter().take(16).fold(String::new(), |mut acc, b| {
        let _ = write!(acc, "{b:02x}");
        acc
    })
}

fn inm_matches(headers: &HeaderMap, etag: &str) -> bool {
    headers
        .get_all(header::IF_NONE_MATCH)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(','))
        .map(str::trim)
        .any(|candidate| candidate == "*" || candidate.trim_start_matches("W/") == etag)
}

/// GET handler for the OpenAPI document. The document is rendered once and
/// served with a strong ETag; a matching `If-None-Match` yields 304.
pub async fn serve_openapi(headers: HeaderMap) -> Response {
    let doc = rendered();
    if inm_matches(&headers, &doc.etag) {
        return (StatusCode::NOT_MODIFIED, [(header::ETAG, doc.etag.clone())]).into_response();
    }

    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "application/json".to_string()),
            (header::ETAG, doc.etag.clone()),
        ],
        Body::from(doc.bytes.clone()),
    )
        .into_response()
}

pub fn docs_router() -> Router {
    Router::new().route(OPENAPI_PATH, get(serve_openapi))
}
