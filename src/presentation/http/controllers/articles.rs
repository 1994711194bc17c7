// src/presentation/http/controllers/articles.rs
use crate::application::{
    commands::articles::PublishArticleCommand,
    dto::{ArticleDto, PublicationReceipt},
    error::ApplicationError,
    queries::articles::GetArticleByIdQuery,
    validation::{ImageSource, RawImage, RawPostInput},
};
use crate::presentation::http::{
    error::{HttpError, HttpResult, IntoHttpResult},
    extractors::Authenticated,
    openapi::ArticleListResponse,
    state::HttpState,
};
use axum::{
    Extension, Json,
    extract::{Path, rejection::JsonRejection},
    http::{StatusCode, header},
};
use serde::Deserialize;
use std::collections::BTreeMap;
use utoipa::ToSchema;

#[derive(Debug, Deserialize, ToSchema)]
pub struct ImageUpload {
    /// Base64-encoded image bytes.
    pub data: String,
    #[serde(default)]
    pub media_type: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateArticleRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub image: Option<ImageUpload>,
    #[serde(flatten)]
    #[schema(ignore)]
    pub unknown: BTreeMap<String, serde_json::Value>,
}

impl From<CreateArticleRequest> for RawPostInput {
    fn from(request: CreateArticleRequest) -> Self {
        Self {
            title: request.title,
            body: request.body,
            image: request.image.map(|image| RawImage {
                source: ImageSource::Base64(image.data),
                media_type: image.media_type,
            }),
            unknown_fields: request.unknown.into_keys().collect(),
        }
    }
}

pub(super) fn malformed_json(rejection: &JsonRejection) -> HttpError {
    HttpError::from_error(ApplicationError::validation(rejection.body_text()))
}

#[utoipa::path(
    get,
    path = "/api/v1/articles",
    responses(
        (status = 200, description = "Published articles, newest first.", body = ArticleListResponse),
        (status = 500, description = "Unexpected server error.", body = crate::presentation::http::error::ErrorResponse)
    ),
    tag = "Articles"
)]
pub async fn list_articles(
    Extension(state): Extension<HttpState>,
) -> HttpResult<Json<ArticleListResponse>> {
    let items = state
        .services
        .article_queries
        .list_articles()
        .await
        .into_http()?;
    Ok(Json(ArticleListResponse { items }))
}

#[utoipa::path(
    get,
    path = "/api/v1/articles/{id}",
    params(("id" = i64, Path, description = "Article identifier")),
    responses(
        (status = 200, description = "The article.", body = ArticleDto),
        (status = 404, description = "Article not found.", body = crate::presentation::http::error::ErrorResponse)
    ),
    tag = "Articles"
)]
pub async fn get_article(
    Extension(state): Extension<HttpState>,
    Path(id): Path<i64>,
) -> HttpResult<Json<ArticleDto>> {
    state
        .services
        .article_queries
        .get_article(GetArticleByIdQuery { id })
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    post,
    path = "/api/v1/articles",
    request_body = CreateArticleRequest,
    responses(
        (status = 201, description = "Article published; follow Location to the listing.", body = PublicationReceipt),
        (status = 401, description = "Missing or invalid token.", body = crate::presentation::http::error::ErrorResponse),
        (status = 409, description = "A publication by this caller is still running.", body = crate::presentation::http::error::ErrorResponse),
        (status = 422, description = "Invalid fields.", body = crate::presentation::http::error::ErrorResponse),
        (status = 502, description = "Upload, record creation or listing refresh failed.", body = crate::presentation::http::error::ErrorResponse)
    ),
    security(("bearerAuth" = [])),
    tag = "Articles"
)]
pub async fn create_article(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    payload: Result<Json<CreateArticleRequest>, JsonRejection>,
) -> HttpResult<(StatusCode, [(header::HeaderName, String); 1], Json<PublicationReceipt>)> {
    let Json(payload) = payload.map_err(|rejection| malformed_json(&rejection))?;
    let command = PublishArticleCommand {
        input: payload.into(),
    };

    let receipt = state
        .services
        .article_commands
        .publish_article(&user, command)
        .await
        .into_http()?;

    let location = receipt.redirect_to.clone();
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(receipt),
    ))
}
