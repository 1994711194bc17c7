// src/presentation/http/controllers/comments.rs
use crate::application::{
    commands::comments::CreateCommentCommand,
    comments::CommentFeed,
    dto::{CommentDto, CommentListDto},
    queries::{articles::GetArticleByIdQuery, comments::ListCommentsQuery},
    validation::RawCommentInput,
};
use crate::domain::article::ArticleId;
use crate::presentation::http::{
    error::{HttpError, HttpResult, IntoHttpResult},
    extractors::Authenticated,
    state::HttpState,
};
use axum::{
    Extension, Json,
    extract::{Path, rejection::JsonRejection},
    http::StatusCode,
    response::sse::{Event, KeepAlive, Sse},
};
use futures::{Stream, StreamExt, future};
use serde::Deserialize;
use std::collections::BTreeMap;
use utoipa::ToSchema;

use super::articles::malformed_json;

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateCommentRequest {
    #[serde(default)]
    pub body: Option<String>,
    #[serde(flatten)]
    #[schema(ignore)]
    pub unknown: BTreeMap<String, serde_json::Value>,
}

#[utoipa::path(
    get,
    path = "/api/v1/articles/{id}/comments",
    params(("id" = i64, Path, description = "Article identifier")),
    responses(
        (status = 200, description = "Comments, oldest first.", body = CommentListDto),
        (status = 400, description = "Invalid article id.", body = crate::presentation::http::error::ErrorResponse)
    ),
    tag = "Comments"
)]
pub async fn list_comments(
    Extension(state): Extension<HttpState>,
    Path(id): Path<i64>,
) -> HttpResult<Json<CommentListDto>> {
    state
        .services
        .comment_queries
        .list_comments(ListCommentsQuery { article_id: id })
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    post,
    path = "/api/v1/articles/{id}/comments",
    params(("id" = i64, Path, description = "Article identifier")),
    request_body = CreateCommentRequest,
    responses(
        (status = 201, description = "Comment posted.", body = CommentDto),
        (status = 401, description = "Missing or invalid token.", body = crate::presentation::http::error::ErrorResponse),
        (status = 404, description = "Article not found.", body = crate::presentation::http::error::ErrorResponse),
        (status = 422, description = "Invalid fields.", body = crate::presentation::http::error::ErrorResponse)
    ),
    security(("bearerAuth" = [])),
    tag = "Comments"
)]
pub async fn create_comment(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    Path(id): Path<i64>,
    payload: Result<Json<CreateCommentRequest>, JsonRejection>,
) -> HttpResult<(StatusCode, Json<CommentDto>)> {
    let Json(payload) = payload.map_err(|rejection| malformed_json(&rejection))?;
    let command = CreateCommentCommand {
        input: RawCommentInput {
            article_id: Some(id),
            body: payload.body,
            unknown_fields: payload.unknown.into_keys().collect(),
        },
    };

    let comment = state
        .services
        .comment_commands
        .create_comment(&user, command)
        .await
        .into_http()?;
    Ok((StatusCode::CREATED, Json(comment)))
}

#[utoipa::path(
    get,
    path = "/api/v1/articles/{id}/comments/live",
    params(("id" = i64, Path, description = "Article identifier")),
    responses(
        (status = 200, description = "Server-sent `comments` events, each carrying the full ordered list.", content_type = "text/event-stream", body = CommentListDto),
        (status = 404, description = "Article not found.", body = crate::presentation::http::error::ErrorResponse)
    ),
    tag = "Comments"
)]
pub async fn live_comments(
    Extension(state): Extension<HttpState>,
    Path(id): Path<i64>,
) -> HttpResult<Sse<impl Stream<Item = Result<Event, axum::Error>>>> {
    // Unknown articles are a 404 rather than an empty feed that never updates.
    state
        .services
        .article_queries
        .get_article(GetArticleByIdQuery { id })
        .await
        .into_http()?;

    let article_id =
        ArticleId::new(id).map_err(|err| HttpError::from_error(err.into()))?;
    let subscription = state
        .services
        .comment_hub
        .subscribe(article_id)
        .await
        .into_http()?;
    tracing::debug!(%article_id, "live comment subscriber attached");

    let events = subscription
        .into_stream()
        .filter_map(|feed| future::ready(feed_event(&feed)));

    Ok(Sse::new(events).keep_alive(KeepAlive::default()))
}

fn feed_event(feed: &CommentFeed) -> Option<Result<Event, axum::Error>> {
    match feed {
        CommentFeed::Loading => None,
        CommentFeed::Live(items) => {
            let payload = CommentListDto::from(items.clone());
            Some(Event::default().event("comments").json_data(payload))
        }
    }
}
