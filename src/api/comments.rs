use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, patch},
    Json, Router,
};
use serde::Serialize;
use validator::Validate;

use crate::api::{method_not_allowed, JsonBody, QueryParams};
use crate::error::Result;
use crate::models::{Comment, CreateComment, VoteUpdate};
use crate::params::{parse_id, CommentListQuery};
use crate::services::CommentService;
use crate::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/articles/:article_id/comments",
            get(list_comments)
                .post(create_comment)
                .fallback(method_not_allowed),
        )
        .route(
            "/comments/:comment_id",
            patch(update_comment_votes)
                .delete(delete_comment)
                .fallback(method_not_allowed),
        )
}

#[derive(Debug, Serialize)]
pub struct CommentListResponse {
    pub comments: Vec<Comment>,
}

#[derive(Debug, Serialize)]
pub struct CommentResponse {
    pub comment: Comment,
}

async fn list_comments(
    State(state): State<AppState>,
    Path(article_id): Path<String>,
    QueryParams(query): QueryParams<CommentListQuery>,
) -> Result<Json<CommentListResponse>> {
    let article_id = parse_id(&article_id)?;
    let params = query.into_params(state.config.pagination.default_limit)?;

    let comments = CommentService::new(state.db.clone())
        .list_comments(article_id, &params)
        .await?;

    Ok(Json(CommentListResponse { comments }))
}

async fn create_comment(
    State(state): State<AppState>,
    Path(article_id): Path<String>,
    JsonBody(payload): JsonBody<CreateComment>,
) -> Result<(StatusCode, Json<CommentResponse>)> {
    let article_id = parse_id(&article_id)?;
    payload.validate()?;

    let comment = CommentService::new(state.db.clone())
        .create_comment(article_id, payload)
        .await?;

    Ok((StatusCode::CREATED, Json(CommentResponse { comment })))
}

async fn update_comment_votes(
    State(state): State<AppState>,
    Path(comment_id): Path<String>,
    JsonBody(payload): JsonBody<VoteUpdate>,
) -> Result<Json<CommentResponse>> {
    let comment_id = parse_id(&comment_id)?;
    let delta = payload.delta()?;

    let comment = CommentService::new(state.db.clone())
        .increment_votes(comment_id, delta)
        .await?;

    Ok(Json(CommentResponse { comment }))
}

async fn delete_comment(
    State(state): State<AppState>,
    Path(comment_id): Path<String>,
) -> Result<StatusCode> {
    let comment_id = parse_id(&comment_id)?;

    CommentService::new(state.db.clone())
        .delete_comment(comment_id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
