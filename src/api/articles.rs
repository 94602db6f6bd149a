use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::Serialize;
use validator::Validate;

use crate::api::{method_not_allowed, JsonBody, QueryParams};
use crate::error::Result;
use crate::models::{Article, ArticleSummary, CreateArticle, VoteUpdate};
use crate::params::{parse_id, ArticleListQuery};
use crate::services::ArticleService;
use crate::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/articles",
            get(list_articles)
                .post(create_article)
                .fallback(method_not_allowed),
        )
        .route(
            "/articles/:article_id",
            get(get_article)
                .patch(update_article_votes)
                .delete(delete_article)
                .fallback(method_not_allowed),
        )
}

#[derive(Debug, Serialize)]
pub struct ArticleListResponse {
    pub articles: Vec<ArticleSummary>,
    pub total_count: i64,
}

#[derive(Debug, Serialize)]
pub struct ArticleResponse {
    pub article: Article,
}

async fn list_articles(
    State(state): State<AppState>,
    QueryParams(query): QueryParams<ArticleListQuery>,
) -> Result<Json<ArticleListResponse>> {
    let params = query.into_params(state.config.pagination.default_limit)?;

    let (articles, total_count) = ArticleService::new(state.db.clone())
        .list_articles(&params)
        .await?;

    Ok(Json(ArticleListResponse {
        articles,
        total_count,
    }))
}

async fn get_article(
    State(state): State<AppState>,
    Path(article_id): Path<String>,
) -> Result<Json<ArticleResponse>> {
    let article_id = parse_id(&article_id)?;

    let article = ArticleService::new(state.db.clone())
        .get_article(article_id)
        .await?;

    Ok(Json(ArticleResponse { article }))
}

async fn update_article_votes(
    State(state): State<AppState>,
    Path(article_id): Path<String>,
    JsonBody(payload): JsonBody<VoteUpdate>,
) -> Result<Json<ArticleResponse>> {
    let article_id = parse_id(&article_id)?;
    let delta = payload.delta()?;

    let article = ArticleService::new(state.db.clone())
        .increment_votes(article_id, delta)
        .await?;

    Ok(Json(ArticleResponse { article }))
}

async fn create_article(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<CreateArticle>,
) -> Result<(StatusCode, Json<ArticleResponse>)> {
    payload.validate()?;

    let article = ArticleService::new(state.db.clone())
        .create_article(payload)
        .await?;

    Ok((StatusCode::CREATED, Json(ArticleResponse { article })))
}

async fn delete_article(
    State(state): State<AppState>,
    Path(article_id): Path<String>,
) -> Result<StatusCode> {
    let article_id = parse_id(&article_id)?;

    ArticleService::new(state.db.clone())
        .delete_article(article_id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
