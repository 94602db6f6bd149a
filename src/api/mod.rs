mod articles;
mod comments;
mod extract;
mod topics;
mod users;

pub use extract::{JsonBody, QueryParams};

use axum::{routing::get, Json, Router};
use serde_json::{json, Value};

use crate::error::AppError;
use crate::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(endpoints).fallback(method_not_allowed))
        .merge(topics::routes())
        .merge(users::routes())
        .merge(articles::routes())
        .merge(comments::routes())
}

/// Known path, unsupported verb
pub async fn method_not_allowed() -> AppError {
    AppError::MethodNotAllowed
}

pub async fn page_not_found() -> AppError {
    AppError::not_found("Page not found")
}

async fn endpoints() -> Json<Value> {
    Json(json!({
        "endpoints": {
            "GET /api": "serves this description of the available endpoints",
            "GET /api/topics": "serves all topics",
            "POST /api/topics": "adds a topic; body: { slug, description }",
            "GET /api/users": "serves all users",
            "POST /api/users": "adds a user; body: { username, name, avatar_url }",
            "GET /api/users/:username": "serves a single user",
            "GET /api/articles": {
                "description": "serves articles with their comment counts and a total_count",
                "queries": ["sort_by", "order", "author", "topic", "limit", "p"]
            },
            "POST /api/articles": "adds an article; body: { title, topic, author, body }",
            "GET /api/articles/:article_id": "serves a single article with its comment count",
            "PATCH /api/articles/:article_id": "adds inc_votes to the article's votes",
            "DELETE /api/articles/:article_id": "deletes an article and its comments",
            "GET /api/articles/:article_id/comments": {
                "description": "serves the comments of an article",
                "queries": ["sort_by", "order", "limit", "p"]
            },
            "POST /api/articles/:article_id/comments": "adds a comment; body: { username, body }",
            "PATCH /api/comments/:comment_id": "adds inc_votes to the comment's votes",
            "DELETE /api/comments/:comment_id": "deletes a comment"
        }
    }))
}
