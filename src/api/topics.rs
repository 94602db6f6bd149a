use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use serde::Serialize;
use validator::Validate;

use crate::api::{method_not_allowed, JsonBody};
use crate::error::Result;
use crate::models::{CreateTopic, Topic};
use crate::services::TopicService;
use crate::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route(
        "/topics",
        get(list_topics).post(create_topic).fallback(method_not_allowed),
    )
}

#[derive(Debug, Serialize)]
pub struct TopicListResponse {
    pub topics: Vec<Topic>,
}

#[derive(Debug, Serialize)]
pub struct TopicResponse {
    pub topic: Topic,
}

async fn list_topics(State(state): State<AppState>) -> Result<Json<TopicListResponse>> {
    let topics = TopicService::new(state.db.clone()).list_topics().await?;

    Ok(Json(TopicListResponse { topics }))
}

async fn create_topic(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<CreateTopic>,
) -> Result<(StatusCode, Json<TopicResponse>)> {
    payload.validate()?;

    let topic = TopicService::new(state.db.clone()).create_topic(payload).await?;

    Ok((StatusCode::CREATED, Json(TopicResponse { topic })))
}
