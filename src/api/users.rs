use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::Serialize;
use validator::Validate;

use crate::api::{method_not_allowed, JsonBody};
use crate::error::Result;
use crate::models::{CreateUser, User};
use crate::services::UserService;
use crate::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/users",
            get(list_users).post(create_user).fallback(method_not_allowed),
        )
        .route(
            "/users/:username",
            get(get_user).fallback(method_not_allowed),
        )
}

#[derive(Debug, Serialize)]
pub struct UserListResponse {
    pub users: Vec<User>,
}

#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub user: User,
}

async fn list_users(State(state): State<AppState>) -> Result<Json<UserListResponse>> {
    let users = UserService::new(state.db.clone()).list_users().await?;

    Ok(Json(UserListResponse { users }))
}

async fn get_user(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> Result<Json<UserResponse>> {
    let user = UserService::new(state.db.clone()).get_user(&username).await?;

    Ok(Json(UserResponse { user }))
}

async fn create_user(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<CreateUser>,
) -> Result<(StatusCode, Json<UserResponse>)> {
    payload.validate()?;

    let user = UserService::new(state.db.clone()).create_user(payload).await?;

    Ok((StatusCode::CREATED, Json(UserResponse { user })))
}
