use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

#[derive(Debug, Clone, FromRow, Serialize, Deserialize, PartialEq)]
pub struct User {
    pub username: String,
    pub name: String,
    pub avatar_url: String,
}

#[derive(Debug, Default, Deserialize, Validate)]
pub struct CreateUser {
    #[validate(required, length(min = 1))]
    pub username: Option<String>,
    #[validate(required)]
    pub name: Option<String>,
    #[validate(required)]
    pub avatar_url: Option<String>,
}
