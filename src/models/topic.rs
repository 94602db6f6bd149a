use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

#[derive(Debug, Clone, FromRow, Serialize, Deserialize, PartialEq)]
pub struct Topic {
    pub slug: String,
    pub description: String,
}

#[derive(Debug, Default, Deserialize, Validate)]
pub struct CreateTopic {
    #[validate(required, length(min = 1))]
    pub slug: Option<String>,
    #[validate(required)]
    pub description: Option<String>,
}
