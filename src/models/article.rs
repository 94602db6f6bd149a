use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// Listing row; the body is left out of collection responses
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ArticleSummary {
    pub article_id: i32,
    pub title: String,
    pub topic: String,
    pub author: String,
    pub votes: i32,
    pub created_at: DateTime<Utc>,
    pub comment_count: i64,
}

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Article {
    pub article_id: i32,
    pub title: String,
    pub body: String,
    pub topic: String,
    pub author: String,
    pub votes: i32,
    pub created_at: DateTime<Utc>,
    pub comment_count: i64,
}

#[derive(Debug, Default, Deserialize, Validate)]
pub struct CreateArticle {
    #[validate(required, length(min = 1))]
    pub title: Option<String>,
    #[validate(required)]
    pub topic: Option<String>,
    #[validate(required)]
    pub author: Option<String>,
    #[validate(required, length(min = 1))]
    pub body: Option<String>,
}

/// Body of the vote-increment endpoints
#[derive(Debug, Default, Deserialize)]
pub struct VoteUpdate {
    #[serde(default)]
    pub inc_votes: Option<serde_json::Value>,
}

impl VoteUpdate {
    /// Signed vote delta; an absent or null `inc_votes` leaves votes unchanged.
    pub fn delta(&self) -> crate::error::Result<i32> {
        use serde_json::Value;

        match &self.inc_votes {
            None | Some(Value::Null) => Ok(0),
            Some(Value::Number(n)) => n
                .as_i64()
                .and_then(|n| i32::try_from(n).ok())
                .ok_or_else(crate::error::AppError::invalid_value),
            Some(Value::String(s)) => s
                .trim()
                .parse::<i32>()
                .map_err(|_| crate::error::AppError::invalid_value()),
            Some(_) => Err(crate::error::AppError::invalid_value()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn update(value: serde_json::Value) -> VoteUpdate {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_absent_delta_is_noop() {
        assert_eq!(update(json!({})).delta().unwrap(), 0);
        assert_eq!(update(json!({ "inc_votes": null })).delta().unwrap(), 0);
    }

    #[test]
    fn test_signed_deltas() {
        assert_eq!(update(json!({ "inc_votes": 100 })).delta().unwrap(), 100);
        assert_eq!(update(json!({ "inc_votes": -2 })).delta().unwrap(), -2);
        assert_eq!(update(json!({ "inc_votes": "7" })).delta().unwrap(), 7);
    }

    #[test]
    fn test_extra_fields_ignored() {
        let body = update(json!({ "inc_votes": 1, "face": "smiley" }));
        assert_eq!(body.delta().unwrap(), 1);
    }

    #[test]
    fn test_invalid_deltas() {
        for value in [
            json!("banana"),
            json!(1.5),
            json!(true),
            json!([1]),
            json!(i64::from(i32::MAX) + 1),
        ] {
            assert!(update(json!({ "inc_votes": value })).delta().is_err());
        }
    }
}
