use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use sqlx::postgres::PgDatabaseError;

pub const INVALID_VALUE: &str = "Bad Request - invalid value";
pub const REQUIRED_INPUT: &str = "Bad Request - Required input not provided";
pub const DUPLICATE_INPUT: &str = "Bad Request - duplicate input";
pub const ID_NOT_FOUND: &str = "ID Not Found";

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    BadRequest(String),

    #[error("Invalid Method")]
    MethodNotAllowed,

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl AppError {
    pub fn invalid_value() -> Self {
        AppError::BadRequest(INVALID_VALUE.to_string())
    }

    pub fn required_input() -> Self {
        AppError::BadRequest(REQUIRED_INPUT.to_string())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        AppError::NotFound(msg.into())
    }

    /// Status and client-facing message for this error
    fn status_and_message(&self) -> (StatusCode, String) {
        match self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::MethodNotAllowed => (StatusCode::METHOD_NOT_ALLOWED, self.to_string()),
            AppError::Database(sqlx::Error::RowNotFound) => {
                (StatusCode::NOT_FOUND, "Not Found".to_string())
            }
            AppError::Database(sqlx::Error::Database(db_err)) => {
                let classified = db_err.code().and_then(|code| classify_sqlstate(&code));
                match classified {
                    Some((status, msg)) => {
                        let detail = db_err
                            .try_downcast_ref::<PgDatabaseError>()
                            .and_then(|pg| pg.detail());
                        let msg = match detail {
                            Some(detail) => format!("{} - {}", msg, detail),
                            None => msg.to_string(),
                        };
                        (status, msg)
                    }
                    None => internal_error(self),
                }
            }
            AppError::Database(_) => internal_error(self),
        }
    }
}

fn internal_error(err: &AppError) -> (StatusCode, String) {
    tracing::error!("Unhandled error: {:?}", err);
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "Internal Server Error".to_string(),
    )
}

/// Map a PostgreSQL SQLSTATE to the outcome it represents for a client.
///
/// Codes not listed here are server faults.
pub fn classify_sqlstate(code: &str) -> Option<(StatusCode, &'static str)> {
    match code {
        // invalid_text_representation
        "22P02" => Some((StatusCode::BAD_REQUEST, INVALID_VALUE)),
        // numeric_value_out_of_range
        "22003" => Some((StatusCode::BAD_REQUEST, INVALID_VALUE)),
        // not_null_violation
        "23502" => Some((StatusCode::BAD_REQUEST, REQUIRED_INPUT)),
        // unique_violation
        "23505" => Some((StatusCode::BAD_REQUEST, DUPLICATE_INPUT)),
        // foreign_key_violation
        "23503" => Some((StatusCode::NOT_FOUND, ID_NOT_FOUND)),
        _ => None,
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        // a blank string counts as missing input
        let missing = errors
            .field_errors()
            .values()
            .flat_map(|errs| errs.iter())
            .any(|err| err.code == "required" || err.code == "length");

        if missing {
            AppError::required_input()
        } else {
            AppError::invalid_value()
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = self.status_and_message();

        let body = Json(json!({ "msg": message }));

        (status, body).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
