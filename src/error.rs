//! Handler-boundary error type.
//!
//! Every service returns `Result<T, AppError>`; the error renders itself as a
//! JSON body with the matching status code.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::{error, warn};

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{resource} not found")]
    NotFound { resource: &'static str, id: i32 },

    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Conflict(String),

    #[error("database error: {0}")]
    Database(sqlx::Error),

    #[error("internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    pub fn not_found(resource: &'static str, id: i32) -> Self {
        Self::NotFound { resource, id }
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::Database(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message safe to show to the client; server-side causes stay in the logs.
    pub fn public_message(&self) -> String {
        match self {
            Self::Database(_) | Self::Internal(_) => "an internal error occurred".to_string(),
            other => other.to_string(),
        }
    }

    pub fn log(&self) {
        match self {
            Self::Database(e) => error!(error = %e, "database error"),
            Self::Internal(e) => error!(error = %e, "internal error"),
            Self::NotFound { resource, id } => warn!(%resource, %id, "not found"),
            other => warn!(error = %other, "request rejected"),
        }
    }
}

/// Constraint violations are the client's fault; everything else is ours.
impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        if let Some(db_err) = e.as_database_error() {
            if db_err.is_unique_violation() {
                return Self::Conflict(match db_err.constraint() {
                    Some("users_email_key") => "Email already registered".to_string(),
                    Some(c) => format!("duplicate value violates {c}"),
                    None => "duplicate value".to_string(),
                });
            }
            if db_err.is_foreign_key_violation() {
                return Self::Validation(match db_err.constraint() {
                    Some(c) => format!("referenced record does not exist ({c})"),
                    None => "referenced record does not exist".to_string(),
                });
            }
            // numeric_value_out_of_range
            if db_err.code().as_deref() == Some("22003") {
                return Self::Validation("numeric value out of range".to_string());
            }
            if db_err.is_check_violation() {
                return Self::Validation(match db_err.constraint() {
                    Some(c) => format!("value violates {c}"),
                    None => "value out of range".to_string(),
                });
            }
        }
        Self::Database(e)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        self.log();
        let status = self.status();
        let message = self.public_message();

        (
            status,
            Json(json!({
                "status": "error",
                "message": message,
            })),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    #[test]
    fn statuses_follow_variant() {
        assert_eq!(AppError::not_found("User", 1).status(), StatusCode::NOT_FOUND);
        assert_eq!(AppError::validation("bad").status(), StatusCode::BAD_REQUEST);
        assert_eq!(AppError::Conflict("dup".into()).status(), StatusCode::CONFLICT);
        assert_eq!(
            AppError::Database(sqlx::Error::PoolTimedOut).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn row_not_found_is_a_database_error() {
        // fetch_one misses are turned into NotFound by the services, not here
        let err = AppError::from(sqlx::Error::RowNotFound);
        assert!(matches!(err, AppError::Database(_)));
    }

    #[tokio::test]
    async fn not_found_body_names_resource() {
        let response = AppError::not_found("Caregiver", 7).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["status"], "error");
        assert_eq!(json["message"], "Caregiver not found");
    }

    #[tokio::test]
    async fn internal_errors_hide_details() {
        let response = AppError::Internal(anyhow::anyhow!("secret detail")).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let text = String::from_utf8(body.to_vec()).unwrap();
        assert!(!text.contains("secret detail"));
    }
}
