use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::error::AppResult;

pub const API_PREFIX: &str = "/api/v1";

/// Which form a form-context document belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FormAction {
    Create,
    Update,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Success,
    Error,
}

/// Outcome message carried on a redirect after a write.
#[derive(Debug, Clone, Serialize)]
pub struct Notice {
    pub level: Level,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: Level::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: Level::Error,
            message: message.into(),
        }
    }
}

/// `303 See Other` to `path` (relative to the API prefix) with the notice as body.
pub struct SeeOther {
    pub location: String,
    pub notice: Notice,
}

impl SeeOther {
    pub fn to(path: impl AsRef<str>, notice: Notice) -> Self {
        Self {
            location: format!("{}{}", API_PREFIX, path.as_ref()),
            notice,
        }
    }
}

impl IntoResponse for SeeOther {
    fn into_response(self) -> Response {
        (
            StatusCode::SEE_OTHER,
            [(header::LOCATION, self.location)],
            Json(self.notice),
        )
            .into_response()
    }
}

/// Delete always lands back on the list, reporting what happened.
pub fn after_delete(result: AppResult<bool>, resource: &str, list_path: &str) -> SeeOther {
    let notice = match result {
        Ok(true) => Notice::success(format!("{resource} deleted successfully!")),
        Ok(false) => Notice::error(format!("{resource} not found")),
        Err(e) => {
            e.log();
            Notice::error(format!(
                "Error deleting {}: {}",
                resource.to_lowercase(),
                e.public_message()
            ))
        }
    };
    SeeOther::to(list_path, notice)
}
