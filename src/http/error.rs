//! Error-to-response mapping for the HTTP surface.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

/// Errors surfaced by HTTP handlers.
///
/// Unresolvable content is uniformly not-found: callers never learn whether
/// the site, category, or post lookup missed.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("not found")]
    NotFound,
    #[error(transparent)]
    Db(#[from] diesel::result::Error),
    #[error("database connection unavailable: {0}")]
    Unavailable(String),
    #[error(transparent)]
    Invalidation(#[from] crate::revalidate::InvalidateError),
}

impl ApiError {
    pub(super) fn unavailable(err: impl std::fmt::Display) -> Self {
        Self::Unavailable(err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Db(err) => {
                error!("database error: {err}");
                StatusCode::INTERNAL_SERVER_ERROR
            }
            Self::Unavailable(err) => {
                error!("connection error: {err}");
                StatusCode::INTERNAL_SERVER_ERROR
            }
            Self::Invalidation(err) => {
                error!("invalidation error: {err}");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        let message = if status == StatusCode::NOT_FOUND {
            "Not Found"
        } else {
            "Internal Server Error"
        };
        (status, Json(json!({ "message": message }))).into_response()
    }
}
