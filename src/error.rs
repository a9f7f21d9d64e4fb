//! Unified error type for bistro-server
//!
//! `AppError` maps the service error taxonomy onto HTTP responses with a
//! `{message}` JSON body. Store and provider failures propagate via `?`
//! without retry and surface as 500s after being logged.

use axum::Json;
use axum::response::{IntoResponse, Response};
use http::StatusCode;
use thiserror::Error;

/// Service error taxonomy
#[derive(Debug, Error)]
pub enum AppError {
    /// Authentication required (401)
    #[error("Unauthorized access")]
    Unauthenticated,

    /// Permission denied (403)
    #[error("{0}")]
    Forbidden(String),

    /// Resource not found (404)
    #[error("{0} not found")]
    NotFound(String),

    /// Malformed request payload (400)
    #[error("{0}")]
    Validation(String),

    /// Store or provider failure (500)
    #[error("Internal server error")]
    Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl AppError {
    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::Forbidden(message.into())
    }

    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::NotFound(resource.into())
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// HTTP status for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Unauthenticated => StatusCode::UNAUTHORIZED,
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<mongodb::error::Error> for AppError {
    fn from(e: mongodb::error::Error) -> Self {
        Self::Store(e.into())
    }
}

// Malformed ObjectIds in path parameters propagate as generic server
// errors, matching the store's own behavior for bad identifiers.
impl From<mongodb::bson::oid::Error> for AppError {
    fn from(e: mongodb::bson::oid::Error) -> Self {
        Self::Store(e.into())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if let Self::Store(ref source) = self {
            tracing::error!(error = %source, "Store error");
        }

        let status = self.status_code();
        let body = serde_json::json!({ "message": self.to_string() });
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_mapping_follows_taxonomy() {
        assert_eq!(
            AppError::Unauthenticated.status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AppError::forbidden("nope").status_code(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            AppError::not_found("Menu item").status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::validation("bad payload").status_code(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn not_found_message_names_the_resource() {
        let err = AppError::not_found("Menu item");
        assert_eq!(err.to_string(), "Menu item not found");
    }

    #[test]
    fn malformed_object_id_maps_to_store_error() {
        let parse_err = mongodb::bson::oid::ObjectId::parse_str("not-an-oid").unwrap_err();
        let err: AppError = parse_err.into();
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
