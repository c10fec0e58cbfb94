//! Handler errors and shared response helpers.
//!
//! Every failure leaves a handler as an [`ApiError`], rendered as
//! `{"error": "<message>"}`. Client mistakes (400/404) carry a message the
//! caller can act on. Server failures carry only a generic message; the
//! cause is logged here and never sent to the caller.

use std::fmt::Display;

use axum::Json;
use axum::http::{HeaderName, StatusCode, header};
use axum::response::{IntoResponse, Response};
use bytes::Bytes;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use tracing::error;

use crate::content::DraftError;
use crate::error::{ContentError, UploadError};

/// Result type for handlers.
pub type ApiResult<T> = Result<T, ApiError>;

/// A failed request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Malformed body, missing field, id mismatch, duplicate id (400).
    Validation(String),
    /// No session (401). `redirect` is the login page URL that returns to
    /// the rejected path.
    Unauthenticated { redirect: String },
    /// Addressed item, index or file does not exist (404).
    NotFound(String),
    /// Body over the configured limit (413).
    TooLarge,
    /// Store, parse or write failure (500). Message is generic.
    Internal(String),
}

impl ApiError {
    /// Logs `cause` and returns a generic 500 naming only the action.
    pub fn internal(action: &str, cause: &dyn Display) -> Self {
        error!(error = %cause, "failed to {action}");
        Self::Internal(format!("Failed to {action}"))
    }

    /// Maps an accessor failure; `action` describes the operation for the
    /// generic 500 message (e.g. `"update hero data"`).
    pub fn content(action: &str, err: ContentError) -> Self {
        match err {
            ContentError::ItemNotFound { .. } | ContentError::IndexOutOfRange { .. } => {
                Self::NotFound(err.to_string())
            }
            ContentError::DuplicateId { .. } => Self::Validation(err.to_string()),
            ContentError::Store(e) => Self::internal(action, &e),
        }
    }

    /// Maps an upload failure.
    pub fn upload(err: UploadError) -> Self {
        match err {
            UploadError::MissingFile => Self::Validation("No file provided".to_string()),
            UploadError::NotAnImage(_) => Self::Validation("File must be an image".to_string()),
            UploadError::TooLarge => Self::TooLarge,
            UploadError::Multipart(_) => Self::Validation(err.to_string()),
            UploadError::Io(e) => Self::internal("upload file", &e),
        }
    }

    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Unauthenticated { .. } => StatusCode::UNAUTHORIZED,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::TooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::Validation(m) | Self::NotFound(m) | Self::Internal(m) => m,
            Self::Unauthenticated { .. } => "Authentication required",
            Self::TooLarge => "Upload exceeds the size limit",
        }
    }
}

impl From<DraftError> for ApiError {
    fn from(err: DraftError) -> Self {
        Self::Validation(err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = match self {
            Self::Unauthenticated { ref redirect } => {
                json!({ "error": self.message(), "redirect": redirect })
            }
            _ => json!({ "error": self.message() }),
        };
        (self.status(), Json(body)).into_response()
    }
}

// ============================================================================
// Helpers
// ============================================================================

/// Decodes a JSON body. Shape errors are 400, never 422.
///
/// # Errors
///
/// [`ApiError::Validation`] for an empty or malformed body.
pub fn parse_body<T: DeserializeOwned>(body: &Bytes) -> ApiResult<T> {
    if body.is_empty() {
        return Err(ApiError::Validation("Request body is empty".to_string()));
    }
    serde_json::from_slice(body).map_err(|e| ApiError::Validation(format!("Invalid request body: {e}")))
}

/// Standard success marker.
#[must_use]
pub fn success() -> Json<Value> {
    Json(json!({ "success": true }))
}

/// Success marker with a message.
#[must_use]
pub fn success_message(message: &str) -> Json<Value> {
    Json(json!({ "success": true, "message": message }))
}

/// Headers keeping session responses out of every cache.
#[must_use]
pub fn no_cache() -> [(HeaderName, &'static str); 4] {
    [
        (
            header::CACHE_CONTROL,
            "no-store, no-cache, must-revalidate, proxy-revalidate",
        ),
        (header::PRAGMA, "no-cache"),
        (header::EXPIRES, "0"),
        (HeaderName::from_static("surrogate-control"), "no-store"),
    ]
}
