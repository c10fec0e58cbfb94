//! Image upload and serving.

use axum::Json;
use axum::Router;
use axum::extract::multipart::MultipartRejection;
use axum::extract::{Multipart, Path, State};
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use chrono::Utc;
use serde_json::{Value, json};
use tracing::info;

use super::AppState;
use super::response::{ApiError, ApiResult};
use crate::error::UploadError;
use crate::observability::Event;
use crate::observability::metrics;
use crate::uploads::content_type_for;

/// Multipart field carrying the image.
pub const FILE_FIELD: &str = "file";

/// `POST /upload` plus the file route under the configured URL prefix.
pub fn routes(url_prefix: &str) -> Router<AppState> {
    Router::new()
        .route("/upload", post(upload))
        .route(&format!("{url_prefix}/{{name}}"), get(serve_file))
}

async fn upload(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> ApiResult<Json<Value>> {
    let mut multipart = multipart.map_err(|e| multipart_error(e.status(), e.body_text()))?;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_error(e.status(), e.body_text()))?
    {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }
        let original_name = field.file_name().map(str::to_owned);
        let content_type = field.content_type().unwrap_or_default().to_owned();
        let data = field
            .bytes()
            .await
            .map_err(|e| multipart_error(e.status(), e.body_text()))?;

        let stored = state
            .uploads
            .store(original_name.as_deref(), &content_type, &data)
            .await
            .map_err(ApiError::upload)?;

        info!(filepath = %stored.filepath, bytes = stored.bytes, "file uploaded");
        metrics::record_upload(stored.bytes);
        state.events.emit(Event::FileUploaded {
            timestamp: Utc::now(),
            filepath: stored.filepath.clone(),
            content_type,
            bytes: stored.bytes,
        });
        return Ok(Json(json!({ "success": true, "filepath": stored.filepath })));
    }

    Err(ApiError::upload(UploadError::MissingFile))
}

/// Keeps the body-limit status; every other decode failure is a 400.
fn multipart_error(status: StatusCode, text: String) -> ApiError {
    if status == StatusCode::PAYLOAD_TOO_LARGE {
        ApiError::upload(UploadError::TooLarge)
    } else {
        ApiError::upload(UploadError::Multipart(text))
    }
}

async fn serve_file(State(state): State<AppState>, Path(name): Path<String>) -> ApiResult<Response> {
    match state.uploads.read(&name).await {
        Ok(Some(data)) => {
            Ok(([(header::CONTENT_TYPE, content_type_for(&name))], data).into_response())
        }
        Ok(None) => Err(ApiError::NotFound("File not found".to_string())),
        Err(e) => Err(ApiError::internal("read file", &e)),
    }
}
