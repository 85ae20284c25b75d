//! HTTP API handlers.

use std::path::{Component, Path as FsPath, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::Value;
use tracing::{info, warn};

use crate::error::ProcessingError;
use crate::metrics;
use crate::processor::PathProcessor;

/// Error message returned when the request body carries no usable `path`.
/// Kept verbatim from the original service; clients match on it.
pub const MISSING_PATH_MESSAGE: &str = "Falta el parámetro 'path'";

/// Application state shared with handlers.
#[derive(Clone)]
pub struct AppState {
    /// The external processing collaborator.
    pub processor: Arc<dyn PathProcessor>,
    /// Base directory report images are served from.
    pub image_dir: PathBuf,
}

impl AppState {
    /// Create new app state.
    pub fn new(processor: Arc<dyn PathProcessor>, image_dir: impl Into<PathBuf>) -> Self {
        Self {
            processor,
            image_dir: image_dir.into(),
        }
    }
}

/// Structured error payload: `{"error": "<message>"}`.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    /// Human-readable error message.
    pub error: String,
}

/// Handler-level failures, mapped onto HTTP statuses.
///
/// Bad input and processing failure are distinct cases rather than one
/// blanket exception class; both render the same `{"error": ...}` shape.
#[derive(Debug)]
pub enum ApiError {
    /// Request body absent, unparseable, or lacking a usable `path`.
    MissingPath,
    /// The collaborator reported a failure.
    Processing(ProcessingError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::MissingPath => (StatusCode::BAD_REQUEST, MISSING_PATH_MESSAGE.to_string()),
            Self::Processing(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Status: "ok".
    pub status: &'static str,
}

/// Health check handler - always returns 200.
pub async fn health() -> impl IntoResponse {
    Json(HealthResponse { status: "ok" })
}

/// Process-path handler.
///
/// Pulls `path` out of the JSON body and forwards it to the collaborator on
/// the blocking pool. The call is fully blocking from this handler's
/// perspective; no timeout is enforced.
pub async fn process_path(
    State(state): State<AppState>,
    body: Option<Json<Value>>,
) -> Result<Json<Value>, ApiError> {
    let path = body
        .as_ref()
        .and_then(|Json(data)| data.get("path"))
        .and_then(Value::as_str)
        .filter(|p| !p.is_empty())
        .map(String::from)
        .ok_or(ApiError::MissingPath)?;

    metrics::inc_process_requests();
    info!(path = %path, "processing request");

    let start = Instant::now();
    let processor = Arc::clone(&state.processor);
    let requested = path.clone();

    let result = tokio::task::spawn_blocking(move || processor.process(&requested))
        .await
        .map_err(|e| {
            ApiError::Processing(ProcessingError::Failed(format!(
                "processing task failed: {e}"
            )))
        })?;

    metrics::record_processing_latency(start);

    match result {
        Ok(value) => Ok(Json(value)),
        Err(e) => {
            metrics::inc_process_failures();
            warn!(path = %path, error = %e, "processing failed");
            Err(ApiError::Processing(e))
        }
    }
}

/// Image serving handler.
///
/// Resolves `filename` strictly beneath the configured base directory and
/// returns the file bytes with a content type derived from the extension.
pub async fn get_image(
    State(state): State<AppState>,
    Path(filename): Path<String>,
) -> Response {
    let relative = match sanitize_relative(&filename) {
        Some(p) => p,
        None => {
            warn!(filename = %filename, "rejected image path");
            return (StatusCode::NOT_FOUND, "Image not found").into_response();
        }
    };

    let full_path = state.image_dir.join(relative);

    match tokio::fs::read(&full_path).await {
        Ok(bytes) => {
            metrics::inc_images_served();
            (
                StatusCode::OK,
                [(header::CONTENT_TYPE, content_type_for(&full_path))],
                bytes,
            )
                .into_response()
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            (StatusCode::NOT_FOUND, "Image not found").into_response()
        }
        Err(e) => {
            warn!(path = %full_path.display(), error = %e, "image read failed");
            (StatusCode::INTERNAL_SERVER_ERROR, "Error reading image").into_response()
        }
    }
}

/// Reject any path segment that would escape the base directory.
fn sanitize_relative(filename: &str) -> Option<PathBuf> {
    let path = FsPath::new(filename);

    if path
        .components()
        .all(|c| matches!(c, Component::Normal(_)))
    {
        Some(path.to_path_buf())
    } else {
        None
    }
}

/// Content type for a served file, by extension.
fn content_type_for(path: &FsPath) -> String {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);

    let mime = match ext.as_deref() {
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("svg") => "image/svg+xml",
        Some("bmp") => "image/bmp",
        Some("ico") => "image/x-icon",
        _ => "application/octet-stream",
    };

    mime.to_string()
}
