//! HTTP API.
//!
//! One axum router carries the content resources, the auth endpoints,
//! uploads and the embedded admin pages. Every route passes through the
//! session gate; request metrics wrap the gate so rejected calls are
//! counted too.

pub mod admin;
pub mod auth;
pub mod content;
pub mod response;
pub mod upload;

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

use axum::Router;
use axum::extract::{DefaultBodyLimit, MatchedPath, Request};
use axum::middleware::{self, Next};
use axum::response::Response;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::auth::{CredentialVerifier, SessionPolicy, session_gate};
use crate::content::ContentService;
use crate::error::ServerError;
use crate::observability::EventEmitter;
use crate::observability::metrics;
use crate::uploads::UploadStore;

pub use response::{ApiError, ApiResult};

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    pub content: Arc<ContentService>,
    pub uploads: Arc<UploadStore>,
    pub credentials: Arc<dyn CredentialVerifier>,
    pub session: SessionPolicy,
    pub events: Arc<EventEmitter>,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("uploads", &self.uploads)
            .field("session", &self.session)
            .finish_non_exhaustive()
    }
}

/// Builds the application router.
///
/// `max_body` replaces axum's default 2 MiB request limit; it bounds
/// uploads as well as JSON bodies.
pub fn build_router(state: AppState, max_body: usize) -> Router {
    let url_prefix = state.uploads.url_prefix().to_owned();

    Router::new()
        .merge(content::routes())
        .merge(auth::routes())
        .merge(upload::routes(&url_prefix))
        .merge(admin::routes())
        .fallback(not_found)
        .layer(DefaultBodyLimit::max(max_body))
        .layer(middleware::from_fn(session_gate))
        .layer(middleware::from_fn(track_metrics))
        .with_state(state)
}

async fn not_found() -> ApiError {
    ApiError::NotFound("Not found".to_string())
}

/// Records request count and latency under the matched route template.
async fn track_metrics(request: Request, next: Next) -> Response {
    let route = request
        .extensions()
        .get::<MatchedPath>()
        .map(|path| path.as_str().to_owned());
    let method = request.method().clone();
    let started = Instant::now();

    let response = next.run(request).await;

    metrics::record_request(route.as_deref(), method.as_str(), response.status().as_u16());
    metrics::record_request_duration(route.as_deref(), started.elapsed());
    response
}

// ============================================================================
// Listener
// ============================================================================

/// Binds the listener, returning it with the address actually bound.
///
/// # Errors
///
/// [`ServerError::Bind`] if the address is invalid or cannot be bound.
pub async fn bind(addr: &str) -> Result<(TcpListener, SocketAddr), ServerError> {
    let addr = parse_bind_addr(addr)?;
    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|e| ServerError::Bind(format!("{addr}: {e}")))?;
    let bound_addr = listener
        .local_addr()
        .map_err(|e| ServerError::Bind(format!("local_addr failed: {e}")))?;
    Ok((listener, bound_addr))
}

/// Serves `router` until `cancel` fires, then drains in-flight requests.
///
/// # Errors
///
/// [`ServerError::Serve`] if the accept loop fails.
pub async fn serve(
    listener: TcpListener,
    router: Router,
    cancel: CancellationToken,
) -> Result<(), ServerError> {
    axum::serve(listener, router)
        .with_graceful_shutdown(async move {
            cancel.cancelled().await;
        })
        .await?;
    debug!("HTTP server shut down");
    Ok(())
}

/// Parses a bind address string into a full `host:port` form.
///
/// Accepts:
/// - `:3000` → `0.0.0.0:3000`
/// - `3000` → `0.0.0.0:3000`
/// - `127.0.0.1:3000` → as-is
///
/// # Errors
///
/// [`ServerError::Bind`] if the result is not a valid socket address.
pub fn parse_bind_addr(input: &str) -> Result<String, ServerError> {
    let addr = if input.starts_with(':') {
        format!("0.0.0.0{input}")
    } else if input.parse::<u16>().is_ok() {
        format!("0.0.0.0:{input}")
    } else {
        input.to_string()
    };
    addr.parse::<SocketAddr>()
        .map_err(|e| ServerError::Bind(format!("invalid bind address \"{input}\": {e}")))?;
    Ok(addr)
}

// ============================================================================
// Tests
// ============================================================================
