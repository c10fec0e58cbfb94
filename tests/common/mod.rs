//! Shared integration-test harness: an in-process router over a temporary
//! content directory, and helpers for running the `folio` binary.

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::process::Output;
use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use serde_json::Value;
use tempfile::TempDir;
use tower::util::ServiceExt;

use folio::auth::{SessionPolicy, StaticCredentials};
use folio::content::{ContentService, DocumentStore, JsonFileStore, seed_document};
use folio::http::{AppState, build_router};
use folio::observability::EventEmitter;
use folio::uploads::UploadStore;

/// Credentials accepted by [`TestApp`].
pub const USERNAME: &str = "admin";
pub const PASSWORD: &str = "correct-horse";

/// Cookie header carrying a valid session.
pub const SESSION: &str = "admin_session=true";

/// Body limit used by [`TestApp`].
pub const MAX_BODY: usize = 64 * 1024;

/// A router over a seeded content document in a temporary directory.
pub struct TestApp {
    pub router: Router,
    pub content: Arc<ContentService>,
    pub dir: TempDir,
}

impl TestApp {
    /// Seeds the document and builds the router.
    #[allow(clippy::missing_panics_doc)]
    pub async fn new() -> Self {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = JsonFileStore::new(dir.path().join("content.json"));
        store
            .save(&seed_document().expect("seed parses"))
            .await
            .expect("seed written");
        Self::with_store(dir, Arc::new(store))
    }

    /// Builds the router over an arbitrary store.
    pub fn with_store(dir: TempDir, store: Arc<dyn DocumentStore>) -> Self {
        let content = Arc::new(ContentService::new(store));
        let state = AppState {
            content: Arc::clone(&content),
            uploads: Arc::new(UploadStore::new(dir.path().join("uploads"), "/uploads")),
            credentials: Arc::new(StaticCredentials::new(USERNAME, PASSWORD)),
            session: SessionPolicy::default(),
            events: Arc::new(EventEmitter::noop()),
        };
        Self {
            router: build_router(state, MAX_BODY),
            content,
            dir,
        }
    }

    pub fn content_path(&self) -> PathBuf {
        self.dir.path().join("content.json")
    }

    pub fn uploads_dir(&self) -> PathBuf {
        self.dir.path().join("uploads")
    }

    /// Sends a request and returns the raw response.
    #[allow(clippy::missing_panics_doc)]
    pub async fn send(&self, request: Request<Body>) -> axum::response::Response {
        self.router
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible")
    }

    /// Sends a JSON request, optionally with a session, and decodes the
    /// JSON response.
    pub async fn json(
        &self,
        method: &str,
        uri: &str,
        body: Option<&Value>,
        authed: bool,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if authed {
            builder = builder.header(header::COOKIE, SESSION);
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string())),
            None => builder.body(Body::empty()),
        }
        .expect("valid request");

        let response = self.send(request).await;
        let status = response.status();
        (status, body_json(response).await)
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.json("GET", uri, None, false).await
    }

    pub async fn put(&self, uri: &str, body: &Value) -> (StatusCode, Value) {
        self.json("PUT", uri, Some(body), true).await
    }

    pub async fn post(&self, uri: &str, body: &Value) -> (StatusCode, Value) {
        self.json("POST", uri, Some(body), true).await
    }

    pub async fn delete(&self, uri: &str) -> (StatusCode, Value) {
        self.json("DELETE", uri, None, true).await
    }

    /// Reads the document straight from disk.
    #[allow(clippy::missing_panics_doc)]
    pub fn stored_document(&self) -> Value {
        let raw = std::fs::read(self.content_path()).expect("content file");
        serde_json::from_slice(&raw).expect("content file is JSON")
    }
}

/// Decodes a response body as JSON; empty bodies become `Null`.
#[allow(clippy::missing_panics_doc)]
pub async fn body_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body readable");
    if bytes.is_empty() {
        return Value::Null;
    }
    serde_json::from_slice(&bytes).expect("body is JSON")
}

/// Builds a `multipart/form-data` body with one file part.
pub fn multipart_body(
    field: &str,
    filename: &str,
    content_type: &str,
    data: &[u8],
) -> (String, Vec<u8>) {
    let boundary = "folio-test-boundary";
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{boundary}\r\n").as_bytes());
    body.extend_from_slice(
        format!(
            "Content-Disposition: form-data; name=\"{field}\"; filename=\"{filename}\"\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(format!("Content-Type: {content_type}\r\n\r\n").as_bytes());
    body.extend_from_slice(data);
    body.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());
    (format!("multipart/form-data; boundary={boundary}"), body)
}

// ============================================================================
// Binary helpers
// ============================================================================

/// Path of the compiled `folio` binary.
pub fn folio_bin() -> &'static str {
    env!("CARGO_BIN_EXE_folio")
}

/// Runs `folio` with `args` to completion. `FOLIO_*` variables from the
/// host environment are removed first.
#[allow(clippy::missing_panics_doc)]
pub fn run_folio(args: &[&str]) -> Output {
    let mut command = std::process::Command::new(folio_bin());
    for (key, _) in std::env::vars_os() {
        if key.to_string_lossy().starts_with("FOLIO_") {
            command.env_remove(key);
        }
    }
    command.args(args).output().expect("failed to run folio")
}

/// `path` as `&str`, for building argument lists.
#[allow(clippy::missing_panics_doc)]
pub fn arg(path: &Path) -> &str {
    path.to_str().expect("non-UTF-8 path")
}
