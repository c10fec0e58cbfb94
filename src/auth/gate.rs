//! Session gate.
//!
//! Path-prefix rules deciding which requests need a session, and the
//! middleware enforcing them. Prefixes match whole path segments, so
//! `/uploads` is not under `/upload`.

use axum::extract::Request;
use axum::http::{Method, StatusCode, header};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use tracing::debug;

use super::session::is_authenticated;
use crate::http::ApiError;

/// Login page path.
pub const LOGIN_PAGE: &str = "/admin/login";

/// What a request needs before it reaches a handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Protection {
    /// Anyone may call it.
    Public,
    /// Browser page: anonymous callers are redirected to the login page.
    Page,
    /// API call: anonymous callers get 401.
    Api,
}

/// Returns `true` if `path` is `prefix` or lies beneath it.
fn under(path: &str, prefix: &str) -> bool {
    path.strip_prefix(prefix)
        .is_some_and(|rest| rest.is_empty() || rest.starts_with('/'))
}

/// Classifies a request by method and path.
#[must_use]
pub fn classify(method: &Method, path: &str) -> Protection {
    if under(path, "/admin") && !under(path, LOGIN_PAGE) {
        return Protection::Page;
    }

    let read_only = method == Method::GET || method == Method::HEAD;
    let guarded_api = under(path, "/content")
        || under(path, "/upload")
        || (under(path, "/auth") && !under(path, "/auth/login"));

    if guarded_api && !read_only {
        Protection::Api
    } else {
        Protection::Public
    }
}

/// Login page URL that returns to `path` afterwards.
#[must_use]
pub fn login_redirect(path: &str) -> String {
    format!("{LOGIN_PAGE}?redirect={}", urlencoding::encode(path))
}

/// Middleware enforcing [`classify`].
pub async fn session_gate(request: Request, next: Next) -> Response {
    let protection = classify(request.method(), request.uri().path());
    if protection == Protection::Public || is_authenticated(request.headers()) {
        return next.run(request).await;
    }

    let path = request.uri().path();
    let target = login_redirect(path);
    debug!(%path, method = %request.method(), "request rejected by session gate");

    match protection {
        Protection::Page => (StatusCode::SEE_OTHER, [(header::LOCATION, target)]).into_response(),
        _ => ApiError::Unauthenticated { redirect: target }.into_response(),
    }
}
