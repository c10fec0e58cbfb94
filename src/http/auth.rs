//! `/auth` handlers: login, logout and session check.

use axum::Json;
use axum::Router;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use bytes::Bytes;
use chrono::Utc;
use serde::Deserialize;
use serde_json::json;
use tracing::{info, warn};

use super::AppState;
use super::response::{ApiResult, no_cache, parse_body};
use crate::auth::is_authenticated;
use crate::observability::Event;
use crate::observability::metrics;

/// Routes under `/auth`.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/auth/login", post(login))
        .route("/auth/logout", post(logout))
        .route("/auth/check", get(check))
}

#[derive(Deserialize)]
struct LoginRequest {
    username: String,
    password: String,
}

async fn login(State(state): State<AppState>, body: Bytes) -> ApiResult<Response> {
    let request: LoginRequest = parse_body(&body)?;

    if !state
        .credentials
        .verify(&request.username, &request.password)
    {
        warn!(username = %request.username, "login rejected");
        metrics::record_login(false);
        state.events.emit(Event::LoginRejected {
            timestamp: Utc::now(),
            username: request.username,
        });
        return Ok((
            StatusCode::UNAUTHORIZED,
            no_cache(),
            Json(json!({ "success": false, "message": "Invalid username or password" })),
        )
            .into_response());
    }

    info!(username = %request.username, "login succeeded");
    metrics::record_login(true);
    state.events.emit(Event::LoginSucceeded {
        timestamp: Utc::now(),
        username: request.username,
    });

    Ok((
        no_cache(),
        [(header::SET_COOKIE, state.session.issue_cookie())],
        Json(json!({ "success": true })),
    )
        .into_response())
}

async fn logout(State(state): State<AppState>) -> Response {
    info!("logged out");
    state.events.emit(Event::LoggedOut {
        timestamp: Utc::now(),
    });
    (
        no_cache(),
        [(header::SET_COOKIE, state.session.clear_cookie())],
        Json(json!({ "success": true })),
    )
        .into_response()
}

async fn check(headers: HeaderMap) -> Response {
    let authenticated = is_authenticated(&headers);
    let status = if authenticated {
        StatusCode::OK
    } else {
        StatusCode::UNAUTHORIZED
    };
    (
        status,
        no_cache(),
        Json(json!({ "authenticated": authenticated })),
    )
        .into_response()
}
