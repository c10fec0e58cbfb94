//! Embedded admin pages. The session gate guards everything here except
//! the login page.

use axum::Router;
use axum::response::Html;
use axum::routing::get;

use super::AppState;

const LOGIN_HTML: &str = include_str!("../../assets/admin/login.html");
const DASHBOARD_HTML: &str = include_str!("../../assets/admin/dashboard.html");

/// Routes under `/admin`.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/admin/login", get(login_page))
        .route("/admin", get(dashboard))
        .route("/admin/{*page}", get(dashboard))
}

async fn login_page() -> Html<&'static str> {
    Html(LOGIN_HTML)
}

// The editor is a single page; it reads the section from the URL.
async fn dashboard() -> Html<&'static str> {
    Html(DASHBOARD_HTML)
}
