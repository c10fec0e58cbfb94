//! Session cookie.
//!
//! A session is a single `admin_session=true` cookie. It carries no
//! identity and is not signed; possession of the sentinel value is the
//! whole check. Expiry is left to the browser via `Max-Age`.

use std::time::Duration;

use axum::http::HeaderMap;
use axum::http::header::COOKIE;

/// Cookie name.
pub const SESSION_COOKIE: &str = "admin_session";

/// Sentinel value of an authenticated session.
pub const SESSION_VALUE: &str = "true";

/// How session cookies are issued.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionPolicy {
    ttl: Duration,
    secure: bool,
}

impl Default for SessionPolicy {
    fn default() -> Self {
        Self::new(Duration::from_secs(24 * 60 * 60), false)
    }
}

impl SessionPolicy {
    #[must_use]
    pub const fn new(ttl: Duration, secure: bool) -> Self {
        Self { ttl, secure }
    }

    /// `Set-Cookie` value opening a session.
    #[must_use]
    pub fn issue_cookie(&self) -> String {
        self.cookie(SESSION_VALUE, self.ttl.as_secs())
    }

    /// `Set-Cookie` value ending the session.
    #[must_use]
    pub fn clear_cookie(&self) -> String {
        self.cookie("", 0)
    }

    fn cookie(&self, value: &str, max_age: u64) -> String {
        let mut cookie = format!(
            "{SESSION_COOKIE}={value}; HttpOnly; SameSite=Strict; Path=/; Max-Age={max_age}"
        );
        if self.secure {
            cookie.push_str("; Secure");
        }
        cookie
    }
}

/// Finds a cookie by name in a `Cookie` header value.
#[must_use]
pub fn cookie_value<'a>(header: &'a str, name: &str) -> Option<&'a str> {
    header
        .split(';')
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value.trim())
}

/// Returns `true` when the request carries a valid session cookie.
#[must_use]
pub fn is_authenticated(headers: &HeaderMap) -> bool {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .any(|header| cookie_value(header, SESSION_COOKIE) == Some(SESSION_VALUE))
}
