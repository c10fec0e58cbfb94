//! Configuration schema types.
//!
//! Every section and field is optional in the YAML file; missing values take
//! the defaults below. Unknown keys are rejected so typos surface at load
//! time instead of being silently ignored.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Default bind address.
pub const DEFAULT_BIND: &str = "127.0.0.1:3000";

/// Default maximum request body (and therefore upload) size.
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Default session lifetime as a humantime string.
pub const DEFAULT_SESSION_TTL: &str = "24h";

/// Username shipped as the default credential.
pub const DEFAULT_ADMIN_USERNAME: &str = "admin";

/// Password shipped as the default credential.
pub const DEFAULT_ADMIN_PASSWORD: &str = "password123";

// ============================================================================
// Root
// ============================================================================

/// Root configuration for a `folio` server.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    pub server: ServerSection,
    pub storage: StorageSection,
    pub session: SessionSection,
    pub admin: AdminSection,
}

impl SiteConfig {
    /// Session lifetime. Falls back to 24 hours when the configured value
    /// does not parse; the validator reports that case as an error first.
    #[must_use]
    pub fn session_ttl(&self) -> Duration {
        humantime::parse_duration(&self.session.ttl)
            .unwrap_or_else(|_| Duration::from_secs(24 * 60 * 60))
    }
}

// ============================================================================
// Sections
// ============================================================================

/// Listener settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerSection {
    /// `host:port`, `:port` or bare `port`.
    pub bind: String,
    /// Body size limit in bytes, applied to every route.
    pub max_upload_bytes: usize,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            bind: DEFAULT_BIND.to_string(),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }
}

/// Where content and uploaded images live.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StorageSection {
    /// Path of the JSON content document.
    pub content_path: PathBuf,
    /// Directory receiving uploaded images.
    pub uploads_dir: PathBuf,
    /// Public URL prefix under which uploads are served.
    pub uploads_url: String,
}

impl Default for StorageSection {
    fn default() -> Self {
        Self {
            content_path: PathBuf::from("data/content.json"),
            uploads_dir: PathBuf::from("public/uploads"),
            uploads_url: "/uploads".to_string(),
        }
    }
}

/// Session cookie settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SessionSection {
    /// Cookie lifetime, e.g. `24h` or `30m`.
    pub ttl: String,
    /// Adds the `Secure` attribute to the session cookie.
    pub secure_cookie: bool,
}

impl Default for SessionSection {
    fn default() -> Self {
        Self {
            ttl: DEFAULT_SESSION_TTL.to_string(),
            secure_cookie: false,
        }
    }
}

/// The single admin account.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AdminSection {
    pub username: String,
    pub password: String,
}

impl Default for AdminSection {
    fn default() -> Self {
        Self {
            username: DEFAULT_ADMIN_USERNAME.to_string(),
            password: DEFAULT_ADMIN_PASSWORD.to_string(),
        }
    }
}

// Keeps the password out of debug logs.
impl std::fmt::Debug for AdminSection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminSection")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}
