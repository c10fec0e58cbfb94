//! Configuration validation
//!
//! Runs on the deserialized [`SiteConfig`] and collects every issue rather
//! than stopping at the first one.

use std::path::Path;

use crate::config::schema::{DEFAULT_ADMIN_PASSWORD, SiteConfig};
use crate::error::{Severity, ValidationIssue};
use crate::http::parse_bind_addr;

// ============================================================================
// Public API
// ============================================================================

/// Result of configuration validation.
#[derive(Debug, Default)]
pub struct ValidationResult {
    /// Validation errors (prevent loading).
    pub errors: Vec<ValidationIssue>,

    /// Validation warnings (informational).
    pub warnings: Vec<ValidationIssue>,
}

impl ValidationResult {
    /// Returns `true` if there are any errors.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

/// Configuration validator.
#[derive(Debug, Default)]
pub struct Validator {
    errors: Vec<ValidationIssue>,
    warnings: Vec<ValidationIssue>,
}

impl Validator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Validates a configuration and returns every issue found.
    pub fn validate(&mut self, config: &SiteConfig) -> ValidationResult {
        self.errors.clear();
        self.warnings.clear();

        self.validate_server(config);
        self.validate_storage(config);
        self.validate_session(config);
        self.validate_admin(config);

        ValidationResult {
            errors: std::mem::take(&mut self.errors),
            warnings: std::mem::take(&mut self.warnings),
        }
    }

    // ========================================================================
    // Sections
    // ========================================================================

    fn validate_server(&mut self, config: &SiteConfig) {
        if let Err(e) = parse_bind_addr(&config.server.bind) {
            self.add_error("server.bind", &e.to_string());
        }
        if config.server.max_upload_bytes == 0 {
            self.add_error("server.max_upload_bytes", "must be greater than zero");
        }
    }

    fn validate_storage(&mut self, config: &SiteConfig) {
        self.require_path("storage.content_path", &config.storage.content_path);
        self.require_path("storage.uploads_dir", &config.storage.uploads_dir);

        let url = &config.storage.uploads_url;
        if !url.starts_with('/') {
            self.add_error(
                "storage.uploads_url",
                &format!("'{url}' must start with '/'"),
            );
        } else if url.len() > 1 && url.ends_with('/') {
            self.add_error(
                "storage.uploads_url",
                &format!("'{url}' must not end with '/'"),
            );
        }
        if url.split('/').any(|segment| segment == "..") {
            self.add_error("storage.uploads_url", "must not contain '..' segments");
        }
    }

    fn validate_session(&mut self, config: &SiteConfig) {
        match humantime::parse_duration(&config.session.ttl) {
            Ok(ttl) if ttl.is_zero() => {
                self.add_error("session.ttl", "must be greater than zero");
            }
            Ok(_) => {}
            Err(e) => self.add_error(
                "session.ttl",
                &format!(
                    "invalid duration '{}': {e} (expected e.g. 24h, 30m)",
                    config.session.ttl
                ),
            ),
        }
    }

    fn validate_admin(&mut self, config: &SiteConfig) {
        if config.admin.username.trim().is_empty() {
            self.add_error("admin.username", "must not be empty");
        }
        if config.admin.password.is_empty() {
            self.add_error("admin.password", "must not be empty");
        } else if config.admin.password == DEFAULT_ADMIN_PASSWORD {
            self.add_warning(
                "admin.password",
                "the default admin password is in use; set admin.password or FOLIO_ADMIN_PASSWORD",
            );
        }
    }

    // ========================================================================
    // Helpers
    // ========================================================================

    fn require_path(&mut self, field: &str, path: &Path) {
        if path.as_os_str().is_empty() {
            self.add_error(field, "must not be empty");
        }
    }

    /// Adds an error to the collection.
    fn add_error(&mut self, path: &str, message: &str) {
        self.errors.push(ValidationIssue {
            path: path.to_string(),
            message: message.to_string(),
            severity: Severity::Error,
        });
    }

    /// Adds a warning to the collection.
    fn add_warning(&mut self, path: &str, message: &str) {
        self.warnings.push(ValidationIssue {
            path: path.to_string(),
            message: message.to_string(),
            severity: Severity::Warning,
        });
    }
}
