//! Error types for `folio`
//!
//! Errors are layered the same way the service is: the document store
//! raises [`StoreError`], the per-section accessors raise [`ContentError`],
//! configuration loading raises [`ConfigError`], and everything surfaces to
//! the CLI as a [`FolioError`] with a matching process exit code. HTTP
//! handlers translate into `ApiError` (see [`crate::http::response`]).

use std::path::PathBuf;
use thiserror::Error;

use crate::content::Section;

// ============================================================================
// Exit Codes
// ============================================================================

/// Exit codes for `folio` CLI operations.
///
/// These codes follow Unix conventions.
pub struct ExitCode;

impl ExitCode {
    /// Successful execution
    pub const SUCCESS: i32 = 0;

    /// General error
    pub const ERROR: i32 = 1;

    /// Configuration error (invalid YAML, validation failure)
    pub const CONFIG_ERROR: i32 = 2;

    /// I/O error (file not found, permission denied)
    pub const IO_ERROR: i32 = 3;

    /// Content document missing, unreadable or malformed
    pub const STORE_ERROR: i32 = 4;

    /// HTTP server failed to bind or crashed
    pub const SERVER_ERROR: i32 = 5;

    /// Usage error (invalid arguments, missing required options)
    pub const USAGE_ERROR: i32 = 64;

    /// Interrupted by SIGINT (Ctrl+C)
    pub const INTERRUPTED: i32 = 130;

    /// Terminated by SIGTERM
    pub const TERMINATED: i32 = 143;
}

// ============================================================================
// Top-Level Error
// ============================================================================

/// Top-level error type for `folio` operations.
///
/// Aggregates all domain-specific errors and maps them onto exit codes.
#[derive(Debug, Error)]
pub enum FolioError {
    /// Configuration loading or validation error
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Document store error
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Content accessor error
    #[error(transparent)]
    Content(#[from] ContentError),

    /// HTTP server error
    #[error(transparent)]
    Server(#[from] ServerError),

    /// Invalid command-line usage
    #[error("usage error: {0}")]
    Usage(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl FolioError {
    /// Returns the appropriate exit code for this error.
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Config(_) => ExitCode::CONFIG_ERROR,
            Self::Store(_) | Self::Content(ContentError::Store(_)) | Self::Json(_) => {
                ExitCode::STORE_ERROR
            }
            Self::Content(_) => ExitCode::ERROR,
            Self::Server(_) => ExitCode::SERVER_ERROR,
            Self::Usage(_) => ExitCode::USAGE_ERROR,
            Self::Io(_) => ExitCode::IO_ERROR,
        }
    }
}

// ============================================================================
// Configuration Errors
// ============================================================================

/// Configuration loading and validation errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// YAML parsing failed
    #[error("parse error in {path}{}: {message}", line.map_or_else(String::new, |l| format!(" (line {l})")))]
    ParseError {
        /// Path to the configuration file
        path: PathBuf,
        /// Line number where the error occurred (if available)
        line: Option<usize>,
        /// Error message from the parser
        message: String,
    },

    /// Configuration validation failed
    #[error("validation failed for {path}: {}", summarize(errors))]
    ValidationError {
        /// Path to the configuration file
        path: String,
        /// List of validation issues found
        errors: Vec<ValidationIssue>,
    },

    /// Referenced configuration file not found
    #[error("file not found: {path}")]
    MissingFile {
        /// Path to the missing file
        path: PathBuf,
    },

    /// Field has an invalid value
    #[error("invalid value for '{field}': got '{value}', expected {expected}")]
    InvalidValue {
        /// Name of the field with invalid value
        field: String,
        /// The actual value provided
        value: String,
        /// Description of what was expected
        expected: String,
    },

    /// Environment variable referenced in configuration is not set
    #[error("environment variable '{var}' not set ({message})")]
    EnvVarNotSet {
        /// Name of the environment variable
        var: String,
        /// Message supplied with the `${VAR:?message}` reference
        message: String,
    },
}

fn summarize(issues: &[ValidationIssue]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

// ============================================================================
// Validation Types
// ============================================================================

/// A single validation issue found during configuration validation.
#[derive(Debug, Clone)]
pub struct ValidationIssue {
    /// Dotted path to the problematic field (e.g., "session.ttl")
    pub path: String,
    /// Description of the validation issue
    pub message: String,
    /// Severity level of the issue
    pub severity: Severity,
}

impl std::fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let prefix = match self.severity {
            Severity::Error => "error",
            Severity::Warning => "warning",
        };
        write!(f, "{}: {} at {}", prefix, self.message, self.path)
    }
}

/// Severity level for validation issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Prevents the configuration from being used
    Error,
    /// Reported but does not prevent loading
    Warning,
}

// ============================================================================
// Document Store Errors
// ============================================================================

/// Failures of the whole-document store.
///
/// Transient and permanent failures are not distinguished; all of them
/// surface as HTTP 500.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backing resource does not exist
    #[error("content document not found: {location}")]
    NotFound {
        /// Path (or other locator) of the missing document
        location: String,
    },

    /// The document exists but could not be read
    #[error("failed to read content document {location}: {source}")]
    Read {
        /// Path of the document
        location: String,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// The document is not valid JSON or does not match the schema
    #[error("malformed content document {location}: {source}")]
    Parse {
        /// Path of the document
        location: String,
        /// Underlying parse error
        source: serde_json::Error,
    },

    /// The document could not be serialized
    #[error("failed to serialize content document: {0}")]
    Serialize(#[source] serde_json::Error),

    /// The document could not be written (disk full, permissions, ...)
    #[error("failed to write content document {location}: {source}")]
    Write {
        /// Path of the document
        location: String,
        /// Underlying I/O error
        source: std::io::Error,
    },
}

// ============================================================================
// Content Accessor Errors
// ============================================================================

/// Errors raised by the per-section accessors.
#[derive(Debug, Error)]
pub enum ContentError {
    /// The document store failed
    #[error(transparent)]
    Store(#[from] StoreError),

    /// No item in an id-addressed section has the given id
    #[error("{section} item with id {id} not found")]
    ItemNotFound {
        /// Section that was searched
        section: Section,
        /// Requested id
        id: u32,
    },

    /// Index is outside a position-addressed section
    #[error("{section} index {index} out of range (len {len})")]
    IndexOutOfRange {
        /// Section that was addressed
        section: Section,
        /// Requested index
        index: usize,
        /// Current section length
        len: usize,
    },

    /// An explicit id collides with an existing item
    #[error("{section} already contains an item with id {id}")]
    DuplicateId {
        /// Section that was written
        section: Section,
        /// Colliding id
        id: u32,
    },
}

impl ContentError {
    /// Returns `true` when the error addresses a missing item rather than a
    /// store failure.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::ItemNotFound { .. } | Self::IndexOutOfRange { .. })
    }
}

// ============================================================================
// Upload Errors
// ============================================================================

/// Errors raised while accepting an uploaded image.
#[derive(Debug, Error)]
pub enum UploadError {
    /// The multipart body had no `file` part
    #[error("no file provided")]
    MissingFile,

    /// The uploaded part is not an image
    #[error("unsupported content type '{0}'")]
    NotAnImage(String),

    /// The body went over the configured size limit
    #[error("upload exceeds the request size limit")]
    TooLarge,

    /// The multipart body could not be decoded
    #[error("malformed multipart body: {0}")]
    Multipart(String),

    /// Writing the file to disk failed
    #[error("failed to store upload: {0}")]
    Io(#[from] std::io::Error),
}

// ============================================================================
// Server Errors
// ============================================================================

/// HTTP server lifecycle errors.
#[derive(Debug, Error)]
pub enum ServerError {
    /// Bind address could not be parsed or bound
    #[error("bind failed: {0}")]
    Bind(String),

    /// The server loop exited with an I/O error
    #[error("server error: {0}")]
    Serve(#[from] std::io::Error),

    /// The metrics recorder could not be installed
    #[error("metrics exporter failed: {0}")]
    Metrics(String),
}

// ============================================================================
// Result Type Alias
// ============================================================================

/// Result type alias for `folio` operations.
pub type Result<T> = std::result::Result<T, FolioError>;

// ============================================================================
// Tests
// ============================================================================
