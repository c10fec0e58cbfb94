//! Whole-document persistence.
//!
//! A [`DocumentStore`] reads and replaces the entire content document. There
//! is no partial update, locking or versioning at this layer; callers that
//! need read-modify-write sequencing get it from
//! [`ContentService`](super::ContentService).

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use async_trait::async_trait;
use tracing::debug;

use super::schema::Document;
use crate::error::StoreError;

/// Durable storage for the content document.
///
/// Constructed once at process start and shared by every handler, so the
/// backing medium (file, key-value store, database) can change without
/// touching the accessors above it.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Loads and parses the whole document.
    ///
    /// # Errors
    ///
    /// [`StoreError::NotFound`] when the backing resource is absent,
    /// [`StoreError::Parse`] when it is malformed, [`StoreError::Read`] on
    /// any other I/O failure.
    async fn load(&self) -> Result<Document, StoreError>;

    /// Serializes and replaces the whole document.
    ///
    /// # Errors
    ///
    /// [`StoreError::Write`] on I/O failure.
    async fn save(&self, document: &Document) -> Result<(), StoreError>;

    /// Human-readable location used in logs.
    fn location(&self) -> String;
}

// ============================================================================
// JSON file store
// ============================================================================

/// Stores the document as pretty-printed JSON in a single file.
///
/// Saves go to a sibling temporary file that is then renamed over the
/// target, so a crash mid-write leaves the previous document intact.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns `true` if the backing file exists.
    pub async fn exists(&self) -> bool {
        tokio::fs::try_exists(&self.path).await.unwrap_or(false)
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(std::ffi::OsStr::to_os_string)
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

#[async_trait]
impl DocumentStore for JsonFileStore {
    async fn load(&self) -> Result<Document, StoreError> {
        let raw = tokio::fs::read(&self.path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                StoreError::NotFound {
                    location: self.location(),
                }
            } else {
                StoreError::Read {
                    location: self.location(),
                    source: e,
                }
            }
        })?;

        // Tolerate a UTF-8 BOM left behind by hand edits.
        let raw = raw.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(&raw);

        serde_json::from_slice(raw).map_err(|source| StoreError::Parse {
            location: self.location(),
            source,
        })
    }

    async fn save(&self, document: &Document) -> Result<(), StoreError> {
        let mut encoded = serde_json::to_vec_pretty(document).map_err(StoreError::Serialize)?;
        encoded.push(b'\n');

        let write_err = |source| StoreError::Write {
            location: self.location(),
            source,
        };

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await.map_err(write_err)?;
        }

        let temp = self.temp_path();
        tokio::fs::write(&temp, &encoded).await.map_err(write_err)?;
        if let Err(e) = tokio::fs::rename(&temp, &self.path).await {
            let _ = tokio::fs::remove_file(&temp).await;
            return Err(write_err(e));
        }

        debug!(path = %self.path.display(), bytes = encoded.len(), "content document saved");
        Ok(())
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}

// ============================================================================
// In-memory store
// ============================================================================

/// Keeps the document in memory. Starts empty (absent) unless seeded.
#[derive(Debug, Default)]
pub struct MemoryStore {
    // std::sync::Mutex: never held across an await point.
    document: Mutex<Option<Document>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_document(document: Document) -> Self {
        Self {
            document: Mutex::new(Some(document)),
        }
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn load(&self) -> Result<Document, StoreError> {
        self.document
            .lock()
            .expect("memory store mutex poisoned")
            .clone()
            .ok_or_else(|| StoreError::NotFound {
                location: self.location(),
            })
    }

    async fn save(&self, document: &Document) -> Result<(), StoreError> {
        *self.document.lock().expect("memory store mutex poisoned") = Some(document.clone());
        Ok(())
    }

    fn location(&self) -> String {
        "memory".to_string()
    }
}

// ============================================================================
// Tests
// ============================================================================
