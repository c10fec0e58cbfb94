//! Image upload storage.
//!
//! Uploaded images are written under one directory with a random name and
//! served back from a public URL prefix. Nothing checks that stored images
//! are still referenced by the content document.

use std::path::{Path, PathBuf};

use tracing::debug;
use uuid::Uuid;

use crate::error::UploadError;

/// Longest extension kept from an uploaded filename.
const MAX_EXTENSION_LEN: usize = 10;

/// A stored upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredUpload {
    /// Name of the file inside the upload directory.
    pub filename: String,
    /// Public path returned to the client, e.g. `/uploads/<uuid>.png`.
    pub filepath: String,
    /// Number of bytes written.
    pub bytes: u64,
}

/// Directory-backed image store.
#[derive(Debug, Clone)]
pub struct UploadStore {
    dir: PathBuf,
    url_prefix: String,
}

impl UploadStore {
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>, url_prefix: impl Into<String>) -> Self {
        let url_prefix = url_prefix.into().trim_end_matches('/').to_string();
        Self {
            dir: dir.into(),
            url_prefix,
        }
    }

    /// Route prefix, without a trailing slash (empty for `/`).
    #[must_use]
    pub fn url_prefix(&self) -> &str {
        &self.url_prefix
    }

    #[must_use]
    pub fn public_path(&self, filename: &str) -> String {
        format!("{}/{filename}", self.url_prefix)
    }

    /// Stores an image under a fresh random name.
    ///
    /// # Errors
    ///
    /// [`UploadError::NotAnImage`] unless `content_type` starts with
    /// `image/`; [`UploadError::Io`] if the directory or file cannot be
    /// written.
    pub async fn store(
        &self,
        original_name: Option<&str>,
        content_type: &str,
        data: &[u8],
    ) -> Result<StoredUpload, UploadError> {
        if !content_type.starts_with("image/") {
            return Err(UploadError::NotAnImage(content_type.to_string()));
        }

        let id = Uuid::new_v4();
        let filename = match extension_for(original_name, content_type) {
            Some(ext) => format!("{id}.{ext}"),
            None => id.to_string(),
        };

        tokio::fs::create_dir_all(&self.dir).await?;
        tokio::fs::write(self.dir.join(&filename), data).await?;
        debug!(%filename, bytes = data.len(), "upload stored");

        Ok(StoredUpload {
            filepath: self.public_path(&filename),
            filename,
            bytes: data.len() as u64,
        })
    }

    /// Reads a stored file by name. Unsafe names and missing files both
    /// come back as `None`.
    ///
    /// # Errors
    ///
    /// Any I/O error other than "not found".
    pub async fn read(&self, name: &str) -> std::io::Result<Option<Vec<u8>>> {
        if !is_safe_name(name) {
            return Ok(None);
        }
        match tokio::fs::read(self.dir.join(name)).await {
            Ok(data) => Ok(Some(data)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }
}

/// Extension for a stored file: the original one when it is short and
/// alphanumeric, otherwise the MIME subtype up to any `+` suffix
/// (`image/svg+xml` gives `svg`). Always lower-case.
#[must_use]
pub fn extension_for(original_name: Option<&str>, content_type: &str) -> Option<String> {
    let valid = |ext: &str| {
        !ext.is_empty()
            && ext.len() <= MAX_EXTENSION_LEN
            && ext.chars().all(|c| c.is_ascii_alphanumeric())
    };

    original_name
        .and_then(|name| Path::new(name).extension())
        .and_then(|ext| ext.to_str())
        .filter(|ext| valid(ext))
        .or_else(|| {
            content_type
                .split_once('/')
                .map(|(_, subtype)| subtype.split(['+', ';']).next().unwrap_or(subtype).trim())
                .filter(|ext| valid(ext))
        })
        .map(str::to_ascii_lowercase)
}

/// A name is servable when it is a single plain path component.
#[must_use]
pub fn is_safe_name(name: &str) -> bool {
    !name.is_empty()
        && !name.starts_with('.')
        && !name.contains(['/', '\\', '\0'])
        && !name.contains("..")
}

/// Content type for a stored file, from its extension.
#[must_use]
pub fn content_type_for(name: &str) -> &'static str {
    let ext = Path::new(name)
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    match ext.as_deref() {
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("svg") => "image/svg+xml",
        Some("avif") => "image/avif",
        Some("ico") => "image/x-icon",
        Some("bmp") => "image/bmp",
        _ => "application/octet-stream",
    }
}
