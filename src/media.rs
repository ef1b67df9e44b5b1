//! Content-addressed storage for MMS media payloads.
//!
//! Each decoded image or video is written to
//! `<data_dir>/<sha256-hex>.<extension>`. Identical payloads map to the same
//! file, so a photo forwarded ten times is stored once.
//!
//! Writes happen eagerly while the archive is read. If a later record fails
//! to parse, files already written for earlier records stay on disk.

use std::fs;
use std::path::{Path, PathBuf};

use sha2::{Digest, Sha256};
use tracing::{debug, trace};

use crate::error::Result;

/// Writes media payloads under content-derived file names.
///
/// The store never creates `data_dir`; the caller prepares it.
///
/// # Example
///
/// ```rust,no_run
/// use smspack::media::MediaStore;
///
/// let store = MediaStore::new("output/data");
/// let path = store.store(b"\x89PNG...", "png")?;
/// assert!(path.starts_with("output/data"));
/// # Ok::<(), smspack::SmspackError>(())
/// ```
#[derive(Debug, Clone)]
pub struct MediaStore {
    data_dir: PathBuf,
}

impl MediaStore {
    /// Creates a store rooted at `data_dir`.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Returns the directory files are written to.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Returns the path `content` would be stored at, without writing it.
    pub fn path_for(&self, content: &[u8], extension: &str) -> PathBuf {
        let digest = hex::encode(Sha256::digest(content));
        self.data_dir
            .join(format!("{digest}.{}", sanitize_extension(extension)))
    }

    /// Writes `content` and returns its path.
    ///
    /// An existing file at the target path is left untouched.
    pub fn store(&self, content: &[u8], extension: &str) -> Result<PathBuf> {
        let path = self.path_for(content, extension);
        if path.exists() {
            trace!(path = %path.display(), "media already stored");
            return Ok(path);
        }
        fs::write(&path, content)?;
        debug!(path = %path.display(), bytes = content.len(), "stored media");
        Ok(path)
    }
}

/// Keeps a MIME subtype usable as a file extension inside `data_dir`.
fn sanitize_extension(extension: &str) -> String {
    extension
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.') {
                c
            } else {
                '_'
            }
        })
        .collect()
}
