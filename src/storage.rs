// Flat-file JSON storage for the EcoRetail API
// The deal catalog is persisted as a single JSON document; the whole file
// is the unit of write.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors raised by the flat-file store
///
/// Storage faults are surfaced to callers as-is; the handler layer maps
/// them to HTTP 500 without leaking filesystem details to clients.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Filesystem read/write failure
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The file exists but does not contain valid JSON for the expected shape
    #[error("storage serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// A single JSON document on disk, read and written whole.
///
/// Reads parse the entire file; a missing file reads as the document's
/// `Default` value, matching the behavior of the store this replaces.
/// Writes serialize the entire document to a sibling temp file and rename
/// it into place, so a crash mid-write can never leave a truncated store.
///
/// The store itself does not lock: callers that perform read-modify-write
/// cycles (see `DealRepository::upsert`) must hold their own mutex across
/// the whole cycle, otherwise two concurrent merges can race on stale reads
/// and one update is lost.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Create a store backed by the given file path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read and parse the whole document
    ///
    /// A missing file is not an error: it reads as `T::default()`, so a
    /// fresh deployment starts from an empty catalog.
    pub async fn load<T>(&self) -> Result<T, StorageError>
    where
        T: DeserializeOwned + Default,
    {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!("store file {} missing, using empty document", self.path.display());
                Ok(T::default())
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Serialize and write the whole document atomically
    ///
    /// The document is written to `<path>.tmp` and renamed over the target,
    /// so readers observe either the old or the new document, never a
    /// partial one. Parent directories are created on first write.
    pub async fn save<T>(&self, document: &T) -> Result<(), StorageError>
    where
        T: Serialize,
    {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        let bytes = serde_json::to_vec_pretty(document)?;

        let mut tmp = self.path.as_os_str().to_owned();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);

        tokio::fs::write(&tmp, &bytes).await?;
        tokio::fs::rename(&tmp, &self.path).await?;

        tracing::debug!("wrote {} bytes to {}", bytes.len(), self.path.display());
        Ok(())
    }
}
