//! Disk store for the raw model catalog JSON
//!
//! Provides a `CacheStore` that persists the provider's catalog response to a
//! single JSON file and reports freshness from the file's modification time,
//! supporting graceful degradation when the API is unavailable.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

use directories::ProjectDirs;
use serde_json::Value;
use thiserror::Error;

/// File name of the cached model catalog inside the data directory
pub const CATALOG_FILE_NAME: &str = "digitalocean_models.json";

/// Errors that can occur when reading or writing the cache file
#[derive(Debug, Error)]
pub enum CacheError {
    /// Filesystem operation failed
    #[error("cache I/O failed at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Cache file exists but does not contain valid JSON
    #[error("cache file at {path} is corrupted: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Metadata about the cache file, derived from the filesystem on demand
///
/// Nothing here is stored inside the file itself; age is always computed
/// from the modification time so the persisted content stays exactly what
/// the network returned.
#[derive(Debug, Clone, Copy)]
pub struct CacheMetadata {
    /// Time elapsed since the file was last written
    pub age: Duration,
    /// Size of the cache file in bytes
    pub size: u64,
}

/// Stores the raw catalog document at a fixed path
///
/// The store holds one JSON file per resource. The file is overwritten
/// wholesale on each successful fetch and never deleted by this subsystem,
/// so a stale copy always remains available as a fallback.
#[derive(Debug, Clone)]
pub struct CacheStore {
    /// Path of the cache file
    path: PathBuf,
}

impl CacheStore {
    /// Creates a store at the default user-scoped data directory
    ///
    /// Uses `~/.local/share/dollm/digitalocean_models.json` on Linux, or the
    /// equivalent platform path. Returns `None` if the data directory cannot
    /// be determined (e.g., no home directory).
    pub fn default_location() -> Option<Self> {
        let project_dirs = ProjectDirs::from("", "", "dollm")?;
        let path = project_dirs.data_dir().join(CATALOG_FILE_NAME);
        Some(Self { path })
    }

    /// Creates a store at an explicit file path
    ///
    /// Useful for testing or when a specific cache location is needed.
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the path of the cache file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns true if the cache file exists
    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    /// Ensures the cache file's parent directory exists
    pub fn ensure_parent(&self) -> Result<(), CacheError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|source| CacheError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        Ok(())
    }

    /// Reports whether the cache file exists and is younger than `timeout`
    ///
    /// The boundary is strict: a file whose age equals the timeout exactly is
    /// already stale. A file whose modification time cannot be read (or lies
    /// in the future due to clock skew) is treated as stale rather than
    /// failing the freshness check.
    pub fn is_fresh(&self, timeout: Duration) -> bool {
        match self.metadata() {
            Some(meta) => meta.age < timeout,
            None => false,
        }
    }

    /// Returns modification-time-derived metadata, or `None` if the file is
    /// missing or unreadable
    pub fn metadata(&self) -> Option<CacheMetadata> {
        let meta = fs::metadata(&self.path).ok()?;
        if !meta.is_file() {
            return None;
        }
        let modified = meta.modified().ok()?;
        let age = SystemTime::now()
            .duration_since(modified)
            .unwrap_or(Duration::MAX);
        Some(CacheMetadata {
            age,
            size: meta.len(),
        })
    }

    /// Reads and decodes the cached document
    ///
    /// A missing file is an I/O error; invalid JSON is a `Parse` error so
    /// callers can tell "no data" apart from "corrupt data".
    pub fn read(&self) -> Result<Value, CacheError> {
        let content = fs::read_to_string(&self.path).map_err(|source| CacheError::Io {
            path: self.path.clone(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| CacheError::Parse {
            path: self.path.clone(),
            source,
        })
    }

    /// Writes the document to the cache file, pretty-printed
    ///
    /// Parent directories are created if absent. The write goes through a
    /// temporary file in the same directory followed by a rename, so a
    /// concurrent reader never observes a half-written file.
    pub fn write(&self, document: &Value) -> Result<(), CacheError> {
        self.ensure_parent()?;

        let json = serde_json::to_string_pretty(document).map_err(|source| CacheError::Parse {
            path: self.path.clone(),
            source,
        })?;

        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json).map_err(|source| CacheError::Io {
            path: tmp.clone(),
            source,
        })?;
        fs::rename(&tmp, &self.path).map_err(|source| CacheError::Io {
            path: self.path.clone(),
            source,
        })
    }
}
