//! Disk-backed key-value store: one JSON file per content type mapping cache key
//! to `{cached_at, data}`.
//!
//! The whole file is read on every load and rewritten on every save. Saves go
//! through a temp file in the same directory followed by a rename, so a crash
//! mid-write leaves the previous file intact.

use std::collections::BTreeMap;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::warn;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize cache: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Failed to replace {path}: {source}")]
    Persist {
        path: PathBuf,
        #[source]
        source: tempfile::PersistError,
    },
}

/// One cached artifact. `cached_at` is wall-clock seconds (fractional) at write time;
/// an entry without it reads as written at the epoch and is therefore stale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheEntry {
    #[serde(default)]
    pub cached_at: f64,
    #[serde(default)]
    pub data: Value,
}

impl CacheEntry {
    pub fn new(cached_at: f64, data: Value) -> Self {
        Self { cached_at, data }
    }

    /// Age in seconds relative to `now`.
    pub fn age_secs(&self, now: f64) -> f64 {
        now - self.cached_at
    }
}

pub type CacheMap = BTreeMap<String, CacheEntry>;

/// A generic persistent dictionary of cache entries backed by a single file.
/// No schema validation happens at this layer.
#[derive(Debug, Clone)]
pub struct DiskStore {
    path: PathBuf,
}

impl DiskStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[cfg(test)]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the full mapping. A missing file is an empty mapping; so is an
    /// unreadable file or one that is not a JSON object, with a warning.
    /// Entries are decoded one by one and an undecodable entry is dropped
    /// without affecting its siblings.
    pub fn load(&self) -> CacheMap {
        let text = match std::fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return CacheMap::new(),
            Err(e) => {
                warn!(
                    "Could not read cache file {}, starting fresh: {e}",
                    self.path.display()
                );
                return CacheMap::new();
            }
        };

        let raw: Map<String, Value> = match serde_json::from_str(&text) {
            Ok(raw) => raw,
            Err(e) => {
                warn!(
                    "Could not parse cache file {}, starting fresh: {e}",
                    self.path.display()
                );
                return CacheMap::new();
            }
        };

        raw.into_iter()
            .filter_map(|(key, value)| match serde_json::from_value::<CacheEntry>(value) {
                Ok(entry) => Some((key, entry)),
                Err(e) => {
                    warn!(
                        "Dropping undecodable entry '{key}' from {}: {e}",
                        self.path.display()
                    );
                    None
                }
            })
            .collect()
    }

    /// Replaces the file with the pretty-printed mapping, creating the parent
    /// directory when needed.
    pub fn save(&self, map: &CacheMap) -> Result<(), StoreError> {
        let json = serde_json::to_vec_pretty(map)?;
        write_atomic(&self.path, &json)
    }
}

/// Writes `bytes` to a temp file next to `path`, syncs it, then renames it
/// over `path`. Creates the parent directory when needed.
pub fn write_atomic(path: &Path, bytes: &[u8]) -> Result<(), StoreError> {
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));

    std::fs::create_dir_all(dir).map_err(|source| StoreError::Io {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut temp = tempfile::Builder::new()
        .prefix(".cache-")
        .suffix(".tmp")
        .tempfile_in(dir)
        .map_err(|source| StoreError::Io {
            path: dir.to_path_buf(),
            source,
        })?;

    temp.write_all(bytes)
        .and_then(|_| temp.as_file().sync_all())
        .map_err(|source| StoreError::Io {
            path: temp.path().to_path_buf(),
            source,
        })?;

    temp.persist(path).map_err(|source| StoreError::Persist {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(())
}
