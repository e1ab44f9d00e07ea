//! Status cache persisted to a single flat file
//!
//! Stores the last successfully fetched line status so throttled invocations
//! can reprint it without touching the network. The file holds the status
//! string verbatim, nothing else: staleness is tracked entirely by the
//! throttle timestamp, never by the cache itself.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Errors that can occur reading or writing the status cache
#[derive(Debug, Error)]
pub enum CacheError {
    /// No cached status exists yet. This only happens when a throttled
    /// invocation runs before any refresh has ever succeeded.
    #[error("No cached status at {0:?} (has a refresh ever completed?)")]
    Missing(PathBuf),

    /// Reading or writing the cache file failed
    #[error("Status cache I/O failed: {0}")]
    Io(#[from] io::Error),
}

/// A single cached status string at a fixed path.
///
/// The path is injected rather than hardcoded so tests can point the cache
/// at a temporary directory.
#[derive(Debug, Clone)]
pub struct StatusCache {
    path: PathBuf,
}

impl StatusCache {
    /// Creates a cache backed by the given file path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the path this cache reads and writes.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Overwrites the cache with the given status string, exact bytes.
    pub fn store(&self, status: &str) -> Result<(), CacheError> {
        fs::write(&self.path, status)?;
        Ok(())
    }

    /// Reads back the full cached status.
    ///
    /// A missing file is a hard error: there is no default status to fall
    /// back on, the caller simply has nothing to print.
    pub fn load(&self) -> Result<String, CacheError> {
        match fs::read_to_string(&self.path) {
            Ok(content) => Ok(content),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                Err(CacheError::Missing(self.path.clone()))
            }
            Err(e) => Err(e.into()),
        }
    }
}
