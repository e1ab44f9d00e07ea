//! Fetch-or-cache composition for line status
//!
//! Combines the remote fetch with the status cache. The throttle decision
//! is made by the caller and passed in as `refresh`; this module never
//! consults the throttle itself.

use std::future::Future;

use thiserror::Error;

use crate::cache::{CacheError, StatusCache};
use crate::lines::Line;
use crate::tfl::TflError;

/// Errors that can occur resolving a line status
#[derive(Debug, Error)]
pub enum StatusError {
    /// The remote fetch failed. There is no fallback to the stale cache.
    #[error("Fetching line status failed: {0}")]
    Fetch(#[from] TflError),

    /// Reading or writing the status cache failed
    #[error(transparent)]
    Cache(#[from] CacheError),

    /// The remote source returned an empty status string
    #[error("The remote source returned an empty status")]
    EmptyStatus,
}

/// Resolves the status string for a line, either freshly or from cache.
///
/// When `refresh` is true the fetch collaborator is invoked, its result is
/// written through to the cache and returned. An empty fetched string is
/// rejected as [`StatusError::EmptyStatus`]. When `refresh` is false the
/// cached value is returned as-is; a missing cache is a hard error.
///
/// # Arguments
/// * `line` - The line to report on
/// * `refresh` - Whether a fresh fetch is permitted (from the throttle gate)
/// * `fetch` - The remote fetch collaborator
/// * `cache` - The persisted status cache
pub async fn line_status<F, Fut>(
    line: Line,
    refresh: bool,
    fetch: F,
    cache: &StatusCache,
) -> Result<String, StatusError>
where
    F: FnOnce(Line) -> Fut,
    Fut: Future<Output = Result<String, TflError>>,
{
    if refresh {
        let status = fetch(line).await?;
        if status.is_empty() {
            return Err(StatusError::EmptyStatus);
        }
        cache.store(&status)?;
        Ok(status)
    } else {
        Ok(cache.load()?)
    }
}
