//! Poll throttling via a persisted timestamp file
//!
//! Decides whether this invocation may hit the network, based on how long
//! ago the last permitted refresh happened. The timestamp lives in a plain
//! file holding decimal epoch seconds; there is no locking, so two
//! invocations racing inside the same window may both be permitted.

use std::fs;
use std::io;
use std::path::Path;
use std::time::Duration;

use chrono::Utc;
use thiserror::Error;

/// Errors that can occur while checking the throttle timestamp
#[derive(Debug, Error)]
pub enum ThrottleError {
    /// Reading, writing or removing the timestamp file failed
    #[error("Timestamp file I/O failed: {0}")]
    Io(#[from] io::Error),

    /// The timestamp file exists but does not hold a decimal integer.
    /// This is a hard error rather than a silent "first run": the file is
    /// ours alone, so corruption means something outside this tool touched it.
    #[error("Timestamp file is corrupt: {0:?}")]
    Corrupt(String),
}

/// A source of the current time, injectable for tests.
pub trait Clock {
    /// Returns the current time as whole seconds since the Unix epoch.
    fn now_epoch(&self) -> i64;
}

/// The production clock, backed by the system time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_epoch(&self) -> i64 {
        Utc::now().timestamp()
    }
}

/// Decides whether a refresh against the remote source is permitted now.
///
/// With throttling disabled the timestamp file is removed (a later re-enable
/// starts from a clean first run) and the answer is always `true`. With
/// throttling enabled, a missing file is the first run: the current time is
/// recorded and the refresh permitted. Otherwise the stored timestamp is
/// compared against `interval`; only when at least that much time has
/// elapsed is the file rewritten and the refresh permitted.
///
/// # Arguments
/// * `interval` - Minimum time between permitted refreshes
/// * `enabled` - Whether throttling applies at all
/// * `timestamp_path` - Where the last-refresh timestamp is persisted
/// * `clock` - Time source (the system clock in production)
///
/// # Returns
/// * `Ok(true)` if the caller should fetch fresh data now
/// * `Ok(false)` if the caller should reuse the cached value
/// * `Err(ThrottleError)` on I/O failure or a corrupt timestamp file
pub fn should_refresh(
    interval: Duration,
    enabled: bool,
    timestamp_path: &Path,
    clock: &dyn Clock,
) -> Result<bool, ThrottleError> {
    if !enabled {
        match fs::remove_file(timestamp_path) {
            Ok(()) => {}
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => return Err(e.into()),
        }
        return Ok(true);
    }

    let now = clock.now_epoch();

    if !timestamp_path.exists() {
        write_timestamp(timestamp_path, now)?;
        return Ok(true);
    }

    let content = fs::read_to_string(timestamp_path)?;
    let stored: i64 = content
        .trim()
        .parse()
        .map_err(|_| ThrottleError::Corrupt(content.clone()))?;

    let elapsed = now - stored;
    if elapsed >= interval.as_secs() as i64 {
        write_timestamp(timestamp_path, now)?;
        Ok(true)
    } else {
        Ok(false)
    }
}

/// Overwrites the timestamp file with the given epoch seconds.
fn write_timestamp(path: &Path, epoch: i64) -> io::Result<()> {
    fs::write(path, epoch.to_string())
}
