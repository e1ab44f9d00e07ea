//! i3bar protocol wrapping
//!
//! Rewrites an i3bar JSON stream in flight: the version header and the
//! array-start line pass through untouched, and every status line after
//! that is a JSON array into which extra entries are inserted at a fixed
//! index. Continuation lines arrive comma-prefixed and must leave the same
//! way, or the downstream bar stops parsing.

use std::io::{self, BufRead, Write};

use serde_json::Value;
use thiserror::Error;

/// Errors that can occur while rewriting the status stream
#[derive(Debug, Error)]
pub enum BarError {
    /// Reading from or writing to the stream failed
    #[error("Status stream I/O failed: {0}")]
    Io(#[from] io::Error),

    /// A status line was not valid JSON
    #[error("Status line is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// A status line parsed but was not a JSON array
    #[error("Status line is not a JSON array: {0}")]
    NotAnArray(String),

    /// The host closed the stream before sending both protocol header lines
    #[error("Status stream ended before the protocol header")]
    MissingHeader,
}

/// Builds one bar entry for a mailbox report.
pub fn mail_entry(instance: &str, full_text: &str, color: &str) -> Value {
    serde_json::json!({
        "name": "mail",
        "instance": instance,
        "full_text": full_text,
        "color": color,
    })
}

/// Inserts `entries` into one status line at `position`.
///
/// A leading comma (streaming continuation) is preserved. The rest of the
/// line must parse as a JSON array; `position` is clamped to the array
/// length so out-of-range configuration appends rather than panics.
pub fn inject(line: &str, entries: &[Value], position: usize) -> Result<String, BarError> {
    let (prefix, body) = match line.strip_prefix(',') {
        Some(rest) => (",", rest),
        None => ("", line),
    };

    let parsed: Value = serde_json::from_str(body)?;
    let mut array = match parsed {
        Value::Array(items) => items,
        _ => return Err(BarError::NotAnArray(body.to_string())),
    };

    let mut index = position.min(array.len());
    for entry in entries {
        array.insert(index, entry.clone());
        index += 1;
    }

    Ok(format!("{}{}", prefix, serde_json::to_string(&array)?))
}

/// Runs the wrapper loop over a status stream.
///
/// `make_entries` is invoked once per status line so the injected values
/// track the current mailbox state. The loop ends when the host sends EOF
/// or an empty line.
pub fn run_wrapper<R, W, F>(
    input: R,
    mut output: W,
    position: usize,
    mut make_entries: F,
) -> Result<(), BarError>
where
    R: BufRead,
    W: Write,
    F: FnMut() -> Vec<Value>,
{
    let mut lines = input.lines();

    // Version header, then the opening "[" of the infinite array.
    for _ in 0..2 {
        let header = lines.next().ok_or(BarError::MissingHeader)??;
        writeln!(output, "{}", header)?;
        output.flush()?;
    }

    for line in lines {
        let line = line?;
        if line.trim().is_empty() {
            break;
        }
        let rewritten = inject(&line, &make_entries(), position)?;
        writeln!(output, "{}", rewritten)?;
        output.flush()?;
    }

    Ok(())
}
