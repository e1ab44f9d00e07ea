//! Status string formatting for the bar
//!
//! Two formats: a compact one that fits a crowded bar and abbreviates
//! "Good Service" to "OK", and a verbose one spelling out the line name.

use crate::lines::Line;

/// The status string TfL uses when nothing is wrong.
const GOOD_SERVICE: &str = "Good Service";

/// Output format for the printed status line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// Three-letter line code, "OK" for good service
    Small,
    /// Full line name and status description
    Large,
}

/// Formats a line status for display.
pub fn format_status(line: Line, status: &str, format: Format) -> String {
    match format {
        Format::Small if status == GOOD_SERVICE => {
            format!("TFL {} OK", line.short_code())
        }
        Format::Small => format!("TFL {} {}", line.short_code(), status),
        Format::Large => format!("TFL {} line has {}", line.display_name(), status),
    }
}
