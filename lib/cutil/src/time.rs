//! Time formatting utilities.

use chrono::Local;

/// Formats the current local time according to the specified format string.
///
/// The format string follows the same syntax as `chrono::format::strftime`.
///
/// # Examples
///
/// ```
/// use cutil::time::local_now;
///
/// let formatted = local_now("%H:%M:%S");
/// assert_eq!(formatted.len(), 8);
/// ```
pub fn local_now(format: &str) -> String {
    Local::now().format(format).to_string()
}

/// Milliseconds elapsed since `start`, for request timing in log lines.
pub fn elapsed_ms(start: std::time::Instant) -> u128 {
    start.elapsed().as_millis()
}
