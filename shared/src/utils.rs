//! # Shared Utility Functions
//!
//! Display helpers for itinerary data.
//!
//! ## Itinerary Formatting
//!
//! - [`format_duration`] - Minutes to `"Xh Ym"`
//! - [`format_leg_time`] - API timestamps to `"date  time"`
//!
//! ## Usage
//!
//! ```rust
//! use shared::utils::{format_duration, format_leg_time};
//!
//! assert_eq!(format_duration(135), "2h 15m");
//! assert_eq!(format_leg_time("2024-01-01T10:55:00"), "2024-01-01  10:55");
//! ```

use chrono::NaiveDateTime;

/// Format a flight duration in minutes as hours and minutes.
///
/// # Examples
///
/// ```rust
/// use shared::utils::format_duration;
///
/// assert_eq!(format_duration(0), "0h 0m");
/// assert_eq!(format_duration(1290), "21h 30m");
/// ```
pub fn format_duration(minutes: u32) -> String {
    format!("{}h {}m", minutes / 60, minutes % 60)
}

/// Format a departure/arrival timestamp for display.
///
/// The API sends local times without an offset (`2024-01-01T10:55:00`). Anything that
/// does not parse is shown with the `T` separator widened, which is how the raw value
/// reads best.
pub fn format_leg_time(timestamp: &str) -> String {
    match NaiveDateTime::parse_from_str(timestamp, "%Y-%m-%dT%H:%M:%S") {
        Ok(parsed) => parsed.format("%Y-%m-%d  %H:%M").to_string(),
        Err(_) => timestamp.replace('T', "  "),
    }
}
