//! # Time Utilities
//!
//! Calendar-date helpers. The flight API takes dates as `YYYY-MM-DD`.

use chrono::{Local, NaiveDate, Utc};

const YMD: &str = "%Y-%m-%d";

/// Today's local date as `YYYY-MM-DD`.
pub fn today_ymd() -> String {
    format_ymd(Local::now().date_naive())
}

/// Format a date as `YYYY-MM-DD`.
pub fn format_ymd(date: NaiveDate) -> String {
    date.format(YMD).to_string()
}

/// Parse a strict `YYYY-MM-DD` date.
pub fn parse_ymd(value: &str) -> Result<NaiveDate, Error> {
    NaiveDate::parse_from_str(value.trim(), YMD)
        .map_err(|_| Error::FailToDateParse(value.to_string()))
}

/// Current time in whole seconds since the Unix epoch.
pub fn now_unix() -> i64 {
    Utc::now().timestamp()
}

// region:    --- Error
#[derive(Debug, PartialEq, Eq)]
pub enum Error {
    FailToDateParse(String),
}

impl std::fmt::Display for Error {
    fn fmt(&self, fmt: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Error::FailToDateParse(value) => write!(fmt, "'{value}' is not a YYYY-MM-DD date"),
        }
    }
}

impl std::error::Error for Error {}
// endregion: --- Error
