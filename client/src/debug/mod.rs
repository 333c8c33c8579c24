//! # Logging
//!
//! File-based structured logging for the client.
//!
//! ## Features
//!
//! - **File-based logging**: `logs/skyscout.log`, rotated daily
//! - **Optional console output**: mirror events to stderr while debugging
//! - **JSON output**: one object per line for log shippers
//! - **Panic hook**: panics are logged with location and backtrace before unwinding
//!
//! ## Usage
//!
//! ```rust,ignore
//! // Keep the guard alive until exit or buffered lines are lost
//! let _guard = skyscout::debug::init();
//!
//! tracing::info!(endpoint = "/api/v1/flights/searchAirport", "API call completed");
//! ```
//!
//! ## Configuration
//!
//! Environment variables:
//! - `RUST_LOG`: Log level filter (default `skyscout=info,warn`)
//! - `SKYSCOUT_LOG_DIR`: Log directory (default `logs`)
//! - `SKYSCOUT_LOG_STDERR`: Also log to stderr (`1` = on)
//! - `SKYSCOUT_LOG_JSON`: JSON lines instead of text (`1` = on)

pub mod config;
pub mod logger;

pub use config::LogConfig;
pub use logger::init as init_logger;

/// Initialize logging from the environment. See [`logger::init`].
pub fn init() -> Option<tracing_appender::non_blocking::WorkerGuard> {
    init_logger(&LogConfig::from_env())
}
