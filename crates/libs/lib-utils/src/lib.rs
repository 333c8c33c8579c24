//! # Utilities Library
//!
//! Small helpers shared by the SkyScout crates: environment variables, calendar dates
//! and base64url decoding of token segments.

pub mod b64;
pub mod envs;
pub mod time;

// Re-export commonly used functions
pub use b64::{b64u_decode, b64u_decode_to_string, b64u_encode};
pub use envs::{get_env, get_env_flag, get_env_or, get_env_parse};
pub use time::{format_ymd, now_unix, parse_ymd, today_ymd};
