//! # Shared Data Transfer Objects Library
//!
//! This library defines the contract between SkyScout and the remote services it consumes.
//! All DTOs use JSON serialization via `serde`.
//!
//! ## Structure
//!
//! - **[`dto`]**: Data Transfer Objects for API communication
//!   - **[`dto::envelope`]**: The `{status, timestamp, data}` wrapper every flight endpoint returns
//!   - **[`dto::airports`]**: Nearby-airport and airport-search payloads
//!   - **[`dto::flights`]**: Flight search parameters and itineraries
//!   - **[`dto::price_calendar`]**: Price calendar parameters and day prices
//!   - **[`dto::auth`]**: The user record kept for an authenticated session
//! - **[`utils`]**: Display helpers for itineraries
//!
//! ## Wire Format
//!
//! The flight API speaks camelCase JSON, so every DTO carries
//! `#[serde(rename_all = "camelCase")]`. Fields the API may omit are `Option` or
//! `#[serde(default)]`; nothing is kept as an untyped map except free-form server messages.
//!
//! ## Usage
//!
//! ```rust
//! use shared::dto::flights::FlightSearchParams;
//!
//! let params = FlightSearchParams {
//!     date: "2024-01-01".to_string(),
//!     ..FlightSearchParams::default()
//! };
//! assert_eq!(params.origin_sky_id, "BOM");
//! ```

pub mod dto;
pub mod utils;

// Re-export commonly used types for convenience
pub use dto::*;
pub use utils::*;
