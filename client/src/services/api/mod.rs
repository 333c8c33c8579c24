//! # Flight API Client Module
//!
//! HTTP client for the Sky Scrapper flight API.
//!
//! ## Module Structure
//!
//! ```text
//! api/
//! ├── mod.rs            - Module exports and documentation
//! ├── client.rs         - ApiClient, key rotation, envelope and error handling
//! ├── airports.rs       - Nearby airports and airport search
//! ├── flights.rs        - Flight search
//! └── price_calendar.rs - Price calendar
//! ```

pub mod airports;
pub mod client;
pub mod flights;
pub mod price_calendar;

pub use client::ApiClient;
