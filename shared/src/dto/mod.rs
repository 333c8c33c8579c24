//! # Data Transfer Objects (DTOs)
//!
//! Data structures exchanged with the Sky Scrapper flight API and persisted for sessions.
//!
//! ## Module Organization
//!
//! - [`envelope`] - Response wrapper shared by every flight endpoint
//! - [`airports`] - Airport presentation/navigation records
//! - [`flights`] - Flight search parameters, itineraries, legs and segments
//! - [`price_calendar`] - Price calendar parameters and daily prices
//! - [`auth`] - Session user record
//!
//! ## Example JSON Communication
//!
//! ```text
//! GET /api/v1/flights/searchAirport?query=london&locale=en-US
//! x-rapidapi-host: sky-scrapper.p.rapidapi.com
//! x-rapidapi-key: <one key of the pool>
//! ```
//!
//! ```text
//! HTTP/1.1 200 OK
//!
//! {
//!   "status": true,
//!   "timestamp": 1704067200000,
//!   "data": [
//!     {
//!       "presentation": { "title": "London", "suggestionTitle": "London (Any)", "subtitle": "United Kingdom" },
//!       "navigation": { "entityId": "27544008", "entityType": "CITY", "localizedName": "London", ... }
//!     }
//!   ]
//! }
//! ```

pub mod airports;
pub mod auth;
pub mod envelope;
pub mod flights;
pub mod price_calendar;

pub use airports::*;
pub use auth::*;
pub use envelope::*;
pub use flights::*;
pub use price_calendar::*;
