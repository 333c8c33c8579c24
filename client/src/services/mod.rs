//! # Services Module
//!
//! Production implementations of the [`crate::core::service`] traits.
//!
//! ```text
//! services/
//! ├── api/        - Flight API client over RapidAPI (airports, flights, price calendar)
//! ├── auth.rs     - Firebase identity provider (sign-in, sign-up, token refresh)
//! └── location.rs - Coordinates and the configured location provider
//! ```
//!
//! Clients wrap `reqwest::Client`, which is internally reference counted; share them
//! behind an `Arc` rather than building one per request.

pub mod api;
pub mod auth;
pub mod location;

pub use api::ApiClient;
pub use auth::FirebaseAuthService;
pub use location::{ConfiguredLocation, Location, PermissionStatus};
