//! # Utility Functions
//!
//! Shared utility functions used across the client.
//!
//! ## Modules
//!
//! - **[`validation`]**: Form input checks (email, name, password, required fields)
//!
//! ## Related Modules
//!
//! - [`shared::utils`]: Itinerary display helpers
//! - [`crate::core`]: Core abstractions and error types

pub mod validation;
