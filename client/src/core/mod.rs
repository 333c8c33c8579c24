//! # Core Abstractions
//!
//! Core traits and error types for dependency injection and better testability.
//!
//! - **Error Types**: Centralized error handling (see [`error`] module)
//! - **Service Traits**: Seams between the slices and the outside world (see [`service`] module)
//!
//! ## Error Handling
//!
//! All fallible operations return the centralized [`AppError`] type:
//!
//! ```rust
//! use skyscout::core::error::{AppError, Result};
//!
//! fn require_query(input: &str) -> Result<String> {
//!     if input.trim().is_empty() {
//!         return Err(AppError::Validation("Enter an airport or city".to_string()));
//!     }
//!     Ok(input.trim().to_string())
//! }
//! ```
//!
//! ## Dependency Injection
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use skyscout::core::service::ApiService;
//!
//! // In production: the Sky Scrapper client
//! let api: Arc<dyn ApiService> = Arc::new(ApiClient::new(&config.api)?);
//!
//! // In tests: an in-memory mock
//! let api: Arc<dyn ApiService> = Arc::new(MockApi::default());
//! ```

pub mod error;
pub mod service;

pub use error::{AppError, Result};
pub use service::{ApiService, AuthService, LocationProvider, SessionStore};
