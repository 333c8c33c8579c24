//! # Common Error Types
//!
//! Consolidated error handling for the SkyScout client.
//!
//! This module provides a centralized error type [`AppError`] that covers every failure a
//! slice operation can run into.
//!
//! ## Error Categories
//!
//! - **Network**: the request never got a response (no connectivity, DNS, TLS)
//! - **Api**: the flight API answered with a non-success status or an unusable body
//! - **Auth**: the identity provider refused credentials or a stored session
//! - **Validation**: input was missing or malformed; never reaches the network
//! - **Permission** / **Location**: the device location could not be obtained
//! - **Storage**: the local session store could not be read or written
//! - **Config**: startup configuration is missing or invalid
//!
//! ## Usage Pattern
//!
//! ```rust
//! use skyscout::core::error::AppError;
//!
//! fn require_query(query: &str) -> Result<&str, AppError> {
//!     if query.trim().is_empty() {
//!         return Err(AppError::Validation("Enter an airport or city".to_string()));
//!     }
//!     Ok(query)
//! }
//! ```
//!
//! ## Surfacing Errors
//!
//! Slices never hand an `AppError` to the presentation layer; they store
//! [`AppError::user_message`] in their `error` field instead.

use thiserror::Error;

/// Application-wide error type covering all error scenarios in the client.
///
/// # Example
///
/// ```rust
/// use skyscout::core::error::AppError;
///
/// let api_err = AppError::Api { status: 429, message: "Too many requests".to_string() };
/// let validation_err = AppError::Validation("All fields are required.".to_string());
///
/// assert_eq!(api_err.to_string(), "API error (429): Too many requests");
/// assert_eq!(validation_err.to_string(), "Validation error: All fields are required.");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AppError {
    /// Transport failure: connection refused, DNS, TLS, timeout.
    #[error("Network error: {0}")]
    Network(String),

    /// Non-2xx response, malformed body or a `status: false` envelope.
    ///
    /// `status` is the HTTP status; a `status: false` envelope on a 200 keeps 200.
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Invalid credentials, duplicate account, rejected or expired session.
    #[error("Authentication error: {0}")]
    Auth(String),

    /// Missing or malformed input, caught before any request is made.
    #[error("Validation error: {0}")]
    Validation(String),

    /// The user has not granted access to their location.
    #[error("Permission error: {0}")]
    Permission(String),

    /// Location access was granted but no fix could be obtained.
    #[error("Location error: {0}")]
    Location(String),

    /// Local session store failure.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Missing or invalid configuration.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl AppError {
    /// Text a slice stores in its `error` field.
    pub fn user_message(&self) -> String {
        match self {
            AppError::Network(_) => {
                "Unable to reach the server. Check your connection and try again.".to_string()
            }
            AppError::Api { message, .. } if !message.trim().is_empty() => message.clone(),
            AppError::Api { .. } => "Something went wrong. Please try again.".to_string(),
            AppError::Auth(message) | AppError::Validation(message) => message.clone(),
            AppError::Permission(_) => {
                "Location access is off. Grant location access and try again.".to_string()
            }
            AppError::Location(message) => {
                format!("Couldn't get your location ({}). Please try again.", message)
            }
            AppError::Storage(message) | AppError::Config(message) => message.clone(),
        }
    }

    /// True for failures a user can fix by simply retrying.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            AppError::Network(_) | AppError::Api { .. } | AppError::Location(_)
        )
    }
}

/// Convenience type alias for `Result<T, AppError>`.
pub type Result<T> = std::result::Result<T, AppError>;

impl From<lib_auth::Error> for AppError {
    fn from(err: lib_auth::Error) -> Self {
        match err {
            lib_auth::Error::Network(message) => AppError::Network(message),
            lib_auth::Error::Provider { status, message } => AppError::Api { status, message },
            rejected @ (lib_auth::Error::Rejected(_) | lib_auth::Error::MalformedToken(_)) => {
                AppError::Auth(rejected.to_string())
            }
        }
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        match err.status() {
            Some(status) => AppError::Api {
                status: status.as_u16(),
                message: err.to_string(),
            },
            None => AppError::Network(err.to_string()),
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Storage(format!("Failed to read stored data: {}", err))
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Storage(err.to_string())
    }
}
