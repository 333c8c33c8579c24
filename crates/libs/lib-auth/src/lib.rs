//! # Authentication Library
//!
//! Client side of the identity provider: email/password accounts over the Firebase
//! Identity Toolkit REST API, and inspection of the ID tokens it issues.
//!
//! - [`provider`]: sign-in, sign-up, profile and password updates, account lookup, token refresh
//! - [`token`]: unverified ID-token claims, used to tell whether a stored token is still fresh

pub mod error;
pub mod provider;
pub mod token;

// Re-export commonly used types
pub use error::{Error, ProviderCode, Result};
pub use provider::{
    AccountInfo, FirebaseAuth, IdentityConfig, SignedIn, TokenPair, DEFAULT_AUTH_BASE_URL,
    DEFAULT_TOKEN_BASE_URL,
};
pub use token::{decode_claims, is_expired, IdTokenClaims};
