//! # Identity Provider Errors
//!
//! The provider reports failures as `{"error": {"code": 400, "message": "EMAIL_EXISTS"}}`.
//! The message is a machine code, sometimes followed by ` : <explanation>`; it is parsed
//! into [`ProviderCode`] so callers can react to it and show something readable.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// The request never got a response (DNS, refused connection, TLS, timeout).
    #[error("Network error: {0}")]
    Network(String),

    /// The provider understood the request and refused it.
    #[error("{}", .0.message())]
    Rejected(ProviderCode),

    /// Server-side failure or a response that could not be understood.
    #[error("Identity provider error ({status}): {message}")]
    Provider { status: u16, message: String },

    /// A stored token is not a well-formed JWT.
    #[error("Malformed token: {0}")]
    MalformedToken(String),
}

impl Error {
    /// True when the provider refused a stored credential, meaning the session is over.
    pub fn is_session_rejection(&self) -> bool {
        match self {
            Error::Rejected(code) => code.ends_session(),
            Error::MalformedToken(_) => true,
            _ => false,
        }
    }
}

/// Error codes the client cares about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderCode {
    EmailExists,
    /// `INVALID_LOGIN_CREDENTIALS`, `EMAIL_NOT_FOUND` or `INVALID_PASSWORD`
    InvalidCredentials,
    InvalidEmail,
    WeakPassword(Option<String>),
    TokenExpired,
    InvalidIdToken,
    InvalidRefreshToken,
    UserNotFound,
    UserDisabled,
    CredentialTooOld,
    TooManyAttempts,
    Other(String),
}

impl ProviderCode {
    /// Parse the provider's `error.message` field.
    pub fn parse(raw: &str) -> Self {
        let (code, detail) = match raw.split_once(" : ") {
            Some((code, detail)) => (code.trim(), Some(detail.trim().to_string())),
            None => (raw.trim(), None),
        };

        match code {
            "EMAIL_EXISTS" => ProviderCode::EmailExists,
            "INVALID_LOGIN_CREDENTIALS" | "EMAIL_NOT_FOUND" | "INVALID_PASSWORD" => {
                ProviderCode::InvalidCredentials
            }
            "INVALID_EMAIL" => ProviderCode::InvalidEmail,
            "WEAK_PASSWORD" => ProviderCode::WeakPassword(detail),
            "TOKEN_EXPIRED" => ProviderCode::TokenExpired,
            "INVALID_ID_TOKEN" => ProviderCode::InvalidIdToken,
            "INVALID_REFRESH_TOKEN" | "MISSING_REFRESH_TOKEN" | "INVALID_GRANT_TYPE" => {
                ProviderCode::InvalidRefreshToken
            }
            "USER_NOT_FOUND" => ProviderCode::UserNotFound,
            "USER_DISABLED" => ProviderCode::UserDisabled,
            "CREDENTIAL_TOO_OLD_LOGIN_AGAIN" => ProviderCode::CredentialTooOld,
            "TOO_MANY_ATTEMPTS_TRY_LATER" => ProviderCode::TooManyAttempts,
            _ => ProviderCode::Other(raw.trim().to_string()),
        }
    }

    /// Text shown next to the form that triggered the request.
    pub fn message(&self) -> String {
        match self {
            ProviderCode::EmailExists => "An account with this email already exists".to_string(),
            ProviderCode::InvalidCredentials => "Invalid email or password".to_string(),
            ProviderCode::InvalidEmail => "The email address is badly formatted".to_string(),
            ProviderCode::WeakPassword(Some(detail)) => detail.clone(),
            ProviderCode::WeakPassword(None) => "Password is too weak".to_string(),
            ProviderCode::TokenExpired
            | ProviderCode::InvalidIdToken
            | ProviderCode::InvalidRefreshToken => {
                "Session expired. Please log in again.".to_string()
            }
            ProviderCode::UserNotFound => "This account no longer exists".to_string(),
            ProviderCode::UserDisabled => "This account has been disabled".to_string(),
            ProviderCode::CredentialTooOld => {
                "Please log in again before changing your password".to_string()
            }
            ProviderCode::TooManyAttempts => {
                "Too many attempts. Please try again later".to_string()
            }
            ProviderCode::Other(raw) => raw.clone(),
        }
    }

    fn ends_session(&self) -> bool {
        matches!(
            self,
            ProviderCode::TokenExpired
                | ProviderCode::InvalidIdToken
                | ProviderCode::InvalidRefreshToken
                | ProviderCode::UserNotFound
                | ProviderCode::UserDisabled
                | ProviderCode::CredentialTooOld
        )
    }
}
