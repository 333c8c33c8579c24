//! # Configuration
//!
//! Startup configuration read from the environment (and a `.env` file, if present).
//!
//! | Variable | Default | |
//! |---|---|---|
//! | `SKY_API_BASE_URL` | `https://sky-scrapper.p.rapidapi.com` | flight API root |
//! | `RAPIDAPI_HOST` | `sky-scrapper.p.rapidapi.com` | sent as `x-rapidapi-host` |
//! | `API_KEYS` | required | key pool, separated by `&&` |
//! | `SKY_API_TIMEOUT_SECS` | unset | per-request timeout; unset keeps the transport default |
//! | `FIREBASE_API_KEY` | required | identity provider web key |
//! | `FIREBASE_AUTH_URL` | identitytoolkit v1 | |
//! | `FIREBASE_TOKEN_URL` | securetoken v1 | |
//! | `SKYSCOUT_DATA_DIR` | `data` | where the session file lives |
//! | `SKYSCOUT_LOCALE` | `en-US` | locale sent to airport endpoints |
//! | `SKYSCOUT_LOCATION` | unset | `"lat,lng"`; unset means location access is off |
//!
//! Logging has its own variables, see [`crate::debug::config`].

use std::path::PathBuf;
use std::time::Duration;

use lib_auth::{IdentityConfig, DEFAULT_AUTH_BASE_URL, DEFAULT_TOKEN_BASE_URL};
use lib_utils::{get_env, get_env_or, get_env_parse};

use crate::core::error::{AppError, Result};
use crate::services::location::Location;

pub const DEFAULT_API_BASE_URL: &str = "https://sky-scrapper.p.rapidapi.com";
pub const DEFAULT_RAPIDAPI_HOST: &str = "sky-scrapper.p.rapidapi.com";
pub const DEFAULT_LOCALE: &str = "en-US";

/// Separator between keys in `API_KEYS`.
const KEY_SEPARATOR: &str = "&&";

/// Flight API connection settings.
#[derive(Clone)]
pub struct ApiConfig {
    pub base_url: String,
    pub host: String,
    pub keys: Vec<String>,
    pub timeout: Option<Duration>,
}

impl ApiConfig {
    /// Settings for `base_url` with the default host and no explicit timeout.
    pub fn new(base_url: impl Into<String>, keys: Vec<String>) -> Self {
        Self {
            base_url: base_url.into(),
            host: DEFAULT_RAPIDAPI_HOST.to_string(),
            keys,
            timeout: None,
        }
    }

    /// Split a raw `API_KEYS` value into the key pool, dropping blanks.
    pub fn parse_keys(raw: &str) -> Vec<String> {
        raw.split(KEY_SEPARATOR)
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .map(str::to_string)
            .collect()
    }
}

// Keys stay out of logs and panic messages.
impl std::fmt::Debug for ApiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiConfig")
            .field("base_url", &self.base_url)
            .field("host", &self.host)
            .field("keys", &format_args!("[{} redacted]", self.keys.len()))
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Everything the client needs to start.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub api: ApiConfig,
    pub identity: IdentityConfig,
    pub data_dir: PathBuf,
    pub locale: String,
    pub location: Option<Location>,
}

impl AppConfig {
    /// Load from the process environment. A `.env` file in the working directory is read first.
    pub fn from_env() -> Result<Self> {
        // Missing .env is fine; real environment variables win either way.
        let _ = dotenvy::dotenv();

        let keys = get_env("API_KEYS")
            .map(|raw| ApiConfig::parse_keys(&raw))
            .map_err(config_error)?;
        let timeout = get_env_parse::<u64>("SKY_API_TIMEOUT_SECS")
            .map_err(config_error)?
            .map(Duration::from_secs);

        let api = ApiConfig {
            base_url: get_env_or("SKY_API_BASE_URL", DEFAULT_API_BASE_URL),
            host: get_env_or("RAPIDAPI_HOST", DEFAULT_RAPIDAPI_HOST),
            keys,
            timeout,
        };

        let identity = IdentityConfig {
            api_key: get_env("FIREBASE_API_KEY").map_err(config_error)?,
            auth_base_url: get_env_or("FIREBASE_AUTH_URL", DEFAULT_AUTH_BASE_URL),
            token_base_url: get_env_or("FIREBASE_TOKEN_URL", DEFAULT_TOKEN_BASE_URL),
        };

        let location = match get_env("SKYSCOUT_LOCATION") {
            Ok(raw) => Some(
                raw.parse::<Location>()
                    .map_err(|e| AppError::Config(format!("SKYSCOUT_LOCATION: {}", e.user_message())))?,
            ),
            Err(_) => None,
        };

        let config = Self {
            api,
            identity,
            data_dir: PathBuf::from(get_env_or("SKYSCOUT_DATA_DIR", "data")),
            locale: get_env_or("SKYSCOUT_LOCALE", DEFAULT_LOCALE),
            location,
        };
        config.validate()?;
        Ok(config)
    }

    /// Reject configurations the client cannot work with.
    pub fn validate(&self) -> Result<()> {
        if self.api.keys.is_empty() {
            return Err(AppError::Config("API_KEYS does not contain any key".to_string()));
        }
        for (name, url) in [
            ("SKY_API_BASE_URL", &self.api.base_url),
            ("FIREBASE_AUTH_URL", &self.identity.auth_base_url),
            ("FIREBASE_TOKEN_URL", &self.identity.token_base_url),
        ] {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(AppError::Config(format!("{} must be an http(s) URL", name)));
            }
        }
        if self.api.timeout.is_some_and(|timeout| timeout.is_zero()) {
            return Err(AppError::Config("SKY_API_TIMEOUT_SECS must be greater than zero".to_string()));
        }
        if self.locale.trim().is_empty() {
            return Err(AppError::Config("SKYSCOUT_LOCALE must not be blank".to_string()));
        }
        Ok(())
    }
}

fn config_error(err: lib_utils::envs::Error) -> AppError {
    AppError::Config(err.to_string())
}
