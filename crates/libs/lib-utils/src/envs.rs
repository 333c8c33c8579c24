//! # Environment Variables
//!
//! Utilities for reading and parsing environment variables.

use std::env;
use std::str::FromStr;

/// Get a required environment variable. Blank values count as missing.
pub fn get_env(name: &'static str) -> Result<String, Error> {
    match env::var(name) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(Error::MissingEnv(name)),
    }
}

/// Get an environment variable, falling back to `default` when unset or blank.
pub fn get_env_or(name: &'static str, default: &str) -> String {
    get_env(name).unwrap_or_else(|_| default.to_string())
}

/// Get and parse an optional environment variable.
///
/// `Ok(None)` when unset, `Err` when set but unparsable.
pub fn get_env_parse<T: FromStr>(name: &'static str) -> Result<Option<T>, Error> {
    match get_env(name) {
        Ok(val) => val
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|_| Error::WrongFormat(name)),
        Err(_) => Ok(None),
    }
}

/// `1`/`true`/`yes` (any case) switch a flag on, anything else leaves it off.
pub fn get_env_flag(name: &'static str) -> bool {
    get_env(name)
        .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
        .unwrap_or(false)
}

// region:    --- Error
#[derive(Debug, PartialEq, Eq)]
pub enum Error {
    MissingEnv(&'static str),
    WrongFormat(&'static str),
}

impl std::fmt::Display for Error {
    fn fmt(&self, fmt: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Error::MissingEnv(name) => write!(fmt, "{name} must be set"),
            Error::WrongFormat(name) => write!(fmt, "{name} has an invalid value"),
        }
    }
}

impl std::error::Error for Error {}
// endregion: --- Error

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_and_blank_values() {
        env::remove_var("LIB_UTILS_TEST_MISSING");
        env::set_var("LIB_UTILS_TEST_BLANK", "  ");

        assert_eq!(get_env("LIB_UTILS_TEST_MISSING"), Err(Error::MissingEnv("LIB_UTILS_TEST_MISSING")));
        assert_eq!(get_env_or("LIB_UTILS_TEST_BLANK", "fallback"), "fallback");
    }

    #[test]
    fn test_parse_and_flag() {
        env::set_var("LIB_UTILS_TEST_NUM", "15");
        env::set_var("LIB_UTILS_TEST_BAD", "fifteen");
        env::set_var("LIB_UTILS_TEST_FLAG", "TRUE");

        assert_eq!(get_env_parse::<u64>("LIB_UTILS_TEST_NUM"), Ok(Some(15)));
        assert_eq!(get_env_parse::<u64>("LIB_UTILS_TEST_BAD"), Err(Error::WrongFormat("LIB_UTILS_TEST_BAD")));
        assert_eq!(get_env_parse::<u64>("LIB_UTILS_TEST_UNSET_NUM"), Ok(None));
        assert!(get_env_flag("LIB_UTILS_TEST_FLAG"));
        assert!(!get_env_flag("LIB_UTILS_TEST_UNSET_FLAG"));
    }
}
