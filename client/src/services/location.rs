//! # Device Location
//!
//! Coordinates plus the provider the airports slice asks for them.
//!
//! A command line host has no GPS, so the production provider reads a fixed position from
//! configuration. Without one configured it behaves like a device where the user refused
//! location access.

use std::fmt;
use std::str::FromStr;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::core::error::{AppError, Result};
use crate::core::service::LocationProvider;

/// A WGS84 position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub lat: f64,
    pub lng: f64,
}

impl Location {
    /// Build a location, rejecting coordinates outside the valid ranges.
    pub fn new(lat: f64, lng: f64) -> Result<Self> {
        if !(-90.0..=90.0).contains(&lat) {
            return Err(AppError::Validation(format!("Latitude {} is out of range", lat)));
        }
        if !(-180.0..=180.0).contains(&lng) {
            return Err(AppError::Validation(format!("Longitude {} is out of range", lng)));
        }
        Ok(Self { lat, lng })
    }
}

impl FromStr for Location {
    type Err = AppError;

    /// Parses `"lat,lng"`, e.g. `"19.0896,72.8656"`.
    fn from_str(s: &str) -> Result<Self> {
        let (lat, lng) = s
            .split_once(',')
            .ok_or_else(|| AppError::Validation(format!("Expected \"lat,lng\", got \"{}\"", s)))?;
        let parse = |part: &str| {
            part.trim()
                .parse::<f64>()
                .map_err(|_| AppError::Validation(format!("\"{}\" is not a coordinate", part.trim())))
        };
        Location::new(parse(lat)?, parse(lng)?)
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.4},{:.4}", self.lat, self.lng)
    }
}

/// Answer to a location permission request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionStatus {
    Granted,
    Denied,
}

/// Location provider backed by a configured position.
#[derive(Debug, Clone, Default)]
pub struct ConfiguredLocation {
    location: Option<Location>,
}

impl ConfiguredLocation {
    pub fn new(location: Option<Location>) -> Self {
        Self { location }
    }
}

#[async_trait]
impl LocationProvider for ConfiguredLocation {
    async fn request_permission(&self) -> Result<PermissionStatus> {
        Ok(match self.location {
            Some(_) => PermissionStatus::Granted,
            None => PermissionStatus::Denied,
        })
    }

    async fn current_position(&self) -> Result<Location> {
        self.location
            .ok_or_else(|| AppError::Location("no position configured (set SKYSCOUT_LOCATION)".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_location() {
        let location: Location = " 51.47 , -0.4543 ".parse().unwrap();
        assert_eq!(location, Location { lat: 51.47, lng: -0.4543 });
    }

    #[test]
    fn test_parse_rejects_out_of_range_and_garbage() {
        assert!("91,0".parse::<Location>().is_err());
        assert!("0,181".parse::<Location>().is_err());
        assert!("north,east".parse::<Location>().is_err());
        assert!("51.47".parse::<Location>().is_err());
    }

    #[tokio::test]
    async fn test_unconfigured_provider_denies_permission() {
        let provider = ConfiguredLocation::default();

        assert_eq!(provider.request_permission().await.unwrap(), PermissionStatus::Denied);
        assert!(matches!(provider.current_position().await, Err(AppError::Location(_))));
    }

    #[tokio::test]
    async fn test_configured_provider_returns_position() {
        let here = Location::new(19.0896, 72.8656).unwrap();
        let provider = ConfiguredLocation::new(Some(here));

        assert_eq!(provider.request_permission().await.unwrap(), PermissionStatus::Granted);
        assert_eq!(provider.current_position().await.unwrap(), here);
    }
}
