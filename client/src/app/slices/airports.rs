//! # Airports Slice
//!
//! Two queries share this slice: airports near the device, and free-text airport/city search.
//! [`AirportsSlice::resolve_location`] bridges the location provider into the nearby query.

use std::sync::Arc;
use std::time::Duration;

use async_channel::Sender;
use async_trait::async_trait;
use shared::{AirportData, NearbyAirports};

use super::query::{Query, QuerySlice};
use crate::app::events::{AppEvent, Resource};
use crate::config::DEFAULT_LOCALE;
use crate::core::error::{AppError, Result};
use crate::core::service::{ApiService, LocationProvider};
use crate::services::location::{Location, PermissionStatus};

/// How long to wait for a position fix.
pub const LOCATION_TIMEOUT: Duration = Duration::from_millis(15_000);

#[derive(Debug, Clone, PartialEq)]
pub struct NearbyParams {
    /// Filled in by [`AirportsSlice::resolve_location`]
    pub location: Option<Location>,
    pub locale: String,
}

impl Default for NearbyParams {
    fn default() -> Self {
        Self {
            location: None,
            locale: DEFAULT_LOCALE.to_string(),
        }
    }
}

/// Airports around the device, flattened as nearby, recent, then current.
pub struct NearbyAirportsQuery;

#[async_trait]
impl Query for NearbyAirportsQuery {
    type Params = NearbyParams;
    type Output = Vec<AirportData>;

    const RESOURCE: Resource = Resource::NearbyAirports;

    fn validate(params: &NearbyParams) -> Result<()> {
        if params.location.is_none() {
            return Err(AppError::Validation(
                "Location is required to find nearby airports.".to_string(),
            ));
        }
        if params.locale.trim().is_empty() {
            return Err(AppError::Validation("Locale is required.".to_string()));
        }
        Ok(())
    }

    async fn fetch(api: &dyn ApiService, params: &NearbyParams) -> Result<Vec<AirportData>> {
        let location = params
            .location
            .ok_or_else(|| AppError::Validation("Location is required to find nearby airports.".to_string()))?;
        api.nearby_airports(location, &params.locale)
            .await
            .map(NearbyAirports::flatten)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AirportSearchParams {
    pub query: String,
    pub locale: String,
}

impl Default for AirportSearchParams {
    fn default() -> Self {
        Self {
            query: String::new(),
            locale: DEFAULT_LOCALE.to_string(),
        }
    }
}

/// Free-text airport and city search.
pub struct AirportSearchQuery;

#[async_trait]
impl Query for AirportSearchQuery {
    type Params = AirportSearchParams;
    type Output = Vec<AirportData>;

    const RESOURCE: Resource = Resource::AirportSearch;

    fn validate(params: &AirportSearchParams) -> Result<()> {
        if params.query.trim().is_empty() {
            return Err(AppError::Validation("Enter an airport or city to search.".to_string()));
        }
        Ok(())
    }

    async fn fetch(api: &dyn ApiService, params: &AirportSearchParams) -> Result<Vec<AirportData>> {
        api.search_airports(params.query.trim(), &params.locale).await
    }
}

/// Nearby airports and airport search.
#[derive(Clone)]
pub struct AirportsSlice {
    pub nearby: QuerySlice<NearbyAirportsQuery>,
    pub search: QuerySlice<AirportSearchQuery>,
    location: Arc<dyn LocationProvider>,
    events: Sender<AppEvent>,
}

impl AirportsSlice {
    pub fn new(
        api: Arc<dyn ApiService>,
        location: Arc<dyn LocationProvider>,
        events: Sender<AppEvent>,
        locale: &str,
    ) -> Self {
        let nearby = QuerySlice::new(
            api.clone(),
            events.clone(),
            NearbyParams {
                location: None,
                locale: locale.to_string(),
            },
        );
        let search = QuerySlice::new(
            api,
            events.clone(),
            AirportSearchParams {
                query: String::new(),
                locale: locale.to_string(),
            },
        );

        Self {
            nearby,
            search,
            location,
            events,
        }
    }

    /// Last resolved device position. Kept for the session only.
    pub fn location(&self) -> Option<Location> {
        self.nearby.params().location
    }

    /// Ask for the device position, then fetch the airports around it.
    ///
    /// The nearby query shows `loading` for the whole flow. A refused permission or a fix that
    /// does not arrive within [`LOCATION_TIMEOUT`] ends up in the nearby query's `error`.
    #[tracing::instrument(skip(self))]
    pub async fn resolve_location(&self) -> Result<()> {
        let request_id = self.nearby.begin();

        match self.locate().await {
            Ok(location) => {
                tracing::info!(location = %location, "Location resolved");
                self.nearby.set_params(|params| params.location = Some(location));
                if self.events.try_send(AppEvent::LocationResolved(location)).is_err() {
                    tracing::trace!("Event channel closed");
                }
                self.nearby.execute().await
            }
            Err(err) => {
                tracing::warn!(error = %err, "Could not resolve location");
                self.nearby.fail(request_id, &err);
                Err(err)
            }
        }
    }

    async fn locate(&self) -> Result<Location> {
        if self.location.request_permission().await? == PermissionStatus::Denied {
            return Err(AppError::Permission("Location permission was denied".to_string()));
        }

        tokio::time::timeout(LOCATION_TIMEOUT, self.location.current_position())
            .await
            .map_err(|_| AppError::Location("timed out".to_string()))?
    }

    /// Set the search text and run the search.
    pub async fn lookup(&self, query: &str) -> Result<()> {
        self.search.set_params(|params| params.query = query.to_string());
        self.search.execute().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::mocks::{airport, MockApi, MockLocation};
    use async_channel::Receiver;

    fn slice(api: Arc<MockApi>, location: Arc<MockLocation>) -> (AirportsSlice, Receiver<AppEvent>) {
        let (tx, rx) = async_channel::unbounded();
        (AirportsSlice::new(api, location, tx, "en-US"), rx)
    }

    #[tokio::test]
    async fn test_nearby_airports_flattened() {
        // Arrange
        let api = MockApi::new();
        *api.nearby.lock() = Ok(NearbyAirports {
            current: Some(airport("JFK", "AIRPORT")),
            nearby: vec![airport("LGA", "AIRPORT"), airport("EWR", "AIRPORT")],
            recent: Vec::new(),
        });
        let (slice, _rx) = slice(api.clone(), MockLocation::denied());

        // Act
        slice.nearby.set_params(|params| params.location = Some(Location::new(40.7, -74.0).unwrap()));
        slice.nearby.execute().await.unwrap();

        // Assert
        let state = slice.nearby.snapshot();
        let ids: Vec<&str> = state.data.as_ref().unwrap().iter().map(|a| a.sky_id()).collect();
        assert_eq!(ids, vec!["LGA", "EWR", "JFK"]);
        assert!(!state.loading);
        assert_eq!(state.error, None);
        assert_eq!(api.calls(), vec!["nearby:40.7000,-74.0000:en-US"]);
    }

    #[tokio::test]
    async fn test_nearby_without_location_never_calls_api() {
        let api = MockApi::new();
        let (slice, _rx) = slice(api.clone(), MockLocation::denied());

        let result = slice.nearby.execute().await;

        assert!(matches!(result, Err(AppError::Validation(_))));
        assert!(slice.nearby.error().is_some());
        assert!(!slice.nearby.is_loading());
        assert!(api.calls().is_empty());
    }

    #[tokio::test]
    async fn test_resolve_location_feeds_nearby_query() {
        let api = MockApi::new();
        *api.nearby.lock() = Ok(NearbyAirports {
            current: Some(airport("BOM", "AIRPORT")),
            nearby: Vec::new(),
            recent: Vec::new(),
        });
        let (slice, rx) = slice(api.clone(), MockLocation::at(19.0896, 72.8656));

        slice.resolve_location().await.unwrap();

        assert_eq!(slice.location(), Some(Location::new(19.0896, 72.8656).unwrap()));
        assert_eq!(slice.nearby.data().unwrap()[0].sky_id(), "BOM");
        let events: Vec<AppEvent> = std::iter::from_fn(|| rx.try_recv().ok()).collect();
        assert!(events.iter().any(|e| matches!(e, AppEvent::LocationResolved(_))));
    }

    #[tokio::test]
    async fn test_resolve_location_permission_denied() {
        let api = MockApi::new();
        let (slice, _rx) = slice(api.clone(), MockLocation::denied());

        let err = slice.resolve_location().await.unwrap_err();

        assert!(matches!(err, AppError::Permission(_)));
        let state = slice.nearby.snapshot();
        assert!(!state.loading);
        assert_eq!(
            state.error.as_deref(),
            Some("Location access is off. Grant location access and try again.")
        );
        assert!(api.calls().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_resolve_location_times_out() {
        let api = MockApi::new();
        let location = Arc::new(MockLocation {
            permission: PermissionStatus::Granted,
            position: Location::new(1.0, 1.0),
            delay: Some(Duration::from_secs(60)),
        });
        let (slice, _rx) = slice(api.clone(), location);

        let err = slice.resolve_location().await.unwrap_err();

        assert_eq!(err, AppError::Location("timed out".to_string()));
        assert!(!slice.nearby.is_loading());
        assert!(api.calls().is_empty());
    }

    #[tokio::test]
    async fn test_search_round_trip() {
        let api = MockApi::new();
        let london = vec![airport("LOND", "CITY"), airport("LHR", "AIRPORT")];
        api.airports.lock().insert("london".to_string(), london.clone());
        let (slice, _rx) = slice(api.clone(), MockLocation::denied());

        slice.lookup("london").await.unwrap();

        let state = slice.search.snapshot();
        assert_eq!(state.data, Some(london));
        assert_eq!(state.data_params.unwrap().query, "london");
    }

    #[tokio::test]
    async fn test_blank_search_is_rejected_locally() {
        let api = MockApi::new();
        let (slice, _rx) = slice(api.clone(), MockLocation::denied());

        let result = slice.lookup("   ").await;

        assert!(matches!(result, Err(AppError::Validation(_))));
        assert_eq!(
            slice.search.error().as_deref(),
            Some("Enter an airport or city to search.")
        );
        assert!(api.calls().is_empty());
    }

    #[tokio::test]
    async fn test_failed_search_keeps_previous_result() {
        let api = MockApi::new();
        api.airports
            .lock()
            .insert("paris".to_string(), vec![airport("PARI", "CITY")]);
        let (slice, _rx) = slice(api.clone(), MockLocation::denied());
        slice.lookup("paris").await.unwrap();

        *api.search_error.lock() = Some(AppError::Network("offline".to_string()));
        let result = slice.lookup("rome").await;

        assert!(matches!(result, Err(AppError::Network(_))));
        let state = slice.search.snapshot();
        assert_eq!(state.data.unwrap()[0].sky_id(), "PARI");
        assert_eq!(state.data_params.unwrap().query, "paris");
        assert_eq!(
            state.error.as_deref(),
            Some("Unable to reach the server. Check your connection and try again.")
        );
        assert!(!state.loading);
    }

    #[tokio::test]
    async fn test_latest_search_wins_when_responses_arrive_out_of_order() {
        // Arrange: "lon" is held back until "london" has completed
        let api = MockApi::new();
        api.airports.lock().insert("lon".to_string(), vec![airport("LON", "CITY")]);
        api.airports
            .lock()
            .insert("london".to_string(), vec![airport("LOND", "CITY")]);
        let release_lon = api.gate("lon");
        let (slice, _rx) = slice(api.clone(), MockLocation::denied());

        // Act
        let (first, second) = tokio::join!(slice.lookup("lon"), async {
            let result = slice.lookup("london").await;
            release_lon.send(()).unwrap();
            result
        });

        // Assert
        assert!(first.is_ok());
        assert!(second.is_ok());
        assert_eq!(api.calls(), vec!["search:lon", "search:london"]);
        let state = slice.search.snapshot();
        assert_eq!(state.data.unwrap()[0].sky_id(), "LOND");
        assert_eq!(state.data_params.unwrap().query, "london");
        assert!(!state.loading);
    }
}
