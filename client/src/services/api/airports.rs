//! # Airport Endpoints
//!
//! Nearby-airport lookup by coordinate and free-text airport/city search.

use shared::{AirportData, AirportSearchRequest, NearbyAirports, NearbyAirportsRequest};

use super::client::ApiClient;
use crate::core::error::Result;
use crate::services::location::Location;

pub const NEARBY_AIRPORTS_PATH: &str = "/api/v1/flights/getNearByAirports";
pub const SEARCH_AIRPORT_PATH: &str = "/api/v1/flights/searchAirport";

/// Airports around `location`.
#[tracing::instrument(skip(client), fields(lat = location.lat, lng = location.lng))]
pub async fn get_nearby_airports(
    client: &ApiClient,
    location: Location,
    locale: &str,
) -> Result<NearbyAirports> {
    let request = NearbyAirportsRequest {
        lat: location.lat,
        lng: location.lng,
        locale,
    };

    let airports: NearbyAirports = client.get(NEARBY_AIRPORTS_PATH, &request).await?;

    tracing::debug!(
        nearby = airports.nearby.len(),
        recent = airports.recent.len(),
        has_current = airports.current.is_some(),
        "Nearby airports fetched"
    );
    Ok(airports)
}

/// Airports and cities matching `query`.
#[tracing::instrument(skip(client))]
pub async fn search_airports(client: &ApiClient, query: &str, locale: &str) -> Result<Vec<AirportData>> {
    let request = AirportSearchRequest { query, locale };

    let airports: Vec<AirportData> = client.get(SEARCH_AIRPORT_PATH, &request).await?;

    tracing::debug!(count = airports.len(), "Airport search completed");
    Ok(airports)
}
