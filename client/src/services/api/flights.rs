//! # Flight Search Endpoint

use shared::{FlightSearchData, FlightSearchParams};

use super::client::ApiClient;
use crate::core::error::Result;

pub const SEARCH_FLIGHTS_PATH: &str = "/api/v2/flights/searchFlights";

/// Itineraries for `params`. Optional parameters that are unset are left out of the query.
#[tracing::instrument(
    skip(client, params),
    fields(origin = %params.origin_sky_id, destination = %params.destination_sky_id, date = %params.date)
)]
pub async fn search_flights(client: &ApiClient, params: &FlightSearchParams) -> Result<FlightSearchData> {
    let data: FlightSearchData = client.get(SEARCH_FLIGHTS_PATH, params).await?;

    tracing::debug!(itineraries = data.itineraries.len(), "Flight search completed");
    Ok(data)
}
