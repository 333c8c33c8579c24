use serde::{Deserialize, Serialize};

use super::envelope::null_default;

/// Display strings for an airport or city suggestion.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AirportPresentation {
    pub title: String,
    #[serde(default)]
    pub suggestion_title: String,
    #[serde(default)]
    pub subtitle: String,
}

/// Identifiers to plug into a flight search for this place.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct FlightPlaceParams {
    pub sky_id: String,
    pub entity_id: String,
    #[serde(default)]
    pub flight_place_type: String,
    #[serde(default)]
    pub localized_name: String,
}

/// Identifiers for the hotel side of the API. Carried through, never used for search.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct HotelPlaceParams {
    pub entity_id: String,
    #[serde(default)]
    pub entity_type: String,
    #[serde(default)]
    pub localized_name: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AirportNavigation {
    pub entity_id: String,
    /// `AIRPORT`, `CITY` or `COUNTRY` as sent by the API.
    pub entity_type: String,
    #[serde(default)]
    pub localized_name: String,
    pub relevant_flight_params: FlightPlaceParams,
    pub relevant_hotel_params: Option<HotelPlaceParams>,
}

/// One airport/city suggestion.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct AirportData {
    pub presentation: AirportPresentation,
    pub navigation: AirportNavigation,
}

impl AirportData {
    /// Sky id used by the flight endpoints (e.g. `LHR`, `LOND`).
    pub fn sky_id(&self) -> &str {
        &self.navigation.relevant_flight_params.sky_id
    }

    /// Entity id used by the flight endpoints.
    pub fn flight_entity_id(&self) -> &str {
        &self.navigation.relevant_flight_params.entity_id
    }
}

/// Payload of `getNearByAirports`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct NearbyAirports {
    pub current: Option<AirportData>,
    #[serde(default, deserialize_with = "null_default")]
    pub nearby: Vec<AirportData>,
    #[serde(default, deserialize_with = "null_default")]
    pub recent: Vec<AirportData>,
}

impl NearbyAirports {
    /// Flatten into a single list: nearby, then recent, then the current airport.
    pub fn flatten(self) -> Vec<AirportData> {
        let mut airports = self.nearby;
        airports.extend(self.recent);
        airports.extend(self.current);
        airports
    }
}

/// Query string of `getNearByAirports`.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct NearbyAirportsRequest<'a> {
    pub lat: f64,
    pub lng: f64,
    pub locale: &'a str,
}

/// Query string of `searchAirport`.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct AirportSearchRequest<'a> {
    pub query: &'a str,
    pub locale: &'a str,
}
