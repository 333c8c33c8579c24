//! # Flights Slice
//!
//! Flight search over [`FlightSearchParams`], plus the picker shortcuts of the search form.

use async_trait::async_trait;
use shared::{FlightSearchData, FlightSearchParams};

use super::query::{Query, QuerySlice};
use crate::app::events::Resource;
use crate::app::view::{find_place, PlaceSide};
use crate::core::error::{AppError, Result};
use crate::core::service::ApiService;

const REQUIRED_FIELDS: &str = "All fields are required.";

pub struct FlightSearchQuery;

#[async_trait]
impl Query for FlightSearchQuery {
    type Params = FlightSearchParams;
    type Output = FlightSearchData;

    const RESOURCE: Resource = Resource::Flights;

    /// Origin, destination (sky and entity ids) and departure date are required, and at
    /// least one adult must travel.
    fn validate(params: &FlightSearchParams) -> Result<()> {
        let required = [
            &params.origin_sky_id,
            &params.destination_sky_id,
            &params.origin_entity_id,
            &params.destination_entity_id,
            &params.date,
        ];
        if required.iter().any(|value| value.trim().is_empty()) {
            return Err(AppError::Validation(REQUIRED_FIELDS.to_string()));
        }

        lib_utils::parse_ymd(&params.date)
            .map_err(|_| AppError::Validation("Departure date must be YYYY-MM-DD.".to_string()))?;
        if let Some(return_date) = params.return_date.as_deref() {
            lib_utils::parse_ymd(return_date)
                .map_err(|_| AppError::Validation("Return date must be YYYY-MM-DD.".to_string()))?;
        }
        if params.adults == 0 {
            return Err(AppError::Validation("At least one adult passenger is required.".to_string()));
        }
        Ok(())
    }

    async fn fetch(api: &dyn ApiService, params: &FlightSearchParams) -> Result<FlightSearchData> {
        api.search_flights(params).await
    }
}

pub type FlightsSlice = QuerySlice<FlightSearchQuery>;

impl QuerySlice<FlightSearchQuery> {
    /// Exchange origin and destination. Never fetches.
    pub fn swap_places(&self) {
        self.set_params(FlightSearchParams::swap_places);
    }

    /// Set one side of the route from the built-in place catalog. Never fetches.
    pub fn select_place(&self, side: PlaceSide, sky_id: &str) -> Result<()> {
        let place = find_place(sky_id)
            .ok_or_else(|| AppError::Validation(format!("Unknown place \"{}\"", sky_id.trim())))?;

        self.set_params(|params| match side {
            PlaceSide::Origin => {
                params.origin_sky_id = place.sky_id.to_string();
                params.origin_entity_id = place.entity_id.to_string();
            }
            PlaceSide::Destination => {
                params.destination_sky_id = place.sky_id.to_string();
                params.destination_entity_id = place.entity_id.to_string();
            }
        });
        Ok(())
    }
}
