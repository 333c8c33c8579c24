//! # Price Calendar Endpoint

use shared::{PriceCalendarData, PriceCalendarParams};

use super::client::ApiClient;
use crate::core::error::Result;

pub const PRICE_CALENDAR_PATH: &str = "/api/v1/flights/getPriceCalendar";

/// Cheapest fare per day for the route in `params`.
#[tracing::instrument(
    skip(client, params),
    fields(origin = %params.origin_sky_id, destination = %params.destination_sky_id)
)]
pub async fn get_price_calendar(
    client: &ApiClient,
    params: &PriceCalendarParams,
) -> Result<PriceCalendarData> {
    let data: PriceCalendarData = client.get(PRICE_CALENDAR_PATH, params).await?;

    tracing::debug!(days = data.days().len(), "Price calendar fetched");
    Ok(data)
}
