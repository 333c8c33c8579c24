//! # Price Calendar Slice

use std::collections::BTreeMap;

use async_trait::async_trait;
use shared::{PriceCalendarData, PriceCalendarParams};

use super::query::{Query, QuerySlice};
use crate::app::events::Resource;
use crate::app::view::{calendar_marks, CalendarMark};
use crate::core::error::{AppError, Result};
use crate::core::service::ApiService;

pub struct PriceCalendarQuery;

#[async_trait]
impl Query for PriceCalendarQuery {
    type Params = PriceCalendarParams;
    type Output = PriceCalendarData;

    const RESOURCE: Resource = Resource::PriceCalendar;

    fn validate(params: &PriceCalendarParams) -> Result<()> {
        let required = [
            &params.origin_sky_id,
            &params.destination_sky_id,
            &params.from_date,
            &params.currency,
        ];
        if required.iter().any(|value| value.trim().is_empty()) {
            return Err(AppError::Validation("All fields are required.".to_string()));
        }
        for date in std::iter::once(&params.from_date).chain(params.to_date.as_ref()) {
            lib_utils::parse_ymd(date)
                .map_err(|_| AppError::Validation(format!("\"{}\" is not a YYYY-MM-DD date.", date)))?;
        }
        Ok(())
    }

    async fn fetch(api: &dyn ApiService, params: &PriceCalendarParams) -> Result<PriceCalendarData> {
        api.price_calendar(params).await
    }
}

pub type PriceCalendarSlice = QuerySlice<PriceCalendarQuery>;

impl QuerySlice<PriceCalendarQuery> {
    /// Day marks of the current result, empty before the first successful fetch.
    pub fn day_marks(&self) -> BTreeMap<String, CalendarMark> {
        self.data().map(|data| calendar_marks(&data)).unwrap_or_default()
    }
}
