use serde::{Deserialize, Serialize};

use super::envelope::null_default;

/// Currencies offered by the price calendar picker.
pub const CALENDAR_CURRENCIES: &[&str] = &["USD", "INR", "GBP", "EUR"];

/// Query string of `getPriceCalendar`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PriceCalendarParams {
    pub origin_sky_id: String,
    pub destination_sky_id: String,
    /// First day of the calendar, `YYYY-MM-DD`
    pub from_date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to_date: Option<String>,
    pub currency: String,
}

impl Default for PriceCalendarParams {
    /// Mumbai to JFK starting today, priced in USD.
    fn default() -> Self {
        Self {
            origin_sky_id: "BOM".to_string(),
            destination_sky_id: "JFK".to_string(),
            from_date: chrono::Local::now().format("%Y-%m-%d").to_string(),
            to_date: None,
            currency: "USD".to_string(),
        }
    }
}

/// Relative price band of a calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PriceGroup {
    Low,
    Medium,
    High,
    #[serde(untagged)]
    Other(String),
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PriceCalendarDay {
    /// `YYYY-MM-DD`
    pub day: String,
    pub group: PriceGroup,
    pub price: f64,
}

/// Legend entry, e.g. `low` → `$`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PriceCalendarGroup {
    pub id: PriceGroup,
    pub label: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct PriceCalendarFlights {
    pub no_price_label: String,
    #[serde(deserialize_with = "null_default")]
    pub groups: Vec<PriceCalendarGroup>,
    #[serde(deserialize_with = "null_default")]
    pub days: Vec<PriceCalendarDay>,
    pub currency: String,
}

/// Payload of `getPriceCalendar`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PriceCalendarData {
    pub flights: Option<PriceCalendarFlights>,
}

impl PriceCalendarData {
    /// Days with a known price, empty when the API had no calendar for the route.
    pub fn days(&self) -> &[PriceCalendarDay] {
        self.flights.as_ref().map(|f| f.days.as_slice()).unwrap_or(&[])
    }

    pub fn groups(&self) -> &[PriceCalendarGroup] {
        self.flights.as_ref().map(|f| f.groups.as_slice()).unwrap_or(&[])
    }
}
