use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::envelope::null_default;

/// Cabin class accepted by `searchFlights`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CabinClass {
    #[default]
    Economy,
    PremiumEconomy,
    Business,
    First,
}

impl CabinClass {
    /// All cabin classes in display order
    pub fn all() -> &'static [CabinClass] {
        &[
            CabinClass::Economy,
            CabinClass::PremiumEconomy,
            CabinClass::Business,
            CabinClass::First,
        ]
    }

    /// Label for option pickers
    pub fn label(&self) -> &'static str {
        match self {
            CabinClass::Economy => "Economy",
            CabinClass::PremiumEconomy => "Premium Economy",
            CabinClass::Business => "Business",
            CabinClass::First => "First",
        }
    }
}

/// Result ordering accepted by `searchFlights`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortBy {
    #[default]
    Best,
    /// The API names the cheapest-first order `price_high`.
    PriceHigh,
    Fastest,
    OutboundTakeOffTime,
    OutboundLandingTime,
    ReturnTakeOffTime,
    ReturnLandingTime,
}

impl SortBy {
    /// All sort orders in display order
    pub fn all() -> &'static [SortBy] {
        &[
            SortBy::Best,
            SortBy::PriceHigh,
            SortBy::Fastest,
            SortBy::OutboundTakeOffTime,
            SortBy::OutboundLandingTime,
            SortBy::ReturnTakeOffTime,
            SortBy::ReturnLandingTime,
        ]
    }

    /// Label for option pickers
    pub fn label(&self) -> &'static str {
        match self {
            SortBy::Best => "Best",
            SortBy::PriceHigh => "Cheapest",
            SortBy::Fastest => "Fastest",
            SortBy::OutboundTakeOffTime => "Outbound Take Off",
            SortBy::OutboundLandingTime => "Outbound Landing",
            SortBy::ReturnTakeOffTime => "Return Take Off",
            SortBy::ReturnLandingTime => "Return Landing",
        }
    }
}

/// Query string of `searchFlights`.
///
/// Empty `Option`s are left out of the query string entirely.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct FlightSearchParams {
    pub origin_sky_id: String,
    pub destination_sky_id: String,
    pub origin_entity_id: String,
    pub destination_entity_id: String,
    /// Departure date, `YYYY-MM-DD`
    pub date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub return_date: Option<String>,
    pub cabin_class: CabinClass,
    pub adults: u32,
    pub childrens: u32,
    pub infants: u32,
    pub sort_by: SortBy,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    /// Comma separated carrier ids to restrict the search to
    #[serde(skip_serializing_if = "Option::is_none")]
    pub carriers_ids: Option<String>,
    pub currency: String,
    pub market: String,
    pub country_code: String,
}

impl Default for FlightSearchParams {
    /// Mumbai to New York, departing today, one adult in economy.
    fn default() -> Self {
        Self {
            origin_sky_id: "BOM".to_string(),
            destination_sky_id: "NYCA".to_string(),
            origin_entity_id: "95673320".to_string(),
            destination_entity_id: "27537542".to_string(),
            date: chrono::Local::now().format("%Y-%m-%d").to_string(),
            return_date: None,
            cabin_class: CabinClass::Economy,
            adults: 1,
            childrens: 0,
            infants: 0,
            sort_by: SortBy::Best,
            limit: None,
            carriers_ids: None,
            currency: "USD".to_string(),
            market: "en-US".to_string(),
            country_code: "US".to_string(),
        }
    }
}

impl FlightSearchParams {
    /// Exchange origin and destination identifiers.
    pub fn swap_places(&mut self) {
        std::mem::swap(&mut self.origin_sky_id, &mut self.destination_sky_id);
        std::mem::swap(&mut self.origin_entity_id, &mut self.destination_entity_id);
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct SearchContext {
    /// `complete` or `incomplete`
    pub status: String,
    pub total_results: u32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct Price {
    pub raw: f64,
    pub formatted: String,
}

/// Endpoint of a leg.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct LegPlace {
    pub id: String,
    pub name: String,
    pub display_code: String,
    pub city: Option<String>,
    pub country: Option<String>,
    pub is_highlighted: bool,
}

/// Endpoint of a segment. The API uses a different shape than for legs.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct SegmentPlace {
    pub flight_place_id: String,
    pub display_code: String,
    pub name: String,
    #[serde(rename = "type")]
    pub place_type: String,
    pub country: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct Carrier {
    pub id: i64,
    pub name: String,
    pub logo_url: Option<String>,
    pub alternate_id: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct Carriers {
    #[serde(deserialize_with = "null_default")]
    pub marketing: Vec<Carrier>,
    pub operation_type: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct SegmentCarrier {
    pub id: i64,
    pub name: String,
    pub alternate_id: Option<String>,
    pub all_code: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct FlightSegment {
    pub id: String,
    pub origin: SegmentPlace,
    pub destination: SegmentPlace,
    pub departure: String,
    pub arrival: String,
    pub duration_in_minutes: u32,
    pub flight_number: String,
    pub marketing_carrier: SegmentCarrier,
    pub operating_carrier: SegmentCarrier,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct FlightLeg {
    pub id: String,
    pub origin: LegPlace,
    pub destination: LegPlace,
    pub duration_in_minutes: u32,
    pub stop_count: u32,
    pub departure: String,
    pub arrival: String,
    pub carriers: Carriers,
    #[serde(deserialize_with = "null_default")]
    pub segments: Vec<FlightSegment>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct FlightItinerary {
    pub id: String,
    pub price: Price,
    #[serde(deserialize_with = "null_default")]
    pub legs: Vec<FlightLeg>,
    #[serde(deserialize_with = "null_default")]
    pub tags: Vec<String>,
}

impl FlightItinerary {
    /// First marketing carrier of the first leg, the one shown on result cards.
    pub fn primary_carrier(&self) -> Option<&Carrier> {
        self.legs.first().and_then(|leg| leg.carriers.marketing.first())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct DurationStats {
    pub min: u32,
    pub max: u32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct StopPrice {
    pub is_present: bool,
    pub formatted_price: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct StopPrices {
    pub direct: StopPrice,
    pub one: StopPrice,
    pub two_or_more: StopPrice,
}

/// Facets the API computes over the full result set.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct FilterStats {
    pub duration: Option<DurationStats>,
    #[serde(deserialize_with = "null_default")]
    pub carriers: Vec<Carrier>,
    pub stop_prices: Option<StopPrices>,
}

/// Payload of `searchFlights`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct FlightSearchData {
    pub context: SearchContext,
    #[serde(deserialize_with = "null_default")]
    pub itineraries: Vec<FlightItinerary>,
    /// Free-form notices from the provider
    #[serde(deserialize_with = "null_default")]
    pub messages: Vec<Value>,
    pub filter_stats: Option<FilterStats>,
    pub destination_image_url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_params_serialize_camel_case_and_skip_empty() {
        let params = FlightSearchParams {
            date: "2024-01-01".to_string(),
            ..FlightSearchParams::default()
        };
        let value = serde_json::to_value(&params).unwrap();

        assert_eq!(value["originSkyId"], "BOM");
        assert_eq!(value["cabinClass"], "economy");
        assert_eq!(value["sortBy"], "best");
        assert_eq!(value["childrens"], 0);
        assert!(value.get("returnDate").is_none());
        assert!(value.get("carriersIds").is_none());
    }

    #[test]
    fn test_swap_places() {
        let mut params = FlightSearchParams::default();
        params.swap_places();
        assert_eq!(params.origin_sky_id, "NYCA");
        assert_eq!(params.destination_sky_id, "BOM");
        assert_eq!(params.origin_entity_id, "27537542");
        assert_eq!(params.destination_entity_id, "95673320");
    }

    #[test]
    fn test_itinerary_parses_partial_payload() {
        let data: FlightSearchData = serde_json::from_value(json!({
            "context": {"status": "complete", "totalResults": 1},
            "itineraries": [{
                "id": "13554-2401011055",
                "price": {"raw": 612.4, "formatted": "$613"},
                "legs": [{
                    "id": "13554-2401011055",
                    "origin": {"id": "BOM", "name": "Mumbai", "displayCode": "BOM"},
                    "destination": {"id": "JFK", "name": "New York John F. Kennedy", "displayCode": "JFK"},
                    "durationInMinutes": 1290,
                    "stopCount": 1,
                    "departure": "2024-01-01T10:55:00",
                    "arrival": "2024-01-02T02:05:00",
                    "carriers": {"marketing": [{"id": -32480, "name": "Air India", "logoUrl": "https://logos/AI.png"}]},
                    "segments": []
                }],
                "tags": ["cheapest"]
            }],
            "messages": [],
            "filterStats": null
        }))
        .unwrap();

        assert_eq!(data.context.total_results, 1);
        let itinerary = &data.itineraries[0];
        assert_eq!(itinerary.price.formatted, "$613");
        assert_eq!(itinerary.primary_carrier().unwrap().name, "Air India");
        assert!(data.filter_stats.is_none());
    }

    #[test]
    fn test_option_tables_have_labels() {
        assert_eq!(CabinClass::all().len(), 4);
        assert_eq!(SortBy::PriceHigh.label(), "Cheapest");
        assert_eq!(
            serde_json::to_value(CabinClass::PremiumEconomy).unwrap(),
            json!("premium_economy")
        );
    }
}
