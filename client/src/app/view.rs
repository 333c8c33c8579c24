//! # Derived View State
//!
//! Pure helpers a presentation layer builds on top of slice snapshots: result filtering,
//! pickers that keep origin and destination apart, itinerary rows, calendar marks, and a
//! debouncer for search-as-you-type.
//!
//! Nothing here talks to the network or mutates a slice.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use shared::{
    format_duration, format_leg_time, AirportData, CabinClass, FlightItinerary, FlightSearchParams,
    PriceCalendarData, PriceGroup, SortBy, CALENDAR_CURRENCIES,
};

// region:    --- Places

/// A destination offered by the quick pickers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Place {
    pub name: &'static str,
    pub sky_id: &'static str,
    pub entity_id: &'static str,
}

/// Built-in place catalog.
pub const PLACES: &[Place] = &[
    Place { name: "Mumbai", sky_id: "BOM", entity_id: "95673320" },
    Place { name: "London", sky_id: "LOND", entity_id: "27544008" },
    Place { name: "New York", sky_id: "NYCA", entity_id: "27537542" },
    Place { name: "Cape Town", sky_id: "CPT", entity_id: "27539908" },
    Place { name: "New Zealand", sky_id: "NZ", entity_id: "29475342" },
    Place { name: "Tokyo", sky_id: "TYOA", entity_id: "27542089" },
];

/// Catalog entry for `sky_id`, ignoring case.
pub fn find_place(sky_id: &str) -> Option<&'static Place> {
    PLACES
        .iter()
        .find(|place| place.sky_id.eq_ignore_ascii_case(sky_id.trim()))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaceSide {
    Origin,
    Destination,
}

/// Places selectable as origin: everything but the current destination.
pub fn origin_options(params: &FlightSearchParams) -> Vec<&'static Place> {
    PLACES
        .iter()
        .filter(|place| place.sky_id != params.destination_sky_id)
        .collect()
}

/// Places selectable as destination: everything but the current origin.
pub fn destination_options(params: &FlightSearchParams) -> Vec<&'static Place> {
    PLACES
        .iter()
        .filter(|place| place.sky_id != params.origin_sky_id)
        .collect()
}

// endregion: --- Places

// region:    --- Option tables

pub fn cabin_class_options() -> Vec<(CabinClass, &'static str)> {
    CabinClass::all().iter().map(|c| (*c, c.label())).collect()
}

pub fn sort_options() -> Vec<(SortBy, &'static str)> {
    SortBy::all().iter().map(|s| (*s, s.label())).collect()
}

pub fn currency_options() -> &'static [&'static str] {
    CALENDAR_CURRENCIES
}

// endregion: --- Option tables

// region:    --- Airport filtering

/// Entity-type filter over airport suggestions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AirportFilter {
    #[default]
    All,
    Airport,
    City,
}

impl AirportFilter {
    pub fn all() -> &'static [AirportFilter] {
        &[AirportFilter::All, AirportFilter::Airport, AirportFilter::City]
    }

    pub fn label(&self) -> &'static str {
        match self {
            AirportFilter::All => "All",
            AirportFilter::Airport => "Airports",
            AirportFilter::City => "Cities",
        }
    }

    pub fn matches(&self, airport: &AirportData) -> bool {
        let entity_type = airport.navigation.entity_type.as_str();
        match self {
            AirportFilter::All => true,
            AirportFilter::Airport => entity_type.eq_ignore_ascii_case("AIRPORT"),
            AirportFilter::City => entity_type.eq_ignore_ascii_case("CITY"),
        }
    }
}

/// Suggestions passing `filter` whose title, subtitle or sky id contains `text` (any case).
pub fn filter_airports<'a>(
    airports: &'a [AirportData],
    filter: AirportFilter,
    text: &str,
) -> Vec<&'a AirportData> {
    let needle = text.trim().to_lowercase();
    airports
        .iter()
        .filter(|airport| filter.matches(airport))
        .filter(|airport| {
            needle.is_empty()
                || [
                    airport.presentation.title.as_str(),
                    airport.presentation.suggestion_title.as_str(),
                    airport.presentation.subtitle.as_str(),
                    airport.sky_id(),
                ]
                .iter()
                .any(|field| field.to_lowercase().contains(&needle))
        })
        .collect()
}

// endregion: --- Airport filtering

// region:    --- Itineraries

/// One result row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItineraryRow {
    pub price: String,
    pub carrier: String,
    pub route: String,
    pub departure: String,
    pub arrival: String,
    pub duration: String,
    pub stops: String,
}

impl ItineraryRow {
    /// Row for the outbound leg of `itinerary`. `None` when the itinerary has no legs.
    pub fn from_itinerary(itinerary: &FlightItinerary) -> Option<Self> {
        let leg = itinerary.legs.first()?;
        let stops = match leg.stop_count {
            0 => "Direct".to_string(),
            1 => "1 stop".to_string(),
            n => format!("{} stops", n),
        };

        Some(Self {
            price: itinerary.price.formatted.clone(),
            carrier: itinerary
                .primary_carrier()
                .map(|carrier| carrier.name.clone())
                .unwrap_or_default(),
            route: format!("{} → {}", leg.origin.display_code, leg.destination.display_code),
            departure: format_leg_time(&leg.departure),
            arrival: format_leg_time(&leg.arrival),
            duration: format_duration(leg.duration_in_minutes),
            stops,
        })
    }
}

// endregion: --- Itineraries

// region:    --- Price calendar

/// How a calendar day is drawn.
#[derive(Debug, Clone, PartialEq)]
pub struct CalendarMark {
    pub price: f64,
    pub group: PriceGroup,
    /// Legend label of the group (`$`, `$$`, ...), empty if the legend lacks it
    pub label: String,
}

/// Marks keyed by `YYYY-MM-DD`, in date order.
pub fn calendar_marks(data: &PriceCalendarData) -> BTreeMap<String, CalendarMark> {
    let legend = data.groups();
    data.days()
        .iter()
        .map(|day| {
            let label = legend
                .iter()
                .find(|group| group.id == day.group)
                .map(|group| group.label.clone())
                .unwrap_or_default();
            (
                day.day.clone(),
                CalendarMark {
                    price: day.price,
                    group: day.group.clone(),
                    label,
                },
            )
        })
        .collect()
}

// endregion: --- Price calendar

// region:    --- Debouncer

pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(500);

/// Trailing-edge debouncer.
///
/// Each [`settle`](Debouncer::settle) call waits out the delay and reports whether it is
/// still the latest call; only the last call of a burst gets `true`.
///
/// ```rust,ignore
/// if debouncer.settle().await {
///     app.airports.lookup(&text).await?;
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Debouncer {
    delay: Duration,
    generation: Arc<AtomicU64>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            generation: Arc::new(AtomicU64::new(0)),
        }
    }

    pub async fn settle(&self) -> bool {
        let ticket = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        tokio::time::sleep(self.delay).await;
        self.generation.load(Ordering::SeqCst) == ticket
    }
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE)
    }
}

// endregion: --- Debouncer
