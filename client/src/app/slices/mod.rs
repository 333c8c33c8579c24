//! One slice per concern. Query-backed slices share [`query::QuerySlice`].

pub mod airports;
pub mod flights;
pub mod price_calendar;
pub mod query;
pub mod session;

pub use airports::{AirportSearchParams, AirportsSlice, NearbyParams, LOCATION_TIMEOUT};
pub use flights::{FlightSearchQuery, FlightsSlice};
pub use price_calendar::{PriceCalendarQuery, PriceCalendarSlice};
pub use query::{Query, QuerySlice};
pub use session::{SessionSlice, SESSION_EXPIRED};
