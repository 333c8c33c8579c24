//! # Application Events
//!
//! Change notifications sent from the slices to the host.
//!
//! Slices publish an event after every state transition; the host drains the channel
//! (see [`App::drain_events`](crate::app::App::drain_events)) and re-reads whatever it renders.
//! Events carry no payload beyond what changed; the slice snapshot is the source of truth.

use crate::services::location::Location;

/// Query-backed resources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    NearbyAirports,
    AirportSearch,
    Flights,
    PriceCalendar,
}

impl Resource {
    pub fn label(&self) -> &'static str {
        match self {
            Resource::NearbyAirports => "nearby airports",
            Resource::AirportSearch => "airport search",
            Resource::Flights => "flights",
            Resource::PriceCalendar => "price calendar",
        }
    }
}

/// Slice → host notifications
#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    /// Session status, loading flag or error changed
    SessionChanged,
    /// A query slice changed (params, loading, data or error)
    QueryUpdated(Resource),
    /// A device position was obtained
    LocationResolved(Location),
}
