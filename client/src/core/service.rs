//! # Service Traits
//!
//! Traits for dependency injection, enabling better testability and modularity.
//!
//! Every slice talks to the outside world through one of these seams. Production wiring
//! lives in [`crate::app::Services::from_config`]; tests hand in in-memory mocks.

use async_trait::async_trait;
use shared::{
    AirportData, FlightSearchData, FlightSearchParams, NearbyAirports, PriceCalendarData,
    PriceCalendarParams, StoredSession,
};

use super::error::Result;
use crate::services::location::{Location, PermissionStatus};

/// Flight API operations.
///
/// Implementations return the `data` payload of a successful envelope; anything else is
/// an [`AppError`](super::error::AppError).
#[async_trait]
pub trait ApiService: Send + Sync {
    /// Airports around a coordinate.
    async fn nearby_airports(&self, location: Location, locale: &str) -> Result<NearbyAirports>;

    /// Airports and cities matching free text.
    async fn search_airports(&self, query: &str, locale: &str) -> Result<Vec<AirportData>>;

    /// Itineraries for a route and date.
    async fn search_flights(&self, params: &FlightSearchParams) -> Result<FlightSearchData>;

    /// Cheapest fare per day for a route.
    async fn price_calendar(&self, params: &PriceCalendarParams) -> Result<PriceCalendarData>;
}

/// Identity provider operations.
///
/// Every call that succeeds with a session returns the full [`StoredSession`] so the caller
/// can persist it as-is.
#[async_trait]
pub trait AuthService: Send + Sync {
    async fn sign_in(&self, email: &str, password: &str) -> Result<StoredSession>;

    /// Create the account, then set its display name.
    async fn sign_up(&self, name: &str, email: &str, password: &str) -> Result<StoredSession>;

    async fn sign_out(&self, session: &StoredSession) -> Result<()>;

    /// Re-validate a persisted session, refreshing its tokens when needed.
    ///
    /// Fails with [`AppError::Auth`](super::error::AppError::Auth) when the provider no
    /// longer accepts the credential.
    async fn restore(&self, session: &StoredSession) -> Result<StoredSession>;

    /// Returns the updated session (same tokens, new display name).
    async fn update_name(&self, session: &StoredSession, name: &str) -> Result<StoredSession>;

    async fn update_password(&self, session: &StoredSession, password: &str) -> Result<()>;
}

/// Durable storage for the one persisted session.
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn save(&self, session: &StoredSession) -> Result<()>;

    /// `Ok(None)` when nothing is stored or the stored value is unreadable.
    async fn load(&self) -> Result<Option<StoredSession>>;

    async fn clear(&self) -> Result<()>;
}

/// Device location.
#[async_trait]
pub trait LocationProvider: Send + Sync {
    async fn request_permission(&self) -> Result<PermissionStatus>;

    async fn current_position(&self) -> Result<Location>;
}

