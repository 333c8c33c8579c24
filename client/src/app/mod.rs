//! # Application Orchestrator
//!
//! [`App`] owns one slice per concern and the channel they report changes on. A host
//! (the CLI in `main.rs`, or any front end) calls slice operations, reads snapshots, and
//! drains [`AppEvent`]s to learn what to redraw.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │  Host                                                        │
//! │   - calls slice operations (login, execute, lookup, ...)     │
//! │   - reads snapshots                                          │
//! │   - drains AppEvent from event_rx                            │
//! └───────────────┬───────────────────────────────▲──────────────┘
//!                 │                               │ async_channel
//! ┌───────────────▼───────────────────────────────┴──────────────┐
//! │  Slices: Arc<RwLock<state>>                                  │
//! │   session · airports (nearby, search) · flights · calendar   │
//! └───────────────┬──────────────────────────────────────────────┘
//!                 │ trait objects (core::service)
//! ┌───────────────▼──────────────────────────────────────────────┐
//! │  Services: ApiClient · FirebaseAuthService ·                 │
//! │            LocalSessionStore · ConfiguredLocation            │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Thread Safety
//!
//! Slices are cheap to clone and safe to drive from several tasks at once. State locks are
//! held for the duration of a field update only, never across an `.await`.

pub mod events;
#[cfg(test)]
pub(crate) mod mocks;
pub mod slices;
pub mod state;
pub mod view;

pub use events::{AppEvent, Resource};
pub use state::{QueryState, SessionState, SessionStatus};

use std::sync::Arc;

use async_channel::{unbounded, Receiver};

use crate::config::AppConfig;
use crate::core::error::Result;
use crate::core::service::{ApiService, AuthService, LocationProvider, SessionStore};
use crate::services::api::ApiClient;
use crate::services::auth::FirebaseAuthService;
use crate::services::location::ConfiguredLocation;
use crate::storage::{FileKeyValueStore, LocalSessionStore, STORE_FILE};
use slices::{AirportsSlice, FlightsSlice, PriceCalendarSlice, SessionSlice};

/// The outside world, as the slices see it.
#[derive(Clone)]
pub struct Services {
    pub api: Arc<dyn ApiService>,
    pub auth: Arc<dyn AuthService>,
    pub store: Arc<dyn SessionStore>,
    pub location: Arc<dyn LocationProvider>,
}

impl Services {
    /// Production wiring.
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let api = ApiClient::new(&config.api)?;
        let kv = FileKeyValueStore::new(config.data_dir.join(STORE_FILE));

        Ok(Self {
            // One connection pool for both hosts.
            auth: Arc::new(FirebaseAuthService::with_client(
                api.client.clone(),
                config.identity.clone(),
            )),
            api: Arc::new(api),
            store: Arc::new(LocalSessionStore::new(Arc::new(kv))),
            location: Arc::new(ConfiguredLocation::new(config.location)),
        })
    }
}

pub struct App {
    pub session: SessionSlice,
    pub airports: AirportsSlice,
    pub flights: FlightsSlice,
    pub price_calendar: PriceCalendarSlice,

    /// Change notifications from every slice.
    pub event_rx: Receiver<AppEvent>,
}

impl App {
    pub fn new(services: Services, locale: &str) -> Self {
        let (event_tx, event_rx) = unbounded();

        let session = SessionSlice::new(services.auth, services.store, event_tx.clone());
        let airports = AirportsSlice::new(
            services.api.clone(),
            services.location,
            event_tx.clone(),
            locale,
        );
        let flights = FlightsSlice::new(services.api.clone(), event_tx.clone(), Default::default());
        let price_calendar = PriceCalendarSlice::new(services.api, event_tx, Default::default());

        tracing::info!(locale, "App initialized");

        Self {
            session,
            airports,
            flights,
            price_calendar,
            event_rx,
        }
    }

    pub fn from_config(config: &AppConfig) -> Result<Self> {
        Ok(Self::new(Services::from_config(config)?, &config.locale))
    }

    /// Startup work: bring back the persisted session.
    ///
    /// A failed restore is already reflected in the session snapshot, so it is logged here
    /// rather than returned.
    pub async fn init(&self) {
        if let Err(err) = self.session.restore_on_startup().await {
            tracing::info!(error = %err, "Starting without a session");
        }
    }

    /// Everything queued on the event channel, without waiting.
    pub fn drain_events(&self) -> Vec<AppEvent> {
        std::iter::from_fn(|| self.event_rx.try_recv().ok()).collect()
    }
}
