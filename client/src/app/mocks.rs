//! In-memory service implementations for slice tests.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use shared::{
    AirportData, AirportNavigation, AirportPresentation, FlightPlaceParams, FlightSearchData,
    FlightSearchParams, NearbyAirports, PriceCalendarData, PriceCalendarParams, StoredSession, User,
};
use tokio::sync::oneshot;

use crate::core::error::{AppError, Result};
use crate::core::service::{ApiService, AuthService, LocationProvider};
use crate::services::location::{Location, PermissionStatus};
use crate::storage::{KeyValueStore, MemoryKeyValueStore};

pub(crate) fn airport(sky_id: &str, entity_type: &str) -> AirportData {
    AirportData {
        presentation: AirportPresentation {
            title: format!("{} title", sky_id),
            suggestion_title: format!("{} ({})", sky_id, entity_type),
            subtitle: "Somewhere".to_string(),
        },
        navigation: AirportNavigation {
            entity_id: format!("{}-entity", sky_id),
            entity_type: entity_type.to_string(),
            localized_name: sky_id.to_string(),
            relevant_flight_params: FlightPlaceParams {
                sky_id: sky_id.to_string(),
                entity_id: format!("{}-entity", sky_id),
                flight_place_type: entity_type.to_string(),
                localized_name: sky_id.to_string(),
            },
            relevant_hotel_params: None,
        },
    }
}

/// Flight API double. Records every call as `"<operation>:<detail>"`.
pub(crate) struct MockApi {
    calls: Mutex<Vec<String>>,
    pub nearby: Mutex<Result<NearbyAirports>>,
    pub airports: Mutex<HashMap<String, Vec<AirportData>>>,
    pub search_error: Mutex<Option<AppError>>,
    pub flights: Mutex<Result<FlightSearchData>>,
    pub calendar: Mutex<Result<PriceCalendarData>>,
    /// A search for the key waits until the matching sender fires.
    gates: Mutex<HashMap<String, oneshot::Receiver<()>>>,
}

impl Default for MockApi {
    fn default() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            nearby: Mutex::new(Ok(NearbyAirports::default())),
            airports: Mutex::new(HashMap::new()),
            search_error: Mutex::new(None),
            flights: Mutex::new(Ok(FlightSearchData::default())),
            calendar: Mutex::new(Ok(PriceCalendarData::default())),
            gates: Mutex::new(HashMap::new()),
        }
    }
}

impl MockApi {
    pub(crate) fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub(crate) fn calls(&self) -> Vec<String> {
        self.calls.lock().clone()
    }

    /// Hold back the response for `query` until the returned sender fires.
    pub(crate) fn gate(&self, query: &str) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        self.gates.lock().insert(query.to_string(), rx);
        tx
    }

    fn record(&self, call: String) {
        self.calls.lock().push(call);
    }
}

#[async_trait]
impl ApiService for MockApi {
    async fn nearby_airports(&self, location: Location, locale: &str) -> Result<NearbyAirports> {
        self.record(format!("nearby:{}:{}", location, locale));
        self.nearby.lock().clone()
    }

    async fn search_airports(&self, query: &str, _locale: &str) -> Result<Vec<AirportData>> {
        self.record(format!("search:{}", query));

        let gate = self.gates.lock().remove(query);
        if let Some(gate) = gate {
            let _ = gate.await;
        }

        if let Some(err) = self.search_error.lock().clone() {
            return Err(err);
        }
        Ok(self.airports.lock().get(query).cloned().unwrap_or_default())
    }

    async fn search_flights(&self, params: &FlightSearchParams) -> Result<FlightSearchData> {
        self.record(format!("flights:{}-{}", params.origin_sky_id, params.destination_sky_id));
        self.flights.lock().clone()
    }

    async fn price_calendar(&self, params: &PriceCalendarParams) -> Result<PriceCalendarData> {
        self.record(format!("calendar:{}-{}", params.origin_sky_id, params.destination_sky_id));
        self.calendar.lock().clone()
    }
}

/// Identity provider double keeping accounts in memory.
#[derive(Default)]
pub(crate) struct MockAuth {
    calls: Mutex<Vec<&'static str>>,
    /// email → (password, display name)
    accounts: Mutex<HashMap<String, (String, String)>>,
    /// Outcome of `restore`; `None` echoes the stored session back
    pub restore_result: Mutex<Option<Result<StoredSession>>>,
    pub sign_out_error: Mutex<Option<AppError>>,
    pub update_error: Mutex<Option<AppError>>,
}

impl MockAuth {
    pub(crate) fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub(crate) fn with_account(email: &str, password: &str, name: &str) -> Arc<Self> {
        let auth = Self::default();
        auth.accounts
            .lock()
            .insert(email.to_string(), (password.to_string(), name.to_string()));
        Arc::new(auth)
    }

    pub(crate) fn calls(&self) -> Vec<&'static str> {
        self.calls.lock().clone()
    }

    fn record(&self, call: &'static str) {
        self.calls.lock().push(call);
    }
}

pub(crate) fn session_for(email: &str, name: &str) -> StoredSession {
    StoredSession {
        user: User {
            id: format!("uid-{}", email),
            email: email.to_string(),
            name: name.to_string(),
        },
        id_token: format!("id-token-{}", email),
        refresh_token: format!("refresh-token-{}", email),
    }
}

#[async_trait]
impl AuthService for MockAuth {
    async fn sign_in(&self, email: &str, password: &str) -> Result<StoredSession> {
        self.record("sign_in");
        match self.accounts.lock().get(email) {
            Some((stored, name)) if stored == password => Ok(session_for(email, name)),
            _ => Err(AppError::Auth("Invalid email or password".to_string())),
        }
    }

    async fn sign_up(&self, name: &str, email: &str, password: &str) -> Result<StoredSession> {
        self.record("sign_up");
        let mut accounts = self.accounts.lock();
        if accounts.contains_key(email) {
            return Err(AppError::Auth("An account with this email already exists".to_string()));
        }
        accounts.insert(email.to_string(), (password.to_string(), name.to_string()));
        Ok(session_for(email, name))
    }

    async fn sign_out(&self, _session: &StoredSession) -> Result<()> {
        self.record("sign_out");
        match self.sign_out_error.lock().clone() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    async fn restore(&self, session: &StoredSession) -> Result<StoredSession> {
        self.record("restore");
        self.restore_result
            .lock()
            .clone()
            .unwrap_or_else(|| Ok(session.clone()))
    }

    async fn update_name(&self, session: &StoredSession, name: &str) -> Result<StoredSession> {
        self.record("update_name");
        if let Some(err) = self.update_error.lock().clone() {
            return Err(err);
        }
        let mut updated = session.clone();
        updated.user.name = name.to_string();
        Ok(updated)
    }

    async fn update_password(&self, session: &StoredSession, password: &str) -> Result<()> {
        self.record("update_password");
        if let Some(err) = self.update_error.lock().clone() {
            return Err(err);
        }
        if let Some(account) = self.accounts.lock().get_mut(&session.user.email) {
            account.0 = password.to_string();
        }
        Ok(())
    }
}

/// Location double with a configurable answer and an optional delay before the fix.
pub(crate) struct MockLocation {
    pub permission: PermissionStatus,
    pub position: Result<Location>,
    pub delay: Option<Duration>,
}

impl MockLocation {
    pub(crate) fn at(lat: f64, lng: f64) -> Arc<Self> {
        Arc::new(Self {
            permission: PermissionStatus::Granted,
            position: Location::new(lat, lng),
            delay: None,
        })
    }

    pub(crate) fn denied() -> Arc<Self> {
        Arc::new(Self {
            permission: PermissionStatus::Denied,
            position: Err(AppError::Location("unreachable".to_string())),
            delay: None,
        })
    }
}

#[async_trait]
impl LocationProvider for MockLocation {
    async fn request_permission(&self) -> Result<PermissionStatus> {
        Ok(self.permission)
    }

    async fn current_position(&self) -> Result<Location> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.position.clone()
    }
}

/// Key-value store whose deletes always fail, e.g. a read-only disk.
#[derive(Default)]
pub(crate) struct ReadOnlyKeyValueStore {
    inner: MemoryKeyValueStore,
}

#[async_trait]
impl KeyValueStore for ReadOnlyKeyValueStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        self.inner.get(key).await
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        self.inner.set(key, value).await
    }

    async fn remove(&self, _key: &str) -> Result<()> {
        Err(AppError::Storage("Read-only file system".to_string()))
    }
}
