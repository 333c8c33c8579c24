//! # API Client
//!
//! HTTP client for the Sky Scrapper flight API on RapidAPI.
//!
//! Every request carries the RapidAPI host header and one key drawn at random from the
//! configured pool, which spreads quota use across subscriptions. There is no retry and no
//! failover to another key: a failed request surfaces as an error and the user retries.

use std::time::Instant;

use rand::seq::IndexedRandom;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;
use shared::{
    describe_message, AirportData, ApiEnvelope, ApiErrorBody, FlightSearchData, FlightSearchParams,
    NearbyAirports, PriceCalendarData, PriceCalendarParams,
};
use uuid::Uuid;

use crate::config::ApiConfig;
use crate::core::error::{AppError, Result};
use crate::core::service::ApiService;
use crate::services::location::Location;

const HOST_HEADER: &str = "x-rapidapi-host";
const KEY_HEADER: &str = "x-rapidapi-key";

/// HTTP client for the flight API.
///
/// Holds a pooled `reqwest::Client`. Share it as `Arc<dyn ApiService>`.
pub struct ApiClient {
    pub(crate) client: Client,
    base_url: String,
    host: String,
    keys: Vec<String>,
}

impl ApiClient {
    /// Build a client from configuration. Fails when the key pool is empty.
    pub fn new(config: &ApiConfig) -> Result<Self> {
        if config.keys.is_empty() {
            return Err(AppError::Config("API_KEYS does not contain any key".to_string()));
        }

        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| AppError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            host: config.host.clone(),
            keys: config.keys.clone(),
        })
    }

    pub(crate) fn base_url(&self) -> &str {
        &self.base_url
    }

    /// One key from the pool, uniformly at random.
    fn pick_key(&self) -> &str {
        self.keys
            .choose(&mut rand::rng())
            .map(String::as_str)
            .unwrap_or_default()
    }

    /// GET `path` with `query` and unwrap the envelope's `data`.
    ///
    /// Error mapping:
    /// - no response at all → [`AppError::Network`]
    /// - non-2xx → [`AppError::Api`] with the body's `message`, or the status reason
    /// - 2xx with `status: false`, no `data` or an unparsable body → [`AppError::Api`] with the HTTP status
    pub(crate) async fn get<Q, T>(&self, path: &str, query: &Q) -> Result<T>
    where
        Q: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let trace_id = Uuid::new_v4();
        let url = format!("{}{}", self.base_url(), path);
        let start = Instant::now();

        tracing::debug!(trace_id = %trace_id, path = %path, "Sending request");

        let key = self.pick_key();
        let response = self
            .client
            .get(&url)
            .query(query)
            .header(HOST_HEADER, &self.host)
            .header(KEY_HEADER, key)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(trace_id = %trace_id, path = %path, error = %e, "Request network error");
                AppError::Network(e.to_string())
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            tracing::error!(trace_id = %trace_id, path = %path, error = %e, "Failed to read response body");
            AppError::Network(e.to_string())
        })?;
        let duration_ms = start.elapsed().as_millis();

        if !status.is_success() {
            let message = serde_json::from_str::<ApiErrorBody>(&body)
                .ok()
                .and_then(|body| body.message)
                .map(|message| describe_message(&message))
                .filter(|message| !message.trim().is_empty())
                .unwrap_or_else(|| status.canonical_reason().unwrap_or("Request failed").to_string());

            tracing::warn!(
                trace_id = %trace_id,
                path = %path,
                status = status.as_u16(),
                duration_ms = duration_ms,
                error = %message,
                "Request failed"
            );
            return Err(AppError::Api { status: status.as_u16(), message });
        }

        let envelope: ApiEnvelope<T> = serde_json::from_str(&body).map_err(|e| {
            tracing::error!(trace_id = %trace_id, path = %path, error = %e, "Response parse error");
            AppError::Api {
                status: status.as_u16(),
                message: format!("Failed to parse response: {}", e),
            }
        })?;

        let data = envelope.into_data().map_err(|message| {
            tracing::warn!(
                trace_id = %trace_id,
                path = %path,
                duration_ms = duration_ms,
                error = %message,
                "API reported failure"
            );
            AppError::Api { status: status.as_u16(), message }
        })?;

        tracing::info!(trace_id = %trace_id, path = %path, duration_ms = duration_ms, "Request succeeded");
        Ok(data)
    }
}

#[async_trait::async_trait]
impl ApiService for ApiClient {
    async fn nearby_airports(&self, location: Location, locale: &str) -> Result<NearbyAirports> {
        super::airports::get_nearby_airports(self, location, locale).await
    }

    async fn search_airports(&self, query: &str, locale: &str) -> Result<Vec<AirportData>> {
        super::airports::search_airports(self, query, locale).await
    }

    async fn search_flights(&self, params: &FlightSearchParams) -> Result<FlightSearchData> {
        super::flights::search_flights(self, params).await
    }

    async fn price_calendar(&self, params: &PriceCalendarParams) -> Result<PriceCalendarData> {
        super::price_calendar::get_price_calendar(self, params).await
    }
}
