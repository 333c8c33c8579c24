//! # Query Slice
//!
//! Shared machinery behind every resource slice: current parameters, last good result,
//! loading and error flags, and the request-id guard.
//!
//! ## Request Ordering
//!
//! Each `execute()` takes the next request id before touching the network. When the response
//! arrives it is applied only if that id is still the newest; otherwise it is dropped without
//! touching the state. Typing `lon` then `london` quickly therefore always ends on the
//! `london` results, whatever order the two responses arrive in.
//!
//! ## Locking
//!
//! State lives in `Arc<RwLock<QueryState>>`. Every lock is taken and released inside a
//! synchronous block; none is held across an `.await`.

use std::sync::Arc;

use async_channel::Sender;
use async_trait::async_trait;
use parking_lot::RwLock;

use crate::app::events::{AppEvent, Resource};
use crate::app::state::QueryState;
use crate::core::error::{AppError, Result};
use crate::core::service::ApiService;

/// A remote resource a [`QuerySlice`] can fetch.
#[async_trait]
pub trait Query: Send + Sync + 'static {
    type Params: Clone + PartialEq + Send + Sync + 'static;
    type Output: Clone + Send + Sync + 'static;

    const RESOURCE: Resource;

    /// Check required fields. Runs before every fetch; a failure never reaches the network.
    fn validate(params: &Self::Params) -> Result<()>;

    async fn fetch(api: &dyn ApiService, params: &Self::Params) -> Result<Self::Output>;
}

/// State and operations for one query-backed resource.
pub struct QuerySlice<Q: Query> {
    state: Arc<RwLock<QueryState<Q::Params, Q::Output>>>,
    api: Arc<dyn ApiService>,
    events: Sender<AppEvent>,
}

impl<Q: Query> Clone for QuerySlice<Q> {
    fn clone(&self) -> Self {
        Self {
            state: self.state.clone(),
            api: self.api.clone(),
            events: self.events.clone(),
        }
    }
}

impl<Q: Query> QuerySlice<Q> {
    pub fn new(api: Arc<dyn ApiService>, events: Sender<AppEvent>, params: Q::Params) -> Self {
        Self {
            state: Arc::new(RwLock::new(QueryState::new(params))),
            api,
            events,
        }
    }

    /// Copy of the current state.
    pub fn snapshot(&self) -> QueryState<Q::Params, Q::Output> {
        self.state.read().clone()
    }

    pub fn params(&self) -> Q::Params {
        self.state.read().params.clone()
    }

    pub fn data(&self) -> Option<Q::Output> {
        self.state.read().data.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.state.read().loading
    }

    pub fn error(&self) -> Option<String> {
        self.state.read().error.clone()
    }

    /// Merge changes into the parameters. Never fetches.
    pub fn set_params(&self, update: impl FnOnce(&mut Q::Params)) {
        update(&mut self.state.write().params);
        self.notify();
    }

    /// Replace the parameters wholesale. Never fetches.
    pub fn replace_params(&self, params: Q::Params) {
        self.state.write().params = params;
        self.notify();
    }

    /// Validate the current parameters and fetch.
    ///
    /// On success the result replaces `data` and the error is cleared. On failure `data` is
    /// kept and the error is set. Either way the outcome is applied only if no newer request
    /// was started meanwhile. The returned value is this request's own outcome.
    pub async fn execute(&self) -> Result<()> {
        let params = self.params();

        if let Err(err) = Q::validate(&params) {
            tracing::debug!(resource = Q::RESOURCE.label(), error = %err, "Query rejected locally");
            self.reject(&err);
            return Err(err);
        }

        let request_id = self.begin();
        tracing::debug!(resource = Q::RESOURCE.label(), request_id, "Query started");

        match Q::fetch(self.api.as_ref(), &params).await {
            Ok(data) => {
                self.complete(request_id, params, data);
                Ok(())
            }
            Err(err) => {
                self.fail(request_id, &err);
                Err(err)
            }
        }
    }

    /// Start a request: new id, loading on, error cleared.
    pub(crate) fn begin(&self) -> u64 {
        let request_id = {
            let mut state = self.state.write();
            state.request_id += 1;
            state.loading = true;
            state.error = None;
            state.request_id
        };
        self.notify();
        request_id
    }

    /// Record a local failure. Supersedes any request still in flight.
    pub(crate) fn reject(&self, err: &AppError) {
        {
            let mut state = self.state.write();
            state.request_id += 1;
            state.loading = false;
            state.error = Some(err.user_message());
        }
        self.notify();
    }

    /// Apply a failure for `request_id`. Returns false if the request was superseded.
    pub(crate) fn fail(&self, request_id: u64, err: &AppError) -> bool {
        let applied = {
            let mut state = self.state.write();
            if state.request_id == request_id {
                state.loading = false;
                state.error = Some(err.user_message());
                true
            } else {
                false
            }
        };

        if applied {
            tracing::warn!(resource = Q::RESOURCE.label(), request_id, error = %err, "Query failed");
            self.notify();
        } else {
            tracing::debug!(resource = Q::RESOURCE.label(), request_id, "Dropping stale failure");
        }
        applied
    }

    fn complete(&self, request_id: u64, params: Q::Params, data: Q::Output) -> bool {
        let applied = {
            let mut state = self.state.write();
            if state.request_id == request_id {
                state.loading = false;
                state.error = None;
                state.data = Some(data);
                state.data_params = Some(params);
                true
            } else {
                false
            }
        };

        if applied {
            tracing::debug!(resource = Q::RESOURCE.label(), request_id, "Query succeeded");
            self.notify();
        } else {
            tracing::debug!(resource = Q::RESOURCE.label(), request_id, "Dropping stale response");
        }
        applied
    }

    fn notify(&self) {
        if self.events.try_send(AppEvent::QueryUpdated(Q::RESOURCE)).is_err() {
            tracing::trace!(resource = Q::RESOURCE.label(), "Event channel closed");
        }
    }
}

impl<Q: Query> QuerySlice<Q>
where
    Q::Params: Default,
{
    /// Put the parameters back to their defaults. Never fetches.
    pub fn reset_params(&self) {
        self.replace_params(Q::Params::default());
    }
}
