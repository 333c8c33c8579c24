//! # Application State Types
//!
//! Snapshots of slice state. Slices keep these behind `Arc<RwLock<_>>` and hand out clones;
//! nothing outside a slice mutates them.

use shared::User;

/// Where the session stands.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SessionStatus {
    /// Startup restore has not finished yet
    #[default]
    Unknown,
    Anonymous,
    Authenticated(User),
}

/// Session slice snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SessionState {
    pub status: SessionStatus,
    pub loading: bool,
    /// Message of the last failed operation, cleared when the next one starts
    pub error: Option<String>,
}

impl SessionState {
    pub fn user(&self) -> Option<&User> {
        match &self.status {
            SessionStatus::Authenticated(user) => Some(user),
            _ => None,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.user().is_some()
    }
}

/// Query slice snapshot.
///
/// `data` always belongs to `data_params`, which may differ from `params` while the user
/// edits the form or a request is in flight.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryState<P, T> {
    /// Parameters the next request will use
    pub params: P,
    /// Result of the last successful request
    pub data: Option<T>,
    /// Parameters that produced `data`
    pub data_params: Option<P>,
    pub loading: bool,
    pub error: Option<String>,
    /// Id of the newest request; responses carrying an older id are dropped
    pub(crate) request_id: u64,
}

impl<P, T> QueryState<P, T> {
    pub fn new(params: P) -> Self {
        Self {
            params,
            data: None,
            data_params: None,
            loading: false,
            error: None,
            request_id: 0,
        }
    }

    /// Id of the newest request issued by this slice.
    pub fn request_id(&self) -> u64 {
        self.request_id
    }
}
