//! # Session Slice
//!
//! Who is signed in, plus the account operations.
//!
//! ## Lifecycle
//!
//! ```text
//! Unknown ──restore_on_startup──► Authenticated(user) ◄──login / signup──┐
//!    │                                  │                                 │
//!    └──────────────────────────────► Anonymous ──────────────────────────┘
//!                          logout / update_password / rejected restore
//! ```
//!
//! The provider tokens behind an authenticated session never leave this slice; snapshots
//! only expose the [`User`].
//!
//! ## Failure Policy
//!
//! - A stored session the provider rejects is deleted and reported as expired.
//! - A restore that fails because the provider is unreachable leaves the stored session on
//!   disk for the next launch.
//! - `logout` always clears local state, whether or not the remote sign-out succeeds.

use std::sync::Arc;

use async_channel::Sender;
use parking_lot::RwLock;
use shared::{StoredSession, User};

use crate::app::events::AppEvent;
use crate::app::state::{SessionState, SessionStatus};
use crate::core::error::{AppError, Result};
use crate::core::service::{AuthService, SessionStore};
use crate::utils::validation::{
    require_all, validate_display_name, validate_email, validate_new_password,
};

/// Shown after a stored session was rejected.
pub const SESSION_EXPIRED: &str = "Session expired. Please log in again.";

const NOT_SIGNED_IN: &str = "You need to be logged in to do that.";

struct SessionInner {
    state: SessionState,
    credentials: Option<StoredSession>,
}

#[derive(Clone)]
pub struct SessionSlice {
    inner: Arc<RwLock<SessionInner>>,
    auth: Arc<dyn AuthService>,
    store: Arc<dyn SessionStore>,
    events: Sender<AppEvent>,
}

impl SessionSlice {
    pub fn new(auth: Arc<dyn AuthService>, store: Arc<dyn SessionStore>, events: Sender<AppEvent>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(SessionInner {
                state: SessionState::default(),
                credentials: None,
            })),
            auth,
            store,
            events,
        }
    }

    pub fn snapshot(&self) -> SessionState {
        self.inner.read().state.clone()
    }

    pub fn user(&self) -> Option<User> {
        self.inner.read().state.user().cloned()
    }

    /// Re-establish the persisted session, if any.
    #[tracing::instrument(skip(self))]
    pub async fn restore_on_startup(&self) -> Result<()> {
        self.begin();

        let stored = match self.store.load().await {
            Ok(Some(stored)) => stored,
            Ok(None) => {
                tracing::info!("No stored session");
                self.become_anonymous(None);
                return Ok(());
            }
            Err(err) => {
                tracing::warn!(error = %err, "Could not read stored session");
                self.become_anonymous(Some(err.user_message()));
                return Err(err);
            }
        };

        match self.auth.restore(&stored).await {
            Ok(session) => {
                tracing::info!(user_id = %session.user.id, "Session restored");
                self.persist(&session).await;
                self.become_authenticated(session);
                Ok(())
            }
            Err(AppError::Auth(reason)) => {
                tracing::warn!(reason = %reason, "Stored session rejected");
                if let Err(err) = self.store.clear().await {
                    tracing::warn!(error = %err, "Failed to clear rejected session");
                }
                self.become_anonymous(Some(SESSION_EXPIRED.to_string()));
                Err(AppError::Auth(SESSION_EXPIRED.to_string()))
            }
            Err(err) => {
                tracing::warn!(error = %err, "Session restore failed, keeping stored session");
                self.become_anonymous(Some(err.user_message()));
                Err(err)
            }
        }
    }

    #[tracing::instrument(skip(self, email, password), fields(email = %email))]
    pub async fn login(&self, email: &str, password: &str) -> Result<()> {
        let checked = require_all(&[email, password])
            .into_result()
            .and_then(|_| validate_email(email).into_result());
        if let Err(err) = checked {
            self.fail(&err);
            return Err(err);
        }

        self.begin();
        match self.auth.sign_in(email.trim(), password).await {
            Ok(session) => {
                tracing::info!(user_id = %session.user.id, "Logged in");
                self.persist(&session).await;
                self.become_authenticated(session);
                Ok(())
            }
            Err(err) => {
                tracing::warn!(error = %err, "Login failed");
                self.fail(&err);
                Err(err)
            }
        }
    }

    #[tracing::instrument(skip(self, email, password), fields(email = %email))]
    pub async fn signup(&self, name: &str, email: &str, password: &str) -> Result<()> {
        let checked = require_all(&[name, email, password])
            .into_result()
            .and_then(|_| validate_email(email).into_result())
            .and_then(|_| validate_display_name(name).into_result())
            .and_then(|_| validate_new_password(password).into_result());
        if let Err(err) = checked {
            self.fail(&err);
            return Err(err);
        }

        self.begin();
        match self.auth.sign_up(name.trim(), email.trim(), password).await {
            Ok(session) => {
                tracing::info!(user_id = %session.user.id, "Account created");
                self.persist(&session).await;
                self.become_authenticated(session);
                Ok(())
            }
            Err(err) => {
                tracing::warn!(error = %err, "Sign-up failed");
                self.fail(&err);
                Err(err)
            }
        }
    }

    /// Sign out and forget the session. Local state is cleared even if the provider call fails.
    #[tracing::instrument(skip(self))]
    pub async fn logout(&self) -> Result<()> {
        self.begin();

        let credentials = self.inner.read().credentials.clone();
        if let Some(session) = credentials {
            if let Err(err) = self.auth.sign_out(&session).await {
                tracing::warn!(error = %err, "Remote sign-out failed, clearing local session anyway");
            }
        }

        match self.store.clear().await {
            Ok(()) => {
                tracing::info!("Logged out");
                self.become_anonymous(None);
                Ok(())
            }
            Err(err) => {
                tracing::error!(error = %err, "Failed to clear stored session");
                self.become_anonymous(Some(err.user_message()));
                Err(err)
            }
        }
    }

    #[tracing::instrument(skip(self))]
    pub async fn update_name(&self, name: &str) -> Result<()> {
        if let Err(err) = validate_display_name(name).into_result() {
            self.fail(&err);
            return Err(err);
        }
        let session = self.require_session()?;

        self.begin();
        match self.auth.update_name(&session, name.trim()).await {
            Ok(updated) => {
                tracing::info!(user_id = %updated.user.id, "Display name updated");
                self.persist(&updated).await;
                self.update(|inner| {
                    // A logout that finished meanwhile wins.
                    if inner.credentials.is_some() {
                        inner.state.status = SessionStatus::Authenticated(updated.user.clone());
                        inner.credentials = Some(updated);
                    }
                    inner.state.loading = false;
                    inner.state.error = None;
                });
                Ok(())
            }
            Err(err) => {
                tracing::warn!(error = %err, "Display name update failed");
                self.fail(&err);
                Err(err)
            }
        }
    }

    /// Change the password, then log out.
    #[tracing::instrument(skip(self, password))]
    pub async fn update_password(&self, password: &str) -> Result<()> {
        if let Err(err) = validate_new_password(password).into_result() {
            self.fail(&err);
            return Err(err);
        }
        let session = self.require_session()?;

        self.begin();
        match self.auth.update_password(&session, password).await {
            Ok(()) => {
                tracing::info!(user_id = %session.user.id, "Password changed, ending session");
                self.logout().await
            }
            Err(err) => {
                tracing::warn!(error = %err, "Password update failed");
                self.fail(&err);
                Err(err)
            }
        }
    }

    fn require_session(&self) -> Result<StoredSession> {
        let credentials = self.inner.read().credentials.clone();
        credentials.ok_or_else(|| {
            let err = AppError::Auth(NOT_SIGNED_IN.to_string());
            self.fail(&err);
            err
        })
    }

    async fn persist(&self, session: &StoredSession) {
        if let Err(err) = self.store.save(session).await {
            tracing::warn!(error = %err, "Failed to persist session; it will not survive a restart");
        }
    }

    fn update(&self, change: impl FnOnce(&mut SessionInner)) {
        change(&mut self.inner.write());
        if self.events.try_send(AppEvent::SessionChanged).is_err() {
            tracing::trace!("Event channel closed");
        }
    }

    fn begin(&self) {
        self.update(|inner| {
            inner.state.loading = true;
            inner.state.error = None;
        });
    }

    fn fail(&self, err: &AppError) {
        self.update(|inner| {
            if inner.state.status == SessionStatus::Unknown {
                inner.state.status = SessionStatus::Anonymous;
            }
            inner.state.loading = false;
            inner.state.error = Some(err.user_message());
        });
    }

    fn become_authenticated(&self, session: StoredSession) {
        self.update(|inner| {
            inner.state.status = SessionStatus::Authenticated(session.user.clone());
            inner.state.loading = false;
            inner.state.error = None;
            inner.credentials = Some(session);
        });
    }

    fn become_anonymous(&self, error: Option<String>) {
        self.update(|inner| {
            inner.state.status = SessionStatus::Anonymous;
            inner.state.loading = false;
            inner.state.error = error;
            inner.credentials = None;
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::mocks::{session_for, MockAuth, ReadOnlyKeyValueStore};
    use crate::storage::{LocalSessionStore, MemoryKeyValueStore};

    struct Fixture {
        slice: SessionSlice,
        auth: Arc<MockAuth>,
        store: Arc<LocalSessionStore>,
    }

    fn fixture(auth: Arc<MockAuth>) -> Fixture {
        let store = Arc::new(LocalSessionStore::new(Arc::new(MemoryKeyValueStore::new())));
        let (tx, _rx) = async_channel::unbounded();
        Fixture {
            slice: SessionSlice::new(auth.clone(), store.clone(), tx),
            auth,
            store,
        }
    }

    async fn logged_in() -> Fixture {
        let fx = fixture(MockAuth::with_account("ada@example.com", "hunter22", "Ada"));
        fx.slice.login("ada@example.com", "hunter22").await.unwrap();
        fx
    }

    #[tokio::test]
    async fn test_login_authenticates_and_persists() {
        // Arrange
        let fx = fixture(MockAuth::with_account("ada@example.com", "hunter22", "Ada"));

        // Act
        fx.slice.login("ada@example.com", "hunter22").await.unwrap();

        // Assert
        let state = fx.slice.snapshot();
        assert_eq!(state.user().unwrap().email, "ada@example.com");
        assert!(!state.loading);
        assert_eq!(state.error, None);
        assert_eq!(
            fx.store.load().await.unwrap().unwrap().user.email,
            "ada@example.com"
        );
    }

    #[tokio::test]
    async fn test_invalid_credentials_leave_anonymous() {
        let fx = fixture(MockAuth::with_account("ada@example.com", "hunter22", "Ada"));

        let result = fx.slice.login("ada@example.com", "wrong-password").await;

        assert!(matches!(result, Err(AppError::Auth(_))));
        let state = fx.slice.snapshot();
        assert_eq!(state.status, SessionStatus::Anonymous);
        assert_eq!(state.error.as_deref(), Some("Invalid email or password"));
        assert!(!state.loading);
        assert_eq!(fx.store.load().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_blank_login_never_reaches_provider() {
        let fx = fixture(MockAuth::new());

        let result = fx.slice.login("ada@example.com", "").await;

        assert!(matches!(result, Err(AppError::Validation(_))));
        assert_eq!(fx.slice.snapshot().error.as_deref(), Some("All fields are required."));
        assert!(fx.auth.calls().is_empty());
    }

    #[tokio::test]
    async fn test_signup_authenticates_with_name() {
        let fx = fixture(MockAuth::new());

        fx.slice.signup(" Grace ", "grace@example.com", "hopper99").await.unwrap();

        let user = fx.slice.user().unwrap();
        assert_eq!(user.email, "grace@example.com");
        assert_eq!(user.name, "Grace");
        assert!(fx.store.load().await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_signup_duplicate_email_fails() {
        let fx = fixture(MockAuth::with_account("ada@example.com", "hunter22", "Ada"));

        let result = fx.slice.signup("Ada", "ada@example.com", "another1").await;

        assert_eq!(
            result,
            Err(AppError::Auth("An account with this email already exists".to_string()))
        );
        assert!(!fx.slice.snapshot().is_authenticated());
    }

    #[tokio::test]
    async fn test_logout_clears_state_and_store() {
        let fx = logged_in().await;

        fx.slice.logout().await.unwrap();

        let state = fx.slice.snapshot();
        assert_eq!(state.status, SessionStatus::Anonymous);
        assert_eq!(state.error, None);
        assert_eq!(fx.store.load().await.unwrap(), None);
        assert!(fx.auth.calls().contains(&"sign_out"));
    }

    #[tokio::test]
    async fn test_logout_clears_even_when_remote_sign_out_fails() {
        let fx = logged_in().await;
        *fx.auth.sign_out_error.lock() = Some(AppError::Network("offline".to_string()));

        fx.slice.logout().await.unwrap();

        assert_eq!(fx.slice.snapshot().status, SessionStatus::Anonymous);
        assert_eq!(fx.store.load().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_logout_from_unknown_state() {
        let fx = fixture(MockAuth::new());

        fx.slice.logout().await.unwrap();

        assert_eq!(fx.slice.snapshot().status, SessionStatus::Anonymous);
        assert!(!fx.auth.calls().contains(&"sign_out"));
    }

    #[tokio::test]
    async fn test_update_password_forces_logout() {
        let fx = logged_in().await;

        fx.slice.update_password("new-secret").await.unwrap();

        assert_eq!(fx.slice.snapshot().status, SessionStatus::Anonymous);
        assert_eq!(fx.store.load().await.unwrap(), None);
        assert_eq!(fx.auth.calls(), vec!["sign_in", "update_password", "sign_out"]);
    }

    #[tokio::test]
    async fn test_empty_password_update_is_rejected_locally() {
        let fx = logged_in().await;

        let result = fx.slice.update_password("").await;

        assert_eq!(result, Err(AppError::Validation("Password is required".to_string())));
        assert!(fx.slice.snapshot().is_authenticated());
        assert!(!fx.auth.calls().contains(&"update_password"));
    }

    #[tokio::test]
    async fn test_update_name() {
        let fx = logged_in().await;

        fx.slice.update_name("Ada Lovelace").await.unwrap();

        assert_eq!(fx.slice.user().unwrap().name, "Ada Lovelace");
        assert_eq!(fx.store.load().await.unwrap().unwrap().user.name, "Ada Lovelace");
    }

    #[tokio::test]
    async fn test_empty_name_is_rejected_locally() {
        let fx = logged_in().await;

        let result = fx.slice.update_name("  ").await;

        assert!(matches!(result, Err(AppError::Validation(_))));
        assert_eq!(fx.slice.user().unwrap().name, "Ada");
        assert!(!fx.auth.calls().contains(&"update_name"));
    }

    #[tokio::test]
    async fn test_update_name_requires_session() {
        let fx = fixture(MockAuth::new());

        let result = fx.slice.update_name("Ada").await;

        assert_eq!(result, Err(AppError::Auth(NOT_SIGNED_IN.to_string())));
        assert!(fx.auth.calls().is_empty());
    }

    #[tokio::test]
    async fn test_restore_without_stored_session() {
        let fx = fixture(MockAuth::new());

        fx.slice.restore_on_startup().await.unwrap();

        let state = fx.slice.snapshot();
        assert_eq!(state.status, SessionStatus::Anonymous);
        assert_eq!(state.error, None);
        assert!(fx.auth.calls().is_empty());
    }

    #[tokio::test]
    async fn test_restore_valid_session() {
        let fx = fixture(MockAuth::new());
        fx.store.save(&session_for("ada@example.com", "Ada")).await.unwrap();

        fx.slice.restore_on_startup().await.unwrap();

        assert_eq!(fx.slice.user().unwrap().email, "ada@example.com");
        assert_eq!(fx.auth.calls(), vec!["restore"]);
    }

    #[tokio::test]
    async fn test_restore_rejected_session_expires() {
        let fx = fixture(MockAuth::new());
        fx.store.save(&session_for("ada@example.com", "Ada")).await.unwrap();
        *fx.auth.restore_result.lock() = Some(Err(AppError::Auth("TOKEN_EXPIRED".to_string())));

        let result = fx.slice.restore_on_startup().await;

        assert!(result.is_err());
        let state = fx.slice.snapshot();
        assert_eq!(state.status, SessionStatus::Anonymous);
        assert_eq!(state.error.as_deref(), Some(SESSION_EXPIRED));
        assert_eq!(fx.store.load().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_restore_offline_keeps_stored_session() {
        let fx = fixture(MockAuth::new());
        let stored = session_for("ada@example.com", "Ada");
        fx.store.save(&stored).await.unwrap();
        *fx.auth.restore_result.lock() = Some(Err(AppError::Network("offline".to_string())));

        let _ = fx.slice.restore_on_startup().await;

        let state = fx.slice.snapshot();
        assert_eq!(state.status, SessionStatus::Anonymous);
        assert_eq!(
            state.error.as_deref(),
            Some("Unable to reach the server. Check your connection and try again.")
        );
        assert_eq!(fx.store.load().await.unwrap(), Some(stored));
    }

    #[tokio::test]
    async fn test_failed_password_change_keeps_session() {
        // Arrange
        let fx = logged_in().await;
        *fx.auth.update_error.lock() = Some(AppError::Network("offline".to_string()));

        // Act
        let result = fx.slice.update_password("new-secret").await;

        // Assert
        assert!(matches!(result, Err(AppError::Network(_))));
        let state = fx.slice.snapshot();
        assert_eq!(state.user().unwrap().email, "ada@example.com");
        assert!(!state.loading);
        assert_eq!(
            state.error.as_deref(),
            Some("Unable to reach the server. Check your connection and try again.")
        );
        assert!(!fx.auth.calls().contains(&"sign_out"));
        assert!(fx.store.load().await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_failed_rename_keeps_old_name() {
        let fx = logged_in().await;
        *fx.auth.update_error.lock() = Some(AppError::Network("offline".to_string()));

        let result = fx.slice.update_name("Ada Lovelace").await;

        assert!(matches!(result, Err(AppError::Network(_))));
        let state = fx.slice.snapshot();
        assert_eq!(state.user().unwrap().name, "Ada");
        assert!(!state.loading);
        assert!(state.error.is_some());
        assert_eq!(fx.store.load().await.unwrap().unwrap().user.name, "Ada");
    }

    #[tokio::test]
    async fn test_logout_with_unwritable_store_signs_out_in_memory_only() {
        // Arrange
        let auth = MockAuth::with_account("ada@example.com", "hunter22", "Ada");
        let store = Arc::new(LocalSessionStore::new(Arc::new(ReadOnlyKeyValueStore::default())));
        let (tx, _rx) = async_channel::unbounded();
        let slice = SessionSlice::new(auth.clone(), store.clone(), tx);
        slice.login("ada@example.com", "hunter22").await.unwrap();

        // Act
        let result = slice.logout().await;

        // Assert
        assert!(matches!(result, Err(AppError::Storage(_))));
        let state = slice.snapshot();
        assert_eq!(state.status, SessionStatus::Anonymous);
        assert!(state.error.is_some());
        assert!(auth.calls().contains(&"sign_out"));
        // The stored copy outlives the failed delete and comes back on the next start.
        assert!(store.load().await.unwrap().is_some());
    }
}
