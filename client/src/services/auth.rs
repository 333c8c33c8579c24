//! # Identity Service
//!
//! [`AuthService`] over the Firebase identity provider from `lib-auth`.
//!
//! The provider speaks in accounts and token pairs; the rest of the client only knows
//! [`User`] and [`StoredSession`]. This module does that translation and decides when a
//! stored ID token needs refreshing before it is used.

use async_trait::async_trait;
use lib_auth::{AccountInfo, FirebaseAuth, IdentityConfig, ProviderCode, SignedIn};
use shared::{StoredSession, User};

use crate::core::error::{AppError, Result};
use crate::core::service::AuthService;

/// A stored ID token this close to expiry is refreshed before use.
pub const EXPIRY_LEEWAY_SECS: i64 = 60;

/// Identity service backed by Firebase email/password accounts.
#[derive(Clone)]
pub struct FirebaseAuthService {
    auth: FirebaseAuth,
}

impl FirebaseAuthService {
    pub fn new(config: IdentityConfig) -> Self {
        Self {
            auth: FirebaseAuth::new(config),
        }
    }

    /// Share a connection pool with other HTTP clients.
    pub fn with_client(client: reqwest::Client, config: IdentityConfig) -> Self {
        Self {
            auth: FirebaseAuth::with_client(client, config),
        }
    }
}

fn user_from(account: AccountInfo) -> User {
    User {
        id: account.local_id,
        email: account.email,
        name: account.display_name,
    }
}

/// During restore only a refused credential is an [`AppError::Auth`]; throttling and other
/// refusals leave the stored session usable and come back as [`AppError::Api`].
fn restore_error(err: lib_auth::Error) -> AppError {
    if err.is_session_rejection() {
        return err.into();
    }
    match err {
        lib_auth::Error::Rejected(code) => AppError::Api {
            status: if code == ProviderCode::TooManyAttempts { 429 } else { 400 },
            message: code.message(),
        },
        other => other.into(),
    }
}

fn session_from(signed_in: SignedIn) -> StoredSession {
    StoredSession {
        user: user_from(signed_in.account),
        id_token: signed_in.tokens.id_token,
        refresh_token: signed_in.tokens.refresh_token,
    }
}

#[async_trait]
impl AuthService for FirebaseAuthService {
    async fn sign_in(&self, email: &str, password: &str) -> Result<StoredSession> {
        let signed_in = self.auth.sign_in_with_password(email, password).await?;
        Ok(session_from(signed_in))
    }

    async fn sign_up(&self, name: &str, email: &str, password: &str) -> Result<StoredSession> {
        let signed_in = self.auth.sign_up(email, password).await?;
        let account = self
            .auth
            .update_profile(&signed_in.tokens.id_token, name)
            .await?;

        let mut session = session_from(signed_in);
        session.user.name = account.display_name;
        Ok(session)
    }

    async fn sign_out(&self, session: &StoredSession) -> Result<()> {
        // Provider sessions are bearer tokens; dropping them locally is the whole sign-out.
        tracing::info!(user_id = %session.user.id, "Signed out");
        Ok(())
    }

    async fn restore(&self, session: &StoredSession) -> Result<StoredSession> {
        let mut restored = session.clone();

        if lib_auth::is_expired(&session.id_token, EXPIRY_LEEWAY_SECS) {
            tracing::debug!(user_id = %session.user.id, "Stored ID token expired, refreshing");
            let tokens = self
                .auth
                .refresh(&session.refresh_token)
                .await
                .map_err(restore_error)?;
            restored.id_token = tokens.id_token;
            restored.refresh_token = tokens.refresh_token;
        }

        let account = self
            .auth
            .lookup(&restored.id_token)
            .await
            .map_err(restore_error)?;
        restored.user = user_from(account);
        Ok(restored)
    }

    async fn update_name(&self, session: &StoredSession, name: &str) -> Result<StoredSession> {
        let account = self.auth.update_profile(&session.id_token, name).await?;

        let mut updated = session.clone();
        updated.user.name = account.display_name;
        Ok(updated)
    }

    async fn update_password(&self, session: &StoredSession, password: &str) -> Result<()> {
        self.auth.update_password(&session.id_token, password).await?;
        Ok(())
    }
}
