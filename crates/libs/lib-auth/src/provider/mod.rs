//! # Identity Provider Client
//!
//! Email/password accounts over the Firebase Identity Toolkit REST API.
//!
//! ## Endpoints
//!
//! ```text
//! POST {auth}/accounts:signInWithPassword?key=…   email, password          → account + tokens
//! POST {auth}/accounts:signUp?key=…               email, password          → account + tokens
//! POST {auth}/accounts:update?key=…               idToken, displayName     → account
//! POST {auth}/accounts:update?key=…               idToken, password        → account + new tokens
//! POST {auth}/accounts:lookup?key=…               idToken                  → account
//! POST {token}/token?key=…  (form)                refresh_token            → new tokens
//! ```
//!
//! Sign-out has no server endpoint for this provider: a session ends when the client
//! forgets its tokens.

use std::time::Instant;

use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::{Error, ProviderCode, Result};

/// Default Identity Toolkit base URL
pub const DEFAULT_AUTH_BASE_URL: &str = "https://identitytoolkit.googleapis.com/v1";

/// Default secure-token base URL
pub const DEFAULT_TOKEN_BASE_URL: &str = "https://securetoken.googleapis.com/v1";

/// Lifetime assumed when the provider omits `expiresIn`.
const DEFAULT_EXPIRES_IN_SECS: u64 = 3600;

/// Where and with which web key to reach the provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityConfig {
    pub api_key: String,
    pub auth_base_url: String,
    pub token_base_url: String,
}

impl IdentityConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            auth_base_url: DEFAULT_AUTH_BASE_URL.to_string(),
            token_base_url: DEFAULT_TOKEN_BASE_URL.to_string(),
        }
    }
}

/// Account fields returned by the provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountInfo {
    pub local_id: String,
    pub email: String,
    pub display_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenPair {
    pub id_token: String,
    pub refresh_token: String,
    pub expires_in: u64,
}

/// Result of a call that authenticates: who, and the tokens proving it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedIn {
    pub account: AccountInfo,
    pub tokens: TokenPair,
}

// region:    --- Wire types

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PasswordRequest<'a> {
    email: &'a str,
    password: &'a str,
    return_secure_token: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct UpdateRequest<'a> {
    id_token: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    display_name: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    password: Option<&'a str>,
    return_secure_token: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct LookupRequest<'a> {
    id_token: &'a str,
}

#[derive(Serialize)]
struct RefreshRequest<'a> {
    grant_type: &'static str,
    refresh_token: &'a str,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct AccountResponse {
    local_id: String,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    display_name: Option<String>,
    #[serde(default)]
    id_token: Option<String>,
    #[serde(default)]
    refresh_token: Option<String>,
    #[serde(default)]
    expires_in: Option<String>,
}

impl AccountResponse {
    fn account(&self) -> AccountInfo {
        AccountInfo {
            local_id: self.local_id.clone(),
            email: self.email.clone().unwrap_or_default(),
            display_name: self.display_name.clone().unwrap_or_default(),
        }
    }

    fn into_signed_in(self, status: u16) -> Result<SignedIn> {
        let account = self.account();
        let (id_token, refresh_token) = match (self.id_token, self.refresh_token) {
            (Some(id), Some(refresh)) => (id, refresh),
            _ => {
                return Err(Error::Provider {
                    status,
                    message: "response did not include tokens".to_string(),
                })
            }
        };
        Ok(SignedIn {
            account,
            tokens: TokenPair {
                id_token,
                refresh_token,
                expires_in: parse_expires_in(self.expires_in.as_deref()),
            },
        })
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct LookupResponse {
    #[serde(default)]
    users: Vec<AccountResponse>,
}

#[derive(Deserialize)]
struct RefreshResponse {
    id_token: String,
    refresh_token: String,
    #[serde(default)]
    expires_in: Option<String>,
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorDetail,
}

#[derive(Deserialize)]
struct ErrorDetail {
    message: String,
}

// endregion: --- Wire types

fn parse_expires_in(raw: Option<&str>) -> u64 {
    raw.and_then(|v| v.parse().ok()).unwrap_or(DEFAULT_EXPIRES_IN_SECS)
}

/// HTTP client for the identity provider.
#[derive(Clone)]
pub struct FirebaseAuth {
    client: Client,
    config: IdentityConfig,
}

impl FirebaseAuth {
    pub fn new(config: IdentityConfig) -> Self {
        Self::with_client(Client::new(), config)
    }

    /// Reuse an existing connection pool.
    pub fn with_client(client: Client, config: IdentityConfig) -> Self {
        Self { client, config }
    }

    /// Sign in with email and password.
    #[tracing::instrument(skip(self, password), fields(email = %email))]
    pub async fn sign_in_with_password(&self, email: &str, password: &str) -> Result<SignedIn> {
        let request = PasswordRequest {
            email,
            password,
            return_secure_token: true,
        };
        let (status, response): (u16, AccountResponse) =
            self.post_account("signInWithPassword", &request).await?;
        response.into_signed_in(status)
    }

    /// Create an email/password account. The new account has no display name yet.
    #[tracing::instrument(skip(self, password), fields(email = %email))]
    pub async fn sign_up(&self, email: &str, password: &str) -> Result<SignedIn> {
        let request = PasswordRequest {
            email,
            password,
            return_secure_token: true,
        };
        let (status, response): (u16, AccountResponse) =
            self.post_account("signUp", &request).await?;
        response.into_signed_in(status)
    }

    /// Set the display name of the account owning `id_token`.
    #[tracing::instrument(skip(self, id_token))]
    pub async fn update_profile(&self, id_token: &str, display_name: &str) -> Result<AccountInfo> {
        let request = UpdateRequest {
            id_token,
            display_name: Some(display_name),
            password: None,
            return_secure_token: false,
        };
        let (_, response): (u16, AccountResponse) =
            self.post_account("update", &request).await?;
        Ok(response.account())
    }

    /// Change the password. The provider revokes older tokens and issues new ones.
    #[tracing::instrument(skip(self, id_token, password))]
    pub async fn update_password(&self, id_token: &str, password: &str) -> Result<SignedIn> {
        let request = UpdateRequest {
            id_token,
            display_name: None,
            password: Some(password),
            return_secure_token: true,
        };
        let (status, response): (u16, AccountResponse) =
            self.post_account("update", &request).await?;
        response.into_signed_in(status)
    }

    /// Resolve the account behind an ID token. Fails if the token was revoked or expired.
    #[tracing::instrument(skip(self, id_token))]
    pub async fn lookup(&self, id_token: &str) -> Result<AccountInfo> {
        let (status, response): (u16, LookupResponse) = self
            .post_account("lookup", &LookupRequest { id_token })
            .await?;
        response
            .users
            .first()
            .map(AccountResponse::account)
            .ok_or(Error::Provider {
                status,
                message: "lookup returned no account".to_string(),
            })
    }

    /// Exchange a refresh token for a fresh ID token.
    #[tracing::instrument(skip(self, refresh_token))]
    pub async fn refresh(&self, refresh_token: &str) -> Result<TokenPair> {
        let start = Instant::now();
        let url = format!("{}/token", self.config.token_base_url);
        let response = self
            .client
            .post(url)
            .query(&[("key", self.config.api_key.as_str())])
            .form(&RefreshRequest {
                grant_type: "refresh_token",
                refresh_token,
            })
            .send()
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "Token refresh network error");
                Error::Network(e.to_string())
            })?;

        let (_, body): (u16, RefreshResponse) = handle_response(response).await?;
        tracing::debug!(duration_ms = start.elapsed().as_millis(), "Token refreshed");
        Ok(TokenPair {
            id_token: body.id_token,
            refresh_token: body.refresh_token,
            expires_in: parse_expires_in(body.expires_in.as_deref()),
        })
    }

    async fn post_account<B, R>(&self, endpoint: &str, body: &B) -> Result<(u16, R)>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let start = Instant::now();
        let url = format!("{}/accounts:{}", self.config.auth_base_url, endpoint);

        let response = self
            .client
            .post(url)
            .query(&[("key", self.config.api_key.as_str())])
            .json(body)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(endpoint, error = %e, "Identity provider network error");
                Error::Network(e.to_string())
            })?;

        let result = handle_response(response).await;
        let duration_ms = start.elapsed().as_millis();
        match &result {
            Ok((status, _)) => tracing::info!(endpoint, status, duration_ms, "Identity call succeeded"),
            Err(e) => tracing::warn!(endpoint, error = %e, duration_ms, "Identity call failed"),
        }
        result
    }
}

async fn handle_response<R: DeserializeOwned>(response: Response) -> Result<(u16, R)> {
    let status = response.status();
    let code = status.as_u16();

    if status.is_success() {
        return response
            .json::<R>()
            .await
            .map(|body| (code, body))
            .map_err(|e| Error::Provider {
                status: code,
                message: format!("Failed to parse response: {}", e),
            });
    }

    let text = response.text().await.unwrap_or_default();
    match serde_json::from_str::<ErrorEnvelope>(&text) {
        Ok(envelope) if status.is_client_error() => {
            Err(Error::Rejected(ProviderCode::parse(&envelope.error.message)))
        }
        Ok(envelope) => Err(Error::Provider {
            status: code,
            message: envelope.error.message,
        }),
        Err(_) => Err(Error::Provider {
            status: code,
            message: status
                .canonical_reason()
                .unwrap_or("unexpected response")
                .to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{StatusCode, Uri};
    use axum::response::IntoResponse;
    use axum::{Json, Router};
    use serde_json::{json, Value};

    async fn fake_provider(uri: Uri, body: String) -> axum::response::Response {
        assert!(uri.query().unwrap_or_default().contains("key=web-key"));
        let path = uri.path();

        if path.ends_with("accounts:signInWithPassword") {
            let request: Value = serde_json::from_str(&body).unwrap();
            if request["password"] == "hunter22" {
                return Json(json!({
                    "localId": "uid-1",
                    "email": request["email"],
                    "displayName": "Ada",
                    "idToken": "id-1",
                    "refreshToken": "refresh-1",
                    "expiresIn": "3600",
                    "registered": true
                }))
                .into_response();
            }
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({"error": {"code": 400, "message": "INVALID_LOGIN_CREDENTIALS"}})),
            )
                .into_response();
        }

        if path.ends_with("accounts:lookup") {
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({"error": {"code": 400, "message": "TOKEN_EXPIRED"}})),
            )
                .into_response();
        }

        if path.ends_with("/token") {
            assert!(body.contains("grant_type=refresh_token"));
            return Json(json!({
                "id_token": "id-2",
                "refresh_token": "refresh-2",
                "expires_in": "3600",
                "user_id": "uid-1"
            }))
            .into_response();
        }

        StatusCode::INTERNAL_SERVER_ERROR.into_response()
    }

    async fn spawn_provider() -> IdentityConfig {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, Router::new().fallback(fake_provider)).await.unwrap();
        });

        IdentityConfig {
            api_key: "web-key".to_string(),
            auth_base_url: format!("http://{}/v1", addr),
            token_base_url: format!("http://{}/v1", addr),
        }
    }

    #[tokio::test]
    async fn test_sign_in_success() {
        let auth = FirebaseAuth::new(spawn_provider().await);

        let signed_in = auth.sign_in_with_password("ada@example.com", "hunter22").await.unwrap();

        assert_eq!(signed_in.account.local_id, "uid-1");
        assert_eq!(signed_in.account.email, "ada@example.com");
        assert_eq!(signed_in.tokens.refresh_token, "refresh-1");
        assert_eq!(signed_in.tokens.expires_in, 3600);
    }

    #[tokio::test]
    async fn test_sign_in_wrong_password_is_rejected() {
        let auth = FirebaseAuth::new(spawn_provider().await);

        let err = auth.sign_in_with_password("ada@example.com", "nope").await.unwrap_err();

        assert!(matches!(err, Error::Rejected(ProviderCode::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_lookup_with_expired_token_ends_session() {
        let auth = FirebaseAuth::new(spawn_provider().await);

        let err = auth.lookup("stale").await.unwrap_err();

        assert!(err.is_session_rejection());
    }

    #[tokio::test]
    async fn test_refresh_uses_form_encoding() {
        let auth = FirebaseAuth::new(spawn_provider().await);

        let tokens = auth.refresh("refresh-1").await.unwrap();

        assert_eq!(tokens.id_token, "id-2");
        assert_eq!(tokens.refresh_token, "refresh-2");
    }

    #[tokio::test]
    async fn test_server_error_is_not_a_rejection() {
        let auth = FirebaseAuth::new(spawn_provider().await);

        let err = auth.sign_up("ada@example.com", "hunter22").await.unwrap_err();

        assert!(matches!(err, Error::Provider { status: 500, .. }));
    }

    #[tokio::test]
    async fn test_unreachable_provider_is_network_error() {
        let auth = FirebaseAuth::new(IdentityConfig {
            api_key: "web-key".to_string(),
            auth_base_url: "http://127.0.0.1:9/v1".to_string(),
            token_base_url: "http://127.0.0.1:9/v1".to_string(),
        });

        let err = auth.lookup("id").await.unwrap_err();

        assert!(matches!(err, Error::Network(_)));
    }
}
