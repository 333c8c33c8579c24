use serde::{Deserialize, Serialize};

/// Identity of the signed-in user, as kept in the session slice and on disk.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    /// Opaque identifier issued by the identity provider
    pub id: String,
    pub email: String,
    /// Display name, empty when the account never set one
    #[serde(default)]
    pub name: String,
}

/// Persisted form of a session: the user plus the provider tokens needed to restore it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct StoredSession {
    pub user: User,
    pub id_token: String,
    pub refresh_token: String,
}
