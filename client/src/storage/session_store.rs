//! # Session Store
//!
//! Persists the signed-in user's [`StoredSession`] under a single key.

use std::sync::Arc;

use async_trait::async_trait;
use shared::StoredSession;

use super::kv::KeyValueStore;
use crate::core::error::{AppError, Result};
use crate::core::service::SessionStore;

/// Key the session is stored under.
pub const SESSION_KEY: &str = "authSession";

pub struct LocalSessionStore {
    store: Arc<dyn KeyValueStore>,
}

impl LocalSessionStore {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl SessionStore for LocalSessionStore {
    async fn save(&self, session: &StoredSession) -> Result<()> {
        let value = serde_json::to_string(session)
            .map_err(|e| AppError::Storage(format!("Failed to encode session: {}", e)))?;
        self.store.set(SESSION_KEY, &value).await
    }

    async fn load(&self) -> Result<Option<StoredSession>> {
        let Some(raw) = self.store.get(SESSION_KEY).await? else {
            return Ok(None);
        };

        match serde_json::from_str::<StoredSession>(&raw) {
            Ok(session) => Ok(Some(session)),
            Err(e) => {
                tracing::warn!(error = %e, "Stored session is unreadable, discarding it");
                self.store.remove(SESSION_KEY).await?;
                Ok(None)
            }
        }
    }

    async fn clear(&self) -> Result<()> {
        self.store.remove(SESSION_KEY).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::kv::MemoryKeyValueStore;
    use shared::User;

    fn session() -> StoredSession {
        StoredSession {
            user: User {
                id: "uid-1".to_string(),
                email: "ada@example.com".to_string(),
                name: "Ada".to_string(),
            },
            id_token: "id".to_string(),
            refresh_token: "refresh".to_string(),
        }
    }

    #[tokio::test]
    async fn test_save_load_clear() {
        let store = LocalSessionStore::new(Arc::new(MemoryKeyValueStore::new()));

        store.save(&session()).await.unwrap();
        assert_eq!(store.load().await.unwrap(), Some(session()));

        store.clear().await.unwrap();
        assert_eq!(store.load().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_unreadable_session_is_discarded() {
        let kv = Arc::new(MemoryKeyValueStore::new());
        kv.set(SESSION_KEY, "{\"user\":").await.unwrap();
        let store = LocalSessionStore::new(kv.clone());

        assert_eq!(store.load().await.unwrap(), None);
        assert_eq!(kv.get(SESSION_KEY).await.unwrap(), None);
    }
}
