//! # Local Storage
//!
//! - [`kv`]: persistent string map (JSON file on disk, or in memory)
//! - [`session_store`]: the [`SessionStore`](crate::core::service::SessionStore) built on it

pub mod kv;
pub mod session_store;

pub use kv::{FileKeyValueStore, KeyValueStore, MemoryKeyValueStore};
pub use session_store::{LocalSessionStore, SESSION_KEY};

/// File name of the store inside the data directory.
pub const STORE_FILE: &str = "store.json";
