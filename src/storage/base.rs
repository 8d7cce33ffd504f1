use std::sync::Arc;

use tracing::info;

use super::{file_store::FileStore, memory_store::MemoryStore};
use crate::config::{StorageBackend, StorageConfig};

/// Storage key for the persisted bearer token. At most one token is stored
/// at a time; presence does not imply validity.
pub const ACCESS_TOKEN_KEY: &str = "access_token";

/// Storage key for the display currency preference. Independent of the
/// session: never attached to requests, never cleared on logout.
pub const CURRENCY_KEY: &str = "finance_currency";

/// The Store trait abstracts durable client-side string storage under fixed
/// keys (get, set, remove). Writes are atomic per key.
pub trait Store: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, String>;
    fn set(&self, key: &str, value: &str) -> Result<(), String>;
    /// Removing an absent key succeeds.
    fn remove(&self, key: &str) -> Result<(), String>;
}

/// Creates a concrete store implementation based on the StorageConfig.
pub fn create_store(config: &StorageConfig) -> Arc<dyn Store> {
    match &config.backend {
        StorageBackend::File { path } => {
            info!("Using file store at '{}'", path.display());
            Arc::new(FileStore::new(path.clone()))
        }
        StorageBackend::Memory => {
            info!("Using in-memory store (state is lost on exit).");
            Arc::new(MemoryStore::new())
        }
    }
}
