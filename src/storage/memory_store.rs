use std::collections::HashMap;
use std::sync::Mutex;

use super::Store;

/// A process-local store backed by a mutex-guarded map. Nothing survives
/// exit; used by tests and ephemeral runs.
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        MemoryStore {
            entries: Mutex::new(HashMap::new()),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl Store for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, String> {
        let entries = self.entries.lock().map_err(|e| e.to_string())?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), String> {
        let mut entries = self.entries.lock().map_err(|e| e.to_string())?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), String> {
        let mut entries = self.entries.lock().map_err(|e| e.to_string())?;
        entries.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Test that set/get round-trips and remove clears the key.
    #[test]
    fn test_memory_store_roundtrip() {
        let store = MemoryStore::new();
        assert_eq!(store.get("access_token"), Ok(None));
        store.set("access_token", "tok-1").unwrap();
        assert_eq!(store.get("access_token"), Ok(Some("tok-1".to_string())));
        store.remove("access_token").unwrap();
        assert_eq!(store.get("access_token"), Ok(None));
    }

    /// Removing a key that was never set must succeed.
    #[test]
    fn test_memory_store_remove_absent() {
        let store = MemoryStore::new();
        assert!(store.remove("nothing_here").is_ok());
    }
}
