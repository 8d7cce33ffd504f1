//! File-backed store.
//!
//! Persists all keys as a single JSON object at the configured path, written
//! with restricted permissions (0600) since it holds the bearer token.

use std::collections::HashMap;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::PathBuf;
use std::sync::Mutex;

use super::Store;

pub struct FileStore {
    path: PathBuf,
    // Serializes read-modify-write cycles within this process.
    lock: Mutex<()>,
}

impl FileStore {
    pub fn new(path: PathBuf) -> Self {
        FileStore {
            path,
            lock: Mutex::new(()),
        }
    }

    /// A missing or empty file reads as an empty map.
    fn load(&self) -> Result<HashMap<String, String>, String> {
        if !self.path.exists() {
            return Ok(HashMap::new());
        }
        let contents = fs::read_to_string(&self.path)
            .map_err(|e| format!("Failed to read store file {}: {}", self.path.display(), e))?;
        if contents.trim().is_empty() {
            return Ok(HashMap::new());
        }
        serde_json::from_str(&contents)
            .map_err(|e| format!("Failed to parse store file {}: {}", self.path.display(), e))
    }

    fn save(&self, entries: &HashMap<String, String>) -> Result<(), String> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .map_err(|e| format!("Failed to create directory {}: {}", parent.display(), e))?;
            }
        }

        let contents = serde_json::to_string_pretty(entries)
            .map_err(|e| format!("Failed to serialize store: {}", e))?;

        // Write with restricted permissions; the file holds the bearer token.
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            let mut file = OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .mode(0o600)
                .open(&self.path)
                .map_err(|e| format!("Failed to open {} for writing: {}", self.path.display(), e))?;
            file.write_all(contents.as_bytes())
                .map_err(|e| format!("Failed to write to {}: {}", self.path.display(), e))?;
        }

        #[cfg(not(unix))]
        {
            fs::write(&self.path, contents)
                .map_err(|e| format!("Failed to write to {}: {}", self.path.display(), e))?;
        }

        Ok(())
    }
}

impl Store for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, String> {
        let _guard = self.lock.lock().map_err(|e| e.to_string())?;
        Ok(self.load()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), String> {
        let _guard = self.lock.lock().map_err(|e| e.to_string())?;
        let mut entries = self.load()?;
        entries.insert(key.to_string(), value.to_string());
        self.save(&entries)
    }

    fn remove(&self, key: &str) -> Result<(), String> {
        let _guard = self.lock.lock().map_err(|e| e.to_string())?;
        let mut entries = self.load()?;
        if entries.remove(key).is_none() {
            return Ok(());
        }
        self.save(&entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_store() -> (tempfile::TempDir, FileStore) {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = FileStore::new(dir.path().join("store.json"));
        (dir, store)
    }

    /// Test that values round-trip through the file.
    #[test]
    fn test_file_store_roundtrip() {
        let (_dir, store) = temp_store();
        store.set("access_token", "tok-9").unwrap();
        // A fresh instance over the same path sees the persisted value.
        let reopened = FileStore::new(store.path.clone());
        assert_eq!(reopened.get("access_token"), Ok(Some("tok-9".to_string())));
    }

    /// A missing file reads as empty rather than erroring.
    #[test]
    fn test_file_store_missing_file_is_empty() {
        let (_dir, store) = temp_store();
        assert_eq!(store.get("access_token"), Ok(None));
    }

    /// Removing one key must leave the others intact.
    #[test]
    fn test_file_store_remove_is_scoped() {
        let (_dir, store) = temp_store();
        store.set("access_token", "tok").unwrap();
        store.set("finance_currency", "VND").unwrap();
        store.remove("access_token").unwrap();
        assert_eq!(store.get("access_token"), Ok(None));
        assert_eq!(store.get("finance_currency"), Ok(Some("VND".to_string())));
    }

    /// The store file must not be world-readable.
    #[cfg(unix)]
    #[test]
    fn test_file_store_permissions() {
        use std::os::unix::fs::PermissionsExt;
        let (_dir, store) = temp_store();
        store.set("access_token", "secret").unwrap();
        let mode = std::fs::metadata(&store.path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }
}
