use std::path::PathBuf;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Where client-side state (bearer token, currency preference) is persisted.
#[derive(Deserialize, Serialize, Debug, JsonSchema)]
pub struct StorageConfig {
    #[serde(flatten)]
    pub backend: StorageBackend,
}

/// The available storage backends, differentiated via a "backend" tag in the
/// YAML.
#[derive(Deserialize, Serialize, Debug, JsonSchema)]
#[serde(tag = "backend", rename_all = "lowercase")]
pub enum StorageBackend {
    /// A JSON file on disk; survives restarts.
    File { path: PathBuf },
    /// Process-local only; state is lost on exit.
    Memory,
}
