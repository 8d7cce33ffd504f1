use figment::providers::{Format, Yaml};
use figment::Figment;
use schemars::{schema_for, JsonSchema};
use serde::{Deserialize, Serialize};

use super::logging::LoggingConfig;
use super::storage::StorageConfig;

/// A top-level enum for versioned configurations.
#[derive(Deserialize, Serialize, JsonSchema)]
#[serde(tag = "version")]
pub enum Config {
    #[serde(rename = "1.0.0")]
    ConfigV1(ClientConfigV1),
}

/// Main config for v1.0.0: backend API address, client-side storage, logging.
#[derive(Deserialize, Serialize, Debug, JsonSchema)]
pub struct ClientConfigV1 {
    pub api: ApiConfig,
    pub store: StorageConfig,
    pub logging: LoggingConfig,
}

/// Where the backend lives and how long we wait for it.
#[derive(Deserialize, Serialize, Debug, Clone, JsonSchema)]
pub struct ApiConfig {
    /// Base URL of the REST backend, without a trailing slash.
    pub base_url: String,
    /// Bound on every outgoing request. Exceeding it surfaces as a timeout
    /// failure to the caller, never as an auth failure.
    #[serde(default = "default_timeout_in_ms")]
    pub timeout_in_ms: u64,
}

fn default_timeout_in_ms() -> u64 {
    10_000
}

/// Load config from a YAML file named "config.yaml" in the current directory.
pub fn load_config() -> ClientConfigV1 {
    let figment = Figment::new().merge(Yaml::file("./config.yaml"));
    let config = match figment.extract::<Config>() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Error loading configuration: {}", e);
            std::process::exit(1);
        }
    };
    match config {
        Config::ConfigV1(c) => c,
    }
}

/// Print the JSON schema for the configuration to stdout.
pub fn print_schema() {
    let schema = schema_for!(Config);
    println!("{}", serde_json::to_string_pretty(&schema).unwrap());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StorageBackend;

    /// Test that a full YAML document parses into the v1 config.
    #[test]
    fn test_config_parses_from_yaml() {
        let yaml = r#"
version: "1.0.0"
api:
  base_url: "http://localhost:8000"
  timeout_in_ms: 5000
store:
  backend: file
  path: "moneta-store.json"
logging:
  level: debug
  format: console
"#;
        let figment = Figment::new().merge(Yaml::string(yaml));
        let config = figment.extract::<Config>().expect("config should parse");
        let Config::ConfigV1(config) = config;
        assert_eq!(config.api.base_url, "http://localhost:8000");
        assert_eq!(config.api.timeout_in_ms, 5000);
        assert!(matches!(config.store.backend, StorageBackend::File { .. }));
    }

    /// The request timeout defaults to 10 seconds when omitted.
    #[test]
    fn test_timeout_defaults_to_ten_seconds() {
        let yaml = r#"
version: "1.0.0"
api:
  base_url: "http://localhost:8000"
store:
  backend: memory
logging:
  level: info
  format: json
"#;
        let figment = Figment::new().merge(Yaml::string(yaml));
        let Config::ConfigV1(config) = figment.extract::<Config>().expect("config should parse");
        assert_eq!(config.api.timeout_in_ms, 10_000);
    }
}
