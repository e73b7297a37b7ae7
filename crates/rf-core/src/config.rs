//! Configuration types and parsing for ruleforge.yml

use crate::error::{CoreError, CoreResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main project configuration from ruleforge.yml
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Project name
    pub name: String,

    /// Artifact store settings
    #[serde(default)]
    pub store: StoreConfig,

    /// Generation backend settings
    #[serde(default)]
    pub backend: BackendConfig,

    /// Pipeline behaviour settings
    #[serde(default)]
    pub generation: GenerationConfig,
}

/// Artifact store settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StoreConfig {
    /// Path to the DuckDB database file
    #[serde(default = "default_store_path")]
    pub path: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: default_store_path(),
        }
    }
}

/// Generation backend settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BackendConfig {
    /// Base URL of the text-generation service
    #[serde(default = "default_backend_url")]
    pub url: String,

    /// Model identifier passed to the backend
    #[serde(default = "default_model")]
    pub model: String,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Maximum attempts per generation call (first try included)
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// Sampling temperature
    #[serde(default = "default_temperature")]
    pub temperature: f64,

    /// Token generation cap
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            url: default_backend_url(),
            model: default_model(),
            timeout_secs: default_timeout_secs(),
            max_attempts: default_max_attempts(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
        }
    }
}

/// Pipeline behaviour settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GenerationConfig {
    /// How many times a validation failure triggers a fresh generation
    /// before the run aborts
    #[serde(default = "default_validation_retries")]
    pub validation_retries: u32,

    /// Priority label written on new artifacts
    #[serde(default = "default_priority")]
    pub default_priority: String,

    /// Status label written on new artifacts
    #[serde(default = "default_status")]
    pub default_status: String,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            validation_retries: default_validation_retries(),
            default_priority: default_priority(),
            default_status: default_status(),
        }
    }
}

fn default_store_path() -> String {
    "target/artifacts.duckdb".to_string()
}

fn default_backend_url() -> String {
    "http://localhost:11434".to_string()
}

fn default_model() -> String {
    "mistral:7b-instruct-q4_0".to_string()
}

fn default_timeout_secs() -> u64 {
    60
}

fn default_max_attempts() -> u32 {
    3
}

fn default_temperature() -> f64 {
    0.2
}

fn default_max_tokens() -> u32 {
    500
}

fn default_validation_retries() -> u32 {
    1
}

fn default_priority() -> String {
    "Medium".to_string()
}

fn default_status() -> String {
    "Pending".to_string()
}

impl Config {
    /// Load configuration from a YAML file.
    pub fn load(path: &Path) -> CoreResult<Self> {
        if !path.exists() {
            return Err(CoreError::ConfigNotFound {
                path: path.display().to_string(),
            });
        }

        let content = std::fs::read_to_string(path)?;
        let config: Config =
            serde_yaml::from_str(&content).map_err(|e| CoreError::ConfigParseError {
                message: e.to_string(),
            })?;
        config.validate()?;
        Ok(config)
    }

    /// Sanity-check values serde cannot express.
    pub fn validate(&self) -> CoreResult<()> {
        if self.name.trim().is_empty() {
            return Err(CoreError::ConfigInvalid {
                message: "project name is empty".to_string(),
            });
        }
        if self.backend.max_attempts == 0 {
            return Err(CoreError::ConfigInvalid {
                message: "backend.max_attempts must be at least 1".to_string(),
            });
        }
        if self.backend.timeout_secs == 0 {
            return Err(CoreError::ConfigInvalid {
                message: "backend.timeout_secs must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_minimal_config_applies_defaults() {
        let config: Config = serde_yaml::from_str("name: migration_qa\n").unwrap();
        assert_eq!(config.store.path, "target/artifacts.duckdb");
        assert_eq!(config.backend.url, "http://localhost:11434");
        assert_eq!(config.backend.max_attempts, 3);
        assert_eq!(config.backend.timeout_secs, 60);
        assert_eq!(config.generation.validation_retries, 1);
        assert_eq!(config.generation.default_status, "Pending");
    }

    #[test]
    fn test_unknown_field_rejected() {
        let result = serde_yaml::from_str::<Config>("name: x\nbogus: 1\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_overrides() {
        let yaml = r#"
name: migration_qa
backend:
  url: http://10.0.0.5:11434
  model: llama3
  max_attempts: 5
generation:
  validation_retries: 2
  default_priority: High
"#;
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.backend.model, "llama3");
        assert_eq!(config.backend.max_attempts, 5);
        assert_eq!(config.generation.default_priority, "High");
    }

    #[test]
    fn test_zero_attempts_invalid() {
        let config: Config = serde_yaml::from_str("name: x\nbackend:\n  max_attempts: 0\n").unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_missing_file() {
        let err = Config::load(Path::new("/nonexistent/ruleforge.yml")).unwrap_err();
        assert!(matches!(err, CoreError::ConfigNotFound { .. }));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ruleforge.yml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "name: migration_qa").unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.name, "migration_qa");
    }
}
