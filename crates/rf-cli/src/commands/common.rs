//! Shared helpers for command implementations.

use anyhow::{Context, Result};
use rf_core::Config;
use rf_store::ArtifactDb;
use std::path::Path;

/// Load the project configuration named by the global `--config` flag.
pub fn load_config(config_path: &str) -> Result<Config> {
    Config::load(Path::new(config_path))
        .with_context(|| format!("Failed to load config from {}", config_path))
}

/// Open the artifact store at the configured path, creating parent
/// directories as needed.
pub fn open_store(config: &Config) -> Result<ArtifactDb> {
    let path = Path::new(&config.store.path);
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
    }
    ArtifactDb::open(path).with_context(|| format!("Failed to open store at {}", path.display()))
}
