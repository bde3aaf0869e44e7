//! Subcommand implementations.

pub mod config;
pub mod extract;
pub mod tables;

use std::path::PathBuf;

use docfield_core::ExtractConfig;

/// Where the configuration comes from: `--config`, or the default file if it exists.
pub fn config_source(config_path: Option<&str>) -> Option<PathBuf> {
    match config_path {
        Some(path) => Some(PathBuf::from(path)),
        None => Some(config::default_config_path()).filter(|path| path.exists()),
    }
}

/// Load the configuration from its source, or defaults when there is none.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<ExtractConfig> {
    match config_source(config_path) {
        Some(path) => ExtractConfig::from_file(&path)
            .map_err(|e| anyhow::anyhow!("Failed to read config {}: {}", path.display(), e)),
        None => Ok(ExtractConfig::default()),
    }
}
