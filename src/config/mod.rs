//! Configuration loading
//!
//! Reads `~/.config/notepilot/config.toml`. Missing files and invalid TOML
//! fall back to defaults so the panel always starts.

use std::path::{Path, PathBuf};

mod types;

pub use types::{BackendConfig, Config, ModelsConfig};

/// Default config file location
pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("notepilot").join("config.toml"))
}

/// Load configuration from the default location
pub fn load() -> Config {
    match config_path() {
        Some(path) => load_from(&path),
        None => Config::default(),
    }
}

/// Load configuration from a specific path, falling back to defaults
pub fn load_from(path: &Path) -> Config {
    match std::fs::read_to_string(path) {
        Ok(content) => toml::from_str(&content).unwrap_or_else(|e| {
            log::warn!("invalid config {}: {e}", path.display());
            Config::default()
        }),
        Err(_) => Config::default(),
    }
}
