//! Per-user paths for rulelens.
//!
//! - `~/.rulelens/config.toml` - fallback configuration

use std::path::PathBuf;

/// Returns the rulelens home directory (`~/.rulelens/`).
pub fn home_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".rulelens")
}

/// Returns the per-user config file path (`~/.rulelens/config.toml`).
pub fn default_config() -> PathBuf {
    home_dir().join("config.toml")
}
