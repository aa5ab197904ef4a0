//! Path utilities for rigup.
//!
//! All data lives under `~/.rigup/`:
//! - `~/.rigup/config.toml` - main configuration

use std::path::PathBuf;

/// Returns the rigup home directory (`~/.rigup/`).
pub fn home_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".rigup")
}

/// Returns the default config file path (`~/.rigup/config.toml`).
pub fn default_config() -> PathBuf {
    home_dir().join("config.toml")
}

/// Ensures the rigup home directory exists.
pub fn ensure_home_dir() -> std::io::Result<()> {
    std::fs::create_dir_all(home_dir())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_are_under_rigup_home() {
        let home = home_dir();
        let config = default_config();

        assert!(home.to_string_lossy().contains(".rigup"));
        assert!(config.to_string_lossy().contains(".rigup"));
    }
}
