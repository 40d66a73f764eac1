use anyhow::{Context, Result};
use fairplay_core::SessionConfig;
use std::path::{Path, PathBuf};

pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("fairplay")
        .join("config.json")
}

/// Load the session config.
///
/// An explicit path must exist. Without one, the default location is used if
/// present, otherwise built-in defaults.
pub fn load_config(path: Option<&Path>) -> Result<SessionConfig> {
    match path {
        Some(path) => read_config(path),
        None => {
            let path = default_config_path();
            if path.exists() {
                read_config(&path)
            } else {
                tracing::debug!("No config at {}, using defaults", path.display());
                Ok(SessionConfig::default())
            }
        }
    }
}

fn read_config(path: &Path) -> Result<SessionConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    let config = SessionConfig::from_json(&content)
        .with_context(|| format!("Invalid config {}", path.display()))?;

    tracing::debug!("Loaded config from {}", path.display());
    Ok(config)
}
