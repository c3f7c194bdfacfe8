//! Host process settings
//!
//! Optional TOML file configuring the host itself, separate from the user
//! configuration document. Looked up in priority order:
//! 1. `./.folio.toml` (working directory)
//! 2. `$FOLIO_HOST_CONFIG`
//! 3. `<platform config dir>/folio/host.toml`

use crate::types::FolioError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

pub const HOST_CONFIG_ENV: &str = "FOLIO_HOST_CONFIG";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HostSettings {
    /// Directory holding `config.json`
    pub config_dir: Option<PathBuf>,
    pub log_level: Option<String>,
    pub log_file: Option<PathBuf>,
}

impl HostSettings {
    /// Find and parse the first host settings file that exists. Returns
    /// defaults when there is none.
    pub fn discover() -> Result<Self, FolioError> {
        for path in Self::candidates() {
            if path.exists() {
                return Self::from_file(&path);
            }
        }

        debug!("No host settings file found");
        Ok(Self::default())
    }

    pub fn from_file(path: &Path) -> Result<Self, FolioError> {
        debug!("Loading host settings from: {}", path.display());
        let content = std::fs::read_to_string(path).map_err(|e| {
            FolioError::ConfigError(format!("Failed to read {}: {}", path.display(), e))
        })?;

        toml::from_str(&content).map_err(|e| {
            FolioError::ConfigError(format!("Failed to parse {}: {}", path.display(), e))
        })
    }

    fn candidates() -> Vec<PathBuf> {
        let mut candidates = Vec::new();

        if let Ok(cwd) = std::env::current_dir() {
            candidates.push(cwd.join(".folio.toml"));
        }

        if let Ok(config_path) = std::env::var(HOST_CONFIG_ENV) {
            candidates.push(PathBuf::from(config_path));
        }

        if let Some(config_dir) = dirs::config_dir() {
            candidates.push(config_dir.join("folio").join("host.toml"));
        }

        candidates
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_from_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("host.toml");
        std::fs::write(&path, "config_dir = \"/tmp/folio\"\nlog_level = \"debug\"\n").unwrap();

        let settings = HostSettings::from_file(&path).unwrap();
        assert_eq!(settings.config_dir, Some(PathBuf::from("/tmp/folio")));
        assert_eq!(settings.log_level.as_deref(), Some("debug"));
        assert!(settings.log_file.is_none());
    }

    #[test]
    fn test_empty_file_is_default() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("host.toml");
        std::fs::write(&path, "").unwrap();

        assert_eq!(HostSettings::from_file(&path).unwrap(), HostSettings::default());
    }

    #[test]
    fn test_invalid_toml() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("host.toml");
        std::fs::write(&path, "log_level = [").unwrap();

        let err = HostSettings::from_file(&path).unwrap_err();
        assert!(matches!(err, FolioError::ConfigError(_)));
    }
}
