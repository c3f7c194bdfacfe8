//! JSON file gateway

use crate::gateway::PersistenceGateway;
use crate::types::GatewayError;
use async_trait::async_trait;
use serde_json::Value;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;

pub const CONFIG_FILE_NAME: &str = "config.json";

/// Stores the document as pretty-printed JSON in `<dir>/config.json`.
pub struct FileGateway {
    path: PathBuf,
}

impl FileGateway {
    pub fn new(config_dir: impl AsRef<Path>) -> Self {
        Self {
            path: config_dir.as_ref().join(CONFIG_FILE_NAME),
        }
    }

    /// Platform config directory, e.g. `~/.config/folio` on Linux.
    pub fn default_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("folio"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl PersistenceGateway for FileGateway {
    async fn load_raw(&self) -> Result<Value, GatewayError> {
        let content = match fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No configuration file at {}", self.path.display());
                return Err(GatewayError::NotFound);
            }
            Err(e) => return Err(GatewayError::Io(e)),
        };

        debug!("Read configuration from {}", self.path.display());
        Ok(serde_json::from_str(&content)?)
    }

    async fn save_raw(&self, doc: &Value) -> Result<(), GatewayError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).await?;
        }

        let content = serde_json::to_string_pretty(doc)?;
        fs::write(&self.path, content).await?;

        debug!("Wrote configuration to {}", self.path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_missing_file_is_not_found() {
        let dir = TempDir::new().unwrap();
        let gateway = FileGateway::new(dir.path());
        let err = gateway.load_raw().await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_save_creates_parent_and_round_trips() {
        let dir = TempDir::new().unwrap();
        let gateway = FileGateway::new(dir.path().join("nested").join("folio"));

        let doc = json!({ "theme": "light", "folders": [] });
        gateway.save_raw(&doc).await.unwrap();

        assert!(gateway.path().exists());
        assert_eq!(gateway.load_raw().await.unwrap(), doc);
    }

    #[tokio::test]
    async fn test_invalid_json_is_malformed() {
        let dir = TempDir::new().unwrap();
        let gateway = FileGateway::new(dir.path());
        std::fs::write(gateway.path(), "{ theme: ").unwrap();

        let err = gateway.load_raw().await.unwrap_err();
        assert!(matches!(err, GatewayError::Malformed(_)));
    }

    #[tokio::test]
    async fn test_directory_in_place_of_file_is_io_error() {
        let dir = TempDir::new().unwrap();
        let gateway = FileGateway::new(dir.path());
        std::fs::create_dir(gateway.path()).unwrap();

        let err = gateway.load_raw().await.unwrap_err();
        assert!(matches!(err, GatewayError::Io(_)));
    }
}
