use std::path::PathBuf;
use thiserror::Error;

/// Failures reported by a persistence gateway.
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("Configuration document not found")]
    NotFound,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed configuration document: {0}")]
    Malformed(#[from] serde_json::Error),
}

impl GatewayError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, GatewayError::NotFound)
    }
}

#[derive(Error, Debug)]
pub enum FolioError {
    #[error("Configuration store is not loaded")]
    NotLoaded,

    #[error("Failed to load configuration: {0}")]
    Load(#[source] GatewayError),

    #[error("Failed to save configuration: {0}")]
    Save(#[source] GatewayError),

    #[error("Invalid folder path: {0}")]
    InvalidPath(PathBuf),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, FolioError>;
