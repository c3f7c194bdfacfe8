//! Persistence gateway
//!
//! Loads and saves the raw configuration document. Gateways know nothing
//! about the schema; the config store does all validation and merging.

mod file;
mod memory;

pub use file::FileGateway;
pub use memory::MemoryGateway;

use crate::types::GatewayError;
use async_trait::async_trait;
use serde_json::Value;

#[async_trait]
pub trait PersistenceGateway: Send + Sync {
    /// Read the stored document. Returns [`GatewayError::NotFound`] when
    /// nothing has been stored yet.
    async fn load_raw(&self) -> Result<Value, GatewayError>;

    async fn save_raw(&self, doc: &Value) -> Result<(), GatewayError>;
}
