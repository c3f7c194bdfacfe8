//! In-memory gateway with failure injection

use crate::gateway::PersistenceGateway;
use crate::types::GatewayError;
use async_trait::async_trait;
use serde_json::Value;
use std::io;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use tokio::sync::Mutex;

#[derive(Default)]
pub struct MemoryGateway {
    document: Mutex<Option<Value>>,
    fail_loads: AtomicBool,
    fail_saves: AtomicBool,
    saves: AtomicUsize,
}

impl MemoryGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_document(doc: Value) -> Self {
        Self {
            document: Mutex::new(Some(doc)),
            ..Self::default()
        }
    }

    /// Current stored document, if any.
    pub async fn document(&self) -> Option<Value> {
        self.document.lock().await.clone()
    }

    pub fn set_fail_loads(&self, fail: bool) {
        self.fail_loads.store(fail, Ordering::SeqCst);
    }

    pub fn set_fail_saves(&self, fail: bool) {
        self.fail_saves.store(fail, Ordering::SeqCst);
    }

    /// Number of successful writes.
    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PersistenceGateway for MemoryGateway {
    async fn load_raw(&self) -> Result<Value, GatewayError> {
        if self.fail_loads.load(Ordering::SeqCst) {
            return Err(GatewayError::Io(io::Error::new(
                io::ErrorKind::PermissionDenied,
                "injected load failure",
            )));
        }
        self.document
            .lock()
            .await
            .clone()
            .ok_or(GatewayError::NotFound)
    }

    async fn save_raw(&self, doc: &Value) -> Result<(), GatewayError> {
        if self.fail_saves.load(Ordering::SeqCst) {
            return Err(GatewayError::Io(io::Error::new(
                io::ErrorKind::PermissionDenied,
                "injected save failure",
            )));
        }
        *self.document.lock().await = Some(doc.clone());
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
