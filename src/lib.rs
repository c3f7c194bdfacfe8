//! Folio - host process for a desktop file browser
//!
//! Keeps the user's settings (theme, password digest, shortcuts, folder
//! bookmarks) in a persisted configuration store and exposes it, together
//! with folder listing, to the UI process over a JSON-RPC stdio channel.

pub mod config;
pub mod credential;
pub mod gateway;
pub mod ipc;
pub mod listing;
pub mod types;

pub use config::{ConfigPatch, ConfigStore, Configuration};
pub use gateway::{FileGateway, MemoryGateway, PersistenceGateway};
pub use ipc::IpcServer;
pub use types::{FolioError, GatewayError};
