//! IPC host: the boundary between the UI process and the host

pub mod handlers;
pub mod protocol;
pub mod server;

pub use protocol::{Notice, NoticeLevel};
pub use server::IpcServer;
