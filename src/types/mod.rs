//! Shared error types

mod errors;

pub use errors::{FolioError, GatewayError, Result};
