//! Configuration subsystem
//!
//! - `schema`: the shape of the user configuration
//! - `defaults`: built-in values every configuration starts from
//! - `merge`: overlaying a persisted document onto the defaults
//! - `patch`: typed partial updates
//! - `store`: the live, persisted configuration
//! - `host`: settings for the host process itself

mod defaults;
mod host;
mod merge;
mod patch;
mod schema;
mod store;

pub use defaults::{default_configuration, defaults, DEFAULT_BOSS_KEY, DEFAULT_PASSWORD};
pub use host::{HostSettings, HOST_CONFIG_ENV};
pub use merge::merge_onto_defaults;
pub use patch::{ConfigPatch, ShortcutsPatch};
pub use schema::{
    Configuration, FolderBookmark, PersistedDocument, PresetShortcuts, Shortcuts, Theme,
};
pub use store::ConfigStore;
