//! Built-in default configuration
//!
//! Every runtime configuration starts as a clone of this value.

use crate::config::schema::{Configuration, PresetShortcuts, Shortcuts, Theme};
use crate::credential;
use std::collections::BTreeMap;
use std::sync::LazyLock;

/// Secret whose digest ships as the default password.
pub const DEFAULT_PASSWORD: &str = "123456";

pub const DEFAULT_BOSS_KEY: &str = "ctrl+shift+l";

static DEFAULTS: LazyLock<Configuration> = LazyLock::new(build_defaults);

/// Shared, never-mutated defaults.
pub fn defaults() -> &'static Configuration {
    &DEFAULTS
}

/// A fresh copy of the defaults.
pub fn default_configuration() -> Configuration {
    DEFAULTS.clone()
}

fn build_defaults() -> Configuration {
    let mut custom = BTreeMap::new();
    custom.insert("bossKey".to_string(), DEFAULT_BOSS_KEY.to_string());

    Configuration {
        theme: Theme::Dark,
        password_digest: credential::hash(DEFAULT_PASSWORD),
        boss_key: DEFAULT_BOSS_KEY.to_string(),
        shortcuts: Shortcuts {
            preset: preset_shortcuts(),
            custom,
        },
        folders: Vec::new(),
    }
}

fn preset_shortcuts() -> PresetShortcuts {
    PresetShortcuts {
        open_folder: "ctrl+o".to_string(),
        exit: "alt+f4".to_string(),
        undo: "ctrl+z".to_string(),
        redo: "ctrl+y".to_string(),
        cut: "ctrl+x".to_string(),
        copy: "ctrl+c".to_string(),
        paste: "ctrl+v".to_string(),
    }
}
