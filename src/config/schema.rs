//! Configuration schema types

use crate::credential::PasswordDigest;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Dark => "dark",
            Theme::Light => "light",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "dark" => Some(Theme::Dark),
            "light" => Some(Theme::Light),
            _ => None,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Built-in shortcuts. The key set is fixed; values come from defaults and
/// may be overlaid by a persisted document, but keys are never added or
/// removed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PresetShortcuts {
    pub open_folder: String,
    pub exit: String,
    pub undo: String,
    pub redo: String,
    pub cut: String,
    pub copy: String,
    pub paste: String,
}

impl PresetShortcuts {
    /// Action names as they appear in the persisted document.
    pub const KEYS: [&'static str; 7] = [
        "openFolder",
        "exit",
        "undo",
        "redo",
        "cut",
        "copy",
        "paste",
    ];

    pub fn get(&self, key: &str) -> Option<&str> {
        let value = match key {
            "openFolder" => &self.open_folder,
            "exit" => &self.exit,
            "undo" => &self.undo,
            "redo" => &self.redo,
            "cut" => &self.cut,
            "copy" => &self.copy,
            "paste" => &self.paste,
            _ => return None,
        };
        Some(value)
    }

    /// Overwrite a known action. Unknown keys are rejected so the key set
    /// stays fixed.
    pub fn set(&mut self, key: &str, value: String) -> bool {
        let slot = match key {
            "openFolder" => &mut self.open_folder,
            "exit" => &mut self.exit,
            "undo" => &mut self.undo,
            "redo" => &mut self.redo,
            "cut" => &mut self.cut,
            "copy" => &mut self.copy,
            "paste" => &mut self.paste,
            _ => return false,
        };
        *slot = value;
        true
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> + '_ {
        Self::KEYS
            .into_iter()
            .filter_map(move |key| self.get(key).map(|value| (key, value)))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shortcuts {
    pub preset: PresetShortcuts,
    pub custom: BTreeMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FolderBookmark {
    pub name: String,
    pub path: String,
}

/// The live application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Configuration {
    pub theme: Theme,
    pub password_digest: PasswordDigest,
    pub boss_key: String,
    pub shortcuts: Shortcuts,
    pub folders: Vec<FolderBookmark>,
}

impl Configuration {
    /// Project onto the subset that is written to durable storage.
    pub fn persisted(&self) -> PersistedDocument<'_> {
        PersistedDocument {
            theme: self.theme,
            password_digest: &self.password_digest,
            boss_key: &self.boss_key,
            shortcuts: &self.shortcuts,
            folders: &self.folders,
        }
    }
}

/// The save-safe projection of a [`Configuration`].
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedDocument<'a> {
    pub theme: Theme,
    pub password_digest: &'a PasswordDigest,
    pub boss_key: &'a str,
    pub shortcuts: &'a Shortcuts,
    pub folders: &'a [FolderBookmark],
}

impl PersistedDocument<'_> {
    pub fn to_value(&self) -> serde_json::Result<serde_json::Value> {
        serde_json::to_value(self)
    }
}
