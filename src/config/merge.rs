//! Merge a raw persisted document onto the defaults
//!
//! The document is untrusted JSON. Each field is taken from the document when
//! it is present and has the right shape, otherwise the default is kept.
//! Nothing in here fails: a wrongly shaped document is treated as a partial
//! one.
//!
//! `folders` keeps the loaded array's order, but entries that are not a
//! `{name, path}` pair of strings are dropped (with a warning) rather than
//! carried along untyped.

use crate::config::defaults::default_configuration;
use crate::config::schema::{Configuration, FolderBookmark, Theme};
use crate::credential::{self, PasswordDigest};
use serde_json::{Map, Value};
use tracing::{debug, warn};

/// Key older documents kept the digest under.
const LEGACY_PASSWORD_KEY: &str = "password";

pub fn merge_onto_defaults(raw: &Value) -> Configuration {
    let mut config = default_configuration();

    let Some(doc) = raw.as_object() else {
        warn!("Configuration document is not an object, using defaults");
        return config;
    };

    if let Some(value) = doc.get("theme") {
        match value.as_str().and_then(Theme::parse) {
            Some(theme) => config.theme = theme,
            None => warn!("Ignoring invalid theme value: {}", value),
        }
    }

    if let Some(digest) = merge_digest(doc) {
        config.password_digest = digest;
    }

    if let Some(value) = doc.get("bossKey") {
        match value.as_str() {
            Some(boss_key) => config.boss_key = boss_key.to_string(),
            None => warn!("Ignoring non-string bossKey"),
        }
    }

    if let Some(shortcuts) = doc.get("shortcuts").and_then(Value::as_object) {
        if let Some(preset) = shortcuts.get("preset").and_then(Value::as_object) {
            for (key, value) in preset {
                let Some(combo) = value.as_str() else {
                    warn!("Ignoring non-string preset shortcut '{}'", key);
                    continue;
                };
                if !config.shortcuts.preset.set(key, combo.to_string()) {
                    debug!("Dropping unknown preset shortcut '{}'", key);
                }
            }
        }

        if let Some(custom) = shortcuts.get("custom").and_then(Value::as_object) {
            for (key, value) in custom {
                match value.as_str() {
                    Some(combo) => {
                        config
                            .shortcuts
                            .custom
                            .insert(key.clone(), combo.to_string());
                    }
                    None => warn!("Ignoring non-string custom shortcut '{}'", key),
                }
            }
        }
    }

    if let Some(folders) = doc.get("folders").and_then(Value::as_array) {
        config.folders = folders
            .iter()
            .filter_map(|entry| {
                let folder = serde_json::from_value::<FolderBookmark>(entry.clone()).ok();
                if folder.is_none() {
                    warn!("Skipping malformed folder bookmark: {}", entry);
                }
                folder
            })
            .collect();
    }

    config
}

fn merge_digest(doc: &Map<String, Value>) -> Option<PasswordDigest> {
    if let Some(value) = doc.get("passwordDigest") {
        let digest = value.as_str().and_then(PasswordDigest::from_hex);
        if digest.is_none() {
            warn!("Ignoring malformed passwordDigest");
        }
        return digest;
    }

    // Older documents stored the digest under `password`, and the very first
    // bootstrap wrote the default secret there in plaintext.
    let legacy = doc.get(LEGACY_PASSWORD_KEY)?.as_str()?;
    match PasswordDigest::from_hex(legacy) {
        Some(digest) => Some(digest),
        None => {
            warn!("Found plaintext legacy password in configuration, storing its digest instead");
            Some(credential::hash(legacy))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::defaults::{defaults, DEFAULT_PASSWORD};
    use serde_json::json;

    #[test]
    fn test_empty_document_is_defaults() {
        assert_eq!(merge_onto_defaults(&json!({})), *defaults());
    }

    #[test]
    fn test_theme_only() {
        let config = merge_onto_defaults(&json!({ "theme": "light" }));
        assert_eq!(config.theme, Theme::Light);

        let mut expected = defaults().clone();
        expected.theme = Theme::Light;
        assert_eq!(config, expected);
    }

    #[test]
    fn test_non_object_document() {
        assert_eq!(merge_onto_defaults(&json!([1, 2, 3])), *defaults());
        assert_eq!(merge_onto_defaults(&Value::Null), *defaults());
    }

    #[test]
    fn test_wrong_shapes_fall_back_per_field() {
        let config = merge_onto_defaults(&json!({
            "theme": "purple",
            "bossKey": 42,
            "passwordDigest": "not-a-digest",
            "shortcuts": "nope",
            "folders": { "name": "x" }
        }));
        assert_eq!(config, *defaults());
    }

    #[test]
    fn test_preset_merged_key_by_key() {
        let config = merge_onto_defaults(&json!({
            "shortcuts": {
                "preset": { "undo": "ctrl+u", "teleport": "ctrl+t", "copy": 1 }
            }
        }));
        let preset = &config.shortcuts.preset;
        assert_eq!(preset.undo, "ctrl+u");
        assert_eq!(preset.copy, "ctrl+c");
        assert_eq!(preset.open_folder, "ctrl+o");
        assert_eq!(preset.iter().count(), 7);
        assert!(preset.get("teleport").is_none());
    }

    #[test]
    fn test_custom_merged_over_defaults() {
        let config = merge_onto_defaults(&json!({
            "shortcuts": { "custom": { "search": "ctrl+f" } }
        }));
        let custom = &config.shortcuts.custom;
        assert_eq!(custom.get("search").map(String::as_str), Some("ctrl+f"));
        assert_eq!(custom.get("bossKey").map(String::as_str), Some("ctrl+shift+l"));
    }

    #[test]
    fn test_missing_preset_keeps_defaults() {
        let config = merge_onto_defaults(&json!({
            "shortcuts": { "custom": { "bossKey": "ctrl+b" } }
        }));
        assert_eq!(config.shortcuts.preset, defaults().shortcuts.preset);
        assert_eq!(
            config.shortcuts.custom.get("bossKey").map(String::as_str),
            Some("ctrl+b")
        );
    }

    #[test]
    fn test_folders_keep_order_and_drop_malformed() {
        let config = merge_onto_defaults(&json!({
            "folders": [
                { "name": "b", "path": "/b" },
                { "name": "a", "path": "/a" },
                { "name": "broken" }
            ]
        }));
        let names: Vec<&str> = config.folders.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["b", "a"]);
    }

    #[test]
    fn test_digest_adopted() {
        let digest = credential::hash("s3cret");
        let config = merge_onto_defaults(&json!({ "passwordDigest": digest.as_str() }));
        assert_eq!(config.password_digest, digest);
    }

    #[test]
    fn test_legacy_plaintext_password_is_hashed() {
        let config = merge_onto_defaults(&json!({ "theme": "dark", "password": "123456" }));
        assert_ne!(config.password_digest.as_str(), "123456");
        assert!(credential::verify(DEFAULT_PASSWORD, &config.password_digest));
    }

    #[test]
    fn test_legacy_digest_adopted() {
        let digest = credential::hash("legacy");
        let config = merge_onto_defaults(&json!({ "password": digest.as_str() }));
        assert_eq!(config.password_digest, digest);
    }

    #[test]
    fn test_digest_field_wins_over_legacy() {
        let digest = credential::hash("new");
        let config = merge_onto_defaults(&json!({
            "passwordDigest": digest.as_str(),
            "password": "old"
        }));
        assert_eq!(config.password_digest, digest);
    }
}
