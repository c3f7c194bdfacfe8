//! Typed partial updates
//!
//! A [`ConfigPatch`] names every field a caller may change. Fields left as
//! `None` keep their current value. The preset shortcut table is not
//! patchable. Custom shortcuts are overlaid key by key, so a patch can
//! rebind or add actions but never drop one. Unknown fields in a
//! deserialized patch are ignored.

use crate::config::schema::{Configuration, FolderBookmark, Theme};
use crate::credential;
use serde::Deserialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigPatch {
    pub theme: Option<Theme>,
    /// New password in plaintext. Hashed before it touches the configuration.
    pub password: Option<String>,
    pub boss_key: Option<String>,
    pub shortcuts: Option<ShortcutsPatch>,
    pub folders: Option<Vec<FolderBookmark>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ShortcutsPatch {
    /// Bindings to set; keys not named here keep their current binding.
    pub custom: Option<BTreeMap<String, String>>,
}

impl ConfigPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn theme(mut self, theme: Theme) -> Self {
        self.theme = Some(theme);
        self
    }

    pub fn password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    pub fn boss_key(mut self, boss_key: impl Into<String>) -> Self {
        self.boss_key = Some(boss_key.into());
        self
    }

    pub fn custom_shortcuts(mut self, custom: BTreeMap<String, String>) -> Self {
        self.shortcuts = Some(ShortcutsPatch {
            custom: Some(custom),
        });
        self
    }

    pub fn folders(mut self, folders: Vec<FolderBookmark>) -> Self {
        self.folders = Some(folders);
        self
    }

    /// Shallow-merge onto `config`.
    pub fn apply(self, config: &mut Configuration) {
        if let Some(theme) = self.theme {
            config.theme = theme;
        }
        if let Some(password) = self.password {
            config.password_digest = credential::hash(&password);
        }
        if let Some(boss_key) = self.boss_key {
            config.boss_key = boss_key;
        }
        if let Some(custom) = self.shortcuts.and_then(|s| s.custom) {
            config.shortcuts.custom.extend(custom);
        }
        if let Some(folders) = self.folders {
            config.folders = folders;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::defaults::{default_configuration, defaults};
    use serde_json::json;

    #[test]
    fn test_empty_patch_changes_nothing() {
        let mut config = default_configuration();
        ConfigPatch::new().apply(&mut config);
        assert_eq!(config, *defaults());
    }

    #[test]
    fn test_password_is_hashed() {
        let mut config = default_configuration();
        ConfigPatch::new().password("abc").apply(&mut config);
        assert_ne!(config.password_digest.as_str(), "abc");
        assert!(credential::verify("abc", &config.password_digest));
    }

    #[test]
    fn test_fields_applied() {
        let mut config = default_configuration();
        let folders = vec![FolderBookmark {
            name: "Photos".to_string(),
            path: "/home/me/Photos".to_string(),
        }];
        ConfigPatch::new()
            .theme(Theme::Light)
            .boss_key("ctrl+alt+b")
            .folders(folders.clone())
            .apply(&mut config);

        assert_eq!(config.theme, Theme::Light);
        assert_eq!(config.boss_key, "ctrl+alt+b");
        assert_eq!(config.folders, folders);
        assert_eq!(config.shortcuts, defaults().shortcuts);
    }

    #[test]
    fn test_custom_shortcuts_overlaid() {
        let mut config = default_configuration();
        let mut custom = BTreeMap::new();
        custom.insert("search".to_string(), "ctrl+f".to_string());
        ConfigPatch::new().custom_shortcuts(custom).apply(&mut config);

        let custom = &config.shortcuts.custom;
        assert_eq!(custom.get("search").map(String::as_str), Some("ctrl+f"));
        assert_eq!(custom.get("bossKey").map(String::as_str), Some("ctrl+shift+l"));
        assert_eq!(config.shortcuts.preset, defaults().shortcuts.preset);
    }

    #[test]
    fn test_custom_shortcut_rebound() {
        let mut config = default_configuration();
        let mut custom = BTreeMap::new();
        custom.insert("bossKey".to_string(), "ctrl+alt+b".to_string());
        ConfigPatch::new().custom_shortcuts(custom).apply(&mut config);

        assert_eq!(config.shortcuts.custom.len(), 1);
        assert_eq!(
            config.shortcuts.custom.get("bossKey").map(String::as_str),
            Some("ctrl+alt+b")
        );
    }

    #[test]
    fn test_deserialize_ignores_unknown_and_preset() {
        let patch: ConfigPatch = serde_json::from_value(json!({
            "theme": "light",
            "wallpaper": "cats.png",
            "shortcuts": { "preset": { "undo": "ctrl+u" } }
        }))
        .unwrap();

        assert_eq!(patch.theme, Some(Theme::Light));
        assert_eq!(patch.shortcuts, Some(ShortcutsPatch { custom: None }));

        let mut config = default_configuration();
        patch.apply(&mut config);
        assert_eq!(config.shortcuts.preset.undo, "ctrl+z");
    }
}
