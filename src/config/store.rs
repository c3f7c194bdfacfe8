//! Configuration store
//!
//! Holds the live [`Configuration`] for the lifetime of the host process.
//! The store starts out unloaded; [`ConfigStore::load`] pulls the persisted
//! document through the gateway and merges it onto the defaults. Every
//! mutation is followed by a full save.
//!
//! State lives in a `watch` channel, so readers can either poll
//! [`ConfigStore::current`] or [`ConfigStore::subscribe`] for changes.
//! Concurrent updates are not serialized; the last write wins.

use crate::config::defaults::default_configuration;
use crate::config::merge::merge_onto_defaults;
use crate::config::patch::ConfigPatch;
use crate::config::schema::{Configuration, Theme};
use crate::credential;
use crate::gateway::PersistenceGateway;
use crate::types::{FolioError, GatewayError, Result};
use serde_json::Value;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, error, info, warn};

pub struct ConfigStore {
    gateway: Arc<dyn PersistenceGateway>,

    /// `None` until the first load
    current: watch::Sender<Option<Configuration>>,

    /// Theme attribute the presentation layer renders with
    theme: watch::Sender<Theme>,
}

impl ConfigStore {
    pub fn new(gateway: Arc<dyn PersistenceGateway>) -> Self {
        let (current, _) = watch::channel(None);
        let (theme, _) = watch::channel(Theme::default());

        Self {
            gateway,
            current,
            theme,
        }
    }

    /// Load the persisted configuration.
    ///
    /// A missing document is not an error: the defaults are written out and
    /// returned. Any other failure is returned to the caller after the
    /// defaults have been put in place in memory, without persisting them.
    pub async fn load(&self) -> Result<Configuration> {
        match self.gateway.load_raw().await {
            Ok(raw) => {
                let config = merge_onto_defaults(&raw);
                info!(
                    "Loaded configuration ({} folders, {} custom shortcuts)",
                    config.folders.len(),
                    config.shortcuts.custom.len()
                );
                self.install(config.clone());
                self.theme.send_replace(config.theme);
                Ok(config)
            }
            Err(GatewayError::NotFound) => {
                info!("No configuration found, writing defaults");
                let config = default_configuration();
                let doc = config.persisted().to_value()?;

                if let Err(e) = self.gateway.save_raw(&doc).await {
                    warn!("Failed to write default configuration: {}", e);
                    self.fall_back_to_defaults();
                    return Err(FolioError::Load(e));
                }

                self.install(config.clone());
                self.theme.send_replace(config.theme);
                Ok(config)
            }
            Err(e) => {
                warn!("Failed to load configuration: {}", e);
                self.fall_back_to_defaults();
                Err(FolioError::Load(e))
            }
        }
    }

    /// Write the current configuration. The in-memory state is kept even
    /// when the write fails.
    pub async fn save(&self) -> Result<()> {
        let doc = self.persisted_document()?;

        self.gateway.save_raw(&doc).await.map_err(|e| {
            error!("Failed to save configuration: {}", e);
            FolioError::Save(e)
        })?;

        debug!("Configuration saved");
        Ok(())
    }

    /// Apply a partial update and save.
    pub async fn update(&self, patch: ConfigPatch) -> Result<()> {
        let theme = patch.theme;
        if patch.password.is_some() {
            info!("Updating password");
        }

        let applied = self.current.send_if_modified(|current| match current {
            Some(config) => {
                patch.apply(config);
                true
            }
            None => false,
        });
        if !applied {
            return Err(FolioError::NotLoaded);
        }

        if let Some(theme) = theme {
            self.theme.send_replace(theme);
        }

        self.save().await
    }

    pub async fn update_password(&self, new_password: &str) -> Result<()> {
        self.update(ConfigPatch::new().password(new_password)).await
    }

    /// Flip between dark and light and persist the choice.
    pub async fn toggle_theme(&self) -> Result<Theme> {
        let theme = self.read(|config| config.theme)?.toggled();
        self.update(ConfigPatch::new().theme(theme)).await?;
        Ok(theme)
    }

    pub fn verify_password(&self, candidate: &str) -> Result<bool> {
        self.read(|config| credential::verify(candidate, &config.password_digest))
    }

    /// Whether `candidate` is already bound.
    ///
    /// Preset bindings always count. Custom bindings count unless their key
    /// is `ignore_key`, so a shortcut can be reassigned to itself. Combos are
    /// compared as exact strings; callers must normalize them first.
    pub fn check_shortcut_conflict(
        &self,
        candidate: &str,
        ignore_key: Option<&str>,
    ) -> Result<bool> {
        self.read(|config| {
            let shortcuts = &config.shortcuts;
            if shortcuts.preset.iter().any(|(_, combo)| combo == candidate) {
                return true;
            }
            shortcuts
                .custom
                .iter()
                .filter(|(key, _)| Some(key.as_str()) != ignore_key)
                .any(|(_, combo)| combo == candidate)
        })
    }

    pub fn is_loaded(&self) -> bool {
        self.current.borrow().is_some()
    }

    /// Snapshot of the current configuration, `None` before loading.
    pub fn current(&self) -> Option<Configuration> {
        self.current.borrow().clone()
    }

    pub fn config(&self) -> Result<Configuration> {
        self.current().ok_or(FolioError::NotLoaded)
    }

    pub fn subscribe(&self) -> watch::Receiver<Option<Configuration>> {
        self.current.subscribe()
    }

    pub fn active_theme(&self) -> Theme {
        *self.theme.borrow()
    }

    pub fn subscribe_theme(&self) -> watch::Receiver<Theme> {
        self.theme.subscribe()
    }

    fn install(&self, config: Configuration) {
        self.current.send_replace(Some(config));
    }

    fn fall_back_to_defaults(&self) {
        // A failed reload keeps whatever is already in memory.
        if !self.is_loaded() {
            self.install(default_configuration());
        }
    }

    fn read<T>(&self, f: impl FnOnce(&Configuration) -> T) -> Result<T> {
        let current = self.current.borrow();
        current.as_ref().map(f).ok_or(FolioError::NotLoaded)
    }

    fn persisted_document(&self) -> Result<Value> {
        let current = self.current.borrow();
        let config = current.as_ref().ok_or(FolioError::NotLoaded)?;
        Ok(config.persisted().to_value()?)
    }
}
