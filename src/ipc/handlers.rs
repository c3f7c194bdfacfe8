//! Method handlers
//!
//! Every handler answers with an object carrying a `success` flag, matching
//! what the UI expects from the host. Store failures become `success: false`
//! plus a notice for the user rather than JSON-RPC errors; JSON-RPC errors are
//! reserved for unknown methods and bad parameters.

use crate::config::{default_configuration, ConfigPatch, ConfigStore};
use crate::ipc::protocol::*;
use crate::listing;
use crate::types::FolioError;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use std::path::Path;
use tracing::{debug, error, warn};

pub const METHODS: &[&str] = &[
    "initialize",
    "config/load",
    "config/get",
    "config/save",
    "config/update",
    "config/updatePassword",
    "config/verifyPassword",
    "config/checkShortcutConflict",
    "config/toggleTheme",
    "folder/read",
];

pub async fn dispatch(
    method: &str,
    params: Option<Value>,
    store: &ConfigStore,
) -> Result<Value, JsonRpcError> {
    debug!("Dispatching {}", method);

    match method {
        "initialize" => Ok(initialize()),
        "config/load" => Ok(load_config(store).await),
        "config/get" => Ok(get_config(store)),
        "config/save" => Ok(save_config(store).await),
        "config/update" => {
            let patch: ConfigPatch = parse_params(params)?;
            Ok(update_config(store, patch).await)
        }
        "config/updatePassword" => {
            let params: PasswordParams = parse_params(params)?;
            Ok(update_password(store, &params.password).await)
        }
        "config/verifyPassword" => {
            let params: PasswordParams = parse_params(params)?;
            Ok(match store.verify_password(&params.password) {
                Ok(valid) => json!({ "success": true, "valid": valid }),
                Err(e) => failure(&e),
            })
        }
        "config/checkShortcutConflict" => {
            let params: ShortcutConflictParams = parse_params(params)?;
            let result =
                store.check_shortcut_conflict(&params.shortcut, params.ignore_key.as_deref());
            Ok(match result {
                Ok(conflict) => json!({ "success": true, "conflict": conflict }),
                Err(e) => failure(&e),
            })
        }
        "config/toggleTheme" => Ok(toggle_theme(store).await),
        "folder/read" => {
            let params: ReadFolderParams = parse_params(params)?;
            Ok(read_folder(&params.path).await)
        }
        _ => Err(JsonRpcError::new(
            METHOD_NOT_FOUND,
            format!("Method not found: {}", method),
        )),
    }
}

fn initialize() -> Value {
    let server_info = ServerInfo {
        name: "folio".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    };
    json!({ "serverInfo": server_info, "methods": METHODS })
}

async fn load_config(store: &ConfigStore) -> Value {
    match store.load().await {
        Ok(config) => json!({ "success": true, "data": config }),
        Err(e) => {
            let data = store.current().unwrap_or_else(default_configuration);
            let mut result = failure(&e);
            result["data"] = json!(data);
            result
        }
    }
}

fn get_config(store: &ConfigStore) -> Value {
    match store.config() {
        Ok(config) => json!({ "success": true, "data": config }),
        Err(e) => failure(&e),
    }
}

async fn save_config(store: &ConfigStore) -> Value {
    match store.save().await {
        Ok(()) => json!({ "success": true }),
        Err(e) => failure(&e),
    }
}

async fn update_config(store: &ConfigStore, patch: ConfigPatch) -> Value {
    let result = store.update(patch).await;
    let data = store.current();
    let mut response = match result {
        Ok(()) => json!({ "success": true }),
        Err(e) => failure(&e),
    };
    if let Some(config) = data {
        response["data"] = json!(config);
    }
    response
}

async fn update_password(store: &ConfigStore, password: &str) -> Value {
    match store.update_password(password).await {
        Ok(()) => json!({ "success": true }),
        Err(e) => failure(&e),
    }
}

async fn toggle_theme(store: &ConfigStore) -> Value {
    match store.toggle_theme().await {
        Ok(theme) => json!({ "success": true, "theme": theme }),
        Err(e) => {
            let mut result = failure(&e);
            result["theme"] = json!(store.active_theme());
            result
        }
    }
}

async fn read_folder(path: &str) -> Value {
    match listing::read_folder(Path::new(path)).await {
        Ok(contents) => json!({ "success": true, "contents": contents }),
        Err(e) => {
            error!("Failed to read folder {}: {}", path, e);
            json!({ "success": false, "error": e.to_string() })
        }
    }
}

/// Failure result with the notice the UI should show, if any.
fn failure(e: &FolioError) -> Value {
    let notice = match e {
        FolioError::Load(_) => {
            warn!("{}", e);
            Some(Notice::warning(LOAD_FAILED_NOTICE))
        }
        FolioError::Save(_) => {
            error!("{}", e);
            Some(Notice::error(SAVE_FAILED_NOTICE))
        }
        _ => None,
    };

    let mut result = json!({ "success": false, "error": e.to_string() });
    if let Some(notice) = notice {
        result["notice"] = json!(notice);
    }
    result
}

fn parse_params<T: DeserializeOwned>(params: Option<Value>) -> Result<T, JsonRpcError> {
    serde_json::from_value(params.unwrap_or(Value::Null))
        .map_err(|e| JsonRpcError::new(INVALID_PARAMS, format!("Invalid params: {}", e)))
}
