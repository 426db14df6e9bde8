//! Persistent key/value storage for the handful of values the client keeps
//! on-device: browser localStorage on wasm, files under the platform data
//! dir on native.

#[cfg(target_arch = "wasm32")]
use once_cell::sync::Lazy;
#[cfg(target_arch = "wasm32")]
use std::collections::HashMap;
#[cfg(target_arch = "wasm32")]
use std::sync::Mutex;

#[cfg(not(target_arch = "wasm32"))]
use anyhow::Context;
#[cfg(not(target_arch = "wasm32"))]
use std::{fs, path::PathBuf};

/// The single fixed key the bearer token lives under.
pub const TOKEN_KEY: &str = "doit_auth_token";

/// In-memory fallback for wasm contexts without a window (tests, workers).
#[cfg(target_arch = "wasm32")]
static MEMORY_STORE: Lazy<Mutex<HashMap<String, String>>> =
    Lazy::new(|| Mutex::new(HashMap::new()));

#[cfg(not(target_arch = "wasm32"))]
fn storage_dir() -> PathBuf {
    if let Some(data_dir) = dirs::data_local_dir() {
        return data_dir.join("doit");
    }
    PathBuf::from("cache").join("doit")
}

#[cfg(not(target_arch = "wasm32"))]
fn key_path(key: &str) -> PathBuf {
    storage_dir().join(sanitize_key(key))
}

/// Sanitize storage key for filesystem use
fn sanitize_key(key: &str) -> String {
    key.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .take(64)
        .collect()
}

#[cfg(not(target_arch = "wasm32"))]
pub fn get(key: &str) -> Option<String> {
    fs::read_to_string(key_path(key)).ok()
}

#[cfg(target_arch = "wasm32")]
pub fn get(key: &str) -> Option<String> {
    if let Some(storage) = browser_storage() {
        return storage.get_item(key).ok().flatten();
    }
    let store = MEMORY_STORE.lock().ok()?;
    store.get(key).cloned()
}

#[cfg(not(target_arch = "wasm32"))]
pub fn set(key: &str, value: &str) -> anyhow::Result<()> {
    let dir = storage_dir();
    fs::create_dir_all(&dir).with_context(|| format!("creating {}", dir.display()))?;
    let path = key_path(key);
    fs::write(&path, value).with_context(|| format!("writing {}", path.display()))
}

#[cfg(target_arch = "wasm32")]
pub fn set(key: &str, value: &str) -> anyhow::Result<()> {
    if let Some(storage) = browser_storage() {
        return storage
            .set_item(key, value)
            .map_err(|_| anyhow::anyhow!("browser storage rejected write for {key}"));
    }
    let mut store = MEMORY_STORE
        .lock()
        .map_err(|_| anyhow::anyhow!("storage fallback poisoned"))?;
    store.insert(key.to_string(), value.to_string());
    Ok(())
}

#[cfg(not(target_arch = "wasm32"))]
pub fn remove(key: &str) {
    let path = key_path(key);
    if path.exists() {
        if let Err(err) = fs::remove_file(&path) {
            tracing::warn!("failed to remove {}: {err}", path.display());
        }
    }
}

#[cfg(target_arch = "wasm32")]
pub fn remove(key: &str) {
    if let Some(storage) = browser_storage() {
        let _ = storage.remove_item(key);
        return;
    }
    if let Ok(mut store) = MEMORY_STORE.lock() {
        store.remove(key);
    }
}

#[cfg(target_arch = "wasm32")]
fn browser_storage() -> Option<web_sys::Storage> {
    web_sys::window().and_then(|window| window.local_storage().ok().flatten())
}

/// Handle for the persisted bearer token. Deliberately an injected object
/// rather than free functions so callers are explicit about touching the
/// shared credential.
#[derive(Clone, Copy, Debug, Default)]
pub struct TokenStore;

impl TokenStore {
    pub fn get(&self) -> Option<String> {
        get(TOKEN_KEY)
    }

    pub fn set(&self, token: &str) {
        if let Err(err) = set(TOKEN_KEY, token) {
            tracing::error!("failed to persist auth token: {err}");
        }
    }

    pub fn clear(&self) {
        remove(TOKEN_KEY);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_key() {
        assert_eq!(sanitize_key("doit_auth_token"), "doit_auth_token");
        assert_eq!(sanitize_key("user:preferences"), "user_preferences");
        assert_eq!(sanitize_key("../escape"), "___escape");
    }
}
