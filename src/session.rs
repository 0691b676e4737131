//! Per-client conversation identity.
//!
//! The backend keeps all conversation state server-side, keyed by a token
//! the client generates once and reuses across visits. Native builds keep
//! the token in a file under the platform data directory; wasm builds fall
//! back to an in-process map, which matches the lifetime of a browser tab.

use std::time::{SystemTime, UNIX_EPOCH};
use uuid::Uuid;

#[cfg(not(target_arch = "wasm32"))]
use std::{
    fs,
    path::{Path, PathBuf},
};

#[cfg(target_arch = "wasm32")]
use once_cell::sync::Lazy;
#[cfg(target_arch = "wasm32")]
use std::sync::Mutex;

const SESSION_FILE: &str = "chat_session_id";

/// Tokens have no expiry or rotation; they live until storage is cleared.
#[cfg(not(target_arch = "wasm32"))]
pub struct SessionStore {
    root: PathBuf,
}

#[cfg(not(target_arch = "wasm32"))]
impl SessionStore {
    pub fn open_default() -> Self {
        let root = dirs::data_local_dir()
            .map(|dir| dir.join("vancare"))
            .unwrap_or_else(|| PathBuf::from("cache").join("vancare"));
        Self { root }
    }

    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Returns the stored token unchanged, or generates, persists, and
    /// returns a fresh one. A token that fails to persist is still valid
    /// for the current run.
    pub fn load_or_create(&self) -> String {
        let path = self.root.join(SESSION_FILE);
        if let Ok(existing) = fs::read_to_string(&path) {
            let trimmed = existing.trim();
            if !trimmed.is_empty() {
                return trimmed.to_string();
            }
        }

        let token = generate_session_token();
        if let Err(err) = persist_token(&self.root, &path, &token) {
            tracing::warn!("failed to persist session token: {err}");
        }
        token
    }

    pub fn clear(&self) {
        let path = self.root.join(SESSION_FILE);
        if path.exists()
            && let Err(err) = fs::remove_file(&path)
        {
            tracing::warn!("failed to clear session token: {err}");
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn persist_token(root: &Path, path: &Path, token: &str) -> std::io::Result<()> {
    fs::create_dir_all(root)?;
    fs::write(path, token)
}

#[cfg(target_arch = "wasm32")]
static SESSION_TOKEN: Lazy<Mutex<Option<String>>> = Lazy::new(|| Mutex::new(None));

#[cfg(target_arch = "wasm32")]
pub struct SessionStore;

#[cfg(target_arch = "wasm32")]
impl SessionStore {
    pub fn open_default() -> Self {
        Self
    }

    pub fn load_or_create(&self) -> String {
        let mut slot = SESSION_TOKEN.lock().expect("session store poisoned");
        slot.get_or_insert_with(generate_session_token).clone()
    }

    pub fn clear(&self) {
        let mut slot = SESSION_TOKEN.lock().expect("session store poisoned");
        *slot = None;
    }
}

fn generate_session_token() -> String {
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis();
    format!("session_{}_{}", millis, Uuid::new_v4().simple())
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;

    fn scratch_store() -> SessionStore {
        let root = std::env::temp_dir()
            .join("vancare-session-tests")
            .join(Uuid::new_v4().simple().to_string());
        SessionStore::with_root(root)
    }

    #[test]
    fn repeated_loads_return_the_same_token() {
        let store = scratch_store();
        let first = store.load_or_create();
        let second = store.load_or_create();
        assert_eq!(first, second);
        store.clear();
    }

    #[test]
    fn clearing_storage_yields_a_fresh_token() {
        let store = scratch_store();
        let first = store.load_or_create();
        store.clear();
        let second = store.load_or_create();
        assert_ne!(first, second);
        store.clear();
    }

    #[test]
    fn tokens_carry_the_session_prefix() {
        assert!(generate_session_token().starts_with("session_"));
    }
}
