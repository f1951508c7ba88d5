//! # localStorage key/value store — browser-side persistence
//!
//! [`LocalStorageStore`] is the [`KeyValueStore`] used on the web platform. It
//! writes into `window.localStorage`, optionally prefixing every key so several
//! consoles on the same origin do not trample each other.
//!
//! All methods swallow errors (private browsing, quota, missing window): reads
//! return `None` and writes are dropped with a log line.

use crate::session::KeyValueStore;

/// `window.localStorage`-backed KeyValueStore for the web platform.
#[derive(Clone, Debug, Default)]
pub struct LocalStorageStore {
    prefix: Option<String>,
}

impl LocalStorageStore {
    /// Store using bare keys (`"access_token"`).
    pub fn new() -> Self {
        Self::default()
    }

    /// Store whose keys are prefixed: `Some("school")` → `"school:access_token"`.
    pub fn with_prefix(prefix: Option<&str>) -> Self {
        Self {
            prefix: prefix.map(str::to_string),
        }
    }

    fn key(&self, key: &str) -> String {
        match &self.prefix {
            Some(p) => format!("{p}:{key}"),
            None => key.to_string(),
        }
    }

    fn storage(&self) -> Option<web_sys::Storage> {
        web_sys::window()?.local_storage().ok().flatten()
    }
}

impl KeyValueStore for LocalStorageStore {
    fn get(&self, key: &str) -> Option<String> {
        self.storage()?.get_item(&self.key(key)).ok().flatten()
    }

    fn set(&self, key: &str, value: &str) {
        let Some(storage) = self.storage() else {
            tracing::warn!("localStorage unavailable, dropping write to {}", key);
            return;
        };
        if storage.set_item(&self.key(key), value).is_err() {
            tracing::warn!("localStorage rejected write to {}", key);
        }
    }

    fn remove(&self, key: &str) {
        if let Some(storage) = self.storage() {
            let _ = storage.remove_item(&self.key(key));
        }
    }
}
