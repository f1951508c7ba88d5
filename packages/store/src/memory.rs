use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::session::KeyValueStore;

/// In-memory KeyValueStore for testing and native fallback.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.lock().ok()?.get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.insert(key.to_string(), value.to_string());
        }
    }

    fn remove(&self, key: &str) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.remove(key);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConsoleConfig;
    use crate::session::{SessionStore, CONFIG_KEY};

    #[test]
    fn test_token_lifecycle() {
        let session = SessionStore::new(MemoryStore::new());

        // Initially empty
        assert!(session.token().is_none());

        session.set_token("abc.def.ghi");
        assert_eq!(session.token().as_deref(), Some("abc.def.ghi"));

        session.clear_token();
        assert!(session.token().is_none());
    }

    #[test]
    fn test_blank_token_counts_as_missing() {
        let session = SessionStore::new(MemoryStore::new());
        session.set_token("   ");
        assert!(session.token().is_none());
    }

    #[test]
    fn test_clones_share_entries() {
        let store = MemoryStore::new();
        let a = SessionStore::new(store.clone());
        let b = SessionStore::new(store);

        a.set_token("shared");
        assert_eq!(b.token().as_deref(), Some("shared"));
    }

    #[test]
    fn test_config_roundtrip() {
        let session = SessionStore::new(MemoryStore::new());

        // Default config when nothing is stored
        assert_eq!(session.config(), ConsoleConfig::default());

        let config = ConsoleConfig::new("http://192.168.1.20:8000").with_redirect_delay(1000);
        session.set_config(&config);

        let loaded = session.config();
        assert_eq!(loaded.api.base_url, "http://192.168.1.20:8000");
        assert_eq!(loaded.session.redirect_delay_ms, 1000);
    }

    #[test]
    fn test_garbage_config_falls_back_to_default() {
        let store = MemoryStore::new();
        store.set(CONFIG_KEY, "this is [not toml");
        let session = SessionStore::new(store);
        assert_eq!(session.config(), ConsoleConfig::default());
    }

    #[test]
    fn test_clearing_token_keeps_config() {
        let session = SessionStore::new(MemoryStore::new());
        session.set_config(&ConsoleConfig::new("http://keep.me"));
        session.set_token("t");

        session.clear_token();

        assert_eq!(session.config().api.base_url, "http://keep.me");
    }
}
