//! # Session store — bearer token and config persistence
//!
//! The console keeps exactly two things on the client: the bearer token
//! returned by the login endpoint and the [`ConsoleConfig`] document. Both live
//! in a flat string key/value store abstracted by [`KeyValueStore`], so the same
//! [`SessionStore`] logic runs against `localStorage` in the browser and an
//! in-memory map in tests.
//!
//! Storage errors are swallowed by the backends: an unavailable store reads as
//! "no token", which sends the user back to the login page.

use crate::config::ConsoleConfig;

/// Key under which the bearer token is stored.
pub const ACCESS_TOKEN_KEY: &str = "access_token";

/// Key under which the TOML config document is stored.
pub const CONFIG_KEY: &str = "console_config";

/// Flat string storage.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

/// Token and config access on top of a [`KeyValueStore`].
#[derive(Clone, Debug)]
pub struct SessionStore<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> SessionStore<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// The stored bearer token, if any. Blank values count as missing.
    pub fn token(&self) -> Option<String> {
        self.store
            .get(ACCESS_TOKEN_KEY)
            .filter(|t| !t.trim().is_empty())
    }

    pub fn set_token(&self, token: &str) {
        self.store.set(ACCESS_TOKEN_KEY, token);
    }

    pub fn clear_token(&self) {
        self.store.remove(ACCESS_TOKEN_KEY);
    }

    /// Read the config, falling back to defaults when missing or unparsable.
    pub fn config(&self) -> ConsoleConfig {
        let Some(text) = self.store.get(CONFIG_KEY) else {
            return ConsoleConfig::default();
        };
        match ConsoleConfig::from_toml(&text) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("Ignoring unreadable console config: {}", e);
                ConsoleConfig::default()
            }
        }
    }

    pub fn set_config(&self, config: &ConsoleConfig) {
        match config.to_toml() {
            Ok(text) => self.store.set(CONFIG_KEY, &text),
            Err(e) => tracing::error!("Failed to serialize console config: {}", e),
        }
    }
}
