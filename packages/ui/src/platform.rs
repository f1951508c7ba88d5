//! Platform glue shared by every page.
//!
//! - **Web** (WASM + `web` feature): token and config live in `localStorage`
//!   via [`store::LocalStorageStore`]; navigation sets `window.location`.
//! - **Native** (tests, tooling): a process-wide [`store::MemoryStore`];
//!   navigation is only logged.

use std::time::Duration;

use api::{ApiClient, ApiConfig};
use store::{ConsoleConfig, SessionStore};

/// Where every failed session check ends up.
pub const LOGIN_PATH: &str = "/login";

/// Session store for the current platform.
pub fn make_session_store() -> SessionStore<impl store::KeyValueStore> {
    #[cfg(all(target_arch = "wasm32", feature = "web"))]
    {
        SessionStore::new(store::LocalStorageStore::new())
    }
    #[cfg(not(all(target_arch = "wasm32", feature = "web")))]
    {
        static MEMORY: std::sync::OnceLock<store::MemoryStore> = std::sync::OnceLock::new();
        SessionStore::new(MEMORY.get_or_init(store::MemoryStore::new).clone())
    }
}

/// Stored config, falling back to defaults.
pub fn console_config() -> ConsoleConfig {
    make_session_store().config()
}

/// Client for the configured backend, carrying the stored token if any.
pub fn make_client() -> ApiClient {
    client_for(&make_session_store())
}

fn client_for(session: &SessionStore<impl store::KeyValueStore>) -> ApiClient {
    let client = ApiClient::new(&ApiConfig::from_env_or(&session.config()));
    match session.token() {
        Some(token) => client.with_token(token),
        None => client,
    }
}

/// Full page navigation, dropping all in-memory state.
pub fn redirect(path: &str) {
    tracing::info!("Redirecting to {}", path);
    #[cfg(target_arch = "wasm32")]
    {
        if let Some(window) = web_sys::window() {
            if let Err(e) = window.location().set_href(path) {
                tracing::error!("Failed to navigate to {}: {:?}", path, e);
            }
        }
    }
}

pub async fn sleep(duration: Duration) {
    #[cfg(target_arch = "wasm32")]
    gloo_timers::future::sleep(duration).await;
    #[cfg(not(target_arch = "wasm32"))]
    tokio::time::sleep(duration).await;
}

/// Wall-clock time as `HH:MM:SS`, local time.
pub fn clock_time() -> String {
    chrono::Local::now().format("%H:%M:%S").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_follows_session_token() {
        let memory = store::MemoryStore::new();
        let writer = SessionStore::new(memory.clone());
        let reader = SessionStore::new(memory);

        writer.set_token("shared");
        assert_eq!(reader.token().as_deref(), Some("shared"));
        assert_eq!(client_for(&reader).token(), Some("shared"));

        writer.clear_token();
        assert!(client_for(&reader).token().is_none());
    }

    #[test]
    fn test_clock_time_shape() {
        let t = clock_time();
        assert_eq!(t.len(), 8);
        assert_eq!(t.as_bytes()[2], b':');
    }
}
