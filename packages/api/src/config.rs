//! Backend location from the environment or the stored console config.

use store::ConsoleConfig;

/// Environment variable overriding the backend base URL on native builds.
pub const BASE_URL_ENV: &str = "SCHOOL_API_URL";

/// Where the REST backend lives.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiConfig {
    pub base_url: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::from_console(&ConsoleConfig::default())
    }
}

impl ApiConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: normalize_base_url(&base_url.into()),
        }
    }

    /// Use the console config's `[api]` section.
    pub fn from_console(config: &ConsoleConfig) -> Self {
        Self::new(config.api.base_url.clone())
    }

    /// `SCHOOL_API_URL` if set, otherwise the default console config.
    pub fn from_env() -> Self {
        Self::from_env_or(&ConsoleConfig::default())
    }

    /// `SCHOOL_API_URL` if set, otherwise `config`'s `[api]` section.
    pub fn from_env_or(config: &ConsoleConfig) -> Self {
        match env_base_url() {
            Some(url) => Self::new(url),
            None => Self::from_console(config),
        }
    }
}

/// Runtime variable on native builds, after loading `.env`.
#[cfg(not(target_arch = "wasm32"))]
fn env_base_url() -> Option<String> {
    dotenvy::dotenv().ok();
    std::env::var(BASE_URL_ENV)
        .ok()
        .filter(|url| !url.trim().is_empty())
}

/// Compile-time override for WASM builds: `SCHOOL_API_URL=... dx build`.
#[cfg(target_arch = "wasm32")]
fn env_base_url() -> Option<String> {
    option_env!("SCHOOL_API_URL")
        .filter(|url| !url.trim().is_empty())
        .map(str::to_string)
}

fn normalize_base_url(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trailing_slashes_removed() {
        assert_eq!(ApiConfig::new("http://localhost:8000/").base_url, "http://localhost:8000");
        assert_eq!(ApiConfig::new(" http://a.b// ").base_url, "http://a.b");
    }

    #[test]
    fn test_default_points_at_local_backend() {
        assert_eq!(ApiConfig::default().base_url, "http://localhost:8000");
    }

    #[test]
    fn test_from_console_section() {
        let config = ConsoleConfig::new("http://10.1.1.1:9000/");
        assert_eq!(ApiConfig::from_console(&config).base_url, "http://10.1.1.1:9000");
    }
}
