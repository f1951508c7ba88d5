//! # Console configuration — `console.toml`
//!
//! Defines the TOML document the console keeps in browser storage (under
//! [`crate::CONFIG_KEY`]) to remember where the backend lives and how the
//! attendance dashboard should start up.
//!
//! ## Structure
//!
//! ```toml
//! [api]
//! base_url = "http://localhost:8000"
//!
//! [session]
//! redirect_delay_ms = 3000        # pause before bouncing to /login
//! revalidate_interval_secs = 30   # 0 disables periodic re-checks
//!
//! [attendance]
//! detection_threshold = 0.5
//! match_threshold = 0.6
//! tick_interval_ms = 16
//! ```
//!
//! Every section derives `Default`, so a missing or empty document is the
//! default configuration.

use serde::{Deserialize, Serialize};

/// Top-level configuration stored as `console.toml`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ConsoleConfig {
    #[serde(default)]
    pub api: ApiSection,
    #[serde(default)]
    pub session: SessionSection,
    #[serde(default)]
    pub attendance: AttendanceSection,
}

/// Backend location.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ApiSection {
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

fn default_base_url() -> String {
    "http://localhost:8000".to_string()
}

impl Default for ApiSection {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

/// Session guard timing.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SessionSection {
    /// Delay before redirecting to the login page after an auth failure.
    #[serde(default = "default_redirect_delay")]
    pub redirect_delay_ms: u32,
    /// Interval between background `/me` checks. 0 disables them.
    #[serde(default = "default_revalidate_interval")]
    pub revalidate_interval_secs: u32,
}

fn default_redirect_delay() -> u32 {
    3000
}

fn default_revalidate_interval() -> u32 {
    30
}

impl Default for SessionSection {
    fn default() -> Self {
        Self {
            redirect_delay_ms: default_redirect_delay(),
            revalidate_interval_secs: default_revalidate_interval(),
        }
    }
}

/// Initial slider positions and sampling rate for the capture loop.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AttendanceSection {
    #[serde(default = "default_detection_threshold")]
    pub detection_threshold: f32,
    #[serde(default = "default_match_threshold")]
    pub match_threshold: f32,
    #[serde(default = "default_tick_interval")]
    pub tick_interval_ms: u32,
}

fn default_detection_threshold() -> f32 {
    0.5
}

fn default_match_threshold() -> f32 {
    0.6
}

fn default_tick_interval() -> u32 {
    16
}

impl Default for AttendanceSection {
    fn default() -> Self {
        Self {
            detection_threshold: default_detection_threshold(),
            match_threshold: default_match_threshold(),
            tick_interval_ms: default_tick_interval(),
        }
    }
}

impl ConsoleConfig {
    /// Create a config pointing at the given backend.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            api: ApiSection {
                base_url: base_url.into(),
            },
            ..Self::default()
        }
    }

    /// Builder method to set the login redirect delay.
    pub fn with_redirect_delay(mut self, ms: u32) -> Self {
        self.session.redirect_delay_ms = ms;
        self
    }

    /// Builder method to set the initial slider positions.
    pub fn with_thresholds(mut self, detection: f32, matching: f32) -> Self {
        self.attendance.detection_threshold = detection.clamp(0.0, 1.0);
        self.attendance.match_threshold = matching.max(0.0);
        self
    }

    /// The well-known filename for the config document.
    pub fn filename() -> &'static str {
        "console.toml"
    }

    /// Parse from TOML string.
    pub fn from_toml(s: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(s)
    }

    /// Serialize to TOML string.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_is_default() {
        let config = ConsoleConfig::from_toml("").unwrap();
        assert_eq!(config, ConsoleConfig::default());
        assert_eq!(config.api.base_url, "http://localhost:8000");
        assert_eq!(config.session.redirect_delay_ms, 3000);
    }

    #[test]
    fn test_partial_section_keeps_other_defaults() {
        let config = ConsoleConfig::from_toml(
            r#"
            [attendance]
            match_threshold = 0.45
            "#,
        )
        .unwrap();
        assert_eq!(config.attendance.match_threshold, 0.45);
        assert_eq!(config.attendance.detection_threshold, 0.5);
        assert_eq!(config.session.revalidate_interval_secs, 30);
    }

    #[test]
    fn test_thresholds_are_clamped() {
        let config = ConsoleConfig::new("http://school.test").with_thresholds(1.7, -2.0);
        assert_eq!(config.attendance.detection_threshold, 1.0);
        assert_eq!(config.attendance.match_threshold, 0.0);
        assert_eq!(config.api.base_url, "http://school.test");
    }

    #[test]
    fn test_written_config_parses_back() {
        let config = ConsoleConfig::new("http://10.0.0.2:8000").with_redirect_delay(500);
        let text = config.to_toml().unwrap();
        assert!(text.contains("[session]"));
        assert_eq!(ConsoleConfig::from_toml(&text).unwrap(), config);
    }
}
