//! In-app notices. Every success or failure the pages report lands here; the
//! newest entry is shown as a banner and the full list in the log panel.

use dioxus::prelude::*;

use crate::platform::clock_time;

/// Entries kept before the oldest are dropped.
pub const MAX_ENTRIES: usize = 200;

#[derive(Clone, Debug, PartialEq)]
pub enum LogLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Clone, Debug, PartialEq)]
pub struct LogEntry {
    pub timestamp: String,
    pub level: LogLevel,
    pub message: String,
}

#[derive(Clone, Debug, Default)]
pub struct ActivityLog {
    pub entries: Vec<LogEntry>,
    pub visible: bool,
    /// Whether the newest entry has been dismissed from the banner.
    pub dismissed: bool,
}

impl ActivityLog {
    pub fn push(&mut self, entry: LogEntry) {
        self.entries.push(entry);
        if self.entries.len() > MAX_ENTRIES {
            let excess = self.entries.len() - MAX_ENTRIES;
            self.entries.drain(..excess);
        }
        self.dismissed = false;
    }

    /// The entry the banner shows, if not dismissed.
    pub fn latest(&self) -> Option<&LogEntry> {
        if self.dismissed {
            None
        } else {
            self.entries.last()
        }
    }

    pub fn has_errors(&self) -> bool {
        self.entries.iter().any(|e| e.level == LogLevel::Error)
    }
}

pub fn use_activity_log() -> Signal<ActivityLog> {
    use_context::<Signal<ActivityLog>>()
}

/// Install the log for the subtree. Call once near the root.
pub fn use_activity_log_provider() -> Signal<ActivityLog> {
    use_context_provider(|| Signal::new(ActivityLog::default()))
}

pub fn log_activity(log: &mut Signal<ActivityLog>, level: LogLevel, message: &str) {
    match level {
        LogLevel::Error => tracing::error!("{}", message),
        LogLevel::Warning => tracing::warn!("{}", message),
        _ => tracing::info!("{}", message),
    }
    log.write().push(LogEntry {
        timestamp: clock_time(),
        level,
        message: message.to_string(),
    });
}

/// Report a failed backend call with the server's own wording.
pub fn log_api_error(log: &mut Signal<ActivityLog>, error: &api::ApiError) {
    log_activity(log, LogLevel::Error, &error.user_message());
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(level: LogLevel, message: &str) -> LogEntry {
        LogEntry {
            timestamp: "07:00:00".into(),
            level,
            message: message.into(),
        }
    }

    #[test]
    fn test_latest_follows_pushes_and_dismissal() {
        let mut log = ActivityLog::default();
        assert!(log.latest().is_none());

        log.push(entry(LogLevel::Success, "Saved"));
        assert_eq!(log.latest().map(|e| e.message.as_str()), Some("Saved"));

        log.dismissed = true;
        assert!(log.latest().is_none());

        log.push(entry(LogLevel::Error, "Could not save"));
        assert_eq!(log.latest().map(|e| e.message.as_str()), Some("Could not save"));
        assert!(log.has_errors());
    }

    #[test]
    fn test_oldest_entries_dropped() {
        let mut log = ActivityLog::default();
        for i in 0..MAX_ENTRIES + 5 {
            log.push(entry(LogLevel::Info, &i.to_string()));
        }
        assert_eq!(log.entries.len(), MAX_ENTRIES);
        assert_eq!(log.entries[0].message, "5");
    }
}
