use dioxus::prelude::*;

use crate::activity_log::{use_activity_log, LogLevel};

const ACTIVITY_LOG_CSS: Asset = asset!("/assets/styling/activity_log.css");

fn level_class(level: &LogLevel) -> &'static str {
    match level {
        LogLevel::Error => "error",
        LogLevel::Warning => "warning",
        LogLevel::Success => "success",
        LogLevel::Info => "info",
    }
}

/// The newest notice, shown until dismissed or replaced.
#[component]
pub fn NoticeBanner() -> Element {
    let mut log = use_activity_log();
    let Some(entry) = log().latest().cloned() else {
        return rsx! {};
    };
    let class = level_class(&entry.level);

    rsx! {
        document::Stylesheet { href: ACTIVITY_LOG_CSS }
        div {
            class: "notice-banner {class}",
            role: "alert",
            span { "{entry.message}" }
            button {
                class: "notice-dismiss",
                onclick: move |_| log.write().dismissed = true,
                "×"
            }
        }
    }
}

#[component]
pub fn ActivityLogPanel() -> Element {
    let mut log = use_activity_log();

    if !log().visible {
        return rsx! {};
    }

    let entries = log().entries.clone();

    rsx! {
        document::Stylesheet { href: ACTIVITY_LOG_CSS }

        div {
            class: "activity-log-panel",
            div {
                class: "activity-log-header",
                span { "Notices" }
                div {
                    class: "activity-log-header-actions",
                    button {
                        onclick: move |_| log.write().entries.clear(),
                        "Clear"
                    }
                    button {
                        onclick: move |_| log.write().visible = false,
                        "Close"
                    }
                }
            }
            div {
                class: "activity-log-entries",
                for entry in entries.iter().rev() {
                    div {
                        class: format!("activity-log-entry {}", level_class(&entry.level)),
                        span { class: "activity-log-time", "{entry.timestamp}" }
                        span { " {entry.message}" }
                    }
                }
            }
        }
    }
}

#[component]
pub fn ActivityLogToggle() -> Element {
    let mut log = use_activity_log();
    let count = log().entries.len();
    let has_errors = log().has_errors();

    rsx! {
        button {
            class: if has_errors { "activity-log-toggle has-errors" } else { "activity-log-toggle" },
            onclick: move |_| {
                let visible = log().visible;
                log.write().visible = !visible;
            },
            title: "Notices",
            if count > 0 {
                "{count}"
            } else {
                "Log"
            }
        }
    }
}
