//! This crate contains all shared UI for the console.

use dioxus::prelude::*;

pub mod components;

// Re-export icon library
pub use dioxus_free_icons::Icon;
pub mod icons {
    pub use dioxus_free_icons::icons::fa_solid_icons::*;
}

pub mod platform;
pub use platform::{make_client, make_session_store, redirect, LOGIN_PATH};

pub mod views;

pub const VIEWS_CSS: Asset = asset!("/src/views/views.css");

mod navbar;
pub use navbar::Navbar;

mod auth;
pub use auth::{
    sign_in, use_account, use_auth, AuthProvider, AuthState, LogoutButton,
    SessionStatus,
};

mod online_indicator;
pub use online_indicator::OnlineIndicator;

pub mod activity_log;
pub use activity_log::{
    log_activity, log_api_error, use_activity_log, use_activity_log_provider, ActivityLog,
    LogLevel,
};

mod activity_log_panel;
pub use activity_log_panel::{ActivityLogPanel, ActivityLogToggle, NoticeBanner};

pub mod camera;
pub mod image_crop;
