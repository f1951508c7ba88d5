//! # API crate — typed access to the school backend
//!
//! Everything the console knows about the REST backend lives here, free of
//! any UI code so it can be tested natively.
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`client`] | [`ApiClient`]: one `impl` block per endpoint family, bearer auth, `detail` error bodies |
//! | [`auth`] | JWT payload decoding for the post-login redirect, and the per-page session check |
//! | [`capture`] | The attendance capture loop: detect, submit, refresh |
//! | [`config`] | Backend base URL from `SCHOOL_API_URL` or the stored console config |
//! | [`error`] | [`ApiError`] and [`ValidationError`] |
//! | [`filter`] | Case-insensitive in-memory list search |
//! | [`import`] | Student rows from an uploaded `.xlsx` sheet |
//! | [`models`] | Records mirrored from the backend's JSON |
//! | [`validate`] | Form checks (phone, email, password confirmation, class form) |

pub mod auth;
pub mod capture;
pub mod client;
pub mod config;
pub mod error;
pub mod filter;
pub mod import;
pub mod models;
pub mod validate;

pub use client::ApiClient;
pub use config::ApiConfig;
pub use error::{ApiError, ValidationError};
pub use models::*;

pub use store::ConsoleConfig;
