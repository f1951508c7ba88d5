//! Session guard, sign-in and sign-out.
//!
//! [`AuthProvider`] wraps every protected page. On mount it validates the
//! stored token against `/auth/admin/me` (optionally requiring a role), and
//! keeps re-validating on an interval. Any failure posts a notice, shows a
//! short message in place of the page, and after the configured delay sends
//! the browser to the sign-in page.

use std::time::Duration;

use api::auth::{check_session, decode_claims, SessionError};
use api::{Account, ApiClient, ApiConfig, ApiError, Role};
use dioxus::prelude::*;

use crate::activity_log::{log_activity, use_activity_log, ActivityLog, LogLevel};
use crate::platform::{make_client, make_session_store, redirect, sleep, LOGIN_PATH};

#[derive(Debug, Clone, PartialEq)]
pub enum SessionStatus {
    Checking,
    Active,
    /// The check failed; the message is on screen until the redirect.
    Failed(String),
}

/// Authentication state for the page.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthState {
    pub account: Option<Account>,
    pub status: SessionStatus,
    /// Whether the last re-validation reached the backend.
    pub online: bool,
}

impl Default for AuthState {
    fn default() -> Self {
        Self {
            account: None,
            status: SessionStatus::Checking,
            online: false,
        }
    }
}

impl AuthState {
    pub fn is_active(&self) -> bool {
        self.status == SessionStatus::Active
    }
}

pub fn use_auth() -> Signal<AuthState> {
    use_context::<Signal<AuthState>>()
}

/// The signed-in account. Only call below an active [`AuthProvider`].
pub fn use_account() -> Option<Account> {
    use_auth()().account
}

/// Post the failure, drop the token unless the backend was merely
/// unreachable, then redirect after `delay`.
async fn end_session(
    mut auth_state: Signal<AuthState>,
    mut log: Signal<ActivityLog>,
    error: SessionError,
    delay: Duration,
) {
    let message = error.user_message();
    log_activity(&mut log, LogLevel::Error, &message);
    auth_state.set(AuthState {
        account: None,
        status: SessionStatus::Failed(message),
        online: !matches!(error, SessionError::Unreachable(_)),
    });
    if !matches!(error, SessionError::Unreachable(_)) {
        make_session_store().clear_token();
    }
    sleep(delay).await;
    redirect(LOGIN_PATH);
}

/// Guard for protected pages. Children render only once the session is valid.
#[component]
pub fn AuthProvider(required: Option<Role>, children: Element) -> Element {
    let mut auth_state = use_signal(AuthState::default);
    let log = use_activity_log();
    let config = use_hook(crate::platform::console_config);
    let redirect_delay = Duration::from_millis(u64::from(config.session.redirect_delay_ms));
    let revalidate_every = Duration::from_secs(u64::from(config.session.revalidate_interval_secs));

    let _ = use_resource(move || async move {
        let session = make_session_store();
        let client = make_client();
        match check_session(&client, session.token().as_deref(), required).await {
            Ok(account) => {
                tracing::info!("Session active for {}", account.username);
                auth_state.set(AuthState {
                    account: Some(account),
                    status: SessionStatus::Active,
                    online: true,
                });
            }
            Err(e) => end_session(auth_state, log, e, redirect_delay).await,
        }
    });

    use_effect(move || {
        spawn(async move {
            loop {
                sleep(revalidate_every).await;

                if !auth_state.peek().is_active() {
                    continue;
                }
                let token = make_session_store().token();
                match check_session(&make_client(), token.as_deref(), required).await {
                    Ok(account) => {
                        let current = auth_state.peek().clone();
                        if current.account.as_ref() != Some(&account) || !current.online {
                            auth_state.set(AuthState {
                                account: Some(account),
                                status: SessionStatus::Active,
                                online: true,
                            });
                        }
                    }
                    Err(SessionError::Unreachable(e)) => {
                        tracing::warn!("Backend unreachable: {}", e);
                        if auth_state.peek().online {
                            auth_state.write().online = false;
                        }
                    }
                    Err(e) => {
                        end_session(auth_state, log, e, redirect_delay).await;
                        break;
                    }
                }
            }
        });
    });

    use_context_provider(|| auth_state);

    match auth_state().status {
        SessionStatus::Checking => rsx! {
            div { class: "session-status", "Checking your session..." }
        },
        SessionStatus::Failed(message) => rsx! {
            div { class: "session-status session-status--failed",
                p { "{message}" }
                p { "Redirecting to the sign-in page..." }
            }
        },
        SessionStatus::Active => rsx! {
            {children}
        },
    }
}

/// Sign in, store the token and return the role read from it.
pub async fn sign_in(username: &str, password: &str) -> Result<Role, ApiError> {
    let session = make_session_store();
    let client = ApiClient::new(&ApiConfig::from_env_or(&session.config()));
    let token = client.login(username, password).await?;
    let claims = decode_claims(&token.access_token)?;
    let role = claims
        .role()
        .ok_or_else(|| ApiError::InvalidToken(format!("unknown role {}", claims.role_code)))?;
    session.set_token(&token.access_token);
    Ok(role)
}

/// Button to sign out and return to the sign-in page.
#[component]
pub fn LogoutButton(
    #[props(default = "Sign out".to_string())] label: String,
    #[props(default = "".to_string())] class: String,
) -> Element {
    let mut auth_state = use_auth();
    let mut log = use_activity_log();

    let onclick = move |_| async move {
        if let Err(e) = make_client().logout().await {
            log_activity(&mut log, LogLevel::Warning, &e.user_message());
        }
        make_session_store().clear_token();
        let online = auth_state.peek().online;
        auth_state.set(AuthState {
            account: None,
            status: SessionStatus::Checking,
            online,
        });
        redirect(LOGIN_PATH);
    };

    rsx! {
        button {
            class: "{class}",
            onclick: onclick,
            "{label}"
        }
    }
}
