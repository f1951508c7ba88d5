//! # Session check
//!
//! Every page runs [`check_session`] before rendering: is there a token, does
//! `/auth/admin/me` still accept it, and does the account have the role the
//! page requires. Any failure maps to a [`SessionError`] whose message is shown
//! before the user is sent back to the login page.

use thiserror::Error;

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::models::{Account, Role};

/// Why a page refused to render.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Your session is missing. Please sign in again.")]
    MissingToken,

    #[error("{0}")]
    Rejected(String),

    #[error("You do not have access to this page. Please sign in again.")]
    Forbidden { required: Role, actual: Option<Role> },

    #[error("Could not reach the server. Please sign in again.")]
    Unreachable(#[source] ApiError),
}

impl SessionError {
    pub fn user_message(&self) -> String {
        self.to_string()
    }
}

/// Validate `token` against the backend, optionally requiring a role.
pub async fn check_session(
    client: &ApiClient,
    token: Option<&str>,
    required: Option<Role>,
) -> Result<Account, SessionError> {
    let Some(token) = token.filter(|t| !t.trim().is_empty()) else {
        return Err(SessionError::MissingToken);
    };

    let reply = client.clone().with_token(token).me().await;
    session_outcome(reply, required)
}

/// Map the `/auth/admin/me` reply onto the page guard's verdict.
///
/// A non-2xx status or an unreadable body ends the session. Any other error
/// means the backend could not be reached.
pub fn session_outcome(
    reply: Result<Account, ApiError>,
    required: Option<Role>,
) -> Result<Account, SessionError> {
    let account = match reply {
        Ok(account) => account,
        Err(e @ (ApiError::Status { .. } | ApiError::Decode(_))) => {
            tracing::warn!("Session rejected: {}", e);
            return Err(SessionError::Rejected(e.user_message()));
        }
        Err(e) => {
            tracing::error!("Session check failed: {}", e);
            return Err(SessionError::Unreachable(e));
        }
    };

    if let Some(required) = required {
        if !account.has_role(required) {
            tracing::warn!(
                "Account {} (role {}) denied page for {:?}",
                account.username,
                account.role_code,
                required
            );
            return Err(SessionError::Forbidden {
                required,
                actual: account.role(),
            });
        }
    }

    Ok(account)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ApiConfig;

    #[tokio::test]
    async fn test_missing_token_short_circuits() {
        let client = ApiClient::new(&ApiConfig::new("http://127.0.0.1:9"));
        let err = check_session(&client, None, Some(Role::Admin)).await.unwrap_err();
        assert!(matches!(err, SessionError::MissingToken));

        let err = check_session(&client, Some("  "), None).await.unwrap_err();
        assert!(matches!(err, SessionError::MissingToken));
    }

    #[tokio::test]
    async fn test_unreachable_backend() {
        // Port 9 (discard) is closed on test machines; the connect fails fast.
        let client = ApiClient::new(&ApiConfig::new("http://127.0.0.1:9"));
        let err = check_session(&client, Some("a.b.c"), None).await.unwrap_err();
        assert!(matches!(err, SessionError::Unreachable(_)));
    }

    fn account(role_code: i64) -> Account {
        Account {
            username: "gv01".into(),
            role_code,
            teacher_id: Some(4),
            student_id: None,
        }
    }

    #[test]
    fn test_rejected_status_carries_detail() {
        let reply = Err(ApiError::from_status(401, r#"{"detail":"Token expired"}"#));
        match session_outcome(reply, Some(Role::Teacher)) {
            Err(SessionError::Rejected(message)) => assert_eq!(message, "Token expired"),
            other => panic!("expected rejection, got {other:?}"),
        }
    }

    #[test]
    fn test_unreadable_body_is_rejected() {
        let reply = Err(ApiError::Decode("missing field `quyen`".into()));
        assert!(matches!(
            session_outcome(reply, None),
            Err(SessionError::Rejected(_))
        ));
    }

    #[test]
    fn test_transport_failure_is_unreachable() {
        let reply = Err(ApiError::Transport("connection refused".into()));
        assert!(matches!(
            session_outcome(reply, Some(Role::Admin)),
            Err(SessionError::Unreachable(ApiError::Transport(_)))
        ));
    }

    #[test]
    fn test_wrong_role_is_forbidden() {
        match session_outcome(Ok(account(2)), Some(Role::Teacher)) {
            Err(SessionError::Forbidden { required, actual }) => {
                assert_eq!(required, Role::Teacher);
                assert_eq!(actual, Some(Role::Student));
            }
            other => panic!("expected forbidden, got {other:?}"),
        }
    }

    #[test]
    fn test_matching_role_passes() {
        let teacher = session_outcome(Ok(account(1)), Some(Role::Teacher)).unwrap();
        assert_eq!(teacher.teacher_id, Some(4));
        assert!(session_outcome(Ok(account(2)), None).is_ok());
    }

    #[test]
    fn test_forbidden_message() {
        let err = SessionError::Forbidden {
            required: Role::Admin,
            actual: Some(Role::Student),
        };
        assert_eq!(
            err.user_message(),
            "You do not have access to this page. Please sign in again."
        );
    }
}
