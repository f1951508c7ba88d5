use reqwest::Method;

use super::ApiClient;
use crate::error::ApiError;
use crate::models::{Account, PasswordChange, Token};

impl ApiClient {
    /// Exchange username and password for a bearer token (form-encoded, as the
    /// backend's OAuth2 password flow expects).
    pub async fn login(&self, username: &str, password: &str) -> Result<Token, ApiError> {
        let builder = self
            .request(Method::POST, "/auth/login")
            .form(&[("username", username), ("password", password)]);
        let token: Token = self.send(builder).await?;
        tracing::info!("Signed in as {}", username);
        Ok(token)
    }

    /// Revoke the current token server-side.
    pub async fn logout(&self) -> Result<(), ApiError> {
        let builder = self.authed(Method::POST, "/auth/logout")?;
        self.send_empty(builder).await
    }

    /// The account behind the current token.
    pub async fn me(&self) -> Result<Account, ApiError> {
        let builder = self.authed(Method::GET, "/auth/admin/me")?;
        self.send(builder).await
    }

    /// Change the password of `username`.
    pub async fn change_password(&self, username: &str, password: &str) -> Result<(), ApiError> {
        let body = PasswordChange {
            password: password.to_string(),
        };
        let builder = self
            .authed(Method::PUT, &format!("/admin/accounts/username/{username}"))?
            .json(&body);
        self.send_empty(builder).await
    }
}
