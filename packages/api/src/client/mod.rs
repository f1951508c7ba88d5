//! # Typed REST client for the school backend
//!
//! [`ApiClient`] wraps a [`reqwest::Client`] (which runs over `fetch` in the
//! browser), the backend base URL and the optional bearer token. Each
//! submodule adds one family of endpoints as an `impl ApiClient` block:
//!
//! | Module | Endpoints |
//! |--------|-----------|
//! | [`auth`] | `/auth/login`, `/auth/logout`, `/auth/admin/me`, password change |
//! | [`teachers`] | `/admin/teachers` CRUD |
//! | [`students`] | `/admin/students` CRUD, class roster by teacher |
//! | [`classes`] | `/admin/classes` CRUD, `/admin/years` |
//! | [`parents`] | `/admin/parents/{id}`, parents of a student |
//! | [`images`] | portrait and gallery upload/list/delete |
//! | [`attendance`] | attendance by date, manual check-in, recognition |
//!
//! Every non-2xx response becomes [`ApiError::Status`] carrying the server's
//! `detail` text, so callers can show it as is.

mod attendance;
mod auth;
mod classes;
mod images;
mod parents;
mod students;
mod teachers;

use reqwest::{Method, RequestBuilder};
use serde::de::DeserializeOwned;

use crate::config::ApiConfig;
use crate::error::ApiError;

/// Client for the school REST backend.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    pub fn new(config: &ApiConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: config.base_url.clone(),
            token: None,
        }
    }

    /// Same client, authenticated with `token`.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Same client without a token.
    pub fn anonymous(mut self) -> Self {
        self.token = None;
        self
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL for an API path.
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Absolute URL for an image path as returned by the backend. Paths that
    /// are already absolute are kept.
    pub fn image_url(&self, image_path: &str) -> String {
        if image_path.starts_with("http://")
            || image_path.starts_with("https://")
            || image_path.starts_with("data:")
        {
            image_path.to_string()
        } else {
            self.url(image_path)
        }
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self.http.request(method, self.url(path));
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    fn authed(&self, method: Method, path: &str) -> Result<RequestBuilder, ApiError> {
        if self.token.is_none() {
            return Err(ApiError::MissingToken);
        }
        Ok(self.request(method, path))
    }

    /// Send and decode a JSON body.
    async fn send<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T, ApiError> {
        let body = self.send_raw(builder).await?;
        serde_json::from_str(&body).map_err(|e| {
            tracing::warn!("Failed to decode response: {}", e);
            ApiError::from(e)
        })
    }

    /// Send and ignore the body of a successful response.
    async fn send_empty(&self, builder: RequestBuilder) -> Result<(), ApiError> {
        self.send_raw(builder).await.map(|_| ())
    }

    async fn send_raw(&self, builder: RequestBuilder) -> Result<String, ApiError> {
        let response = builder.send().await.map_err(|e| {
            tracing::error!("Request failed: {}", e);
            ApiError::from(e)
        })?;
        let status = response.status();
        let url = response.url().path().to_string();
        let body = response.text().await.unwrap_or_default();

        if !status.is_success() {
            tracing::warn!("{} answered {}", url, status);
            return Err(ApiError::from_status(status.as_u16(), &body));
        }
        Ok(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> ApiClient {
        ApiClient::new(&ApiConfig::new("http://localhost:8000/"))
    }

    #[test]
    fn test_url_joins_without_double_slash() {
        let c = client();
        assert_eq!(c.url("/admin/teachers"), "http://localhost:8000/admin/teachers");
        assert_eq!(c.url("admin/years"), "http://localhost:8000/admin/years");
    }

    #[test]
    fn test_image_url_keeps_absolute_paths() {
        let c = client();
        assert_eq!(
            c.image_url("http://cdn.school/a.jpg"),
            "http://cdn.school/a.jpg"
        );
        assert_eq!(
            c.image_url("images/phu_huynh/4/a.jpg"),
            "http://localhost:8000/images/phu_huynh/4/a.jpg"
        );
    }

    #[test]
    fn test_token_is_carried_and_dropped() {
        let c = client().with_token("abc");
        assert_eq!(c.token(), Some("abc"));
        assert!(c.anonymous().token().is_none());
    }

    #[test]
    fn test_bearer_header_attached() {
        let c = client().with_token("abc");
        let req = c.request(Method::GET, "/auth/admin/me").build().unwrap();
        assert_eq!(req.headers()["authorization"], "Bearer abc");
        assert_eq!(req.url().as_str(), "http://localhost:8000/auth/admin/me");
    }

    #[test]
    fn test_authed_requires_token() {
        let err = client().authed(Method::GET, "/auth/admin/me").unwrap_err();
        assert!(matches!(err, ApiError::MissingToken));
    }
}
