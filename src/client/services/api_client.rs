//! Thin wrapper over `reqwest` shared by all domain services: resolves
//! paths against the configured base URL, attaches the bearer token when a
//! session exists, and normalizes failures into [`ApiError`].

use reqwest::multipart::Form;
use reqwest::{Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;

use crate::client::config::ClientConfig;
use crate::client::services::session::SessionStore;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("request failed with status {status}: {body}")]
    Status { status: StatusCode, body: String },
    #[error("failed to decode response: {0}")]
    Decode(String),
    #[error("attachment error: {0}")]
    Attachment(String),
}

impl ApiError {
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Raw error body, when the backend sent one. Used to map field errors
    /// (e.g. duplicate email) to friendlier banners.
    pub fn body(&self) -> Option<&str> {
        match self {
            ApiError::Status { body, .. } => Some(body),
            _ => None,
        }
    }
}

pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    session: Arc<SessionStore>,
}

impl ApiClient {
    pub fn new(config: &ClientConfig, session: Arc<SessionStore>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: config.api_url.clone(),
            session,
        }
    }

    pub fn session(&self) -> &Arc<SessionStore> {
        &self.session
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        let mut builder = self.http.request(method, url);
        if let Some(token) = self.session.token() {
            builder = builder.bearer_auth(token);
        }
        builder
    }

    async fn expect_json<T: DeserializeOwned>(
        builder: RequestBuilder,
    ) -> Result<T, ApiError> {
        let response = builder.send().await?;
        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(ApiError::Status { status, body });
        }
        serde_json::from_str(&body).map_err(|e| ApiError::Decode(e.to_string()))
    }

    async fn expect_ok(builder: RequestBuilder) -> Result<(), ApiError> {
        let response = builder.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Status { status, body });
        }
        Ok(())
    }

    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        Self::expect_json(self.request(Method::GET, path)).await
    }

    pub async fn post_json<T: DeserializeOwned>(
        &self,
        path: &str,
        body: &impl Serialize,
    ) -> Result<T, ApiError> {
        Self::expect_json(self.request(Method::POST, path).json(body)).await
    }

    pub async fn post_json_unit(
        &self,
        path: &str,
        body: &impl Serialize,
    ) -> Result<(), ApiError> {
        Self::expect_ok(self.request(Method::POST, path).json(body)).await
    }

    /// POST with no body; response body, if any, is ignored.
    pub async fn post_unit(&self, path: &str) -> Result<(), ApiError> {
        Self::expect_ok(self.request(Method::POST, path)).await
    }

    pub async fn put_json<T: DeserializeOwned>(
        &self,
        path: &str,
        body: &impl Serialize,
    ) -> Result<T, ApiError> {
        Self::expect_json(self.request(Method::PUT, path).json(body)).await
    }

    pub async fn delete_unit(&self, path: &str) -> Result<(), ApiError> {
        Self::expect_ok(self.request(Method::DELETE, path)).await
    }

    /// File-bearing POST; reqwest switches the content type to multipart.
    pub async fn post_multipart<T: DeserializeOwned>(
        &self,
        path: &str,
        form: Form,
    ) -> Result<T, ApiError> {
        Self::expect_json(self.request(Method::POST, path).multipart(form)).await
    }

    pub async fn patch_multipart<T: DeserializeOwned>(
        &self,
        path: &str,
        form: Form,
    ) -> Result<T, ApiError> {
        Self::expect_json(self.request(Method::PATCH, path).multipart(form)).await
    }
}
