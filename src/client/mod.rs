//! HTTP client for the academy backend.
//!
//! This module provides the client core shared by all API surfaces:
//! - Client construction from [`ClientConfig`] with explicit timeouts,
//!   bounded redirects and a fixed user agent
//! - An explicit [`Session`] carrying the admin bearer token
//! - Envelope decoding and error-body extraction
//! - Auth endpoints (login/me/register/logout)

mod auth;
mod response;
mod session;

pub use auth::{AdminUser, AuthApi, LoginCredentials, LoginPayload, RegisterData};
pub use response::{ApiEnvelope, Paged, Pagination};
pub use session::Session;

use std::time::Duration;

use reqwest::{Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use url::Url;

use crate::config::ClientConfig;
use crate::error::{GreenroomError, Result};

/// Typed client for the academy backend.
///
/// Cheap to clone; clones share the connection pool and the session.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base: Url,
    session: Session,
}

impl ApiClient {
    /// Build a client from configuration with an explicit session.
    pub fn new(config: &ClientConfig, session: Session) -> Result<Self> {
        let base = parse_base_url(&config.base_url)?;

        let http = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .read_timeout(Duration::from_secs(config.read_timeout_secs))
            .timeout(Duration::from_secs(config.total_timeout_secs))
            .redirect(reqwest::redirect::Policy::limited(config.max_redirects))
            .user_agent(&config.user_agent)
            .build()
            .map_err(|e| GreenroomError::Config(format!("failed to create HTTP client: {}", e)))?;

        Ok(Self {
            http,
            base,
            session,
        })
    }

    /// Build a client with a fresh, unauthenticated session.
    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        Self::new(config, Session::new())
    }

    /// The session attached to this client.
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Resolve an endpoint path (relative to the `/api` prefix) to a URL.
    fn endpoint(&self, path: &str) -> Result<Url> {
        self.base
            .join(path)
            .map_err(|e| GreenroomError::Config(format!("invalid endpoint path {}: {}", path, e)))
    }

    /// Attach the bearer token when the session holds one.
    async fn authorize(&self, builder: RequestBuilder) -> RequestBuilder {
        match self.session.token().await {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    pub(crate) async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<ApiEnvelope<T>> {
        let url = self.endpoint(path)?;
        self.execute(self.http.request(Method::GET, url)).await
    }

    pub(crate) async fn get_json_query<T: DeserializeOwned, Q: Serialize + ?Sized>(
        &self,
        path: &str,
        query: &Q,
    ) -> Result<ApiEnvelope<T>> {
        let url = self.endpoint(path)?;
        self.execute(self.http.request(Method::GET, url).query(query))
            .await
    }

    pub(crate) async fn post_json<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<ApiEnvelope<T>> {
        let url = self.endpoint(path)?;
        self.execute(self.http.request(Method::POST, url).json(body))
            .await
    }

    pub(crate) async fn patch_json<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<ApiEnvelope<T>> {
        let url = self.endpoint(path)?;
        self.execute(self.http.request(Method::PATCH, url).json(body))
            .await
    }

    pub(crate) async fn post_multipart<T: DeserializeOwned>(
        &self,
        path: &str,
        form: reqwest::multipart::Form,
    ) -> Result<ApiEnvelope<T>> {
        let url = self.endpoint(path)?;
        self.execute(self.http.request(Method::POST, url).multipart(form))
            .await
    }

    /// POST with no body, ignoring the response payload.
    pub(crate) async fn post_empty(&self, path: &str) -> Result<()> {
        let url = self.endpoint(path)?;
        self.execute_empty(self.http.request(Method::POST, url))
            .await
    }

    /// POST with a body, ignoring the response payload.
    pub(crate) async fn post_empty_json<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<()> {
        let url = self.endpoint(path)?;
        self.execute_empty(self.http.request(Method::POST, url).json(body))
            .await
    }

    /// DELETE with an optional body, ignoring the response payload.
    pub(crate) async fn delete_json<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: Option<&B>,
    ) -> Result<()> {
        let url = self.endpoint(path)?;
        let builder = self.http.request(Method::DELETE, url);
        let builder = match body {
            Some(body) => builder.json(body),
            None => builder,
        };
        self.execute_empty(builder).await
    }

    /// DELETE addressed by query parameters, ignoring the response payload.
    pub(crate) async fn delete_empty_query<Q: Serialize + ?Sized>(
        &self,
        path: &str,
        query: &Q,
    ) -> Result<()> {
        let url = self.endpoint(path)?;
        self.execute_empty(self.http.request(Method::DELETE, url).query(query))
            .await
    }

    /// Send a request and decode the standard envelope.
    async fn execute<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<ApiEnvelope<T>> {
        let response = self.send(builder).await?;
        let bytes = response
            .bytes()
            .await
            .map_err(|e| GreenroomError::Http(format!("failed to read response: {}", e)))?;
        response::decode_envelope(&bytes)
            .map_err(|e| GreenroomError::Http(format!("failed to decode response: {}", e)))
    }

    /// Send a request, accepting any 2xx and discarding the body.
    async fn execute_empty(&self, builder: RequestBuilder) -> Result<()> {
        self.send(builder).await.map(|_| ())
    }

    /// Send a request and map non-2xx statuses to the error taxonomy.
    async fn send(&self, builder: RequestBuilder) -> Result<reqwest::Response> {
        let builder = self.authorize(builder).await;
        let response = builder
            .send()
            .await
            .map_err(|e| GreenroomError::Http(format!("request failed: {}", e)))?;

        let status = response.status();

        // An expired or revoked token invalidates the whole session.
        if status == StatusCode::UNAUTHORIZED && self.session.is_authenticated().await {
            tracing::warn!("backend returned 401, clearing admin session");
            self.session.clear().await;
        }

        if status.is_success() {
            return Ok(response);
        }

        let message = response::error_message(response).await;
        tracing::debug!(status = %status, message = ?message, "API request rejected");

        match status {
            StatusCode::NOT_FOUND => Err(GreenroomError::NotFound(
                message.unwrap_or_else(|| "resource".to_string()),
            )),
            _ => Err(GreenroomError::Api {
                status: status.as_u16(),
                message: message.unwrap_or_default(),
            }),
        }
    }
}

/// Parse and normalize the configured base URL.
///
/// Accepts absolute `http`/`https` URLs and returns the `/api/` root every
/// endpoint path is joined against.
fn parse_base_url(base_url: &str) -> Result<Url> {
    let parsed = Url::parse(base_url)
        .map_err(|e| GreenroomError::Config(format!("invalid base URL {}: {}", base_url, e)))?;

    match parsed.scheme() {
        "http" | "https" => {}
        scheme => {
            return Err(GreenroomError::Config(format!(
                "unsupported URL scheme: {}",
                scheme
            )));
        }
    }

    if parsed.host().is_none() {
        return Err(GreenroomError::Config("base URL has no host".to_string()));
    }

    // Normalize to ".../api/" so that Url::join keeps the prefix.
    let mut normalized = parsed.to_string();
    if !normalized.ends_with('/') {
        normalized.push('/');
    }
    if !normalized.ends_with("/api/") {
        normalized.push_str("api/");
    }

    Url::parse(&normalized)
        .map_err(|e| GreenroomError::Config(format!("invalid base URL {}: {}", base_url, e)))
}
