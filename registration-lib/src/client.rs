//! HTTP client for the registration service

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use log::warn;
use reqwest::Client;
use reqwest::Response;
use serde::Deserialize;
use serde_json::Value;

use crate::config::Config;
use crate::error::ApiError;
use crate::submit::RegistrationPayload;

const API_PREFIX: &str = "api/v1";

/// The registration service as seen by the form.
///
/// [`RegistrationClient`] is the HTTP implementation. Tests and alternative
/// front ends can supply their own.
#[async_trait]
pub trait RegistrationApi: Send + Sync {
    /// Pings the liveness endpoint. The body is ignored.
    async fn is_live(&self) -> Result<(), ApiError>;

    /// Sends one registration.
    async fn register(&self, payload: RegistrationPayload) -> Result<RegisterResponse, ApiError>;
}

/// Body of a successful registration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RegisterResponse {
    /// Confirmation text from the server.
    #[serde(default)]
    pub message: Option<String>,
}

/// Client for the registration web API.
///
/// Cheap to clone; clones share one connection pool.
///
/// # Example
///
/// ```ignore
/// use registration_lib::RegistrationClient;
///
/// let client = RegistrationClient::builder()
///     .base_url("http://localhost:8080")
///     .build()?;
///
/// client.is_live().await?;
/// ```
#[derive(Clone)]
pub struct RegistrationClient {
    inner: Arc<RegistrationClientInner>,
}

struct RegistrationClientInner {
    base_url: String,
    http_client: Client,
    timeout: Option<Duration>,
}

impl RegistrationClient {
    /// Creates a new builder for constructing a client.
    pub fn builder() -> RegistrationClientBuilder<Missing> {
        RegistrationClientBuilder::new()
    }

    /// Builds a client for the configured base URI.
    pub fn from_config(config: &Config) -> Result<Self, ApiError> {
        Self::builder().base_url(config.base_uri().as_str()).build()
    }

    /// Returns the base URL of the service.
    pub fn base_url(&self) -> &str {
        &self.inner.base_url
    }

    /// Full URL of an endpoint under `/api/v1`.
    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}/{}",
            self.inner.base_url.trim_end_matches('/'),
            API_PREFIX,
            path.trim_start_matches('/')
        )
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> Result<Response, ApiError> {
        let request = match self.inner.timeout {
            Some(timeout) => request.timeout(timeout),
            None => request,
        };
        let response = request.send().await?;

        if response.status().is_success() {
            return Ok(response);
        }

        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        let message = error_message(&body);
        warn!("Registration service returned HTTP {}", status);
        Err(ApiError::http(status, message))
    }
}

#[async_trait]
impl RegistrationApi for RegistrationClient {
    async fn is_live(&self) -> Result<(), ApiError> {
        let url = self.endpoint("is-live");
        debug!("GET {}", url);
        self.send(self.inner.http_client.get(&url)).await?;
        Ok(())
    }

    async fn register(&self, payload: RegistrationPayload) -> Result<RegisterResponse, ApiError> {
        let url = self.endpoint("register");
        debug!("POST {} ({} field(s))", url, payload.len());
        let form = payload.into_multipart()?;

        let response = self
            .send(self.inner.http_client.post(&url).multipart(form))
            .await?;
        let body = response.text().await?;
        Ok(parse_register_response(&body))
    }
}

/// Extracts the error text from a failure body.
///
/// Looks for `message` at the top level, then under `data`. Bodies that are
/// not JSON carry no message.
pub fn error_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    value
        .get("message")
        .and_then(Value::as_str)
        .or_else(|| value.pointer("/data/message").and_then(Value::as_str))
        .map(str::to_string)
}

/// Parses a success body. An empty or non-JSON body yields no message.
pub fn parse_register_response(body: &str) -> RegisterResponse {
    match serde_json::from_str(body) {
        Ok(response) => response,
        Err(e) => {
            if !body.trim().is_empty() {
                debug!("Ignoring non-JSON register response: {}", e);
            }
            RegisterResponse::default()
        }
    }
}

// =============================================================================
// Typestate Builder
// =============================================================================

/// Marker type for missing required builder fields.
pub struct Missing;

/// Marker type for set builder fields.
pub struct Set<T>(T);

/// Builder for constructing a [`RegistrationClient`].
///
/// `base_url` must be set before [`build`](RegistrationClientBuilder::build)
/// becomes available.
pub struct RegistrationClientBuilder<Url> {
    url: Url,
    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
    http_client: Option<Client>,
}

impl RegistrationClientBuilder<Missing> {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            url: Missing,
            timeout: None,
            connect_timeout: None,
            http_client: None,
        }
    }

    /// Sets the service base URL, e.g. `https://api.example.com`.
    pub fn base_url(self, url: impl Into<String>) -> RegistrationClientBuilder<Set<String>> {
        RegistrationClientBuilder {
            url: Set(url.into()),
            timeout: self.timeout,
            connect_timeout: self.connect_timeout,
            http_client: self.http_client,
        }
    }
}

impl Default for RegistrationClientBuilder<Missing> {
    fn default() -> Self {
        Self::new()
    }
}

impl<U> RegistrationClientBuilder<U> {
    /// Sets a per-request timeout. Unset by default.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets the connection timeout used when building the HTTP client.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    /// Sets a custom HTTP client.
    pub fn http_client(mut self, client: Client) -> Self {
        self.http_client = Some(client);
        self
    }
}

impl RegistrationClientBuilder<Set<String>> {
    /// Builds the [`RegistrationClient`].
    pub fn build(self) -> Result<RegistrationClient, ApiError> {
        let http_client = match self.http_client {
            Some(client) => client,
            None => {
                let mut builder = Client::builder();
                if let Some(timeout) = self.connect_timeout {
                    builder = builder.connect_timeout(timeout);
                }
                builder.build()?
            }
        };

        Ok(RegistrationClient {
            inner: Arc::new(RegistrationClientInner {
                base_url: self.url.0,
                http_client,
                timeout: self.timeout,
            }),
        })
    }
}
