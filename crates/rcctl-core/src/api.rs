//! Request plumbing for the Remote Config REST API.
//!
//! Services describe calls as [`ApiRequest`] values and hand them to an
//! [`ApiClient`]. The production client is [`HttpApiClient`] (reqwest); tests
//! substitute a stub that records requests and replays canned responses.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::fmt;
use std::time::Duration;
use tracing::debug;

use crate::error::ApiError;

/// Default Remote Config API origin.
pub const DEFAULT_ORIGIN: &str = "https://firebaseremoteconfig.googleapis.com";

/// Per-request timeout budget applied by the transport.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Environment variable consulted for the access token when none is given.
pub const DEFAULT_TOKEN_ENV: &str = "RCCTL_ACCESS_TOKEN";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

impl Method {
    pub fn as_str(self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
        }
    }
}

/// A single API call: method, path, query, and transport options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub auth: bool,
    pub origin: String,
    pub timeout: Duration,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            auth: false,
            origin: DEFAULT_ORIGIN.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::Get, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::Post, path)
    }

    pub fn query(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.query.push((key.into(), value.to_string()));
        self
    }

    pub fn authenticated(mut self) -> Self {
        self.auth = true;
        self
    }

    pub fn origin(mut self, origin: impl Into<String>) -> Self {
        self.origin = origin.into();
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Path with the query string appended, e.g.
    /// `/v1/projects/p/remoteConfig:rollback?versionNumber=114`.
    pub fn path_and_query(&self) -> String {
        if self.query.is_empty() {
            return self.path.clone();
        }
        let query: Vec<String> = self
            .query
            .iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect();
        format!("{}?{}", self.path, query.join("&"))
    }

    /// Absolute URL without the query string.
    pub fn url(&self) -> String {
        format!("{}{}", self.origin.trim_end_matches('/'), self.path)
    }
}

/// A decoded API response. Empty bodies decode to `Value::Null`.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: Value,
}

impl ApiResponse {
    pub fn ok(body: Value) -> Self {
        Self { status: 200, body }
    }

    /// Deserializes the body into `T`.
    pub fn json<T: DeserializeOwned>(self) -> Result<T, ApiError> {
        Ok(serde_json::from_value(self.body)?)
    }
}

/// Transport seam between the template services and the network.
///
/// Implementations own auth and timeout enforcement; callers never retry.
#[async_trait]
pub trait ApiClient: Send + Sync {
    async fn request(&self, request: ApiRequest) -> Result<ApiResponse, ApiError>;
}

/// reqwest-backed [`ApiClient`] with bearer-token auth.
pub struct HttpApiClient {
    http: reqwest::Client,
    token: Option<String>,
    token_env: String,
}

impl HttpApiClient {
    /// Creates a client.
    ///
    /// Resolves the access token from `token` or the `token_env` environment
    /// variable. A missing token is only an error once an authenticated
    /// request is made.
    pub fn new(token: Option<String>, token_env: &str) -> Result<Self, ApiError> {
        let resolved = token
            .or_else(|| std::env::var(token_env).ok())
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty());

        let http = reqwest::Client::builder()
            .user_agent(concat!("rcctl/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(ApiError::ClientInit)?;

        Ok(Self {
            http,
            token: resolved,
            token_env: token_env.to_string(),
        })
    }
}

#[async_trait]
impl ApiClient for HttpApiClient {
    async fn request(&self, request: ApiRequest) -> Result<ApiResponse, ApiError> {
        let url = request.url();
        let mut builder = self
            .http
            .request(request.method.into(), &url)
            .query(&request.query)
            .timeout(request.timeout);

        if request.auth {
            let token = self
                .token
                .as_deref()
                .ok_or_else(|| ApiError::MissingCredentials {
                    env_var: self.token_env.clone(),
                })?;
            builder = builder.bearer_auth(token);
        }

        if request.method == Method::Post {
            builder = builder.body("");
        }

        debug!(
            method = %request.method,
            path = %request.path_and_query(),
            origin = %request.origin,
            "Sending API request"
        );

        let response = builder.send().await.map_err(|source| ApiError::Transport {
            url: url.clone(),
            source,
        })?;
        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|source| ApiError::Transport { url, source })?;

        debug!(status = status.as_u16(), bytes = text.len(), "API response received");

        if !status.is_success() {
            return Err(ApiError::Status {
                status: status.as_u16(),
                message: error_message(&text)
                    .or_else(|| status.canonical_reason().map(str::to_string))
                    .unwrap_or_else(|| "Unknown error".to_string()),
            });
        }

        let body = if text.trim().is_empty() {
            Value::Null
        } else {
            serde_json::from_str(&text)?
        };

        Ok(ApiResponse {
            status: status.as_u16(),
            body,
        })
    }
}

/// Extracts `error.message` from a Google API error body.
fn error_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    value
        .get("error")?
        .get("message")?
        .as_str()
        .map(str::to_string)
}
