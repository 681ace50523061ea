//! Backend REST client with bearer-credential injection.
//!
//! ARCHITECTURE
//! ============
//! Every call resolves `<origin><path>`, merges caller headers over the JSON
//! default, and asks the session reader for a bearer token only when the
//! caller did not set `Authorization` themselves.
//!
//! ERROR HANDLING
//! ==============
//! Non-2xx responses become [`ClientError::Http`] carrying the status.
//! Transport failures are passed through untouched as
//! [`ClientError::Transport`]. Nothing is retried.

use std::time::Duration;

use reqwest::Method;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue, InvalidHeaderValue};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use super::config::BackendConfig;
use crate::auth::session::SessionReader;

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The backend answered with a non-success status.
    #[error("backend request failed with status {status}")]
    Http { status: u16 },

    /// DNS, connect, TLS or timeout failure from the HTTP stack.
    #[error(transparent)]
    Transport(#[from] reqwest::Error),

    /// A JSON response body could not be decoded.
    #[error("invalid JSON response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("invalid header value: {0}")]
    InvalidHeader(#[from] InvalidHeaderValue),
}

impl ClientError {
    /// HTTP status for [`ClientError::Http`], `None` otherwise.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status } => Some(*status),
            _ => None,
        }
    }
}

// =============================================================================
// REQUEST OPTIONS
// =============================================================================

/// Method, headers and optional JSON body for a single backend call.
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    pub method: Method,
    pub headers: HeaderMap,
    pub body: Option<Value>,
}

impl RequestOptions {
    #[must_use]
    pub fn get() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn delete() -> Self {
        Self { method: Method::DELETE, ..Self::default() }
    }

    #[must_use]
    pub fn post(body: Value) -> Self {
        Self { method: Method::POST, body: Some(body), ..Self::default() }
    }

    #[must_use]
    pub fn put(body: Value) -> Self {
        Self { method: Method::PUT, body: Some(body), ..Self::default() }
    }

    #[must_use]
    pub fn patch(body: Value) -> Self {
        Self { method: Method::PATCH, body: Some(body), ..Self::default() }
    }

    /// Set a header. Caller headers always win over the client's defaults.
    #[must_use]
    pub fn header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }
}

// =============================================================================
// CLIENT
// =============================================================================

#[derive(Clone)]
pub struct BackendClient {
    http: reqwest::Client,
    config: BackendConfig,
    session: SessionReader,
}

impl BackendClient {
    /// Build a client for `config`, reading credentials from `session`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Transport`] if the HTTP client cannot be built.
    pub fn new(config: BackendConfig, session: SessionReader) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeouts.request_secs))
            .connect_timeout(Duration::from_secs(config.timeouts.connect_secs))
            .build()?;
        Ok(Self::with_http(http, config, session))
    }

    /// Use a preconfigured HTTP client (proxy, TLS roots, ...). The timeouts
    /// in `config` are not applied to it.
    #[must_use]
    pub fn with_http(http: reqwest::Client, config: BackendConfig, session: SessionReader) -> Self {
        Self { http, config, session }
    }

    #[must_use]
    pub fn config(&self) -> &BackendConfig {
        &self.config
    }

    /// Issue `options.method <origin><path>` and return the parsed body.
    ///
    /// JSON responses are parsed; any other 2xx body, including an empty
    /// one, yields an empty object.
    ///
    /// # Errors
    ///
    /// - [`ClientError::Http`] for non-2xx responses.
    /// - [`ClientError::Transport`] for network failures.
    /// - [`ClientError::Decode`] when a JSON-typed body is not valid JSON.
    pub async fn request(&self, path: &str, options: RequestOptions) -> Result<Value, ClientError> {
        let RequestOptions { method, headers, body } = options;
        let mut headers = merge_headers(headers);

        if !headers.contains_key(AUTHORIZATION) {
            if let Some(principal) = self.session.current_user().await {
                if let Some(value) = bearer_header(principal.access_token())? {
                    headers.insert(AUTHORIZATION, value);
                }
            }
        }

        let url = self.config.url(path);
        tracing::debug!(%method, %url, authorized = headers.contains_key(AUTHORIZATION), "backend request");

        let mut builder = self.http.request(method.clone(), &url).headers(headers);
        if let Some(body) = &body {
            builder = builder.json(body);
        }
        let response = builder.send().await?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(%method, %url, status = status.as_u16(), "backend request failed");
            return Err(ClientError::Http { status: status.as_u16() });
        }

        let is_json = response
            .headers()
            .get(CONTENT_TYPE)
            .is_some_and(is_json_content_type);
        if !is_json {
            return Ok(empty_object());
        }

        let bytes = response.bytes().await?;
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(empty_object());
        }
        Ok(serde_json::from_slice(&bytes)?)
    }

    /// [`Self::request`] followed by deserialization into `T`.
    ///
    /// # Errors
    ///
    /// Same as [`Self::request`], plus [`ClientError::Decode`] when the body
    /// does not match `T`.
    pub async fn request_json<T: DeserializeOwned>(&self, path: &str, options: RequestOptions) -> Result<T, ClientError> {
        let value = self.request(path, options).await?;
        Ok(serde_json::from_value(value)?)
    }
}

// =============================================================================
// HELPERS
// =============================================================================

/// Default `Content-Type: application/json`, overridden by any caller header.
pub(crate) fn merge_headers(caller: HeaderMap) -> HeaderMap {
    let mut headers = caller;
    if !headers.contains_key(CONTENT_TYPE) {
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    }
    headers
}

/// `Bearer <token>` header for a non-blank token.
pub(crate) fn bearer_header(token: &str) -> Result<Option<HeaderValue>, ClientError> {
    if token.trim().is_empty() {
        return Ok(None);
    }
    let mut value = HeaderValue::from_str(&format!("Bearer {token}"))?;
    value.set_sensitive(true);
    Ok(Some(value))
}

pub(crate) fn is_json_content_type(value: &HeaderValue) -> bool {
    let Ok(raw) = value.to_str() else {
        return false;
    };
    let mime = raw.split(';').next().unwrap_or_default().trim().to_ascii_lowercase();
    mime == "application/json" || (mime.starts_with("application/") && mime.ends_with("+json"))
}

fn empty_object() -> Value {
    Value::Object(Map::new())
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
