//! # Remote Client
//!
//! Configuration, URL normalization and the HTTP plumbing shared by all
//! entity services.
//!
//! ## Call Shape
//! ```text
//! ┌──────────────────────────────────────────────────────────────────────┐
//! │  service call (items::list, auth::sign_in, ...)                      │
//! │       │                                                              │
//! │       ▼                                                              │
//! │  RemoteClient::request_json()                                        │
//! │       │                                                              │
//! │       ├── transport failure ──► RemoteResult::err(Network/Timeout)   │
//! │       ├── HTTP error status ──► RemoteResult::err(mapped)            │
//! │       ├── undecodable body ───► RemoteResult::err(InvalidResponse)   │
//! │       └── success ────────────► RemoteResult::ok(T)                  │
//! └──────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every call resolves; nothing panics and nothing is thrown past the
//! `RemoteResult`.

use reqwest::{Client, Method, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::RwLock;
use std::time::Duration;
use tracing::debug;

use crate::error::{RemoteError, RemoteErrorKind};

/// Default timeout for backend requests.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

// =============================================================================
// URL Normalization
// =============================================================================

/// Normalizes a backend base URL:
/// - trims whitespace and trailing slashes
/// - ensures a scheme is present (https, or http for localhost)
pub fn normalize_base_url(url: &str) -> String {
    let mut url = url.trim().to_string();

    if !url.starts_with("http://") && !url.starts_with("https://") {
        if url.starts_with("localhost") || url.starts_with("127.0.0.1") {
            url = format!("http://{url}");
        } else {
            url = format!("https://{url}");
        }
    }

    while url.ends_with('/') {
        url.pop();
    }

    url
}

// =============================================================================
// Configuration
// =============================================================================

/// Backend connection settings.
#[derive(Debug, Clone)]
pub struct RemoteConfig {
    /// Normalized base URL of the hosted backend.
    pub base_url: String,

    /// Project API key, sent on every request.
    pub api_key: String,

    /// Per-request timeout.
    pub timeout: Duration,
}

impl RemoteConfig {
    /// Creates a config; the base URL is normalized here.
    pub fn new(base_url: &str, api_key: impl Into<String>) -> Self {
        RemoteConfig {
            base_url: normalize_base_url(base_url),
            api_key: api_key.into(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Sets the per-request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

// =============================================================================
// Remote Result
// =============================================================================

/// The uniform resolution of every service call: exactly one of `data` or
/// `error` is populated.
#[derive(Debug)]
pub struct RemoteResult<T> {
    pub data: Option<T>,
    pub error: Option<RemoteError>,
}

impl<T> RemoteResult<T> {
    pub fn ok(data: T) -> Self {
        RemoteResult {
            data: Some(data),
            error: None,
        }
    }

    pub fn err(error: RemoteError) -> Self {
        RemoteResult {
            data: None,
            error: Some(error),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.data.is_some()
    }

    /// Adapter for `?`-style callers.
    pub fn into_result(self) -> Result<T, RemoteError> {
        match (self.data, self.error) {
            (Some(data), _) => Ok(data),
            (None, Some(error)) => Err(error),
            (None, None) => Err(RemoteError::new(
                RemoteErrorKind::InvalidResponse,
                "Call resolved with neither data nor error",
            )),
        }
    }
}

impl<T> From<Result<T, RemoteError>> for RemoteResult<T> {
    fn from(result: Result<T, RemoteError>) -> Self {
        match result {
            Ok(data) => RemoteResult::ok(data),
            Err(error) => RemoteResult::err(error),
        }
    }
}

// =============================================================================
// Remote Client
// =============================================================================

/// Authenticated HTTP client for the hosted backend.
///
/// Holds the bearer token of the signed-in user (when any); requests fall
/// back to the project API key until sign-in.
pub struct RemoteClient {
    http: Client,
    config: RemoteConfig,
    bearer: RwLock<Option<String>>,
}

impl RemoteClient {
    /// Builds the client. Fails only if the underlying HTTP client cannot
    /// be constructed.
    pub fn new(config: RemoteConfig) -> Result<Self, RemoteError> {
        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| {
                RemoteError::new(
                    RemoteErrorKind::Network,
                    format!("Failed to create HTTP client: {e}"),
                )
            })?;

        Ok(RemoteClient {
            http,
            config,
            bearer: RwLock::new(None),
        })
    }

    /// The configured base URL.
    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    /// URL of a REST table endpoint.
    pub fn rest_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.config.base_url, table)
    }

    /// URL of an auth endpoint.
    pub fn auth_url(&self, path: &str) -> String {
        format!("{}/auth/v1/{}", self.config.base_url, path)
    }

    /// URL of a storage object endpoint.
    pub fn storage_url(&self, path: &str) -> String {
        format!("{}/storage/v1/{}", self.config.base_url, path)
    }

    /// Installs the bearer token of a signed-in session.
    pub fn set_bearer(&self, token: impl Into<String>) {
        *write_lock(&self.bearer) = Some(token.into());
    }

    /// Drops the signed-in session token.
    pub fn clear_bearer(&self) {
        *write_lock(&self.bearer) = None;
    }

    fn bearer_token(&self) -> String {
        read_lock(&self.bearer)
            .clone()
            .unwrap_or_else(|| self.config.api_key.clone())
    }

    /// Performs a JSON request and decodes the response body.
    pub(crate) async fn request_json<T: DeserializeOwned>(
        &self,
        method: Method,
        url: &str,
        query: &[(String, String)],
        headers: &[(&str, String)],
        body: Option<&Value>,
    ) -> RemoteResult<T> {
        let text = match self.send(method, url, query, headers, body).await {
            Ok(text) => text,
            Err(error) => return RemoteResult::err(error),
        };

        match serde_json::from_str::<T>(&text) {
            Ok(data) => RemoteResult::ok(data),
            Err(err) => RemoteResult::err(RemoteError::invalid_response(err)),
        }
    }

    /// Performs a request where the response body is irrelevant (deletes,
    /// sign-out, uploads).
    pub(crate) async fn request_no_content(
        &self,
        method: Method,
        url: &str,
        query: &[(String, String)],
        headers: &[(&str, String)],
        body: Option<&Value>,
    ) -> RemoteResult<()> {
        match self.send(method, url, query, headers, body).await {
            Ok(_) => RemoteResult::ok(()),
            Err(error) => RemoteResult::err(error),
        }
    }

    /// Uploads raw bytes (storage objects).
    pub(crate) async fn upload_bytes(
        &self,
        url: &str,
        content_type: &str,
        bytes: Vec<u8>,
        upsert: bool,
    ) -> RemoteResult<()> {
        debug!(url, content_type, "Uploading object");

        let mut request = self
            .http
            .post(url)
            .header("apikey", &self.config.api_key)
            .bearer_auth(self.bearer_token())
            .header("Content-Type", content_type)
            .body(bytes);
        if upsert {
            request = request.header("x-upsert", "true");
        }

        let response = match request.send().await {
            Ok(response) => response,
            Err(err) => {
                return RemoteResult::err(RemoteError::from_transport(
                    &self.config.base_url,
                    &err,
                ))
            }
        };

        let status = response.status();
        if status.is_success() {
            RemoteResult::ok(())
        } else {
            let body = response.text().await.unwrap_or_default();
            RemoteResult::err(RemoteError::from_status(status, &body))
        }
    }

    async fn send(
        &self,
        method: Method,
        url: &str,
        query: &[(String, String)],
        headers: &[(&str, String)],
        body: Option<&Value>,
    ) -> Result<String, RemoteError> {
        debug!(%method, url, "Backend request");

        let mut request = self
            .http
            .request(method, url)
            .header("apikey", &self.config.api_key)
            .bearer_auth(self.bearer_token());

        if !query.is_empty() {
            request = request.query(query);
        }
        for (name, value) in headers {
            request = request.header(*name, value);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request
            .send()
            .await
            .map_err(|err| RemoteError::from_transport(&self.config.base_url, &err))?;

        let status = response.status();
        let text = response.text().await.unwrap_or_default();

        if status.is_success() || status == StatusCode::NO_CONTENT {
            Ok(text)
        } else {
            Err(RemoteError::from_status(status, &text))
        }
    }
}

// Poisoned locks carry no invariant here; the token is a plain string.
fn read_lock<T>(lock: &RwLock<T>) -> std::sync::RwLockReadGuard<'_, T> {
    lock.read().unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn write_lock<T>(lock: &RwLock<T>) -> std::sync::RwLockWriteGuard<'_, T> {
    lock.write().unwrap_or_else(|poisoned| poisoned.into_inner())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_base_url() {
        assert_eq!(
            normalize_base_url("example.backend.co"),
            "https://example.backend.co"
        );
        assert_eq!(
            normalize_base_url("https://example.backend.co///"),
            "https://example.backend.co"
        );
        assert_eq!(
            normalize_base_url("  localhost:54321 "),
            "http://localhost:54321"
        );
        assert_eq!(
            normalize_base_url("127.0.0.1:54321/"),
            "http://127.0.0.1:54321"
        );
    }

    #[test]
    fn test_endpoint_urls() {
        let config = RemoteConfig::new("example.backend.co", "key");
        let client = RemoteClient::new(config).unwrap();

        assert_eq!(
            client.rest_url("items"),
            "https://example.backend.co/rest/v1/items"
        );
        assert_eq!(
            client.auth_url("token?grant_type=password"),
            "https://example.backend.co/auth/v1/token?grant_type=password"
        );
        assert_eq!(
            client.storage_url("object/logos/u1/logo.png"),
            "https://example.backend.co/storage/v1/object/logos/u1/logo.png"
        );
    }

    #[test]
    fn test_bearer_falls_back_to_api_key() {
        let client = RemoteClient::new(RemoteConfig::new("example.backend.co", "key")).unwrap();
        assert_eq!(client.bearer_token(), "key");

        client.set_bearer("user-token");
        assert_eq!(client.bearer_token(), "user-token");

        client.clear_bearer();
        assert_eq!(client.bearer_token(), "key");
    }

    #[test]
    fn test_remote_result_into_result() {
        let ok: RemoteResult<i32> = RemoteResult::ok(7);
        assert!(ok.is_ok());
        assert_eq!(ok.into_result().unwrap(), 7);

        let err: RemoteResult<i32> = RemoteResult::err(RemoteError::new(
            RemoteErrorKind::NotFound,
            "missing",
        ));
        assert!(!err.is_ok());
        assert_eq!(
            err.into_result().unwrap_err().kind,
            RemoteErrorKind::NotFound
        );
    }
}
