// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! HTTP client with transparent envelope encryption.
//!
//! One client owns one reqwest session (cookies + keep-alive persist across
//! calls). A single client is meant for sequential use; tests that need
//! parallel traffic build independent clients from the same config.

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::Method;
use serde_json::Value;
use std::collections::HashMap;
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::{debug, error, warn};

use super::envelope::{redact, resolve_url, truncate, Envelope};
use super::response::ApiResponse;
use crate::config::{ConfigError, TransportConfig};
use crate::crypto::{CryptoEngine, CryptoError};

/// Longest body/text snippet that ends up in logs or error values.
const LOG_SNIPPET_CHARS: usize = 500;

#[derive(Error, Debug)]
pub enum TransportError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Crypto(#[from] CryptoError),

    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("HTTP status {status} from {url}: {body}")]
    Status {
        status: u16,
        url: String,
        body: String,
    },

    #[error("Invalid header '{name}': {reason}")]
    InvalidHeader { name: String, reason: String },
}

/// Per-call request settings; all optional.
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    pub json: Option<Value>,
    pub query: Vec<(String, String)>,
    pub headers: HashMap<String, String>,
    pub timeout: Option<Duration>,
}

impl RequestOptions {
    pub fn json(body: Value) -> Self {
        Self {
            json: Some(body),
            ..Default::default()
        }
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    pub fn with_query(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((name.into(), value.into()));
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

/// HTTP client bound to one base URL and one [`CryptoEngine`].
pub struct TransportClient {
    config: TransportConfig,
    crypto: CryptoEngine,
    http: reqwest::Client,
}

impl TransportClient {
    pub fn new(config: TransportConfig, crypto: CryptoEngine) -> Result<Self, TransportError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout))
            .cookie_store(true)
            .build()?;
        Ok(Self {
            config,
            crypto,
            http,
        })
    }

    pub fn encrypt_enabled(&self) -> bool {
        self.config.encrypt_enabled
    }

    /// Send one request and decode the response.
    ///
    /// Network failures and non-2xx statuses are logged and returned as
    /// errors. A body that cannot be handled as JSON (including a `data`
    /// field that fails to decrypt) degrades to [`ApiResponse::Raw`] instead.
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        options: RequestOptions,
    ) -> Result<ApiResponse, TransportError> {
        let url = resolve_url(&self.config.base_url, path);

        // Redacted copy for the log line; taken before encryption so the
        // entry shows what the test sent, with credentials masked.
        let logged_body = options.json.as_ref().map(redact);

        let mut body = options.json;
        if self.config.encrypt_enabled {
            if let Some(plain) = body.take() {
                let serialized = serde_json::to_string(&plain)?;
                let envelope = Envelope {
                    data: self.crypto.encrypt_aes(&serialized, None)?,
                    timestamp: self.crypto.timestamp(),
                };
                body = Some(serde_json::to_value(envelope)?);
            }
        }

        let headers = self.merged_headers(&options.headers)?;
        debug!(
            method = %method,
            url = %url,
            headers = ?headers,
            query = ?options.query,
            body = ?logged_body,
            "sending request"
        );

        let mut request = self.http.request(method.clone(), url.as_str()).headers(headers);
        if !options.query.is_empty() {
            request = request.query(&options.query);
        }
        if let Some(json) = &body {
            request = request.json(json);
        }
        if let Some(timeout) = options.timeout {
            request = request.timeout(timeout);
        }

        let started = Instant::now();
        let response = request.send().await.map_err(|e| {
            error!(method = %method, url = %url, "request failed: {e}");
            TransportError::Request(e)
        })?;

        let status = response.status();
        let response_headers = response.headers().clone();
        let text = response.text().await.map_err(|e| {
            error!(url = %url, "failed to read response body: {e}");
            TransportError::Request(e)
        })?;
        let elapsed_ms = started.elapsed().as_millis();

        if !status.is_success() {
            let snippet = truncate(&text, LOG_SNIPPET_CHARS).to_string();
            error!(
                status = status.as_u16(),
                url = %url,
                elapsed_ms,
                body = %snippet,
                "request returned error status"
            );
            return Err(TransportError::Status {
                status: status.as_u16(),
                url,
                body: snippet,
            });
        }

        debug!(
            status = status.as_u16(),
            headers = ?response_headers,
            elapsed_ms,
            body = %truncate(&text, LOG_SNIPPET_CHARS),
            "received response"
        );

        Ok(self.decode_body(status.as_u16(), text))
    }

    pub async fn get(&self, path: &str, options: RequestOptions) -> Result<ApiResponse, TransportError> {
        self.request(Method::GET, path, options).await
    }

    pub async fn post(&self, path: &str, options: RequestOptions) -> Result<ApiResponse, TransportError> {
        self.request(Method::POST, path, options).await
    }

    pub async fn put(&self, path: &str, options: RequestOptions) -> Result<ApiResponse, TransportError> {
        self.request(Method::PUT, path, options).await
    }

    pub async fn delete(&self, path: &str, options: RequestOptions) -> Result<ApiResponse, TransportError> {
        self.request(Method::DELETE, path, options).await
    }

    fn merged_headers(
        &self,
        overrides: &HashMap<String, String>,
    ) -> Result<HeaderMap, TransportError> {
        let mut map = HeaderMap::new();
        for (name, value) in self.config.headers.iter().chain(overrides.iter()) {
            let header_name =
                HeaderName::from_bytes(name.as_bytes()).map_err(|e| TransportError::InvalidHeader {
                    name: name.clone(),
                    reason: e.to_string(),
                })?;
            let header_value =
                HeaderValue::from_str(value).map_err(|e| TransportError::InvalidHeader {
                    name: name.clone(),
                    reason: e.to_string(),
                })?;
            map.insert(header_name, header_value);
        }
        Ok(map)
    }

    /// JSON-decode the body, decrypting a `data` field when encryption is on.
    /// Any failure here degrades to a raw-text result; only HTTP-level errors
    /// are fatal to the call.
    fn decode_body(&self, status: u16, text: String) -> ApiResponse {
        match self.try_decode(status, &text) {
            Ok(response) => response,
            Err(e) => {
                warn!(status, "response fell back to raw text: {e:#}");
                ApiResponse::Raw { status, text }
            }
        }
    }

    fn try_decode(&self, status: u16, text: &str) -> anyhow::Result<ApiResponse> {
        let mut body: Value = serde_json::from_str(text)?;
        if self.config.encrypt_enabled {
            if let Some(obj) = body.as_object_mut() {
                let token = match obj.get("data") {
                    Some(Value::String(token)) => Some(token.clone()),
                    _ => None,
                };
                if let Some(token) = token {
                    let plaintext = self.crypto.decrypt_aes(&token, None)?;
                    let inner: Value = serde_json::from_str(&plaintext)?;
                    obj.insert("data".to_string(), inner);
                }
            }
        }
        Ok(ApiResponse::Json { status, body })
    }
}
