//! JSON API client for the todo server.
//!
//! ARCHITECTURE
//! ============
//! `request` resolves the URL, merges default and caller headers, and sends.
//! `request_json` adds the body read and the status/JSON decoding. Decoding
//! lives in the pure `decode_body` for testability.
//!
//! The bearer token is read from the shared [`AuthStore`] on every call, so
//! a login or logout between two requests changes the second one's headers.

use std::time::Duration;

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use reqwest::{Method, Response, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::state::auth::AuthStore;

const JSON_CONTENT_TYPE: &str = "application/json";

// =============================================================================
// REQUEST OPTIONS
// =============================================================================

/// Per-call method, extra headers, and body.
#[derive(Clone, Debug)]
pub struct RequestOptions {
    pub method: Method,
    /// Merged over the defaults; entries here win on name collision.
    pub headers: HeaderMap,
    pub body: Option<String>,
}

impl Default for RequestOptions {
    fn default() -> Self {
        Self::new(Method::GET)
    }
}

impl RequestOptions {
    #[must_use]
    pub fn new(method: Method) -> Self {
        Self { method, headers: HeaderMap::new(), body: None }
    }

    #[must_use]
    pub fn get() -> Self {
        Self::new(Method::GET)
    }

    #[must_use]
    pub fn post() -> Self {
        Self::new(Method::POST)
    }

    #[must_use]
    pub fn put() -> Self {
        Self::new(Method::PUT)
    }

    #[must_use]
    pub fn delete() -> Self {
        Self::new(Method::DELETE)
    }

    /// Set a caller header, replacing any earlier value for `name`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidHeader`] if `name` or `value` is not a legal header.
    pub fn header(mut self, name: &str, value: &str) -> Result<Self, ApiError> {
        let name = HeaderName::from_bytes(name.as_bytes()).map_err(|e| ApiError::InvalidHeader(e.to_string()))?;
        let value = HeaderValue::from_str(value).map_err(|e| ApiError::InvalidHeader(e.to_string()))?;
        self.headers.insert(name, value);
        Ok(self)
    }

    /// Serialize `body` as the JSON request body.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Parse`] if `body` cannot be serialized.
    pub fn json<T: Serialize + ?Sized>(mut self, body: &T) -> Result<Self, ApiError> {
        self.body = Some(serde_json::to_string(body)?);
        Ok(self)
    }
}

// =============================================================================
// CLIENT
// =============================================================================

#[derive(Clone, Debug)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    auth: AuthStore,
}

impl ApiClient {
    /// # Errors
    ///
    /// Returns [`ApiError::HttpClientBuild`] if the TLS backend fails to initialize.
    pub fn new(config: &ClientConfig, auth: AuthStore) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeouts.request_secs))
            .connect_timeout(Duration::from_secs(config.timeouts.connect_secs))
            .build()
            .map_err(|e| ApiError::HttpClientBuild(e.to_string()))?;
        let base_url = config.base_url.trim_end_matches('/').to_string();
        Ok(Self { http, base_url, auth })
    }

    #[must_use]
    pub fn auth(&self) -> &AuthStore {
        &self.auth
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    #[must_use]
    pub fn url_for(&self, path: &str) -> String {
        resolve_url(&self.base_url, path)
    }

    /// `Content-Type: application/json`, plus `Authorization: Bearer <token>`
    /// while the session holds a token.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidHeader`] if the token contains bytes that
    /// cannot appear in a header.
    pub fn default_headers(&self) -> Result<HeaderMap, ApiError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(JSON_CONTENT_TYPE));
        if let Some(token) = self.auth.bearer_token() {
            let mut value =
                HeaderValue::from_str(&format!("Bearer {token}")).map_err(|e| ApiError::InvalidHeader(e.to_string()))?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }
        Ok(headers)
    }

    /// Send a request and return the raw response, whatever its status.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Transport`] when the request cannot be delivered.
    pub async fn request(&self, path: &str, options: RequestOptions) -> Result<Response, ApiError> {
        let url = self.url_for(path);
        let headers = merge_headers(self.default_headers()?, options.headers);

        tracing::debug!(method = %options.method, %url, "api request");
        let mut builder = self.http.request(options.method, &url).headers(headers);
        if let Some(body) = options.body {
            builder = builder.body(body);
        }
        Ok(builder.send().await?)
    }

    /// Send a request and decode the JSON answer.
    ///
    /// Yields `None` for a successful empty body.
    ///
    /// # Errors
    ///
    /// - [`ApiError::Request`] for a non-2xx status (message is the body text,
    ///   or `HTTP <status>` when empty)
    /// - [`ApiError::Parse`] for a non-empty success body that is not valid JSON
    /// - [`ApiError::Transport`] for network failures
    pub async fn request_json<T: DeserializeOwned>(
        &self,
        path: &str,
        options: RequestOptions,
    ) -> Result<Option<T>, ApiError> {
        let response = self.request(path, options).await?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), %path, "api request failed");
        }
        decode_body(status, &text)
    }
}

// =============================================================================
// HELPERS
// =============================================================================

/// `true` for `http://` and `https://` URLs, which bypass the base URL.
#[must_use]
pub fn is_absolute_url(path: &str) -> bool {
    has_prefix_ignore_case(path, "http://") || has_prefix_ignore_case(path, "https://")
}

fn has_prefix_ignore_case(s: &str, prefix: &str) -> bool {
    s.get(..prefix.len()).is_some_and(|head| head.eq_ignore_ascii_case(prefix))
}

/// Join `path` onto `base_url` with exactly one `/` between them, unless
/// `path` is already absolute. `base_url` must not end with `/`.
#[must_use]
pub fn resolve_url(base_url: &str, path: &str) -> String {
    if is_absolute_url(path) {
        path.to_string()
    } else if path.starts_with('/') {
        format!("{base_url}{path}")
    } else {
        format!("{base_url}/{path}")
    }
}

/// Overlay `overrides` on `defaults`. Every header name present in
/// `overrides` replaces all of its default values.
#[must_use]
pub fn merge_headers(mut defaults: HeaderMap, overrides: HeaderMap) -> HeaderMap {
    for name in overrides.keys() {
        defaults.remove(name);
    }
    for (name, value) in &overrides {
        defaults.append(name.clone(), value.clone());
    }
    defaults
}

fn decode_body<T: DeserializeOwned>(status: StatusCode, text: &str) -> Result<Option<T>, ApiError> {
    if !status.is_success() {
        let message = if text.is_empty() { format!("HTTP {}", status.as_u16()) } else { text.to_string() };
        return Err(ApiError::Request { status: status.as_u16(), message });
    }
    if text.is_empty() {
        return Ok(None);
    }
    Ok(Some(serde_json::from_str(text)?))
}

#[cfg(test)]
#[path = "api_test.rs"]
mod tests;
