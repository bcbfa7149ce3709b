//! Error types for API calls and configuration.
//!
//! ERROR HANDLING
//! ==============
//! Nothing here retries or recovers. Every failure propagates to the caller,
//! and transport errors are passed through exactly as `reqwest` raised them.

/// Errors produced by [`crate::net::api::ApiClient`] and the endpoint services.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The server answered with a status outside `2xx`. `message` is the
    /// response body, or `HTTP <status>` when the body was empty.
    #[error("{message}")]
    Request { status: u16, message: String },

    /// A successful, non-empty body was not valid JSON for the expected type.
    #[error(transparent)]
    Parse(#[from] serde_json::Error),

    #[error(transparent)]
    Transport(#[from] reqwest::Error),

    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),

    #[error("invalid header value: {0}")]
    InvalidHeader(String),

    /// The endpoint answered `2xx` with no body where one was required.
    #[error("response body was empty")]
    EmptyBody,
}

impl ApiError {
    /// HTTP status carried by a [`ApiError::Request`], if any.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Request { status, .. } => Some(*status),
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

/// Errors produced while reading [`crate::config::ClientConfig`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {value:?}")]
    InvalidNumber { var: &'static str, value: String },

    #[error("base URL must start with http:// or https://: {0}")]
    InvalidBaseUrl(String),
}

#[cfg(test)]
#[path = "error_test.rs"]
mod tests;
