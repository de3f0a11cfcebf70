//! HTTP status source backed by a shared `reqwest` client.
//!
//! This is deliberately the only HTTP code in the crate: it fetches one
//! resource entity and extracts its status string. Per-service request and
//! response marshalling belongs to the test suites consuming this library.

use std::sync::LazyLock;
use std::time::Duration;

use thiserror::Error;

use crate::source::{SourceFuture, StatusSource};

const HTTP_TIMEOUT: Duration = Duration::from_secs(30);

static HTTP_CLIENT: LazyLock<reqwest::Client> = LazyLock::new(|| {
    reqwest::Client::builder()
        .timeout(HTTP_TIMEOUT)
        .build()
        .unwrap_or_else(|_| reqwest::Client::new())
});

/// Errors raised by [`HttpStatusSource`].
///
/// All variants count as transient fetch failures against the stage's retry
/// budget; none of them represent a business status of the resource.
#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum HttpSourceError {
    /// Raised when the request cannot be sent or the response not read.
    #[error("request to {url} failed: {message}")]
    Request {
        /// Resource URL being polled.
        url: String,
        /// Message from the HTTP client.
        message: String,
    },
    /// Raised on a non-success HTTP status code.
    #[error("{url} returned HTTP {status}")]
    Status {
        /// Resource URL being polled.
        url: String,
        /// HTTP status code returned.
        status: u16,
    },
    /// Raised when the response body is not valid JSON.
    #[error("entity at {url} is not valid JSON: {message}")]
    Entity {
        /// Resource URL being polled.
        url: String,
        /// Message from the JSON parser.
        message: String,
    },
    /// Raised when the entity has no status string at the configured pointer.
    #[error("no status string at pointer {pointer} in entity from {url}")]
    MissingStatus {
        /// Resource URL being polled.
        url: String,
        /// JSON pointer that failed to resolve.
        pointer: String,
    },
}

/// Status source that issues `GET` requests against a resource URL and
/// extracts the status string from the JSON entity via a JSON pointer
/// (for example `/volume/status`).
#[derive(Clone, Debug)]
pub struct HttpStatusSource {
    url: String,
    status_pointer: String,
    auth_token: Option<String>,
}

impl HttpStatusSource {
    /// Creates a source polling `url`, reading the status at `status_pointer`.
    #[must_use]
    pub fn new(url: impl Into<String>, status_pointer: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            status_pointer: status_pointer.into(),
            auth_token: None,
        }
    }

    /// Sets the token sent as the `X-Auth-Token` header.
    #[must_use]
    pub fn auth_token(mut self, token: Option<String>) -> Self {
        self.auth_token = token;
        self
    }

    async fn fetch(&self) -> Result<String, HttpSourceError> {
        let mut request = HTTP_CLIENT.get(&self.url);
        if let Some(token) = &self.auth_token {
            request = request.header("X-Auth-Token", token);
        }

        let response = request
            .send()
            .await
            .map_err(|err| HttpSourceError::Request {
                url: self.url.clone(),
                message: err.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(HttpSourceError::Status {
                url: self.url.clone(),
                status: status.as_u16(),
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|err| HttpSourceError::Request {
                url: self.url.clone(),
                message: err.to_string(),
            })?;
        let entity: serde_json::Value =
            serde_json::from_slice(&body).map_err(|err| HttpSourceError::Entity {
                url: self.url.clone(),
                message: err.to_string(),
            })?;

        entity
            .pointer(&self.status_pointer)
            .and_then(serde_json::Value::as_str)
            .map(str::to_owned)
            .ok_or_else(|| HttpSourceError::MissingStatus {
                url: self.url.clone(),
                pointer: self.status_pointer.clone(),
            })
    }
}

impl StatusSource for HttpStatusSource {
    type Error = HttpSourceError;

    fn fetch_status(&self) -> SourceFuture<'_, String, Self::Error> {
        Box::pin(self.fetch())
    }
}
