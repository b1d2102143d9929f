//! Error types for the Freshdesk client.
//!
//! This module defines `FreshdeskError`, the unified error type returned by
//! every client operation, and `ErrorResponse`, the snapshot of a failed HTTP
//! exchange that the status-specific variants carry for diagnostics.
//!
//! # Security
//!
//! All error messages are sanitized to ensure API keys are never leaked
//! in logs. Use `sanitize_message()` when logging messages built from
//! external sources.

use std::fmt;
use std::time::Duration;

use reqwest::header::HeaderMap;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Maximum length of a response body kept in `Display` output.
const MAX_DISPLAY_BODY_LEN: usize = 300;

/// A single field-level error reported by Freshdesk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiFieldError {
    /// The offending field, if the error is tied to one.
    #[serde(default)]
    pub field: Option<String>,

    /// Human-readable message.
    #[serde(default)]
    pub message: Option<String>,

    /// Machine-readable code such as `invalid_value` or `missing_field`.
    #[serde(default)]
    pub code: Option<String>,
}

/// The JSON error payload Freshdesk returns on most 4xx responses.
///
/// ```json
/// { "description": "Validation failed",
///   "errors": [{ "field": "email", "message": "It should be a valid email address", "code": "invalid_value" }] }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiErrorBody {
    /// Summary of the failure.
    #[serde(default)]
    pub description: Option<String>,

    /// Per-field errors.
    #[serde(default)]
    pub errors: Vec<ApiFieldError>,

    /// Some endpoints return a single `code`/`message` pair instead.
    #[serde(default)]
    pub code: Option<String>,

    /// See `code`.
    #[serde(default)]
    pub message: Option<String>,
}

/// Snapshot of a non-success HTTP response.
///
/// The response body is read eagerly so the snapshot owns everything the
/// caller may want to inspect; nothing needs to be released afterwards.
#[derive(Debug, Clone)]
pub struct ErrorResponse {
    /// HTTP status code.
    pub status: StatusCode,

    /// Response headers.
    pub headers: HeaderMap,

    /// The URL that produced the response.
    pub url: String,

    /// Raw response body.
    pub body: String,

    /// Parsed Freshdesk error payload, when the body had that shape.
    pub api_error: Option<ApiErrorBody>,
}

impl ErrorResponse {
    /// Builds a snapshot, parsing the body as a Freshdesk error payload when possible.
    pub fn new(status: StatusCode, headers: HeaderMap, url: impl Into<String>, body: String) -> Self {
        let api_error = serde_json::from_str::<ApiErrorBody>(&body).ok();
        Self {
            status,
            headers,
            url: url.into(),
            body,
            api_error,
        }
    }

    /// Returns the best available short description of the failure.
    pub fn summary(&self) -> String {
        if let Some(api_error) = &self.api_error {
            if let Some(description) = api_error.description.as_deref().or(api_error.message.as_deref()) {
                return description.to_string();
            }
        }
        if self.body.len() > MAX_DISPLAY_BODY_LEN {
            let mut end = MAX_DISPLAY_BODY_LEN;
            while !self.body.is_char_boundary(end) {
                end -= 1;
            }
            format!("{}...[truncated]", &self.body[..end])
        } else if self.body.is_empty() {
            self.status
                .canonical_reason()
                .unwrap_or("no response body")
                .to_string()
        } else {
            self.body.clone()
        }
    }

    /// Field-level errors, empty when the body carried none.
    pub fn field_errors(&self) -> &[ApiFieldError] {
        self.api_error
            .as_ref()
            .map(|e| e.errors.as_slice())
            .unwrap_or(&[])
    }

    /// Returns a header value as a string, if present and valid UTF-8.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}

impl fmt::Display for ErrorResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HTTP {}: {}", self.status.as_u16(), self.summary())
    }
}

/// Unified error type for all Freshdesk operations.
#[derive(Error, Debug)]
pub enum FreshdeskError {
    /// Configuration error - missing or invalid settings.
    #[error("configuration error: {0}")]
    Config(String),

    /// Input validation failed before any request was sent.
    #[error("validation error: {0}")]
    Validation(String),

    /// HTTP client initialization failed.
    #[error("HTTP client error: {0}")]
    HttpClient(#[source] reqwest::Error),

    /// HTTP request failed during transmission.
    #[error("HTTP request failed: {0}")]
    Http(#[source] reqwest::Error),

    /// JSON serialization or deserialization failed.
    #[error("JSON serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A URL could not be built or parsed.
    #[error("invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// Request timed out.
    #[error("request timed out after {duration:?} - the server may be slow or unreachable")]
    Timeout {
        /// How long we waited before timing out.
        duration: Duration,
        /// The operation that timed out.
        operation: String,
    },

    /// The operation was cancelled through the client's cancellation token.
    #[error("operation cancelled")]
    Cancelled,

    /// Connection test failed.
    #[error("connection test failed: {message}")]
    ConnectionTest {
        /// Details about why the connection test failed.
        message: String,
    },

    /// HTTP 400 - the request was malformed or failed validation.
    #[error("invalid request - {0}")]
    InvalidRequest(ErrorResponse),

    /// HTTP 401 - the API key was rejected.
    #[error("authentication failed - check FRESHDESK_API_KEY ({0})")]
    Authentication(ErrorResponse),

    /// HTTP 403 - the authenticated agent lacks permission.
    #[error("not authorized - {0}")]
    Authorization(ErrorResponse),

    /// HTTP 404 - the resource does not exist.
    #[error("resource not found - {0}")]
    NotFound(ErrorResponse),

    /// HTTP 409 - the request conflicts with existing state.
    #[error("conflict - {0}")]
    Conflict(ErrorResponse),

    /// Any other non-success response, including a 429 that cannot be retried.
    #[error("Freshdesk API error - {0}")]
    Api(ErrorResponse),
}

impl FreshdeskError {
    /// Creates a configuration error for a missing environment variable.
    pub fn missing_env(var_name: &str) -> Self {
        FreshdeskError::Config(format!(
            "missing required environment variable: {}",
            var_name
        ))
    }

    /// Creates a configuration error for an invalid value.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        FreshdeskError::Config(message.into())
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        FreshdeskError::Validation(message.into())
    }

    /// Creates a timeout error.
    pub fn timeout(duration: Duration, operation: impl Into<String>) -> Self {
        FreshdeskError::Timeout {
            duration,
            operation: operation.into(),
        }
    }

    /// Creates a connection test error.
    pub fn connection_test(message: impl Into<String>) -> Self {
        FreshdeskError::ConnectionTest {
            message: message.into(),
        }
    }

    /// Maps a non-success response to the matching variant.
    pub fn from_response(response: ErrorResponse) -> Self {
        match response.status {
            StatusCode::BAD_REQUEST => FreshdeskError::InvalidRequest(response),
            StatusCode::UNAUTHORIZED => FreshdeskError::Authentication(response),
            StatusCode::FORBIDDEN => FreshdeskError::Authorization(response),
            StatusCode::NOT_FOUND => FreshdeskError::NotFound(response),
            StatusCode::CONFLICT => FreshdeskError::Conflict(response),
            _ => FreshdeskError::Api(response),
        }
    }

    /// Returns the HTTP response snapshot for status-derived errors.
    #[must_use]
    pub fn response(&self) -> Option<&ErrorResponse> {
        match self {
            FreshdeskError::InvalidRequest(r)
            | FreshdeskError::Authentication(r)
            | FreshdeskError::Authorization(r)
            | FreshdeskError::NotFound(r)
            | FreshdeskError::Conflict(r)
            | FreshdeskError::Api(r) => Some(r),
            _ => None,
        }
    }

    /// Returns the HTTP status for status-derived errors.
    #[must_use]
    pub fn status(&self) -> Option<StatusCode> {
        self.response().map(|r| r.status)
    }

    /// Returns true for 404 responses.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, FreshdeskError::NotFound(_))
    }

    /// Returns true if the server answered 429 and the client gave up.
    #[must_use]
    pub fn is_rate_limit(&self) -> bool {
        self.status() == Some(StatusCode::TOO_MANY_REQUESTS)
    }

    /// Sanitizes an error message to remove any occurrence of the API key.
    ///
    /// API keys must never appear in logs or error messages shown to users.
    /// Any occurrence is replaced with `[REDACTED]`.
    #[must_use]
    pub fn sanitize_message(message: &str, api_key: &str) -> String {
        if api_key.is_empty() {
            return message.to_string();
        }
        message.replace(api_key, "[REDACTED]")
    }

    /// Creates a sanitized version of this error's display message.
    #[must_use]
    pub fn sanitized_display(&self, api_key: &str) -> String {
        Self::sanitize_message(&self.to_string(), api_key)
    }
}
