//! Configuration management for the Freshdesk client.
//!
//! Configuration can be built directly with [`Config::new`] or loaded from
//! environment variables with [`Config::from_env`]. Both paths validate that
//! the domain and API key are present and not blank.

use std::env;
use std::time::Duration;

use crate::error::FreshdeskError;

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration for connecting to a Freshdesk helpdesk.
///
/// The API key is stored but never logged or exposed in error messages.
#[derive(Clone)]
pub struct Config {
    /// Base URL of the helpdesk (e.g., `https://acme.freshdesk.com`), without trailing slash.
    pub base_url: String,

    /// Agent API key used as the Basic auth username.
    /// This value must never be logged or included in error messages.
    api_key: String,

    /// Per-request timeout.
    pub timeout: Duration,

    /// Upper bound on consecutive 429 retries for a single request.
    /// `None` keeps retrying for as long as the server supplies `Retry-After`.
    pub max_rate_limit_retries: Option<u32>,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("base_url", &self.base_url)
            .field("api_key", &"[REDACTED]")
            .field("timeout", &self.timeout)
            .field("max_rate_limit_retries", &self.max_rate_limit_retries)
            .finish()
    }
}

impl Config {
    /// Creates a validated configuration.
    ///
    /// `domain` may be a bare account name (`acme`), a host
    /// (`acme.freshdesk.com`), or a full URL (`https://support.acme.com`).
    ///
    /// # Errors
    ///
    /// Returns `FreshdeskError::Config` if either value is blank or invalid.
    pub fn new(domain: impl Into<String>, api_key: impl Into<String>) -> Result<Self, FreshdeskError> {
        let domain = domain.into();
        let api_key = api_key.into();

        if domain.trim().is_empty() {
            return Err(FreshdeskError::invalid_config("domain must not be blank"));
        }
        if api_key.trim().is_empty() {
            return Err(FreshdeskError::invalid_config("API key must not be blank"));
        }

        let base_url = Self::normalize_domain(&domain)?;
        Self::validate_api_key(&api_key)?;

        Ok(Config {
            base_url,
            api_key: api_key.trim().to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            max_rate_limit_retries: None,
        })
    }

    /// Loads configuration from environment variables.
    ///
    /// # Required Environment Variables
    ///
    /// - `FRESHDESK_DOMAIN`: account name, host, or base URL of the helpdesk
    /// - `FRESHDESK_API_KEY`: the agent API key
    ///
    /// # Optional Environment Variables
    ///
    /// - `FRESHDESK_TIMEOUT_SECS`: request timeout (default 30)
    /// - `FRESHDESK_MAX_RATE_LIMIT_RETRIES`: cap on 429 retries per request
    ///
    /// # Errors
    ///
    /// Returns `FreshdeskError::Config` if any required variable is missing
    /// or if values fail validation.
    pub fn from_env() -> Result<Self, FreshdeskError> {
        let domain = Self::get_required_env("FRESHDESK_DOMAIN")?;
        let api_key = Self::get_required_env("FRESHDESK_API_KEY")?;

        let mut config = Self::new(domain, api_key)?;

        if let Some(secs) = Self::get_optional_u64("FRESHDESK_TIMEOUT_SECS")? {
            config = config.with_timeout(Duration::from_secs(secs));
        }
        if let Some(retries) = Self::get_optional_u64("FRESHDESK_MAX_RATE_LIMIT_RETRIES")? {
            let retries = u32::try_from(retries).map_err(|_| {
                FreshdeskError::invalid_config("FRESHDESK_MAX_RATE_LIMIT_RETRIES is out of range")
            })?;
            config = config.with_max_rate_limit_retries(retries);
        }

        Ok(config)
    }

    /// Sets the per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Caps the number of consecutive 429 retries for one request.
    pub fn with_max_rate_limit_retries(mut self, retries: u32) -> Self {
        self.max_rate_limit_retries = Some(retries);
        self
    }

    /// Returns the API key. Only the client uses this, to build the auth header.
    pub(crate) fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Gets a required environment variable, returning an error if missing or empty.
    fn get_required_env(name: &str) -> Result<String, FreshdeskError> {
        env::var(name)
            .map_err(|_| FreshdeskError::missing_env(name))
            .and_then(|value| {
                if value.trim().is_empty() {
                    Err(FreshdeskError::missing_env(name))
                } else {
                    Ok(value)
                }
            })
    }

    fn get_optional_u64(name: &str) -> Result<Option<u64>, FreshdeskError> {
        match env::var(name) {
            Ok(value) if !value.trim().is_empty() => value
                .trim()
                .parse::<u64>()
                .map(Some)
                .map_err(|_| FreshdeskError::invalid_config(format!("{} must be a non-negative integer", name))),
            _ => Ok(None),
        }
    }

    /// Turns an account name, host or URL into a base URL.
    fn normalize_domain(domain: &str) -> Result<String, FreshdeskError> {
        let domain = domain.trim().trim_end_matches('/');

        let url = if domain.starts_with("http://") || domain.starts_with("https://") {
            domain.to_string()
        } else if domain.contains('.') {
            format!("https://{}", domain)
        } else {
            format!("https://{}.freshdesk.com", domain)
        };

        // Strip an /api/v2 suffix if the caller pasted the API root.
        let url = url
            .trim_end_matches("/api/v2")
            .trim_end_matches("/api")
            .to_string();

        let parsed = url::Url::parse(&url)
            .map_err(|e| FreshdeskError::invalid_config(format!("invalid domain: {}", e)))?;
        if parsed.host_str().is_none() {
            return Err(FreshdeskError::invalid_config("domain has no host"));
        }

        Ok(url)
    }

    /// Validates the API key is not a placeholder value.
    fn validate_api_key(key: &str) -> Result<(), FreshdeskError> {
        let key_lower = key.to_lowercase();
        let placeholder_patterns = ["your_api_key", "your_key", "placeholder", "changeme"];

        for pattern in placeholder_patterns {
            if key_lower.contains(pattern) {
                return Err(FreshdeskError::invalid_config(
                    "FRESHDESK_API_KEY appears to be a placeholder value",
                ));
            }
        }

        Ok(())
    }
}
