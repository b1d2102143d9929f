//! HTTP client for the Freshdesk API.
//!
//! This module provides [`FreshdeskClient`], which performs every request
//! the resource APIs make: it authenticates, serializes bodies as JSON or
//! multipart, tracks the rate-limit headers, retries 429 responses after the
//! server-provided `Retry-After` delay, and maps failures to
//! [`FreshdeskError`].
//!
//! # Retry Logic
//!
//! Only HTTP 429 is retried. The client waits exactly the `Retry-After`
//! delay and re-issues the identical request, for as long as the server keeps
//! answering 429 (or up to `Config::max_rate_limit_retries`). A 429 without a
//! usable `Retry-After` fails immediately. Nothing else is retried.
//!
//! # Security
//!
//! The API key is never logged. The auth header is marked sensitive.

use std::sync::{Arc, RwLock};
use std::time::Duration;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, RETRY_AFTER};
use reqwest::{Client, Method, StatusCode};
use serde::de::DeserializeOwned;
use tokio_util::sync::CancellationToken;
use url::Url;

use crate::api::{
    AgentsApi, BusinessHoursApi, CannedResponsesApi, CompaniesApi, CompanyFieldsApi,
    ContactFieldsApi, ContactsApi, ConversationsApi, CustomObjectsApi, EmailConfigsApi,
    GroupsApi, ProductsApi, RolesApi, SatisfactionRatingsApi, SolutionsApi, TicketFieldsApi,
    TicketsApi, TimeEntriesApi,
};
use crate::body::{self, NoBody, RequestBody};
use crate::config::Config;
use crate::error::{ErrorResponse, FreshdeskError};
use crate::pagination::{self, Paginated, PaginationHooks, PaginationStrategy};
use crate::query::QueryBuilder;

/// Header carrying the request budget for the current window.
pub const RATE_LIMIT_TOTAL_HEADER: &str = "x-ratelimit-total";

/// Header carrying the requests left in the current window.
pub const RATE_LIMIT_REMAINING_HEADER: &str = "x-ratelimit-remaining";

/// Header carrying the cost of the request that was just served.
pub const RATE_LIMIT_USED_HEADER: &str = "x-ratelimit-used-currentrequest";

/// Password sent alongside the API key in Basic auth.
const API_KEY_PASSWORD: &str = "X";

/// Rate-limit counters reported by the most recent response.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RateLimit {
    /// Requests allowed per window (`X-RateLimit-Total`).
    pub total: Option<u64>,

    /// Requests left in the window (`X-RateLimit-Remaining`).
    pub remaining: Option<u64>,

    /// Cost of the last request (`X-RateLimit-Used-CurrentRequest`).
    pub used_by_last_request: Option<u64>,
}

/// A successful response read to completion.
#[derive(Debug)]
pub(crate) struct RawResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub url: Url,
    pub body: String,
}

/// HTTP client for the Freshdesk API.
///
/// Cloning is cheap; clones share the connection pool and the rate-limit
/// counters. Per-call context (cancellation, page hooks) is attached by
/// deriving a clone with [`with_cancellation`](Self::with_cancellation) or
/// [`with_page_hooks`](Self::with_page_hooks).
///
/// # Example
///
/// ```ignore
/// let config = Config::from_env()?;
/// let client = FreshdeskClient::new(&config)?;
///
/// let ticket = client.tickets().get(42, &[]).await?;
/// ```
#[derive(Clone)]
pub struct FreshdeskClient {
    /// The underlying HTTP client (cloning is cheap).
    http: Client,

    /// Root of the helpdesk, e.g. `https://acme.freshdesk.com/`.
    base_url: Url,

    /// Precomputed `Authorization` header.
    /// SECURITY: Never log this value!
    auth_header: HeaderValue,

    /// API key, kept only to scrub it from messages.
    api_key: String,

    /// Per-request timeout.
    timeout: Duration,

    /// Cap on consecutive 429 retries; `None` means unbounded.
    max_rate_limit_retries: Option<u32>,

    /// Counters from the latest response, shared between clones.
    rate_limit: Arc<RwLock<RateLimit>>,

    /// Cooperative cancellation for requests and page streams.
    cancel: CancellationToken,

    /// Callbacks around each fetched page.
    hooks: PaginationHooks,
}

impl std::fmt::Debug for FreshdeskClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FreshdeskClient")
            .field("base_url", &self.base_url.as_str())
            .field("timeout", &self.timeout)
            .field("max_rate_limit_retries", &self.max_rate_limit_retries)
            .finish_non_exhaustive()
    }
}

impl FreshdeskClient {
    /// Creates a new client with its own connection pool.
    ///
    /// # Errors
    ///
    /// Returns `FreshdeskError::HttpClient` if the HTTP client fails to
    /// initialize, or `FreshdeskError::Config` if the base URL is invalid.
    pub fn new(config: &Config) -> Result<Self, FreshdeskError> {
        let http = Client::builder()
            .user_agent(concat!("freshdesk-rs/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(FreshdeskError::HttpClient)?;

        Self::with_http_client(config, http)
    }

    /// Creates a client on top of an existing `reqwest::Client`.
    ///
    /// Use this to share one long-lived connection pool across the
    /// application.
    pub fn with_http_client(config: &Config, http: Client) -> Result<Self, FreshdeskError> {
        let base_url = Url::parse(&format!("{}/", config.base_url.trim_end_matches('/')))
            .map_err(|e| FreshdeskError::invalid_config(format!("invalid base URL: {}", e)))?;

        Ok(Self {
            http,
            base_url,
            auth_header: Self::basic_auth_header(config.api_key())?,
            api_key: config.api_key().to_string(),
            timeout: config.timeout,
            max_rate_limit_retries: config.max_rate_limit_retries,
            rate_limit: Arc::new(RwLock::new(RateLimit::default())),
            cancel: CancellationToken::new(),
            hooks: PaginationHooks::default(),
        })
    }

    /// Builds `Basic base64(api_key:X)`.
    fn basic_auth_header(api_key: &str) -> Result<HeaderValue, FreshdeskError> {
        let credentials = STANDARD.encode(format!("{}:{}", api_key, API_KEY_PASSWORD));
        let mut value = HeaderValue::from_str(&format!("Basic {}", credentials))
            .map_err(|_| FreshdeskError::invalid_config("API key contains invalid characters"))?;
        value.set_sensitive(true);
        Ok(value)
    }

    /// Returns a clone whose requests and page streams stop when `token` is cancelled.
    pub fn with_cancellation(&self, token: CancellationToken) -> Self {
        Self {
            cancel: token,
            ..self.clone()
        }
    }

    /// Returns a clone that invokes `hooks` around every fetched page.
    pub fn with_page_hooks(&self, hooks: PaginationHooks) -> Self {
        Self {
            hooks,
            ..self.clone()
        }
    }

    /// The cancellation token observed by this client.
    pub fn cancellation_token(&self) -> &CancellationToken {
        &self.cancel
    }

    /// The helpdesk root URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Rate-limit counters from the most recent response.
    pub fn rate_limit(&self) -> RateLimit {
        self.rate_limit
            .read()
            .map(|guard| *guard)
            .unwrap_or_default()
    }

    /// Returns the web URL for viewing a ticket in the helpdesk UI.
    pub fn ticket_web_url(&self, ticket_id: i64) -> String {
        format!("{}a/tickets/{}", self.base_url, ticket_id)
    }

    /// Tests connectivity and credentials by fetching the current agent.
    ///
    /// # Errors
    ///
    /// Returns `FreshdeskError::ConnectionTest` describing why the check failed.
    pub async fn test_connection(&self) -> Result<(), FreshdeskError> {
        tracing::debug!("Testing connection to Freshdesk");

        match self.agents().me().await {
            Ok(agent) => {
                tracing::info!(agent_id = agent.id, "Connection test successful");
                Ok(())
            }
            Err(FreshdeskError::Authentication(_)) => Err(FreshdeskError::connection_test(
                "Authentication failed - verify FRESHDESK_API_KEY is correct",
            )),
            Err(FreshdeskError::Timeout { duration, .. }) => {
                Err(FreshdeskError::connection_test(format!(
                    "Connection timed out after {:?} - verify FRESHDESK_DOMAIN is correct and reachable",
                    duration
                )))
            }
            Err(FreshdeskError::Http(e)) => {
                let message = FreshdeskError::sanitize_message(&e.to_string(), &self.api_key);
                Err(FreshdeskError::connection_test(format!(
                    "HTTP error: {} - verify FRESHDESK_DOMAIN is correct",
                    message
                )))
            }
            Err(e) => Err(FreshdeskError::connection_test(e.sanitized_display(&self.api_key))),
        }
    }

    // ========================================================================
    // Resource APIs
    // ========================================================================

    /// Tickets.
    pub fn tickets(&self) -> TicketsApi<'_> {
        TicketsApi::new(self)
    }

    /// Ticket replies, notes and forwards.
    pub fn conversations(&self) -> ConversationsApi<'_> {
        ConversationsApi::new(self)
    }

    /// Contacts.
    pub fn contacts(&self) -> ContactsApi<'_> {
        ContactsApi::new(self)
    }

    /// Contact field definitions.
    pub fn contact_fields(&self) -> ContactFieldsApi<'_> {
        ContactFieldsApi::new(self)
    }

    /// Agents.
    pub fn agents(&self) -> AgentsApi<'_> {
        AgentsApi::new(self)
    }

    /// Companies.
    pub fn companies(&self) -> CompaniesApi<'_> {
        CompaniesApi::new(self)
    }

    /// Company field definitions.
    pub fn company_fields(&self) -> CompanyFieldsApi<'_> {
        CompanyFieldsApi::new(self)
    }

    /// Agent groups.
    pub fn groups(&self) -> GroupsApi<'_> {
        GroupsApi::new(self)
    }

    /// Products.
    pub fn products(&self) -> ProductsApi<'_> {
        ProductsApi::new(self)
    }

    /// Ticket field definitions (admin).
    pub fn ticket_fields(&self) -> TicketFieldsApi<'_> {
        TicketFieldsApi::new(self)
    }

    /// Time entries.
    pub fn time_entries(&self) -> TimeEntriesApi<'_> {
        TimeEntriesApi::new(self)
    }

    /// Knowledge base categories, folders and articles.
    pub fn solutions(&self) -> SolutionsApi<'_> {
        SolutionsApi::new(self)
    }

    /// Custom object schemas and records.
    pub fn custom_objects(&self) -> CustomObjectsApi<'_> {
        CustomObjectsApi::new(self)
    }

    /// Canned responses and their folders.
    pub fn canned_responses(&self) -> CannedResponsesApi<'_> {
        CannedResponsesApi::new(self)
    }

    /// Agent roles.
    pub fn roles(&self) -> RolesApi<'_> {
        RolesApi::new(self)
    }

    /// Business hours.
    pub fn business_hours(&self) -> BusinessHoursApi<'_> {
        BusinessHoursApi::new(self)
    }

    /// Support mailboxes.
    pub fn email_configs(&self) -> EmailConfigsApi<'_> {
        EmailConfigsApi::new(self)
    }

    /// Customer satisfaction ratings.
    pub fn satisfaction_ratings(&self) -> SatisfactionRatingsApi<'_> {
        SatisfactionRatingsApi::new(self)
    }

    // ========================================================================
    // Request execution
    // ========================================================================

    /// Performs one non-paged operation and deserializes the response.
    ///
    /// An empty success body (e.g. 204) is deserialized from JSON `null`,
    /// so `T = ()` or `T = Option<_>` yields the empty value.
    pub(crate) async fn execute<T, B>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<T, FreshdeskError>
    where
        T: DeserializeOwned,
        B: RequestBody + ?Sized,
    {
        let url = self.resolve(path)?;
        let response = self.send_with_retry(method, url, body).await?;
        Self::deserialize_body(&response.body)
    }

    /// Fetches one page for the pagination engine.
    pub(crate) async fn fetch_page(&self, url: &str) -> Result<RawResponse, FreshdeskError> {
        let url = self.resolve(url)?;
        self.send_with_retry::<NoBody>(Method::GET, url, None).await
    }

    /// Starts a lazy multi-page listing.
    pub(crate) fn paginate<T>(
        &self,
        path: impl Into<String>,
        query: QueryBuilder,
        strategy: PaginationStrategy,
    ) -> Paginated<T>
    where
        T: DeserializeOwned + Send + 'static,
    {
        pagination::paginate(self.clone(), path.into(), query, strategy, self.hooks.clone())
    }

    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, FreshdeskError> {
        self.execute::<T, NoBody>(Method::GET, path, None).await
    }

    pub(crate) async fn post<T, B>(&self, path: &str, body: &B) -> Result<T, FreshdeskError>
    where
        T: DeserializeOwned,
        B: RequestBody + ?Sized,
    {
        self.execute(Method::POST, path, Some(body)).await
    }

    pub(crate) async fn put<T, B>(&self, path: &str, body: &B) -> Result<T, FreshdeskError>
    where
        T: DeserializeOwned,
        B: RequestBody + ?Sized,
    {
        self.execute(Method::PUT, path, Some(body)).await
    }

    /// PUT without a body, used by restore/toggle style endpoints.
    pub(crate) async fn put_empty<T: DeserializeOwned>(&self, path: &str) -> Result<T, FreshdeskError> {
        self.execute::<T, NoBody>(Method::PUT, path, None).await
    }

    pub(crate) async fn delete(&self, path: &str) -> Result<(), FreshdeskError> {
        self.execute::<(), NoBody>(Method::DELETE, path, None).await
    }

    /// Resolves an API path or absolute URL against the base URL.
    ///
    /// The result must share the base URL's scheme, host and port; the auth
    /// header is never sent anywhere else.
    pub(crate) fn resolve(&self, path: &str) -> Result<Url, FreshdeskError> {
        let url = self.base_url.join(path)?;
        if url.origin() != self.base_url.origin() {
            return Err(FreshdeskError::validation(format!(
                "refusing to send credentials to {}://{}: expected {}",
                url.scheme(),
                url.host_str().unwrap_or("?"),
                self.base_url.origin().ascii_serialization()
            )));
        }
        Ok(url)
    }

    fn ensure_not_cancelled(&self) -> Result<(), FreshdeskError> {
        if self.cancel.is_cancelled() {
            return Err(FreshdeskError::Cancelled);
        }
        Ok(())
    }

    pub(crate) fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Builds a request, choosing JSON or multipart from the body's capability.
    fn build_request<B>(
        &self,
        method: Method,
        url: Url,
        body: Option<&B>,
    ) -> Result<reqwest::RequestBuilder, FreshdeskError>
    where
        B: RequestBody + ?Sized,
    {
        let mut req = self
            .http
            .request(method, url)
            .timeout(self.timeout)
            .header(AUTHORIZATION, self.auth_header.clone())
            .header(ACCEPT, "application/json");

        if let Some(body) = body {
            if body.has_attachments() {
                req = req.multipart(body::build_multipart(body)?);
            } else {
                req = req.json(body);
            }
        }

        Ok(req)
    }

    /// Sends a request, re-issuing it after each 429 that carries `Retry-After`.
    async fn send_with_retry<B>(
        &self,
        method: Method,
        url: Url,
        body: Option<&B>,
    ) -> Result<RawResponse, FreshdeskError>
    where
        B: RequestBody + ?Sized,
    {
        let mut rate_limit_retries = 0u32;

        loop {
            self.ensure_not_cancelled()?;

            let request = self.build_request(method.clone(), url.clone(), body)?;

            tracing::debug!(
                method = %method,
                path = %url.path(),
                multipart = body.map(|b| b.has_attachments()).unwrap_or(false),
                "Making Freshdesk API request"
            );

            let response = tokio::select! {
                biased;
                _ = self.cancel.cancelled() => return Err(FreshdeskError::Cancelled),
                result = request.send() => result.map_err(|e| {
                    if e.is_timeout() {
                        FreshdeskError::timeout(self.timeout, format!("{} {}", method, url.path()))
                    } else {
                        FreshdeskError::Http(e)
                    }
                })?,
            };

            self.record_rate_limit(response.headers());
            let status = response.status();

            if status == StatusCode::TOO_MANY_REQUESTS {
                let retry_after = parse_retry_after(response.headers());
                let within_cap = self
                    .max_rate_limit_retries
                    .map_or(true, |max| rate_limit_retries < max);

                match retry_after {
                    Some(delay) if within_cap => {
                        rate_limit_retries += 1;
                        tracing::warn!(
                            method = %method,
                            path = %url.path(),
                            retry = rate_limit_retries,
                            delay_secs = delay.as_secs(),
                            "Rate limited by Freshdesk, waiting for Retry-After"
                        );
                        drop(response);

                        tokio::select! {
                            biased;
                            _ = self.cancel.cancelled() => return Err(FreshdeskError::Cancelled),
                            _ = tokio::time::sleep(delay) => {}
                        }
                        continue;
                    }
                    Some(_) => {
                        tracing::warn!(
                            retries = rate_limit_retries,
                            "Rate limit retries exhausted"
                        );
                    }
                    None => {
                        tracing::warn!("Rate limited without a usable Retry-After header");
                    }
                }
            }

            if !status.is_success() {
                return Err(self.handle_http_error(response).await);
            }

            let headers = response.headers().clone();
            let final_url = response.url().clone();
            let text = response.text().await.map_err(FreshdeskError::Http)?;

            tracing::trace!(body = %text, "Freshdesk API response");

            return Ok(RawResponse {
                status,
                headers,
                url: final_url,
                body: text,
            });
        }
    }

    /// Converts a non-success response into the matching error variant.
    async fn handle_http_error(&self, response: reqwest::Response) -> FreshdeskError {
        let status = response.status();
        let headers = response.headers().clone();
        let url = response.url().to_string();
        let body = response.text().await.unwrap_or_default();
        let body = FreshdeskError::sanitize_message(&body, &self.api_key);

        tracing::debug!(status = %status, url = %url, "Freshdesk API returned an error");

        FreshdeskError::from_response(ErrorResponse::new(status, headers, url, body))
    }

    fn record_rate_limit(&self, headers: &HeaderMap) {
        let total = header_u64(headers, RATE_LIMIT_TOTAL_HEADER);
        let remaining = header_u64(headers, RATE_LIMIT_REMAINING_HEADER);
        let used = header_u64(headers, RATE_LIMIT_USED_HEADER);

        if total.is_none() && remaining.is_none() && used.is_none() {
            return;
        }

        if let Ok(mut guard) = self.rate_limit.write() {
            *guard = RateLimit {
                total: total.or(guard.total),
                remaining: remaining.or(guard.remaining),
                used_by_last_request: used,
            };
        }
    }

    fn deserialize_body<T: DeserializeOwned>(body: &str) -> Result<T, FreshdeskError> {
        if body.trim().is_empty() {
            return Ok(serde_json::from_str("null")?);
        }
        Ok(serde_json::from_str(body)?)
    }
}

/// Reads an integer header.
fn header_u64(headers: &HeaderMap, name: &str) -> Option<u64> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.trim().parse::<u64>().ok())
}

/// Parses `Retry-After` as a delay in seconds.
fn parse_retry_after(headers: &HeaderMap) -> Option<Duration> {
    header_u64(headers, RETRY_AFTER.as_str()).map(Duration::from_secs)
}
