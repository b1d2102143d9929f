//! # freshdesk
//!
//! A typed async client for the Freshdesk REST API (v2).
//!
//! ## Features
//!
//! - **Resources**: tickets, conversations, contacts, agents, companies,
//!   groups, products, ticket fields, time entries, the knowledge base,
//!   custom objects, canned responses, satisfaction ratings and account
//!   configuration
//! - **Pagination**: every listing is a lazy [`Paginated`] stream that
//!   fetches the next page only when the previous one is drained
//! - **Rate limits**: 429 responses are retried after the server's
//!   `Retry-After` delay; the latest rate-limit counters are exposed
//! - **Attachments**: requests carrying files are sent as multipart forms
//! - **Security**: the API key is never logged or exposed in error messages
//!
//! ## Architecture
//!
//! - [`config`] - Configuration from code or environment variables
//! - [`error`] - Error type with one variant per failure class
//! - [`client`] - Authenticated HTTP transport shared by all resources
//! - [`api`] - One handle per resource family (`client.tickets()`, ...)
//! - [`models`] - Request and response types
//! - [`pagination`] - Page-number, Link-header and token pagination
//! - [`query`] - Query-string and search-expression builders
//! - [`body`] - Request bodies and file attachments
//!
//! ## Configuration
//!
//! - `FRESHDESK_DOMAIN`: account name (`acme`), host or base URL
//! - `FRESHDESK_API_KEY`: agent API key
//!
//! Optional:
//! - `FRESHDESK_TIMEOUT_SECS`: per-request timeout (default 30)
//! - `FRESHDESK_MAX_RATE_LIMIT_RETRIES`: cap on 429 retries per request
//! - `RUST_LOG`: log level (e.g., `freshdesk=debug`)
//!
//! ## Example
//!
//! ```ignore
//! use futures::TryStreamExt;
//! use freshdesk::{Config, FreshdeskClient, SearchQuery};
//! use freshdesk::models::{CreateTicketRequest, TicketPriority};
//!
//! async fn example() -> Result<(), freshdesk::FreshdeskError> {
//!     let client = FreshdeskClient::new(&Config::from_env()?)?;
//!
//!     let ticket = client
//!         .tickets()
//!         .create(
//!             &CreateTicketRequest::new("jane@example.com", "Printer on fire", "Third floor")
//!                 .with_priority(TicketPriority::Urgent),
//!         )
//!         .await?;
//!
//!     let mut urgent = client.tickets().search(SearchQuery::eq("priority", 4));
//!     while let Some(t) = urgent.try_next().await? {
//!         println!("#{}: {}", t.id, t.display_subject());
//!     }
//!
//!     client.tickets().delete(ticket.id).await
//! }
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod api;
pub mod body;
pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod pagination;
pub mod query;

pub use body::{Attachment, RequestBody};
pub use client::{FreshdeskClient, RateLimit};
pub use config::Config;
pub use error::{ErrorResponse, FreshdeskError};
pub use pagination::{
    LinkHeaderPagination, PageNumberPagination, Paginated, PaginationHooks, PaginationStrategy,
    TokenPagination,
};
pub use query::{QueryBuilder, SearchQuery};
pub use tokio_util::sync::CancellationToken;
