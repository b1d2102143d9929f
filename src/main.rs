//! freshdesk-demo - smoke test for a Freshdesk account
//!
//! Connects with the configured API key, prints the authenticated agent and
//! the most recently updated tickets, then reports the remaining rate-limit
//! budget.
//!
//! # Configuration
//!
//! Set the following environment variables (or use a `.env` file):
//!
//! - `FRESHDESK_DOMAIN`: account name, host, or base URL of the helpdesk
//! - `FRESHDESK_API_KEY`: agent API key
//!
//! # Usage
//!
//! ```bash
//! FRESHDESK_DOMAIN=acme FRESHDESK_API_KEY=xxx ./freshdesk-demo 5
//! ```

use anyhow::{Context, Result};
use futures::{StreamExt, TryStreamExt};
use tracing_subscriber::{fmt, EnvFilter};

use freshdesk::models::TicketListFilter;
use freshdesk::{Config, FreshdeskClient, LinkHeaderPagination};

const DEFAULT_TICKET_COUNT: usize = 10;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    // stdout carries the report, logs go to stderr
    fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("freshdesk=info")),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    let count = match std::env::args().nth(1) {
        Some(arg) => arg
            .parse::<usize>()
            .with_context(|| format!("invalid ticket count: {}", arg))?,
        None => DEFAULT_TICKET_COUNT,
    };

    let config = Config::from_env().context("Failed to load configuration")?;
    tracing::debug!("Configuration loaded, base_url: {}", config.base_url);

    let client = FreshdeskClient::new(&config).context("Failed to create Freshdesk client")?;

    tracing::info!("Testing connection to Freshdesk...");
    client
        .test_connection()
        .await
        .context("Connection test failed")?;

    let me = client
        .agents()
        .me()
        .await
        .context("Failed to fetch the current agent")?;
    println!("Connected as {} <{}>", me.display_name(), me.email().unwrap_or("-"));

    let per_page = u32::try_from(count.clamp(1, 100)).unwrap_or(100);
    let tickets: Vec<_> = client
        .tickets()
        .list_paged(&TicketListFilter::new(), LinkHeaderPagination::new(1, per_page))
        .take(count)
        .try_collect()
        .await
        .context("Failed to list tickets")?;

    for ticket in &tickets {
        println!(
            "#{:<8} {:<10} {}",
            ticket.id,
            ticket
                .status
                .map(|s| format!("{:?}", s))
                .unwrap_or_else(|| "-".to_string()),
            ticket.display_subject()
        );
    }

    let limit = client.rate_limit();
    if let (Some(remaining), Some(total)) = (limit.remaining, limit.total) {
        println!("Rate limit: {}/{} requests left", remaining, total);
    }

    Ok(())
}
