//! Tickets API (`/api/v2/tickets`).

use crate::api::{require_changes, require_id, API_PREFIX};
use crate::client::FreshdeskClient;
use crate::error::FreshdeskError;
use crate::models::{
    CreateTicketRequest, OutboundEmailRequest, Ticket, TicketInclude, TicketListFilter,
    TicketWatchers, UpdateTicketRequest,
};
use crate::pagination::{self, LinkHeaderPagination, PageNumberPagination, Paginated, PaginationStrategy};
use crate::query::{QueryBuilder, SearchQuery};

/// Ticket operations. Obtained from [`FreshdeskClient::tickets`].
#[derive(Debug, Clone, Copy)]
pub struct TicketsApi<'a> {
    client: &'a FreshdeskClient,
}

impl<'a> TicketsApi<'a> {
    pub(crate) fn new(client: &'a FreshdeskClient) -> Self {
        Self { client }
    }

    /// Gets a single ticket.
    ///
    /// # Arguments
    ///
    /// * `id` - The ticket ID
    /// * `include` - Extra data to embed (requester, stats, company, conversations)
    ///
    /// # Errors
    ///
    /// Returns `FreshdeskError::NotFound` if the ticket doesn't exist.
    ///
    /// # Example
    ///
    /// ```ignore
    /// let ticket = client.tickets().get(42, &[TicketInclude::Requester]).await?;
    /// println!("Subject: {}", ticket.display_subject());
    /// ```
    pub async fn get(&self, id: i64, include: &[TicketInclude]) -> Result<Ticket, FreshdeskError> {
        require_id("ticket_id", id)?;
        let path = QueryBuilder::new()
            .push_list("include", include)
            .apply_to(&format!("{}/tickets/{}", API_PREFIX, id));

        self.client.get(&path).await
    }

    /// Lists tickets matching `filter`, 100 per page.
    ///
    /// # Example
    ///
    /// ```ignore
    /// use futures::TryStreamExt;
    ///
    /// let tickets: Vec<Ticket> = client
    ///     .tickets()
    ///     .list(&TicketListFilter::new().email("jane@example.com"))
    ///     .try_collect()
    ///     .await?;
    /// ```
    pub fn list(&self, filter: &TicketListFilter) -> Paginated<Ticket> {
        self.list_paged(filter, LinkHeaderPagination::default())
    }

    /// Lists tickets with explicit paging.
    pub fn list_paged(&self, filter: &TicketListFilter, paging: LinkHeaderPagination) -> Paginated<Ticket> {
        self.client.paginate(
            format!("{}/tickets", API_PREFIX),
            filter.to_query(),
            PaginationStrategy::LinkHeader(paging),
        )
    }

    /// Searches tickets with a search-API expression.
    ///
    /// The search API serves at most 10 pages of 30 results; the stream ends
    /// there even if `total` is larger.
    ///
    /// # Example
    ///
    /// ```ignore
    /// let query = SearchQuery::eq("status", 2).and(SearchQuery::at_least("priority", 3));
    /// let mut urgent = client.tickets().search(query);
    /// while let Some(ticket) = urgent.try_next().await? { /* ... */ }
    /// ```
    pub fn search(&self, query: impl Into<SearchQuery>) -> Paginated<Ticket> {
        self.search_paged(query, PageNumberPagination::default())
    }

    /// Like [`search`](Self::search), over the pages `paging` selects.
    pub fn search_paged(
        &self,
        query: impl Into<SearchQuery>,
        paging: PageNumberPagination,
    ) -> Paginated<Ticket> {
        let rendered = match query.into().render() {
            Ok(rendered) => rendered,
            Err(e) => return pagination::failed(e),
        };
        self.client.paginate(
            format!("{}/search/tickets", API_PREFIX),
            QueryBuilder::new().push("query", rendered),
            PaginationStrategy::PageNumber(paging),
        )
    }

    /// Creates a ticket. Sent as multipart when the request has attachments.
    ///
    /// # Errors
    ///
    /// Returns `FreshdeskError::Validation` if no requester is identified,
    /// or `FreshdeskError::InvalidRequest` with field errors from Freshdesk.
    pub async fn create(&self, request: &CreateTicketRequest) -> Result<Ticket, FreshdeskError> {
        request.validate()?;
        let ticket: Ticket = self
            .client
            .post(&format!("{}/tickets", API_PREFIX), request)
            .await?;

        tracing::info!(ticket_id = ticket.id, "Created ticket");
        Ok(ticket)
    }

    /// Creates a ticket by sending an email to a customer.
    pub async fn create_outbound_email(
        &self,
        request: &OutboundEmailRequest,
    ) -> Result<Ticket, FreshdeskError> {
        require_id("email_config_id", request.email_config_id)?;
        let ticket: Ticket = self
            .client
            .post(&format!("{}/tickets/outbound_email", API_PREFIX), request)
            .await?;

        tracing::info!(ticket_id = ticket.id, "Created outbound email ticket");
        Ok(ticket)
    }

    /// Updates a ticket. Only fields set on `request` are changed.
    ///
    /// # Errors
    ///
    /// Returns `FreshdeskError::Validation` if `request` changes nothing.
    pub async fn update(&self, id: i64, request: &UpdateTicketRequest) -> Result<Ticket, FreshdeskError> {
        require_id("ticket_id", id)?;
        require_changes(request)?;

        self.client
            .put(&format!("{}/tickets/{}", API_PREFIX, id), request)
            .await
    }

    /// Moves a ticket to the trash.
    pub async fn delete(&self, id: i64) -> Result<(), FreshdeskError> {
        require_id("ticket_id", id)?;
        self.client.delete(&format!("{}/tickets/{}", API_PREFIX, id)).await?;

        tracing::info!(ticket_id = id, "Deleted ticket");
        Ok(())
    }

    /// Restores a deleted ticket.
    pub async fn restore(&self, id: i64) -> Result<(), FreshdeskError> {
        require_id("ticket_id", id)?;
        self.client
            .put_empty(&format!("{}/tickets/{}/restore", API_PREFIX, id))
            .await
    }

    /// Agents watching a ticket.
    pub async fn list_watchers(&self, id: i64) -> Result<TicketWatchers, FreshdeskError> {
        require_id("ticket_id", id)?;
        self.client
            .get(&format!("{}/tickets/{}/watchers", API_PREFIX, id))
            .await
    }

    /// Deletes an attachment from a ticket or conversation.
    pub async fn delete_attachment(&self, attachment_id: i64) -> Result<(), FreshdeskError> {
        require_id("attachment_id", attachment_id)?;
        self.client
            .delete(&format!("{}/attachments/{}", API_PREFIX, attachment_id))
            .await
    }
}
