//! Time entries API.

use crate::api::{require_changes, require_id, API_PREFIX};
use crate::client::FreshdeskClient;
use crate::error::FreshdeskError;
use crate::models::{TimeEntry, TimeEntryFilter, TimeEntryRequest};
use crate::pagination::{self, LinkHeaderPagination, Paginated, PaginationStrategy};
use crate::query::QueryBuilder;

/// Time entry operations. Obtained from [`FreshdeskClient::time_entries`].
#[derive(Debug, Clone, Copy)]
pub struct TimeEntriesApi<'a> {
    client: &'a FreshdeskClient,
}

impl<'a> TimeEntriesApi<'a> {
    pub(crate) fn new(client: &'a FreshdeskClient) -> Self {
        Self { client }
    }

    /// Lists time entries across all tickets.
    pub fn list(&self, filter: &TimeEntryFilter) -> Paginated<TimeEntry> {
        self.client.paginate(
            format!("{}/time_entries", API_PREFIX),
            filter.to_query(),
            PaginationStrategy::LinkHeader(LinkHeaderPagination::default()),
        )
    }

    /// Lists time entries of one ticket.
    pub fn list_for_ticket(&self, ticket_id: i64) -> Paginated<TimeEntry> {
        if let Err(e) = require_id("ticket_id", ticket_id) {
            return pagination::failed(e);
        }
        self.client.paginate(
            format!("{}/tickets/{}/time_entries", API_PREFIX, ticket_id),
            QueryBuilder::new(),
            PaginationStrategy::LinkHeader(LinkHeaderPagination::default()),
        )
    }

    /// Logs time on a ticket.
    pub async fn create(
        &self,
        ticket_id: i64,
        request: &TimeEntryRequest,
    ) -> Result<TimeEntry, FreshdeskError> {
        require_id("ticket_id", ticket_id)?;
        request.validate()?;
        self.client
            .post(&format!("{}/tickets/{}/time_entries", API_PREFIX, ticket_id), request)
            .await
    }

    /// Updates a time entry.
    pub async fn update(&self, id: i64, request: &TimeEntryRequest) -> Result<TimeEntry, FreshdeskError> {
        require_id("time_entry_id", id)?;
        require_changes(request)?;
        request.validate()?;
        self.client
            .put(&format!("{}/time_entries/{}", API_PREFIX, id), request)
            .await
    }

    /// Starts a stopped timer or stops a running one.
    pub async fn toggle_timer(&self, id: i64) -> Result<TimeEntry, FreshdeskError> {
        require_id("time_entry_id", id)?;
        self.client
            .put_empty(&format!("{}/time_entries/{}/toggle_timer", API_PREFIX, id))
            .await
    }

    /// Deletes a time entry.
    pub async fn delete(&self, id: i64) -> Result<(), FreshdeskError> {
        require_id("time_entry_id", id)?;
        self.client
            .delete(&format!("{}/time_entries/{}", API_PREFIX, id))
            .await
    }
}
