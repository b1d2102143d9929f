//! Ticket field administration (`/api/v2/admin/ticket_fields`).

use crate::api::{require_changes, require_id, require_non_blank, API_PREFIX};
use crate::client::FreshdeskClient;
use crate::error::FreshdeskError;
use crate::models::{TicketField, TicketFieldRequest};
use crate::query::QueryBuilder;

/// Ticket field operations. Obtained from [`FreshdeskClient::ticket_fields`].
///
/// These endpoints need an admin API key.
#[derive(Debug, Clone, Copy)]
pub struct TicketFieldsApi<'a> {
    client: &'a FreshdeskClient,
}

impl<'a> TicketFieldsApi<'a> {
    pub(crate) fn new(client: &'a FreshdeskClient) -> Self {
        Self { client }
    }

    /// Lists ticket fields, optionally only those of one type
    /// (e.g. `custom_dropdown`).
    pub async fn list(&self, field_type: Option<&str>) -> Result<Vec<TicketField>, FreshdeskError> {
        let path = QueryBuilder::new()
            .push_opt("type", field_type)
            .apply_to(&format!("{}/admin/ticket_fields", API_PREFIX));
        self.client.get(&path).await
    }

    /// Gets a ticket field with its full choice tree.
    pub async fn get(&self, id: i64) -> Result<TicketField, FreshdeskError> {
        require_id("ticket_field_id", id)?;
        self.client
            .get(&format!("{}/admin/ticket_fields/{}", API_PREFIX, id))
            .await
    }

    /// Creates a custom ticket field.
    pub async fn create(&self, request: &TicketFieldRequest) -> Result<TicketField, FreshdeskError> {
        require_non_blank("label", request.label.as_deref().unwrap_or_default())?;
        require_non_blank(
            "label_for_customers",
            request.label_for_customers.as_deref().unwrap_or_default(),
        )?;

        let field: TicketField = self
            .client
            .post(&format!("{}/admin/ticket_fields", API_PREFIX), request)
            .await?;

        tracing::info!(ticket_field_id = field.id, "Created ticket field");
        Ok(field)
    }

    /// Updates a ticket field.
    pub async fn update(
        &self,
        id: i64,
        request: &TicketFieldRequest,
    ) -> Result<TicketField, FreshdeskError> {
        require_id("ticket_field_id", id)?;
        require_changes(request)?;
        self.client
            .put(&format!("{}/admin/ticket_fields/{}", API_PREFIX, id), request)
            .await
    }

    /// Deletes a custom ticket field.
    pub async fn delete(&self, id: i64) -> Result<(), FreshdeskError> {
        require_id("ticket_field_id", id)?;
        self.client
            .delete(&format!("{}/admin/ticket_fields/{}", API_PREFIX, id))
            .await
    }
}
