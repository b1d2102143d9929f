//! Account configuration: roles, business hours and support mailboxes.

use crate::api::{require_id, API_PREFIX};
use crate::client::FreshdeskClient;
use crate::error::FreshdeskError;
use crate::models::{BusinessHours, EmailConfig, Role};
use crate::pagination::{LinkHeaderPagination, Paginated, PaginationStrategy};
use crate::query::QueryBuilder;

/// Agent roles. Obtained from [`FreshdeskClient::roles`].
#[derive(Debug, Clone, Copy)]
pub struct RolesApi<'a> {
    client: &'a FreshdeskClient,
}

impl<'a> RolesApi<'a> {
    pub(crate) fn new(client: &'a FreshdeskClient) -> Self {
        Self { client }
    }

    /// Lists all roles.
    pub async fn list(&self) -> Result<Vec<Role>, FreshdeskError> {
        self.client.get(&format!("{}/roles", API_PREFIX)).await
    }

    /// Gets a role.
    pub async fn get(&self, id: i64) -> Result<Role, FreshdeskError> {
        require_id("role_id", id)?;
        self.client.get(&format!("{}/roles/{}", API_PREFIX, id)).await
    }
}

/// Business hours calendars. Obtained from [`FreshdeskClient::business_hours`].
#[derive(Debug, Clone, Copy)]
pub struct BusinessHoursApi<'a> {
    client: &'a FreshdeskClient,
}

impl<'a> BusinessHoursApi<'a> {
    pub(crate) fn new(client: &'a FreshdeskClient) -> Self {
        Self { client }
    }

    /// Lists all calendars.
    pub async fn list(&self) -> Result<Vec<BusinessHours>, FreshdeskError> {
        self.client.get(&format!("{}/business_hours", API_PREFIX)).await
    }

    /// Gets a calendar.
    pub async fn get(&self, id: i64) -> Result<BusinessHours, FreshdeskError> {
        require_id("business_hours_id", id)?;
        self.client
            .get(&format!("{}/business_hours/{}", API_PREFIX, id))
            .await
    }
}

/// Support mailboxes. Obtained from [`FreshdeskClient::email_configs`].
#[derive(Debug, Clone, Copy)]
pub struct EmailConfigsApi<'a> {
    client: &'a FreshdeskClient,
}

impl<'a> EmailConfigsApi<'a> {
    pub(crate) fn new(client: &'a FreshdeskClient) -> Self {
        Self { client }
    }

    /// Lists all mailboxes.
    pub fn list(&self) -> Paginated<EmailConfig> {
        self.client.paginate(
            format!("{}/email_configs", API_PREFIX),
            QueryBuilder::new(),
            PaginationStrategy::LinkHeader(LinkHeaderPagination::default()),
        )
    }

    /// Gets a mailbox.
    pub async fn get(&self, id: i64) -> Result<EmailConfig, FreshdeskError> {
        require_id("email_config_id", id)?;
        self.client
            .get(&format!("{}/email_configs/{}", API_PREFIX, id))
            .await
    }
}
