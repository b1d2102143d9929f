//! Groups API (`/api/v2/groups`).

use crate::api::{require_changes, require_id, require_non_blank, API_PREFIX};
use crate::client::FreshdeskClient;
use crate::error::FreshdeskError;
use crate::models::{Group, GroupRequest};
use crate::pagination::{LinkHeaderPagination, Paginated, PaginationStrategy};
use crate::query::QueryBuilder;

/// Group operations. Obtained from [`FreshdeskClient::groups`].
#[derive(Debug, Clone, Copy)]
pub struct GroupsApi<'a> {
    client: &'a FreshdeskClient,
}

impl<'a> GroupsApi<'a> {
    pub(crate) fn new(client: &'a FreshdeskClient) -> Self {
        Self { client }
    }

    /// Gets a group.
    pub async fn get(&self, id: i64) -> Result<Group, FreshdeskError> {
        require_id("group_id", id)?;
        self.client.get(&format!("{}/groups/{}", API_PREFIX, id)).await
    }

    /// Lists all groups.
    pub fn list(&self) -> Paginated<Group> {
        self.client.paginate(
            format!("{}/groups", API_PREFIX),
            QueryBuilder::new(),
            PaginationStrategy::LinkHeader(LinkHeaderPagination::default()),
        )
    }

    /// Creates a group.
    pub async fn create(&self, request: &GroupRequest) -> Result<Group, FreshdeskError> {
        require_non_blank("group name", request.name.as_deref().unwrap_or_default())?;
        self.client.post(&format!("{}/groups", API_PREFIX), request).await
    }

    /// Updates a group.
    pub async fn update(&self, id: i64, request: &GroupRequest) -> Result<Group, FreshdeskError> {
        require_id("group_id", id)?;
        require_changes(request)?;
        self.client
            .put(&format!("{}/groups/{}", API_PREFIX, id), request)
            .await
    }

    /// Deletes a group.
    pub async fn delete(&self, id: i64) -> Result<(), FreshdeskError> {
        require_id("group_id", id)?;
        self.client.delete(&format!("{}/groups/{}", API_PREFIX, id)).await
    }
}
