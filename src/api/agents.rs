//! Agents API (`/api/v2/agents`).

use crate::api::{require_changes, require_id, API_PREFIX};
use crate::client::FreshdeskClient;
use crate::error::FreshdeskError;
use crate::models::{Agent, AgentListFilter, UpdateAgentRequest};
use crate::pagination::{LinkHeaderPagination, Paginated, PaginationStrategy};

/// Agent operations. Obtained from [`FreshdeskClient::agents`].
#[derive(Debug, Clone, Copy)]
pub struct AgentsApi<'a> {
    client: &'a FreshdeskClient,
}

impl<'a> AgentsApi<'a> {
    pub(crate) fn new(client: &'a FreshdeskClient) -> Self {
        Self { client }
    }

    /// Gets an agent.
    pub async fn get(&self, id: i64) -> Result<Agent, FreshdeskError> {
        require_id("agent_id", id)?;
        self.client.get(&format!("{}/agents/{}", API_PREFIX, id)).await
    }

    /// The agent owning the API key.
    pub async fn me(&self) -> Result<Agent, FreshdeskError> {
        self.client.get(&format!("{}/agents/me", API_PREFIX)).await
    }

    /// Lists agents matching `filter`.
    pub fn list(&self, filter: &AgentListFilter) -> Paginated<Agent> {
        self.client.paginate(
            format!("{}/agents", API_PREFIX),
            filter.to_query(),
            PaginationStrategy::LinkHeader(LinkHeaderPagination::default()),
        )
    }

    /// Updates an agent.
    pub async fn update(&self, id: i64, request: &UpdateAgentRequest) -> Result<Agent, FreshdeskError> {
        require_id("agent_id", id)?;
        require_changes(request)?;
        self.client
            .put(&format!("{}/agents/{}", API_PREFIX, id), request)
            .await
    }

    /// Downgrades an agent to a contact.
    pub async fn delete(&self, id: i64) -> Result<(), FreshdeskError> {
        require_id("agent_id", id)?;
        self.client.delete(&format!("{}/agents/{}", API_PREFIX, id)).await?;

        tracing::info!(agent_id = id, "Deleted agent");
        Ok(())
    }
}
