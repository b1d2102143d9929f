//! Contacts API (`/api/v2/contacts`).

use crate::api::{require_changes, require_id, API_PREFIX};
use crate::client::FreshdeskClient;
use crate::error::FreshdeskError;
use crate::models::{
    Contact, ContactListFilter, ContactRequest, MakeAgentRequest, MakeAgentResponse,
    MergeContactsRequest,
};
use crate::pagination::{self, LinkHeaderPagination, PageNumberPagination, Paginated, PaginationStrategy};
use crate::query::{QueryBuilder, SearchQuery};

/// Contact operations. Obtained from [`FreshdeskClient::contacts`].
#[derive(Debug, Clone, Copy)]
pub struct ContactsApi<'a> {
    client: &'a FreshdeskClient,
}

impl<'a> ContactsApi<'a> {
    pub(crate) fn new(client: &'a FreshdeskClient) -> Self {
        Self { client }
    }

    /// Gets a contact.
    ///
    /// # Errors
    ///
    /// Returns `FreshdeskError::NotFound` if the contact doesn't exist.
    pub async fn get(&self, id: i64) -> Result<Contact, FreshdeskError> {
        require_id("contact_id", id)?;
        self.client.get(&format!("{}/contacts/{}", API_PREFIX, id)).await
    }

    /// Lists contacts matching `filter`, 100 per page.
    pub fn list(&self, filter: &ContactListFilter) -> Paginated<Contact> {
        self.list_paged(filter, LinkHeaderPagination::default())
    }

    /// Lists contacts with explicit paging.
    ///
    /// # Example
    ///
    /// ```ignore
    /// // Two per page, starting at page 1
    /// let contacts = client
    ///     .contacts()
    ///     .list_paged(&ContactListFilter::default(), LinkHeaderPagination::new(1, 2));
    /// ```
    pub fn list_paged(
        &self,
        filter: &ContactListFilter,
        paging: LinkHeaderPagination,
    ) -> Paginated<Contact> {
        self.client.paginate(
            format!("{}/contacts", API_PREFIX),
            filter.to_query(),
            PaginationStrategy::LinkHeader(paging),
        )
    }

    /// Searches contacts with a search-API expression (at most 10 pages).
    pub fn search(&self, query: impl Into<SearchQuery>) -> Paginated<Contact> {
        self.search_paged(query, PageNumberPagination::default())
    }

    /// Like [`search`](Self::search), over the pages `paging` selects.
    pub fn search_paged(
        &self,
        query: impl Into<SearchQuery>,
        paging: PageNumberPagination,
    ) -> Paginated<Contact> {
        let rendered = match query.into().render() {
            Ok(rendered) => rendered,
            Err(e) => return pagination::failed(e),
        };
        self.client.paginate(
            format!("{}/search/contacts", API_PREFIX),
            QueryBuilder::new().push("query", rendered),
            PaginationStrategy::PageNumber(paging),
        )
    }

    /// Creates a contact. Sent as multipart when an avatar is attached.
    pub async fn create(&self, request: &ContactRequest) -> Result<Contact, FreshdeskError> {
        if request.name.as_deref().map_or(true, |n| n.trim().is_empty()) {
            return Err(FreshdeskError::validation("contact name is required"));
        }

        let contact: Contact = self
            .client
            .post(&format!("{}/contacts", API_PREFIX), request)
            .await?;

        tracing::info!(contact_id = contact.id, "Created contact");
        Ok(contact)
    }

    /// Updates a contact.
    pub async fn update(&self, id: i64, request: &ContactRequest) -> Result<Contact, FreshdeskError> {
        require_id("contact_id", id)?;
        require_changes(request)?;
        self.client
            .put(&format!("{}/contacts/{}", API_PREFIX, id), request)
            .await
    }

    /// Soft-deletes a contact.
    pub async fn delete(&self, id: i64) -> Result<(), FreshdeskError> {
        require_id("contact_id", id)?;
        self.client.delete(&format!("{}/contacts/{}", API_PREFIX, id)).await
    }

    /// Permanently deletes a contact, even if it was not soft-deleted first.
    pub async fn hard_delete(&self, id: i64) -> Result<(), FreshdeskError> {
        require_id("contact_id", id)?;
        let path = QueryBuilder::new()
            .push("force", true)
            .apply_to(&format!("{}/contacts/{}/hard_delete", API_PREFIX, id));
        self.client.delete(&path).await?;

        tracing::warn!(contact_id = id, "Permanently deleted contact");
        Ok(())
    }

    /// Restores a soft-deleted contact.
    pub async fn restore(&self, id: i64) -> Result<(), FreshdeskError> {
        require_id("contact_id", id)?;
        self.client
            .put_empty(&format!("{}/contacts/{}/restore", API_PREFIX, id))
            .await
    }

    /// Converts a contact into an agent.
    pub async fn make_agent(
        &self,
        id: i64,
        request: &MakeAgentRequest,
    ) -> Result<MakeAgentResponse, FreshdeskError> {
        require_id("contact_id", id)?;
        self.client
            .put(&format!("{}/contacts/{}/make_agent", API_PREFIX, id), request)
            .await
    }

    /// Merges secondary contacts into a primary one.
    pub async fn merge(&self, request: &MergeContactsRequest) -> Result<(), FreshdeskError> {
        require_id("primary_contact_id", request.primary_contact_id)?;
        if request.secondary_contact_ids.is_empty() {
            return Err(FreshdeskError::validation("merge needs at least one secondary contact"));
        }
        for id in &request.secondary_contact_ids {
            require_id("secondary_contact_id", *id)?;
        }

        self.client
            .post(&format!("{}/contacts/merge", API_PREFIX), request)
            .await
    }
}
