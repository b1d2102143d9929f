//! Companies API (`/api/v2/companies`).

use crate::api::{require_changes, require_id, require_non_blank, API_PREFIX};
use crate::client::FreshdeskClient;
use crate::error::FreshdeskError;
use crate::models::{Company, CompanyAutocomplete, CompanyRequest, IdName};
use crate::pagination::{self, LinkHeaderPagination, PageNumberPagination, Paginated, PaginationStrategy};
use crate::query::{QueryBuilder, SearchQuery};

/// Company operations. Obtained from [`FreshdeskClient::companies`].
#[derive(Debug, Clone, Copy)]
pub struct CompaniesApi<'a> {
    client: &'a FreshdeskClient,
}

impl<'a> CompaniesApi<'a> {
    pub(crate) fn new(client: &'a FreshdeskClient) -> Self {
        Self { client }
    }

    /// Gets a company.
    pub async fn get(&self, id: i64) -> Result<Company, FreshdeskError> {
        require_id("company_id", id)?;
        self.client.get(&format!("{}/companies/{}", API_PREFIX, id)).await
    }

    /// Lists all companies.
    pub fn list(&self) -> Paginated<Company> {
        self.client.paginate(
            format!("{}/companies", API_PREFIX),
            QueryBuilder::new(),
            PaginationStrategy::LinkHeader(LinkHeaderPagination::default()),
        )
    }

    /// Searches companies with a search-API expression (at most 10 pages).
    pub fn search(&self, query: impl Into<SearchQuery>) -> Paginated<Company> {
        self.search_paged(query, PageNumberPagination::default())
    }

    /// Like [`search`](Self::search), over the pages `paging` selects.
    pub fn search_paged(
        &self,
        query: impl Into<SearchQuery>,
        paging: PageNumberPagination,
    ) -> Paginated<Company> {
        let rendered = match query.into().render() {
            Ok(rendered) => rendered,
            Err(e) => return pagination::failed(e),
        };
        self.client.paginate(
            format!("{}/search/companies", API_PREFIX),
            QueryBuilder::new().push("query", rendered),
            PaginationStrategy::PageNumber(paging),
        )
    }

    /// Companies whose name starts with `name`.
    pub async fn autocomplete(&self, name: &str) -> Result<Vec<IdName>, FreshdeskError> {
        require_non_blank("name", name)?;
        let path = QueryBuilder::new()
            .push("name", name)
            .apply_to(&format!("{}/companies/autocomplete", API_PREFIX));

        let response: CompanyAutocomplete = self.client.get(&path).await?;
        Ok(response.companies)
    }

    /// Creates a company.
    pub async fn create(&self, request: &CompanyRequest) -> Result<Company, FreshdeskError> {
        require_non_blank("company name", request.name.as_deref().unwrap_or_default())?;

        let company: Company = self
            .client
            .post(&format!("{}/companies", API_PREFIX), request)
            .await?;

        tracing::info!(company_id = company.id, "Created company");
        Ok(company)
    }

    /// Updates a company.
    pub async fn update(&self, id: i64, request: &CompanyRequest) -> Result<Company, FreshdeskError> {
        require_id("company_id", id)?;
        require_changes(request)?;
        self.client
            .put(&format!("{}/companies/{}", API_PREFIX, id), request)
            .await
    }

    /// Deletes a company. Its contacts are kept.
    pub async fn delete(&self, id: i64) -> Result<(), FreshdeskError> {
        require_id("company_id", id)?;
        self.client.delete(&format!("{}/companies/{}", API_PREFIX, id)).await
    }
}
