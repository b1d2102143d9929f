//! Products API (`/api/v2/products`).

use crate::api::{require_id, API_PREFIX};
use crate::client::FreshdeskClient;
use crate::error::FreshdeskError;
use crate::models::Product;
use crate::pagination::{LinkHeaderPagination, Paginated, PaginationStrategy};
use crate::query::QueryBuilder;

/// Product operations. Obtained from [`FreshdeskClient::products`].
#[derive(Debug, Clone, Copy)]
pub struct ProductsApi<'a> {
    client: &'a FreshdeskClient,
}

impl<'a> ProductsApi<'a> {
    pub(crate) fn new(client: &'a FreshdeskClient) -> Self {
        Self { client }
    }

    /// Gets a product.
    pub async fn get(&self, id: i64) -> Result<Product, FreshdeskError> {
        require_id("product_id", id)?;
        self.client.get(&format!("{}/products/{}", API_PREFIX, id)).await
    }

    /// Lists all products.
    pub fn list(&self) -> Paginated<Product> {
        self.client.paginate(
            format!("{}/products", API_PREFIX),
            QueryBuilder::new(),
            PaginationStrategy::LinkHeader(LinkHeaderPagination::default()),
        )
    }
}
