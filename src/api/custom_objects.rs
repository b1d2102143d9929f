//! Custom objects API (`/api/v2/custom_objects`).

use crate::api::{require_non_blank, API_PREFIX};
use crate::client::FreshdeskClient;
use crate::error::FreshdeskError;
use crate::models::{
    CustomObjectRecord, CustomObjectSchema, RecordFilter, RecordRequest, SchemaList,
};
use crate::pagination::{self, Paginated, PaginationStrategy, TokenPagination};

/// Custom object operations. Obtained from [`FreshdeskClient::custom_objects`].
#[derive(Debug, Clone, Copy)]
pub struct CustomObjectsApi<'a> {
    client: &'a FreshdeskClient,
}

impl<'a> CustomObjectsApi<'a> {
    pub(crate) fn new(client: &'a FreshdeskClient) -> Self {
        Self { client }
    }

    /// Lists the custom object types of the account.
    pub async fn list_schemas(&self) -> Result<Vec<CustomObjectSchema>, FreshdeskError> {
        let list: SchemaList = self
            .client
            .get(&format!("{}/custom_objects/schemas", API_PREFIX))
            .await?;
        Ok(list.schemas)
    }

    /// Gets a custom object type with its fields.
    pub async fn get_schema(&self, schema_id: &str) -> Result<CustomObjectSchema, FreshdeskError> {
        require_non_blank("schema_id", schema_id)?;
        self.client
            .get(&format!(
                "{}/custom_objects/schemas/{}",
                API_PREFIX,
                urlencoding::encode(schema_id)
            ))
            .await
    }

    /// Lists the records of a schema, following `next_token` until the
    /// server stops returning one.
    ///
    /// # Example
    ///
    /// ```ignore
    /// let filter = RecordFilter { page_size: Some(50), ..Default::default() }
    ///     .field_eq("status", "open");
    /// let records: Vec<_> = client
    ///     .custom_objects()
    ///     .list_records("7", &filter)
    ///     .try_collect()
    ///     .await?;
    /// ```
    pub fn list_records(&self, schema_id: &str, filter: &RecordFilter) -> Paginated<CustomObjectRecord> {
        if let Err(e) = require_non_blank("schema_id", schema_id) {
            return pagination::failed(e);
        }
        self.client.paginate(
            records_path(schema_id),
            filter.to_query(),
            PaginationStrategy::Token(TokenPagination {
                page_size: filter.page_size,
            }),
        )
    }

    /// Creates a record.
    pub async fn create_record(
        &self,
        schema_id: &str,
        request: &RecordRequest,
    ) -> Result<CustomObjectRecord, FreshdeskError> {
        require_non_blank("schema_id", schema_id)?;
        if request.data.is_empty() {
            return Err(FreshdeskError::validation("record data must not be empty"));
        }

        let record: CustomObjectRecord = self.client.post(&records_path(schema_id), request).await?;

        tracing::info!(schema_id, display_id = %record.display_id, "Created custom object record");
        Ok(record)
    }

    /// Updates a record. Send the `version` last read to avoid lost updates.
    pub async fn update_record(
        &self,
        schema_id: &str,
        display_id: &str,
        request: &RecordRequest,
    ) -> Result<CustomObjectRecord, FreshdeskError> {
        require_non_blank("schema_id", schema_id)?;
        require_non_blank("display_id", display_id)?;
        self.client
            .put(&record_path(schema_id, display_id), request)
            .await
    }

    /// Deletes a record.
    pub async fn delete_record(&self, schema_id: &str, display_id: &str) -> Result<(), FreshdeskError> {
        require_non_blank("schema_id", schema_id)?;
        require_non_blank("display_id", display_id)?;
        self.client.delete(&record_path(schema_id, display_id)).await
    }
}

fn records_path(schema_id: &str) -> String {
    format!(
        "{}/custom_objects/schemas/{}/records",
        API_PREFIX,
        urlencoding::encode(schema_id)
    )
}

fn record_path(schema_id: &str, display_id: &str) -> String {
    format!("{}/{}", records_path(schema_id), urlencoding::encode(display_id))
}
