//! Contact and company form fields.

use crate::api::{require_id, API_PREFIX};
use crate::client::FreshdeskClient;
use crate::error::FreshdeskError;
use crate::models::{CompanyField, ContactField};

/// Contact field definitions. Obtained from [`FreshdeskClient::contact_fields`].
#[derive(Debug, Clone, Copy)]
pub struct ContactFieldsApi<'a> {
    client: &'a FreshdeskClient,
}

impl<'a> ContactFieldsApi<'a> {
    pub(crate) fn new(client: &'a FreshdeskClient) -> Self {
        Self { client }
    }

    /// All contact fields, built-in and custom.
    pub async fn list(&self) -> Result<Vec<ContactField>, FreshdeskError> {
        self.client.get(&format!("{}/contact_fields", API_PREFIX)).await
    }

    /// One contact field.
    pub async fn get(&self, id: i64) -> Result<ContactField, FreshdeskError> {
        require_id("contact_field_id", id)?;
        self.client
            .get(&format!("{}/admin/contact_fields/{}", API_PREFIX, id))
            .await
    }
}

/// Company field definitions. Obtained from [`FreshdeskClient::company_fields`].
#[derive(Debug, Clone, Copy)]
pub struct CompanyFieldsApi<'a> {
    client: &'a FreshdeskClient,
}

impl<'a> CompanyFieldsApi<'a> {
    pub(crate) fn new(client: &'a FreshdeskClient) -> Self {
        Self { client }
    }

    /// All company fields, built-in and custom.
    pub async fn list(&self) -> Result<Vec<CompanyField>, FreshdeskError> {
        self.client.get(&format!("{}/company_fields", API_PREFIX)).await
    }
}
