//! Company models.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::common::{CustomFields, IdName};
use crate::body::RequestBody;

/// A customer company.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Company {
    /// Company ID.
    pub id: i64,

    /// Name (unique).
    #[serde(default)]
    pub name: Option<String>,

    /// Description.
    #[serde(default)]
    pub description: Option<String>,

    /// Internal note.
    #[serde(default)]
    pub note: Option<String>,

    /// Email domains mapped to this company.
    #[serde(default)]
    pub domains: Vec<String>,

    /// Health score.
    #[serde(default)]
    pub health_score: Option<String>,

    /// Account tier.
    #[serde(default)]
    pub account_tier: Option<String>,

    /// Contract renewal date.
    #[serde(default)]
    pub renewal_date: Option<NaiveDate>,

    /// Industry.
    #[serde(default)]
    pub industry: Option<String>,

    /// Helpdesk custom fields.
    #[serde(default)]
    pub custom_fields: CustomFields,

    /// Creation time.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,

    /// Last update time.
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Body of `POST /api/v2/companies` and `PUT /api/v2/companies/{id}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CompanyRequest {
    /// Name; required on create.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Internal note.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,

    /// Replaces the domain list.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domains: Option<Vec<String>>,

    /// Health score.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub health_score: Option<String>,

    /// Account tier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_tier: Option<String>,

    /// Contract renewal date.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub renewal_date: Option<NaiveDate>,

    /// Industry.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub industry: Option<String>,

    /// Custom field values.
    #[serde(skip_serializing_if = "CustomFields::is_empty")]
    pub custom_fields: CustomFields,
}

impl CompanyRequest {
    /// Starts a company with a name.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    /// Adds a mapped email domain.
    pub fn domain(mut self, domain: impl Into<String>) -> Self {
        self.domains.get_or_insert_with(Vec::new).push(domain.into());
        self
    }
}

impl RequestBody for CompanyRequest {}

/// Response of `GET /api/v2/companies/autocomplete`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompanyAutocomplete {
    /// Matching companies.
    #[serde(default)]
    pub companies: Vec<IdName>,
}
