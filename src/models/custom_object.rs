//! Custom object schemas and records.
//!
//! Unlike the rest of the API, custom objects report timestamps as epoch
//! milliseconds and identify records by a string `display_id`. Record
//! listings use token pagination.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::common::{opt_string_or_int, string_or_int, CustomFields};
use crate::body::RequestBody;
use crate::query::QueryBuilder;

fn millis_to_utc(millis: Option<i64>) -> Option<DateTime<Utc>> {
    millis.and_then(DateTime::from_timestamp_millis)
}

/// A custom object type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomObjectSchema {
    /// Schema ID.
    #[serde(deserialize_with = "string_or_int")]
    pub id: String,

    /// API name.
    #[serde(default)]
    pub name: Option<String>,

    /// Display title.
    #[serde(default)]
    pub title: Option<String>,

    /// Description.
    #[serde(default)]
    pub description: Option<String>,

    /// Field that labels a record.
    #[serde(default, deserialize_with = "opt_string_or_int")]
    pub primary_field_id: Option<String>,

    /// Field definitions.
    #[serde(default)]
    pub fields: Vec<CustomObjectField>,

    /// Creation time (epoch ms).
    #[serde(default)]
    pub created_time: Option<i64>,

    /// Last update time (epoch ms).
    #[serde(default)]
    pub updated_time: Option<i64>,
}

impl CustomObjectSchema {
    /// Creation time.
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        millis_to_utc(self.created_time)
    }

    /// Last update time.
    pub fn updated_at(&self) -> Option<DateTime<Utc>> {
        millis_to_utc(self.updated_time)
    }

    /// Looks up a field by API name.
    pub fn field(&self, name: &str) -> Option<&CustomObjectField> {
        self.fields.iter().find(|f| f.name.as_deref() == Some(name))
    }
}

/// A field of a custom object schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomObjectField {
    /// Field ID.
    #[serde(default, deserialize_with = "opt_string_or_int")]
    pub id: Option<String>,

    /// API name (key in record `data`).
    #[serde(default)]
    pub name: Option<String>,

    /// Label.
    #[serde(default)]
    pub label: Option<String>,

    /// Type, e.g. `TEXT`, `NUMBER`, `DROPDOWN`, `RELATIONSHIP`.
    #[serde(default, rename = "type")]
    pub field_type: Option<String>,

    /// Required.
    #[serde(default)]
    pub required: Option<bool>,

    /// Editable.
    #[serde(default)]
    pub editable: Option<bool>,

    /// Position.
    #[serde(default)]
    pub position: Option<i64>,

    /// Dropdown choices.
    #[serde(default)]
    pub choices: Vec<Value>,
}

/// Response of `GET /api/v2/custom_objects/schemas`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub(crate) struct SchemaList {
    #[serde(default, alias = "data")]
    pub schemas: Vec<CustomObjectSchema>,
}

/// A custom object record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomObjectRecord {
    /// Record key, e.g. `BOOK-1`.
    pub display_id: String,

    /// Field values keyed by field name.
    #[serde(default)]
    pub data: CustomFields,

    /// Optimistic-locking version.
    #[serde(default)]
    pub version: Option<i64>,

    /// Creation time (epoch ms).
    #[serde(default)]
    pub created_time: Option<i64>,

    /// Last update time (epoch ms).
    #[serde(default)]
    pub updated_time: Option<i64>,
}

impl CustomObjectRecord {
    /// Creation time.
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        millis_to_utc(self.created_time)
    }

    /// Last update time.
    pub fn updated_at(&self) -> Option<DateTime<Utc>> {
        millis_to_utc(self.updated_time)
    }

    /// Reads one field value.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.data.get(field)
    }
}

/// Body of record create (`POST`) and update (`PUT`).
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RecordRequest {
    /// Record key; required on update.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_id: Option<String>,

    /// Version read before updating.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<i64>,

    /// Field values.
    pub data: CustomFields,
}

impl RecordRequest {
    /// A record with the given values.
    pub fn new(data: CustomFields) -> Self {
        Self {
            data,
            ..Self::default()
        }
    }

    /// Sets one value.
    pub fn set(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.data.insert(field.into(), value.into());
        self
    }

    /// Update body for an existing record, carrying its version.
    pub fn update_of(record: &CustomObjectRecord) -> Self {
        Self {
            display_id: Some(record.display_id.clone()),
            version: record.version,
            data: CustomFields::new(),
        }
    }
}

impl RequestBody for RecordRequest {}

/// Filters for `custom_objects().list_records`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordFilter {
    /// Records per page (server default when unset).
    pub page_size: Option<u32>,
    /// Field to sort on.
    pub sort_by: Option<String>,
    /// `field=value` equality filters.
    pub fields: Vec<(String, String)>,
}

impl RecordFilter {
    /// Adds an equality filter.
    pub fn field_eq(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.push((field.into(), value.into()));
        self
    }

    /// Query parameters for this filter, page size excluded.
    pub fn to_query(&self) -> QueryBuilder {
        self.fields.iter().fold(
            QueryBuilder::new().push_opt("sort_by", self.sort_by.as_deref()),
            |query, (name, value)| query.push(name.clone(), value),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_record_epoch_millis() {
        let record: CustomObjectRecord = serde_json::from_value(json!({
            "display_id": "BOOK-1",
            "data": {"title": "Dune", "pages": 412},
            "version": 2,
            "created_time": 1_709_296_200_000i64
        }))
        .unwrap();
        assert_eq!(record.get("pages"), Some(&json!(412)));
        assert_eq!(
            record.created_at().map(|t| t.to_rfc3339()),
            Some("2024-03-01T12:30:00+00:00".to_string())
        );
        assert!(record.updated_at().is_none());
    }

    #[test]
    fn test_schema_list_accepts_data_key() {
        let list: SchemaList = serde_json::from_value(json!({
            "data": [{"id": "7", "name": "books", "fields": [{"name": "title", "type": "TEXT"}]}]
        }))
        .unwrap();
        assert_eq!(list.schemas.len(), 1);
        assert!(list.schemas[0].field("title").is_some());
    }

    #[test]
    fn test_update_of_carries_version() {
        let record: CustomObjectRecord =
            serde_json::from_value(json!({"display_id": "BOOK-1", "version": 3})).unwrap();
        let request = RecordRequest::update_of(&record).set("title", "Dune Messiah");
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({"display_id": "BOOK-1", "version": 3, "data": {"title": "Dune Messiah"}})
        );
    }

    #[test]
    fn test_record_filter_query() {
        let filter = RecordFilter::default().field_eq("status", "open");
        assert_eq!(filter.to_query().to_query_string(), "status=open");
    }

    #[test]
    fn test_record_filter_escapes_field_names() {
        let filter = RecordFilter::default().field_eq("a&b=c[0]", "x y");
        assert_eq!(
            filter.to_query().to_query_string(),
            "a%26b%3Dc%5B0%5D=x%20y"
        );
    }
}
