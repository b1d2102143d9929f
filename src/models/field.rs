//! Contact and company field definitions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A field definition on the contact or company form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDefinition {
    /// Field ID.
    pub id: i64,

    /// API name (`cf_*` for custom fields).
    #[serde(default)]
    pub name: Option<String>,

    /// Agent-facing label.
    #[serde(default)]
    pub label: Option<String>,

    /// Customer-facing label.
    #[serde(default)]
    pub label_for_customers: Option<String>,

    /// Position on the form.
    #[serde(default)]
    pub position: Option<i64>,

    /// Field type, e.g. `custom_dropdown`.
    #[serde(default, rename = "type")]
    pub field_type: Option<String>,

    /// Built-in field.
    #[serde(default)]
    pub default: Option<bool>,

    /// Required when agents edit.
    #[serde(default)]
    pub required_for_agents: Option<bool>,

    /// Required in the customer portal.
    #[serde(default)]
    pub required_for_customers: Option<bool>,

    /// Customers may edit.
    #[serde(default)]
    pub customers_can_edit: Option<bool>,

    /// Shown in the customer portal.
    #[serde(default)]
    pub displayed_for_customers: Option<bool>,

    /// Shown on the signup form.
    #[serde(default)]
    pub editable_in_signup: Option<bool>,

    /// Dropdown choices. The shape depends on the field type.
    #[serde(default)]
    pub choices: Option<Value>,

    /// Creation time.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,

    /// Last update time.
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl FieldDefinition {
    /// True for helpdesk-defined fields.
    pub fn is_custom(&self) -> bool {
        !self.default.unwrap_or(false)
    }
}

/// A contact form field.
pub type ContactField = FieldDefinition;

/// A company form field.
pub type CompanyField = FieldDefinition;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_field_definition() {
        let field: ContactField = serde_json::from_value(json!({
            "id": 4,
            "name": "cf_tier",
            "label": "Tier",
            "type": "custom_dropdown",
            "default": false,
            "choices": ["gold", "silver"]
        }))
        .unwrap();
        assert!(field.is_custom());
        assert_eq!(field.field_type.as_deref(), Some("custom_dropdown"));
        assert_eq!(field.choices, Some(json!(["gold", "silver"])));
    }
}
