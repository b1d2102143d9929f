//! Ticket field definitions (admin API).
//!
//! Dropdown choices nest: a dependent field has choices whose `choices`
//! hold the next level, to any depth. [`TicketFieldChoice`] is therefore
//! recursive.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::common::string_or_int;
use crate::body::RequestBody;

/// A field on the ticket form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TicketField {
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

    /// Description.
    #[serde(default)]
    pub description: Option<String>,

    /// Position on the form.
    #[serde(default)]
    pub position: Option<i64>,

    /// Field type, e.g. `default_status` or `nested_field`.
    #[serde(default, rename = "type")]
    pub field_type: Option<String>,

    /// Built-in field.
    #[serde(default)]
    pub default: Option<bool>,

    /// Required to close a ticket.
    #[serde(default)]
    pub required_for_closure: Option<bool>,

    /// Required when agents submit.
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
    pub displayed_to_customers: Option<bool>,

    /// Dropdown choices, possibly nested.
    #[serde(default)]
    pub choices: Vec<TicketFieldChoice>,

    /// Levels of a nested (dependent) field.
    #[serde(default)]
    pub dependent_fields: Vec<DependentField>,

    /// Has form sections attached.
    #[serde(default)]
    pub has_section: Option<bool>,

    /// Creation time.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,

    /// Last update time.
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl TicketField {
    /// Looks up a choice by value at any depth.
    pub fn find_choice(&self, value: &str) -> Option<&TicketFieldChoice> {
        self.choices.iter().find_map(|c| c.find(value))
    }
}

/// One dropdown choice; `choices` holds the next level.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TicketFieldChoice {
    /// Choice ID; unset when creating.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,

    /// Value shown and stored. Built-in fields may send it as a number.
    #[serde(default, deserialize_with = "string_or_int")]
    pub value: String,

    /// Position among siblings.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<i64>,

    /// Parent choice, for nested levels.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_choice_id: Option<i64>,

    /// Children.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub choices: Vec<TicketFieldChoice>,
}

impl TicketFieldChoice {
    /// A leaf choice.
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            ..Self::default()
        }
    }

    /// Adds a child choice.
    pub fn child(mut self, choice: TicketFieldChoice) -> Self {
        self.choices.push(choice);
        self
    }

    /// Depth-first search for `value` in this choice and its children.
    pub fn find(&self, value: &str) -> Option<&TicketFieldChoice> {
        if self.value == value {
            return Some(self);
        }
        self.choices.iter().find_map(|c| c.find(value))
    }

    /// Number of levels below and including this choice.
    pub fn depth(&self) -> usize {
        1 + self.choices.iter().map(|c| c.depth()).max().unwrap_or(0)
    }
}

/// One level of a nested field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DependentField {
    /// Field ID.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,

    /// API name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Agent-facing label.
    #[serde(default)]
    pub label: String,

    /// Customer-facing label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label_for_customers: Option<String>,

    /// Level (2 or 3).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<i64>,

    /// Owning ticket field.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ticket_field_id: Option<i64>,
}

/// Body of `POST /api/v2/admin/ticket_fields` and `PUT .../{id}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TicketFieldRequest {
    /// Agent-facing label; required on create.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,

    /// Customer-facing label; required on create.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label_for_customers: Option<String>,

    /// Field type, e.g. `custom_dropdown`; create only.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub field_type: Option<String>,

    /// Position on the form.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<i64>,

    /// Required to close a ticket.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required_for_closure: Option<bool>,

    /// Required when agents submit.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required_for_agents: Option<bool>,

    /// Required in the customer portal.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required_for_customers: Option<bool>,

    /// Customers may edit.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customers_can_edit: Option<bool>,

    /// Shown in the customer portal.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub displayed_to_customers: Option<bool>,

    /// Replaces the choice tree.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub choices: Option<Vec<TicketFieldChoice>>,

    /// Levels of a nested field.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dependent_fields: Option<Vec<DependentField>>,
}

impl TicketFieldRequest {
    /// Starts a new custom field.
    pub fn new(label: impl Into<String>, field_type: impl Into<String>) -> Self {
        let label = label.into();
        Self {
            label_for_customers: Some(label.clone()),
            label: Some(label),
            field_type: Some(field_type.into()),
            ..Self::default()
        }
    }
}

impl RequestBody for TicketFieldRequest {}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_nested_choices_three_levels() {
        let field: TicketField = serde_json::from_value(json!({
            "id": 100,
            "name": "cf_location",
            "type": "nested_field",
            "choices": [
                {"id": 1, "value": "Europe", "position": 1, "choices": [
                    {"id": 2, "value": "Germany", "position": 1, "choices": [
                        {"id": 3, "value": "Berlin", "position": 1}
                    ]}
                ]},
                {"id": 4, "value": "Asia", "position": 2}
            ],
            "dependent_fields": [
                {"id": 101, "name": "cf_country", "label": "Country", "level": 2, "ticket_field_id": 100}
            ]
        }))
        .unwrap();

        assert_eq!(field.choices.len(), 2);
        assert_eq!(field.choices[0].depth(), 3);
        assert_eq!(field.find_choice("Berlin").and_then(|c| c.id), Some(3));
        assert!(field.find_choice("Paris").is_none());
        assert_eq!(field.dependent_fields[0].level, Some(2));
    }

    #[test]
    fn test_choice_tree_survives_round_trip() {
        let field = TicketField {
            id: 100,
            name: Some("cf_location".to_string()),
            label: Some("Location".to_string()),
            label_for_customers: None,
            description: None,
            position: Some(7),
            field_type: Some("nested_field".to_string()),
            default: Some(false),
            required_for_closure: None,
            required_for_agents: Some(true),
            required_for_customers: None,
            customers_can_edit: None,
            displayed_to_customers: None,
            choices: vec![
                TicketFieldChoice::new("Europe").child(
                    TicketFieldChoice::new("Germany")
                        .child(TicketFieldChoice::new("Berlin").child(TicketFieldChoice::new("Mitte"))),
                ),
                TicketFieldChoice {
                    id: Some(4),
                    position: Some(2),
                    ..TicketFieldChoice::new("Asia")
                },
            ],
            dependent_fields: Vec::new(),
            has_section: None,
            created_at: Some("2024-03-01T12:30:00Z".parse().unwrap()),
            updated_at: None,
        };

        let json = serde_json::to_string(&field).unwrap();
        let back: TicketField = serde_json::from_str(&json).unwrap();

        assert_eq!(back, field);
        assert_eq!(back.choices[0].depth(), 4);
        assert_eq!(back.choices[0].depth(), field.choices[0].depth());
        assert_eq!(back.choices[1].depth(), 1);
        assert!(back.find_choice("Mitte").is_some());
    }

    #[test]
    fn test_numeric_choice_values() {
        let field: TicketField = serde_json::from_value(json!({
            "id": 2,
            "name": "priority",
            "type": "default_priority",
            "choices": [{"value": 1, "position": 1}, {"value": "Urgent", "position": 4}]
        }))
        .unwrap();
        assert_eq!(field.choices[0].value, "1");
        assert_eq!(field.choices[1].value, "Urgent");
    }

    #[test]
    fn test_create_request_with_nested_choices() {
        let request = TicketFieldRequest {
            choices: Some(vec![
                TicketFieldChoice::new("Europe").child(TicketFieldChoice::new("Germany")),
            ]),
            ..TicketFieldRequest::new("Location", "nested_field")
        };
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "label": "Location",
                "label_for_customers": "Location",
                "type": "nested_field",
                "choices": [{"value": "Europe", "choices": [{"value": "Germany"}]}]
            })
        );
    }
}
