//! Contact models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::agent::Agent;
use super::common::CustomFields;
use crate::body::{Attachment, RequestBody};
use crate::query::QueryBuilder;

/// A customer contact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    /// Contact ID.
    pub id: i64,

    /// Full name.
    #[serde(default)]
    pub name: Option<String>,

    /// Primary email.
    #[serde(default)]
    pub email: Option<String>,

    /// Additional emails.
    #[serde(default)]
    pub other_emails: Vec<String>,

    /// Phone.
    #[serde(default)]
    pub phone: Option<String>,

    /// Mobile.
    #[serde(default)]
    pub mobile: Option<String>,

    /// Twitter handle.
    #[serde(default)]
    pub twitter_id: Option<String>,

    /// External system ID.
    #[serde(default)]
    pub unique_external_id: Option<String>,

    /// Primary company.
    #[serde(default)]
    pub company_id: Option<i64>,

    /// Can see all tickets of the company.
    #[serde(default)]
    pub view_all_tickets: Option<bool>,

    /// Verified.
    #[serde(default)]
    pub active: Option<bool>,

    /// Soft-deleted.
    #[serde(default)]
    pub deleted: Option<bool>,

    /// Postal address.
    #[serde(default)]
    pub address: Option<String>,

    /// Job title.
    #[serde(default)]
    pub job_title: Option<String>,

    /// Language code.
    #[serde(default)]
    pub language: Option<String>,

    /// Time zone name.
    #[serde(default)]
    pub time_zone: Option<String>,

    /// Free-form notes.
    #[serde(default)]
    pub description: Option<String>,

    /// Tags.
    #[serde(default)]
    pub tags: Vec<String>,

    /// Avatar metadata.
    #[serde(default)]
    pub avatar: Option<Value>,

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

impl Contact {
    /// Returns the name or a placeholder.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("Unknown")
    }
}

/// Contact lifecycle states accepted by `contacts().list`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactState {
    /// Not yet verified.
    Unverified,
    /// Verified.
    Verified,
    /// Soft-deleted.
    Deleted,
    /// Blocked.
    Blocked,
}

impl ContactState {
    /// Wire value.
    pub fn as_str(self) -> &'static str {
        match self {
            ContactState::Unverified => "unverified",
            ContactState::Verified => "verified",
            ContactState::Deleted => "deleted",
            ContactState::Blocked => "blocked",
        }
    }
}

/// Filters for `contacts().list`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContactListFilter {
    /// Exact email.
    pub email: Option<String>,
    /// Exact mobile.
    pub mobile: Option<String>,
    /// Exact phone.
    pub phone: Option<String>,
    /// Company ID.
    pub company_id: Option<i64>,
    /// Lifecycle state.
    pub state: Option<ContactState>,
    /// Only contacts updated at or after this time.
    pub updated_since: Option<DateTime<Utc>>,
}

impl ContactListFilter {
    /// Query parameters for this filter.
    pub fn to_query(&self) -> QueryBuilder {
        QueryBuilder::new()
            .push_opt("email", self.email.as_deref())
            .push_opt("mobile", self.mobile.as_deref())
            .push_opt("phone", self.phone.as_deref())
            .push_opt("company_id", self.company_id)
            .push_opt("state", self.state.map(|s| s.as_str()))
            .push_time("_updated_since", self.updated_since)
    }
}

/// Body of `POST /api/v2/contacts` and `PUT /api/v2/contacts/{id}`.
///
/// Creating a contact needs `name` plus one of `email`, `phone`, `mobile`,
/// `twitter_id` or `unique_external_id`. Updates send only what is set.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ContactRequest {
    /// Full name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Primary email.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    /// Phone.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,

    /// Mobile.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mobile: Option<String>,

    /// Twitter handle.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub twitter_id: Option<String>,

    /// External system ID.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unique_external_id: Option<String>,

    /// Additional emails.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub other_emails: Option<Vec<String>>,

    /// Primary company.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_id: Option<i64>,

    /// Can see all tickets of the company.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub view_all_tickets: Option<bool>,

    /// Postal address.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,

    /// Job title.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_title: Option<String>,

    /// Language code.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,

    /// Time zone name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_zone: Option<String>,

    /// Free-form notes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Replaces the tag list.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,

    /// Custom field values.
    #[serde(skip_serializing_if = "CustomFields::is_empty")]
    pub custom_fields: CustomFields,

    /// Avatar image, uploaded as the `avatar` form field.
    #[serde(skip)]
    pub avatar: Option<Attachment>,
}

impl ContactRequest {
    /// Starts a contact identified by email.
    pub fn with_email(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            email: Some(email.into()),
            ..Self::default()
        }
    }

    /// Sets the avatar image.
    pub fn avatar(mut self, image: Attachment) -> Self {
        self.avatar = Some(image);
        self
    }
}

impl RequestBody for ContactRequest {
    fn attachments(&self) -> &[Attachment] {
        self.avatar.as_slice()
    }

    fn attachment_field(&self) -> &'static str {
        "avatar"
    }
}

/// Body of `PUT /api/v2/contacts/{id}/make_agent`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MakeAgentRequest {
    /// Occasional (day-pass) agent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub occasional: Option<bool>,

    /// HTML signature.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signature: Option<String>,

    /// 1 global, 2 group, 3 restricted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ticket_scope: Option<i64>,

    /// Group memberships.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub group_ids: Vec<i64>,

    /// Roles.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub role_ids: Vec<i64>,

    /// Skills.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub skill_ids: Vec<i64>,

    /// `support_agent`, `field_agent` or `collaborator`.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub agent_type: Option<String>,
}

impl RequestBody for MakeAgentRequest {}

/// Response of `make_agent`: the contact plus the agent record created for it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MakeAgentResponse {
    /// The converted contact.
    #[serde(flatten)]
    pub contact: Contact,

    /// The new agent.
    #[serde(default)]
    pub agent: Option<Agent>,
}

/// Body of `POST /api/v2/contacts/merge`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MergeContactsRequest {
    /// Contact that survives the merge.
    pub primary_contact_id: i64,

    /// Contacts folded into the primary one.
    pub secondary_contact_ids: Vec<i64>,

    /// Attribute values to keep on the primary contact.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact: Option<Value>,
}

impl MergeContactsRequest {
    /// Merges `secondary` into `primary`.
    pub fn new(primary: i64, secondary: impl Into<Vec<i64>>) -> Self {
        Self {
            primary_contact_id: primary,
            secondary_contact_ids: secondary.into(),
            contact: None,
        }
    }
}

impl RequestBody for MergeContactsRequest {}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_contact_deserialize() {
        let contact: Contact = serde_json::from_value(json!({
            "id": 3,
            "name": "Jane",
            "email": "jane@example.com",
            "other_emails": ["j@example.org"],
            "custom_fields": {"cf_tier": "gold"},
            "created_at": "2024-03-01T12:30:00Z"
        }))
        .unwrap();
        assert_eq!(contact.display_name(), "Jane");
        assert_eq!(contact.other_emails, vec!["j@example.org".to_string()]);
    }

    #[test]
    fn test_avatar_uses_avatar_field() {
        let request = ContactRequest::with_email("Jane", "jane@example.com")
            .avatar(Attachment::new("me.png", vec![1, 2, 3]).with_content_type("image/png"));
        assert!(request.has_attachments());
        assert_eq!(request.attachment_field(), "avatar");
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({"name": "Jane", "email": "jane@example.com"})
        );
    }

    #[test]
    fn test_make_agent_response_flattens_contact() {
        let response: MakeAgentResponse = serde_json::from_value(json!({
            "id": 3,
            "name": "Jane",
            "agent": {"id": 3, "ticket_scope": 1}
        }))
        .unwrap();
        assert_eq!(response.contact.id, 3);
        assert_eq!(response.agent.unwrap().ticket_scope, Some(1));
    }

    #[test]
    fn test_list_filter_query() {
        let filter = ContactListFilter {
            company_id: Some(5),
            state: Some(ContactState::Verified),
            ..ContactListFilter::default()
        };
        assert_eq!(filter.to_query().to_query_string(), "company_id=5&state=verified");
    }
}
