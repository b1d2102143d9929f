//! Agent models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::body::RequestBody;
use crate::query::QueryBuilder;

/// A helpdesk agent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Agent {
    /// Agent ID (same as the underlying user ID).
    pub id: i64,

    /// Accepting ticket assignments.
    #[serde(default)]
    pub available: Option<bool>,

    /// Occasional (day-pass) agent.
    #[serde(default)]
    pub occasional: Option<bool>,

    /// HTML signature.
    #[serde(default)]
    pub signature: Option<String>,

    /// 1 global, 2 group, 3 restricted.
    #[serde(default)]
    pub ticket_scope: Option<i64>,

    /// Group memberships.
    #[serde(default)]
    pub group_ids: Vec<i64>,

    /// Roles.
    #[serde(default)]
    pub role_ids: Vec<i64>,

    /// Skills.
    #[serde(default)]
    pub skill_ids: Vec<i64>,

    /// Agent type.
    #[serde(default, rename = "type")]
    pub agent_type: Option<String>,

    /// Last availability change.
    #[serde(default)]
    pub available_since: Option<DateTime<Utc>>,

    /// Personal details.
    #[serde(default)]
    pub contact: Option<AgentContact>,

    /// Creation time.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,

    /// Last update time.
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Agent {
    /// Returns the agent's name or a placeholder.
    pub fn display_name(&self) -> &str {
        self.contact
            .as_ref()
            .and_then(|c| c.name.as_deref())
            .unwrap_or("Unknown")
    }

    /// Returns the agent's email, if known.
    pub fn email(&self) -> Option<&str> {
        self.contact.as_ref().and_then(|c| c.email.as_deref())
    }
}

/// Personal details nested under `Agent::contact`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AgentContact {
    /// Verified.
    #[serde(default)]
    pub active: Option<bool>,
    /// Email.
    #[serde(default)]
    pub email: Option<String>,
    /// Job title.
    #[serde(default)]
    pub job_title: Option<String>,
    /// Language code.
    #[serde(default)]
    pub language: Option<String>,
    /// Mobile.
    #[serde(default)]
    pub mobile: Option<String>,
    /// Name.
    #[serde(default)]
    pub name: Option<String>,
    /// Phone.
    #[serde(default)]
    pub phone: Option<String>,
    /// Time zone.
    #[serde(default)]
    pub time_zone: Option<String>,
    /// Last login.
    #[serde(default)]
    pub last_login_at: Option<DateTime<Utc>>,
}

/// Filters for `agents().list`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AgentListFilter {
    /// Exact email.
    pub email: Option<String>,
    /// Exact mobile.
    pub mobile: Option<String>,
    /// Exact phone.
    pub phone: Option<String>,
    /// `fulltime` or `occasional`.
    pub state: Option<String>,
}

impl AgentListFilter {
    /// Query parameters for this filter.
    pub fn to_query(&self) -> QueryBuilder {
        QueryBuilder::new()
            .push_opt("email", self.email.as_deref())
            .push_opt("mobile", self.mobile.as_deref())
            .push_opt("phone", self.phone.as_deref())
            .push_opt("state", self.state.as_deref())
    }
}

/// Body of `PUT /api/v2/agents/{id}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct UpdateAgentRequest {
    /// Occasional (day-pass) agent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub occasional: Option<bool>,

    /// HTML signature.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signature: Option<String>,

    /// 1 global, 2 group, 3 restricted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ticket_scope: Option<i64>,

    /// Replaces group memberships.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_ids: Option<Vec<i64>>,

    /// Replaces roles.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role_ids: Option<Vec<i64>>,

    /// Replaces skills.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skill_ids: Option<Vec<i64>>,

    /// Email.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    /// Name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Language code.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,

    /// Time zone.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_zone: Option<String>,
}

impl RequestBody for UpdateAgentRequest {}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_agent_me_payload() {
        let agent: Agent = serde_json::from_value(json!({
            "id": 11,
            "available": true,
            "ticket_scope": 1,
            "group_ids": [1, 2],
            "contact": {"name": "Sam", "email": "sam@example.com"}
        }))
        .unwrap();
        assert_eq!(agent.display_name(), "Sam");
        assert_eq!(agent.email(), Some("sam@example.com"));
        assert_eq!(agent.group_ids, vec![1, 2]);
    }

    #[test]
    fn test_update_agent_serialization() {
        let update = UpdateAgentRequest {
            signature: Some("<p>Sam</p>".to_string()),
            ..UpdateAgentRequest::default()
        };
        assert_eq!(
            serde_json::to_value(&update).unwrap(),
            json!({"signature": "<p>Sam</p>"})
        );
    }
}
