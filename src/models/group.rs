//! Agent group models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::body::RequestBody;

/// A group of agents tickets can be assigned to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Group {
    /// Group ID.
    pub id: i64,

    /// Name.
    #[serde(default)]
    pub name: Option<String>,

    /// Description.
    #[serde(default)]
    pub description: Option<String>,

    /// Agent notified when a ticket stays unassigned.
    #[serde(default)]
    pub escalate_to: Option<i64>,

    /// Delay before escalation, e.g. `30m`.
    #[serde(default)]
    pub unassigned_for: Option<String>,

    /// Business hours applied to the group.
    #[serde(default)]
    pub business_hour_id: Option<i64>,

    /// `support_agent_group` or `field_agent_group`.
    #[serde(default)]
    pub group_type: Option<String>,

    /// Members.
    #[serde(default)]
    pub agent_ids: Vec<i64>,

    /// Automatic assignment enabled.
    #[serde(default)]
    pub auto_ticket_assign: Option<bool>,

    /// Creation time.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,

    /// Last update time.
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Body of `POST /api/v2/groups` and `PUT /api/v2/groups/{id}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GroupRequest {
    /// Name; required on create.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Escalation agent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub escalate_to: Option<i64>,

    /// Escalation delay.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unassigned_for: Option<String>,

    /// Replaces the member list.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agent_ids: Option<Vec<i64>>,

    /// Automatic assignment.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_ticket_assign: Option<bool>,
}

impl GroupRequest {
    /// Starts a group with a name.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }
}

impl RequestBody for GroupRequest {}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_group_round_trip() {
        let group: Group = serde_json::from_value(json!({
            "id": 2,
            "name": "Tier 2",
            "agent_ids": [11, 12],
            "unassigned_for": "30m"
        }))
        .unwrap();
        assert_eq!(group.agent_ids, vec![11, 12]);

        let request = GroupRequest {
            agent_ids: Some(vec![11]),
            ..GroupRequest::named("Tier 2")
        };
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({"name": "Tier 2", "agent_ids": [11]})
        );
    }
}
