//! Read-mostly account configuration: roles, business hours, mailboxes.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An agent role.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Role {
    /// Role ID.
    pub id: i64,
    /// Name.
    #[serde(default)]
    pub name: Option<String>,
    /// Description.
    #[serde(default)]
    pub description: Option<String>,
    /// Built-in role.
    #[serde(default)]
    pub default: Option<bool>,
    /// Creation time.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    /// Last update time.
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Opening and closing time for one weekday.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkingHours {
    /// e.g. `8:00 am`.
    pub start_time: String,
    /// e.g. `5:00 pm`.
    pub end_time: String,
}

/// A business hours calendar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BusinessHours {
    /// Calendar ID.
    pub id: i64,
    /// Name.
    #[serde(default)]
    pub name: Option<String>,
    /// Description.
    #[serde(default)]
    pub description: Option<String>,
    /// Account default.
    #[serde(default)]
    pub is_default: Option<bool>,
    /// Time zone name.
    #[serde(default)]
    pub time_zone: Option<String>,
    /// Hours keyed by lowercase weekday; absent days are closed.
    #[serde(default)]
    pub business_hours: BTreeMap<String, WorkingHours>,
    /// Creation time.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    /// Last update time.
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl BusinessHours {
    /// Hours for a weekday such as `"monday"`.
    pub fn hours_on(&self, weekday: &str) -> Option<&WorkingHours> {
        self.business_hours.get(&weekday.to_ascii_lowercase())
    }
}

/// A support mailbox.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmailConfig {
    /// Mailbox ID.
    pub id: i64,
    /// Name.
    #[serde(default)]
    pub name: Option<String>,
    /// Address customers write to.
    #[serde(default)]
    pub to_email: Option<String>,
    /// Address replies come from.
    #[serde(default)]
    pub reply_email: Option<String>,
    /// Group new tickets go to.
    #[serde(default)]
    pub group_id: Option<i64>,
    /// Product of the mailbox.
    #[serde(default)]
    pub product_id: Option<i64>,
    /// Primary mailbox.
    #[serde(default)]
    pub primary_role: Option<bool>,
    /// Verified and active.
    #[serde(default)]
    pub active: Option<bool>,
    /// Creation time.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    /// Last update time.
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_business_hours_by_weekday() {
        let hours: BusinessHours = serde_json::from_value(json!({
            "id": 1,
            "name": "Default",
            "is_default": true,
            "time_zone": "Eastern Time (US & Canada)",
            "business_hours": {
                "monday": {"start_time": "8:00 am", "end_time": "5:00 pm"}
            }
        }))
        .unwrap();
        assert_eq!(hours.hours_on("Monday").map(|h| h.end_time.as_str()), Some("5:00 pm"));
        assert!(hours.hours_on("sunday").is_none());
    }
}
