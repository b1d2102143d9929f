//! Time tracking models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::body::RequestBody;
use crate::error::FreshdeskError;
use crate::query::QueryBuilder;

/// Time logged by an agent against a ticket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeEntry {
    /// Entry ID.
    pub id: i64,

    /// Billable.
    #[serde(default)]
    pub billable: Option<bool>,

    /// Note.
    #[serde(default)]
    pub note: Option<String>,

    /// Timer currently running.
    #[serde(default)]
    pub timer_running: Option<bool>,

    /// Agent who logged the time.
    #[serde(default)]
    pub agent_id: Option<i64>,

    /// Ticket.
    #[serde(default)]
    pub ticket_id: Option<i64>,

    /// Company of the ticket.
    #[serde(default)]
    pub company_id: Option<i64>,

    /// Duration as `hh:mm`.
    #[serde(default)]
    pub time_spent: Option<String>,

    /// When the work was done.
    #[serde(default)]
    pub executed_at: Option<DateTime<Utc>>,

    /// When the timer was started.
    #[serde(default)]
    pub start_time: Option<DateTime<Utc>>,

    /// Creation time.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,

    /// Last update time.
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl TimeEntry {
    /// `time_spent` in minutes, if it parses as `hh:mm`.
    pub fn minutes_spent(&self) -> Option<u32> {
        let (hours, minutes) = self.time_spent.as_deref()?.split_once(':')?;
        Some(hours.trim().parse::<u32>().ok()? * 60 + minutes.trim().parse::<u32>().ok()?)
    }
}

/// Formats minutes as the `hh:mm` string Freshdesk expects.
pub fn format_time_spent(minutes: u32) -> String {
    format!("{:02}:{:02}", minutes / 60, minutes % 60)
}

/// Filters for `time_entries().list`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TimeEntryFilter {
    /// Company ID.
    pub company_id: Option<i64>,
    /// Agent ID.
    pub agent_id: Option<i64>,
    /// Executed at or after.
    pub executed_after: Option<DateTime<Utc>>,
    /// Executed at or before.
    pub executed_before: Option<DateTime<Utc>>,
    /// Billable only / non-billable only.
    pub billable: Option<bool>,
}

impl TimeEntryFilter {
    /// Query parameters for this filter.
    pub fn to_query(&self) -> QueryBuilder {
        QueryBuilder::new()
            .push_opt("company_id", self.company_id)
            .push_opt("agent_id", self.agent_id)
            .push_time("executed_after", self.executed_after)
            .push_time("executed_before", self.executed_before)
            .push_opt("billable", self.billable)
    }
}

/// Body of `POST /api/v2/tickets/{id}/time_entries` and `PUT /api/v2/time_entries/{id}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TimeEntryRequest {
    /// Agent; defaults to the API key's agent on create.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agent_id: Option<i64>,

    /// Billable.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub billable: Option<bool>,

    /// When the work was done.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub executed_at: Option<DateTime<Utc>>,

    /// Note.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,

    /// Timer start time.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_time: Option<DateTime<Utc>>,

    /// Start the timer.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timer_running: Option<bool>,

    /// Duration as `hh:mm`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_spent: Option<String>,
}

impl TimeEntryRequest {
    /// Logs a fixed number of minutes.
    pub fn minutes(minutes: u32) -> Self {
        Self {
            time_spent: Some(format_time_spent(minutes)),
            timer_running: Some(false),
            ..Self::default()
        }
    }

    /// Sets the note.
    pub fn note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    /// Checks `time_spent` is `hh:mm`.
    pub fn validate(&self) -> Result<(), FreshdeskError> {
        if let Some(spent) = &self.time_spent {
            let valid = spent
                .split_once(':')
                .map(|(h, m)| {
                    !h.is_empty()
                        && h.chars().all(|c| c.is_ascii_digit())
                        && m.len() == 2
                        && m.parse::<u32>().is_ok_and(|m| m < 60)
                })
                .unwrap_or(false);
            if !valid {
                return Err(FreshdeskError::validation(format!(
                    "time_spent must be hh:mm, got {:?}",
                    spent
                )));
            }
        }
        Ok(())
    }
}

impl RequestBody for TimeEntryRequest {}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_minutes_spent() {
        let entry: TimeEntry = serde_json::from_value(json!({
            "id": 1,
            "time_spent": "01:45",
            "timer_running": false
        }))
        .unwrap();
        assert_eq!(entry.minutes_spent(), Some(105));
    }

    #[test]
    fn test_request_formats_minutes() {
        let request = TimeEntryRequest::minutes(90).note("Call");
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({"note": "Call", "timer_running": false, "time_spent": "01:30"})
        );
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_duration() {
        for bad in ["90", "1:5", "01:75", "ab:cd"] {
            let request = TimeEntryRequest {
                time_spent: Some(bad.to_string()),
                ..TimeEntryRequest::default()
            };
            assert!(request.validate().is_err(), "{} should be rejected", bad);
        }
    }
}
