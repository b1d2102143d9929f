//! Customer satisfaction survey results.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::body::RequestBody;
use crate::query::QueryBuilder;

/// Answer key for the main survey question.
pub const DEFAULT_QUESTION: &str = "default_question";

/// One survey response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SatisfactionRating {
    /// Rating ID.
    pub id: i64,
    /// Survey.
    #[serde(default)]
    pub survey_id: Option<i64>,
    /// Rating contact.
    #[serde(default)]
    pub user_id: Option<i64>,
    /// Agent rated.
    #[serde(default)]
    pub agent_id: Option<i64>,
    /// Group of the ticket.
    #[serde(default)]
    pub group_id: Option<i64>,
    /// Rated ticket.
    #[serde(default)]
    pub ticket_id: Option<i64>,
    /// Free-text feedback.
    #[serde(default)]
    pub feedback: Option<String>,
    /// Scores keyed by question (`default_question`, `question_<id>`).
    #[serde(default)]
    pub ratings: BTreeMap<String, i64>,
    /// Creation time.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    /// Last update time.
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl SatisfactionRating {
    /// Score for the main question.
    pub fn overall(&self) -> Option<i64> {
        self.ratings.get(DEFAULT_QUESTION).copied()
    }
}

/// Filters for `satisfaction_ratings().list`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SatisfactionRatingFilter {
    /// Only ratings created at or after this time.
    pub created_since: Option<DateTime<Utc>>,
    /// Only ratings of one contact.
    pub user_id: Option<i64>,
}

impl SatisfactionRatingFilter {
    /// Query parameters for this filter.
    pub fn to_query(&self) -> QueryBuilder {
        QueryBuilder::new()
            .push_time("created_since", self.created_since)
            .push_opt("user_id", self.user_id)
    }
}

/// Body of `POST /api/v2/tickets/{id}/satisfaction_ratings`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SatisfactionRatingRequest {
    /// Scores keyed by question; must include `default_question`.
    pub ratings: BTreeMap<String, i64>,

    /// Free-text feedback.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub feedback: Option<String>,
}

impl SatisfactionRatingRequest {
    /// A rating answering only the main question.
    pub fn overall(score: i64) -> Self {
        Self {
            ratings: BTreeMap::from([(DEFAULT_QUESTION.to_string(), score)]),
            feedback: None,
        }
    }

    /// Adds feedback text.
    pub fn feedback(mut self, text: impl Into<String>) -> Self {
        self.feedback = Some(text.into());
        self
    }
}

impl RequestBody for SatisfactionRatingRequest {}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_rating_round_trip() {
        let rating: SatisfactionRating = serde_json::from_value(json!({
            "id": 3,
            "ticket_id": 42,
            "ratings": {"default_question": 103, "question_7": -103}
        }))
        .unwrap();
        assert_eq!(rating.overall(), Some(103));

        let request = SatisfactionRatingRequest::overall(103).feedback("Quick fix");
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({"ratings": {"default_question": 103}, "feedback": "Quick fix"})
        );
    }
}
