//! Canned responses and their folders.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::common::AttachmentInfo;

/// A folder of canned responses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CannedResponseFolder {
    /// Folder ID.
    pub id: i64,

    /// Name.
    #[serde(default)]
    pub name: Option<String>,

    /// Personal folder of the current agent.
    #[serde(default)]
    pub personal: Option<bool>,

    /// Number of responses in the folder.
    #[serde(default)]
    pub responses_count: Option<i64>,

    /// Responses, when the folder is read individually.
    #[serde(default)]
    pub canned_responses: Vec<CannedResponse>,

    /// Creation time.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,

    /// Last update time.
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// A reusable reply.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CannedResponse {
    /// Response ID.
    pub id: i64,

    /// Title.
    #[serde(default)]
    pub title: Option<String>,

    /// Folder.
    #[serde(default)]
    pub folder_id: Option<i64>,

    /// Plain-text content.
    #[serde(default)]
    pub content: Option<String>,

    /// HTML content.
    #[serde(default)]
    pub content_html: Option<String>,

    /// Groups allowed to use the response.
    #[serde(default)]
    pub group_ids: Vec<i64>,

    /// 0 all agents, 1 personal, 2 groups.
    #[serde(default)]
    pub visibility: Option<i64>,

    /// Files sent with the response.
    #[serde(default)]
    pub attachments: Vec<AttachmentInfo>,

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
    fn test_folder_with_responses() {
        let folder: CannedResponseFolder = serde_json::from_value(json!({
            "id": 1,
            "name": "General",
            "responses_count": 1,
            "canned_responses": [{"id": 9, "title": "Thanks", "content_html": "<p>Thanks!</p>"}]
        }))
        .unwrap();
        assert_eq!(folder.canned_responses[0].title.as_deref(), Some("Thanks"));
    }
}
