//! Canned responses API.

use crate::api::{require_id, API_PREFIX};
use crate::client::FreshdeskClient;
use crate::error::FreshdeskError;
use crate::models::{CannedResponse, CannedResponseFolder};

/// Canned response operations. Obtained from [`FreshdeskClient::canned_responses`].
#[derive(Debug, Clone, Copy)]
pub struct CannedResponsesApi<'a> {
    client: &'a FreshdeskClient,
}

impl<'a> CannedResponsesApi<'a> {
    pub(crate) fn new(client: &'a FreshdeskClient) -> Self {
        Self { client }
    }

    /// Lists folders visible to the current agent.
    pub async fn list_folders(&self) -> Result<Vec<CannedResponseFolder>, FreshdeskError> {
        self.client
            .get(&format!("{}/canned_response_folders", API_PREFIX))
            .await
    }

    /// Gets a folder together with its responses.
    pub async fn get_folder(&self, id: i64) -> Result<CannedResponseFolder, FreshdeskError> {
        require_id("folder_id", id)?;
        self.client
            .get(&format!("{}/canned_response_folders/{}", API_PREFIX, id))
            .await
    }

    /// Lists the responses in a folder.
    pub async fn list_in_folder(&self, folder_id: i64) -> Result<Vec<CannedResponse>, FreshdeskError> {
        require_id("folder_id", folder_id)?;
        self.client
            .get(&format!("{}/canned_response_folders/{}/responses", API_PREFIX, folder_id))
            .await
    }

    /// Gets a canned response.
    pub async fn get(&self, id: i64) -> Result<CannedResponse, FreshdeskError> {
        require_id("canned_response_id", id)?;
        self.client
            .get(&format!("{}/canned_responses/{}", API_PREFIX, id))
            .await
    }
}
