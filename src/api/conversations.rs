//! Conversations API: replies, notes and forwards on a ticket.

use crate::api::{require_changes, require_id, require_non_blank, API_PREFIX};
use crate::client::FreshdeskClient;
use crate::error::FreshdeskError;
use crate::models::{
    Conversation, ForwardRequest, NoteRequest, ReplyRequest, UpdateConversationRequest,
};
use crate::pagination::{self, LinkHeaderPagination, Paginated, PaginationStrategy};
use crate::query::QueryBuilder;

/// Conversation operations. Obtained from [`FreshdeskClient::conversations`].
#[derive(Debug, Clone, Copy)]
pub struct ConversationsApi<'a> {
    client: &'a FreshdeskClient,
}

impl<'a> ConversationsApi<'a> {
    pub(crate) fn new(client: &'a FreshdeskClient) -> Self {
        Self { client }
    }

    /// Lists the conversation thread of a ticket, oldest first.
    pub fn list_for_ticket(&self, ticket_id: i64) -> Paginated<Conversation> {
        if let Err(e) = require_id("ticket_id", ticket_id) {
            return pagination::failed(e);
        }
        self.client.paginate(
            format!("{}/tickets/{}/conversations", API_PREFIX, ticket_id),
            QueryBuilder::new(),
            PaginationStrategy::LinkHeader(LinkHeaderPagination::default()),
        )
    }

    /// Replies to the requester.
    ///
    /// # Errors
    ///
    /// Returns `FreshdeskError::Validation` if the body is empty.
    pub async fn create_reply(
        &self,
        ticket_id: i64,
        request: &ReplyRequest,
    ) -> Result<Conversation, FreshdeskError> {
        require_id("ticket_id", ticket_id)?;
        require_non_blank("body", &request.body)?;

        let reply: Conversation = self
            .client
            .post(&format!("{}/tickets/{}/reply", API_PREFIX, ticket_id), request)
            .await?;

        tracing::info!(ticket_id, conversation_id = reply.id, "Replied to ticket");
        Ok(reply)
    }

    /// Adds a note, private unless `request.private` is false.
    pub async fn create_note(
        &self,
        ticket_id: i64,
        request: &NoteRequest,
    ) -> Result<Conversation, FreshdeskError> {
        require_id("ticket_id", ticket_id)?;
        require_non_blank("body", &request.body)?;

        let note: Conversation = self
            .client
            .post(&format!("{}/tickets/{}/notes", API_PREFIX, ticket_id), request)
            .await?;

        tracing::info!(ticket_id, conversation_id = note.id, "Added note to ticket");
        Ok(note)
    }

    /// Forwards a ticket by email.
    pub async fn create_forward(
        &self,
        ticket_id: i64,
        request: &ForwardRequest,
    ) -> Result<Conversation, FreshdeskError> {
        require_id("ticket_id", ticket_id)?;
        if request.to_emails.is_empty() {
            return Err(FreshdeskError::validation("forward needs at least one recipient"));
        }

        self.client
            .post(&format!("{}/tickets/{}/forward", API_PREFIX, ticket_id), request)
            .await
    }

    /// Edits a note.
    pub async fn update(
        &self,
        conversation_id: i64,
        request: &UpdateConversationRequest,
    ) -> Result<Conversation, FreshdeskError> {
        require_id("conversation_id", conversation_id)?;
        require_changes(request)?;

        self.client
            .put(&format!("{}/conversations/{}", API_PREFIX, conversation_id), request)
            .await
    }

    /// Deletes a note or reply.
    pub async fn delete(&self, conversation_id: i64) -> Result<(), FreshdeskError> {
        require_id("conversation_id", conversation_id)?;
        self.client
            .delete(&format!("{}/conversations/{}", API_PREFIX, conversation_id))
            .await
    }
}
