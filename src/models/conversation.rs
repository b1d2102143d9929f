//! Conversation models: replies, notes and forwards on a ticket.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::common::{int_coded, AttachmentInfo};
use crate::body::{Attachment, RequestBody};

int_coded! {
    /// How a conversation entry was created.
    ConversationSource {
        /// Email reply.
        Reply = 0,
        /// Note.
        Note = 2,
        /// Tweet.
        Tweet = 5,
        /// Survey feedback.
        SurveyFeedback = 6,
        /// Facebook post.
        FacebookPost = 7,
        /// Forwarded email.
        ForwardedEmail = 8,
        /// Phone.
        Phone = 9,
        /// E-commerce.
        ECommerce = 11,
    }
}

/// One entry in a ticket's conversation thread.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Conversation {
    /// Conversation ID.
    pub id: i64,

    /// HTML body.
    #[serde(default)]
    pub body: Option<String>,

    /// Plain-text body.
    #[serde(default)]
    pub body_text: Option<String>,

    /// Ticket this entry belongs to.
    #[serde(default)]
    pub ticket_id: Option<i64>,

    /// Author (agent or contact).
    #[serde(default)]
    pub user_id: Option<i64>,

    /// True when written by the requester side.
    #[serde(default)]
    pub incoming: Option<bool>,

    /// Private notes are hidden from the requester.
    #[serde(default)]
    pub private: Option<bool>,

    /// Entry type.
    #[serde(default)]
    pub source: Option<ConversationSource>,

    /// Support mailbox used.
    #[serde(default)]
    pub support_email: Option<String>,

    /// Sender address.
    #[serde(default)]
    pub from_email: Option<String>,

    /// Recipients.
    #[serde(default)]
    pub to_emails: Vec<String>,

    /// CC recipients.
    #[serde(default)]
    pub cc_emails: Vec<String>,

    /// BCC recipients.
    #[serde(default)]
    pub bcc_emails: Vec<String>,

    /// Files.
    #[serde(default)]
    pub attachments: Vec<AttachmentInfo>,

    /// Creation time.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,

    /// Last update time.
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Conversation {
    /// True for private notes.
    pub fn is_private_note(&self) -> bool {
        self.source == Some(ConversationSource::Note) && self.private.unwrap_or(false)
    }
}

/// Body of `POST /api/v2/tickets/{id}/reply`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ReplyRequest {
    /// HTML body.
    pub body: String,

    /// Sender mailbox.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from_email: Option<String>,

    /// Agent replying; defaults to the API key's agent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<i64>,

    /// CC recipients.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub cc_emails: Vec<String>,

    /// BCC recipients.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub bcc_emails: Vec<String>,

    /// Files to upload.
    #[serde(skip)]
    pub attachments: Vec<Attachment>,
}

impl ReplyRequest {
    /// Creates a reply.
    pub fn new(body: impl Into<String>) -> Self {
        Self {
            body: body.into(),
            ..Self::default()
        }
    }

    /// Adds a CC recipient.
    pub fn cc(mut self, email: impl Into<String>) -> Self {
        self.cc_emails.push(email.into());
        self
    }

    /// Adds a file.
    pub fn with_attachment(mut self, attachment: Attachment) -> Self {
        self.attachments.push(attachment);
        self
    }
}

impl RequestBody for ReplyRequest {
    fn attachments(&self) -> &[Attachment] {
        &self.attachments
    }
}

/// Body of `POST /api/v2/tickets/{id}/notes`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct NoteRequest {
    /// HTML body.
    pub body: String,

    /// Private notes are hidden from the requester; Freshdesk defaults to true.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub private: Option<bool>,

    /// Record the note as coming from outside.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub incoming: Option<bool>,

    /// Author.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<i64>,

    /// Agents to notify.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub notify_emails: Vec<String>,

    /// Files to upload.
    #[serde(skip)]
    pub attachments: Vec<Attachment>,
}

impl NoteRequest {
    /// Creates a private note.
    pub fn private(body: impl Into<String>) -> Self {
        Self {
            body: body.into(),
            private: Some(true),
            ..Self::default()
        }
    }

    /// Creates a note visible to the requester.
    pub fn public(body: impl Into<String>) -> Self {
        Self {
            body: body.into(),
            private: Some(false),
            ..Self::default()
        }
    }

    /// Adds a file.
    pub fn with_attachment(mut self, attachment: Attachment) -> Self {
        self.attachments.push(attachment);
        self
    }
}

impl RequestBody for NoteRequest {
    fn attachments(&self) -> &[Attachment] {
        &self.attachments
    }
}

/// Body of `POST /api/v2/tickets/{id}/forward`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ForwardRequest {
    /// Recipients.
    pub to_emails: Vec<String>,

    /// HTML body prepended to the forwarded content.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,

    /// Sender mailbox.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from_email: Option<String>,

    /// Forwarding agent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agent_id: Option<i64>,

    /// CC recipients.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub cc_emails: Vec<String>,

    /// BCC recipients.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub bcc_emails: Vec<String>,

    /// Quote the ticket description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_quoted_text: Option<bool>,

    /// Re-attach the ticket's own files.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_original_attachments: Option<bool>,

    /// Files to upload.
    #[serde(skip)]
    pub attachments: Vec<Attachment>,
}

impl ForwardRequest {
    /// Forwards to one recipient.
    pub fn to(email: impl Into<String>) -> Self {
        Self {
            to_emails: vec![email.into()],
            ..Self::default()
        }
    }
}

impl RequestBody for ForwardRequest {
    fn attachments(&self) -> &[Attachment] {
        &self.attachments
    }
}

/// Body of `PUT /api/v2/conversations/{id}`. Only notes can be edited.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct UpdateConversationRequest {
    /// New HTML body.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,

    /// Files to add.
    #[serde(skip)]
    pub attachments: Vec<Attachment>,
}

impl RequestBody for UpdateConversationRequest {
    fn attachments(&self) -> &[Attachment] {
        &self.attachments
    }
}
