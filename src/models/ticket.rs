//! Ticket models.
//!
//! [`Ticket`] mirrors `/api/v2/tickets/{id}`. Write operations use
//! [`CreateTicketRequest`], [`UpdateTicketRequest`] and
//! [`OutboundEmailRequest`]; the first two may carry attachments, in which
//! case they are sent as multipart forms.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::common::{int_coded, AttachmentInfo, CustomFields, SortOrder};
use super::conversation::Conversation;
use crate::body::{Attachment, RequestBody};
use crate::error::FreshdeskError;
use crate::query::QueryBuilder;

int_coded! {
    /// Ticket status.
    TicketStatus {
        /// Open.
        Open = 2,
        /// Waiting on the customer.
        Pending = 3,
        /// Resolved.
        Resolved = 4,
        /// Closed.
        Closed = 5,
    }
}

int_coded! {
    /// Ticket priority.
    TicketPriority {
        /// Low.
        Low = 1,
        /// Medium.
        Medium = 2,
        /// High.
        High = 3,
        /// Urgent.
        Urgent = 4,
    }
}

int_coded! {
    /// Channel a ticket came in through.
    TicketSource {
        /// Email.
        Email = 1,
        /// Customer portal.
        Portal = 2,
        /// Phone.
        Phone = 3,
        /// Chat.
        Chat = 7,
        /// Feedback widget.
        FeedbackWidget = 9,
        /// Outbound email.
        OutboundEmail = 10,
    }
}

/// A support ticket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ticket {
    /// Ticket ID.
    pub id: i64,

    /// Subject line.
    #[serde(default)]
    pub subject: Option<String>,

    /// HTML body. Only present on single-ticket reads unless requested.
    #[serde(default)]
    pub description: Option<String>,

    /// Plain-text body.
    #[serde(default)]
    pub description_text: Option<String>,

    /// Status.
    #[serde(default)]
    pub status: Option<TicketStatus>,

    /// Priority.
    #[serde(default)]
    pub priority: Option<TicketPriority>,

    /// Source channel.
    #[serde(default)]
    pub source: Option<TicketSource>,

    /// Helpdesk-defined ticket type (e.g. "Question").
    #[serde(default, rename = "type")]
    pub ticket_type: Option<String>,

    /// Requester contact ID.
    #[serde(default)]
    pub requester_id: Option<i64>,

    /// Assigned agent ID.
    #[serde(default)]
    pub responder_id: Option<i64>,

    /// Company ID.
    #[serde(default)]
    pub company_id: Option<i64>,

    /// Assigned group ID.
    #[serde(default)]
    pub group_id: Option<i64>,

    /// Product ID.
    #[serde(default)]
    pub product_id: Option<i64>,

    /// Mailbox the ticket was received on.
    #[serde(default)]
    pub email_config_id: Option<i64>,

    /// CC addresses of the original email.
    #[serde(default)]
    pub cc_emails: Vec<String>,

    /// Addresses the ticket was forwarded to.
    #[serde(default)]
    pub fwd_emails: Vec<String>,

    /// CC addresses used on replies.
    #[serde(default)]
    pub reply_cc_emails: Vec<String>,

    /// Recipient addresses of the original email.
    #[serde(default)]
    pub to_emails: Option<Vec<String>>,

    /// Tags.
    #[serde(default)]
    pub tags: Vec<String>,

    /// Marked as spam.
    #[serde(default)]
    pub spam: Option<bool>,

    /// Soft-deleted.
    #[serde(default)]
    pub deleted: Option<bool>,

    /// Resolution SLA breached.
    #[serde(default)]
    pub is_escalated: Option<bool>,

    /// First response SLA breached.
    #[serde(default)]
    pub fr_escalated: Option<bool>,

    /// Resolution due time.
    #[serde(default)]
    pub due_by: Option<DateTime<Utc>>,

    /// First response due time.
    #[serde(default)]
    pub fr_due_by: Option<DateTime<Utc>>,

    /// Helpdesk custom fields (`cf_*`).
    #[serde(default)]
    pub custom_fields: CustomFields,

    /// Files attached to the ticket body.
    #[serde(default)]
    pub attachments: Vec<AttachmentInfo>,

    /// Requester details (`include=requester`).
    #[serde(default)]
    pub requester: Option<TicketRequester>,

    /// Timeline (`include=stats`).
    #[serde(default)]
    pub stats: Option<TicketStats>,

    /// Company summary (`include=company`).
    #[serde(default)]
    pub company: Option<super::common::IdName>,

    /// First conversations (`include=conversations`).
    #[serde(default)]
    pub conversations: Option<Vec<Conversation>>,

    /// Creation time.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,

    /// Last update time.
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Ticket {
    /// Returns the subject or a placeholder.
    pub fn display_subject(&self) -> &str {
        self.subject.as_deref().unwrap_or("(No subject)")
    }

    /// True for resolved or closed tickets.
    pub fn is_done(&self) -> bool {
        matches!(
            self.status,
            Some(TicketStatus::Resolved) | Some(TicketStatus::Closed)
        )
    }
}

/// Requester embedded with `include=requester`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TicketRequester {
    /// Contact ID.
    pub id: i64,
    /// Name.
    #[serde(default)]
    pub name: Option<String>,
    /// Email.
    #[serde(default)]
    pub email: Option<String>,
    /// Mobile number.
    #[serde(default)]
    pub mobile: Option<String>,
    /// Phone number.
    #[serde(default)]
    pub phone: Option<String>,
}

/// Ticket timeline embedded with `include=stats`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TicketStats {
    /// Last agent response.
    #[serde(default)]
    pub agent_responded_at: Option<DateTime<Utc>>,
    /// Last requester response.
    #[serde(default)]
    pub requester_responded_at: Option<DateTime<Utc>>,
    /// First agent response.
    #[serde(default)]
    pub first_responded_at: Option<DateTime<Utc>>,
    /// Last status change.
    #[serde(default)]
    pub status_updated_at: Option<DateTime<Utc>>,
    /// Last reopen.
    #[serde(default)]
    pub reopened_at: Option<DateTime<Utc>>,
    /// Resolution time.
    #[serde(default)]
    pub resolved_at: Option<DateTime<Utc>>,
    /// Closing time.
    #[serde(default)]
    pub closed_at: Option<DateTime<Utc>>,
    /// Entered pending.
    #[serde(default)]
    pub pending_since: Option<DateTime<Utc>>,
}

/// Extra data embedded in ticket reads via `include=`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TicketInclude {
    /// Requester contact.
    Requester,
    /// Timeline.
    Stats,
    /// Company.
    Company,
    /// Up to ten conversations (single reads only).
    Conversations,
    /// Ticket body (list reads only).
    Description,
}

impl TicketInclude {
    /// Wire value.
    pub fn as_str(self) -> &'static str {
        match self {
            TicketInclude::Requester => "requester",
            TicketInclude::Stats => "stats",
            TicketInclude::Company => "company",
            TicketInclude::Conversations => "conversations",
            TicketInclude::Description => "description",
        }
    }
}

impl AsRef<str> for TicketInclude {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

/// Predefined ticket views for `list`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PredefinedTicketFilter {
    /// New tickets and tickets open for the current agent.
    NewAndMyOpen,
    /// Tickets the current agent watches.
    Watching,
    /// Spam.
    Spam,
    /// Deleted tickets.
    Deleted,
}

impl PredefinedTicketFilter {
    /// Wire value.
    pub fn as_str(self) -> &'static str {
        match self {
            PredefinedTicketFilter::NewAndMyOpen => "new_and_my_open",
            PredefinedTicketFilter::Watching => "watching",
            PredefinedTicketFilter::Spam => "spam",
            PredefinedTicketFilter::Deleted => "deleted",
        }
    }
}

/// Filters for `tickets().list`.
///
/// With no `updated_since`, Freshdesk only returns tickets created in the
/// last 30 days.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TicketListFilter {
    /// Predefined view.
    pub filter: Option<PredefinedTicketFilter>,
    /// Requester contact ID.
    pub requester_id: Option<i64>,
    /// Requester email.
    pub email: Option<String>,
    /// Requester external ID.
    pub unique_external_id: Option<String>,
    /// Company ID.
    pub company_id: Option<i64>,
    /// Only tickets updated at or after this time.
    pub updated_since: Option<DateTime<Utc>>,
    /// `created_at`, `due_by`, `updated_at` or `status`.
    pub order_by: Option<String>,
    /// Sort direction.
    pub order_type: Option<SortOrder>,
    /// Embedded data.
    pub include: Vec<TicketInclude>,
}

impl TicketListFilter {
    /// Creates an empty filter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Restricts to tickets updated since `time`.
    pub fn updated_since(mut self, time: DateTime<Utc>) -> Self {
        self.updated_since = Some(time);
        self
    }

    /// Restricts to one requester email.
    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Adds an `include` entry.
    pub fn include(mut self, include: TicketInclude) -> Self {
        self.include.push(include);
        self
    }

    /// Query parameters for this filter.
    pub fn to_query(&self) -> QueryBuilder {
        QueryBuilder::new()
            .push_opt("filter", self.filter.map(|f| f.as_str()))
            .push_opt("requester_id", self.requester_id)
            .push_opt("email", self.email.as_deref())
            .push_opt("unique_external_id", self.unique_external_id.as_deref())
            .push_opt("company_id", self.company_id)
            .push_time("updated_since", self.updated_since)
            .push_opt("order_by", self.order_by.as_deref())
            .push_opt("order_type", self.order_type)
            .push_list("include", &self.include)
    }
}

/// Body of `POST /api/v2/tickets`.
///
/// At least one requester identifier (`requester_id`, `email`, `phone`,
/// `twitter_id`, `facebook_id` or `unique_external_id`) is required.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CreateTicketRequest {
    /// Subject line.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,

    /// HTML body.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Requester contact ID.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub requester_id: Option<i64>,

    /// Requester email; creates the contact if unknown.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    /// Requester phone.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,

    /// Requester Twitter handle.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub twitter_id: Option<String>,

    /// Requester Facebook ID.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub facebook_id: Option<String>,

    /// Requester external ID.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unique_external_id: Option<String>,

    /// Requester name (used with `phone`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Status; Freshdesk defaults to Open.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<TicketStatus>,

    /// Priority; Freshdesk defaults to Low.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<TicketPriority>,

    /// Source; Freshdesk defaults to Portal.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<TicketSource>,

    /// Ticket type.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub ticket_type: Option<String>,

    /// Assigned agent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub responder_id: Option<i64>,

    /// Assigned group.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_id: Option<i64>,

    /// Product.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_id: Option<i64>,

    /// Company.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_id: Option<i64>,

    /// Resolution due time.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_by: Option<DateTime<Utc>>,

    /// First response due time.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fr_due_by: Option<DateTime<Utc>>,

    /// CC addresses.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub cc_emails: Vec<String>,

    /// Tags.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,

    /// Custom field values keyed by field name.
    #[serde(skip_serializing_if = "CustomFields::is_empty")]
    pub custom_fields: CustomFields,

    /// Files to upload.
    #[serde(skip)]
    pub attachments: Vec<Attachment>,
}

impl CreateTicketRequest {
    /// Starts a ticket from a requester email, subject and body.
    pub fn new(
        email: impl Into<String>,
        subject: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            email: Some(email.into()),
            subject: Some(subject.into()),
            description: Some(description.into()),
            ..Self::default()
        }
    }

    /// Sets the priority.
    pub fn with_priority(mut self, priority: TicketPriority) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Sets the status.
    pub fn with_status(mut self, status: TicketStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Adds a tag.
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    /// Adds a file.
    pub fn with_attachment(mut self, attachment: Attachment) -> Self {
        self.attachments.push(attachment);
        self
    }

    /// Checks that a requester is identified.
    pub fn validate(&self) -> Result<(), FreshdeskError> {
        let identified = self.requester_id.is_some()
            || [
                &self.email,
                &self.phone,
                &self.twitter_id,
                &self.facebook_id,
                &self.unique_external_id,
            ]
            .iter()
            .any(|v| v.as_deref().is_some_and(|s| !s.trim().is_empty()));

        if !identified {
            return Err(FreshdeskError::validation(
                "ticket requires requester_id, email, phone, twitter_id, facebook_id or unique_external_id",
            ));
        }
        Ok(())
    }
}

impl RequestBody for CreateTicketRequest {
    fn attachments(&self) -> &[Attachment] {
        &self.attachments
    }
}

/// Body of `PUT /api/v2/tickets/{id}`. Unset fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct UpdateTicketRequest {
    /// Subject line.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,

    /// HTML body.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Status.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<TicketStatus>,

    /// Priority.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<TicketPriority>,

    /// Source.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<TicketSource>,

    /// Ticket type.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub ticket_type: Option<String>,

    /// Requester contact ID.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub requester_id: Option<i64>,

    /// Assigned agent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub responder_id: Option<i64>,

    /// Assigned group.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_id: Option<i64>,

    /// Product.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_id: Option<i64>,

    /// Company.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_id: Option<i64>,

    /// Resolution due time.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_by: Option<DateTime<Utc>>,

    /// First response due time.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fr_due_by: Option<DateTime<Utc>>,

    /// Replaces the tag list.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,

    /// Custom field values to change.
    #[serde(skip_serializing_if = "CustomFields::is_empty")]
    pub custom_fields: CustomFields,

    /// Files to add.
    #[serde(skip)]
    pub attachments: Vec<Attachment>,
}

impl UpdateTicketRequest {
    /// Creates an empty update.
    pub fn new() -> Self {
        Self::default()
    }

    /// Changes the status.
    pub fn status(mut self, status: TicketStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Changes the priority.
    pub fn priority(mut self, priority: TicketPriority) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Reassigns the ticket.
    pub fn responder(mut self, agent_id: i64) -> Self {
        self.responder_id = Some(agent_id);
        self
    }

    /// Adds a file.
    pub fn with_attachment(mut self, attachment: Attachment) -> Self {
        self.attachments.push(attachment);
        self
    }
}

impl RequestBody for UpdateTicketRequest {
    fn attachments(&self) -> &[Attachment] {
        &self.attachments
    }
}

/// Body of `POST /api/v2/tickets/outbound_email`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct OutboundEmailRequest {
    /// Recipient address.
    pub email: String,

    /// Subject line.
    pub subject: String,

    /// HTML body.
    pub description: String,

    /// Mailbox to send from.
    pub email_config_id: i64,

    /// Status after sending.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<TicketStatus>,

    /// Priority.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<TicketPriority>,

    /// Recipient name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Assigned group.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_id: Option<i64>,

    /// Ticket type.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub ticket_type: Option<String>,

    /// CC addresses.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub cc_emails: Vec<String>,

    /// Tags.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,

    /// Custom field values.
    #[serde(skip_serializing_if = "CustomFields::is_empty")]
    pub custom_fields: CustomFields,

    /// Files to upload.
    #[serde(skip)]
    pub attachments: Vec<Attachment>,
}

impl OutboundEmailRequest {
    /// Creates an outbound email.
    pub fn new(
        email: impl Into<String>,
        subject: impl Into<String>,
        description: impl Into<String>,
        email_config_id: i64,
    ) -> Self {
        Self {
            email: email.into(),
            subject: subject.into(),
            description: description.into(),
            email_config_id,
            ..Self::default()
        }
    }
}

impl RequestBody for OutboundEmailRequest {
    fn attachments(&self) -> &[Attachment] {
        &self.attachments
    }
}

/// Response of `GET /api/v2/tickets/{id}/watchers`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TicketWatchers {
    /// Agent IDs watching the ticket.
    #[serde(default)]
    pub watcher_ids: Vec<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_ticket_deserializes_codes_and_unknown_fields() {
        let ticket: Ticket = serde_json::from_value(json!({
            "id": 42,
            "subject": "Printer on fire",
            "status": 2,
            "priority": 4,
            "source": 12,
            "type": "Incident",
            "tags": ["hardware"],
            "custom_fields": {"cf_site": "HQ"},
            "created_at": "2024-03-01T12:30:00Z",
            "some_future_field": true
        }))
        .unwrap();

        assert_eq!(ticket.id, 42);
        assert_eq!(ticket.status, Some(TicketStatus::Open));
        assert_eq!(ticket.priority, Some(TicketPriority::Urgent));
        assert_eq!(ticket.source, Some(TicketSource::Other(12)));
        assert_eq!(ticket.ticket_type.as_deref(), Some("Incident"));
        assert_eq!(ticket.custom_fields.get("cf_site"), Some(&json!("HQ")));
        assert!(!ticket.is_done());
    }

    #[test]
    fn test_ticket_survives_round_trip() {
        let ticket: Ticket = serde_json::from_value(json!({
            "id": 7,
            "subject": "VPN down",
            "status": 3,
            "priority": 2,
            "source": 99,
            "tags": ["network"],
            "cc_emails": ["ops@example.com"],
            "custom_fields": {"cf_site": "HQ", "cf_floor": 4, "cf_vip": null},
            "requester": {"id": 9, "name": "Jane"},
            "stats": {"first_responded_at": "2024-03-01T11:00:00Z"},
            "due_by": "2024-03-03T10:00:00Z"
        }))
        .unwrap();

        let json = serde_json::to_string(&ticket).unwrap();
        let back: Ticket = serde_json::from_str(&json).unwrap();

        assert_eq!(back, ticket);
        assert_eq!(back.source, Some(TicketSource::Other(99)));
        assert_eq!(back.custom_fields.get("cf_floor"), Some(&json!(4)));
        assert_eq!(back.custom_fields.get("cf_vip"), Some(&json!(null)));
    }

    #[test]
    fn test_ticket_with_includes() {
        let ticket: Ticket = serde_json::from_value(json!({
            "id": 1,
            "requester": {"id": 9, "name": "Jane", "email": "jane@example.com"},
            "stats": {"resolved_at": "2024-03-02T00:00:00Z"},
            "status": 4
        }))
        .unwrap();
        assert_eq!(ticket.requester.as_ref().unwrap().id, 9);
        assert!(ticket.stats.as_ref().unwrap().resolved_at.is_some());
        assert!(ticket.is_done());
    }

    #[test]
    fn test_create_request_omits_unset_fields() {
        let request = CreateTicketRequest::new("jane@example.com", "Help", "<p>Broken</p>")
            .with_priority(TicketPriority::High)
            .with_tag("vip");
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(
            value,
            json!({
                "subject": "Help",
                "description": "<p>Broken</p>",
                "email": "jane@example.com",
                "priority": 3,
                "tags": ["vip"]
            })
        );
        assert!(!request.has_attachments());
    }

    #[test]
    fn test_create_request_requires_requester() {
        let request = CreateTicketRequest {
            subject: Some("No one".to_string()),
            ..CreateTicketRequest::default()
        };
        assert!(matches!(request.validate(), Err(FreshdeskError::Validation(_))));
        assert!(CreateTicketRequest::new("a@b.c", "s", "d").validate().is_ok());
    }

    #[test]
    fn test_attachments_switch_to_multipart() {
        let request = CreateTicketRequest::new("a@b.c", "s", "d")
            .with_attachment(Attachment::new("log.txt", b"boom".to_vec()));
        assert!(request.has_attachments());
        let value = serde_json::to_value(&request).unwrap();
        assert!(value.get("attachments").is_none());
    }

    #[test]
    fn test_list_filter_query() {
        let since = DateTime::parse_from_rfc3339("2024-01-01T00:00:00Z")
            .unwrap()
            .with_timezone(&Utc);
        let filter = TicketListFilter::new()
            .email("jane+x@example.com")
            .updated_since(since)
            .include(TicketInclude::Requester)
            .include(TicketInclude::Stats);
        assert_eq!(
            filter.to_query().to_query_string(),
            "email=jane%2Bx%40example.com&updated_since=2024-01-01T00%3A00%3A00Z&include=requester%2Cstats"
        );
        assert!(TicketListFilter::new().to_query().is_empty());
    }

    #[test]
    fn test_update_request_only_changed_fields() {
        let update = UpdateTicketRequest::new().status(TicketStatus::Resolved);
        assert_eq!(serde_json::to_value(&update).unwrap(), json!({"status": 4}));
    }
}
