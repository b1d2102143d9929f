//! Resource clients.
//!
//! Each API area is a borrowed view over [`FreshdeskClient`](crate::FreshdeskClient)
//! obtained from an accessor such as `client.tickets()`. Methods interpolate
//! IDs into the endpoint path, build the query through
//! [`QueryBuilder`](crate::query::QueryBuilder), and hand off to the client
//! for single calls or to the pagination engine for listings.

mod admin;
mod agents;
mod canned_responses;
mod companies;
mod contacts;
mod conversations;
mod custom_objects;
mod fields;
mod groups;
mod products;
mod satisfaction_ratings;
mod solutions;
mod ticket_fields;
mod tickets;
mod time_entries;

pub use admin::{BusinessHoursApi, EmailConfigsApi, RolesApi};
pub use agents::AgentsApi;
pub use canned_responses::CannedResponsesApi;
pub use companies::CompaniesApi;
pub use contacts::ContactsApi;
pub use conversations::ConversationsApi;
pub use custom_objects::CustomObjectsApi;
pub use fields::{CompanyFieldsApi, ContactFieldsApi};
pub use groups::GroupsApi;
pub use products::ProductsApi;
pub use satisfaction_ratings::SatisfactionRatingsApi;
pub use solutions::SolutionsApi;
pub use ticket_fields::TicketFieldsApi;
pub use tickets::TicketsApi;
pub use time_entries::TimeEntriesApi;

use crate::body::RequestBody;
use crate::error::FreshdeskError;

/// Root of every v2 endpoint.
pub(crate) const API_PREFIX: &str = "/api/v2";

/// Rejects IDs Freshdesk can never have, before any request is made.
pub(crate) fn require_id(what: &str, id: i64) -> Result<(), FreshdeskError> {
    if id <= 0 {
        return Err(FreshdeskError::validation(format!(
            "{} must be a positive integer, got {}",
            what, id
        )));
    }
    Ok(())
}

/// Rejects blank string identifiers and search terms.
pub(crate) fn require_non_blank(what: &str, value: &str) -> Result<(), FreshdeskError> {
    if value.trim().is_empty() {
        return Err(FreshdeskError::validation(format!("{} must not be empty", what)));
    }
    Ok(())
}

/// Rejects update bodies that would send no change at all.
pub(crate) fn require_changes<B: RequestBody + ?Sized>(body: &B) -> Result<(), FreshdeskError> {
    let value = serde_json::to_value(body)?;
    let empty = value.as_object().is_some_and(|o| o.is_empty());
    if empty && !body.has_attachments() {
        return Err(FreshdeskError::validation(
            "no fields to update - set at least one field",
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::body::Attachment;
    use crate::models::{TicketPriority, UpdateTicketRequest};

    #[test]
    fn test_require_id() {
        assert!(require_id("ticket_id", 1).is_ok());
        assert!(matches!(require_id("ticket_id", 0), Err(FreshdeskError::Validation(_))));
        assert!(require_id("ticket_id", -5).is_err());
    }

    #[test]
    fn test_require_changes() {
        assert!(require_changes(&UpdateTicketRequest::new()).is_err());
        assert!(require_changes(&UpdateTicketRequest::new().priority(TicketPriority::High)).is_ok());

        let files_only = UpdateTicketRequest::new().with_attachment(Attachment::new("a.txt", b"a".to_vec()));
        assert!(require_changes(&files_only).is_ok());
    }

    #[test]
    fn test_require_non_blank() {
        assert!(require_non_blank("term", "vpn").is_ok());
        assert!(require_non_blank("term", "  ").is_err());
    }
}
