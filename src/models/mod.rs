//! Data models for the Freshdesk API.
//!
//! Response types mirror the vendor JSON and tolerate missing or extra
//! fields. Request types serialize only the fields that are set.

mod admin;
mod agent;
mod canned_response;
mod common;
mod company;
mod contact;
mod conversation;
mod custom_object;
mod field;
mod group;
mod product;
mod satisfaction_rating;
mod solution;
mod ticket;
mod ticket_field;
mod time_entry;

pub use admin::*;
pub use agent::*;
pub use canned_response::*;
pub use common::{AttachmentInfo, CustomFields, IdName, SortOrder};
pub use company::*;
pub use contact::*;
pub use conversation::*;
pub use custom_object::{
    CustomObjectField, CustomObjectRecord, CustomObjectSchema, RecordFilter, RecordRequest,
};
pub use field::*;
pub use group::*;
pub use product::*;
pub use satisfaction_rating::*;
pub use solution::*;
pub use ticket::*;
pub use ticket_field::*;
pub use time_entry::*;

pub(crate) use custom_object::SchemaList;
