//! Product models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A product tickets can be filed against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Product ID.
    pub id: i64,

    /// Name.
    #[serde(default)]
    pub name: Option<String>,

    /// Description.
    #[serde(default)]
    pub description: Option<String>,

    /// Support mailbox of the product.
    #[serde(default)]
    pub primary_email: Option<String>,

    /// Creation time.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,

    /// Last update time.
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}
