//! Types shared by several Freshdesk resources.

use chrono::{DateTime, Utc};
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Free-form `custom_fields` / record `data` object.
pub type CustomFields = Map<String, Value>;

/// Declares an enum serialized as one of Freshdesk's integer codes.
///
/// Unknown codes land in `Other(code)` and serialize back unchanged.
macro_rules! int_coded {
    (
        $(#[$meta:meta])*
        $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident = $code:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
        #[serde(from = "i64", into = "i64")]
        pub enum $name {
            $( $(#[$vmeta])* $variant, )+
            /// A code this crate has no name for.
            Other(i64),
        }

        impl From<i64> for $name {
            fn from(code: i64) -> Self {
                match code {
                    $( $code => $name::$variant, )+
                    other => $name::Other(other),
                }
            }
        }

        impl From<$name> for i64 {
            fn from(value: $name) -> Self {
                match value {
                    $( $name::$variant => $code, )+
                    $name::Other(code) => code,
                }
            }
        }

        impl $name {
            /// The numeric code sent on the wire.
            pub fn code(self) -> i64 {
                self.into()
            }
        }
    };
}

pub(crate) use int_coded;

/// Deserializes an ID the API sends either as a string or as a number.
pub(crate) fn string_or_int<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(de::Error::custom(format!(
            "expected a string or an integer, got {}",
            other
        ))),
    }
}

/// Optional variant of [`string_or_int`]; `null` maps to `None`.
pub(crate) fn opt_string_or_int<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(None),
        Value::String(s) => Ok(Some(s)),
        Value::Number(n) => Ok(Some(n.to_string())),
        other => Err(de::Error::custom(format!(
            "expected a string or an integer, got {}",
            other
        ))),
    }
}

/// File metadata attached to tickets, conversations and canned responses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttachmentInfo {
    /// Attachment ID (used by `tickets().delete_attachment`).
    pub id: i64,

    /// File name.
    #[serde(default)]
    pub name: Option<String>,

    /// MIME type.
    #[serde(default)]
    pub content_type: Option<String>,

    /// Size in bytes.
    #[serde(default)]
    pub size: Option<u64>,

    /// Short-lived download URL.
    #[serde(default)]
    pub attachment_url: Option<String>,

    /// Upload time.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,

    /// Last modification time.
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Minimal `{id, name}` reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdName {
    /// Entity ID.
    pub id: i64,

    /// Display name.
    #[serde(default)]
    pub name: Option<String>,
}

impl IdName {
    /// Returns the name if present, otherwise a placeholder.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("Unknown")
    }
}

/// Sort direction for list endpoints that accept `order_type`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// Oldest / smallest first.
    Asc,
    /// Newest / largest first.
    Desc,
}

impl SortOrder {
    /// Wire value.
    pub fn as_str(self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }
}

impl std::fmt::Display for SortOrder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    int_coded! {
        Color {
            Red = 1,
            Blue = 2,
        }
    }

    #[test]
    fn test_int_coded_known_and_unknown() {
        assert_eq!(serde_json::from_str::<Color>("2").unwrap(), Color::Blue);
        assert_eq!(serde_json::from_str::<Color>("9").unwrap(), Color::Other(9));
        assert_eq!(serde_json::to_string(&Color::Red).unwrap(), "1");
        assert_eq!(serde_json::to_string(&Color::Other(9)).unwrap(), "9");
        assert_eq!(Color::Blue.code(), 2);
    }

    #[derive(Deserialize)]
    struct Ids {
        #[serde(deserialize_with = "string_or_int")]
        id: String,
        #[serde(default, deserialize_with = "opt_string_or_int")]
        parent: Option<String>,
    }

    #[test]
    fn test_string_or_int_ids() {
        let ids: Ids = serde_json::from_str(r#"{"id": 17, "parent": "a-1"}"#).unwrap();
        assert_eq!(ids.id, "17");
        assert_eq!(ids.parent.as_deref(), Some("a-1"));

        let ids: Ids = serde_json::from_str(r#"{"id": "x", "parent": null}"#).unwrap();
        assert_eq!(ids.id, "x");
        assert!(ids.parent.is_none());

        assert!(serde_json::from_str::<Ids>(r#"{"id": true}"#).is_err());
    }

    #[test]
    fn test_attachment_info_minimal() {
        let info: AttachmentInfo = serde_json::from_str(r#"{"id": 5, "name": "log.txt"}"#).unwrap();
        assert_eq!(info.id, 5);
        assert_eq!(info.name.as_deref(), Some("log.txt"));
        assert!(info.size.is_none());
    }

    #[test]
    fn test_id_name_display() {
        let named = IdName { id: 1, name: Some("Acme".to_string()) };
        assert_eq!(named.display_name(), "Acme");
        let unnamed = IdName { id: 2, name: None };
        assert_eq!(unnamed.display_name(), "Unknown");
    }
}
