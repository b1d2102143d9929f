//! Request bodies and attachments.
//!
//! Any request DTO the client sends implements [`RequestBody`]. Bodies that
//! carry files report them through [`RequestBody::attachments`]; the client
//! then switches from JSON to `multipart/form-data` and flattens the JSON
//! form of the body into form fields the way Freshdesk expects
//! (`tags[]`, `custom_fields[name]`, `attachments[]`).

use reqwest::multipart::{Form, Part};
use serde::Serialize;
use serde_json::Value;

use crate::error::FreshdeskError;

/// Combined size limit for all attachments on one request (20 MB).
pub const MAX_ATTACHMENTS_BYTES: usize = 20 * 1024 * 1024;

/// A file uploaded alongside a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    /// File name presented to Freshdesk.
    pub file_name: String,

    /// MIME type; Freshdesk sniffs the type when absent.
    pub content_type: Option<String>,

    /// File contents.
    pub content: Vec<u8>,
}

impl Attachment {
    /// Creates an attachment from in-memory bytes.
    pub fn new(file_name: impl Into<String>, content: impl Into<Vec<u8>>) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: None,
            content: content.into(),
        }
    }

    /// Sets the MIME type.
    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    /// Reads an attachment from disk, using the file name as the upload name.
    pub async fn from_path(path: impl AsRef<std::path::Path>) -> Result<Self, FreshdeskError> {
        let path = path.as_ref();
        let content = tokio::fs::read(path).await.map_err(|e| {
            FreshdeskError::validation(format!("cannot read attachment {}: {}", path.display(), e))
        })?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "attachment".to_string());
        Ok(Self::new(file_name, content))
    }
}

/// A serializable request body.
///
/// Implementors that can carry files override [`attachments`](Self::attachments);
/// the attachment field itself should be `#[serde(skip)]` so it never leaks
/// into the JSON form.
pub trait RequestBody: Serialize + Send + Sync {
    /// Files to upload with this body.
    fn attachments(&self) -> &[Attachment] {
        &[]
    }

    /// Multipart field name the files are sent under.
    fn attachment_field(&self) -> &'static str {
        "attachments[]"
    }

    /// True when the body must be sent as `multipart/form-data`.
    fn has_attachments(&self) -> bool {
        !self.attachments().is_empty()
    }
}

impl RequestBody for Value {}

/// Placeholder body type for requests that send nothing.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct NoBody;

impl RequestBody for NoBody {}

/// Checks the combined attachment size against the vendor limit.
pub(crate) fn check_attachment_size(attachments: &[Attachment]) -> Result<(), FreshdeskError> {
    let total: usize = attachments.iter().map(|a| a.content.len()).sum();
    if total > MAX_ATTACHMENTS_BYTES {
        return Err(FreshdeskError::validation(format!(
            "attachments total {} bytes, limit is {} bytes",
            total, MAX_ATTACHMENTS_BYTES
        )));
    }
    Ok(())
}

/// Flattens a JSON object into multipart text fields.
///
/// Scalars map to one field, arrays to repeated `name[]` fields, nested
/// objects to `name[key]` fields; nulls are dropped.
pub(crate) fn form_fields(value: &Value) -> Result<Vec<(String, String)>, FreshdeskError> {
    let object = value
        .as_object()
        .ok_or_else(|| FreshdeskError::validation("multipart bodies must serialize to a JSON object"))?;

    let mut fields = Vec::new();
    for (name, value) in object {
        flatten_into(name, value, &mut fields);
    }
    Ok(fields)
}

fn flatten_into(name: &str, value: &Value, out: &mut Vec<(String, String)>) {
    match value {
        Value::Null => {}
        Value::String(s) => out.push((name.to_string(), s.clone())),
        Value::Bool(_) | Value::Number(_) => out.push((name.to_string(), value.to_string())),
        Value::Array(items) => {
            let key = format!("{}[]", name);
            for item in items {
                flatten_into(&key, item, out);
            }
        }
        Value::Object(map) => {
            for (key, item) in map {
                flatten_into(&format!("{}[{}]", name, key), item, out);
            }
        }
    }
}

/// Builds a multipart form from a body and its attachments.
pub(crate) fn build_multipart<B: RequestBody + ?Sized>(body: &B) -> Result<Form, FreshdeskError> {
    check_attachment_size(body.attachments())?;

    let value = serde_json::to_value(body)?;
    let mut form = Form::new();
    for (name, text) in form_fields(&value)? {
        form = form.text(name, text);
    }

    for attachment in body.attachments() {
        let mut part = Part::bytes(attachment.content.clone()).file_name(attachment.file_name.clone());
        if let Some(content_type) = &attachment.content_type {
            part = part.mime_str(content_type).map_err(|_| {
                FreshdeskError::validation(format!(
                    "invalid content type {:?} for attachment {}",
                    content_type, attachment.file_name
                ))
            })?;
        }
        form = form.part(body.attachment_field(), part);
    }

    Ok(form)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Serialize)]
    struct WithFiles {
        subject: String,
        #[serde(skip)]
        attachments: Vec<Attachment>,
    }

    impl RequestBody for WithFiles {
        fn attachments(&self) -> &[Attachment] {
            &self.attachments
        }
    }

    #[test]
    fn test_default_has_no_attachments() {
        assert!(!json!({"a": 1}).has_attachments());
        assert!(!NoBody.has_attachments());
    }

    #[test]
    fn test_capability_reports_attachments() {
        let body = WithFiles {
            subject: "Printer".to_string(),
            attachments: vec![Attachment::new("log.txt", b"boom".to_vec())],
        };
        assert!(body.has_attachments());
        let value = serde_json::to_value(&body).unwrap();
        assert!(value.get("attachments").is_none());
    }

    #[test]
    fn test_form_fields_flattening() {
        let value = json!({
            "subject": "Printer",
            "priority": 2,
            "tags": ["hardware", "floor-3"],
            "custom_fields": {"cf_site": "HQ"},
            "group_id": null
        });
        let mut fields = form_fields(&value).unwrap();
        fields.sort();
        assert_eq!(
            fields,
            vec![
                ("custom_fields[cf_site]".to_string(), "HQ".to_string()),
                ("priority".to_string(), "2".to_string()),
                ("subject".to_string(), "Printer".to_string()),
                ("tags[]".to_string(), "floor-3".to_string()),
                ("tags[]".to_string(), "hardware".to_string()),
            ]
        );
    }

    #[test]
    fn test_form_fields_requires_object() {
        assert!(form_fields(&json!([1, 2])).is_err());
    }

    #[test]
    fn test_attachment_size_limit() {
        let small = vec![Attachment::new("a.bin", vec![0u8; 10])];
        assert!(check_attachment_size(&small).is_ok());
        let big = vec![Attachment::new("b.bin", vec![0u8; MAX_ATTACHMENTS_BYTES + 1])];
        assert!(check_attachment_size(&big).is_err());
    }

    #[test]
    fn test_build_multipart_rejects_bad_mime() {
        let body = WithFiles {
            subject: "x".to_string(),
            attachments: vec![Attachment::new("a.txt", b"a".to_vec()).with_content_type("not a mime")],
        };
        assert!(matches!(build_multipart(&body), Err(FreshdeskError::Validation(_))));
    }
}
