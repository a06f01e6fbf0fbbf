// mailsoap-types/src/attach.rs
//! Attachment specifications used when composing a message.

use crate::flag::TriBool;
use crate::record::{display_via_render, FieldSpec, FieldValue, Record};
use serde::{Deserialize, Serialize};

/// A MIME part of an existing message.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MimePartAttachSpec {
    #[serde(rename = "mid", default, skip_serializing_if = "Option::is_none")]
    pub message_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub part: Option<String>,
    #[serde(default, skip_serializing_if = "TriBool::is_absent")]
    pub optional: TriBool,
}

impl MimePartAttachSpec {
    pub fn new(message_id: impl Into<String>, part: impl Into<String>) -> Self {
        Self {
            message_id: Some(message_id.into()),
            part: Some(part.into()),
            optional: TriBool::Absent,
        }
    }
}

impl Record for MimePartAttachSpec {
    const RECORD_NAME: &'static str = "MimePartAttachSpec";
    const ELEMENT: &'static str = "mp";
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::required("message_id", "mid"),
        FieldSpec::required("part", "part"),
        FieldSpec::optional("optional", "optional"),
    ];

    fn values(&self) -> Vec<FieldValue<'_>> {
        vec![
            FieldValue::text(&self.message_id),
            FieldValue::text(&self.part),
            FieldValue::flag(self.optional),
        ]
    }
}

/// An entire existing message.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MsgAttachSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "TriBool::is_absent")]
    pub optional: TriBool,
}

impl MsgAttachSpec {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            optional: TriBool::Absent,
        }
    }
}

impl Record for MsgAttachSpec {
    const RECORD_NAME: &'static str = "MsgAttachSpec";
    const ELEMENT: &'static str = "m";
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::required("id", "id"),
        FieldSpec::optional("optional", "optional"),
    ];

    fn values(&self) -> Vec<FieldValue<'_>> {
        vec![FieldValue::text(&self.id), FieldValue::flag(self.optional)]
    }
}

/// A contact, attached as a vCard.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactAttachSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "TriBool::is_absent")]
    pub optional: TriBool,
}

impl ContactAttachSpec {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            optional: TriBool::Absent,
        }
    }
}

impl Record for ContactAttachSpec {
    const RECORD_NAME: &'static str = "ContactAttachSpec";
    const ELEMENT: &'static str = "cn";
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::required("id", "id"),
        FieldSpec::optional("optional", "optional"),
    ];

    fn values(&self) -> Vec<FieldValue<'_>> {
        vec![FieldValue::text(&self.id), FieldValue::flag(self.optional)]
    }
}

/// A stored document, addressed by path or by id and optional version.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocAttachSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(rename = "ver", default, skip_serializing_if = "Option::is_none")]
    pub version: Option<i32>,
    #[serde(default, skip_serializing_if = "TriBool::is_absent")]
    pub optional: TriBool,
}

impl DocAttachSpec {
    pub fn for_path(path: impl Into<String>) -> Self {
        Self {
            path: Some(path.into()),
            ..Self::default()
        }
    }

    pub fn for_id(id: impl Into<String>, version: Option<i32>) -> Self {
        Self {
            id: Some(id.into()),
            version,
            ..Self::default()
        }
    }
}

impl Record for DocAttachSpec {
    const RECORD_NAME: &'static str = "DocAttachSpec";
    const ELEMENT: &'static str = "doc";
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::optional("path", "path"),
        FieldSpec::optional("id", "id"),
        FieldSpec::optional("version", "ver"),
        FieldSpec::optional("optional", "optional"),
    ];

    fn values(&self) -> Vec<FieldValue<'_>> {
        vec![
            FieldValue::text(&self.path),
            FieldValue::text(&self.id),
            FieldValue::int(self.version),
            FieldValue::flag(self.optional),
        ]
    }
}

/// Any attachment spec, as found inside an `attach` element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttachSpec {
    MimePart(MimePartAttachSpec),
    Msg(MsgAttachSpec),
    Contact(ContactAttachSpec),
    Doc(DocAttachSpec),
}

impl AttachSpec {
    pub fn element(&self) -> &'static str {
        match self {
            Self::MimePart(_) => MimePartAttachSpec::ELEMENT,
            Self::Msg(_) => MsgAttachSpec::ELEMENT,
            Self::Contact(_) => ContactAttachSpec::ELEMENT,
            Self::Doc(_) => DocAttachSpec::ELEMENT,
        }
    }

    pub fn is_optional(&self) -> bool {
        let flag = match self {
            Self::MimePart(s) => s.optional,
            Self::Msg(s) => s.optional,
            Self::Contact(s) => s.optional,
            Self::Doc(s) => s.optional,
        };
        flag.unwrap_or(false)
    }

    pub fn render(&self) -> String {
        match self {
            Self::MimePart(s) => s.render(),
            Self::Msg(s) => s.render(),
            Self::Contact(s) => s.render(),
            Self::Doc(s) => s.render(),
        }
    }
}

/// Attachments of a message being composed: previously uploaded content
/// (`aid`) plus references to existing items.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttachmentsInfo {
    #[serde(rename = "aid", default, skip_serializing_if = "Option::is_none")]
    pub attachment_id: Option<String>,
    #[serde(rename = "mp", default, skip_serializing_if = "Vec::is_empty")]
    pub mime_parts: Vec<MimePartAttachSpec>,
    #[serde(rename = "m", default, skip_serializing_if = "Vec::is_empty")]
    pub messages: Vec<MsgAttachSpec>,
    #[serde(rename = "cn", default, skip_serializing_if = "Vec::is_empty")]
    pub contacts: Vec<ContactAttachSpec>,
    #[serde(rename = "doc", default, skip_serializing_if = "Vec::is_empty")]
    pub docs: Vec<DocAttachSpec>,
}

impl AttachmentsInfo {
    pub fn push(&mut self, spec: AttachSpec) {
        match spec {
            AttachSpec::MimePart(s) => self.mime_parts.push(s),
            AttachSpec::Msg(s) => self.messages.push(s),
            AttachSpec::Contact(s) => self.contacts.push(s),
            AttachSpec::Doc(s) => self.docs.push(s),
        }
    }

    pub fn len(&self) -> usize {
        self.mime_parts.len() + self.messages.len() + self.contacts.len() + self.docs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Record for AttachmentsInfo {
    const RECORD_NAME: &'static str = "AttachmentsInfo";
    const ELEMENT: &'static str = "attach";
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::optional("attachment_id", "aid"),
        FieldSpec::optional("mime_parts", "mp"),
        FieldSpec::optional("messages", "m"),
        FieldSpec::optional("contacts", "cn"),
        FieldSpec::optional("docs", "doc"),
    ];

    fn values(&self) -> Vec<FieldValue<'_>> {
        vec![
            FieldValue::text(&self.attachment_id),
            FieldValue::list(&self.mime_parts),
            FieldValue::list(&self.messages),
            FieldValue::list(&self.contacts),
            FieldValue::list(&self.docs),
        ]
    }

    fn missing_required(&self) -> Vec<&'static str> {
        self.mime_parts
            .iter()
            .flat_map(Record::missing_required)
            .chain(self.messages.iter().flat_map(Record::missing_required))
            .chain(self.contacts.iter().flat_map(Record::missing_required))
            .chain(self.docs.iter().flat_map(Record::missing_required))
            .collect()
    }
}

display_via_render!(
    MimePartAttachSpec,
    MsgAttachSpec,
    ContactAttachSpec,
    DocAttachSpec,
    AttachmentsInfo,
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TypeError;
    use crate::record::testing::assert_declared_keys;
    use serde_json::json;

    #[test]
    fn test_mime_part_serialization() {
        let mut spec = MimePartAttachSpec::new("257", "2");
        spec.optional = TriBool::True;
        let json = serde_json::to_value(&spec).unwrap();
        assert_eq!(json, json!({"mid": "257", "part": "2", "optional": "1"}));
        assert_declared_keys(&spec);

        let back: MimePartAttachSpec = serde_json::from_value(json).unwrap();
        assert_eq!(back, spec);
    }

    #[test]
    fn test_missing_required_fields() {
        let spec: MsgAttachSpec = serde_json::from_value(json!({"optional": false})).unwrap();
        assert_eq!(spec.optional, TriBool::False);
        assert_eq!(
            spec.validate().unwrap_err(),
            TypeError::MissingField {
                record: "MsgAttachSpec",
                field: "id"
            }
        );
    }

    #[test]
    fn test_doc_spec_has_no_required_fields() {
        let doc = DocAttachSpec::for_id("abc", Some(3));
        assert!(doc.validate().is_ok());
        assert_eq!(doc.to_string(), "DocAttachSpec{path=absent, id=abc, version=3, optional=absent}");
        assert_declared_keys(&doc);
    }

    #[test]
    fn test_attachments_info_groups_specs() {
        let mut info = AttachmentsInfo {
            attachment_id: Some("upload-1".to_string()),
            ..AttachmentsInfo::default()
        };
        info.push(AttachSpec::Msg(MsgAttachSpec::new("300")));
        info.push(AttachSpec::Contact(ContactAttachSpec::new("cn-9")));
        assert_eq!(info.len(), 2);

        let json = serde_json::to_value(&info).unwrap();
        assert_eq!(
            json,
            json!({"aid": "upload-1", "m": [{"id": "300"}], "cn": [{"id": "cn-9"}]})
        );
        assert_eq!(
            info.to_string(),
            "AttachmentsInfo{attachment_id=upload-1, mime_parts=[], messages=[MsgAttachSpec{id=300, optional=absent}], \
             contacts=[ContactAttachSpec{id=cn-9, optional=absent}], docs=[]}"
        );
    }

    #[test]
    fn test_attachments_info_validates_children() {
        let mut info = AttachmentsInfo::default();
        info.push(AttachSpec::MimePart(MimePartAttachSpec {
            message_id: Some("1".to_string()),
            ..MimePartAttachSpec::default()
        }));
        assert_eq!(info.missing_required(), vec!["part"]);
        assert!(info.validate().is_err());
    }

    #[test]
    fn test_attach_spec_dispatch() {
        let mut spec = MsgAttachSpec::new("1");
        spec.optional = TriBool::True;
        let any = AttachSpec::Msg(spec);
        assert_eq!(any.element(), "m");
        assert!(any.is_optional());
        assert!(!AttachSpec::Doc(DocAttachSpec::for_path("/a")).is_optional());
    }
}
