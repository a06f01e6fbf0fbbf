// mailsoap-codec/src/registry.rs
//! Records addressable by name at run time.

use crate::codec::Codec;
use anyhow::Result;
use mailsoap_types::types::*;
use mailsoap_types::{
    CalDataSourceNameOrId, CaldavDataSourceNameOrId, GalDataSourceNameOrId,
    ImapDataSourceNameOrId, NameOrId, Pop3DataSourceNameOrId, Record, RssDataSourceNameOrId,
    UnknownDataSourceNameOrId, YabDataSourceNameOrId,
};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

/// Decoded view of a record: its rendering, canonical attributes, and the
/// required fields it lacks.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Inspection {
    pub record: &'static str,
    pub element: &'static str,
    pub rendered: String,
    pub attrs: Value,
    pub missing: Vec<&'static str>,
}

impl Inspection {
    pub fn is_valid(&self) -> bool {
        self.missing.is_empty()
    }
}

pub struct RecordKind {
    pub record: &'static str,
    pub element: &'static str,
    pub fields: &'static [mailsoap_types::FieldSpec],
    inspect: fn(&Codec, &Value) -> Result<Inspection>,
}

impl RecordKind {
    const fn of<R: Record + Serialize + DeserializeOwned>() -> Self {
        Self {
            record: R::RECORD_NAME,
            element: R::ELEMENT,
            fields: R::FIELDS,
            inspect: inspect_as::<R>,
        }
    }

    /// Decodes `attrs` with `codec`, so strict codecs reject missing fields.
    pub fn inspect(&self, codec: &Codec, attrs: &Value) -> Result<Inspection> {
        (self.inspect)(codec, attrs)
    }
}

impl std::fmt::Debug for RecordKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecordKind")
            .field("record", &self.record)
            .field("element", &self.element)
            .finish()
    }
}

fn inspect_as<R: Record + Serialize + DeserializeOwned>(
    codec: &Codec,
    attrs: &Value,
) -> Result<Inspection> {
    let record: R = codec.decode(attrs)?;
    let canonical = serde_json::to_value(&record)?;
    Ok(Inspection {
        record: R::RECORD_NAME,
        element: R::ELEMENT,
        rendered: record.render(),
        attrs: canonical,
        missing: record.missing_required(),
    })
}

static KINDS: [RecordKind; 26] = [
    RecordKind::of::<NameOrId>(),
    RecordKind::of::<Pop3DataSourceNameOrId>(),
    RecordKind::of::<ImapDataSourceNameOrId>(),
    RecordKind::of::<CaldavDataSourceNameOrId>(),
    RecordKind::of::<YabDataSourceNameOrId>(),
    RecordKind::of::<RssDataSourceNameOrId>(),
    RecordKind::of::<GalDataSourceNameOrId>(),
    RecordKind::of::<CalDataSourceNameOrId>(),
    RecordKind::of::<UnknownDataSourceNameOrId>(),
    RecordKind::of::<ActionSelector>(),
    RecordKind::of::<FolderActionSelector>(),
    RecordKind::of::<MimePartAttachSpec>(),
    RecordKind::of::<MsgAttachSpec>(),
    RecordKind::of::<ContactAttachSpec>(),
    RecordKind::of::<DocAttachSpec>(),
    RecordKind::of::<AttachmentsInfo>(),
    RecordKind::of::<ImportanceTest>(),
    RecordKind::of::<AddressTest>(),
    RecordKind::of::<CalendarReply>(),
    RecordKind::of::<AlarmInfo>(),
    RecordKind::of::<ImapMessageInfo>(),
    RecordKind::of::<CreateItemNotification>(),
    RecordKind::of::<ModifyItemNotification>(),
    RecordKind::of::<DeleteItemNotification>(),
    RecordKind::of::<RenameFolderNotification>(),
    RecordKind::of::<PendingFolderModifications>(),
];

pub fn record_kinds() -> &'static [RecordKind] {
    &KINDS
}

/// Looks a kind up by record name, falling back to the first kind carried
/// under that element name.
pub fn record_kind(name: &str) -> Option<&'static RecordKind> {
    KINDS
        .iter()
        .find(|k| k.record == name)
        .or_else(|| KINDS.iter().find(|k| k.element == name))
}
