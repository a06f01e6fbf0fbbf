// mailsoap-types/src/message.rs
use crate::record::{display_via_render, FieldSpec, FieldValue, Record};
use crate::token::deserialize_quiet;
use crate::vocab::ItemType;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Summary of a message as tracked by an IMAP session.
///
/// Equality and ordering look at `id` only: two infos for the same item are
/// the same entry even if their flags differ.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ImapMessageInfo {
    pub id: i32,
    #[serde(rename = "i", default)]
    pub imap_uid: i32,
    #[serde(
        rename = "t",
        default,
        deserialize_with = "deserialize_quiet",
        skip_serializing_if = "Option::is_none"
    )]
    pub item_type: Option<ItemType>,
    /// Flag bitmask.
    #[serde(rename = "f", default)]
    pub flags: i32,
    /// Comma separated tag names.
    #[serde(rename = "tn", default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<String>,
}

impl ImapMessageInfo {
    pub fn new(id: i32, imap_uid: i32, item_type: ItemType, flags: i32) -> Self {
        Self {
            id,
            imap_uid,
            item_type: Some(item_type),
            flags,
            tags: None,
        }
    }
}

impl PartialEq for ImapMessageInfo {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for ImapMessageInfo {}

impl PartialOrd for ImapMessageInfo {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ImapMessageInfo {
    fn cmp(&self, other: &Self) -> Ordering {
        self.id.cmp(&other.id)
    }
}

impl Record for ImapMessageInfo {
    const RECORD_NAME: &'static str = "ImapMessageInfo";
    const ELEMENT: &'static str = "imapMsg";
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::required("id", "id"),
        FieldSpec::optional("imap_uid", "i"),
        FieldSpec::optional("item_type", "t"),
        FieldSpec::optional("flags", "f"),
        FieldSpec::optional("tags", "tn"),
    ];

    fn values(&self) -> Vec<FieldValue<'_>> {
        vec![
            FieldValue::Int(self.id.into()),
            FieldValue::Int(self.imap_uid.into()),
            FieldValue::token(self.item_type),
            FieldValue::Int(self.flags.into()),
            FieldValue::text(&self.tags),
        ]
    }
}

display_via_render!(ImapMessageInfo);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::testing::assert_declared_keys;
    use serde_json::json;

    #[test]
    fn test_orders_by_id() {
        let five = ImapMessageInfo::new(5, 900, ItemType::Message, 0);
        let seven = ImapMessageInfo::new(7, 100, ItemType::Message, 0);
        assert_eq!(five.cmp(&seven), Ordering::Less);
        assert_eq!(seven.cmp(&five), Ordering::Greater);
        assert_eq!(five.cmp(&five), Ordering::Equal);
    }

    #[test]
    fn test_ties_are_equal() {
        let a = ImapMessageInfo::new(5, 1, ItemType::Message, 0);
        let b = ImapMessageInfo::new(5, 2, ItemType::Contact, 16);
        assert_eq!(a.cmp(&b), Ordering::Equal);
        assert_eq!(a, b);
    }

    #[test]
    fn test_sort() {
        let mut infos = vec![
            ImapMessageInfo::new(9, 3, ItemType::Message, 0),
            ImapMessageInfo::new(2, 1, ItemType::Message, 0),
            ImapMessageInfo::new(5, 2, ItemType::Message, 0),
        ];
        infos.sort();
        let ids: Vec<i32> = infos.iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![2, 5, 9]);
    }

    #[test]
    fn test_json() {
        let mut info = ImapMessageInfo::new(257, 4, ItemType::Message, 1);
        info.tags = Some("work".to_string());
        let json = serde_json::to_value(&info).unwrap();
        assert_eq!(json, json!({"id": 257, "i": 4, "t": "message", "f": 1, "tn": "work"}));
        assert_declared_keys(&info);

        let odd: ImapMessageInfo = serde_json::from_value(json!({"id": 3, "t": "hologram"})).unwrap();
        assert_eq!(odd.item_type, None);
        assert_eq!(odd.to_string(), "ImapMessageInfo{id=3, imap_uid=0, item_type=absent, flags=0, tags=absent}");
    }
}
