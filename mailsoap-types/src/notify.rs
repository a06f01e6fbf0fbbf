// mailsoap-types/src/notify.rs
//! Change notifications pushed to IMAP sessions, grouped per folder.

use crate::message::ImapMessageInfo;
use crate::record::{display_via_render, FieldSpec, FieldValue, Record};
use crate::token::deserialize_quiet;
use crate::vocab::ItemType;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateItemNotification {
    #[serde(rename = "m", default, skip_serializing_if = "Option::is_none")]
    pub message: Option<ImapMessageInfo>,
}

impl CreateItemNotification {
    pub fn new(message: ImapMessageInfo) -> Self {
        Self {
            message: Some(message),
        }
    }
}

impl Record for CreateItemNotification {
    const RECORD_NAME: &'static str = "CreateItemNotification";
    const ELEMENT: &'static str = "created";
    const FIELDS: &'static [FieldSpec] = &[FieldSpec::required("message", "m")];

    fn values(&self) -> Vec<FieldValue<'_>> {
        vec![FieldValue::nested(&self.message)]
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModifyItemNotification {
    #[serde(rename = "m", default, skip_serializing_if = "Option::is_none")]
    pub message: Option<ImapMessageInfo>,
    /// Bitmask of the properties that changed.
    #[serde(rename = "change", default)]
    pub change_bitmask: i32,
}

impl ModifyItemNotification {
    pub fn new(message: ImapMessageInfo, change_bitmask: i32) -> Self {
        Self {
            message: Some(message),
            change_bitmask,
        }
    }
}

impl Record for ModifyItemNotification {
    const RECORD_NAME: &'static str = "ModifyItemNotification";
    const ELEMENT: &'static str = "modMsgs";
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::required("message", "m"),
        FieldSpec::optional("change_bitmask", "change"),
    ];

    fn values(&self) -> Vec<FieldValue<'_>> {
        vec![
            FieldValue::nested(&self.message),
            FieldValue::Int(self.change_bitmask.into()),
        ]
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteItemNotification {
    pub id: i32,
    #[serde(
        rename = "t",
        default,
        deserialize_with = "deserialize_quiet",
        skip_serializing_if = "Option::is_none"
    )]
    pub item_type: Option<ItemType>,
}

impl DeleteItemNotification {
    pub fn new(id: i32, item_type: ItemType) -> Self {
        Self {
            id,
            item_type: Some(item_type),
        }
    }
}

impl Record for DeleteItemNotification {
    const RECORD_NAME: &'static str = "DeleteItemNotification";
    const ELEMENT: &'static str = "deleted";
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::required("id", "id"),
        FieldSpec::optional("item_type", "t"),
    ];

    fn values(&self) -> Vec<FieldValue<'_>> {
        vec![FieldValue::Int(self.id.into()), FieldValue::token(self.item_type)]
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenameFolderNotification {
    #[serde(rename = "id")]
    pub folder_id: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(rename = "change", default)]
    pub change_bitmask: i32,
}

impl RenameFolderNotification {
    pub fn new(folder_id: i32, path: impl Into<String>, change_bitmask: i32) -> Self {
        Self {
            folder_id,
            path: Some(path.into()),
            change_bitmask,
        }
    }
}

impl Record for RenameFolderNotification {
    const RECORD_NAME: &'static str = "RenameFolderNotification";
    const ELEMENT: &'static str = "modFolders";
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::required("folder_id", "id"),
        FieldSpec::required("path", "path"),
        FieldSpec::optional("change_bitmask", "change"),
    ];

    fn values(&self) -> Vec<FieldValue<'_>> {
        vec![
            FieldValue::Int(self.folder_id.into()),
            FieldValue::text(&self.path),
            FieldValue::Int(self.change_bitmask.into()),
        ]
    }
}

/// Everything that changed in one folder since the last notification.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingFolderModifications {
    #[serde(rename = "id")]
    pub folder_id: i32,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub created: Vec<CreateItemNotification>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub deleted: Vec<DeleteItemNotification>,
    #[serde(rename = "modMsgs", default, skip_serializing_if = "Vec::is_empty")]
    pub modified_msgs: Vec<ModifyItemNotification>,
    #[serde(rename = "modFolders", default, skip_serializing_if = "Vec::is_empty")]
    pub modified_folders: Vec<RenameFolderNotification>,
}

impl PendingFolderModifications {
    pub fn new(folder_id: i32) -> Self {
        Self {
            folder_id,
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.created.is_empty()
            && self.deleted.is_empty()
            && self.modified_msgs.is_empty()
            && self.modified_folders.is_empty()
    }

    /// Created and modified messages, ordered by id.
    pub fn touched_messages(&self) -> Vec<&ImapMessageInfo> {
        let mut messages: Vec<&ImapMessageInfo> = self
            .created
            .iter()
            .filter_map(|c| c.message.as_ref())
            .chain(self.modified_msgs.iter().filter_map(|m| m.message.as_ref()))
            .collect();
        messages.sort();
        messages
    }
}

impl Record for PendingFolderModifications {
    const RECORD_NAME: &'static str = "PendingFolderModifications";
    const ELEMENT: &'static str = "mods";
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::required("folder_id", "id"),
        FieldSpec::optional("created", "created"),
        FieldSpec::optional("deleted", "deleted"),
        FieldSpec::optional("modified_msgs", "modMsgs"),
        FieldSpec::optional("modified_folders", "modFolders"),
    ];

    fn values(&self) -> Vec<FieldValue<'_>> {
        vec![
            FieldValue::Int(self.folder_id.into()),
            FieldValue::list(&self.created),
            FieldValue::list(&self.deleted),
            FieldValue::list(&self.modified_msgs),
            FieldValue::list(&self.modified_folders),
        ]
    }

    fn missing_required(&self) -> Vec<&'static str> {
        self.created
            .iter()
            .flat_map(Record::missing_required)
            .chain(self.deleted.iter().flat_map(Record::missing_required))
            .chain(self.modified_msgs.iter().flat_map(Record::missing_required))
            .chain(self.modified_folders.iter().flat_map(Record::missing_required))
            .collect()
    }
}

display_via_render!(
    CreateItemNotification,
    ModifyItemNotification,
    DeleteItemNotification,
    RenameFolderNotification,
    PendingFolderModifications,
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::testing::assert_declared_keys;
    use serde_json::json;

    fn sample() -> PendingFolderModifications {
        let mut mods = PendingFolderModifications::new(2);
        mods.created
            .push(CreateItemNotification::new(ImapMessageInfo::new(301, 12, ItemType::Message, 0)));
        mods.modified_msgs.push(ModifyItemNotification::new(
            ImapMessageInfo::new(257, 4, ItemType::Message, 1),
            0x4,
        ));
        mods.deleted.push(DeleteItemNotification::new(250, ItemType::Message));
        mods
    }

    #[test]
    fn test_json_shape() {
        let mods = sample();
        let json = serde_json::to_value(&mods).unwrap();
        assert_eq!(
            json,
            json!({
                "id": 2,
                "created": [{"m": {"id": 301, "i": 12, "t": "message", "f": 0}}],
                "deleted": [{"id": 250, "t": "message"}],
                "modMsgs": [{"m": {"id": 257, "i": 4, "t": "message", "f": 1}, "change": 4}]
            })
        );
        assert_declared_keys(&mods);
        assert_eq!(serde_json::from_value::<PendingFolderModifications>(json).unwrap(), mods);
    }

    #[test]
    fn test_touched_messages_sorted() {
        let ids: Vec<i32> = sample().touched_messages().iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![257, 301]);
    }

    #[test]
    fn test_best_effort_item_type() {
        let deleted: DeleteItemNotification =
            serde_json::from_value(json!({"id": 9, "t": "virtual"})).unwrap();
        assert_eq!(deleted.item_type, None);
        assert_eq!(deleted.to_string(), "DeleteItemNotification{id=9, item_type=absent}");
    }

    #[test]
    fn test_children_validation() {
        let mut mods = PendingFolderModifications::new(1);
        assert!(mods.is_empty());
        mods.created.push(CreateItemNotification::default());
        mods.modified_folders.push(RenameFolderNotification {
            folder_id: 5,
            ..RenameFolderNotification::default()
        });
        assert_eq!(mods.missing_required(), vec!["m", "path"]);
    }
}
