// mailsoap-types/src/action.rs
use crate::flag::TriBool;
use crate::record::{display_via_render, FieldSpec, FieldValue, Record};
use crate::vocab::ItemActionOp;
use serde::{Deserialize, Serialize};

/// Selects a set of items and the operation to apply to them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionSelector {
    /// Comma separated item ids.
    #[serde(rename = "id", default, skip_serializing_if = "Option::is_none")]
    pub ids: Option<String>,
    #[serde(rename = "op", default, skip_serializing_if = "Option::is_none")]
    pub operation: Option<ItemActionOp>,
    /// Target constraint, e.g. `-tj` to skip trash and junk.
    #[serde(rename = "tcon", default, skip_serializing_if = "Option::is_none")]
    pub constraint: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<i32>,
    #[serde(rename = "l", default, skip_serializing_if = "Option::is_none")]
    pub folder: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rgb: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "f", default, skip_serializing_if = "Option::is_none")]
    pub flags: Option<String>,
    #[serde(rename = "t", default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<String>,
    #[serde(rename = "tn", default, skip_serializing_if = "Option::is_none")]
    pub tag_names: Option<String>,
    /// Report ids that do not exist.
    #[serde(rename = "nei", default, skip_serializing_if = "TriBool::is_absent")]
    pub non_existent_ids: TriBool,
    /// Report ids of items created by the action.
    #[serde(rename = "nci", default, skip_serializing_if = "TriBool::is_absent")]
    pub newly_created_ids: TriBool,
}

impl ActionSelector {
    pub fn new(ids: impl Into<String>, operation: ItemActionOp) -> Self {
        Self {
            ids: Some(ids.into()),
            operation: Some(operation),
            ..Self::default()
        }
    }

    pub fn for_ids<S: AsRef<str>>(ids: &[S], operation: ItemActionOp) -> Self {
        let joined: Vec<&str> = ids.iter().map(AsRef::as_ref).collect();
        Self::new(joined.join(","), operation)
    }

    pub fn id_list(&self) -> Vec<&str> {
        self.ids
            .as_deref()
            .map(|ids| ids.split(',').map(str::trim).filter(|s| !s.is_empty()).collect())
            .unwrap_or_default()
    }
}

impl Record for ActionSelector {
    const RECORD_NAME: &'static str = "ActionSelector";
    const ELEMENT: &'static str = "action";
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::required("ids", "id"),
        FieldSpec::required("operation", "op"),
        FieldSpec::optional("constraint", "tcon"),
        FieldSpec::optional("tag", "tag"),
        FieldSpec::optional("folder", "l"),
        FieldSpec::optional("rgb", "rgb"),
        FieldSpec::optional("color", "color"),
        FieldSpec::optional("name", "name"),
        FieldSpec::optional("flags", "f"),
        FieldSpec::optional("tags", "t"),
        FieldSpec::optional("tag_names", "tn"),
        FieldSpec::optional("non_existent_ids", "nei"),
        FieldSpec::optional("newly_created_ids", "nci"),
    ];

    fn values(&self) -> Vec<FieldValue<'_>> {
        vec![
            FieldValue::text(&self.ids),
            FieldValue::token(self.operation),
            FieldValue::text(&self.constraint),
            FieldValue::int(self.tag),
            FieldValue::text(&self.folder),
            FieldValue::text(&self.rgb),
            FieldValue::int(self.color),
            FieldValue::text(&self.name),
            FieldValue::text(&self.flags),
            FieldValue::text(&self.tags),
            FieldValue::text(&self.tag_names),
            FieldValue::flag(self.non_existent_ids),
            FieldValue::flag(self.newly_created_ids),
        ]
    }
}

/// Folder action: an [`ActionSelector`] plus folder-only attributes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FolderActionSelector {
    #[serde(flatten)]
    pub action: ActionSelector,
    #[serde(default, skip_serializing_if = "TriBool::is_absent")]
    pub recursive: TriBool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(rename = "excludeFreeBusy", default, skip_serializing_if = "TriBool::is_absent")]
    pub exclude_free_busy: TriBool,
}

impl FolderActionSelector {
    pub fn new(ids: impl Into<String>, operation: ItemActionOp) -> Self {
        Self {
            action: ActionSelector::new(ids, operation),
            ..Self::default()
        }
    }
}

impl Record for FolderActionSelector {
    const RECORD_NAME: &'static str = "FolderActionSelector";
    const ELEMENT: &'static str = "action";
    /// The base selector's fields, which share the element, then the folder-only ones.
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::required("ids", "id"),
        FieldSpec::required("operation", "op"),
        FieldSpec::optional("constraint", "tcon"),
        FieldSpec::optional("tag", "tag"),
        FieldSpec::optional("folder", "l"),
        FieldSpec::optional("rgb", "rgb"),
        FieldSpec::optional("color", "color"),
        FieldSpec::optional("name", "name"),
        FieldSpec::optional("flags", "f"),
        FieldSpec::optional("tags", "t"),
        FieldSpec::optional("tag_names", "tn"),
        FieldSpec::optional("non_existent_ids", "nei"),
        FieldSpec::optional("newly_created_ids", "nci"),
        FieldSpec::optional("recursive", "recursive"),
        FieldSpec::optional("url", "url"),
        FieldSpec::optional("exclude_free_busy", "excludeFreeBusy"),
    ];

    fn values(&self) -> Vec<FieldValue<'_>> {
        let mut values = self.action.values();
        values.extend([
            FieldValue::flag(self.recursive),
            FieldValue::text(&self.url),
            FieldValue::flag(self.exclude_free_busy),
        ]);
        values
    }
}

display_via_render!(ActionSelector, FolderActionSelector);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::testing::assert_declared_keys;
    use serde_json::json;

    #[test]
    fn test_selector_serializes_tokens() {
        let mut action = ActionSelector::for_ids(&["257", "258"], ItemActionOp::Unread);
        action.non_existent_ids = TriBool::True;
        let json = serde_json::to_value(&action).unwrap();
        assert_eq!(json, json!({"id": "257,258", "op": "!read", "nei": "1"}));
        assert_declared_keys(&action);
        assert_eq!(action.id_list(), vec!["257", "258"]);
    }

    #[test]
    fn test_unknown_op_fails_loud() {
        let err = serde_json::from_value::<ActionSelector>(json!({"id": "1", "op": "explode"})).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("\"explode\""), "{}", msg);
        assert!(msg.contains("!spam"), "{}", msg);
    }

    #[test]
    fn test_missing_op_is_invalid() {
        let action: ActionSelector = serde_json::from_value(json!({"id": "1"})).unwrap();
        assert_eq!(action.missing_required(), vec!["op"]);
    }

    #[test]
    fn test_render_after_mutation() {
        let mut action = ActionSelector::new("5", ItemActionOp::Move);
        let before = action.render();
        action.folder = Some("2".to_string());
        let after = action.render();
        assert_ne!(before, after);
        assert_eq!(before.replace("folder=absent", "folder=2"), after);
    }

    #[test]
    fn test_folder_action_flattens_base() {
        let mut action = FolderActionSelector::new("10", ItemActionOp::Color);
        action.action.color = Some(4);
        action.recursive = TriBool::False;
        let json = serde_json::to_value(&action).unwrap();
        assert_eq!(json, json!({"id": "10", "op": "color", "color": 4, "recursive": "0"}));

        let back: FolderActionSelector = serde_json::from_value(json).unwrap();
        assert_eq!(back, action);
        assert!(back.validate().is_ok());
        assert!(back.to_string().starts_with("FolderActionSelector{ids=10, operation=color"));
        assert!(back.to_string().ends_with("recursive=false, url=absent, exclude_free_busy=absent}"));
        assert_declared_keys(&back);
    }

    #[test]
    fn test_folder_action_declares_base_fields() {
        let base = ActionSelector::FIELDS;
        assert_eq!(&FolderActionSelector::FIELDS[..base.len()], base);

        let mut action = FolderActionSelector::new("10", ItemActionOp::Move);
        action.url = Some("https://example.com/feed".to_string());
        action.exclude_free_busy = TriBool::True;
        assert_declared_keys(&action);
        assert_eq!(action.values().len(), FolderActionSelector::FIELDS.len());

        let partial: FolderActionSelector =
            serde_json::from_value(json!({"recursive": "1"})).unwrap();
        assert_eq!(partial.missing_required(), vec!["id", "op"]);
    }
}
