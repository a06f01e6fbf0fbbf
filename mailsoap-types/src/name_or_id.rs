// mailsoap-types/src/name_or_id.rs
use crate::record::{display_via_render, FieldSpec, FieldValue, Record};
use serde::{Deserialize, Serialize};

/// Reference to an entity either by id or by name.
///
/// The constructors set exactly one of the two; the fields stay public so a
/// caller can set both, in which case choosing the discriminant is up to them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NameOrId {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl NameOrId {
    pub fn for_id(id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            name: None,
        }
    }

    pub fn for_name(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: Some(name.into()),
        }
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }
}

impl Record for NameOrId {
    const RECORD_NAME: &'static str = "NameOrId";
    const ELEMENT: &'static str = "mbx";
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::optional("id", "id"),
        FieldSpec::optional("name", "name"),
    ];

    fn values(&self) -> Vec<FieldValue<'_>> {
        vec![FieldValue::text(&self.id), FieldValue::text(&self.name)]
    }
}

display_via_render!(NameOrId);
