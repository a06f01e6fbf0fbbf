// mailsoap-types/src/record.rs
//! The contract shared by every record type: a declared field table, a
//! structural rendering for diagnostics, and required-field validation.

use crate::error::TypeError;
use crate::flag::TriBool;
use crate::token::TokenEnum;
use std::fmt;

/// One declared field of a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    /// Rust field name, used when rendering.
    pub name: &'static str,
    /// Attribute or element name on the wire.
    pub external: &'static str,
    pub required: bool,
}

impl FieldSpec {
    pub const fn required(name: &'static str, external: &'static str) -> Self {
        Self {
            name,
            external,
            required: true,
        }
    }

    pub const fn optional(name: &'static str, external: &'static str) -> Self {
        Self {
            name,
            external,
            required: false,
        }
    }
}

/// Current value of one field, borrowed from the record.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue<'a> {
    Absent,
    Text(&'a str),
    Int(i64),
    Bool(bool),
    Token(&'static str),
    /// Rendering of a nested record or list of records.
    Nested(String),
}

impl<'a> FieldValue<'a> {
    pub fn text(value: &'a Option<String>) -> Self {
        value.as_deref().map_or(Self::Absent, Self::Text)
    }

    pub fn int<I: Into<i64> + Copy>(value: Option<I>) -> Self {
        value.map_or(Self::Absent, |v| Self::Int(v.into()))
    }

    pub fn flag(value: TriBool) -> Self {
        value.to_logical().map_or(Self::Absent, Self::Bool)
    }

    pub fn token<T: TokenEnum>(value: Option<T>) -> Self {
        value.map_or(Self::Absent, |v| Self::Token(v.token()))
    }

    pub fn nested<R: Record>(value: &Option<R>) -> Self {
        value.as_ref().map_or(Self::Absent, |r| Self::Nested(r.render()))
    }

    pub fn list<R: Record>(values: &[R]) -> Self {
        let items: Vec<String> = values.iter().map(Record::render).collect();
        Self::Nested(format!("[{}]", items.join(", ")))
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }
}

impl fmt::Display for FieldValue<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Absent => f.write_str("absent"),
            Self::Text(s) => f.write_str(s),
            Self::Int(i) => write!(f, "{}", i),
            Self::Bool(b) => write!(f, "{}", b),
            Self::Token(t) => f.write_str(t),
            Self::Nested(s) => f.write_str(s),
        }
    }
}

pub trait Record {
    const RECORD_NAME: &'static str;
    /// Element name the record is carried under.
    const ELEMENT: &'static str;
    const FIELDS: &'static [FieldSpec];

    /// Field values, in `FIELDS` order.
    fn values(&self) -> Vec<FieldValue<'_>>;

    /// `Name{field=value, ...}` over every declared field.
    fn render(&self) -> String {
        let values = self.values();
        debug_assert_eq!(values.len(), Self::FIELDS.len());
        let parts: Vec<String> = Self::FIELDS
            .iter()
            .zip(values.iter())
            .map(|(spec, value)| format!("{}={}", spec.name, value))
            .collect();
        format!("{}{{{}}}", Self::RECORD_NAME, parts.join(", "))
    }

    fn missing_required(&self) -> Vec<&'static str> {
        Self::FIELDS
            .iter()
            .zip(self.values())
            .filter(|(spec, value)| spec.required && value.is_absent())
            .map(|(spec, _)| spec.external)
            .collect()
    }

    /// Fails on the first absent required field.
    fn validate(&self) -> Result<(), TypeError> {
        match self.missing_required().first().copied() {
            Some(field) => Err(TypeError::MissingField {
                record: Self::RECORD_NAME,
                field,
            }),
            None => Ok(()),
        }
    }

    fn field(name: &str) -> Option<&'static FieldSpec> {
        Self::FIELDS.iter().find(|f| f.name == name)
    }
}

/// Implements `Display` through [`Record::render`].
macro_rules! display_via_render {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl ::std::fmt::Display for $ty {
                fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                    f.write_str(&$crate::record::Record::render(self))
                }
            }
        )+
    };
}

pub(crate) use display_via_render;
