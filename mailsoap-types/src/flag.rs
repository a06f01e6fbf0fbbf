// mailsoap-types/src/flag.rs
//! Tri-state boolean attribute.
//!
//! Protocol attributes such as `optional` or `negative` distinguish "not sent"
//! from an explicit false, so a plain `bool` loses information and an
//! `Option<bool>` hides the omit-on-output rule. [`TriBool`] makes all three
//! states explicit.

use crate::error::TypeError;
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

pub const TRUE_TOKEN: &str = "1";
pub const FALSE_TOKEN: &str = "0";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum TriBool {
    #[default]
    Absent,
    True,
    False,
}

impl TriBool {
    pub fn from_logical(value: Option<bool>) -> Self {
        match value {
            Some(true) => Self::True,
            Some(false) => Self::False,
            None => Self::Absent,
        }
    }

    pub fn to_logical(self) -> Option<bool> {
        match self {
            Self::True => Some(true),
            Self::False => Some(false),
            Self::Absent => None,
        }
    }

    /// Token written to the wire, `None` when the attribute must be omitted.
    pub fn token(self) -> Option<&'static str> {
        match self {
            Self::True => Some(TRUE_TOKEN),
            Self::False => Some(FALSE_TOKEN),
            Self::Absent => None,
        }
    }

    /// Inverse of [`TriBool::token`]. Also accepts the `true`/`false` spellings
    /// some clients send.
    pub fn from_token(token: Option<&str>) -> Result<Self, TypeError> {
        match token {
            None => Ok(Self::Absent),
            Some("1") | Some("true") => Ok(Self::True),
            Some("0") | Some("false") => Ok(Self::False),
            Some(other) => Err(TypeError::InvalidFlag {
                token: other.to_string(),
            }),
        }
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }

    /// Logical value, falling back to `default` when absent.
    pub fn unwrap_or(self, default: bool) -> bool {
        self.to_logical().unwrap_or(default)
    }
}

impl From<bool> for TriBool {
    fn from(value: bool) -> Self {
        Self::from_logical(Some(value))
    }
}

impl From<Option<bool>> for TriBool {
    fn from(value: Option<bool>) -> Self {
        Self::from_logical(value)
    }
}

impl fmt::Display for TriBool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_logical() {
            Some(value) => write!(f, "{}", value),
            None => f.write_str("absent"),
        }
    }
}

impl Serialize for TriBool {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.token() {
            Some(token) => serializer.serialize_str(token),
            None => serializer.serialize_none(),
        }
    }
}

struct TriBoolVisitor;

impl<'de> Visitor<'de> for TriBoolVisitor {
    type Value = TriBool;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a boolean, 1/0, or \"true\"/\"false\"")
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<TriBool, E> {
        Ok(TriBool::from(v))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<TriBool, E> {
        match v {
            1 => Ok(TriBool::True),
            0 => Ok(TriBool::False),
            _ => Err(E::custom(TypeError::InvalidFlag {
                token: v.to_string(),
            })),
        }
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<TriBool, E> {
        match u64::try_from(v) {
            Ok(v) => self.visit_u64(v),
            Err(_) => Err(E::custom(TypeError::InvalidFlag {
                token: v.to_string(),
            })),
        }
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<TriBool, E> {
        TriBool::from_token(Some(v)).map_err(E::custom)
    }

    fn visit_none<E: de::Error>(self) -> Result<TriBool, E> {
        Ok(TriBool::Absent)
    }

    fn visit_unit<E: de::Error>(self) -> Result<TriBool, E> {
        Ok(TriBool::Absent)
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<TriBool, D::Error> {
        deserializer.deserialize_any(self)
    }
}

impl<'de> Deserialize<'de> for TriBool {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(TriBoolVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Serialize, Deserialize, PartialEq)]
    struct Holder {
        #[serde(default, skip_serializing_if = "TriBool::is_absent")]
        optional: TriBool,
    }

    #[test]
    fn test_logical_round_trip() {
        for value in [Some(true), Some(false), None] {
            assert_eq!(TriBool::from_logical(value).to_logical(), value);
        }
    }

    #[test]
    fn test_token_round_trip() {
        for flag in [TriBool::True, TriBool::False, TriBool::Absent] {
            assert_eq!(TriBool::from_token(flag.token()).unwrap(), flag);
        }
    }

    #[test]
    fn test_tokens() {
        assert_eq!(TriBool::True.token(), Some("1"));
        assert_eq!(TriBool::False.token(), Some("0"));
        assert_eq!(TriBool::Absent.token(), None);
        assert_eq!(TriBool::from_token(Some("true")).unwrap(), TriBool::True);
        assert_eq!(TriBool::from_token(Some("false")).unwrap(), TriBool::False);
    }

    #[test]
    fn test_unknown_token() {
        let err = TriBool::from_token(Some("yes")).unwrap_err();
        assert_eq!(
            err,
            TypeError::InvalidFlag {
                token: "yes".to_string()
            }
        );
    }

    #[test]
    fn test_absent_is_omitted() {
        let json = serde_json::to_value(Holder {
            optional: TriBool::Absent,
        })
        .unwrap();
        assert_eq!(json, json!({}));

        let json = serde_json::to_value(Holder {
            optional: TriBool::False,
        })
        .unwrap();
        assert_eq!(json, json!({"optional": "0"}));
    }

    #[test]
    fn test_deserialize_spellings() {
        let cases = [
            (json!({}), TriBool::Absent),
            (json!({"optional": null}), TriBool::Absent),
            (json!({"optional": true}), TriBool::True),
            (json!({"optional": "1"}), TriBool::True),
            (json!({"optional": 0}), TriBool::False),
            (json!({"optional": "false"}), TriBool::False),
        ];
        for (input, expected) in cases {
            let holder: Holder = serde_json::from_value(input).unwrap();
            assert_eq!(holder.optional, expected);
        }
        assert!(serde_json::from_value::<Holder>(json!({"optional": "maybe"})).is_err());
    }

    #[test]
    fn test_unwrap_or() {
        assert!(!TriBool::Absent.unwrap_or(false));
        assert!(TriBool::Absent.unwrap_or(true));
        assert!(!TriBool::False.unwrap_or(true));
    }
}
