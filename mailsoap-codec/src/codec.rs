// mailsoap-codec/src/codec.rs
use crate::config::Config;
use anyhow::{anyhow, bail, Context, Result};
use mailsoap_types::{
    AnyDataSource, AttachSpec, ContactAttachSpec, DataSourceType, DocAttachSpec,
    MimePartAttachSpec, MsgAttachSpec, NameOrId, Record,
};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

/// Encodes records to JSON attribute maps and back.
///
/// An element is a single-key object `{ "<element name>": { attributes } }`.
/// In strict mode records with absent required fields are rejected in both
/// directions.
#[derive(Debug, Clone, Default)]
pub struct Codec {
    config: Config,
}

impl Codec {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    pub fn strict() -> Self {
        let mut config = Config::default();
        config.validation.strict = true;
        Self::new(config)
    }

    pub fn lenient() -> Self {
        let mut config = Config::default();
        config.validation.strict = false;
        Self::new(config)
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn is_strict(&self) -> bool {
        self.config.validation.strict
    }

    fn check<R: Record>(&self, record: &R) -> Result<()> {
        if self.is_strict() {
            record.validate()?;
        }
        Ok(())
    }

    /// Record → attribute map.
    pub fn encode<R: Record + Serialize>(&self, record: &R) -> Result<Value> {
        self.check(record)?;
        let value = serde_json::to_value(record)
            .with_context(|| format!("Cannot encode {}", R::RECORD_NAME))?;
        debug!(record = R::RECORD_NAME, "encoded record");
        Ok(value)
    }

    /// Record → `{ element: attributes }`.
    pub fn encode_element<R: Record + Serialize>(&self, record: &R) -> Result<Value> {
        let attrs = self.encode(record)?;
        Ok(wrap(R::ELEMENT, attrs))
    }

    /// Attribute map → record.
    pub fn decode<R: Record + DeserializeOwned>(&self, attrs: &Value) -> Result<R> {
        if !attrs.is_object() {
            bail!("{} attributes must be a JSON object", R::RECORD_NAME);
        }
        let record = R::deserialize(attrs)
            .with_context(|| format!("Invalid {} attributes", R::RECORD_NAME))?;
        self.check(&record)?;
        debug!(record = R::RECORD_NAME, "decoded record");
        Ok(record)
    }

    /// `{ element: attributes }` → record, requiring the record's own element name.
    pub fn decode_element<R: Record + DeserializeOwned>(&self, value: &Value) -> Result<R> {
        let (name, attrs) = single_element(value)?;
        if name != R::ELEMENT {
            bail!("Expected <{}> element, found <{}>", R::ELEMENT, name);
        }
        self.decode(attrs)
    }

    /// Decodes a data-source reference, choosing its type from the element name.
    pub fn decode_data_source(&self, value: &Value) -> Result<AnyDataSource> {
        let (name, attrs) = single_element(value)?;
        let kind = DataSourceType::from_token(name)
            .ok_or_else(|| anyhow!("Unknown data source element <{}>", name))?;
        let inner: NameOrId = self.decode(attrs)?;
        debug!(kind = %kind, "decoded data source reference");
        Ok(AnyDataSource::from_parts(kind, inner))
    }

    pub fn encode_data_source(&self, source: &AnyDataSource) -> Result<Value> {
        let attrs = self.encode(source.name_or_id())?;
        Ok(wrap(source.element(), attrs))
    }

    /// Decodes one attachment spec, choosing its type from the element name.
    pub fn decode_attachment(&self, value: &Value) -> Result<AttachSpec> {
        let (name, attrs) = single_element(value)?;
        let spec = match name {
            MimePartAttachSpec::ELEMENT => AttachSpec::MimePart(self.decode(attrs)?),
            MsgAttachSpec::ELEMENT => AttachSpec::Msg(self.decode(attrs)?),
            ContactAttachSpec::ELEMENT => AttachSpec::Contact(self.decode(attrs)?),
            DocAttachSpec::ELEMENT => AttachSpec::Doc(self.decode(attrs)?),
            other => bail!("Unknown attachment element <{}>", other),
        };
        Ok(spec)
    }

    pub fn encode_attachment(&self, spec: &AttachSpec) -> Result<Value> {
        let attrs = match spec {
            AttachSpec::MimePart(s) => self.encode(s)?,
            AttachSpec::Msg(s) => self.encode(s)?,
            AttachSpec::Contact(s) => self.encode(s)?,
            AttachSpec::Doc(s) => self.encode(s)?,
        };
        Ok(wrap(spec.element(), attrs))
    }

    /// Serializes a value as text, honoring `output.pretty`.
    pub fn to_string(&self, value: &Value) -> Result<String> {
        let text = if self.config.output.pretty {
            serde_json::to_string_pretty(value)?
        } else {
            serde_json::to_string(value)?
        };
        Ok(text)
    }
}

fn wrap(element: &str, attrs: Value) -> Value {
    let mut map = Map::with_capacity(1);
    map.insert(element.to_string(), attrs);
    Value::Object(map)
}

/// Splits `{ name: attrs }` into its only entry.
pub fn single_element(value: &Value) -> Result<(&str, &Value)> {
    let object = value
        .as_object()
        .ok_or_else(|| anyhow!("Element must be a JSON object"))?;
    let mut entries = object.iter();
    match (entries.next(), entries.next()) {
        (Some((name, attrs)), None) => Ok((name.as_str(), attrs)),
        (None, _) => bail!("Empty element"),
        (Some(_), Some(_)) => bail!(
            "Element must have exactly one key, found {}",
            object.keys().map(String::as_str).collect::<Vec<_>>().join(", ")
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mailsoap_types::{
        ActionSelector, CalDataSourceNameOrId, ItemActionOp, Pop3DataSourceNameOrId, TriBool,
        TypeError,
    };
    use serde_json::json;

    #[test]
    fn test_encode_element_uses_type_element() {
        let codec = Codec::strict();
        let value = codec
            .encode_element(&CalDataSourceNameOrId::for_id("5"))
            .unwrap();
        assert_eq!(value, json!({"cal": {"id": "5"}}));

        let value = codec
            .encode_element(&Pop3DataSourceNameOrId::for_name("pop3DSForTest"))
            .unwrap();
        assert_eq!(value, json!({"pop3": {"name": "pop3DSForTest"}}));
    }

    #[test]
    fn test_strict_encode_rejects_missing_required() {
        let action = ActionSelector {
            ids: Some("1".to_string()),
            ..ActionSelector::default()
        };
        let err = Codec::strict().encode(&action).unwrap_err();
        assert_eq!(
            err.downcast_ref::<TypeError>(),
            Some(&TypeError::MissingField {
                record: "ActionSelector",
                field: "op"
            })
        );
        assert_eq!(Codec::lenient().encode(&action).unwrap(), json!({"id": "1"}));
    }

    #[test]
    fn test_decode_element_checks_name() {
        let codec = Codec::strict();
        let action: ActionSelector = codec
            .decode_element(&json!({"action": {"id": "7", "op": "trash"}}))
            .unwrap();
        assert_eq!(action.operation, Some(ItemActionOp::Trash));

        let err = codec
            .decode_element::<ActionSelector>(&json!({"m": {"id": "7"}}))
            .unwrap_err();
        assert_eq!(err.to_string(), "Expected <action> element, found <m>");
    }

    #[test]
    fn test_decode_fail_loud_token_is_data_error() {
        let err = Codec::lenient()
            .decode::<ActionSelector>(&json!({"id": "7", "op": "shred"}))
            .unwrap_err();
        let source = err.downcast_ref::<serde_json::Error>().unwrap();
        assert!(source.is_data());
        assert!(source.to_string().contains("valid values: [delete, read, !read"));
    }

    #[test]
    fn test_decode_data_source_dispatch() {
        let codec = Codec::strict();
        let cases = [
            (json!({"cal": {"id": "61e1c69c"}}), DataSourceType::Cal),
            (json!({"pop3": {"name": "pop3DSForTest"}}), DataSourceType::Pop3),
            (json!({"caldav": {"id": "31e1c69c"}}), DataSourceType::Caldav),
            (json!({"rss": {"id": "21e1c69c"}}), DataSourceType::Rss),
            (json!({"unknown": {"id": "11e1c69c"}}), DataSourceType::Unknown),
        ];
        for (input, kind) in cases {
            let source = codec.decode_data_source(&input).unwrap();
            assert_eq!(source.kind(), kind);
            assert_eq!(codec.encode_data_source(&source).unwrap(), input);
        }

        let err = codec
            .decode_data_source(&json!({"exchange": {"id": "1"}}))
            .unwrap_err();
        assert_eq!(err.to_string(), "Unknown data source element <exchange>");
    }

    #[test]
    fn test_decode_attachment_dispatch() {
        let codec = Codec::strict();
        let spec = codec
            .decode_attachment(&json!({"mp": {"mid": "257", "part": "2", "optional": true}}))
            .unwrap();
        match &spec {
            AttachSpec::MimePart(mp) => {
                assert_eq!(mp.message_id.as_deref(), Some("257"));
                assert_eq!(mp.optional, TriBool::True);
            }
            other => panic!("Expected MimePart, got {:?}", other),
        }
        assert_eq!(
            codec.encode_attachment(&spec).unwrap(),
            json!({"mp": {"mid": "257", "part": "2", "optional": "1"}})
        );

        let err = codec.decode_attachment(&json!({"mp": {"mid": "257"}})).unwrap_err();
        assert!(err.downcast_ref::<TypeError>().is_some());
        assert!(codec.decode_attachment(&json!({"zip": {}})).is_err());
    }

    #[test]
    fn test_single_element_shape() {
        assert!(single_element(&json!([])).is_err());
        assert!(single_element(&json!({})).is_err());
        let err = single_element(&json!({"a": {}, "b": {}})).unwrap_err();
        assert_eq!(err.to_string(), "Element must have exactly one key, found a, b");
    }

    #[test]
    fn test_to_string_pretty() {
        let mut config = Config::default();
        config.output.pretty = true;
        let text = Codec::new(config).to_string(&json!({"a": 1})).unwrap();
        assert_eq!(text, "{\n  \"a\": 1\n}");
        assert_eq!(Codec::strict().to_string(&json!({"a": 1})).unwrap(), r#"{"a":1}"#);
    }
}
