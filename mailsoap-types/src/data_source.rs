// mailsoap-types/src/data_source.rs
//! Data-source references.
//!
//! Every protocol gets its own nominal type so that a serializer can pick the
//! element name from the type alone. All of them share the [`NameOrId`]
//! structure through [`DataSourceNameOrId`]; a new protocol only needs a new
//! marker implementing [`DataSourceKind`].

use crate::name_or_id::NameOrId;
use crate::record::{FieldSpec, FieldValue, Record};
use crate::vocab::DataSourceType;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::Hash;
use std::marker::PhantomData;
use std::ops::{Deref, DerefMut};

pub trait DataSourceKind:
    fmt::Debug + Clone + Copy + Default + PartialEq + Eq + Hash + Send + Sync + 'static
{
    const TYPE: DataSourceType;
    const ELEMENT: &'static str;
    const RECORD_NAME: &'static str;
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DataSourceNameOrId<K> {
    inner: NameOrId,
    #[serde(skip)]
    kind: PhantomData<K>,
}

impl<K: DataSourceKind> DataSourceNameOrId<K> {
    pub fn for_id(id: impl Into<String>) -> Self {
        NameOrId::for_id(id).into()
    }

    pub fn for_name(name: impl Into<String>) -> Self {
        NameOrId::for_name(name).into()
    }

    pub fn kind(&self) -> DataSourceType {
        K::TYPE
    }

    pub fn as_name_or_id(&self) -> &NameOrId {
        &self.inner
    }

    pub fn into_inner(self) -> NameOrId {
        self.inner
    }
}

impl<K> From<NameOrId> for DataSourceNameOrId<K> {
    fn from(inner: NameOrId) -> Self {
        Self {
            inner,
            kind: PhantomData,
        }
    }
}

impl<K> Deref for DataSourceNameOrId<K> {
    type Target = NameOrId;

    fn deref(&self) -> &NameOrId {
        &self.inner
    }
}

impl<K> DerefMut for DataSourceNameOrId<K> {
    fn deref_mut(&mut self) -> &mut NameOrId {
        &mut self.inner
    }
}

impl<K: DataSourceKind> Record for DataSourceNameOrId<K> {
    const RECORD_NAME: &'static str = K::RECORD_NAME;
    const ELEMENT: &'static str = K::ELEMENT;
    const FIELDS: &'static [FieldSpec] = <NameOrId as Record>::FIELDS;

    fn values(&self) -> Vec<FieldValue<'_>> {
        self.inner.values()
    }
}

impl<K: DataSourceKind> fmt::Display for DataSourceNameOrId<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

macro_rules! data_source_kinds {
    ($( $marker:ident => $variant:ident, $element:literal, $alias:ident; )+) => {
        /// Marker types selecting the protocol of a [`DataSourceNameOrId`].
        pub mod kind {
            $(
                #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
                pub struct $marker;

                impl super::DataSourceKind for $marker {
                    const TYPE: super::DataSourceType = super::DataSourceType::$variant;
                    const ELEMENT: &'static str = $element;
                    const RECORD_NAME: &'static str = stringify!($alias);
                }
            )+
        }

        $( pub type $alias = DataSourceNameOrId<kind::$marker>; )+

        /// A data-source reference whose protocol is only known at run time.
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub enum AnyDataSource {
            $( $variant($alias), )+
        }

        impl AnyDataSource {
            pub fn from_parts(kind: DataSourceType, inner: NameOrId) -> Self {
                match kind {
                    $( DataSourceType::$variant => Self::$variant(inner.into()), )+
                }
            }

            pub fn kind(&self) -> DataSourceType {
                match self {
                    $( Self::$variant(_) => DataSourceType::$variant, )+
                }
            }

            pub fn name_or_id(&self) -> &NameOrId {
                match self {
                    $( Self::$variant(ds) => ds.as_name_or_id(), )+
                }
            }

            pub fn element(&self) -> &'static str {
                match self {
                    $( Self::$variant(_) => $element, )+
                }
            }

            pub fn render(&self) -> String {
                match self {
                    $( Self::$variant(ds) => ds.render(), )+
                }
            }
        }
    };
}

data_source_kinds! {
    Pop3 => Pop3, "pop3", Pop3DataSourceNameOrId;
    Imap => Imap, "imap", ImapDataSourceNameOrId;
    Caldav => Caldav, "caldav", CaldavDataSourceNameOrId;
    Yab => Yab, "yab", YabDataSourceNameOrId;
    Rss => Rss, "rss", RssDataSourceNameOrId;
    Gal => Gal, "gal", GalDataSourceNameOrId;
    Cal => Cal, "cal", CalDataSourceNameOrId;
    Unknown => Unknown, "unknown", UnknownDataSourceNameOrId;
}

impl fmt::Display for AnyDataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::TokenEnum;
    use serde_json::json;

    fn element_of<R: Record>(_: &R) -> &'static str {
        R::ELEMENT
    }

    #[test]
    fn test_variants_share_structure() {
        let cal = CalDataSourceNameOrId::for_id("ds-1");
        let pop = Pop3DataSourceNameOrId::for_name("pop3DSForTest");
        assert_eq!(cal.id(), Some("ds-1"));
        assert_eq!(cal.name(), None);
        assert_eq!(pop.name(), Some("pop3DSForTest"));
        assert_eq!(pop.id(), None);
        assert_eq!(serde_json::to_value(&cal).unwrap(), json!({"id": "ds-1"}));
    }

    #[test]
    fn test_type_identity_selects_element() {
        assert_eq!(element_of(&CalDataSourceNameOrId::for_id("1")), "cal");
        assert_eq!(element_of(&Pop3DataSourceNameOrId::for_id("1")), "pop3");
        assert_eq!(element_of(&CaldavDataSourceNameOrId::for_id("1")), "caldav");
        assert_eq!(CalDataSourceNameOrId::for_id("1").to_string(), "CalDataSourceNameOrId{id=1, name=absent}");
    }

    #[test]
    fn test_elements_match_type_tokens() {
        for &kind in DataSourceType::VARIANTS {
            let any = AnyDataSource::from_parts(kind, NameOrId::for_id("x"));
            assert_eq!(any.kind(), kind);
            assert_eq!(any.element(), kind.token());
            assert_eq!(any.name_or_id().id(), Some("x"));
        }
    }

    #[test]
    fn test_deref_mut_reaches_fields() {
        let mut ds = ImapDataSourceNameOrId::for_id("71e1c69c");
        ds.name = Some("imap".to_string());
        assert_eq!(ds.as_name_or_id().name(), Some("imap"));
        let back: ImapDataSourceNameOrId =
            serde_json::from_value(json!({"id": "71e1c69c", "name": "imap"})).unwrap();
        assert_eq!(back, ds);
    }
}
