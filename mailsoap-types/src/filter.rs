// mailsoap-types/src/filter.rs
//! Filter rule tests.

use crate::flag::TriBool;
use crate::record::{display_via_render, FieldSpec, FieldValue, Record};
use crate::vocab::FilterImportance;
use serde::{Deserialize, Serialize};

/// Attributes common to every filter test.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterTestHeader {
    /// Position of the test within its rule.
    #[serde(default)]
    pub index: i32,
    #[serde(default, skip_serializing_if = "TriBool::is_absent")]
    pub negative: TriBool,
}

impl FilterTestHeader {
    pub fn new(index: i32, negative: Option<bool>) -> Self {
        Self {
            index,
            negative: TriBool::from_logical(negative),
        }
    }

    pub fn is_negative(&self) -> bool {
        self.negative.unwrap_or(false)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportanceTest {
    #[serde(flatten)]
    pub header: FilterTestHeader,
    #[serde(rename = "imp", default, skip_serializing_if = "Option::is_none")]
    pub importance: Option<FilterImportance>,
}

impl ImportanceTest {
    pub fn new(index: i32, negative: Option<bool>, importance: FilterImportance) -> Self {
        Self {
            header: FilterTestHeader::new(index, negative),
            importance: Some(importance),
        }
    }

    pub fn is_negative(&self) -> bool {
        self.header.is_negative()
    }
}

impl Record for ImportanceTest {
    const RECORD_NAME: &'static str = "ImportanceTest";
    const ELEMENT: &'static str = "importanceTest";
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::optional("index", "index"),
        FieldSpec::optional("negative", "negative"),
        FieldSpec::required("importance", "imp"),
    ];

    fn values(&self) -> Vec<FieldValue<'_>> {
        vec![
            FieldValue::Int(self.header.index.into()),
            FieldValue::flag(self.header.negative),
            FieldValue::token(self.importance),
        ]
    }
}

/// Matches an address header against a value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressTest {
    #[serde(flatten)]
    pub header: FilterTestHeader,
    /// Comma separated header names.
    #[serde(rename = "header", default, skip_serializing_if = "Option::is_none")]
    pub header_names: Option<String>,
    /// `all`, `localpart` or `domain`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub part: Option<String>,
    /// `is`, `contains` or `matches`.
    #[serde(rename = "stringComparison", default, skip_serializing_if = "Option::is_none")]
    pub comparison: Option<String>,
    #[serde(rename = "caseSensitive", default, skip_serializing_if = "TriBool::is_absent")]
    pub case_sensitive: TriBool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    /// Relational match on the value: `gt`, `ge`, `lt`, `le`, `eq` or `ne`.
    #[serde(rename = "valueComparison", default, skip_serializing_if = "Option::is_none")]
    pub value_comparison: Option<String>,
    /// Relational match on the number of addresses.
    #[serde(rename = "countComparison", default, skip_serializing_if = "Option::is_none")]
    pub count_comparison: Option<String>,
    /// Collation for the relational match, e.g. `i;ascii-numeric`.
    #[serde(rename = "valueComparisonComparator", default, skip_serializing_if = "Option::is_none")]
    pub comparator: Option<String>,
}

impl AddressTest {
    pub fn new(
        index: i32,
        header_names: impl Into<String>,
        part: impl Into<String>,
        comparison: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self {
            header: FilterTestHeader::new(index, None),
            header_names: Some(header_names.into()),
            part: Some(part.into()),
            comparison: Some(comparison.into()),
            value: Some(value.into()),
            ..Self::default()
        }
    }

    pub fn is_negative(&self) -> bool {
        self.header.is_negative()
    }
}

impl Record for AddressTest {
    const RECORD_NAME: &'static str = "AddressTest";
    const ELEMENT: &'static str = "addressTest";
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::optional("index", "index"),
        FieldSpec::optional("negative", "negative"),
        FieldSpec::required("header_names", "header"),
        FieldSpec::required("part", "part"),
        FieldSpec::required("comparison", "stringComparison"),
        FieldSpec::optional("case_sensitive", "caseSensitive"),
        FieldSpec::required("value", "value"),
        FieldSpec::optional("value_comparison", "valueComparison"),
        FieldSpec::optional("count_comparison", "countComparison"),
        FieldSpec::optional("comparator", "valueComparisonComparator"),
    ];

    fn values(&self) -> Vec<FieldValue<'_>> {
        vec![
            FieldValue::Int(self.header.index.into()),
            FieldValue::flag(self.header.negative),
            FieldValue::text(&self.header_names),
            FieldValue::text(&self.part),
            FieldValue::text(&self.comparison),
            FieldValue::flag(self.case_sensitive),
            FieldValue::text(&self.value),
            FieldValue::text(&self.value_comparison),
            FieldValue::text(&self.count_comparison),
            FieldValue::text(&self.comparator),
        ]
    }
}

display_via_render!(ImportanceTest, AddressTest);
