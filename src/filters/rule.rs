//! Normalized filter rules and the filter specification
//!
//! `FilterSpec` is the outbound payload for the query compiler. Field order
//! is fixed by the struct definitions, so identical filter states always
//! serialize to identical request bodies.

use serde::ser::SerializeSeq;
use serde::{Serialize, Serializer};

use crate::schema::DeclaredType;

use super::FilterValue;

/// One retained filter rule with its resolved column type
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilterRule {
    /// The `[column, operator, value]` tuple (plus range end when present)
    pub filter: FilterTerms,

    /// Declared column type, resolved from the result schema; `None` when
    /// the column is absent from the schema or has no compiler vocabulary
    #[serde(rename = "type")]
    pub declared_type: Option<&'static str>,
}

impl FilterRule {
    /// Creates a rule from its parts
    pub fn new(
        column: impl Into<String>,
        operator: impl Into<String>,
        value: FilterValue,
        range_end: Option<FilterValue>,
        declared_type: Option<DeclaredType>,
    ) -> Self {
        Self {
            filter: FilterTerms {
                column: column.into(),
                operator: operator.into(),
                value,
                range_end,
            },
            declared_type: declared_type.map(|t| t.as_str()),
        }
    }

    /// Column the rule applies to
    pub fn column(&self) -> &str {
        &self.filter.column
    }

    /// Operator string
    pub fn operator(&self) -> &str {
        &self.filter.operator
    }

    /// Comparison value
    pub fn value(&self) -> &FilterValue {
        &self.filter.value
    }
}

/// The positional `[column, operator, value(, range end)]` wire tuple
#[derive(Debug, Clone, PartialEq)]
pub struct FilterTerms {
    pub column: String,
    pub operator: String,
    pub value: FilterValue,
    pub range_end: Option<FilterValue>,
}

impl Serialize for FilterTerms {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let len = if self.range_end.is_some() { 4 } else { 3 };
        let mut seq = serializer.serialize_seq(Some(len))?;
        seq.serialize_element(&self.column)?;
        seq.serialize_element(&self.operator)?;
        seq.serialize_element(&self.value)?;
        if let Some(range_end) = &self.range_end {
            seq.serialize_element(range_end)?;
        }
        seq.end()
    }
}

/// The normalized filter specification sent to the query compiler
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterSpec {
    /// Dataset the query runs against
    pub table_name: String,

    /// Retained rules, in UI order
    pub filter_rules: Vec<FilterRule>,

    /// 1-based page number
    pub page: usize,

    /// Rows per page
    pub per_page: usize,

    /// When set, the compiler omits the row limit entirely
    pub for_download: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rule_wire_shape() {
        let rule = FilterRule::new(
            "status",
            "==",
            FilterValue::Text("open".to_string()),
            None,
            Some(DeclaredType::String),
        );
        let json = serde_json::to_string(&rule).unwrap();
        assert_eq!(json, r#"{"filter":["status","==","open"],"type":"string"}"#);
    }

    #[test]
    fn test_rule_with_range_end() {
        let rule = FilterRule::new(
            "amount",
            "between",
            FilterValue::Int(10),
            Some(FilterValue::Int(20)),
            Some(DeclaredType::Integer),
        );
        let json = serde_json::to_string(&rule).unwrap();
        assert_eq!(
            json,
            r#"{"filter":["amount","between",10,20],"type":"integer"}"#
        );
    }

    #[test]
    fn test_untyped_rule_serializes_null_type() {
        let rule = FilterRule::new("mystery", "==", FilterValue::Int(1), None, None);
        let json = serde_json::to_string(&rule).unwrap();
        assert_eq!(json, r#"{"filter":["mystery","==",1],"type":null}"#);
    }

    #[test]
    fn test_spec_serialization_is_deterministic() {
        let spec = FilterSpec {
            table_name: "orders".to_string(),
            filter_rules: vec![FilterRule::new(
                "status",
                "==",
                FilterValue::Text("open".to_string()),
                None,
                Some(DeclaredType::String),
            )],
            page: 1,
            per_page: 10_000,
            for_download: false,
        };
        let a = serde_json::to_string(&spec).unwrap();
        let b = serde_json::to_string(&spec).unwrap();
        assert_eq!(a, b);
        assert_eq!(
            a,
            r#"{"tableName":"orders","filterRules":[{"filter":["status","==","open"],"type":"string"}],"page":1,"perPage":10000,"forDownload":false}"#
        );
    }
}
