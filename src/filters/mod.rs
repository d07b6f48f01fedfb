//! Filter translation
//!
//! Converts UI-native filter tuples into the normalized filter specification
//! sent to the query compiler. Operator semantics are opaque here; the
//! translator only resolves column types and drops placeholder rules.

mod rule;
mod translator;
mod value;

pub use rule::{FilterRule, FilterSpec};
pub use translator::translate;
pub use value::FilterValue;

/// A snapshot of the widget's filter state, in UI order
pub type FilterSnapshot = Vec<RawFilter>;

/// One UI-native filter tuple, as pulled from the widget
#[derive(Debug, Clone, PartialEq)]
pub struct RawFilter {
    /// Column the rule applies to
    pub column: String,

    /// Operator string, passed through verbatim
    pub operator: String,

    /// Comparison value; null for placeholder rules
    pub value: FilterValue,

    /// Upper bound for range operators
    pub range_end: Option<FilterValue>,
}

impl RawFilter {
    /// Creates a filter tuple without a range end
    pub fn new(
        column: impl Into<String>,
        operator: impl Into<String>,
        value: FilterValue,
    ) -> Self {
        Self {
            column: column.into(),
            operator: operator.into(),
            value,
            range_end: None,
        }
    }

    /// Attaches a range-end value
    pub fn with_range_end(mut self, range_end: FilterValue) -> Self {
        self.range_end = Some(range_end);
        self
    }
}
