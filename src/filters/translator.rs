//! Raw filter tuples -> normalized filter specification

use crate::schema::ResultSchema;

use super::{FilterRule, FilterSpec, RawFilter};

/// Null-test operators whose value slot is legitimately null
const NULL_TEST_OPERATORS: [&str; 2] = ["is null", "is not null"];

/// Translates a UI filter snapshot into a filter specification.
///
/// Dragging a column into the widget's filter section emits an `== null`
/// rule before the user picks a value; applying it would return a spurious
/// empty result set, so null-valued rules are dropped unless the operator is
/// itself a null test. Column types come from the result schema; columns the
/// schema does not know pass through untyped. Rule order follows UI order.
pub fn translate(
    table_name: &str,
    snapshot: &[RawFilter],
    schema: &ResultSchema,
    page: usize,
    per_page: usize,
    for_download: bool,
) -> FilterSpec {
    let filter_rules = snapshot
        .iter()
        .filter(|raw| {
            !raw.value.is_null() || NULL_TEST_OPERATORS.contains(&raw.operator.as_str())
        })
        .map(|raw| {
            FilterRule::new(
                raw.column.clone(),
                raw.operator.clone(),
                raw.value.clone(),
                raw.range_end.clone(),
                schema.declared_type(&raw.column),
            )
        })
        .collect();

    FilterSpec {
        table_name: table_name.to_string(),
        filter_rules,
        page,
        per_page,
        for_download,
    }
}
