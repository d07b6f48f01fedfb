//! Columnar result -> delimited text
//!
//! Header row comes from the result schema in schema order; rows follow
//! result order. Date and timestamp columns are stored as integers in the
//! columnar representation and must be rendered as ISO-8601 strings.

use arrow::array::{
    Array, ArrayRef, Date32Array, Date64Array, TimestampMicrosecondArray,
    TimestampMillisecondArray, TimestampNanosecondArray, TimestampSecondArray,
};
use arrow::datatypes::{DataType, TimeUnit};
use arrow::util::display::array_value_to_string;
use chrono::DateTime;

use crate::engine::RowBatch;
use crate::schema::DeclaredType;

use super::errors::{ExportError, ExportResult};

/// Serializes a row batch to UTF-8 comma-separated text with a header row
pub fn write_csv(rows: &RowBatch) -> ExportResult<Vec<u8>> {
    let schema = rows.schema();
    let mut out = String::new();

    let header: Vec<String> = schema
        .fields()
        .iter()
        .map(|field| escape_field(field.name()))
        .collect();
    out.push_str(&header.join(","));
    out.push('\n');

    for batch in rows.batches() {
        for row in 0..batch.num_rows() {
            for (i, column) in batch.columns().iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                out.push_str(&escape_field(&render_value(column, row)?));
            }
            out.push('\n');
        }
    }

    Ok(out.into_bytes())
}

/// Renders one cell, converting temporal columns to ISO-8601
fn render_value(column: &ArrayRef, row: usize) -> ExportResult<String> {
    if column.is_null(row) {
        return Ok(String::new());
    }

    let temporal = DeclaredType::from_arrow(column.data_type())
        .map(|t| t.is_temporal())
        .unwrap_or(false);
    if !temporal {
        return array_value_to_string(column, row).map_err(|e| ExportError::Csv(e.to_string()));
    }

    match column.data_type() {
        DataType::Date32 => {
            let days = downcast::<Date32Array>(column)?.value(row);
            let instant = DateTime::from_timestamp(i64::from(days) * 86_400, 0)
                .ok_or_else(|| ExportError::Csv(format!("date out of range: {days} days")))?;
            Ok(instant.format("%Y-%m-%d").to_string())
        }
        DataType::Date64 => {
            let millis = downcast::<Date64Array>(column)?.value(row);
            let instant = DateTime::from_timestamp_millis(millis)
                .ok_or_else(|| ExportError::Csv(format!("date out of range: {millis} ms")))?;
            Ok(instant.format("%Y-%m-%d").to_string())
        }
        DataType::Timestamp(unit, _) => {
            let instant = match unit {
                TimeUnit::Second => {
                    let v = downcast::<TimestampSecondArray>(column)?.value(row);
                    DateTime::from_timestamp(v, 0)
                }
                TimeUnit::Millisecond => {
                    let v = downcast::<TimestampMillisecondArray>(column)?.value(row);
                    DateTime::from_timestamp_millis(v)
                }
                TimeUnit::Microsecond => {
                    let v = downcast::<TimestampMicrosecondArray>(column)?.value(row);
                    DateTime::from_timestamp_micros(v)
                }
                TimeUnit::Nanosecond => {
                    let v = downcast::<TimestampNanosecondArray>(column)?.value(row);
                    Some(DateTime::from_timestamp_nanos(v))
                }
            }
            .ok_or_else(|| ExportError::Csv("timestamp out of range".to_string()))?;
            Ok(instant.to_rfc3339())
        }
        other => Err(ExportError::Csv(format!(
            "unsupported temporal type: {other}"
        ))),
    }
}

fn downcast<T: 'static>(column: &ArrayRef) -> ExportResult<&T> {
    column
        .as_any()
        .downcast_ref::<T>()
        .ok_or_else(|| ExportError::Csv("temporal column has unexpected layout".to_string()))
}

/// Quotes a field when it contains the delimiter, a quote or a line break
fn escape_field(value: &str) -> String {
    if value.contains(',') || value.contains('"') || value.contains('\n') || value.contains('\r') {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}
