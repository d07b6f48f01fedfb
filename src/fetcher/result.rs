//! Fetch results

use arrow::datatypes::SchemaRef;

use crate::engine::RowBatch;

/// The outcome of one paired sample/count fetch
#[derive(Debug, Clone)]
pub struct FetchResult {
    rows: RowBatch,
    matching_rows: u64,
    displayed_rows: u64,
}

impl FetchResult {
    /// Pairs the fetched rows with the exact match count.
    ///
    /// The count statement sees the unpaginated result, so a page can never
    /// exceed it; `matching_rows >= displayed_rows` holds by construction.
    pub fn new(rows: RowBatch, matching_rows: u64) -> Self {
        let displayed_rows = rows.num_rows() as u64;
        debug_assert!(matching_rows >= displayed_rows);
        Self {
            rows,
            matching_rows,
            displayed_rows,
        }
    }

    /// The fetched row batch
    pub fn rows(&self) -> &RowBatch {
        &self.rows
    }

    /// The result schema
    pub fn schema(&self) -> &SchemaRef {
        self.rows.schema()
    }

    /// Exact number of rows matching the filter
    pub fn matching_rows(&self) -> u64 {
        self.matching_rows
    }

    /// Rows actually fetched for display
    pub fn displayed_rows(&self) -> u64 {
        self.displayed_rows
    }

    /// Whether page-size truncation made this an incomplete preview
    pub fn is_truncated(&self) -> bool {
        self.displayed_rows < self.matching_rows
    }
}
