//! Concurrent sample/count execution

use std::sync::Arc;

use arrow::array::{Array, Int64Array, UInt64Array};

use crate::compiler::QueryPlan;
use crate::engine::{EngineSession, RowBatch};
use crate::filters::FilterValue;

use super::errors::{FetchError, FetcherResult};
use super::result::FetchResult;

/// Executes query plans against a shared engine session
#[derive(Debug, Clone)]
pub struct ResultFetcher {
    session: Arc<EngineSession>,
}

impl ResultFetcher {
    /// Binds the fetcher to a session
    pub fn new(session: Arc<EngineSession>) -> Self {
        Self { session }
    }

    /// Runs the data and count statements concurrently with identical bound
    /// values, waiting for both before returning (fan-out/fan-in).
    pub async fn fetch(&self, plan: &QueryPlan) -> FetcherResult<FetchResult> {
        let (rows, count) = tokio::try_join!(
            self.run(&plan.statement, &plan.values),
            self.run(&plan.count_statement, &plan.values),
        )?;

        let matching_rows = extract_count(&count)?;
        if matching_rows < rows.num_rows() as u64 {
            return Err(FetchError::SchemaMismatch(format!(
                "count {matching_rows} is below the fetched row count {}",
                rows.num_rows()
            )));
        }
        tracing::debug!(
            displayed = rows.num_rows(),
            matching = matching_rows,
            "fetch complete"
        );
        Ok(FetchResult::new(rows, matching_rows))
    }

    async fn run(&self, statement: &str, values: &[FilterValue]) -> FetcherResult<RowBatch> {
        Ok(self.session.run_query(statement, values).await?)
    }
}

/// Pulls the match count out of the count-statement result.
///
/// Contract: exactly one row, exactly one aggregate column. The column is
/// located by position rather than by its alias, so compiler-side renames of
/// the aggregate cannot silently break extraction.
fn extract_count(count: &RowBatch) -> FetcherResult<u64> {
    if count.num_rows() != 1 {
        return Err(FetchError::SchemaMismatch(format!(
            "expected exactly one count row, got {}",
            count.num_rows()
        )));
    }
    if count.num_columns() != 1 {
        return Err(FetchError::SchemaMismatch(format!(
            "expected exactly one count column, got {}",
            count.num_columns()
        )));
    }

    let batch = count
        .batches()
        .iter()
        .find(|b| b.num_rows() > 0)
        .ok_or_else(|| FetchError::SchemaMismatch("count row missing".to_string()))?;
    let column = batch.column(0);

    if let Some(values) = column.as_any().downcast_ref::<Int64Array>() {
        if values.is_null(0) {
            return Err(FetchError::SchemaMismatch("count is null".to_string()));
        }
        let v = values.value(0);
        if v < 0 {
            return Err(FetchError::SchemaMismatch(format!("negative count {v}")));
        }
        return Ok(v as u64);
    }
    if let Some(values) = column.as_any().downcast_ref::<UInt64Array>() {
        if values.is_null(0) {
            return Err(FetchError::SchemaMismatch("count is null".to_string()));
        }
        return Ok(values.value(0));
    }

    Err(FetchError::SchemaMismatch(format!(
        "count column is not numeric: {}",
        column.data_type()
    )))
}
