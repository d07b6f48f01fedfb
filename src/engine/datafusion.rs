//! DataFusion-backed query engine
//!
//! Remote Parquet files are fetched over HTTP, decoded in memory and
//! registered as `MemTable`s; queries run through a single shared
//! `SessionContext` with `$n` positional placeholders.

use std::sync::Arc;
use std::time::Duration;

use arrow::datatypes::{Schema, SchemaRef};
use async_trait::async_trait;
use datafusion::datasource::MemTable;
use datafusion::parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use datafusion::prelude::SessionContext;
use datafusion::scalar::ScalarValue;

use crate::config::OrchestratorConfig;
use crate::filters::FilterValue;

use super::batch::RowBatch;
use super::errors::{EngineError, EngineResult, RegistrationError};
use super::session::QueryEngine;

/// The embedded analytical engine
pub struct DataFusionEngine {
    ctx: SessionContext,
    http: reqwest::Client,
}

impl DataFusionEngine {
    /// Creates an engine with its own session context and HTTP client
    pub fn new(config: &OrchestratorConfig) -> EngineResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.request_timeout_ms))
            .build()
            .map_err(|e| EngineError::Connection(e.to_string()))?;
        Ok(Self {
            ctx: SessionContext::new(),
            http,
        })
    }
}

#[async_trait]
impl QueryEngine for DataFusionEngine {
    async fn register(&self, name: &str, url: &str) -> Result<(), RegistrationError> {
        let bytes = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| RegistrationError::RemoteFetch(e.to_string()))?
            .error_for_status()
            .map_err(|e| RegistrationError::RemoteFetch(e.to_string()))?
            .bytes()
            .await
            .map_err(|e| RegistrationError::RemoteFetch(e.to_string()))?;

        // Bytes implements ChunkReader, so the file decodes straight from memory
        let builder = ParquetRecordBatchReaderBuilder::try_new(bytes)
            .map_err(|e| RegistrationError::Decode(e.to_string()))?;
        let schema = builder.schema().clone();
        let reader = builder
            .build()
            .map_err(|e| RegistrationError::Decode(e.to_string()))?;
        let batches = reader
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| RegistrationError::Decode(e.to_string()))?;

        let rows: usize = batches.iter().map(|b| b.num_rows()).sum();
        tracing::info!(dataset = name, rows, "decoded remote parquet file");

        let table = MemTable::try_new(schema, vec![batches])
            .map_err(|e| RegistrationError::Rejected(e.to_string()))?;
        self.ctx
            .register_table(name, Arc::new(table))
            .map_err(|e| RegistrationError::Rejected(e.to_string()))?;
        Ok(())
    }

    async fn run(&self, statement: &str, values: &[FilterValue]) -> EngineResult<RowBatch> {
        let df = self
            .ctx
            .sql(statement)
            .await
            .map_err(|e| EngineError::Statement(e.to_string()))?;
        let df = df
            .with_param_values(scalar_params(values))
            .map_err(|e| EngineError::Statement(e.to_string()))?;

        let schema: SchemaRef = Arc::new(Schema::from(df.schema()));
        let batches = df
            .collect()
            .await
            .map_err(|e| EngineError::Execution(e.to_string()))?;

        Ok(RowBatch::new(schema, batches))
    }
}

/// Maps filter values onto the engine's positional parameters
fn scalar_params(values: &[FilterValue]) -> Vec<ScalarValue> {
    values
        .iter()
        .map(|value| match value {
            FilterValue::Null => ScalarValue::Null,
            FilterValue::Bool(b) => ScalarValue::Boolean(Some(*b)),
            FilterValue::Int(i) => ScalarValue::Int64(Some(*i)),
            FilterValue::Float(f) => ScalarValue::Float64(Some(*f)),
            FilterValue::Text(s) => ScalarValue::Utf8(Some(s.clone())),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalar_param_mapping() {
        let params = scalar_params(&[
            FilterValue::Text("open".to_string()),
            FilterValue::Int(42),
            FilterValue::Float(1.5),
            FilterValue::Bool(true),
            FilterValue::Null,
        ]);
        assert_eq!(params[0], ScalarValue::Utf8(Some("open".to_string())));
        assert_eq!(params[1], ScalarValue::Int64(Some(42)));
        assert_eq!(params[2], ScalarValue::Float64(Some(1.5)));
        assert_eq!(params[3], ScalarValue::Boolean(Some(true)));
        assert_eq!(params[4], ScalarValue::Null);
    }
}
