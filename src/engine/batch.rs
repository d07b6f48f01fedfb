//! Columnar row batches

use arrow::datatypes::SchemaRef;
use arrow::error::ArrowError;
use arrow::ipc::writer::StreamWriter;
use arrow::record_batch::RecordBatch;

/// One columnar query result
///
/// Carries the schema separately so an empty result still knows its columns.
#[derive(Debug, Clone)]
pub struct RowBatch {
    schema: SchemaRef,
    batches: Vec<RecordBatch>,
}

impl RowBatch {
    /// Wraps a schema and its record batches
    pub fn new(schema: SchemaRef, batches: Vec<RecordBatch>) -> Self {
        Self { schema, batches }
    }

    /// The result schema
    pub fn schema(&self) -> &SchemaRef {
        &self.schema
    }

    /// The underlying record batches
    pub fn batches(&self) -> &[RecordBatch] {
        &self.batches
    }

    /// Total rows across all batches
    pub fn num_rows(&self) -> usize {
        self.batches.iter().map(|b| b.num_rows()).sum()
    }

    /// Number of columns
    pub fn num_columns(&self) -> usize {
        self.schema.fields().len()
    }

    /// Encodes the result as an Arrow IPC stream, the interchange format
    /// the rendering widget consumes
    pub fn to_ipc_bytes(&self) -> Result<Vec<u8>, ArrowError> {
        let mut buffer = Vec::new();
        {
            let mut writer = StreamWriter::try_new(&mut buffer, &self.schema)?;
            for batch in &self.batches {
                writer.write(batch)?;
            }
            writer.finish()?;
        }
        Ok(buffer)
    }
}
