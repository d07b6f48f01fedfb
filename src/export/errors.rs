//! Export errors

use thiserror::Error;

/// Result type for export operations
pub type ExportResult<T> = Result<T, ExportError>;

/// Failures materializing or saving an export
#[derive(Debug, Clone, Error)]
pub enum ExportError {
    /// A column value could not be rendered as text
    #[error("csv serialization failed: {0}")]
    Csv(String),

    /// The file-saving side effect failed
    #[error("failed to save export file: {0}")]
    Save(String),
}
