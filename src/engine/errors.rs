//! Engine and registration errors

use thiserror::Error;

/// Result type for engine operations
pub type EngineResult<T> = Result<T, EngineError>;

/// Remote dataset registration failures
///
/// Registration is recoverable: the session survives and a later
/// `register_dataset` call retries the remote fetch.
#[derive(Debug, Clone, Error)]
pub enum RegistrationError {
    /// Fetching the remote columnar file failed
    #[error("remote dataset fetch failed: {0}")]
    RemoteFetch(String),

    /// The fetched bytes were not a readable Parquet file
    #[error("parquet decode failed: {0}")]
    Decode(String),

    /// The engine refused the registration
    #[error("engine rejected dataset registration: {0}")]
    Rejected(String),
}

/// Embedded engine query failures
#[derive(Debug, Clone, Error)]
pub enum EngineError {
    /// The engine connection is unusable
    #[error("engine connection failed: {0}")]
    Connection(String),

    /// The statement could not be planned
    #[error("malformed statement: {0}")]
    Statement(String),

    /// Planning succeeded but execution failed
    #[error("query execution failed: {0}")]
    Execution(String),
}
