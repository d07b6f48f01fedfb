//! Fetch errors

use thiserror::Error;

use crate::engine::EngineError;

/// Result type for fetch operations
pub type FetcherResult<T> = Result<T, FetchError>;

/// Failures executing a query plan
#[derive(Debug, Clone, Error)]
pub enum FetchError {
    /// The engine failed to run one of the paired statements
    #[error(transparent)]
    Engine(#[from] EngineError),

    /// The count result violated the one-row/one-aggregate contract.
    ///
    /// Fatal for this fetch only; the session stays usable.
    #[error("count result mismatch: {0}")]
    SchemaMismatch(String),
}
