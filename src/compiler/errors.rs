//! Compiler client errors

use thiserror::Error;

/// Result type for compiler operations
pub type CompilerResult<T> = Result<T, CompilationError>;

/// Failures talking to the query-compilation service
#[derive(Debug, Clone, Error)]
pub enum CompilationError {
    /// The request never produced a response
    #[error("compiler request failed: {0}")]
    Transport(String),

    /// The service answered with a non-success status
    #[error("compiler returned status {0}")]
    Status(u16),

    /// The response body was not a usable query plan
    #[error("malformed compiler response: {0}")]
    MalformedResponse(String),

    /// The client itself could not be constructed
    #[error("invalid compiler configuration: {0}")]
    InvalidConfig(String),
}
