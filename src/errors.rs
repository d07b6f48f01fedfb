//! Unified error type for the orchestration pipeline
//!
//! Each module defines its own error enum; this aggregate is what reaches
//! the preview lifecycle controller. Errors from a superseded fetch intent
//! never get this far -- they are discarded by the debounce sequencer.

use thiserror::Error;

use crate::compiler::CompilationError;
use crate::engine::{EngineError, RegistrationError};
use crate::export::ExportError;
use crate::fetcher::FetchError;

/// Result type for orchestrator operations
pub type OrchestratorResult<T> = Result<T, OrchestratorError>;

/// Any failure the preview lifecycle controller can surface to the UI
#[derive(Debug, Error)]
pub enum OrchestratorError {
    /// Remote dataset registration failed; retrying registration may recover
    #[error(transparent)]
    Registration(#[from] RegistrationError),

    /// The query-compilation service returned an unusable response
    #[error(transparent)]
    Compilation(#[from] CompilationError),

    /// The embedded engine failed to run a statement
    #[error(transparent)]
    Engine(#[from] EngineError),

    /// Sample/count execution failed or the count shape was wrong
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// CSV serialization or file save failed
    #[error(transparent)]
    Export(#[from] ExportError),

    /// An operation was attempted in a state that cannot service it
    #[error("invalid preview state: {0}")]
    InvalidState(String),
}
