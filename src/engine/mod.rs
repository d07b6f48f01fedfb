//! Engine session
//!
//! Owns the lifecycle of the embedded analytical-engine connection. The
//! session is constructed once per preview session, registers remote
//! datasets idempotently, and supports concurrent outstanding queries --
//! preview fetches and export fetches share it.

mod batch;
mod datafusion;
mod errors;
mod session;

pub use batch::RowBatch;
pub use self::datafusion::DataFusionEngine;
pub use errors::{EngineError, EngineResult, RegistrationError};
pub use session::{EngineSession, QueryEngine};
