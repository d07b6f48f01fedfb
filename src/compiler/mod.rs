//! Query compiler client
//!
//! The query-compilation service is an external collaborator: filter
//! specification in, parameterized query text out. This module owns the
//! transport and response validation, nothing else -- no retries, no
//! caching, no inspection of operator semantics.

mod client;
mod errors;
mod plan;

pub use client::{HttpQueryCompiler, QueryCompiler};
pub use errors::{CompilationError, CompilerResult};
pub use plan::QueryPlan;
