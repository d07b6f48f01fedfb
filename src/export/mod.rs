//! Export pipeline
//!
//! Materializes the complete filtered result set, bypassing the preview
//! page-size cap, and serializes it to delimited text. The only
//! intentionally UI-coupled side effect -- saving bytes as a file -- sits
//! behind an injectable seam.

mod csv;
mod errors;
mod pipeline;
mod saver;

pub use csv::write_csv;
pub use errors::{ExportError, ExportResult};
pub use pipeline::{ExportPipeline, ExportSummary};
pub use saver::{DirFileSaver, FileSaver};
