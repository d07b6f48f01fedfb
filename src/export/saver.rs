//! File-saving seam
//!
//! Triggering a download is the one UI-coupled export side effect; behind a
//! trait so tests can capture bytes instead of touching the filesystem.

use std::fs;
use std::path::PathBuf;

use super::errors::{ExportError, ExportResult};

/// Saves export bytes under a file name
pub trait FileSaver: Send + Sync {
    /// Persists one finished export file
    fn save(&self, filename: &str, bytes: &[u8]) -> ExportResult<()>;
}

/// Saves exports into a download directory
#[derive(Debug, Clone)]
pub struct DirFileSaver {
    dir: PathBuf,
}

impl DirFileSaver {
    /// Creates a saver rooted at the given directory
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl FileSaver for DirFileSaver {
    fn save(&self, filename: &str, bytes: &[u8]) -> ExportResult<()> {
        let path = self.dir.join(filename);
        fs::write(&path, bytes).map_err(|e| ExportError::Save(format!("{}: {e}", path.display())))
    }
}
