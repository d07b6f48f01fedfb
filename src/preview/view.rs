//! The bound widget seam
//!
//! The core exposes plain data -- counts, flags, result handles -- and a
//! thin presentation layer applies them. Results cross this boundary as
//! `FetchResult`s; implementations that need the Arrow interchange bytes
//! call `result.rows().to_ipc_bytes()`.

use crate::fetcher::FetchResult;

/// Everything the orchestrator tells the rendering widget
pub trait PreviewView: Send + Sync {
    /// Hands the widget its first materialized result
    fn load(&self, result: &FetchResult);

    /// Replaces the materialized result in place, preserving widget
    /// scroll/selection state where possible
    fn replace(&self, result: &FetchResult);

    /// Updates the displayed/matching row counters and the
    /// incomplete-preview flag
    fn set_counts(&self, displayed: u64, matching: u64, truncated: bool);

    /// Shows or clears the loading indicator
    fn set_loading(&self, loading: bool);

    /// Presents a visible error state
    fn set_error(&self, message: &str);

    /// Releases the widget's materialized result
    fn clear(&self);
}
