//! Preview lifecycle controller
//!
//! The top-level state machine binding dataset selection to registration,
//! the initial fetch and UI state transitions, and routing later filter
//! edits through the debounce sequencer.

mod controller;
mod view;

pub use controller::{PreviewController, PreviewState};
pub use view::PreviewView;
