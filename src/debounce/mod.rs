//! Debounce sequencer
//!
//! Coalesces bursts of filter-change events into a single re-fetch and
//! guarantees that only the most-recently-minted fetch intent ever mutates
//! shared display state. There is no true cancellation of in-flight engine
//! calls: a superseded fetch runs to completion and its result is discarded
//! on arrival.

mod intent;
mod sequencer;

pub use intent::{FetchIntent, IntentRegistry};
pub use sequencer::{DebounceSequencer, FetchDriver, ResultSink};
