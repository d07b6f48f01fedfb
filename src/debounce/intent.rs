//! Fetch intents
//!
//! An intent is a token identifying one debounced re-query attempt. Minting
//! is monotonic; a result may only be applied while its intent is still the
//! most recently minted one.

use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::{Mutex, MutexGuard};

/// Token for one debounced fetch attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct FetchIntent(u64);

/// Mints intents and tracks which one is current
#[derive(Debug, Default)]
pub struct IntentRegistry {
    latest: AtomicU64,
    apply_gate: Mutex<()>,
}

impl IntentRegistry {
    /// Creates an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Mints a new intent, superseding all earlier ones
    pub fn mint(&self) -> FetchIntent {
        FetchIntent(self.latest.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// Whether the given intent is still the most recently minted
    pub fn is_current(&self, intent: FetchIntent) -> bool {
        self.latest.load(Ordering::SeqCst) == intent.0
    }

    /// Serializes completion handling.
    ///
    /// Returns a guard when the intent is still current; the caller must
    /// hold it while mutating shared state, so a fresher intent's
    /// completion waits instead of interleaving with an application that
    /// suspends mid-way. Returns `None` for superseded intents.
    pub async fn begin_apply(&self, intent: FetchIntent) -> Option<MutexGuard<'_, ()>> {
        let gate = self.apply_gate.lock().await;
        self.is_current(intent).then_some(gate)
    }
}
