//! The debounce state machine
//!
//! Per filter target: `idle -> pending(timer) -> in-flight(intent)`. A new
//! trigger while pending restarts the quiet period (the old timer task wakes,
//! sees it was superseded and exits without fetching). A new trigger while
//! in-flight does not interrupt the running fetch; the stale intent's result
//! is discarded when it arrives.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use crate::errors::OrchestratorError;
use crate::fetcher::FetchResult;
use crate::filters::FilterSnapshot;

use super::intent::IntentRegistry;

/// Runs one debounced re-query: translate -> compile -> fetch
#[async_trait]
pub trait FetchDriver: Send + Sync {
    /// Fetches a fresh result for the given filter snapshot
    async fn refetch(&self, snapshot: FilterSnapshot) -> Result<FetchResult, OrchestratorError>;
}

/// Receives the outcome of the current (non-superseded) intent
#[async_trait]
pub trait ResultSink: Send + Sync {
    /// Applies a completed result to shared display state
    async fn apply(&self, result: FetchResult);

    /// Surfaces a failure of the current intent
    async fn fail(&self, error: OrchestratorError);
}

/// Coalesces filter-change bursts into single fetches
pub struct DebounceSequencer {
    window: Duration,
    driver: Arc<dyn FetchDriver>,
    sink: Arc<dyn ResultSink>,
    intents: Arc<IntentRegistry>,
    // Bumped on every trigger; a sleeping timer task whose generation is no
    // longer current was superseded while pending and must not fetch.
    generation: Arc<AtomicU64>,
}

impl DebounceSequencer {
    /// Creates a sequencer with the given quiet period
    pub fn new(window: Duration, driver: Arc<dyn FetchDriver>, sink: Arc<dyn ResultSink>) -> Self {
        Self {
            window,
            driver,
            sink,
            intents: Arc::new(IntentRegistry::new()),
            generation: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Handles one filter-change event.
    ///
    /// Restarts the quiet period with the latest snapshot; after a full
    /// window with no further events, exactly one fetch runs.
    pub fn trigger(&self, snapshot: FilterSnapshot) {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let window = self.window;
        let driver = Arc::clone(&self.driver);
        let sink = Arc::clone(&self.sink);
        let intents = Arc::clone(&self.intents);
        let generations = Arc::clone(&self.generation);

        tokio::spawn(async move {
            tokio::time::sleep(window).await;
            if generations.load(Ordering::SeqCst) != generation {
                // superseded while pending
                return;
            }

            let intent = intents.mint();
            tracing::debug!(?intent, "debounce window elapsed, fetching");

            // The gate stays held across the sink call: a fresher intent's
            // completion queues behind a slow application and re-checks
            // currency instead of landing first and being overwritten.
            match driver.refetch(snapshot).await {
                Ok(result) => match intents.begin_apply(intent).await {
                    Some(_gate) => sink.apply(result).await,
                    None => tracing::debug!(?intent, "discarding superseded result"),
                },
                Err(error) => match intents.begin_apply(intent).await {
                    Some(_gate) => sink.fail(error).await,
                    None => {
                        tracing::debug!(?intent, %error, "discarding superseded failure");
                    }
                },
            }
        });
    }
}

impl std::fmt::Debug for DebounceSequencer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DebounceSequencer")
            .field("window", &self.window)
            .finish_non_exhaustive()
    }
}
