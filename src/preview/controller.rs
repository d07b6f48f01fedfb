//! Preview lifecycle state machine
//!
//! `closed -> loading -> ready -> (loading | error) -> closed`. All shared
//! state lives in one core object passed by reference to each collaborator;
//! nothing is module-global, so every piece can be replaced by a test double.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use crate::compiler::QueryCompiler;
use crate::config::OrchestratorConfig;
use crate::debounce::{DebounceSequencer, FetchDriver, ResultSink};
use crate::engine::EngineSession;
use crate::errors::{OrchestratorError, OrchestratorResult};
use crate::export::{ExportPipeline, ExportSummary};
use crate::fetcher::{FetchResult, ResultFetcher};
use crate::filters::{translate, FilterSnapshot, RawFilter};
use crate::schema::ResultSchema;

use super::view::PreviewView;

/// Lifecycle states of the preview
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreviewState {
    /// No dataset selected
    Closed,
    /// Registration or initial fetch in progress
    Loading,
    /// A materialized result is on display
    Ready,
    /// The last current-intent operation failed; error is visible
    Error,
}

/// The dataset currently on display
struct ActivePreview {
    dataset: String,
    /// Schema of the latest result; filter types resolve against this, not
    /// the raw dataset schema, so computed columns stay filterable
    schema: ResultSchema,
}

/// Shared state behind the controller, the sequencer driver and the sink
struct PreviewCore {
    session: Arc<EngineSession>,
    compiler: Arc<dyn QueryCompiler>,
    fetcher: ResultFetcher,
    view: Arc<dyn PreviewView>,
    page_size: usize,
    state: Mutex<PreviewState>,
    active: Mutex<Option<ActivePreview>>,
}

impl PreviewCore {
    fn state(&self) -> PreviewState {
        *self.state.lock().unwrap()
    }

    fn set_state(&self, state: PreviewState) {
        *self.state.lock().unwrap() = state;
    }

    /// Registration plus the initial, non-debounced fetch with no filters
    async fn initial_fetch(&self, dataset: &str) -> OrchestratorResult<FetchResult> {
        self.session.register_dataset(dataset).await?;
        let spec = translate(dataset, &[], &ResultSchema::empty(), 1, self.page_size, false);
        let plan = self.compiler.compile(&spec).await?;
        Ok(self.fetcher.fetch(&plan).await?)
    }

    fn show(&self, result: &FetchResult) {
        self.view.set_counts(
            result.displayed_rows(),
            result.matching_rows(),
            result.is_truncated(),
        );
    }
}

#[async_trait]
impl FetchDriver for PreviewCore {
    async fn refetch(&self, snapshot: FilterSnapshot) -> Result<FetchResult, OrchestratorError> {
        let (dataset, schema) = {
            let active = self.active.lock().unwrap();
            match active.as_ref() {
                Some(active) => (active.dataset.clone(), active.schema.clone()),
                None => {
                    return Err(OrchestratorError::InvalidState(
                        "no dataset is open".to_string(),
                    ))
                }
            }
        };

        let spec = translate(&dataset, &snapshot, &schema, 1, self.page_size, false);
        let plan = self.compiler.compile(&spec).await?;
        Ok(self.fetcher.fetch(&plan).await?)
    }
}

#[async_trait]
impl ResultSink for PreviewCore {
    async fn apply(&self, result: FetchResult) {
        if self.state() != PreviewState::Ready {
            tracing::debug!("discarding fetch result, preview no longer ready");
            return;
        }

        if let Some(active) = self.active.lock().unwrap().as_mut() {
            active.schema = ResultSchema::from_arrow(result.schema());
        }
        // replace in place: the widget keeps scroll/selection state
        self.view.replace(&result);
        self.show(&result);
    }

    async fn fail(&self, error: OrchestratorError) {
        if self.state() == PreviewState::Closed {
            tracing::debug!(%error, "discarding fetch failure, preview closed");
            return;
        }

        tracing::warn!(%error, "debounced fetch failed");
        self.set_state(PreviewState::Error);
        self.view.set_loading(false);
        self.view.set_error(&error.to_string());
    }
}

/// Binds a selected dataset to registration, fetching and UI state
pub struct PreviewController {
    core: Arc<PreviewCore>,
    sequencer: DebounceSequencer,
}

impl PreviewController {
    /// Wires the controller to its collaborators
    pub fn new(
        config: &OrchestratorConfig,
        session: Arc<EngineSession>,
        compiler: Arc<dyn QueryCompiler>,
        view: Arc<dyn PreviewView>,
    ) -> Self {
        let core = Arc::new(PreviewCore {
            fetcher: ResultFetcher::new(Arc::clone(&session)),
            session,
            compiler,
            view,
            page_size: config.page_size,
            state: Mutex::new(PreviewState::Closed),
            active: Mutex::new(None),
        });
        let sequencer = DebounceSequencer::new(
            Duration::from_millis(config.debounce_window_ms),
            Arc::clone(&core) as Arc<dyn FetchDriver>,
            Arc::clone(&core) as Arc<dyn ResultSink>,
        );
        Self { core, sequencer }
    }

    /// Current lifecycle state
    pub fn state(&self) -> PreviewState {
        self.core.state()
    }

    /// Opens a dataset: register, fetch the unfiltered first page, go ready.
    ///
    /// A different open dataset is torn down first. Registration is
    /// idempotent, so re-opening the same dataset never re-fetches remote
    /// metadata.
    pub async fn open(&self, dataset: &str) -> OrchestratorResult<()> {
        let needs_teardown = {
            let active = self.core.active.lock().unwrap();
            matches!(active.as_ref(), Some(active) if active.dataset != dataset)
        };
        if needs_teardown {
            self.close();
        }

        tracing::info!(dataset, "opening preview");
        self.core.set_state(PreviewState::Loading);
        self.core.view.set_loading(true);

        match self.core.initial_fetch(dataset).await {
            Ok(result) => {
                *self.core.active.lock().unwrap() = Some(ActivePreview {
                    dataset: dataset.to_string(),
                    schema: ResultSchema::from_arrow(result.schema()),
                });
                self.core.set_state(PreviewState::Ready);
                self.core.view.set_loading(false);
                self.core.view.load(&result);
                self.core.show(&result);
                Ok(())
            }
            Err(error) => {
                tracing::warn!(dataset, %error, "preview open failed");
                self.core.set_state(PreviewState::Error);
                self.core.view.set_loading(false);
                self.core.view.set_error(&error.to_string());
                Err(error)
            }
        }
    }

    /// Routes a filter-change event through the debounce sequencer.
    ///
    /// Ignored outside the ready state; the initial fetch and error
    /// recovery go through `open` instead.
    pub fn on_filter_change(&self, snapshot: FilterSnapshot) {
        if self.state() != PreviewState::Ready {
            tracing::debug!(state = ?self.state(), "filter change ignored");
            return;
        }
        self.sequencer.trigger(snapshot);
    }

    /// Exports the current dataset under the given filter snapshot.
    ///
    /// Bypasses the sequencer and the preview page cap; reuses the
    /// translator, compiler and fetcher through the pipeline.
    pub async fn export(
        &self,
        pipeline: &ExportPipeline,
        snapshot: &[RawFilter],
    ) -> OrchestratorResult<ExportSummary> {
        let (dataset, schema) = {
            let active = self.core.active.lock().unwrap();
            match active.as_ref() {
                Some(active) => (active.dataset.clone(), active.schema.clone()),
                None => {
                    return Err(OrchestratorError::InvalidState(
                        "no dataset is open".to_string(),
                    ))
                }
            }
        };
        pipeline.export_all(&dataset, snapshot, &schema).await
    }

    /// Releases the materialized result and returns to closed.
    ///
    /// Safe from any state; an in-flight intent that completes afterwards
    /// is discarded by the sink's state check.
    pub fn close(&self) {
        tracing::debug!("closing preview");
        *self.core.active.lock().unwrap() = None;
        self.core.set_state(PreviewState::Closed);
        self.core.view.clear();
    }
}

impl std::fmt::Debug for PreviewController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PreviewController")
            .field("state", &self.state())
            .finish_non_exhaustive()
    }
}
