//! Shared test doubles for the orchestrator integration tests
#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use arrow::array::Int64Array;
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use async_trait::async_trait;

use parqview::compiler::{CompilationError, CompilerResult, QueryCompiler, QueryPlan};
use parqview::engine::{EngineError, EngineResult, QueryEngine, RegistrationError, RowBatch};
use parqview::export::{ExportResult, FileSaver};
use parqview::fetcher::FetchResult;
use parqview::filters::{FilterSpec, FilterValue};
use parqview::preview::PreviewView;

/// Builds an `id: Int64` row batch with `n` rows
pub fn int_rows(n: usize) -> RowBatch {
    let schema = Arc::new(Schema::new(vec![Field::new("id", DataType::Int64, false)]));
    let batches = if n == 0 {
        vec![]
    } else {
        vec![RecordBatch::try_new(
            Arc::clone(&schema),
            vec![Arc::new(Int64Array::from((0..n as i64).collect::<Vec<_>>()))],
        )
        .unwrap()]
    };
    RowBatch::new(schema, batches)
}

/// Builds a one-row/one-column count result
pub fn count_rows(count: u64) -> RowBatch {
    let schema = Arc::new(Schema::new(vec![Field::new(
        "count_star()",
        DataType::Int64,
        false,
    )]));
    let batch = RecordBatch::try_new(
        Arc::clone(&schema),
        vec![Arc::new(Int64Array::from(vec![count as i64]))],
    )
    .unwrap();
    RowBatch::new(schema, vec![batch])
}

/// Convenience for tests that need a ready-made fetch result
pub fn fetch_result(displayed: usize, matching: u64) -> FetchResult {
    FetchResult::new(int_rows(displayed), matching)
}

/// Compiler stub that embeds the filter specification in the statement text
/// so the stub engine can reconstruct it, and records every request
#[derive(Default)]
pub struct StubCompiler {
    pub specs: Mutex<Vec<FilterSpec>>,
    pub fail: AtomicBool,
}

impl StubCompiler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            specs: Mutex::new(Vec::new()),
            fail: AtomicBool::new(true),
        }
    }
}

#[async_trait]
impl QueryCompiler for StubCompiler {
    async fn compile(&self, spec: &FilterSpec) -> CompilerResult<QueryPlan> {
        self.specs.lock().unwrap().push(spec.clone());
        if self.fail.load(Ordering::SeqCst) {
            return Err(CompilationError::Status(500));
        }
        let body = serde_json::to_string(spec)
            .map_err(|e| CompilationError::MalformedResponse(e.to_string()))?;
        Ok(QueryPlan {
            statement: format!("data:{body}"),
            count_statement: format!("count:{body}"),
            values: Vec::new(),
        })
    }
}

/// Engine stub that answers the statements produced by `StubCompiler`.
///
/// With no filter rules every query matches `total` rows; with any rule it
/// matches `filtered` rows. Page arithmetic mirrors a real paginated query.
pub struct ScenarioEngine {
    total: u64,
    filtered: u64,
    pub register_calls: AtomicUsize,
    pub fail_register: AtomicBool,
}

impl ScenarioEngine {
    pub fn new(total: u64, filtered: u64) -> Self {
        Self {
            total,
            filtered,
            register_calls: AtomicUsize::new(0),
            fail_register: AtomicBool::new(false),
        }
    }
}

#[async_trait]
impl QueryEngine for ScenarioEngine {
    async fn register(&self, _name: &str, _url: &str) -> Result<(), RegistrationError> {
        self.register_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_register.load(Ordering::SeqCst) {
            return Err(RegistrationError::RemoteFetch(
                "remote metadata fetch failed".to_string(),
            ));
        }
        Ok(())
    }

    async fn run(&self, statement: &str, _values: &[FilterValue]) -> EngineResult<RowBatch> {
        let (kind, body) = statement
            .split_once(':')
            .ok_or_else(|| EngineError::Statement(statement.to_string()))?;
        let spec: serde_json::Value = serde_json::from_str(body)
            .map_err(|e| EngineError::Statement(e.to_string()))?;

        let has_rules = spec["filterRules"]
            .as_array()
            .map(|rules| !rules.is_empty())
            .unwrap_or(false);
        let matching = if has_rules { self.filtered } else { self.total };

        match kind {
            "count" => Ok(count_rows(matching)),
            "data" => {
                let for_download = spec["forDownload"].as_bool().unwrap_or(false);
                if for_download {
                    return Ok(int_rows(matching as usize));
                }
                let per_page = spec["perPage"].as_u64().unwrap_or(0);
                let page = spec["page"].as_u64().unwrap_or(1).max(1);
                let offset = (page - 1) * per_page;
                let displayed = matching.saturating_sub(offset).min(per_page);
                Ok(int_rows(displayed as usize))
            }
            other => Err(EngineError::Statement(other.to_string())),
        }
    }
}

/// Everything the controller told the view, in order
#[derive(Debug, Clone, PartialEq)]
pub enum ViewEvent {
    Loaded(u64),
    Replaced(u64),
    Counts(u64, u64, bool),
    Loading(bool),
    Error(String),
    Cleared,
}

/// View double recording every call
#[derive(Default)]
pub struct RecordingView {
    pub events: Mutex<Vec<ViewEvent>>,
}

impl RecordingView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<ViewEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn has(&self, event: &ViewEvent) -> bool {
        self.events().contains(event)
    }
}

impl PreviewView for RecordingView {
    fn load(&self, result: &FetchResult) {
        self.events
            .lock()
            .unwrap()
            .push(ViewEvent::Loaded(result.displayed_rows()));
    }

    fn replace(&self, result: &FetchResult) {
        self.events
            .lock()
            .unwrap()
            .push(ViewEvent::Replaced(result.displayed_rows()));
    }

    fn set_counts(&self, displayed: u64, matching: u64, truncated: bool) {
        self.events
            .lock()
            .unwrap()
            .push(ViewEvent::Counts(displayed, matching, truncated));
    }

    fn set_loading(&self, loading: bool) {
        self.events.lock().unwrap().push(ViewEvent::Loading(loading));
    }

    fn set_error(&self, message: &str) {
        self.events
            .lock()
            .unwrap()
            .push(ViewEvent::Error(message.to_string()));
    }

    fn clear(&self) {
        self.events.lock().unwrap().push(ViewEvent::Cleared);
    }
}

/// File saver capturing bytes in memory
#[derive(Default)]
pub struct MemorySaver {
    pub saved: Mutex<Vec<(String, Vec<u8>)>>,
}

impl MemorySaver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn saved_files(&self) -> Vec<(String, Vec<u8>)> {
        self.saved.lock().unwrap().clone()
    }
}

impl FileSaver for MemorySaver {
    fn save(&self, filename: &str, bytes: &[u8]) -> ExportResult<()> {
        self.saved
            .lock()
            .unwrap()
            .push((filename.to_string(), bytes.to_vec()));
        Ok(())
    }
}
