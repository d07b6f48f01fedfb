//! Engine session and the query-engine seam

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::config::OrchestratorConfig;
use crate::filters::FilterValue;

use super::batch::RowBatch;
use super::datafusion::DataFusionEngine;
use super::errors::{EngineResult, RegistrationError};

/// The embedded analytical engine, behind a seam so tests can stub it
#[async_trait]
pub trait QueryEngine: Send + Sync {
    /// Registers a remote columnar file under a logical name.
    ///
    /// Triggers a remote fetch; may be slow or fail transiently.
    async fn register(&self, name: &str, url: &str) -> Result<(), RegistrationError>;

    /// Runs one parameterized statement and returns the columnar result
    async fn run(&self, statement: &str, values: &[FilterValue]) -> EngineResult<RowBatch>;
}

/// One logical engine connection, reusable for the page's lifetime
pub struct EngineSession {
    engine: Arc<dyn QueryEngine>,
    dataset_base_url: String,
    registered: Mutex<HashSet<String>>,
}

impl EngineSession {
    /// Establishes a session backed by the embedded DataFusion engine
    pub fn connect(config: &OrchestratorConfig) -> EngineResult<Self> {
        let engine = DataFusionEngine::new(config)?;
        Ok(Self::with_engine(
            Arc::new(engine),
            &config.dataset_base_url,
        ))
    }

    /// Wraps an arbitrary engine implementation (test seam)
    pub fn with_engine(engine: Arc<dyn QueryEngine>, dataset_base_url: &str) -> Self {
        Self {
            engine,
            dataset_base_url: dataset_base_url.to_string(),
            registered: Mutex::new(HashSet::new()),
        }
    }

    /// Deterministic dataset-name -> remote-file-URL mapping
    pub fn dataset_url(&self, name: &str) -> String {
        format!("{}{}.parquet", self.dataset_base_url, name)
    }

    /// Registers a dataset by name, exactly once per session lifetime.
    ///
    /// A second call with the same name is a no-op: no error, no remote
    /// fetch. The registry lock is held across the registration so two
    /// concurrent calls for the same dataset cannot both hit the network.
    pub async fn register_dataset(&self, name: &str) -> Result<(), RegistrationError> {
        let mut registered = self.registered.lock().await;
        if registered.contains(name) {
            tracing::debug!(dataset = name, "dataset already registered, skipping");
            return Ok(());
        }

        let url = self.dataset_url(name);
        tracing::info!(dataset = name, url = %url, "registering remote dataset");
        self.engine.register(name, &url).await?;
        registered.insert(name.to_string());
        Ok(())
    }

    /// Runs one parameterized query against the engine.
    ///
    /// Queries are independently parameterized; concurrent outstanding
    /// queries (preview plus export) are allowed.
    pub async fn run_query(
        &self,
        statement: &str,
        values: &[FilterValue],
    ) -> EngineResult<RowBatch> {
        self.engine.run(statement, values).await
    }
}

impl std::fmt::Debug for EngineSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EngineSession")
            .field("dataset_base_url", &self.dataset_base_url)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::EngineError;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingEngine {
        register_calls: AtomicUsize,
        fail_registration: bool,
    }

    impl CountingEngine {
        fn new(fail_registration: bool) -> Self {
            Self {
                register_calls: AtomicUsize::new(0),
                fail_registration,
            }
        }
    }

    #[async_trait]
    impl QueryEngine for CountingEngine {
        async fn register(&self, _name: &str, _url: &str) -> Result<(), RegistrationError> {
            self.register_calls.fetch_add(1, Ordering::SeqCst);
            if self.fail_registration {
                return Err(RegistrationError::RemoteFetch("503".to_string()));
            }
            Ok(())
        }

        async fn run(&self, _statement: &str, _values: &[FilterValue]) -> EngineResult<RowBatch> {
            Err(EngineError::Execution("not implemented".to_string()))
        }
    }

    #[tokio::test]
    async fn test_registration_is_idempotent() {
        let engine = Arc::new(CountingEngine::new(false));
        let session = EngineSession::with_engine(Arc::clone(&engine) as _, "https://x.test/");

        session.register_dataset("orders").await.unwrap();
        session.register_dataset("orders").await.unwrap();
        session.register_dataset("orders").await.unwrap();

        assert_eq!(engine.register_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_distinct_datasets_register_separately() {
        let engine = Arc::new(CountingEngine::new(false));
        let session = EngineSession::with_engine(Arc::clone(&engine) as _, "https://x.test/");

        session.register_dataset("orders").await.unwrap();
        session.register_dataset("plants").await.unwrap();

        assert_eq!(engine.register_calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_failed_registration_can_be_retried() {
        let engine = Arc::new(CountingEngine::new(true));
        let session = EngineSession::with_engine(Arc::clone(&engine) as _, "https://x.test/");

        assert!(session.register_dataset("orders").await.is_err());
        // the name was not recorded, so a retry reaches the engine again
        assert!(session.register_dataset("orders").await.is_err());
        assert_eq!(engine.register_calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_dataset_url_mapping() {
        let engine = Arc::new(CountingEngine::new(false));
        let session =
            EngineSession::with_engine(engine as _, "https://s3.example.com/stable/");
        assert_eq!(
            session.dataset_url("out_ferc714__summarized_demand"),
            "https://s3.example.com/stable/out_ferc714__summarized_demand.parquet"
        );
    }
}
