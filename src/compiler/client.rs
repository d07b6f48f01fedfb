//! HTTP client for the query-compilation service

use std::time::Duration;

use async_trait::async_trait;

use crate::config::OrchestratorConfig;
use crate::filters::FilterSpec;

use super::errors::{CompilationError, CompilerResult};
use super::plan::QueryPlan;

/// Turns filter specifications into executable query plans
#[async_trait]
pub trait QueryCompiler: Send + Sync {
    /// Compiles one filter specification into a query plan
    async fn compile(&self, spec: &FilterSpec) -> CompilerResult<QueryPlan>;
}

/// Production compiler client talking to the remote endpoint
pub struct HttpQueryCompiler {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpQueryCompiler {
    /// Builds a client from the orchestrator configuration
    pub fn new(config: &OrchestratorConfig) -> CompilerResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.request_timeout_ms))
            .build()
            .map_err(|e| CompilationError::InvalidConfig(e.to_string()))?;
        Ok(Self {
            client,
            endpoint: config.compiler_url.clone(),
        })
    }
}

#[async_trait]
impl QueryCompiler for HttpQueryCompiler {
    async fn compile(&self, spec: &FilterSpec) -> CompilerResult<QueryPlan> {
        tracing::debug!(
            table = %spec.table_name,
            rules = spec.filter_rules.len(),
            page = spec.page,
            for_download = spec.for_download,
            "requesting query plan"
        );

        // FilterSpec serializes with fixed field order, so identical filter
        // states always produce byte-identical request bodies.
        let response = self
            .client
            .post(&self.endpoint)
            .json(spec)
            .send()
            .await
            .map_err(|e| CompilationError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), "compiler rejected filter spec");
            return Err(CompilationError::Status(status.as_u16()));
        }

        response
            .json::<QueryPlan>()
            .await
            .map_err(|e| CompilationError::MalformedResponse(e.to_string()))
    }
}
