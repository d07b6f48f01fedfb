//! Full-result export
//!
//! Reuses the filter translator, compiler client and result fetcher, but
//! bypasses the debounce sequencer and the preview page-size cap.

use std::sync::Arc;

use crate::compiler::QueryCompiler;
use crate::config::OrchestratorConfig;
use crate::engine::EngineSession;
use crate::errors::OrchestratorResult;
use crate::fetcher::ResultFetcher;
use crate::filters::{translate, RawFilter};
use crate::schema::ResultSchema;

use super::csv::write_csv;
use super::saver::FileSaver;

/// What an export produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportSummary {
    /// Saved file names, in page order
    pub files: Vec<String>,

    /// Total data rows written across all files
    pub rows_exported: u64,
}

/// Materializes and saves complete filtered result sets
pub struct ExportPipeline {
    compiler: Arc<dyn QueryCompiler>,
    fetcher: ResultFetcher,
    saver: Arc<dyn FileSaver>,
    page_size: usize,
}

impl ExportPipeline {
    /// Builds a pipeline sharing the preview's session and compiler; the
    /// page size for paged export comes from the configuration
    pub fn new(
        config: &OrchestratorConfig,
        compiler: Arc<dyn QueryCompiler>,
        session: Arc<EngineSession>,
        saver: Arc<dyn FileSaver>,
    ) -> Self {
        Self {
            compiler,
            fetcher: ResultFetcher::new(session),
            saver,
            page_size: config.export_page_size,
        }
    }

    /// Exports the complete filtered result as one file.
    ///
    /// `for_download` tells the compiler to omit the row limit entirely, so
    /// no page-size truncation applies.
    pub async fn export_all(
        &self,
        dataset: &str,
        snapshot: &[RawFilter],
        schema: &ResultSchema,
    ) -> OrchestratorResult<ExportSummary> {
        let spec = translate(dataset, snapshot, schema, 1, self.page_size, true);
        let plan = self.compiler.compile(&spec).await?;
        let result = self.fetcher.fetch(&plan).await?;

        let bytes = write_csv(result.rows())?;
        let filename = format!("{dataset}.csv");
        self.saver.save(&filename, &bytes)?;

        tracing::info!(
            dataset,
            rows = result.displayed_rows(),
            file = %filename,
            "export complete"
        );
        Ok(ExportSummary {
            files: vec![filename],
            rows_exported: result.displayed_rows(),
        })
    }

    /// Exports page by page, one file per page, until every matching row
    /// has been written.
    ///
    /// Pages are 1-based; the loop ends once `page * page_size` covers the
    /// match count. Ordering across pages is best-effort: the backing
    /// dataset may move between page queries.
    pub async fn export_paged(
        &self,
        dataset: &str,
        snapshot: &[RawFilter],
        schema: &ResultSchema,
    ) -> OrchestratorResult<ExportSummary> {
        let mut files = Vec::new();
        let mut rows_exported = 0u64;
        let mut page = 1usize;

        loop {
            let spec = translate(dataset, snapshot, schema, page, self.page_size, false);
            let plan = self.compiler.compile(&spec).await?;
            let result = self.fetcher.fetch(&plan).await?;

            let bytes = write_csv(result.rows())?;
            let filename = format!("{dataset}-{page}.csv");
            self.saver.save(&filename, &bytes)?;

            rows_exported += result.displayed_rows();
            files.push(filename);

            if (page as u64) * (self.page_size as u64) >= result.matching_rows() {
                break;
            }
            page += 1;
        }

        tracing::info!(dataset, rows = rows_exported, pages = files.len(), "paged export complete");
        Ok(ExportSummary {
            files,
            rows_exported,
        })
    }
}
