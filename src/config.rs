//! Orchestrator configuration
//!
//! One configuration object constructed at preview start and shared by
//! reference with every component. Defaults match the production deployment;
//! everything is overridable for tests.

use serde::Deserialize;
use thiserror::Error;

/// Default preview page size (rows per sample query).
pub const DEFAULT_PREVIEW_PAGE_SIZE: usize = 10_000;

/// Default page size for paged CSV export.
pub const DEFAULT_EXPORT_PAGE_SIZE: usize = 1_000_000;

/// Default quiet period before a burst of filter edits triggers a re-fetch.
pub const DEFAULT_DEBOUNCE_WINDOW_MS: u64 = 300;

/// Default timeout for compiler and dataset HTTP requests.
pub const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 30_000;

/// Result type for configuration validation
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Configuration errors
#[derive(Debug, Clone, Error)]
pub enum ConfigError {
    /// A required field is empty
    #[error("missing configuration value: {0}")]
    Missing(&'static str),

    /// A numeric field has an unusable value
    #[error("invalid configuration value: {0}")]
    Invalid(&'static str),
}

/// Configuration for the query orchestrator
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OrchestratorConfig {
    /// Query-compilation endpoint URL
    pub compiler_url: String,

    /// Base URL that dataset names are resolved against
    pub dataset_base_url: String,

    /// Rows per preview page
    pub page_size: usize,

    /// Rows per export page
    pub export_page_size: usize,

    /// Debounce quiet period in milliseconds
    pub debounce_window_ms: u64,

    /// HTTP request timeout in milliseconds
    pub request_timeout_ms: u64,
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            compiler_url: "http://localhost:5000/api/duckdb".to_string(),
            dataset_base_url: "https://s3.us-west-2.amazonaws.com/pudl.catalyst.coop/stable/"
                .to_string(),
            page_size: DEFAULT_PREVIEW_PAGE_SIZE,
            export_page_size: DEFAULT_EXPORT_PAGE_SIZE,
            debounce_window_ms: DEFAULT_DEBOUNCE_WINDOW_MS,
            request_timeout_ms: DEFAULT_REQUEST_TIMEOUT_MS,
        }
    }
}

impl OrchestratorConfig {
    /// Checks that the configuration is usable
    pub fn validate(&self) -> ConfigResult<()> {
        if self.compiler_url.is_empty() {
            return Err(ConfigError::Missing("compiler_url"));
        }
        if self.dataset_base_url.is_empty() {
            return Err(ConfigError::Missing("dataset_base_url"));
        }
        if self.page_size == 0 {
            return Err(ConfigError::Invalid("page_size must be nonzero"));
        }
        if self.export_page_size == 0 {
            return Err(ConfigError::Invalid("export_page_size must be nonzero"));
        }
        if self.request_timeout_ms == 0 {
            return Err(ConfigError::Invalid("request_timeout_ms must be nonzero"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = OrchestratorConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.page_size, 10_000);
        assert_eq!(config.debounce_window_ms, 300);
    }

    #[test]
    fn test_empty_compiler_url_rejected() {
        let config = OrchestratorConfig {
            compiler_url: String::new(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_page_size_rejected() {
        let config = OrchestratorConfig {
            page_size: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_deserialize_with_partial_fields() {
        let config: OrchestratorConfig =
            serde_json::from_str(r#"{"page_size": 500, "debounce_window_ms": 50}"#).unwrap();
        assert_eq!(config.page_size, 500);
        assert_eq!(config.debounce_window_ms, 50);
        assert_eq!(config.export_page_size, DEFAULT_EXPORT_PAGE_SIZE);
    }
}
