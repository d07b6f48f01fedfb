//! parqview - interactive preview and CSV export of remote Parquet datasets
//!
//! Orchestrates a browser-style preview loop over an embedded analytical
//! engine: datasets are registered lazily, UI filter state is compiled into
//! parameterized queries by an external service, and paired sample/count
//! queries run concurrently. Rapid filter edits are debounced and stale
//! results are discarded so the display only ever reflects the freshest
//! completed fetch.

pub mod compiler;
pub mod config;
pub mod debounce;
pub mod engine;
pub mod errors;
pub mod export;
pub mod fetcher;
pub mod filters;
pub mod preview;
pub mod schema;
