//! Result fetcher
//!
//! Executes a query plan's sample and count statements concurrently against
//! the engine session and returns rows plus the exact match count. Partial
//! results are never exposed: both statements must complete first.

mod errors;
mod fetcher;
mod result;

pub use errors::{FetchError, FetcherResult};
pub use fetcher::ResultFetcher;
pub use result::FetchResult;
