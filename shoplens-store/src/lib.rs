//! SHOPLENS Store - Backend Execution
//!
//! Defines the backend execution seam the pipeline runs queries through,
//! and ships a deterministic synthetic fixture for development and testing.
//! The pipeline is agnostic to which backing sits behind the trait.

use async_trait::async_trait;
use shoplens_core::{Intent, ResultSet, ShoplensResult};

mod synthetic;

pub use synthetic::SyntheticStore;

/// Trait for query-execution backends.
/// Implementations must be thread-safe (Send + Sync).
///
/// Execution is a single-shot asynchronous call with no retry or backoff in
/// the core; resilience belongs to the backing implementation.
#[async_trait]
pub trait StoreBackend: Send + Sync {
    /// Execute a validated query.
    ///
    /// # Arguments
    /// * `query` - The generated StoreQL text
    /// * `intent` - The classified intent, for backends that route on it
    ///
    /// # Returns
    /// * `Ok(ResultSet)` - Typed result rows (possibly empty)
    /// * `Err(ShoplensError::Pipeline)` - If the backend is unreachable or
    ///   erroring
    async fn execute(&self, query: &str, intent: &Intent) -> ShoplensResult<ResultSet>;
}
