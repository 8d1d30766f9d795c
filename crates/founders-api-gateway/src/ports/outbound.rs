//! Outbound ports for the founders gateway.

use crate::domain::{FilterField, FounderRecord, ListingQuery};
use async_trait::async_trait;

/// Store failures. Every variant surfaces to clients as a generic 500.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("store unavailable: {0}")]
    Unavailable(String),
    #[error("query failed: {0}")]
    Query(String),
}

/// Read access to the founders table.
///
/// Implementations return at most one record per `name` (the one with the
/// highest `id` among rows matching the query), ordered by name.
#[async_trait]
pub trait FounderStore: Send + Sync {
    /// Run a listing query.
    async fn list(&self, query: &ListingQuery) -> Result<Vec<FounderRecord>, StoreError>;

    /// Distinct non-blank values of a column, sorted ascending.
    async fn distinct_values(&self, field: FilterField) -> Result<Vec<String>, StoreError>;

    /// Cheap reachability check for readiness probes.
    async fn ping(&self) -> Result<(), StoreError>;
}
