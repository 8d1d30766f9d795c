//! Domain types for the founders gateway.
//!
//! Configuration, the founder record, typed listing queries and error types.
//! Nothing in here touches the network or the database.

pub mod config;
pub mod error;
pub mod query;
pub mod record;

pub use config::{ConfigError, GatewayConfig};
pub use error::{ApiError, ApiResult, ErrorBody, GatewayError};
pub use query::{
    is_blank, Condition, FilterField, ListingQuery, PathFilter, RecommendedParams, SearchFilters,
    SearchParams, BLANK_CHARS,
};
pub use record::{Column, FounderRecord, FOUNDER_COLUMNS};
