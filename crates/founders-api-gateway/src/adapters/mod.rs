//! Adapters for the founders gateway.
//!
//! Store implementations, SQL rendering and conversions from infrastructure
//! error types.

pub mod error_conversions;
pub mod memory;
pub mod postgres;
pub mod sql;

pub use memory::InMemoryFounderStore;
pub use postgres::PgFounderStore;
pub use sql::{distinct_statement, listing_statement, SqlStatement};
