#![allow(missing_docs)]

//! Founders API Gateway - read-only HTTP query service over the `founders` table.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                    FOUNDERS API GATEWAY                      │
//! ├──────────────────────────────────────────────────────────────┤
//! │  CORS → Tracing/Metrics → Auth (x-api-key) → Handlers        │
//! │                                                              │
//! │  /recommended-founders  /unseen-founders  /filters  /search  │
//! │  /health  /ready  /metrics (no key)                          │
//! │                         │                                    │
//! │               ┌─────────┴─────────┐                          │
//! │               │   FounderStore    │                          │
//! │               └─────────┬─────────┘                          │
//! │          PgFounderStore │ InMemoryFounderStore               │
//! └─────────────────────────┼────────────────────────────────────┘
//!                           │
//!                     PostgreSQL pool
//! ```
//!
//! Listings return at most one row per founder name: the one with the
//! highest `id` among rows passing the endpoint's filters.
//!
//! # Usage
//!
//! ```ignore
//! use founders_api_gateway::{FoundersGateway, GatewayConfig, PgFounderStore};
//!
//! let store = Arc::new(PgFounderStore::connect(&config.database).await?);
//! let gateway = FoundersGateway::new(config, store.clone())?;
//! gateway.serve(shutdown_signal()).await?;
//! store.close().await;
//! ```

#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod adapters;
pub mod domain;
pub mod middleware;
pub mod ports;
pub mod service;

// Re-exports for public API
pub use adapters::{InMemoryFounderStore, PgFounderStore};
pub use domain::config::GatewayConfig;
pub use domain::error::{ApiError, ApiResult, GatewayError};
pub use domain::{FounderRecord, ListingQuery};
pub use middleware::GatewayMetrics;
pub use ports::{FounderStore, StoreError};
pub use service::FoundersGateway;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
