//! Middleware stack for the founders gateway.
//!
//! Layer order: Request → CORS → Tracing → Auth (protected routes only) → Handler

pub mod auth;
pub mod cors;
pub mod metrics;
pub mod tracing;

pub use self::auth::{constant_time_compare, AuthLayer, AuthSettings};
pub use self::cors::create_cors_layer;
pub use self::metrics::GatewayMetrics;
pub use self::tracing::TracingLayer;
