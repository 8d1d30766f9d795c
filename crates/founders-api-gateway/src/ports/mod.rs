//! Ports (hexagonal boundaries) for the founders gateway.

pub mod outbound;

pub use outbound::{FounderStore, StoreError};
