//! CORS layer built from gateway configuration.
//!
//! The dashboard is a public read-only consumer, so the default allows any
//! origin, method and header. Deployments can narrow each list.

use crate::domain::config::CorsConfig;
use axum::http::{HeaderName, HeaderValue, Method};
use std::time::Duration;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, Any, CorsLayer};

/// Create CORS layer from gateway config
pub fn create_cors_layer(config: &CorsConfig) -> CorsLayer {
    if !config.enabled {
        // No CORS headers at all; browsers fall back to same-origin.
        return CorsLayer::new();
    }

    CorsLayer::new()
        .allow_origin(origins(&config.allowed_origins))
        .allow_methods(methods(&config.allowed_methods))
        .allow_headers(headers(&config.allowed_headers))
        .max_age(Duration::from_secs(config.max_age))
}

fn is_wildcard(values: &[String]) -> bool {
    values.iter().any(|v| v == "*")
}

fn origins(values: &[String]) -> AllowOrigin {
    if is_wildcard(values) {
        return Any.into();
    }
    let origins: Vec<HeaderValue> = values.iter().filter_map(|o| o.parse().ok()).collect();
    origins.into()
}

fn methods(values: &[String]) -> AllowMethods {
    if is_wildcard(values) {
        return Any.into();
    }
    let methods: Vec<Method> = values.iter().filter_map(|m| m.parse().ok()).collect();
    methods.into()
}

fn headers(values: &[String]) -> AllowHeaders {
    if is_wildcard(values) {
        return Any.into();
    }
    let headers: Vec<HeaderName> = values.iter().filter_map(|h| h.parse().ok()).collect();
    headers.into()
}
