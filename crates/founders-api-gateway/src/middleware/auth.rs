//! Shared-secret authentication middleware.
//!
//! Every protected route requires the configured API key header. A missing
//! or mismatching key is answered with 403 before the handler runs, so no
//! store access happens.

use crate::domain::ApiError;
use crate::middleware::GatewayMetrics;
use axum::{
    body::Body,
    http::{HeaderName, Request},
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use tower::{Layer, Service};
use tracing::{debug, warn};

/// Authentication configuration
#[derive(Clone)]
pub struct AuthSettings {
    /// Expected key
    pub api_key: String,
    /// Header carrying the key
    pub header: HeaderName,
}

/// Authentication layer
#[derive(Clone)]
pub struct AuthLayer {
    settings: Arc<AuthSettings>,
    metrics: Arc<GatewayMetrics>,
}

impl AuthLayer {
    pub fn new(settings: AuthSettings, metrics: Arc<GatewayMetrics>) -> Self {
        Self {
            settings: Arc::new(settings),
            metrics,
        }
    }
}

impl<S> Layer<S> for AuthLayer {
    type Service = AuthService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        AuthService {
            inner,
            settings: Arc::clone(&self.settings),
            metrics: Arc::clone(&self.metrics),
        }
    }
}

/// Authentication service
#[derive(Clone)]
pub struct AuthService<S> {
    inner: S,
    settings: Arc<AuthSettings>,
    metrics: Arc<GatewayMetrics>,
}

impl<S> Service<Request<Body>> for AuthService<S>
where
    S: Service<Request<Body>, Response = Response> + Clone + Send + 'static,
    S::Future: Send,
{
    type Response = Response;
    type Error = S::Error;
    type Future = std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self::Response, Self::Error>> + Send>,
    >;

    fn poll_ready(
        &mut self,
        cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, req: Request<Body>) -> Self::Future {
        let settings = Arc::clone(&self.settings);
        let metrics = Arc::clone(&self.metrics);
        let mut inner = self.inner.clone();

        Box::pin(async move {
            if !check_api_key(&req, &settings) {
                warn!(
                    path = %req.uri().path(),
                    key_present = req.headers().contains_key(&settings.header),
                    "Request rejected - invalid or missing API key"
                );
                metrics.record_auth_rejection();
                return Ok(ApiError::Unauthorized.into_response());
            }

            debug!(path = %req.uri().path(), "API key accepted");
            inner.call(req).await
        })
    }
}

/// Check the API key header against the configured key, byte for byte.
fn check_api_key<B>(req: &Request<B>, settings: &AuthSettings) -> bool {
    req.headers()
        .get(&settings.header)
        .is_some_and(|offered| {
            constant_time_compare(offered.as_bytes(), settings.api_key.as_bytes())
        })
}

/// Constant-time string comparison to prevent timing attacks
///
/// Takes the same time regardless of how many leading bytes match. Lengths
/// are compared in constant time as well.
pub fn constant_time_compare(a: &[u8], b: &[u8]) -> bool {
    use subtle::ConstantTimeEq;

    let max_len = std::cmp::max(a.len(), b.len());

    // Different pad bytes so that a length mismatch can never compare equal
    let mut a_padded = vec![0u8; max_len];
    let mut b_padded = vec![0xFFu8; max_len];

    a_padded[..a.len()].copy_from_slice(a);
    b_padded[..b.len()].copy_from_slice(b);

    let lengths_equal = a.len().ct_eq(&b.len());
    let contents_equal = a_padded.ct_eq(&b_padded);

    (lengths_equal & contents_equal).into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn settings() -> AuthSettings {
        AuthSettings {
            api_key: "test-key-123".to_string(),
            header: HeaderName::from_static("x-api-key"),
        }
    }

    #[test]
    fn test_constant_time_compare() {
        assert!(constant_time_compare(b"secret", b"secret"));
        assert!(!constant_time_compare(b"secret", b"Secret"));
        assert!(!constant_time_compare(b"secret", b"secre"));
        assert!(!constant_time_compare(b"secret", b"secrets"));
        assert!(!constant_time_compare(b"", b"secret"));
    }

    #[test]
    fn test_api_key_header() {
        let req = Request::builder()
            .header("X-API-Key", "test-key-123")
            .body(Body::empty())
            .unwrap();
        assert!(check_api_key(&req, &settings()));

        let wrong = Request::builder()
            .header("x-api-key", "wrong-key")
            .body(Body::empty())
            .unwrap();
        assert!(!check_api_key(&wrong, &settings()));
    }

    #[test]
    fn test_missing_header_rejected() {
        let req = Request::builder().body(Body::empty()).unwrap();
        assert!(!check_api_key(&req, &settings()));
    }

    #[test]
    fn test_bearer_token_not_accepted() {
        let req = Request::builder()
            .header("Authorization", "Bearer test-key-123")
            .body(Body::empty())
            .unwrap();
        assert!(!check_api_key(&req, &settings()));
    }

    #[test]
    fn test_non_ascii_key_compared_as_bytes() {
        let utf8 = AuthSettings {
            api_key: "clé".to_string(),
            ..settings()
        };

        let req = Request::builder()
            .header("x-api-key", HeaderValue::from_bytes("clé".as_bytes()).unwrap())
            .body(Body::empty())
            .unwrap();
        assert!(check_api_key(&req, &utf8));

        // Latin-1 encoding of the same text is different bytes
        let latin1 = Request::builder()
            .header("x-api-key", HeaderValue::from_bytes(b"cl\xe9").unwrap())
            .body(Body::empty())
            .unwrap();
        assert!(!check_api_key(&latin1, &utf8));
    }

    #[test]
    fn test_custom_header_name() {
        let custom = AuthSettings {
            header: HeaderName::from_static("x-dashboard-key"),
            ..settings()
        };
        let req = Request::builder()
            .header("x-dashboard-key", "test-key-123")
            .body(Body::empty())
            .unwrap();
        assert!(check_api_key(&req, &custom));
    }
}
