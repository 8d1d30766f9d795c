//! Founders gateway service: HTTP routes, handlers and server lifecycle.

use crate::domain::config::{GatewayConfig, LimitsConfig};
use crate::domain::error::{ApiError, ApiResult, GatewayError};
use crate::domain::{FilterField, FounderRecord, ListingQuery, RecommendedParams, SearchParams};
use crate::middleware::{create_cors_layer, AuthLayer, AuthSettings, GatewayMetrics, TracingLayer};
use crate::ports::FounderStore;
use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::{HeaderName, StatusCode},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::sync::Arc;
use tower::ServiceBuilder;
use tracing::{info, warn};

/// Founders gateway service
pub struct FoundersGateway {
    config: GatewayConfig,
    store: Arc<dyn FounderStore>,
    metrics: Arc<GatewayMetrics>,
}

impl FoundersGateway {
    /// Create the gateway over an already opened store
    pub fn new(config: GatewayConfig, store: Arc<dyn FounderStore>) -> Result<Self, GatewayError> {
        config
            .validate()
            .map_err(|e| GatewayError::Config(e.to_string()))?;

        Ok(Self {
            config,
            store,
            metrics: Arc::new(GatewayMetrics::new()),
        })
    }

    /// Get metrics
    pub fn metrics(&self) -> Arc<GatewayMetrics> {
        Arc::clone(&self.metrics)
    }

    /// Build the HTTP router with its middleware stack
    pub fn router(&self) -> Result<Router, GatewayError> {
        let api_key = self
            .config
            .auth
            .api_key
            .clone()
            .ok_or_else(|| GatewayError::Config("api key is not configured".into()))?;
        let header = HeaderName::try_from(self.config.auth.header.as_str())
            .map_err(|e| GatewayError::Config(format!("invalid auth header name: {e}")))?;

        let state = AppState {
            store: Arc::clone(&self.store),
            metrics: Arc::clone(&self.metrics),
            limits: self.config.limits.clone(),
        };

        let protected = Router::new()
            .route("/recommended-founders", get(recommended_founders))
            .route("/unseen-founders", get(unseen_founders))
            .route("/filters", get(filter_options))
            .route("/search", get(search_founders))
            .route_layer(AuthLayer::new(
                AuthSettings { api_key, header },
                Arc::clone(&self.metrics),
            ));

        let public = Router::new()
            .route("/health", get(health_check))
            .route("/ready", get(readiness_check))
            .route("/metrics", get(metrics_snapshot));

        let middleware = ServiceBuilder::new()
            .layer(create_cors_layer(&self.config.cors))
            .layer(TracingLayer::new(Arc::clone(&self.metrics)));

        Ok(Router::new()
            .merge(protected)
            .merge(public)
            .layer(middleware)
            .with_state(state))
    }

    /// Serve until `shutdown` resolves, then let in-flight requests finish.
    pub async fn serve<F>(&self, shutdown: F) -> Result<(), GatewayError>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let router = self.router()?;
        let addr = self.config.http_addr();

        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|e| GatewayError::Bind(format!("{addr}: {e}")))?;

        info!(addr = %addr, "Founders API listening");

        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown)
            .await
            .map_err(|e| GatewayError::Server(e.to_string()))?;

        info!("Founders API stopped");
        Ok(())
    }
}

/// Application state shared across handlers
#[derive(Clone)]
struct AppState {
    store: Arc<dyn FounderStore>,
    metrics: Arc<GatewayMetrics>,
    limits: LimitsConfig,
}

/// `{"data": [...]}` envelope of the listing endpoints
#[derive(Debug, Serialize, Deserialize)]
pub struct DataResponse {
    pub data: Vec<FounderRecord>,
}

/// Body of `/filters`
#[derive(Debug, Serialize, Deserialize)]
pub struct FilterOptions {
    pub locations: Vec<String>,
    pub tree_paths: Vec<String>,
}

async fn run_listing(state: &AppState, query: ListingQuery) -> ApiResult<Json<DataResponse>> {
    let data = state.store.list(&query).await?;
    Ok(Json(DataResponse { data }))
}

/// Decoded query string pairs, in order of appearance.
type QueryPairs = Result<Query<Vec<(String, String)>>, QueryRejection>;

fn query_pairs(query: QueryPairs) -> ApiResult<Vec<(String, String)>> {
    query
        .map(|Query(pairs)| pairs)
        .map_err(|e| ApiError::invalid_params(e.body_text()))
}

async fn recommended_founders(
    State(state): State<AppState>,
    query: QueryPairs,
) -> ApiResult<Json<DataResponse>> {
    let params = RecommendedParams::from_pairs(query_pairs(query)?);
    let query = params.into_query(state.limits.max_param_length)?;
    run_listing(&state, query).await
}

async fn unseen_founders(State(state): State<AppState>) -> ApiResult<Json<DataResponse>> {
    run_listing(&state, ListingQuery::Unseen).await
}

async fn search_founders(
    State(state): State<AppState>,
    query: QueryPairs,
) -> ApiResult<Json<DataResponse>> {
    let params = SearchParams::from_pairs(query_pairs(query)?);
    let query = params.into_query(state.limits.max_param_length)?;
    run_listing(&state, query).await
}

async fn filter_options(State(state): State<AppState>) -> ApiResult<Json<FilterOptions>> {
    let (locations, tree_paths) = tokio::try_join!(
        state.store.distinct_values(FilterField::Location),
        state.store.distinct_values(FilterField::TreePath),
    )?;

    Ok(Json(FilterOptions {
        locations,
        tree_paths,
    }))
}

async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "version": crate::VERSION,
    }))
}

async fn readiness_check(State(state): State<AppState>) -> impl IntoResponse {
    match state.store.ping().await {
        Ok(()) => (StatusCode::OK, Json(serde_json::json!({ "status": "ready" }))),
        Err(e) => {
            warn!(error = %e, "Readiness check failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(serde_json::json!({ "status": "unavailable" })),
            )
        }
    }
}

async fn metrics_snapshot(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.metrics.to_json())
}
