//! Founders API
//!
//! Serves the founders dashboard queries over HTTP, backed by PostgreSQL.

use anyhow::{Context, Result};
use clap::Parser;
use founders_api_gateway::{FoundersGateway, GatewayConfig, GatewayError, PgFounderStore};
use std::net::IpAddr;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "founders-api")]
#[command(about = "Founders API - read-only founder listings for the dashboard")]
struct Args {
    /// PostgreSQL connection URL
    #[arg(long, env = "DATABASE_URL")]
    database_url: String,

    /// Shared secret expected in the x-api-key header
    #[arg(long, env = "API_KEY", hide_env_values = true)]
    api_key: String,

    /// Bind address
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    host: IpAddr,

    /// HTTP port
    #[arg(long, env = "PORT", default_value = "8000")]
    port: u16,

    /// Upper bound on pooled database connections
    #[arg(long, env = "DB_MAX_CONNECTIONS", default_value = "10")]
    db_max_connections: u32,

    /// Database connections kept open while idle
    #[arg(long, env = "DB_MIN_CONNECTIONS", default_value = "1")]
    db_min_connections: u32,

    /// Seconds a request waits for a free connection
    #[arg(long, env = "DB_ACQUIRE_TIMEOUT_SECS", default_value = "5")]
    db_acquire_timeout_secs: u64,

    /// Comma-separated allowed CORS origins ("*" for all)
    #[arg(long, env = "CORS_ALLOWED_ORIGINS", value_delimiter = ',', default_value = "*")]
    cors_allowed_origins: Vec<String>,

    /// Max characters in any single query parameter
    #[arg(long, env = "MAX_PARAM_LENGTH", default_value = "256")]
    max_param_length: usize,

    /// Log level, used when RUST_LOG is unset
    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    log_level: String,

    /// Emit logs as JSON lines
    #[arg(long, env = "LOG_JSON")]
    log_json: bool,
}

impl Args {
    fn into_config(self) -> GatewayConfig {
        let mut config = GatewayConfig::default();
        config.http.host = self.host;
        config.http.port = self.port;
        config.database.url = self.database_url;
        config.database.max_connections = self.db_max_connections;
        config.database.min_connections = self.db_min_connections;
        config.database.acquire_timeout = Duration::from_secs(self.db_acquire_timeout_secs);
        config.auth.api_key = Some(self.api_key);
        config.cors.allowed_origins = self
            .cors_allowed_origins
            .into_iter()
            .map(|o| o.trim().to_string())
            .filter(|o| !o.is_empty())
            .collect();
        config.limits.max_param_length = self.max_param_length;
        config
    }
}

fn init_tracing(log_level: &str, json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
    let builder = tracing_subscriber::fmt().with_env_filter(filter).with_target(false);

    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

/// Resolves on Ctrl+C. Never resolves if the handler cannot be installed.
async fn ctrl_c() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "Could not listen for Ctrl+C");
        std::future::pending::<()>().await;
    }
}

/// Resolves on Ctrl+C, or SIGTERM on unix.
async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                tokio::select! {
                    _ = ctrl_c() => {}
                    _ = sigterm.recv() => {}
                }
            }
            Err(e) => {
                warn!(error = %e, "Could not register SIGTERM handler");
                ctrl_c().await;
            }
        }
    }
    #[cfg(not(unix))]
    {
        ctrl_c().await;
    }

    info!("Shutdown signal received");
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env if present
    dotenvy::dotenv().ok();

    let args = Args::parse();
    init_tracing(&args.log_level, args.log_json);

    let config = args.into_config();
    config.validate().context("invalid configuration")?;

    info!("Starting Founders API v{}", founders_api_gateway::VERSION);
    info!("  Listen address: {}", config.http_addr());
    info!("  Max DB connections: {}", config.database.max_connections);

    let store = Arc::new(
        PgFounderStore::connect(&config.database)
            .await
            .map_err(|e| GatewayError::Database(e.to_string()))?,
    );

    let gateway = FoundersGateway::new(config, store.clone())?;
    let result = gateway.serve(shutdown_signal()).await;

    store.close().await;
    result?;

    info!("Founders API shut down cleanly");
    Ok(())
}
