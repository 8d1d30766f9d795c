//! Gateway configuration with validation.

use serde::{Deserialize, Serialize};
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::Duration;

/// Main gateway configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GatewayConfig {
    /// HTTP server configuration
    pub http: HttpConfig,
    /// Founders store connection pool
    pub database: DatabaseConfig,
    /// Shared-secret authentication
    pub auth: AuthConfig,
    /// CORS configuration
    pub cors: CorsConfig,
    /// Request parameter limits
    pub limits: LimitsConfig,
}

impl GatewayConfig {
    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.database.url.trim().is_empty() {
            return Err(ConfigError::MissingDatabaseUrl);
        }

        match &self.auth.api_key {
            Some(key) if !key.is_empty() => {}
            _ => return Err(ConfigError::MissingApiKey),
        }

        if self.auth.header.trim().is_empty() {
            return Err(ConfigError::Invalid("auth header name cannot be empty".into()));
        }

        if self.database.max_connections == 0 {
            return Err(ConfigError::InvalidPool(
                "max_connections cannot be 0".into(),
            ));
        }

        if self.database.min_connections > self.database.max_connections {
            return Err(ConfigError::InvalidPool(format!(
                "min_connections ({}) exceeds max_connections ({})",
                self.database.min_connections, self.database.max_connections
            )));
        }

        if self.database.acquire_timeout.is_zero() {
            return Err(ConfigError::InvalidPool(
                "acquire_timeout cannot be 0".into(),
            ));
        }

        if self.limits.max_param_length == 0 {
            return Err(ConfigError::InvalidLimit(
                "max_param_length cannot be 0".into(),
            ));
        }

        Ok(())
    }

    /// Get HTTP server bind address
    pub fn http_addr(&self) -> SocketAddr {
        SocketAddr::new(self.http.host, self.http.port)
    }
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Bind address
    pub host: IpAddr,
    /// Port (default: 8000)
    pub port: u16,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::new(0, 0, 0, 0)),
            port: 8000,
        }
    }
}

/// Connection pool configuration for the founders store
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// PostgreSQL connection URL
    pub url: String,
    /// Upper bound on pooled connections
    pub max_connections: u32,
    /// Connections kept open while idle
    pub min_connections: u32,
    /// How long a request waits for a free connection
    #[serde(with = "secs_serde")]
    pub acquire_timeout: Duration,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            max_connections: 10,
            min_connections: 1,
            acquire_timeout: Duration::from_secs(5),
        }
    }
}

/// Shared-secret authentication
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// Expected value of the API key header
    #[serde(skip_serializing)]
    pub api_key: Option<String>,
    /// Header carrying the key
    pub header: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            header: "x-api-key".to_string(),
        }
    }
}

/// CORS configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CorsConfig {
    /// Enable CORS
    pub enabled: bool,
    /// Allowed origins ("*" for all)
    pub allowed_origins: Vec<String>,
    /// Allowed methods ("*" for all)
    pub allowed_methods: Vec<String>,
    /// Allowed headers ("*" for all)
    pub allowed_headers: Vec<String>,
    /// Max age for preflight cache
    pub max_age: u64,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            allowed_origins: vec!["*".to_string()],
            allowed_methods: vec!["*".to_string()],
            allowed_headers: vec!["*".to_string()],
            max_age: 86400, // 24 hours
        }
    }
}

/// Request limits configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LimitsConfig {
    /// Max characters in any single query parameter
    pub max_param_length: usize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_param_length: 256,
        }
    }
}

/// Configuration errors
#[derive(Debug, Clone, thiserror::Error)]
pub enum ConfigError {
    #[error("database url is not configured")]
    MissingDatabaseUrl,
    #[error("api key is not configured")]
    MissingApiKey,
    #[error("invalid pool settings: {0}")]
    InvalidPool(String),
    #[error("invalid limit: {0}")]
    InvalidLimit(String),
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Duration as whole seconds ("5s" or 5)
mod secs_serde {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&format!("{}s", duration.as_secs()))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Secs(u64),
            Text(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Secs(secs) => Ok(Duration::from_secs(secs)),
            Raw::Text(s) => {
                let s = s.trim();
                s.strip_suffix('s')
                    .unwrap_or(s)
                    .trim()
                    .parse::<u64>()
                    .map(Duration::from_secs)
                    .map_err(|_| serde::de::Error::custom("invalid duration format"))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_config() -> GatewayConfig {
        let mut config = GatewayConfig::default();
        config.database.url = "postgres://localhost/founders".into();
        config.auth.api_key = Some("secret".into());
        config
    }

    #[test]
    fn test_default_config_requires_secrets() {
        let config = GatewayConfig::default();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::MissingDatabaseUrl)
        ));
        assert_eq!(config.http.port, 8000);
        assert_eq!(config.auth.header, "x-api-key");
    }

    #[test]
    fn test_valid_config() {
        assert!(valid_config().validate().is_ok());
    }

    #[test]
    fn test_empty_api_key_rejected() {
        let mut config = valid_config();
        config.auth.api_key = Some(String::new());
        assert!(matches!(config.validate(), Err(ConfigError::MissingApiKey)));

        config.auth.api_key = None;
        assert!(matches!(config.validate(), Err(ConfigError::MissingApiKey)));
    }

    #[test]
    fn test_pool_validation() {
        let mut config = valid_config();
        config.database.min_connections = 20;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidPool(_))
        ));

        let mut config = valid_config();
        config.database.max_connections = 0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidPool(_))
        ));
    }

    #[test]
    fn test_deserialize_partial_config() {
        let config: GatewayConfig = serde_json::from_value(serde_json::json!({
            "http": { "port": 9000 },
            "database": { "url": "postgres://db/founders", "acquire_timeout": "3s" },
            "auth": { "api_key": "k" }
        }))
        .unwrap();

        assert_eq!(config.http_addr().port(), 9000);
        assert_eq!(config.database.acquire_timeout, Duration::from_secs(3));
        assert_eq!(config.database.max_connections, 10);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_api_key_not_serialized() {
        let json = serde_json::to_value(valid_config()).unwrap();
        assert!(json["auth"].get("api_key").is_none());
    }
}
