use std::path::PathBuf;

use crate::auth::JwtConfig;
use crate::services::dolar::COTIZACION_FALLBACK;

/// Server configuration
///
/// Every item can be overridden through environment variables:
///
/// | variable | default | meaning |
/// |----------|---------|---------|
/// | WORK_DIR | ./data | working directory (database, logs) |
/// | HTTP_PORT | 3000 | HTTP API port |
/// | ENVIRONMENT | development | development \| production |
/// | ADMIN_PASSWORD | - | operator login password (required in production) |
/// | DOLAR_API_URL | dolarapi.com blue | currency quote feed |
/// | N8N_WEBHOOK_URL | - | reservation webhook (optional) |
#[derive(Debug, Clone)]
pub struct Config {
    /// Working directory for database and log files
    pub work_dir: String,
    /// HTTP API port
    pub http_port: u16,
    /// development | production
    pub environment: String,
    /// Operator login password
    pub admin_password: String,
    /// JWT configuration
    pub jwt: JwtConfig,
    /// Currency quote feed URL
    pub dolar_api_url: String,
    /// Rate used when the feed is unreachable
    pub dolar_fallback: f64,
    /// Webhook notified on reservation creation, if configured
    pub webhook_url: Option<String>,
}

impl Config {
    /// Load configuration from environment variables, with defaults
    pub fn from_env() -> Self {
        Self {
            work_dir: std::env::var("WORK_DIR").unwrap_or_else(|_| "./data".into()),
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            admin_password: std::env::var("ADMIN_PASSWORD").unwrap_or_else(|_| {
                tracing::warn!("ADMIN_PASSWORD not set, using the development default");
                "manzanos".into()
            }),
            jwt: JwtConfig::default(),
            dolar_api_url: std::env::var("DOLAR_API_URL")
                .unwrap_or_else(|_| "https://dolarapi.com/v1/dolares/blue".into()),
            dolar_fallback: std::env::var("DOLAR_FALLBACK")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(COTIZACION_FALLBACK),
            webhook_url: std::env::var("N8N_WEBHOOK_URL").ok().filter(|s| !s.is_empty()),
        }
    }

    /// Override work dir and port, commonly used by tests
    pub fn with_overrides(work_dir: impl Into<String>, http_port: u16) -> Self {
        let mut config = Self::from_env();
        config.work_dir = work_dir.into();
        config.http_port = http_port;
        config
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    pub fn database_dir(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join("database")
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
