//! # Application State
//!
//! Shared state for the Axum application.
//! Contains the lookup service, the report catalog, and configuration.

use check_core::{LookupConfig, LookupService, ReportCatalog, SharedTransactionSource};
use check_paddle::{PaddleClient, PaddleConfig};
use std::sync::Arc;

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Host to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Environment (development, staging, production)
    pub environment: String,
    /// Include the raw upstream transaction in success envelopes
    pub include_raw_data: bool,
}

impl AppConfig {
    /// Load from environment variables
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            host: std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: std::env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),
            include_raw_data: std::env::var("LOOKUP_INCLUDE_RAW_DATA")
                .ok()
                .map(|v| parse_flag(&v))
                .unwrap_or(true),
        }
    }

    /// Get the socket address to bind to
    pub fn socket_addr(&self) -> anyhow::Result<std::net::SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| anyhow::anyhow!("Invalid socket address {}:{}: {}", self.host, self.port, e))
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
            environment: "development".to_string(),
            include_raw_data: true,
        }
    }
}

fn parse_flag(value: &str) -> bool {
    !matches!(
        value.trim().to_lowercase().as_str(),
        "0" | "false" | "no" | "off"
    )
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Transaction lookup
    pub lookup: LookupService,
    /// Report catalog
    pub catalog: Arc<ReportCatalog>,
    /// Application config
    pub config: AppConfig,
}

impl AppState {
    /// Create a new AppState backed by the Paddle API
    pub fn new() -> anyhow::Result<Self> {
        let config = AppConfig::from_env();

        let paddle_config = PaddleConfig::from_env()
            .map_err(|e| anyhow::anyhow!("Failed to load Paddle config: {}", e))?;

        if paddle_config.has_api_key() {
            tracing::info!(
                base_url = %paddle_config.api_base_url,
                sandbox = paddle_config.is_sandbox(),
                "Paddle credential loaded"
            );
        } else {
            tracing::warn!("PADDLE_API_KEY is not set; every lookup will fail until it is");
        }

        let lookup_config = LookupConfig::new(paddle_config.api_key.clone())
            .with_raw_data(config.include_raw_data);

        let client = PaddleClient::new(paddle_config)
            .map_err(|e| anyhow::anyhow!("Failed to initialize Paddle: {}", e))?;

        let catalog = load_report_catalog()?;

        Ok(Self::with_source(config, lookup_config, Arc::new(client), catalog))
    }

    /// Assemble state from explicit parts (tests inject a fake source here)
    pub fn with_source(
        config: AppConfig,
        lookup_config: LookupConfig,
        source: SharedTransactionSource,
        catalog: ReportCatalog,
    ) -> Self {
        Self {
            lookup: LookupService::new(lookup_config, source),
            catalog: Arc::new(catalog),
            config,
        }
    }

    /// Whether lookups have a credential to work with
    pub fn paddle_configured(&self) -> bool {
        self.lookup.config().has_credential()
    }
}

/// Load report catalog from config file
fn load_report_catalog() -> anyhow::Result<ReportCatalog> {
    // Try to load from config/reports.toml
    let config_paths = [
        "config/reports.toml",
        "../config/reports.toml",
        "../../config/reports.toml",
    ];

    for path in config_paths {
        if let Ok(content) = std::fs::read_to_string(path) {
            let catalog = ReportCatalog::from_toml(&content)
                .map_err(|e| anyhow::anyhow!("Failed to parse {}: {}", path, e))?;
            tracing::info!("Loaded {} report offers from {}", catalog.reports.len(), path);
            return Ok(catalog);
        }
    }

    tracing::warn!("No report catalog found, using built-in offers");
    Ok(ReportCatalog::default_catalog())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_socket_addr() {
        let config = AppConfig {
            host: "0.0.0.0".to_string(),
            port: 3000,
            environment: "test".to_string(),
            include_raw_data: true,
        };

        let addr = config.socket_addr().unwrap();
        assert_eq!(addr.to_string(), "0.0.0.0:3000");
    }

    #[test]
    fn test_bad_socket_addr() {
        let config = AppConfig {
            host: "not a host".to_string(),
            ..AppConfig::default()
        };
        assert!(config.socket_addr().is_err());
    }

    #[test]
    fn test_parse_flag() {
        assert!(parse_flag("true"));
        assert!(parse_flag("1"));
        assert!(!parse_flag("false"));
        assert!(!parse_flag(" OFF "));
        assert!(!parse_flag("0"));
    }
}
