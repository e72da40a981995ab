use crate::core::{AppError, Result};
use std::env;

pub mod server;

pub use server::ServerConfig;

/// Main application configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub app: AppConfig,
    pub server: ServerConfig,
    pub gateway: GatewayConfig,
    pub deletion: DeletionConfig,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: String,
    pub log_level: String,
}

/// Upstream clinic gateway the delete calls are issued against
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    pub base_url: String,
    /// Per-request timeout for delete calls. Destructive calls get a bounded
    /// timeout and no automatic retry.
    pub delete_timeout_secs: u64,
}

/// Soft-delete behavior
#[derive(Debug, Clone)]
pub struct DeletionConfig {
    /// Grace window between a delete request and the remote delete call,
    /// during which undo is possible.
    pub grace_window_ms: u64,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present
        dotenvy::dotenv().ok();

        let config = Config {
            app: AppConfig {
                env: env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
                log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            },
            server: ServerConfig::from_env()?,
            gateway: GatewayConfig {
                base_url: env::var("GATEWAY_BASE_URL")
                    .unwrap_or_else(|_| "http://localhost:9966/petclinic/api".to_string()),
                delete_timeout_secs: env::var("DELETE_TIMEOUT_SECS")
                    .unwrap_or_else(|_| "10".to_string())
                    .parse()
                    .map_err(|_| {
                        AppError::Configuration("Invalid DELETE_TIMEOUT_SECS".to_string())
                    })?,
            },
            deletion: DeletionConfig {
                grace_window_ms: env::var("GRACE_WINDOW_MS")
                    .unwrap_or_else(|_| "5000".to_string())
                    .parse()
                    .map_err(|_| AppError::Configuration("Invalid GRACE_WINDOW_MS".to_string()))?,
            },
        };

        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.gateway.base_url.trim().is_empty() {
            return Err(AppError::Configuration(
                "GATEWAY_BASE_URL must not be empty".to_string(),
            ));
        }

        if self.gateway.delete_timeout_secs == 0 {
            return Err(AppError::Configuration(
                "Delete timeout must be greater than 0".to_string(),
            ));
        }

        if self.deletion.grace_window_ms == 0 {
            return Err(AppError::Configuration(
                "Grace window must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}
