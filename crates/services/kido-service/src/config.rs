//! Kid-O service configuration.

use std::env;

use common::{DatabaseConfig, ServiceConfig};

/// Kid-O service configuration.
#[derive(Debug, Clone, Default)]
pub struct KidoServiceConfig {
    pub service: ServiceConfig,
    pub database: DatabaseConfig,
}

impl KidoServiceConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            service: ServiceConfig {
                service_name: defaults.service.service_name,
                log_level: env::var("KIDO_LOG_LEVEL").unwrap_or(defaults.service.log_level),
            },
            database: DatabaseConfig {
                url: env::var("KIDO_DATABASE_URL")
                    .or_else(|_| env::var("DATABASE_URL"))
                    .unwrap_or(defaults.database.url),
                max_connections: env::var("KIDO_DB_MAX_CONNECTIONS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(defaults.database.max_connections),
                min_connections: env::var("KIDO_DB_MIN_CONNECTIONS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(defaults.database.min_connections),
            },
        }
    }
}
