//! Configuration management for the auth service backend
//!
//! Configuration is loaded hierarchically:
//! 1. Default values (in code)
//! 2. TOML config files (config/development.toml or config/production.toml)
//! 3. Environment variables (prefix: AUTH__)
//!
//! The signing secret and the database URL have no usable defaults;
//! loading fails at startup when either is missing.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::env;

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub jwt: JwtConfig,
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

/// Token signing configuration
///
/// Only the secret lives here; the token lifetime is a fixed constant in
/// the token service, not an operator knob.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JwtConfig {
    pub secret: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 3000,
            },
            database: DatabaseConfig {
                url: String::new(),
                max_connections: 10,
            },
            jwt: JwtConfig {
                secret: String::new(),
            },
        }
    }
}

impl AppConfig {
    /// Load configuration from files and environment
    ///
    /// Loading order (later sources override earlier):
    /// 1. Default values
    /// 2. Config file based on RUST_ENV (development.toml or production.toml)
    /// 3. Environment variables with AUTH__ prefix
    ///    e.g., AUTH__SERVER__PORT=9000 sets server.port
    pub fn load() -> Result<Self> {
        let env = env::var("RUST_ENV").unwrap_or_else(|_| "development".to_string());
        let config_file = format!("config/{}.toml", env);

        let config = config::Config::builder()
            .add_source(config::Config::try_from(&AppConfig::default())?)
            .add_source(config::File::with_name(&config_file).required(false))
            .add_source(config::Environment::with_prefix("AUTH").separator("__"))
            .build()?;

        let config: AppConfig = config.try_deserialize()?;
        config.validate_required()?;

        Ok(config)
    }

    /// Reject a configuration missing its required values
    ///
    /// Startup is the only caller; a missing secret or database URL is
    /// fatal before any listener binds.
    pub fn validate_required(&self) -> Result<()> {
        if self.jwt.secret.is_empty() {
            anyhow::bail!("Missing required configuration: jwt.secret (AUTH__JWT__SECRET)");
        }
        if self.database.url.is_empty() {
            anyhow::bail!("Missing required configuration: database.url (AUTH__DATABASE__URL)");
        }
        Ok(())
    }

    /// Check if running in production mode
    pub fn is_production() -> bool {
        env::var("RUST_ENV")
            .map(|v| v == "production")
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.database.max_connections, 10);
    }

    #[test]
    fn test_missing_secret_is_rejected() {
        let mut config = AppConfig::default();
        config.database.url = "postgres://localhost/auth".to_string();

        let err = config.validate_required().unwrap_err();
        assert!(err.to_string().contains("jwt.secret"));
    }

    #[test]
    fn test_missing_database_url_is_rejected() {
        let mut config = AppConfig::default();
        config.jwt.secret = "a-secret".to_string();

        let err = config.validate_required().unwrap_err();
        assert!(err.to_string().contains("database.url"));
    }

    #[test]
    fn test_complete_config_is_accepted() {
        let mut config = AppConfig::default();
        config.jwt.secret = "a-secret".to_string();
        config.database.url = "postgres://localhost/auth".to_string();

        assert!(config.validate_required().is_ok());
    }

    #[test]
    fn test_is_production() {
        // Default should be false (development)
        assert!(!AppConfig::is_production());
    }
}
