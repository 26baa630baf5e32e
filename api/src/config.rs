//! Environment-driven application configuration.

use std::env;

use anyhow::{anyhow, Context, Result};

use cantina_core::services::{TokenCleanupConfig, TokenConfig};
use cantina_infra::DatabaseConfig;

/// Everything the binary needs to start, resolved from the environment
/// once at boot
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub server_host: String,
    pub server_port: u16,
    pub database: DatabaseConfig,
    pub token: TokenConfig,
    pub cleanup: TokenCleanupConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// `JWT_SECRET`, `JWT_ISSUER`, `JWT_AUDIENCE` and `DATABASE_URL`
    /// are required; startup aborts rather than running with a guessed
    /// signing identity. Host, port, lifetimes and the cleanup
    /// interval have defaults.
    pub fn from_env() -> Result<Self> {
        let server_host = env::var("SERVER_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let server_port = env::var("SERVER_PORT")
            .unwrap_or_else(|_| "8080".to_string())
            .parse::<u16>()
            .context("SERVER_PORT must be a valid port number")?;

        let database_url =
            env::var("DATABASE_URL").map_err(|_| anyhow!("DATABASE_URL is not set"))?;
        let database = DatabaseConfig {
            url: database_url,
            ..DatabaseConfig::default()
        };

        let mut token = TokenConfig::new(
            env::var("JWT_SECRET").map_err(|_| anyhow!("JWT_SECRET is not set"))?,
            env::var("JWT_ISSUER").map_err(|_| anyhow!("JWT_ISSUER is not set"))?,
            env::var("JWT_AUDIENCE").map_err(|_| anyhow!("JWT_AUDIENCE is not set"))?,
        );
        if let Ok(minutes) = env::var("JWT_ACCESS_EXPIRY_MINUTES") {
            token.access_token_expiry_minutes = minutes
                .parse()
                .context("JWT_ACCESS_EXPIRY_MINUTES must be an integer")?;
        }
        if let Ok(days) = env::var("JWT_REFRESH_EXPIRY_DAYS") {
            token.refresh_token_expiry_days = days
                .parse()
                .context("JWT_REFRESH_EXPIRY_DAYS must be an integer")?;
        }

        let mut cleanup = TokenCleanupConfig::default();
        if let Ok(seconds) = env::var("TOKEN_CLEANUP_INTERVAL_SECONDS") {
            cleanup.interval_seconds = seconds
                .parse()
                .context("TOKEN_CLEANUP_INTERVAL_SECONDS must be an integer")?;
        }
        if let Ok(enabled) = env::var("TOKEN_CLEANUP_ENABLED") {
            cleanup.enabled = enabled
                .parse()
                .context("TOKEN_CLEANUP_ENABLED must be true or false")?;
        }

        Ok(Self {
            server_host,
            server_port,
            database,
            token,
            cleanup,
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}
