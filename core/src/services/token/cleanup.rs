//! Periodic cleanup of expired refresh tokens.

use std::sync::Arc;

use tracing::{error, info, warn};

use crate::errors::DomainError;
use crate::repositories::TokenRepository;

/// Configuration for the token cleanup service
#[derive(Debug, Clone)]
pub struct TokenCleanupConfig {
    /// How often to run cleanup (in seconds)
    pub interval_seconds: u64,
    /// Whether to enable automatic cleanup
    pub enabled: bool,
}

impl Default for TokenCleanupConfig {
    fn default() -> Self {
        Self {
            interval_seconds: 3600, // Run every hour
            enabled: true,
        }
    }
}

/// Service that purges expired refresh tokens
///
/// Deletion races with validation are benign: a token deleted while
/// another request is mid-validation surfaces there as `TokenNotFound`,
/// which is how an expired token looks anyway.
pub struct TokenCleanupService<T: TokenRepository + 'static> {
    repository: Arc<T>,
    config: TokenCleanupConfig,
}

impl<T: TokenRepository> TokenCleanupService<T> {
    pub fn new(repository: Arc<T>, config: TokenCleanupConfig) -> Self {
        Self { repository, config }
    }

    /// Delete every refresh token whose expiry is at or before now,
    /// revoked or not
    ///
    /// Returns the number of rows deleted; running with nothing to
    /// delete is a no-op.
    pub async fn purge_expired(&self) -> Result<usize, DomainError> {
        let deleted = self.repository.delete_expired_tokens().await?;
        if deleted > 0 {
            info!(deleted, "purged expired refresh tokens");
        }
        Ok(deleted)
    }

    /// Start the cleanup loop as a background tokio task
    pub fn start_background_task(self: Arc<Self>) {
        if !self.config.enabled {
            warn!("token cleanup service is disabled");
            return;
        }

        let interval = std::time::Duration::from_secs(self.config.interval_seconds);

        tokio::spawn(async move {
            info!(
                interval_seconds = self.config.interval_seconds,
                "token cleanup service started"
            );

            let mut interval_timer = tokio::time::interval(interval);

            loop {
                interval_timer.tick().await;

                if let Err(e) = self.purge_expired().await {
                    error!("token cleanup cycle failed: {}", e);
                }
            }
        });
    }
}
