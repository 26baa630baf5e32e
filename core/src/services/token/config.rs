//! Configuration for the token service

use crate::errors::DomainError;

/// Configuration for the token service
///
/// Built once at startup and injected into `TokenService::new`; no
/// method reads the environment on its own.
#[derive(Debug, Clone)]
pub struct TokenConfig {
    /// HMAC-SHA256 signing secret (256 bits or more recommended)
    pub secret: String,
    /// Issuer claim placed in and required of every access token
    pub issuer: String,
    /// Audience claim placed in and required of every access token
    pub audience: String,
    /// Access token lifetime in minutes
    pub access_token_expiry_minutes: i64,
    /// Refresh token lifetime in days
    pub refresh_token_expiry_days: i64,
}

impl TokenConfig {
    pub fn new(
        secret: impl Into<String>,
        issuer: impl Into<String>,
        audience: impl Into<String>,
    ) -> Self {
        Self {
            secret: secret.into(),
            issuer: issuer.into(),
            audience: audience.into(),
            access_token_expiry_minutes: 15,
            refresh_token_expiry_days: 7,
        }
    }

    /// Reject unusable configuration before any token can be signed
    ///
    /// A missing secret, issuer or audience is a deployment mistake;
    /// failing here keeps it from ever turning into a silently
    /// mis-signed token.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.secret.is_empty() {
            return Err(DomainError::Configuration {
                message: "JWT signing secret is not set".to_string(),
            });
        }
        if self.issuer.is_empty() {
            return Err(DomainError::Configuration {
                message: "JWT issuer is not set".to_string(),
            });
        }
        if self.audience.is_empty() {
            return Err(DomainError::Configuration {
                message: "JWT audience is not set".to_string(),
            });
        }
        if self.access_token_expiry_minutes <= 0 {
            return Err(DomainError::Configuration {
                message: "access token lifetime must be positive".to_string(),
            });
        }
        if self.refresh_token_expiry_days <= 0 {
            return Err(DomainError::Configuration {
                message: "refresh token lifetime must be positive".to_string(),
            });
        }
        Ok(())
    }
}
