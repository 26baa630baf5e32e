//! Token repository trait defining the interface for refresh token
//! persistence.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::token::RefreshToken;
use crate::errors::DomainError;

/// Repository trait for RefreshToken entity persistence operations
///
/// Tokens are stored hashed; every method takes the SHA-256 digest,
/// never the raw opaque value. `revoke_active` is the single
/// serialization point for rotation: it must be an atomic
/// compare-and-set on the revoked flag so two concurrent rotations of
/// the same token cannot both succeed.
#[async_trait]
pub trait TokenRepository: Send + Sync {
    /// Save a new refresh token
    async fn save_refresh_token(&self, token: RefreshToken) -> Result<RefreshToken, DomainError>;

    /// Find a refresh token by its hashed value
    async fn find_refresh_token(
        &self,
        token_hash: &str,
    ) -> Result<Option<RefreshToken>, DomainError>;

    /// Atomically revoke a token that is still marked active
    ///
    /// Returns `true` only for the caller that actually flipped the
    /// flag; `false` when the token is unknown or was already revoked
    /// (including by a concurrent caller). Implementations must make
    /// the check-and-set a single storage operation, e.g.
    /// `UPDATE ... SET is_revoked = TRUE WHERE token_hash = ? AND
    /// is_revoked = FALSE`.
    async fn revoke_active(&self, token_hash: &str) -> Result<bool, DomainError>;

    /// Revoke every active token owned by the user
    ///
    /// Returns the number of tokens revoked.
    async fn revoke_all_user_tokens(&self, user_id: Uuid) -> Result<usize, DomainError>;

    /// Delete all tokens whose expiry is at or before now, regardless
    /// of revoked state
    ///
    /// Returns the number of rows deleted; zero eligible rows is a
    /// no-op, not an error.
    async fn delete_expired_tokens(&self) -> Result<usize, DomainError>;
}

#[cfg(test)]
pub use mock::MockTokenRepository;
