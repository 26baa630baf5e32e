//! Authentication flows: register, login, refresh, logout.

use std::sync::Arc;

use tracing::{debug, info};

use crate::domain::entities::token::TokenPair;
use crate::domain::entities::user::User;
use crate::errors::{AuthError, DomainError, DomainResult, TokenError};
use crate::repositories::{RoleRepository, TokenRepository, UserRepository};
use crate::services::credential::CredentialVerifier;
use crate::services::token::TokenService;

/// Minimum accepted password length
const MIN_PASSWORD_LENGTH: usize = 6;

/// Registration input
#[derive(Debug, Clone)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub full_name: String,
    pub password: String,
}

/// Orchestrates the authentication flows over the credential verifier
/// and the token service
pub struct AuthService<U, R, T>
where
    U: UserRepository,
    R: RoleRepository,
    T: TokenRepository,
{
    user_repository: Arc<U>,
    credential_verifier: CredentialVerifier<U>,
    token_service: Arc<TokenService<T, R>>,
}

impl<U, R, T> AuthService<U, R, T>
where
    U: UserRepository,
    R: RoleRepository,
    T: TokenRepository,
{
    pub fn new(user_repository: Arc<U>, token_service: Arc<TokenService<T, R>>) -> Self {
        let credential_verifier = CredentialVerifier::new(user_repository.clone());
        Self {
            user_repository,
            credential_verifier,
            token_service,
        }
    }

    /// Register a new account and issue its first credential pair
    ///
    /// Fails with `DuplicateUsername` when the name is taken and
    /// `WeakPassword` when the password misses the policy; both are
    /// client errors, not authentication failures.
    pub async fn register(&self, request: RegisterRequest) -> DomainResult<TokenPair> {
        if request.password.len() < MIN_PASSWORD_LENGTH {
            return Err(AuthError::WeakPassword.into());
        }

        if self
            .user_repository
            .exists_by_username(&request.username)
            .await?
        {
            return Err(AuthError::DuplicateUsername.into());
        }

        let password_hash = bcrypt::hash(&request.password, bcrypt::DEFAULT_COST)
            .map_err(|e| DomainError::Internal {
                message: format!("Password hashing failed: {}", e),
            })?;

        let user = User::new(
            request.username,
            request.email,
            password_hash,
            request.full_name,
        );
        let user = self.user_repository.create(user).await?;

        info!(user_id = %user.id, "registered new user");
        self.token_service.issue_for(&user).await
    }

    /// Verify credentials and issue a credential pair
    pub async fn login(&self, username: &str, password: &str) -> DomainResult<TokenPair> {
        let user = self.credential_verifier.verify(username, password).await?;

        debug!(user_id = %user.id, "login succeeded");
        self.token_service.issue_for(&user).await
    }

    /// Exchange a refresh token for a fresh credential pair
    ///
    /// The presented token is claimed (revoked) before the new pair is
    /// issued, so a replayed token fails with `TokenRevoked` and a
    /// rotation race has exactly one winner.
    pub async fn refresh(&self, refresh_token: &str) -> DomainResult<TokenPair> {
        let user_id = self.token_service.rotate(refresh_token).await?;

        // The owner row can be gone if the user was deleted after the
        // token was issued; treat that as an unknown token.
        let user = self
            .user_repository
            .find_by_id(user_id)
            .await?
            .ok_or(DomainError::Token(TokenError::TokenNotFound))?;

        self.token_service.issue_for(&user).await
    }

    /// Revoke the presented refresh token, and optionally every other
    /// token of its owner
    ///
    /// Always succeeds for well-formed input: unknown and
    /// already-revoked tokens are a silent no-op, so logout cannot be
    /// used to probe token existence. `all_devices` resolves the owner
    /// from the stored row whatever its state: an expired or
    /// already-rotated token still identifies the account to clear,
    /// which is the compromise case this path exists for. Only an
    /// unknown token falls back to the single-token no-op.
    pub async fn logout(&self, refresh_token: &str, all_devices: bool) -> DomainResult<()> {
        if all_devices {
            if let Some(token) = self.token_service.find_refresh_token(refresh_token).await? {
                let revoked = self.token_service.revoke_all_for_user(token.user_id).await?;
                debug!(user_id = %token.user_id, revoked, "revoked all user sessions");
                return Ok(());
            }
        }

        self.token_service.revoke(refresh_token).await
    }
}
