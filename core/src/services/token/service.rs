//! Main token service implementation

use std::sync::Arc;

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use rand::RngCore;
use sha2::{Digest, Sha256};
use uuid::Uuid;

use crate::domain::entities::token::{Claims, RefreshToken, TokenPair};
use crate::domain::entities::user::User;
use crate::errors::{DomainError, DomainResult, TokenError};
use crate::repositories::{RoleRepository, TokenRepository};

use super::config::TokenConfig;

/// Number of random bytes in an opaque refresh token (256 bits)
const REFRESH_TOKEN_BYTES: usize = 32;

/// Service for issuing signed access tokens and managing the refresh
/// token lifecycle
///
/// Access tokens are HS256 JWTs carrying the role set read from the
/// role store at issuance; they are returned, never persisted, so
/// revoking a session means revoking its refresh token and letting the
/// access token age out. That makes the configured access-token
/// lifetime the trust window during which a compromised access token
/// stays usable after its refresh token was revoked.
pub struct TokenService<T: TokenRepository, R: RoleRepository> {
    token_repository: Arc<T>,
    role_repository: Arc<R>,
    config: TokenConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl<T: TokenRepository, R: RoleRepository> TokenService<T, R> {
    /// Creates a new token service instance
    ///
    /// Fails with `DomainError::Configuration` when the signing
    /// secret, issuer or audience is absent or a lifetime is
    /// non-positive; a misconfigured deployment must never sign a
    /// token.
    pub fn new(
        token_repository: Arc<T>,
        role_repository: Arc<R>,
        config: TokenConfig,
    ) -> Result<Self, DomainError> {
        config.validate()?;

        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());

        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[&config.issuer]);
        validation.set_audience(&[&config.audience]);
        validation.validate_exp = true;
        validation.validate_nbf = true;

        Ok(Self {
            token_repository,
            role_repository,
            config,
            encoding_key,
            decoding_key,
            validation,
        })
    }

    /// Issues a paired access/refresh credential for a user
    ///
    /// Reads the user's role set from the role store at this moment
    /// and embeds it verbatim in the access token, then generates and
    /// persists a fresh refresh token.
    pub async fn issue_for(&self, user: &User) -> DomainResult<TokenPair> {
        let access_token = self.issue_access_token(user).await?;

        let refresh_token = Self::generate_refresh_token();
        let entity = RefreshToken::new(
            user.id,
            Self::hash_token(&refresh_token),
            self.config.refresh_token_expiry_days,
        );
        self.token_repository.save_refresh_token(entity).await?;

        Ok(TokenPair::new(
            access_token,
            refresh_token,
            self.config.access_token_expiry_minutes,
        ))
    }

    /// Signs an access token for the user with their current role set
    pub async fn issue_access_token(&self, user: &User) -> DomainResult<String> {
        let roles = self.role_repository.roles_for_user(user.id).await?;

        let claims = Claims::new_access_token(
            user.id,
            &user.username,
            roles,
            &self.config.issuer,
            &self.config.audience,
            self.config.access_token_expiry_minutes,
        );

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|_| DomainError::Token(TokenError::TokenGenerationFailed))
    }

    /// Verifies an access token signature and claims
    pub fn verify_access_token(&self, token: &str) -> DomainResult<Claims> {
        let token_data =
            decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
                match e.kind() {
                    jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                        DomainError::Token(TokenError::TokenExpired)
                    }
                    jsonwebtoken::errors::ErrorKind::InvalidSignature => {
                        DomainError::Token(TokenError::InvalidSignature)
                    }
                    _ => DomainError::Token(TokenError::InvalidTokenFormat),
                }
            })?;

        Ok(token_data.claims)
    }

    /// Looks up the stored record for an opaque token, whatever its
    /// state
    ///
    /// Unlike `validate_refresh_token` this does not reject expired or
    /// revoked rows; logout-everywhere uses it to resolve the owner of
    /// a token that has already been rotated out.
    pub async fn find_refresh_token(&self, token: &str) -> DomainResult<Option<RefreshToken>> {
        self.token_repository
            .find_refresh_token(&Self::hash_token(token))
            .await
    }

    /// Validates a presented refresh token and returns its record
    ///
    /// Only an active token passes. Errors are distinguished for
    /// internal logging; the API boundary collapses them all into one
    /// generic 401.
    pub async fn validate_refresh_token(&self, token: &str) -> DomainResult<RefreshToken> {
        let token_hash = Self::hash_token(token);

        let refresh_token = self
            .token_repository
            .find_refresh_token(&token_hash)
            .await?
            .ok_or(DomainError::Token(TokenError::TokenNotFound))?;

        if refresh_token.is_expired() {
            return Err(DomainError::Token(TokenError::TokenExpired));
        }
        if refresh_token.is_revoked {
            return Err(DomainError::Token(TokenError::TokenRevoked));
        }

        Ok(refresh_token)
    }

    /// Claims a refresh token for rotation and returns the owning user
    ///
    /// The presented token is validated and then revoked through the
    /// repository's atomic conditional update before any replacement
    /// credential exists. When two rotations race on the same token,
    /// exactly one wins the conditional update; the loser observes
    /// `TokenRevoked`.
    pub async fn rotate(&self, token: &str) -> DomainResult<Uuid> {
        let old_token = self.validate_refresh_token(token).await?;

        let claimed = self
            .token_repository
            .revoke_active(&old_token.token_hash)
            .await?;
        if !claimed {
            // Lost the race to a concurrent rotation.
            return Err(DomainError::Token(TokenError::TokenRevoked));
        }

        Ok(old_token.user_id)
    }

    /// Revokes a refresh token; idempotent
    ///
    /// Unknown and already-revoked tokens are a silent no-op so a
    /// logout call cannot be used to probe whether a token exists.
    pub async fn revoke(&self, token: &str) -> DomainResult<()> {
        let token_hash = Self::hash_token(token);
        let _ = self.token_repository.revoke_active(&token_hash).await?;
        Ok(())
    }

    /// Revokes every active token owned by the user ("log out
    /// everywhere")
    pub async fn revoke_all_for_user(&self, user_id: Uuid) -> DomainResult<usize> {
        self.token_repository.revoke_all_user_tokens(user_id).await
    }

    /// Generates a fresh opaque refresh token
    ///
    /// 256 bits from the thread-local CSPRNG, Base64URL-encoded
    /// without padding. Pure; persistence happens in `issue_for`.
    pub fn generate_refresh_token() -> String {
        let mut bytes = [0u8; REFRESH_TOKEN_BYTES];
        rand::thread_rng().fill_bytes(&mut bytes);
        URL_SAFE_NO_PAD.encode(bytes)
    }

    /// Hashes an opaque token for storage and lookup
    pub(crate) fn hash_token(token: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(token.as_bytes());
        format!("{:x}", hasher.finalize())
    }
}
