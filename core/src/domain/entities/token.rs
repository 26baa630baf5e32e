//! Token entities for JWT access tokens and opaque refresh tokens.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Claims structure for the access-token JWT payload
///
/// Access tokens are self-contained: everything a collaborator needs to
/// authorize a request (identity, roles, expiry) is inside the signed
/// payload, so no server-side lookup happens on the bearer path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,

    /// Username at issuance time
    pub unique_name: String,

    /// JWT ID, unique per issued token
    pub jti: String,

    /// Role names assigned to the user at issuance time
    pub roles: Vec<String>,

    /// Issued at timestamp
    pub iat: i64,

    /// Not before timestamp
    pub nbf: i64,

    /// Expiration timestamp
    pub exp: i64,

    /// Issuer
    pub iss: String,

    /// Audience
    pub aud: String,
}

impl Claims {
    /// Creates claims for an access token
    ///
    /// `roles` must be the role set read from the role store at this
    /// issuance, already ordered and free of duplicates.
    pub fn new_access_token(
        user_id: Uuid,
        username: &str,
        roles: Vec<String>,
        issuer: &str,
        audience: &str,
        lifetime_minutes: i64,
    ) -> Self {
        let now = Utc::now();
        let expiry = now + Duration::minutes(lifetime_minutes);

        Self {
            sub: user_id.to_string(),
            unique_name: username.to_string(),
            jti: Uuid::new_v4().to_string(),
            roles,
            iat: now.timestamp(),
            nbf: now.timestamp(),
            exp: expiry.timestamp(),
            iss: issuer.to_string(),
            aud: audience.to_string(),
        }
    }

    /// Checks if the claims have expired
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() >= self.exp
    }

    /// Gets the user ID from the claims
    pub fn user_id(&self) -> Result<Uuid, uuid::Error> {
        Uuid::parse_str(&self.sub)
    }
}

/// Refresh token entity stored in the database
///
/// Only the SHA-256 hash of the opaque value is persisted; the raw
/// string exists in transit only. The row is immutable apart from the
/// `is_revoked` flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefreshToken {
    /// Unique identifier for the refresh token
    pub id: Uuid,

    /// User this token belongs to
    pub user_id: Uuid,

    /// SHA-256 hex digest of the opaque token value
    pub token_hash: String,

    /// Timestamp when the token was created
    pub created_at: DateTime<Utc>,

    /// Timestamp when the token expires
    pub expires_at: DateTime<Utc>,

    /// Whether the token has been revoked
    pub is_revoked: bool,
}

impl RefreshToken {
    /// Creates a new refresh token valid for `lifetime_days` from now
    ///
    /// `lifetime_days` must be positive; the token service validates
    /// this at construction so `expires_at` is always strictly after
    /// `created_at`.
    pub fn new(user_id: Uuid, token_hash: String, lifetime_days: i64) -> Self {
        let now = Utc::now();

        Self {
            id: Uuid::new_v4(),
            user_id,
            token_hash,
            created_at: now,
            expires_at: now + Duration::days(lifetime_days),
            is_revoked: false,
        }
    }

    /// Checks if the refresh token has expired
    pub fn is_expired(&self) -> bool {
        Utc::now() > self.expires_at
    }

    /// A token is valid if it has neither expired nor been revoked
    pub fn is_valid(&self) -> bool {
        !self.is_expired() && !self.is_revoked
    }

    /// Revokes the refresh token
    pub fn revoke(&mut self) {
        self.is_revoked = true;
    }
}

/// Token pair returned to the client after login, registration or refresh
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
    /// Signed JWT access token
    pub access_token: String,

    /// Opaque refresh token
    pub refresh_token: String,

    /// Access token lifetime in seconds
    pub expires_in: i64,
}

impl TokenPair {
    pub fn new(access_token: String, refresh_token: String, access_lifetime_minutes: i64) -> Self {
        Self {
            access_token,
            refresh_token,
            expires_in: access_lifetime_minutes * 60,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_access_token_claims() {
        let user_id = Uuid::new_v4();
        let claims = Claims::new_access_token(
            user_id,
            "alice",
            vec!["admin".to_string(), "user".to_string()],
            "cantina",
            "cantina-api",
            15,
        );

        assert_eq!(claims.sub, user_id.to_string());
        assert_eq!(claims.unique_name, "alice");
        assert_eq!(claims.roles, vec!["admin", "user"]);
        assert_eq!(claims.iss, "cantina");
        assert_eq!(claims.aud, "cantina-api");
        assert!(!claims.is_expired());
        assert_eq!(claims.exp - claims.iat, 15 * 60);
    }

    #[test]
    fn test_jti_unique_per_token() {
        let user_id = Uuid::new_v4();
        let a = Claims::new_access_token(user_id, "alice", vec![], "iss", "aud", 15);
        let b = Claims::new_access_token(user_id, "alice", vec![], "iss", "aud", 15);
        assert_ne!(a.jti, b.jti);
    }

    #[test]
    fn test_claims_user_id_parsing() {
        let user_id = Uuid::new_v4();
        let claims = Claims::new_access_token(user_id, "alice", vec![], "iss", "aud", 15);
        assert_eq!(claims.user_id().unwrap(), user_id);
    }

    #[test]
    fn test_claims_expiration() {
        let user_id = Uuid::new_v4();
        let mut claims = Claims::new_access_token(user_id, "alice", vec![], "iss", "aud", 15);
        claims.exp = Utc::now().timestamp() - 1;
        assert!(claims.is_expired());
    }

    #[test]
    fn test_refresh_token_creation() {
        let user_id = Uuid::new_v4();
        let token = RefreshToken::new(user_id, "hash".to_string(), 7);

        assert_eq!(token.user_id, user_id);
        assert!(!token.is_revoked);
        assert!(!token.is_expired());
        assert!(token.is_valid());
        assert!(token.expires_at > token.created_at);
    }

    #[test]
    fn test_refresh_token_revocation() {
        let user_id = Uuid::new_v4();
        let mut token = RefreshToken::new(user_id, "hash".to_string(), 7);

        assert!(token.is_valid());
        token.revoke();
        assert!(token.is_revoked);
        assert!(!token.is_valid());
    }

    #[test]
    fn test_revoked_token_invalid_even_before_expiry() {
        let user_id = Uuid::new_v4();
        let mut token = RefreshToken::new(user_id, "hash".to_string(), 7);
        token.revoke();

        assert!(!token.is_expired());
        assert!(!token.is_valid());
    }

    #[test]
    fn test_refresh_token_expiration() {
        let user_id = Uuid::new_v4();
        let mut token = RefreshToken::new(user_id, "hash".to_string(), 7);
        token.expires_at = Utc::now() - Duration::days(1);

        assert!(token.is_expired());
        assert!(!token.is_valid());
    }

    #[test]
    fn test_token_pair_expiry_seconds() {
        let pair = TokenPair::new("access".to_string(), "refresh".to_string(), 15);
        assert_eq!(pair.expires_in, 15 * 60);
    }
}
