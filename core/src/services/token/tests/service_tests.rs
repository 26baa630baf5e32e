use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::token::RefreshToken;
use crate::domain::entities::user::User;
use crate::errors::{DomainError, TokenError};
use crate::repositories::{MockRoleRepository, MockTokenRepository, TokenRepository};
use crate::services::token::{TokenConfig, TokenService};

type TestTokenService = TokenService<MockTokenRepository, MockRoleRepository>;

struct TestFixture {
    service: Arc<TestTokenService>,
    token_repository: Arc<MockTokenRepository>,
    role_repository: Arc<MockRoleRepository>,
    user: User,
}

fn test_config() -> TokenConfig {
    TokenConfig::new(
        "test-signing-secret-of-adequate-length!",
        "cantina",
        "cantina-api",
    )
}

fn create_fixture() -> TestFixture {
    let token_repository = Arc::new(MockTokenRepository::new());
    let role_repository = Arc::new(MockRoleRepository::new());
    let service = Arc::new(
        TokenService::new(
            token_repository.clone(),
            role_repository.clone(),
            test_config(),
        )
        .unwrap(),
    );
    let user = User::new(
        "alice".to_string(),
        "alice@example.com".to_string(),
        "$2b$12$unused-in-these-tests".to_string(),
        "Alice Example".to_string(),
    );

    TestFixture {
        service,
        token_repository,
        role_repository,
        user,
    }
}

#[tokio::test]
async fn test_issue_for_returns_pair() {
    let fx = create_fixture();

    let pair = fx.service.issue_for(&fx.user).await.unwrap();

    assert!(!pair.access_token.is_empty());
    assert!(!pair.refresh_token.is_empty());
    assert_eq!(pair.expires_in, 15 * 60);
    // The refresh token was persisted (hashed).
    assert_eq!(fx.token_repository.count().await, 1);
}

#[tokio::test]
async fn test_access_token_claims_match_user() {
    let fx = create_fixture();

    let pair = fx.service.issue_for(&fx.user).await.unwrap();
    let claims = fx.service.verify_access_token(&pair.access_token).unwrap();

    assert_eq!(claims.user_id().unwrap(), fx.user.id);
    assert_eq!(claims.unique_name, "alice");
    assert_eq!(claims.iss, "cantina");
    assert_eq!(claims.aud, "cantina-api");
    assert!(!claims.jti.is_empty());
}

#[tokio::test]
async fn test_role_claims_reflect_store_at_issuance() {
    let fx = create_fixture();
    fx.role_repository.assign(fx.user.id, "admin").await;
    fx.role_repository.assign(fx.user.id, "editor").await;

    let pair = fx.service.issue_for(&fx.user).await.unwrap();
    let claims = fx.service.verify_access_token(&pair.access_token).unwrap();

    // Exactly the stored set, ordered, no duplicates.
    assert_eq!(claims.roles, vec!["admin", "editor"]);

    // A role change shows up on the next token, not the old one.
    fx.role_repository.remove(fx.user.id, "editor").await;
    let next = fx.service.issue_for(&fx.user).await.unwrap();
    let next_claims = fx.service.verify_access_token(&next.access_token).unwrap();

    assert_eq!(next_claims.roles, vec!["admin"]);
    let old_claims = fx.service.verify_access_token(&pair.access_token).unwrap();
    assert_eq!(old_claims.roles, vec!["admin", "editor"]);
}

#[tokio::test]
async fn test_empty_role_set() {
    let fx = create_fixture();

    let pair = fx.service.issue_for(&fx.user).await.unwrap();
    let claims = fx.service.verify_access_token(&pair.access_token).unwrap();

    assert!(claims.roles.is_empty());
}

#[tokio::test]
async fn test_access_token_rejected_by_other_key() {
    let fx = create_fixture();
    let pair = fx.service.issue_for(&fx.user).await.unwrap();

    let mut other_config = test_config();
    other_config.secret = "a-completely-different-signing-secret".to_string();
    let other_service = TokenService::new(
        Arc::new(MockTokenRepository::new()),
        Arc::new(MockRoleRepository::new()),
        other_config,
    )
    .unwrap();

    let err = other_service
        .verify_access_token(&pair.access_token)
        .unwrap_err();
    assert!(matches!(
        err,
        DomainError::Token(TokenError::InvalidSignature)
    ));
}

#[tokio::test]
async fn test_verify_garbage_access_token() {
    let fx = create_fixture();

    let err = fx.service.verify_access_token("not-a-jwt").unwrap_err();
    assert!(matches!(
        err,
        DomainError::Token(TokenError::InvalidTokenFormat)
    ));
}

#[tokio::test]
async fn test_validate_unknown_refresh_token() {
    let fx = create_fixture();

    let err = fx
        .service
        .validate_refresh_token("never-issued")
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Token(TokenError::TokenNotFound)));
}

#[tokio::test]
async fn test_validate_expired_refresh_token() {
    let fx = create_fixture();
    let pair = fx.service.issue_for(&fx.user).await.unwrap();

    fx.token_repository
        .force_expire(&TestTokenService::hash_token(&pair.refresh_token))
        .await;

    let err = fx
        .service
        .validate_refresh_token(&pair.refresh_token)
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Token(TokenError::TokenExpired)));
}

#[tokio::test]
async fn test_rotate_revokes_old_token() {
    let fx = create_fixture();
    let pair = fx.service.issue_for(&fx.user).await.unwrap();

    let user_id = fx.service.rotate(&pair.refresh_token).await.unwrap();
    assert_eq!(user_id, fx.user.id);

    let err = fx
        .service
        .validate_refresh_token(&pair.refresh_token)
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Token(TokenError::TokenRevoked)));
}

#[tokio::test]
async fn test_concurrent_rotation_has_one_winner() {
    let fx = create_fixture();
    let pair = fx.service.issue_for(&fx.user).await.unwrap();

    let (a, b) = tokio::join!(
        fx.service.rotate(&pair.refresh_token),
        fx.service.rotate(&pair.refresh_token),
    );

    let winners = [&a, &b].iter().filter(|r| r.is_ok()).count();
    assert_eq!(winners, 1, "exactly one rotation must win");

    let loser = if a.is_err() { a } else { b };
    assert!(matches!(
        loser.unwrap_err(),
        DomainError::Token(TokenError::TokenRevoked)
    ));
}

#[tokio::test]
async fn test_revoke_is_idempotent_and_silent() {
    let fx = create_fixture();
    let pair = fx.service.issue_for(&fx.user).await.unwrap();

    fx.service.revoke(&pair.refresh_token).await.unwrap();
    // Second revocation and unknown-token revocation are both no-ops.
    fx.service.revoke(&pair.refresh_token).await.unwrap();
    fx.service.revoke("never-issued").await.unwrap();

    let err = fx
        .service
        .validate_refresh_token(&pair.refresh_token)
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Token(TokenError::TokenRevoked)));
}

#[tokio::test]
async fn test_revoked_fails_even_before_expiry() {
    let fx = create_fixture();
    let pair = fx.service.issue_for(&fx.user).await.unwrap();

    fx.service.revoke(&pair.refresh_token).await.unwrap();

    // Well within the 7-day lifetime, still rejected.
    let err = fx
        .service
        .validate_refresh_token(&pair.refresh_token)
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Token(TokenError::TokenRevoked)));
}

#[tokio::test]
async fn test_revoke_all_for_user() {
    let fx = create_fixture();
    let first = fx.service.issue_for(&fx.user).await.unwrap();
    let second = fx.service.issue_for(&fx.user).await.unwrap();

    let other = User::new(
        "bob".to_string(),
        "bob@example.com".to_string(),
        "$2b$12$unused".to_string(),
        "Bob".to_string(),
    );
    let bobs = fx.service.issue_for(&other).await.unwrap();

    let revoked = fx.service.revoke_all_for_user(fx.user.id).await.unwrap();
    assert_eq!(revoked, 2);

    for token in [&first.refresh_token, &second.refresh_token] {
        assert!(fx.service.validate_refresh_token(token).await.is_err());
    }
    // Another user's session is untouched.
    fx.service
        .validate_refresh_token(&bobs.refresh_token)
        .await
        .unwrap();
}

/// Token store whose writes fail like a lost database connection.
struct FailingTokenRepository;

#[async_trait]
impl TokenRepository for FailingTokenRepository {
    async fn save_refresh_token(&self, _token: RefreshToken) -> Result<RefreshToken, DomainError> {
        Err(DomainError::Database {
            message: "connection reset".to_string(),
        })
    }

    async fn find_refresh_token(&self, _hash: &str) -> Result<Option<RefreshToken>, DomainError> {
        Ok(None)
    }

    async fn revoke_active(&self, _hash: &str) -> Result<bool, DomainError> {
        Ok(false)
    }

    async fn revoke_all_user_tokens(&self, _user_id: Uuid) -> Result<usize, DomainError> {
        Ok(0)
    }

    async fn delete_expired_tokens(&self) -> Result<usize, DomainError> {
        Ok(0)
    }
}

#[tokio::test]
async fn test_storage_failure_during_issuance_stays_a_database_error() {
    let service = TokenService::new(
        Arc::new(FailingTokenRepository),
        Arc::new(MockRoleRepository::new()),
        test_config(),
    )
    .unwrap();
    let user = User::new(
        "alice".to_string(),
        "alice@example.com".to_string(),
        "$2b$12$unused".to_string(),
        "Alice Example".to_string(),
    );

    // A failed save is an outage, not a credential problem; it must
    // not be reshaped into a token error on its way up.
    let err = service.issue_for(&user).await.unwrap_err();
    assert!(matches!(err, DomainError::Database { .. }));
}

#[test]
fn test_generate_refresh_token_shape() {
    let a = TestTokenService::generate_refresh_token();
    let b = TestTokenService::generate_refresh_token();

    assert_ne!(a, b);
    // 32 bytes -> 43 Base64URL characters without padding.
    assert_eq!(a.len(), 43);
    assert!(a
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'));
}

#[test]
fn test_hash_token_is_stable_and_hex() {
    let token = "some-opaque-value";
    let first = TestTokenService::hash_token(token);
    let second = TestTokenService::hash_token(token);

    assert_eq!(first, second);
    assert_eq!(first.len(), 64);
    assert!(first.chars().all(|c| c.is_ascii_hexdigit()));
    assert_ne!(first, TestTokenService::hash_token("other-value"));
}
