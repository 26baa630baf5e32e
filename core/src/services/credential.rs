//! Credential verification against stored password hashes.

use std::sync::Arc;

use tracing::debug;

use crate::domain::entities::user::User;
use crate::errors::{AuthError, DomainError, DomainResult};
use crate::repositories::UserRepository;

/// bcrypt hash of an unguessable throwaway value, verified on the
/// unknown-user path so that path costs one bcrypt verification just
/// like the wrong-password path.
const DUMMY_HASH: &str = "$2b$12$CBjMJjLRBXSkeGQGQ1Tceu2Jc9lYyCHY0kyBMpplZzGBATdT7Qgy2";

/// Verifies a presented username/password pair
///
/// Pure check: no side effects on the user record. Both failure modes
/// (unknown username, wrong password) surface as the same
/// `InvalidCredentials` error.
pub struct CredentialVerifier<U: UserRepository> {
    user_repository: Arc<U>,
}

impl<U: UserRepository> CredentialVerifier<U> {
    pub fn new(user_repository: Arc<U>) -> Self {
        Self { user_repository }
    }

    /// Verify credentials and return the matching user
    ///
    /// The username match is exact and case-sensitive. Fails with
    /// `AuthError::InvalidCredentials` whether the user is unknown or
    /// the password does not match; the caller cannot distinguish the
    /// two by error or by timing.
    pub async fn verify(&self, username: &str, password: &str) -> DomainResult<User> {
        match self.user_repository.find_by_username(username).await? {
            Some(user) => {
                let matches = bcrypt::verify(password, &user.password_hash)
                    .map_err(|e| DomainError::Internal {
                        message: format!("Password verification failed: {}", e),
                    })?;

                if matches {
                    Ok(user)
                } else {
                    debug!(username, "password mismatch");
                    Err(AuthError::InvalidCredentials.into())
                }
            }
            None => {
                // Burn a bcrypt verification so this path takes as
                // long as the wrong-password path.
                let _ = bcrypt::verify(password, DUMMY_HASH);
                debug!(username, "unknown username");
                Err(AuthError::InvalidCredentials.into())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::MockUserRepository;

    async fn repo_with_user(username: &str, password: &str) -> Arc<MockUserRepository> {
        let repo = Arc::new(MockUserRepository::new());
        let hash = bcrypt::hash(password, bcrypt::DEFAULT_COST).unwrap();
        let user = User::new(
            username.to_string(),
            format!("{}@example.com", username),
            hash,
            username.to_string(),
        );
        repo.create(user).await.unwrap();
        repo
    }

    #[tokio::test]
    async fn test_verify_correct_password() {
        let repo = repo_with_user("alice", "pw123!").await;
        let verifier = CredentialVerifier::new(repo);

        let user = verifier.verify("alice", "pw123!").await.unwrap();
        assert_eq!(user.username, "alice");
    }

    #[tokio::test]
    async fn test_verify_wrong_password() {
        let repo = repo_with_user("alice", "pw123!").await;
        let verifier = CredentialVerifier::new(repo);

        let err = verifier.verify("alice", "wrong").await.unwrap_err();
        assert!(matches!(
            err,
            DomainError::Auth(AuthError::InvalidCredentials)
        ));
    }

    #[tokio::test]
    async fn test_unknown_user_same_error_as_wrong_password() {
        let repo = repo_with_user("alice", "pw123!").await;
        let verifier = CredentialVerifier::new(repo);

        let unknown = verifier.verify("ghost", "pw123!").await.unwrap_err();
        let wrong = verifier.verify("alice", "nope").await.unwrap_err();

        assert_eq!(unknown.to_string(), wrong.to_string());
        assert!(matches!(
            unknown,
            DomainError::Auth(AuthError::InvalidCredentials)
        ));
    }

    #[tokio::test]
    async fn test_username_match_is_case_sensitive() {
        let repo = repo_with_user("alice", "pw123!").await;
        let verifier = CredentialVerifier::new(repo);

        let err = verifier.verify("Alice", "pw123!").await.unwrap_err();
        assert!(matches!(
            err,
            DomainError::Auth(AuthError::InvalidCredentials)
        ));
    }
}
