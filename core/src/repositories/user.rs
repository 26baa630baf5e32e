//! User repository trait defining the interface for account persistence.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::user::User;
use crate::errors::DomainError;

/// Repository trait for User entity persistence operations
///
/// Deleting a user must cascade its role assignments and refresh
/// tokens; implementations rely on foreign-key cascade rules rather
/// than in-memory object graphs.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find a user by login name. The match is exact and
    /// case-sensitive.
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, DomainError>;

    /// Find a user by their unique identifier
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError>;

    /// Persist a new user
    ///
    /// Fails with a database error if the username is already taken;
    /// callers should check `exists_by_username` first for a clean
    /// `DuplicateUsername` result.
    async fn create(&self, user: User) -> Result<User, DomainError>;

    /// Update an existing user's profile fields
    async fn update(&self, user: User) -> Result<User, DomainError>;

    /// Delete a user, cascading role assignments and refresh tokens
    ///
    /// Returns `false` if no such user existed.
    async fn delete(&self, id: Uuid) -> Result<bool, DomainError>;

    /// Check whether a username is already registered (case-sensitive)
    async fn exists_by_username(&self, username: &str) -> Result<bool, DomainError> {
        Ok(self.find_by_username(username).await?.is_some())
    }
}

#[cfg(test)]
pub use mock::MockUserRepository;
