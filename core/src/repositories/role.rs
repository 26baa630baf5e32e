//! Role repository trait resolving the roles assigned to a user.

use async_trait::async_trait;
use uuid::Uuid;

use crate::errors::DomainError;

/// Read-through adapter over the role-assignment table
///
/// The token issuer calls this on every issuance so role changes take
/// effect on the next issued token. Implementations must not cache
/// results across calls.
#[async_trait]
pub trait RoleRepository: Send + Sync {
    /// Role names currently assigned to the user, ordered by name.
    /// Empty when the user has no roles. The unique constraint on
    /// (user_id, role_name) guarantees no duplicates.
    async fn roles_for_user(&self, user_id: Uuid) -> Result<Vec<String>, DomainError>;
}

#[cfg(test)]
pub use mock::MockRoleRepository;

#[cfg(test)]
mod mock {
    use std::collections::{BTreeSet, HashMap};
    use std::sync::Arc;

    use tokio::sync::RwLock;

    use super::*;

    /// In-memory role repository for unit tests
    #[derive(Default)]
    pub struct MockRoleRepository {
        // BTreeSet keeps the per-user role set ordered and unique,
        // mirroring the table's unique constraint and ORDER BY.
        roles: Arc<RwLock<HashMap<Uuid, BTreeSet<String>>>>,
    }

    impl MockRoleRepository {
        pub fn new() -> Self {
            Self::default()
        }

        pub async fn assign(&self, user_id: Uuid, role_name: &str) {
            let mut roles = self.roles.write().await;
            roles.entry(user_id).or_default().insert(role_name.to_string());
        }

        pub async fn remove(&self, user_id: Uuid, role_name: &str) {
            let mut roles = self.roles.write().await;
            if let Some(set) = roles.get_mut(&user_id) {
                set.remove(role_name);
            }
        }
    }

    #[async_trait]
    impl RoleRepository for MockRoleRepository {
        async fn roles_for_user(&self, user_id: Uuid) -> Result<Vec<String>, DomainError> {
            let roles = self.roles.read().await;
            Ok(roles
                .get(&user_id)
                .map(|set| set.iter().cloned().collect())
                .unwrap_or_default())
        }
    }
}
