//! MySQL implementation of the RoleRepository trait.

use async_trait::async_trait;
use sqlx::{MySqlPool, Row};
use uuid::Uuid;

use cantina_core::errors::DomainError;
use cantina_core::repositories::RoleRepository;

/// MySQL implementation of RoleRepository
pub struct MySqlRoleRepository {
    pool: MySqlPool,
}

impl MySqlRoleRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RoleRepository for MySqlRoleRepository {
    async fn roles_for_user(&self, user_id: Uuid) -> Result<Vec<String>, DomainError> {
        let rows = sqlx::query(
            "SELECT role_name FROM role_assignments WHERE user_id = ? ORDER BY role_name",
        )
        .bind(user_id.to_string())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::Database {
            message: format!("Failed to load roles for user: {}", e),
        })?;

        rows.iter()
            .map(|row| {
                row.try_get("role_name").map_err(|e| DomainError::Database {
                    message: format!("Failed to get role_name: {}", e),
                })
            })
            .collect()
    }
}
