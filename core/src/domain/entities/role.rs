//! Role assignment entity granting authorization scope to a user.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A (user, role name) pair, unique on the combination.
///
/// Role assignments are read by the token issuer at every issuance, so
/// a change here takes effect on the next issued access token. Tokens
/// already in flight keep the roles they were signed with until expiry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleAssignment {
    /// User the role is granted to
    pub user_id: Uuid,

    /// Role name, e.g. "admin"
    pub role_name: String,
}

impl RoleAssignment {
    pub fn new(user_id: Uuid, role_name: impl Into<String>) -> Self {
        Self {
            user_id,
            role_name: role_name.into(),
        }
    }
}
