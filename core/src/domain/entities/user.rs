//! User entity representing a registered account in the Cantina system.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// User entity representing a registered account
///
/// The password is stored only as a bcrypt hash; the plaintext never
/// leaves the registration/login request path. Role assignments and
/// refresh tokens owned by the user live in their own tables and are
/// resolved through the repository layer, never held as collections
/// on this struct.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier for the user
    pub id: Uuid,

    /// Login name, unique across the system (matched case-sensitively)
    pub username: String,

    /// Contact email address
    pub email: String,

    /// bcrypt hash of the user's password
    #[serde(skip_serializing)]
    pub password_hash: String,

    /// Display name
    pub full_name: String,

    /// Optional avatar URL
    pub profile_picture_url: Option<String>,

    /// Timestamp when the account was created
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Creates a new User with a freshly generated id
    pub fn new(
        username: String,
        email: String,
        password_hash: String,
        full_name: String,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            username,
            email,
            password_hash,
            full_name,
            profile_picture_url: None,
            created_at: Utc::now(),
        }
    }
}
