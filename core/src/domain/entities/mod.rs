//! Domain entities representing core business objects.

pub mod role;
pub mod token;
pub mod user;

// Re-export commonly used types
pub use role::RoleAssignment;
pub use token::{Claims, RefreshToken, TokenPair};
pub use user::User;
