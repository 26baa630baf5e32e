//! Business services containing domain logic and use cases.

pub mod auth;
pub mod credential;
pub mod token;

// Re-export commonly used types
pub use auth::{AuthService, RegisterRequest};
pub use credential::CredentialVerifier;
pub use token::{TokenCleanupConfig, TokenCleanupService, TokenConfig, TokenService};
