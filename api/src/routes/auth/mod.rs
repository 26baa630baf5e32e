//! Authentication route handlers
//!
//! Endpoints:
//! - Registration
//! - Login (username and password)
//! - Token refresh (rotation)
//! - Logout (single session or all devices)

use std::sync::Arc;

use cantina_core::repositories::{RoleRepository, TokenRepository, UserRepository};
use cantina_core::services::AuthService;

pub mod login;
pub mod logout;
pub mod refresh;
pub mod register;

/// Application state that holds shared services
pub struct AppState<U, R, T>
where
    U: UserRepository,
    R: RoleRepository,
    T: TokenRepository,
{
    pub auth_service: Arc<AuthService<U, R, T>>,
}
