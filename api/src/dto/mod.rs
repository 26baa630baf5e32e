//! Request and response data transfer objects.

pub mod auth_dto;
pub mod error_dto;

pub use auth_dto::{
    AuthResponse, LoginRequest, LogoutRequest, LogoutResponse, RefreshTokenRequest,
    RegisterRequest,
};
pub use error_dto::ErrorResponse;
