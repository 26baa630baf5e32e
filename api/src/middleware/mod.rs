//! Request-level concerns: bearer-token extraction and CORS.

pub mod auth;
pub mod cors;

pub use auth::{AuthContext, JwtVerifier};
