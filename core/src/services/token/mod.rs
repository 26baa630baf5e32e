//! Token service module for access and refresh token management
//!
//! This module handles all token-related operations:
//! - JWT access token issuance and verification with role claims
//! - Opaque refresh token generation, validation, rotation, revocation
//! - Background cleanup of expired refresh tokens

mod cleanup;
mod config;
mod service;

#[cfg(test)]
mod tests;

pub use cleanup::{TokenCleanupConfig, TokenCleanupService};
pub use config::TokenConfig;
pub use service::TokenService;
