//! # Cantina Infrastructure
//!
//! Concrete MySQL implementations of the core repository traits,
//! plus database connection-pool construction.

pub mod database;

pub use database::mysql::{MySqlRoleRepository, MySqlTokenRepository, MySqlUserRepository};
pub use database::{create_pool, DatabaseConfig};
