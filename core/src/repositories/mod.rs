//! Repository traits defining the persistence interfaces.
//!
//! Implementations live in the infrastructure crate; in-memory mocks
//! for unit tests live alongside each trait behind `#[cfg(test)]`.

pub mod role;
pub mod token;
pub mod user;

pub use role::RoleRepository;
pub use token::TokenRepository;
pub use user::UserRepository;

#[cfg(test)]
pub use role::MockRoleRepository;
#[cfg(test)]
pub use token::MockTokenRepository;
#[cfg(test)]
pub use user::MockUserRepository;
