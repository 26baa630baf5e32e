//! Domain layer containing the business entities.

pub mod entities;

pub use entities::*;
