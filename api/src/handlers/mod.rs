//! Error-to-HTTP mapping.

pub mod error_handler;

pub use error_handler::{handle_domain_error, unauthorized_response};
