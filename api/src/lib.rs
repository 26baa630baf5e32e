//! HTTP surface of the Cantina authentication service.
//!
//! Thin actix-web layer over `cantina_core`: request DTOs, the four
//! auth endpoints, the bearer-token extractor and the error-to-HTTP
//! mapping. All business rules live in the core crate.

pub mod config;
pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;
