use actix_web::{http::StatusCode, HttpResponse};

use cantina_core::errors::{AuthError, DomainError};

use crate::dto::ErrorResponse;

/// The one body every authentication failure maps to
///
/// Credential and token failures are deliberately indistinguishable on
/// the wire: wrong password, unknown user, expired, revoked and
/// malformed tokens all produce this exact response, so the API leaks
/// nothing about which part failed.
pub fn unauthorized_response() -> HttpResponse {
    ErrorResponse::new("unauthorized", "Invalid credentials")
        .to_response(StatusCode::UNAUTHORIZED)
}

/// Map a domain error to its HTTP response
pub fn handle_domain_error(error: &DomainError) -> HttpResponse {
    match error {
        DomainError::Auth(AuthError::DuplicateUsername) => {
            ErrorResponse::new("duplicate_username", "Username is already taken")
                .to_response(StatusCode::BAD_REQUEST)
        }
        DomainError::Auth(AuthError::WeakPassword) => {
            ErrorResponse::new("weak_password", "Password does not meet the minimum requirements")
                .to_response(StatusCode::BAD_REQUEST)
        }
        DomainError::Auth(AuthError::InvalidCredentials) | DomainError::Token(_) => {
            unauthorized_response()
        }
        DomainError::Validation { message } => {
            ErrorResponse::new("validation_error", message.clone())
                .to_response(StatusCode::BAD_REQUEST)
        }
        DomainError::Configuration { .. }
        | DomainError::Database { .. }
        | DomainError::Internal { .. } => {
            // Detail goes to the log, never to the client.
            log::error!("internal error: {}", error);
            ErrorResponse::new("internal_error", "An internal error occurred")
                .to_response(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}
