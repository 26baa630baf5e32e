use actix_web::{http::StatusCode, web, HttpResponse};
use validator::Validate;

use crate::dto::auth_dto::{AuthResponse, RegisterRequest};
use crate::dto::ErrorResponse;
use crate::handlers::error_handler::handle_domain_error;

use cantina_core::repositories::{RoleRepository, TokenRepository, UserRepository};
use cantina_core::services::auth::RegisterRequest as DomainRegisterRequest;

use super::AppState;

/// Handler for POST /api/v1/auth/register
///
/// Creates a new account and returns its first token pair.
///
/// # Request Body
///
/// ```json
/// {
///     "username": "alice",
///     "email": "alice@example.com",
///     "full_name": "Alice Example",
///     "password": "secret"
/// }
/// ```
///
/// # Response
///
/// ## Success (200 OK)
/// ```json
/// {
///     "access_token": "eyJ...",
///     "refresh_token": "opaque_token_string",
///     "expires_in": 900
/// }
/// ```
///
/// ## Errors
/// - 400 Bad Request: duplicate username, weak password or malformed input
/// - 500 Internal Server Error: storage or hashing failure
pub async fn register<U, R, T>(
    state: web::Data<AppState<U, R, T>>,
    request: web::Json<RegisterRequest>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    R: RoleRepository + 'static,
    T: TokenRepository + 'static,
{
    if let Err(errors) = request.validate() {
        return ErrorResponse::new("validation_error", errors.to_string())
            .to_response(StatusCode::BAD_REQUEST);
    }

    let request = request.into_inner();
    let domain_request = DomainRegisterRequest {
        username: request.username,
        email: request.email,
        full_name: request.full_name,
        password: request.password,
    };

    match state.auth_service.register(domain_request).await {
        Ok(pair) => HttpResponse::Ok().json(AuthResponse {
            access_token: pair.access_token,
            refresh_token: pair.refresh_token,
            expires_in: pair.expires_in,
        }),
        Err(error) => handle_domain_error(&error),
    }
}
