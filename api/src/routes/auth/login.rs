use actix_web::{web, HttpResponse};

use crate::dto::auth_dto::{AuthResponse, LoginRequest};
use crate::handlers::error_handler::handle_domain_error;

use cantina_core::repositories::{RoleRepository, TokenRepository, UserRepository};

use super::AppState;

/// Handler for POST /api/v1/auth/login
///
/// Verifies a username/password pair and returns a fresh token pair.
///
/// # Request Body
///
/// ```json
/// {
///     "username": "alice",
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
/// - 401 Unauthorized: any credential failure; unknown usernames and
///   wrong passwords are indistinguishable
/// - 500 Internal Server Error: storage failure
pub async fn login<U, R, T>(
    state: web::Data<AppState<U, R, T>>,
    request: web::Json<LoginRequest>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    R: RoleRepository + 'static,
    T: TokenRepository + 'static,
{
    match state
        .auth_service
        .login(&request.username, &request.password)
        .await
    {
        Ok(pair) => HttpResponse::Ok().json(AuthResponse {
            access_token: pair.access_token,
            refresh_token: pair.refresh_token,
            expires_in: pair.expires_in,
        }),
        Err(error) => handle_domain_error(&error),
    }
}
