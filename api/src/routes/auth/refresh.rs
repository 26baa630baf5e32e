use actix_web::{web, HttpResponse};

use crate::dto::auth_dto::{AuthResponse, RefreshTokenRequest};
use crate::handlers::error_handler::handle_domain_error;

use cantina_core::repositories::{RoleRepository, TokenRepository, UserRepository};

use super::AppState;

/// Handler for POST /api/v1/auth/refresh
///
/// Exchanges a refresh token for a new token pair. The presented token
/// is revoked in the same exchange; replaying it afterwards fails.
///
/// # Request Body
///
/// ```json
/// {
///     "refresh_token": "opaque_token_string"
/// }
/// ```
///
/// # Response
///
/// ## Success (200 OK)
/// ```json
/// {
///     "access_token": "eyJ...",
///     "refresh_token": "new_opaque_token_string",
///     "expires_in": 900
/// }
/// ```
///
/// ## Errors
/// - 401 Unauthorized: unknown, expired or revoked refresh token
/// - 500 Internal Server Error: storage failure
pub async fn refresh<U, R, T>(
    state: web::Data<AppState<U, R, T>>,
    request: web::Json<RefreshTokenRequest>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    R: RoleRepository + 'static,
    T: TokenRepository + 'static,
{
    match state.auth_service.refresh(&request.refresh_token).await {
        Ok(pair) => HttpResponse::Ok().json(AuthResponse {
            access_token: pair.access_token,
            refresh_token: pair.refresh_token,
            expires_in: pair.expires_in,
        }),
        Err(error) => handle_domain_error(&error),
    }
}
