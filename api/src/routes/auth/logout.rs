use actix_web::{web, HttpResponse};

use crate::dto::auth_dto::{LogoutRequest, LogoutResponse};
use crate::handlers::error_handler::handle_domain_error;

use cantina_core::repositories::{RoleRepository, TokenRepository, UserRepository};

use super::AppState;

/// Handler for POST /api/v1/auth/logout
///
/// Revokes the presented refresh token. With `all_devices` set, every
/// active session of the token's owner is revoked. Unknown and
/// already-revoked tokens return the same success response, so logout
/// cannot be used to probe whether a token exists.
///
/// # Request Body
///
/// ```json
/// {
///     "refresh_token": "opaque_token_string",
///     "all_devices": false
/// }
/// ```
///
/// # Response
///
/// ## Success (200 OK)
/// ```json
/// {
///     "message": "Logged out successfully"
/// }
/// ```
///
/// ## Errors
/// - 500 Internal Server Error: storage failure
pub async fn logout<U, R, T>(
    state: web::Data<AppState<U, R, T>>,
    request: web::Json<LogoutRequest>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    R: RoleRepository + 'static,
    T: TokenRepository + 'static,
{
    match state
        .auth_service
        .logout(&request.refresh_token, request.all_devices)
        .await
    {
        Ok(()) => HttpResponse::Ok().json(LogoutResponse {
            message: "Logged out successfully".to_string(),
        }),
        Err(error) => handle_domain_error(&error),
    }
}
