//! Bearer-token authorization for protected endpoints.
//!
//! `AuthContext` is an extractor: any handler that takes it as an
//! argument only runs for requests carrying a valid access token in the
//! `Authorization` header. Verification is pure signature checking
//! against the shared `JwtVerifier`, no storage lookup on the bearer
//! path.

use std::future::{ready, Ready};

use actix_web::http::header::AUTHORIZATION;
use actix_web::{dev::Payload, FromRequest, HttpRequest};
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use uuid::Uuid;

use cantina_core::domain::entities::token::Claims;
use cantina_core::services::TokenConfig;

/// Verifies access-token JWTs at the HTTP boundary
///
/// Built once at startup from the same `TokenConfig` the token service
/// signs with, and shared via `web::Data`.
pub struct JwtVerifier {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl JwtVerifier {
    pub fn new(config: &TokenConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[&config.issuer]);
        validation.set_audience(&[&config.audience]);
        validation.validate_exp = true;
        validation.validate_nbf = true;

        Self {
            decoding_key: DecodingKey::from_secret(config.secret.as_bytes()),
            validation,
        }
    }

    /// Decode and verify a bearer token, returning its claims
    pub fn verify(&self, token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
        decode::<Claims>(token, &self.decoding_key, &self.validation).map(|data| data.claims)
    }
}

/// Authenticated caller identity injected into handlers
#[derive(Debug, Clone)]
pub struct AuthContext {
    /// User ID from the subject claim
    pub user_id: Uuid,
    /// Username at token issuance time
    pub username: String,
    /// Role names at token issuance time
    pub roles: Vec<String>,
    /// JWT ID of the presented token
    pub jti: String,
}

impl AuthContext {
    fn from_claims(claims: Claims) -> Option<Self> {
        let user_id = claims.user_id().ok()?;
        Some(Self {
            user_id,
            username: claims.unique_name,
            roles: claims.roles,
            jti: claims.jti,
        })
    }

    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r == role)
    }
}

fn bearer_token(req: &HttpRequest) -> Option<&str> {
    req.headers()
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}

impl FromRequest for AuthContext {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let context = req
            .app_data::<actix_web::web::Data<JwtVerifier>>()
            .and_then(|verifier| {
                let token = bearer_token(req)?;
                verifier.verify(token).ok()
            })
            .and_then(AuthContext::from_claims);

        // Same opaque rejection for a missing header, a bad signature
        // and an expired token.
        ready(context.ok_or_else(|| {
            actix_web::error::InternalError::from_response(
                "unauthorized",
                crate::handlers::unauthorized_response(),
            )
            .into()
        }))
    }
}
