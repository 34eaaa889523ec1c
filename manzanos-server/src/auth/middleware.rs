//! Authentication middleware

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::auth::JwtService;
use crate::core::ServerState;
use crate::utils::AppError;

/// Require a valid bearer token on management routes.
///
/// Skipped for CORS preflight, non-API paths and the public endpoints
/// (login, quote, health, guest reservation view). On success the
/// verified [`Claims`](crate::auth::Claims) are injected into request
/// extensions.
pub async fn require_auth(
    State(state): State<ServerState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let path = req.uri().path();

    if req.method() == http::Method::OPTIONS {
        return Ok(next.run(req).await);
    }

    if !path.starts_with("/api/") {
        return Ok(next.run(req).await);
    }

    let is_public_api_route = path == "/api/auth/login"
        || path == "/api/dolar"
        || path.starts_with("/api/reservas/public/");
    if is_public_api_route {
        return Ok(next.run(req).await);
    }

    let auth_header = req
        .headers()
        .get(http::header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok());

    let token = match auth_header {
        Some(header) => JwtService::extract_from_header(header)
            .ok_or_else(|| AppError::InvalidToken("Invalid authorization header".to_string()))?,
        None => {
            tracing::warn!(target: "security", path = %path, "Missing authorization header");
            return Err(AppError::Unauthorized);
        }
    };

    let claims = state.jwt_service.verify_token(token)?;
    req.extensions_mut().insert(claims);

    Ok(next.run(req).await)
}
