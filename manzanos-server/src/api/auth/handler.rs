//! Login handler

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};

use crate::core::ServerState;
use crate::utils::{AppError, AppResult};
use shared::ApiResponse;

#[derive(Deserialize)]
pub struct LoginRequest {
    pub password: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub token: String,
    /// Expiration timestamp, seconds
    pub expires_at: i64,
}

/// POST /api/auth/login - exchange the operator password for a JWT
pub async fn login(
    State(state): State<ServerState>,
    Json(payload): Json<LoginRequest>,
) -> AppResult<Json<ApiResponse<LoginResponse>>> {
    if payload.password != state.config.admin_password {
        tracing::warn!(target: "security", "Failed login attempt");
        return Err(AppError::bad_credentials("Contraseña incorrecta"));
    }

    let (token, expires_at) = state
        .jwt_service
        .generate_token("operador")
        .map_err(AppError::from)?;

    Ok(Json(ApiResponse::ok(LoginResponse { token, expires_at })))
}
