//! Authentication handlers (login, refresh, logout, me)

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use janus_types::TokenPair;

use crate::error::{ApiError, ApiResult};
use crate::extractors::AuthUser;
use crate::state::AppState;

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

#[derive(Debug, Deserialize)]
pub struct LogoutRequest {
    pub refresh_token: String,
}

#[derive(Debug, Serialize)]
pub struct LogoutResponse {
    pub success: bool,
}

#[derive(Debug, Serialize)]
pub struct MeResponse {
    pub id: String,
    pub role: String,
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /api/v1/auth/login
///
/// Exchange credentials for an access/refresh token pair
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> ApiResult<Json<TokenPair>> {
    if req.email.is_empty() || req.password.is_empty() {
        return Err(ApiError::BadRequest(
            "email and password are required".to_string(),
        ));
    }

    let pair = state.auth.login(&req.email, &req.password).await?;
    Ok(Json(pair))
}

/// POST /api/v1/auth/refresh
///
/// Rotate a refresh token into a fresh token pair
pub async fn refresh(
    State(state): State<AppState>,
    Json(req): Json<RefreshRequest>,
) -> ApiResult<Json<TokenPair>> {
    if req.refresh_token.is_empty() {
        return Err(ApiError::BadRequest(
            "refresh_token is required".to_string(),
        ));
    }

    let pair = state.auth.refresh(&req.refresh_token).await?;
    Ok(Json(pair))
}

/// POST /api/v1/auth/logout
///
/// Revoke the presented refresh token
pub async fn logout(
    State(state): State<AppState>,
    Json(req): Json<LogoutRequest>,
) -> ApiResult<Json<LogoutResponse>> {
    state.auth.logout(&req.refresh_token).await?;
    Ok(Json(LogoutResponse { success: true }))
}

/// GET /api/v1/auth/me
///
/// Get the authenticated caller's identity from the access token
pub async fn me(auth_user: AuthUser) -> ApiResult<Json<MeResponse>> {
    Ok(Json(MeResponse {
        id: auth_user.user_id.to_string(),
        role: auth_user.role.to_string(),
    }))
}
