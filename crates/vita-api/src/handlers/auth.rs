//! Authentication handlers

use axum::{extract::State, Json};
use vita_gateway::{
    AuthResponse, AuthService, ChangePasswordRequest, LoginRequest, RefreshTokenRequest,
    RegisterRequest,
};

use crate::extractors::{AuthUser, ValidatedJson};
use crate::response::{ApiResult, Created, NoContent};
use crate::state::AppState;

/// Register a new user account
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<RegisterRequest>,
) -> ApiResult<Created<Json<AuthResponse>>> {
    let service = AuthService::new(state.gateway());
    let response = service.register(request).await?;
    Ok(Created(Json(response)))
}

/// Log in with email and password
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<LoginRequest>,
) -> ApiResult<Json<AuthResponse>> {
    let service = AuthService::new(state.gateway());
    let response = service.login(request).await?;
    Ok(Json(response))
}

/// Refresh an access token using a refresh token
pub async fn refresh(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<RefreshTokenRequest>,
) -> ApiResult<Json<AuthResponse>> {
    let service = AuthService::new(state.gateway());
    let response = service.refresh(request).await?;
    Ok(Json(response))
}

/// Change the caller's password
pub async fn change_password(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<ChangePasswordRequest>,
) -> ApiResult<NoContent> {
    let service = AuthService::new(state.gateway());
    service.change_password(auth.user_id, request).await?;
    Ok(NoContent)
}
