//! Authentication handlers (login, register, admin check)

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use std::time::Instant;
use sso_auth_core::AuthError;
use sso_types::{AppId, UserId};

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
    pub app_id: i32,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
}

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub user_id: i64,
}

#[derive(Debug, Serialize)]
pub struct IsAdminResponse {
    pub is_admin: bool,
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /api/v1/auth/login
///
/// Exchange credentials for a session token scoped to `app_id`
pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> ApiResult<Json<LoginResponse>> {
    let start = Instant::now();
    let result = login_inner(&state, payload).await;
    record("sso_logins_total", "login", start, &result);
    result
}

async fn login_inner(
    state: &AppState,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> ApiResult<Json<LoginResponse>> {
    let Json(req) = payload.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    validate_credentials(&req.email, &req.password)?;
    if req.app_id <= 0 {
        return Err(AuthError::InvalidAppId.into());
    }

    let token = state
        .auth
        .login(&req.email, &req.password, AppId(req.app_id))
        .await?;

    Ok(Json(LoginResponse { token }))
}

/// POST /api/v1/auth/register
///
/// Create a new user; responds 201 with the assigned id
pub async fn register(
    State(state): State<AppState>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<RegisterResponse>)> {
    let start = Instant::now();
    let result = register_inner(&state, payload).await;
    record("sso_registrations_total", "register", start, &result);
    result
}

async fn register_inner(
    state: &AppState,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<RegisterResponse>)> {
    let Json(req) = payload.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    validate_credentials(&req.email, &req.password)?;

    let user_id = state
        .auth
        .register_new_user(&req.email, &req.password)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            user_id: user_id.get(),
        }),
    ))
}

/// GET /api/v1/users/{id}/admin
pub async fn is_admin(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> ApiResult<Json<IsAdminResponse>> {
    let start = Instant::now();
    let result = is_admin_inner(&state, id).await;
    record("sso_admin_checks_total", "is_admin", start, &result);
    result
}

async fn is_admin_inner(
    state: &AppState,
    id: Result<Path<i64>, PathRejection>,
) -> ApiResult<Json<IsAdminResponse>> {
    let Path(id) = id.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    if id <= 0 {
        return Err(ApiError::BadRequest("user_id is required".to_string()));
    }

    let is_admin = state.auth.is_admin(UserId(id)).await?;
    Ok(Json(IsAdminResponse { is_admin }))
}

// ============================================================================
// Helpers
// ============================================================================

fn validate_credentials(email: &str, password: &str) -> ApiResult<()> {
    if email.trim().is_empty() {
        return Err(ApiError::BadRequest("email is required".to_string()));
    }
    if !email.contains('@') {
        return Err(ApiError::BadRequest("email is malformed".to_string()));
    }
    if password.is_empty() {
        return Err(ApiError::BadRequest("password is required".to_string()));
    }
    Ok(())
}

fn record<T>(name: &'static str, op: &'static str, start: Instant, result: &ApiResult<T>) {
    let outcome = match result {
        Ok(_) => "success",
        Err(e) => e.error_code(),
    };
    metrics::counter!(name, "result" => outcome).increment(1);
    metrics::histogram!("sso_operation_duration_seconds", "op" => op)
        .record(start.elapsed().as_secs_f64());
}
