// handlers/auth.rs - POST /auth/register and POST /auth/login

use axum::extract::State;
use chrono::Utc;

use crate::api::ValidatedJson;
use crate::baas::{first_row, Credential};
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult};
use crate::models::{LoginRequest, LoginResponse, Profile, RegisterRequest, RegisterResponse};
use crate::state::AppState;

/// POST /auth/register - create the auth user, then its profile row.
///
/// The profile is written with the elevated credential because the new user
/// has no session yet that row-level policies would accept.
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<RegisterRequest>,
) -> ApiResult<RegisterResponse> {
    let username = payload.username();

    let session = state
        .baas
        .sign_up(&payload.email, &payload.password)
        .await
        .map_err(|e| ApiError::auth_failure(e, "registration_failed"))?;

    let record = serde_json::to_value(Profile::new_member(&session.user.id, &username, Utc::now()))
        .map_err(|e| ApiError::internal("profile_creation_failed", e.to_string()))?;

    let profile_failed = |reason: String| {
        tracing::error!(user_id = %session.user.id, "Profile creation failed: {}", reason);
        ApiError::internal("profile_creation_failed", reason)
    };
    let rows = state
        .baas
        .insert(Profile::TABLE, record, Credential::Elevated)
        .await
        .map_err(|e| profile_failed(e.to_string()))?;
    let profile = first_row::<Profile>(rows)
        .map_err(|e| profile_failed(e.to_string()))?
        .ok_or_else(|| profile_failed("Backend returned no profile row".to_string()))?;

    tracing::info!(user_id = %session.user.id, "Registered new user");
    Ok(ApiResponse::created(RegisterResponse {
        message: "User registered successfully".to_string(),
        user: session.user,
        profile,
    }))
}

/// POST /auth/login - exchange e-mail and password for an access token
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<LoginRequest>,
) -> ApiResult<LoginResponse> {
    let session = state
        .baas
        .sign_in(&payload.email, &payload.password)
        .await
        .map_err(|e| ApiError::auth_failure(e, "authentication_failed"))?;

    let access_token = session
        .access_token
        .ok_or_else(|| ApiError::rejected("authentication_failed", "No access token issued"))?;

    Ok(ApiResponse::success(LoginResponse { access_token, user: session.user }))
}
