use axum::{
    body::Bytes,
    extract::{Path, State},
    Extension,
};
use chrono::Utc;

use super::utils::{find_one, updated_row};
use crate::api::ValidatedJson;
use crate::baas::Credential;
use crate::error::ApiError;
use crate::filter::Filter;
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::models::{Profile, ProfileUpdate};
use crate::state::AppState;

const NOT_FOUND: &str = "Profile not found";

/// GET /profiles/me - the profile the guard already resolved
pub async fn get_current_profile(Extension(user): Extension<AuthUser>) -> ApiResult<Profile> {
    Ok(ApiResponse::success(user.profile))
}

/// GET /profiles/:id
pub async fn get_profile(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<Profile> {
    let profile = find_one(&state, Profile::TABLE, "id", &id, Credential::Restricted, NOT_FOUND).await?;
    Ok(ApiResponse::success(profile))
}

/// PUT /profiles/:id - self or admin, partial update
pub async fn update_profile(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
    body: Bytes,
) -> ApiResult<Profile> {
    if !user.can_modify(&id) {
        tracing::warn!(user_id = %user.id(), target = %id, "Profile update denied");
        return Err(ApiError::forbidden("You can only update your own profile"));
    }

    let payload = ValidatedJson::<ProfileUpdate>::parse(&body)?;

    let rows = state
        .baas
        .update(
            Profile::TABLE,
            &Filter::new().eq("id", id),
            payload.into_patch(Utc::now()),
            Credential::Restricted,
        )
        .await
        .map_err(|e| ApiError::write_failure(e, "update_failed"))?;

    Ok(ApiResponse::success(updated_row(rows, NOT_FOUND)?))
}
