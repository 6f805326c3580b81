use axum::{
    extract::{Path, State},
    Extension,
};
use chrono::Utc;

use super::utils::{find_one, inserted_row, updated_row};
use crate::api::ValidatedJson;
use crate::baas::Credential;
use crate::error::ApiError;
use crate::filter::Filter;
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::models::{Message, WebsiteContent, WebsiteContentCreate, WebsiteContentUpdate};
use crate::state::AppState;

// Page copy is read and written with the elevated credential; writes are
// already limited to admins by the route guard.

const NOT_FOUND: &str = "Content not found";

/// GET /website-content/:page_name
pub async fn get_content(State(state): State<AppState>, Path(page_name): Path<String>) -> ApiResult<WebsiteContent> {
    let content = find_one(&state, WebsiteContent::TABLE, "page_name", &page_name, Credential::Elevated, NOT_FOUND).await?;
    Ok(ApiResponse::success(content))
}

/// POST /website-content (admin)
pub async fn create_content(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    ValidatedJson(payload): ValidatedJson<WebsiteContentCreate>,
) -> ApiResult<WebsiteContent> {
    let rows = state
        .baas
        .insert(WebsiteContent::TABLE, payload.into_record(user.id(), Utc::now()), Credential::Elevated)
        .await
        .map_err(|e| ApiError::write_failure(e, "creation_failed"))?;

    Ok(ApiResponse::created(inserted_row(rows)?))
}

/// PUT /website-content/:page_name (admin)
pub async fn update_content(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(page_name): Path<String>,
    ValidatedJson(payload): ValidatedJson<WebsiteContentUpdate>,
) -> ApiResult<WebsiteContent> {
    let rows = state
        .baas
        .update(
            WebsiteContent::TABLE,
            &Filter::new().eq("page_name", page_name),
            payload.into_patch(user.id(), Utc::now()),
            Credential::Elevated,
        )
        .await
        .map_err(|e| ApiError::write_failure(e, "update_failed"))?;

    Ok(ApiResponse::success(updated_row(rows, NOT_FOUND)?))
}

/// DELETE /website-content/:page_name (admin)
pub async fn delete_content(State(state): State<AppState>, Path(page_name): Path<String>) -> ApiResult<Message> {
    state
        .baas
        .delete(WebsiteContent::TABLE, &Filter::new().eq("page_name", page_name), Credential::Elevated)
        .await
        .map_err(|e| ApiError::write_failure(e, "deletion_failed"))?;

    Ok(ApiResponse::message("Content deleted successfully"))
}
