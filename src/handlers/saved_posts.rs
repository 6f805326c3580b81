use axum::{
    extract::{Path, State},
    Extension,
};
use chrono::Utc;

use super::utils::find_one;
use crate::api::QueryParams;
use crate::baas::{decode_rows, Credential};
use crate::error::ApiError;
use crate::filter::{Filter, PageQuery};
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::models::{Message, Post, SavedPost};
use crate::state::AppState;

/// POST /posts/:id/save
///
/// Check-then-insert: two concurrent saves of the same pair can both pass the
/// existence check, and nothing at this layer stops the second row.
pub async fn save_post(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(post_id): Path<String>,
) -> ApiResult<Message> {
    find_one::<Post>(&state, Post::TABLE, "id", &post_id, Credential::Restricted, "Post not found").await?;

    let existing = Filter::new()
        .select(["id"])
        .eq("user_id", user.id())
        .eq("post_id", post_id.as_str());
    let rows = state
        .baas
        .query(SavedPost::TABLE, &existing, Credential::Restricted)
        .await
        .map_err(ApiError::read_failure)?;
    if !rows.is_empty() {
        return Err(ApiError::conflict("already_saved", "Post already saved"));
    }

    state
        .baas
        .insert(SavedPost::TABLE, SavedPost::record(user.id(), &post_id, Utc::now()), Credential::Restricted)
        .await
        .map_err(|e| ApiError::write_failure(e, "save_failed"))?;

    Ok(ApiResponse::message("Post saved successfully"))
}

/// DELETE /posts/:id/unsave - removing a pair that was never saved also succeeds
pub async fn unsave_post(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(post_id): Path<String>,
) -> ApiResult<Message> {
    let filter = Filter::new().eq("user_id", user.id()).eq("post_id", post_id);

    state
        .baas
        .delete(SavedPost::TABLE, &filter, Credential::Restricted)
        .await
        .map_err(|e| ApiError::write_failure(e, "unsave_failed"))?;

    Ok(ApiResponse::message("Post unsaved successfully"))
}

/// GET /saved-posts - the caller's bookmarks, newest first
pub async fn list_saved_posts(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    QueryParams(query): QueryParams<PageQuery>,
) -> ApiResult<Vec<SavedPost>> {
    let filter = Filter::new()
        .select(["*"])
        .eq("user_id", user.id())
        .order("created_at desc")
        .paginate(query.pagination());

    let rows = state
        .baas
        .query(SavedPost::TABLE, &filter, Credential::Restricted)
        .await
        .map_err(ApiError::read_failure)?;

    Ok(ApiResponse::success(decode_rows(rows).map_err(ApiError::read_failure)?))
}
