use axum::{
    extract::{Path, State},
    Extension,
};
use chrono::Utc;

use super::utils::{ensure_can_modify, inserted_row};
use crate::api::ValidatedJson;
use crate::baas::{decode_rows, Credential};
use crate::error::ApiError;
use crate::filter::Filter;
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::models::{Comment, CommentCreate, Message};
use crate::state::AppState;

/// GET /posts/:id/comments - oldest first, unpaginated
pub async fn list_comments(State(state): State<AppState>, Path(post_id): Path<String>) -> ApiResult<Vec<Comment>> {
    let filter = Filter::new()
        .select(["*"])
        .eq("post_id", post_id)
        .order("created_at asc");

    let rows = state
        .baas
        .query(Comment::TABLE, &filter, Credential::Restricted)
        .await
        .map_err(ApiError::read_failure)?;

    Ok(ApiResponse::success(decode_rows(rows).map_err(ApiError::read_failure)?))
}

/// POST /posts/:id/comments
pub async fn create_comment(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(post_id): Path<String>,
    ValidatedJson(payload): ValidatedJson<CommentCreate>,
) -> ApiResult<Comment> {
    let record = payload.into_record(&post_id, user.id(), Utc::now());

    let rows = state
        .baas
        .insert(Comment::TABLE, record, Credential::Restricted)
        .await
        .map_err(|e| ApiError::write_failure(e, "creation_failed"))?;

    Ok(ApiResponse::created(inserted_row(rows)?))
}

/// DELETE /posts/:id/comments/:comment_id - comment author or admin
pub async fn delete_comment(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path((_post_id, comment_id)): Path<(String, String)>,
) -> ApiResult<Message> {
    ensure_can_modify(
        &state,
        &user,
        Comment::TABLE,
        "user_id",
        &comment_id,
        "Comment not found",
        "You can only delete your own comments",
    )
    .await?;

    state
        .baas
        .delete(Comment::TABLE, &Filter::new().eq("id", comment_id), Credential::Restricted)
        .await
        .map_err(|e| ApiError::write_failure(e, "deletion_failed"))?;

    Ok(ApiResponse::message("Comment deleted successfully"))
}
