// handlers/posts.rs - /posts and /posts/:id

use axum::{
    body::Bytes,
    extract::{Path, State},
    Extension,
};
use chrono::Utc;

use super::utils::{ensure_can_modify, find_one, inserted_row, non_empty, updated_row};
use crate::api::{QueryParams, ValidatedJson};
use crate::baas::{decode_rows, Credential};
use crate::error::ApiError;
use crate::filter::{Filter, Pagination};
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::models::{Message, Post, PostCreate, PostListQuery};
use crate::state::AppState;

const NOT_FOUND: &str = "Post not found";

/// GET /posts - newest first, published only unless `published_only` says otherwise
pub async fn list_posts(
    State(state): State<AppState>,
    QueryParams(query): QueryParams<PostListQuery>,
) -> ApiResult<Vec<Post>> {
    let page = Pagination::from_params(query.limit.as_deref(), query.offset.as_deref());

    let mut filter = Filter::new().select(["*"]);
    if query.published_only() {
        filter = filter.eq("published", true);
    }
    if let Some(category) = non_empty(&query.category) {
        filter = filter.eq("category_id", category);
    }
    if let Some(author_id) = non_empty(&query.author_id) {
        filter = filter.eq("author_id", author_id);
    }
    let filter = filter.order("created_at desc").paginate(page);

    let rows = state
        .baas
        .query(Post::TABLE, &filter, Credential::Restricted)
        .await
        .map_err(ApiError::read_failure)?;
    let posts = decode_rows::<Post>(rows).map_err(ApiError::read_failure)?;

    Ok(ApiResponse::success(posts))
}

/// GET /posts/:id
pub async fn get_post(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<Post> {
    let post = find_one(&state, Post::TABLE, "id", &id, Credential::Restricted, NOT_FOUND).await?;
    Ok(ApiResponse::success(post))
}

/// POST /posts - the caller becomes the author
pub async fn create_post(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    ValidatedJson(payload): ValidatedJson<PostCreate>,
) -> ApiResult<Post> {
    let record = payload.into_record(user.id(), Utc::now());

    let rows = state
        .baas
        .insert(Post::TABLE, record, Credential::Restricted)
        .await
        .map_err(|e| ApiError::write_failure(e, "creation_failed"))?;

    Ok(ApiResponse::created(inserted_row(rows)?))
}

/// PUT /posts/:id - author or admin; the body is only parsed once ownership is settled
pub async fn update_post(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
    body: Bytes,
) -> ApiResult<Post> {
    ensure_can_modify(&state, &user, Post::TABLE, "author_id", &id, NOT_FOUND, "You can only edit your own posts").await?;

    let payload = ValidatedJson::<PostCreate>::parse(&body)?;
    let filter = Filter::new().eq("id", id.as_str());

    let rows = state
        .baas
        .update(Post::TABLE, &filter, payload.into_patch(Utc::now()), Credential::Restricted)
        .await
        .map_err(|e| ApiError::write_failure(e, "update_failed"))?;

    Ok(ApiResponse::success(updated_row(rows, NOT_FOUND)?))
}

/// DELETE /posts/:id - author or admin
pub async fn delete_post(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
) -> ApiResult<Message> {
    ensure_can_modify(&state, &user, Post::TABLE, "author_id", &id, NOT_FOUND, "You can only delete your own posts").await?;

    state
        .baas
        .delete(Post::TABLE, &Filter::new().eq("id", id.as_str()), Credential::Restricted)
        .await
        .map_err(|e| ApiError::write_failure(e, "deletion_failed"))?;

    Ok(ApiResponse::message("Post deleted successfully"))
}
