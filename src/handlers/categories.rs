use axum::extract::{Path, State};
use chrono::Utc;

use super::utils::{find_one, inserted_row, updated_row};
use crate::api::{QueryParams, ValidatedJson};
use crate::baas::{decode_rows, Credential};
use crate::error::ApiError;
use crate::filter::{Filter, PageQuery};
use crate::middleware::{ApiResponse, ApiResult};
use crate::models::{Category, CategoryCreate, Message};
use crate::state::AppState;

const NOT_FOUND: &str = "Category not found";

/// GET /categories - alphabetical
pub async fn list_categories(
    State(state): State<AppState>,
    QueryParams(query): QueryParams<PageQuery>,
) -> ApiResult<Vec<Category>> {
    let filter = Filter::new()
        .select(["*"])
        .order("name asc")
        .paginate(query.pagination());

    let rows = state
        .baas
        .query(Category::TABLE, &filter, Credential::Restricted)
        .await
        .map_err(ApiError::read_failure)?;

    Ok(ApiResponse::success(decode_rows(rows).map_err(ApiError::read_failure)?))
}

/// GET /categories/:id
pub async fn get_category(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<Category> {
    let category = find_one(&state, Category::TABLE, "id", &id, Credential::Restricted, NOT_FOUND).await?;
    Ok(ApiResponse::success(category))
}

/// POST /categories (admin)
pub async fn create_category(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CategoryCreate>,
) -> ApiResult<Category> {
    let rows = state
        .baas
        .insert(Category::TABLE, payload.into_record(Utc::now()), Credential::Restricted)
        .await
        .map_err(|e| ApiError::write_failure(e, "creation_failed"))?;

    Ok(ApiResponse::created(inserted_row(rows)?))
}

/// PUT /categories/:id (admin)
pub async fn update_category(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidatedJson(payload): ValidatedJson<CategoryCreate>,
) -> ApiResult<Category> {
    let rows = state
        .baas
        .update(
            Category::TABLE,
            &Filter::new().eq("id", id),
            payload.into_patch(Utc::now()),
            Credential::Restricted,
        )
        .await
        .map_err(|e| ApiError::write_failure(e, "update_failed"))?;

    Ok(ApiResponse::success(updated_row(rows, NOT_FOUND)?))
}

/// DELETE /categories/:id (admin)
pub async fn delete_category(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<Message> {
    state
        .baas
        .delete(Category::TABLE, &Filter::new().eq("id", id), Credential::Restricted)
        .await
        .map_err(|e| ApiError::write_failure(e, "deletion_failed"))?;

    Ok(ApiResponse::message("Category deleted successfully"))
}
