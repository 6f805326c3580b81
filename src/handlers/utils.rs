use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::baas::{first_row, Credential};
use crate::error::ApiError;
use crate::filter::Filter;
use crate::middleware::AuthUser;
use crate::state::AppState;

/// Fetch one row by `column = value`; absence or any failure is a 404
pub async fn find_one<T: DeserializeOwned>(
    state: &AppState,
    table: &str,
    column: &str,
    value: &str,
    credential: Credential,
    not_found: &str,
) -> Result<T, ApiError> {
    let filter = Filter::new().select(["*"]).eq(column, value);
    let rows = state
        .baas
        .query(table, &filter, credential)
        .await
        .map_err(|e| ApiError::lookup_failure(e, not_found))?;

    first_row::<T>(rows)
        .map_err(|e| ApiError::lookup_failure(e, not_found))?
        .ok_or_else(|| ApiError::not_found(not_found))
}

/// Re-fetch only the owner column of row `id` and require the caller to own
/// it or be an admin. Runs before any request body is looked at.
pub async fn ensure_can_modify(
    state: &AppState,
    user: &AuthUser,
    table: &str,
    owner_column: &str,
    id: &str,
    not_found: &str,
    forbidden: &str,
) -> Result<(), ApiError> {
    let filter = Filter::new().select([owner_column]).eq("id", id);
    let rows = state
        .baas
        .query(table, &filter, Credential::Restricted)
        .await
        .map_err(|e| ApiError::lookup_failure(e, not_found))?;

    let owner_id = rows
        .first()
        .and_then(|row| row.get(owner_column))
        .and_then(Value::as_str)
        .ok_or_else(|| ApiError::not_found(not_found))?;

    if !user.can_modify(owner_id) {
        tracing::warn!(user_id = %user.id(), table, id, "Ownership check failed");
        return Err(ApiError::forbidden(forbidden));
    }
    Ok(())
}

/// The row handed back by an insert; an empty or undecodable answer is a 500
pub fn inserted_row<T: DeserializeOwned>(rows: Vec<Value>) -> Result<T, ApiError> {
    first_row::<T>(rows)
        .map_err(|e| ApiError::internal("parse_error", format!("Failed to parse response: {}", e)))?
        .ok_or_else(|| ApiError::internal("parse_error", "Backend returned no rows"))
}

/// The row handed back by an update; zero rows means nothing matched
pub fn updated_row<T: DeserializeOwned>(rows: Vec<Value>, not_found: &str) -> Result<T, ApiError> {
    first_row::<T>(rows)
        .map_err(|e| ApiError::internal("parse_error", format!("Failed to parse response: {}", e)))?
        .ok_or_else(|| ApiError::not_found(not_found))
}

/// Treat `?field=` the same as an absent parameter
pub fn non_empty(param: &Option<String>) -> Option<&str> {
    param.as_deref().filter(|v| !v.is_empty())
}
