use axum::{extract::Request, middleware::Next, response::Response};

use super::auth::AuthUser;
use crate::error::ApiError;

/// Admin stage. Always layered inside [`super::authenticate`], which supplies `AuthUser`.
pub async fn require_admin(request: Request, next: Next) -> Result<Response, ApiError> {
    let user = request
        .extensions()
        .get::<AuthUser>()
        .ok_or_else(|| ApiError::unauthorized("Authentication required"))?;

    if !user.is_admin() {
        tracing::warn!(user_id = %user.id(), path = %request.uri().path(), "Admin access denied");
        return Err(ApiError::forbidden("Admin access required"));
    }

    Ok(next.run(request).await)
}
