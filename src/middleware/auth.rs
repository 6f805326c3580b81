use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, HeaderMap},
    middleware::Next,
    response::Response,
};

use crate::baas::{first_row, Baas, Credential};
use crate::error::ApiError;
use crate::filter::Filter;
use crate::models::{Identity, Profile};
use crate::state::AppState;

/// Typed request context placed in extensions by [`authenticate`]
#[derive(Clone, Debug)]
pub struct AuthUser {
    pub identity: Identity,
    pub profile: Profile,
}

impl AuthUser {
    pub fn id(&self) -> &str {
        &self.identity.id
    }

    pub fn is_admin(&self) -> bool {
        self.profile.is_admin()
    }

    /// Owners and admins may mutate a row
    pub fn can_modify(&self, owner_id: &str) -> bool {
        self.profile.id == owner_id || self.is_admin()
    }
}

/// Authentication stage: bearer token -> identity -> profile.
///
/// Aborts with 401 for a missing, malformed or rejected token and with 404
/// when the identity has no single matching profile row.
pub async fn authenticate(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_bearer_token(request.headers()).map_err(|msg| {
        tracing::warn!(path = %request.uri().path(), "Rejected authorization header: {}", msg);
        ApiError::unauthorized(msg)
    })?;

    let identity = state.baas.resolve_identity(&token).await.map_err(|e| {
        tracing::warn!("Token did not resolve to an identity: {}", e);
        ApiError::unauthorized("Invalid authentication credentials")
    })?;

    let profile = load_profile(state.baas.as_ref(), &identity.id).await?;
    tracing::debug!(user_id = %identity.id, admin = profile.is_admin(), "Authenticated request");

    request.extensions_mut().insert(AuthUser { identity, profile });
    Ok(next.run(request).await)
}

/// Exactly `Bearer <token>`: two space-separated parts, literal scheme, non-empty token
pub fn extract_bearer_token(headers: &HeaderMap) -> Result<String, &'static str> {
    let header = match headers.get(AUTHORIZATION) {
        Some(value) => value.to_str().map_err(|_| "Invalid authorization header format")?,
        None => return Err("Authorization header is required"),
    };

    if header.is_empty() {
        return Err("Authorization header is required");
    }

    let parts: Vec<&str> = header.split(' ').collect();
    match parts.as_slice() {
        ["Bearer", token] if !token.is_empty() => Ok(token.to_string()),
        _ => Err("Invalid authorization header format"),
    }
}

async fn load_profile(baas: &dyn Baas, user_id: &str) -> Result<Profile, ApiError> {
    let filter = Filter::new().select(["*"]).eq("id", user_id);
    let not_found = || ApiError::not_found("User profile not found");

    let rows = baas.query(Profile::TABLE, &filter, Credential::Restricted).await.map_err(|e| {
        tracing::warn!(user_id, "Profile lookup failed: {}", e);
        not_found()
    })?;

    if rows.len() != 1 {
        tracing::warn!(user_id, rows = rows.len(), "Expected exactly one profile row");
        return Err(not_found());
    }

    first_row::<Profile>(rows)
        .map_err(|e| {
            tracing::warn!(user_id, "Profile row undecodable: {}", e);
            not_found()
        })?
        .ok_or_else(not_found)
}
