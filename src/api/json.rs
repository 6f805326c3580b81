use axum::{
    async_trait,
    body::Bytes,
    extract::{FromRequest, Request},
};
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::error::ApiError;

/// JSON body that has been deserialized and passed its `validator` rules.
///
/// Any failure (unreadable body, bad JSON, missing field, wrong type, failed
/// rule) becomes a 400 `validation_error` carrying the underlying message.
#[derive(Debug, Clone)]
pub struct ValidatedJson<T>(pub T);

impl<T> ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
{
    /// Bind raw bytes; used directly by handlers that must authorize before parsing
    pub fn parse(bytes: &[u8]) -> Result<T, ApiError> {
        let value: T = serde_json::from_slice(bytes).map_err(|e| ApiError::validation_error(e.to_string()))?;
        value
            .validate()
            .map_err(|e| ApiError::validation_error(e.to_string()))?;
        Ok(value)
    }
}

#[async_trait]
impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| ApiError::validation_error(e.body_text()))?;
        Self::parse(&bytes).map(ValidatedJson)
    }
}
