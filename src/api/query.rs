use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use url::form_urlencoded;

use crate::error::ApiError;

/// Query string bound into `T`, keeping the first occurrence of each key.
///
/// Values are handed to `T` as strings, so `T` should declare its fields as
/// `Option<String>` and interpret them itself. A repeated key never rejects
/// the request; a shape `T` cannot accept is a 400 `validation_error`.
#[derive(Debug, Clone, Default)]
pub struct QueryParams<T>(pub T);

impl<T: DeserializeOwned> QueryParams<T> {
    pub fn parse(query: Option<&str>) -> Result<T, ApiError> {
        let mut params = Map::new();
        for (key, value) in form_urlencoded::parse(query.unwrap_or_default().as_bytes()) {
            params
                .entry(key.into_owned())
                .or_insert_with(|| Value::String(value.into_owned()));
        }
        serde_json::from_value(Value::Object(params)).map_err(|e| ApiError::validation_error(e.to_string()))
    }
}

#[async_trait]
impl<S, T> FromRequestParts<S> for QueryParams<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Self::parse(parts.uri.query()).map(QueryParams)
    }
}
