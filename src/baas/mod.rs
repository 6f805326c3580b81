//! Client for the hosted backend: PostgREST-style table access plus the
//! GoTrue-style auth endpoint.
//!
//! Handlers and the guard only see the [`Baas`] trait; [`RestBaas`] is the
//! production implementation and tests substitute an in-memory one.

pub mod error;
pub mod rest;

pub use error::BaasError;
pub use rest::RestBaas;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::filter::Filter;
use crate::models::{AuthSession, Identity};

/// Which key a table call is signed with.
///
/// `Restricted` is the anonymous key, subject to the backend's row-level
/// policies. `Elevated` is the service-role key and bypasses them; it is
/// reserved for profile creation at registration and website content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Credential {
    Restricted,
    Elevated,
}

#[async_trait]
pub trait Baas: Send + Sync {
    async fn query(&self, table: &str, filter: &Filter, credential: Credential) -> Result<Vec<Value>, BaasError>;

    async fn insert(&self, table: &str, record: Value, credential: Credential) -> Result<Vec<Value>, BaasError>;

    async fn update(
        &self,
        table: &str,
        filter: &Filter,
        patch: Value,
        credential: Credential,
    ) -> Result<Vec<Value>, BaasError>;

    async fn delete(&self, table: &str, filter: &Filter, credential: Credential) -> Result<(), BaasError>;

    async fn sign_up(&self, email: &str, password: &str) -> Result<AuthSession, BaasError>;

    async fn sign_in(&self, email: &str, password: &str) -> Result<AuthSession, BaasError>;

    async fn resolve_identity(&self, token: &str) -> Result<Identity, BaasError>;
}

/// Decode every returned row into `T`
pub fn decode_rows<T: DeserializeOwned>(rows: Vec<Value>) -> Result<Vec<T>, BaasError> {
    rows.into_iter()
        .map(|row| serde_json::from_value(row).map_err(BaasError::from))
        .collect()
}

/// Decode the first returned row, if any
pub fn first_row<T: DeserializeOwned>(rows: Vec<Value>) -> Result<Option<T>, BaasError> {
    rows.into_iter()
        .next()
        .map(|row| serde_json::from_value(row).map_err(BaasError::from))
        .transpose()
}
