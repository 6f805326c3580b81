use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder};
use serde_json::{json, Value};

use super::{Baas, BaasError, Credential};
use crate::config::BaasConfig;
use crate::filter::Filter;
use crate::models::{AuthSession, Identity};

/// reqwest-backed client for the hosted backend's REST and auth endpoints
#[derive(Debug, Clone)]
pub struct RestBaas {
    client: Client,
    base_url: String,
    anon_key: String,
    service_role_key: String,
}

impl RestBaas {
    pub fn new(config: &BaasConfig) -> Result<Self, BaasError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| BaasError::Connection(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.url.trim_end_matches('/').to_string(),
            anon_key: config.anon_key.clone(),
            service_role_key: config.service_role_key.clone(),
        })
    }

    fn table_url(&self, table: &str, filter: Option<&Filter>) -> Result<String, BaasError> {
        Filter::validate_table_name(table)?;

        let mut url = format!("{}/rest/v1/{}", self.base_url, table);
        if let Some(filter) = filter {
            let query = filter.to_query_string()?;
            if !query.is_empty() {
                url.push('?');
                url.push_str(&query);
            }
        }
        Ok(url)
    }

    fn auth_url(&self, path: &str) -> String {
        format!("{}/auth/v1/{}", self.base_url, path)
    }

    fn bearer(&self, credential: Credential) -> &str {
        match credential {
            Credential::Restricted => &self.anon_key,
            Credential::Elevated => &self.service_role_key,
        }
    }

    fn table_request(&self, method: Method, url: String, credential: Credential) -> RequestBuilder {
        self.client
            .request(method, url)
            .header("apikey", &self.anon_key)
            .bearer_auth(self.bearer(credential))
    }

    /// Send once; any 2xx yields the raw body, anything else is `Rejected`
    async fn send(request: RequestBuilder) -> Result<String, BaasError> {
        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            tracing::debug!(status = status.as_u16(), "BaaS rejected request");
            return Err(BaasError::Rejected { status: status.as_u16(), body });
        }
        Ok(body)
    }

    fn parse_rows(body: &str) -> Result<Vec<Value>, BaasError> {
        Ok(serde_json::from_str::<Vec<Value>>(body)?)
    }

    /// Accepts both `{access_token, user: {...}}` and a bare user object
    fn parse_session(body: &str) -> Result<AuthSession, BaasError> {
        let value: Value = serde_json::from_str(body)?;
        let access_token = value
            .get("access_token")
            .and_then(Value::as_str)
            .map(str::to_string);

        let user = match value.get("user") {
            Some(user) if user.is_object() => serde_json::from_value::<Identity>(user.clone())?,
            _ => serde_json::from_value::<Identity>(value)?,
        };

        Ok(AuthSession { access_token, user })
    }

    async fn password_request(&self, url: String, email: &str, password: &str) -> Result<AuthSession, BaasError> {
        let request = self
            .client
            .post(url)
            .header("apikey", &self.anon_key)
            .json(&json!({ "email": email, "password": password }));
        let body = Self::send(request).await?;
        Self::parse_session(&body)
    }
}

#[async_trait]
impl Baas for RestBaas {
    async fn query(&self, table: &str, filter: &Filter, credential: Credential) -> Result<Vec<Value>, BaasError> {
        let url = self.table_url(table, Some(filter))?;
        tracing::debug!(table, ?credential, "BaaS query");

        let body = Self::send(self.table_request(Method::GET, url, credential)).await?;
        Self::parse_rows(&body)
    }

    async fn insert(&self, table: &str, record: Value, credential: Credential) -> Result<Vec<Value>, BaasError> {
        let url = self.table_url(table, None)?;
        tracing::debug!(table, ?credential, "BaaS insert");

        let request = self
            .table_request(Method::POST, url, credential)
            .header("Prefer", "return=representation")
            .json(&record);
        let body = Self::send(request).await?;
        Self::parse_rows(&body)
    }

    async fn update(
        &self,
        table: &str,
        filter: &Filter,
        patch: Value,
        credential: Credential,
    ) -> Result<Vec<Value>, BaasError> {
        let url = self.table_url(table, Some(filter))?;
        tracing::debug!(table, ?credential, "BaaS update");

        let request = self
            .table_request(Method::PATCH, url, credential)
            .header("Prefer", "return=representation")
            .json(&patch);
        let body = Self::send(request).await?;
        Self::parse_rows(&body)
    }

    async fn delete(&self, table: &str, filter: &Filter, credential: Credential) -> Result<(), BaasError> {
        let url = self.table_url(table, Some(filter))?;
        tracing::debug!(table, ?credential, "BaaS delete");

        Self::send(self.table_request(Method::DELETE, url, credential)).await?;
        Ok(())
    }

    async fn sign_up(&self, email: &str, password: &str) -> Result<AuthSession, BaasError> {
        self.password_request(self.auth_url("signup"), email, password).await
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<AuthSession, BaasError> {
        self.password_request(self.auth_url("token?grant_type=password"), email, password)
            .await
    }

    async fn resolve_identity(&self, token: &str) -> Result<Identity, BaasError> {
        let request = self
            .client
            .get(self.auth_url("user"))
            .header("apikey", &self.anon_key)
            .bearer_auth(token);
        let body = Self::send(request).await?;
        Ok(serde_json::from_str(&body)?)
    }
}
