#![allow(dead_code)]

use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering as AtomicOrdering};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::{Method, StatusCode};
use serde_json::{json, Value};

use lab_hack_nexus_api::baas::{Baas, BaasError, Credential};
use lab_hack_nexus_api::config::AppConfig;
use lab_hack_nexus_api::filter::{Filter, FilterOp, FilterWhereInfo, SortDirection};
use lab_hack_nexus_api::models::{AuthSession, Identity};
use lab_hack_nexus_api::{app, AppState};

pub const PASSWORD: &str = "password123";

struct Account {
    password: String,
    identity: Identity,
}

/// In-memory stand-in for the hosted backend.
///
/// Tables are vectors of JSON rows evaluated against `Filter` the way the
/// REST dialect would. `set_offline` makes every table and auth call fail
/// with a connection error; `set_reject_writes` makes writes come back rejected.
#[derive(Default)]
pub struct MemoryBaas {
    tables: Mutex<HashMap<String, Vec<Value>>>,
    accounts: Mutex<HashMap<String, Account>>,
    tokens: Mutex<HashMap<String, Identity>>,
    credentials: Mutex<Vec<(String, Credential)>>,
    offline: AtomicBool,
    reject_writes: AtomicBool,
    empty_inserts: AtomicBool,
}

impl MemoryBaas {
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, AtomicOrdering::SeqCst);
    }

    pub fn set_reject_writes(&self, reject: bool) {
        self.reject_writes.store(reject, AtomicOrdering::SeqCst);
    }

    /// Inserts still store the row but answer with an empty representation
    pub fn set_empty_inserts(&self, empty: bool) {
        self.empty_inserts.store(empty, AtomicOrdering::SeqCst);
    }

    /// Create an auth account with a profile row; returns `(token, user_id)`
    pub fn add_user(&self, email: &str, is_admin: bool) -> (String, String) {
        let (token, id) = self.add_identity(email);
        let username = email.split('@').next().unwrap_or(email);
        self.insert_row(
            "profiles",
            json!({
                "id": id,
                "username": username,
                "is_admin": is_admin,
                "created_at": Utc::now(),
                "updated_at": Utc::now(),
            }),
        );
        (token, id)
    }

    /// Create an auth account with no profile row; returns `(token, user_id)`
    pub fn add_identity(&self, email: &str) -> (String, String) {
        let identity = Identity { id: uuid::Uuid::new_v4().to_string(), email: email.to_string() };
        let token = self.issue_token(&identity);
        self.accounts.lock().unwrap().insert(
            email.to_string(),
            Account { password: PASSWORD.to_string(), identity: identity.clone() },
        );
        (token, identity.id)
    }

    pub fn insert_row(&self, table: &str, mut row: Value) -> Value {
        if row.get("id").map_or(true, Value::is_null) {
            row["id"] = json!(uuid::Uuid::new_v4().to_string());
        }
        self.tables
            .lock()
            .unwrap()
            .entry(table.to_string())
            .or_default()
            .push(row.clone());
        row
    }

    pub fn rows(&self, table: &str) -> Vec<Value> {
        self.tables.lock().unwrap().get(table).cloned().unwrap_or_default()
    }

    pub fn credentials_used(&self, table: &str) -> Vec<Credential> {
        self.credentials
            .lock()
            .unwrap()
            .iter()
            .filter(|(t, _)| t == table)
            .map(|(_, c)| *c)
            .collect()
    }

    fn issue_token(&self, identity: &Identity) -> String {
        let token = format!("token-{}", uuid::Uuid::new_v4());
        self.tokens.lock().unwrap().insert(token.clone(), identity.clone());
        token
    }

    fn table_call(&self, table: &str, credential: Credential) -> Result<(), BaasError> {
        self.credentials.lock().unwrap().push((table.to_string(), credential));
        if self.offline.load(AtomicOrdering::SeqCst) {
            return Err(BaasError::Connection("connection refused".to_string()));
        }
        Ok(())
    }

    fn auth_call(&self) -> Result<(), BaasError> {
        if self.offline.load(AtomicOrdering::SeqCst) {
            return Err(BaasError::Connection("connection refused".to_string()));
        }
        Ok(())
    }

    fn write_call(&self, table: &str, credential: Credential) -> Result<(), BaasError> {
        self.table_call(table, credential)?;
        if self.reject_writes.load(AtomicOrdering::SeqCst) {
            return Err(BaasError::Rejected { status: 400, body: "write rejected".to_string() });
        }
        Ok(())
    }
}

fn compare(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    match (a, b) {
        (Some(Value::String(x)), Some(Value::String(y))) => {
            match (DateTime::parse_from_rfc3339(x), DateTime::parse_from_rfc3339(y)) {
                (Ok(x), Ok(y)) => x.cmp(&y),
                _ => x.cmp(y),
            }
        }
        (Some(Value::Number(x)), Some(Value::Number(y))) => x
            .as_f64()
            .partial_cmp(&y.as_f64())
            .unwrap_or(Ordering::Equal),
        (Some(Value::Bool(x)), Some(Value::Bool(y))) => x.cmp(y),
        (None | Some(Value::Null), None | Some(Value::Null)) => Ordering::Equal,
        (None | Some(Value::Null), _) => Ordering::Less,
        (_, None | Some(Value::Null)) => Ordering::Greater,
        _ => Ordering::Equal,
    }
}

fn matches_condition(row: &Value, condition: &FilterWhereInfo) -> bool {
    let field = row.get(&condition.column);
    let is_null = field.map_or(true, Value::is_null);
    match condition.operator {
        FilterOp::Eq if condition.data.is_null() => is_null,
        FilterOp::Eq => field == Some(&condition.data),
        FilterOp::Is => field.unwrap_or(&Value::Null) == &condition.data,
    }
}

fn matches(row: &Value, filter: &Filter) -> bool {
    filter.conditions().iter().all(|c| matches_condition(row, c))
}

fn project(row: &Value, columns: &[String]) -> Value {
    if columns.is_empty() || columns.iter().any(|c| c == "*") {
        return row.clone();
    }
    let mut out = serde_json::Map::new();
    for column in columns {
        if let Some(value) = row.get(column) {
            out.insert(column.clone(), value.clone());
        }
    }
    Value::Object(out)
}

#[async_trait]
impl Baas for MemoryBaas {
    async fn query(&self, table: &str, filter: &Filter, credential: Credential) -> Result<Vec<Value>, BaasError> {
        self.table_call(table, credential)?;
        let mut rows: Vec<Value> = self.rows(table).into_iter().filter(|r| matches(r, filter)).collect();

        for order in filter.order_by().iter().rev() {
            rows.sort_by(|a, b| {
                let ordering = compare(a.get(&order.column), b.get(&order.column));
                match order.sort {
                    SortDirection::Asc => ordering,
                    SortDirection::Desc => ordering.reverse(),
                }
            });
        }

        let offset = filter.offset_value().unwrap_or(0) as usize;
        let limit = filter.limit_value().map_or(usize::MAX, |l| l as usize);
        Ok(rows
            .iter()
            .skip(offset)
            .take(limit)
            .map(|r| project(r, filter.select_columns()))
            .collect())
    }

    async fn insert(&self, table: &str, record: Value, credential: Credential) -> Result<Vec<Value>, BaasError> {
        self.write_call(table, credential)?;
        let row = self.insert_row(table, record);
        if self.empty_inserts.load(AtomicOrdering::SeqCst) {
            return Ok(Vec::new());
        }
        Ok(vec![row])
    }

    async fn update(
        &self,
        table: &str,
        filter: &Filter,
        patch: Value,
        credential: Credential,
    ) -> Result<Vec<Value>, BaasError> {
        self.write_call(table, credential)?;
        let mut tables = self.tables.lock().unwrap();
        let mut updated = Vec::new();
        for row in tables.entry(table.to_string()).or_default().iter_mut() {
            if !matches(row, filter) {
                continue;
            }
            if let (Some(target), Some(changes)) = (row.as_object_mut(), patch.as_object()) {
                for (key, value) in changes {
                    target.insert(key.clone(), value.clone());
                }
            }
            updated.push(row.clone());
        }
        Ok(updated)
    }

    async fn delete(&self, table: &str, filter: &Filter, credential: Credential) -> Result<(), BaasError> {
        self.write_call(table, credential)?;
        if let Some(rows) = self.tables.lock().unwrap().get_mut(table) {
            rows.retain(|r| !matches(r, filter));
        }
        Ok(())
    }

    async fn sign_up(&self, email: &str, password: &str) -> Result<AuthSession, BaasError> {
        self.auth_call()?;
        if self.accounts.lock().unwrap().contains_key(email) {
            return Err(BaasError::Rejected { status: 422, body: "User already registered".to_string() });
        }
        let identity = Identity { id: uuid::Uuid::new_v4().to_string(), email: email.to_string() };
        let token = self.issue_token(&identity);
        self.accounts.lock().unwrap().insert(
            email.to_string(),
            Account { password: password.to_string(), identity: identity.clone() },
        );
        Ok(AuthSession { access_token: Some(token), user: identity })
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<AuthSession, BaasError> {
        self.auth_call()?;
        let identity = {
            let accounts = self.accounts.lock().unwrap();
            match accounts.get(email) {
                Some(account) if account.password == password => account.identity.clone(),
                _ => {
                    return Err(BaasError::Rejected {
                        status: 400,
                        body: "Invalid login credentials".to_string(),
                    })
                }
            }
        };
        let token = self.issue_token(&identity);
        Ok(AuthSession { access_token: Some(token), user: identity })
    }

    async fn resolve_identity(&self, token: &str) -> Result<Identity, BaasError> {
        self.tokens
            .lock()
            .unwrap()
            .get(token)
            .cloned()
            .ok_or_else(|| BaasError::Rejected { status: 401, body: "invalid JWT".to_string() })
    }
}

pub fn test_config() -> Result<AppConfig> {
    Ok(AppConfig::from_vars(|key| match key {
        "SUPABASE_URL" => Some("http://127.0.0.1:9".to_string()),
        "SUPABASE_KEY" => Some("anon-key".to_string()),
        "SUPABASE_SERVICE_ROLE_KEY" => Some("service-key".to_string()),
        _ => None,
    })?)
}

/// The real router on a free port, backed by a fresh `MemoryBaas`
pub struct TestServer {
    pub port: u16,
    pub base_url: String,
    pub baas: Arc<MemoryBaas>,
    client: reqwest::Client,
}

impl TestServer {
    pub async fn spawn() -> Result<Self> {
        let baas = Arc::new(MemoryBaas::default());
        let state = AppState::new(test_config()?, baas.clone());

        // Pick an unused port for isolation
        let port = portpicker::pick_unused_port().context("failed to pick free port")?;
        let listener = tokio::net::TcpListener::bind(("127.0.0.1", port))
            .await
            .context("failed to bind test listener")?;
        tokio::spawn(async move {
            let _ = axum::serve(listener, app(state)).await;
        });

        let server = Self {
            port,
            base_url: format!("http://127.0.0.1:{}", port),
            baas,
            client: reqwest::Client::new(),
        };
        server.wait_ready(Duration::from_secs(5)).await?;
        Ok(server)
    }

    async fn wait_ready(&self, timeout: Duration) -> Result<()> {
        let deadline = Instant::now() + timeout;
        loop {
            if Instant::now() > deadline {
                break;
            }
            if let Ok(resp) = self.client.get(format!("{}/health", self.base_url)).send().await {
                if resp.status() == StatusCode::OK {
                    return Ok(());
                }
            }
            tokio::time::sleep(Duration::from_millis(50)).await;
        }
        anyhow::bail!("server did not become ready on {} within {:?}", self.base_url, timeout)
    }

    /// Send a request and return the status plus the body as JSON
    /// (non-JSON bodies come back as a JSON string)
    pub async fn send(
        &self,
        method: Method,
        path: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> Result<(StatusCode, Value)> {
        let mut request = self.client.request(method, format!("{}{}", self.base_url, path));
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }
        if let Some(body) = body {
            request = request.json(&body);
        }
        let res = request.send().await?;
        let status = res.status();
        let text = res.text().await?;
        let value = serde_json::from_str(&text).unwrap_or(Value::String(text));
        Ok((status, value))
    }

    pub async fn get(&self, path: &str, token: Option<&str>) -> Result<(StatusCode, Value)> {
        self.send(Method::GET, path, token, None).await
    }

    pub async fn post(&self, path: &str, token: Option<&str>, body: Value) -> Result<(StatusCode, Value)> {
        self.send(Method::POST, path, token, Some(body)).await
    }

    pub async fn put(&self, path: &str, token: Option<&str>, body: Value) -> Result<(StatusCode, Value)> {
        self.send(Method::PUT, path, token, Some(body)).await
    }

    pub async fn delete(&self, path: &str, token: Option<&str>) -> Result<(StatusCode, Value)> {
        self.send(Method::DELETE, path, token, None).await
    }

    /// Raw request builder for header-level tests
    pub fn request(&self, method: Method, path: &str) -> reqwest::RequestBuilder {
        self.client.request(method, format!("{}{}", self.base_url, path))
    }
}

/// A post row owned by `author_id`, created `minutes_ago` before now
pub fn seed_post(baas: &MemoryBaas, author_id: &str, title: &str, published: bool, minutes_ago: i64) -> Value {
    let created = Utc::now() - chrono::Duration::minutes(minutes_ago);
    baas.insert_row(
        "posts",
        json!({
            "title": title,
            "content": format!("{} body", title),
            "slug": title.to_lowercase().replace(' ', "-"),
            "author_id": author_id,
            "published": published,
            "created_at": created,
            "updated_at": created,
        }),
    )
}
