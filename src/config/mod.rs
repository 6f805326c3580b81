use serde::{Deserialize, Serialize};
use std::env;
use thiserror::Error;
use url::Url;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub server: ServerConfig,
    pub baas: BaasConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BaasConfig {
    pub url: String,
    pub anon_key: String,
    #[serde(skip_serializing)]
    pub service_role_key: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub json: bool,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    Missing(&'static str),

    #[error("invalid value for {name}: {value}")]
    Invalid { name: &'static str, value: String },
}

impl AppConfig {
    /// Build from the process environment (call `dotenvy::dotenv()` first)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(|key| env::var(key).ok())
    }

    /// Build from any variable source: pick the `APP_ENV` preset, apply
    /// overrides, then check the backend credentials.
    pub fn from_vars<F>(vars: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let environment = match vars("APP_ENV").as_deref() {
            Some("production") | Some("prod") => Environment::Production,
            Some("staging") | Some("stage") => Environment::Staging,
            _ => Environment::Development,
        };

        // Set defaults based on environment, then override with specific env vars
        let config = match environment {
            Environment::Production => Self::production(),
            Environment::Staging => Self::staging(),
            Environment::Development => Self::development(),
        }
        .with_overrides(&vars);

        config.validate()?;
        Ok(config)
    }

    fn with_overrides<F>(mut self, vars: &F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        // Backend
        if let Some(v) = vars("SUPABASE_URL") {
            self.baas.url = v.trim().to_string();
        }
        if let Some(v) = vars("SUPABASE_KEY") {
            self.baas.anon_key = v.trim().to_string();
        }
        if let Some(v) = vars("SUPABASE_SERVICE_ROLE_KEY") {
            self.baas.service_role_key = v.trim().to_string();
        }
        if let Some(v) = vars("BAAS_TIMEOUT_SECS") {
            self.baas.timeout_secs = v.parse().unwrap_or(self.baas.timeout_secs);
        }

        // Server
        if let Some(v) = vars("HOST") {
            self.server.host = v;
        }
        if let Some(v) = vars("PORT") {
            self.server.port = v.parse().unwrap_or(self.server.port);
        }

        // Logging
        match vars("LOG_FORMAT").as_deref() {
            Some("json") => self.logging.json = true,
            Some("text") => self.logging.json = false,
            _ => {}
        }

        self
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.baas.url.is_empty() {
            return Err(ConfigError::Missing("SUPABASE_URL"));
        }
        if Url::parse(&self.baas.url).is_err() {
            return Err(ConfigError::Invalid { name: "SUPABASE_URL", value: self.baas.url.clone() });
        }
        if self.baas.anon_key.is_empty() {
            return Err(ConfigError::Missing("SUPABASE_KEY"));
        }
        if self.baas.service_role_key.is_empty() {
            return Err(ConfigError::Missing("SUPABASE_SERVICE_ROLE_KEY"));
        }
        Ok(())
    }

    fn development() -> Self {
        Self {
            environment: Environment::Development,
            server: ServerConfig::default(),
            baas: BaasConfig::with_timeout(30),
            logging: LoggingConfig { json: false },
        }
    }

    fn staging() -> Self {
        Self {
            environment: Environment::Staging,
            server: ServerConfig::default(),
            baas: BaasConfig::with_timeout(15),
            logging: LoggingConfig { json: false },
        }
    }

    fn production() -> Self {
        Self {
            environment: Environment::Production,
            server: ServerConfig::default(),
            baas: BaasConfig::with_timeout(10),
            logging: LoggingConfig { json: true },
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: "0.0.0.0".to_string(), port: 8000 }
    }
}

impl BaasConfig {
    fn with_timeout(timeout_secs: u64) -> Self {
        Self {
            url: String::new(),
            anon_key: String::new(),
            service_role_key: String::new(),
            timeout_secs,
        }
    }
}
