use std::sync::Arc;

use crate::baas::{Baas, BaasError, RestBaas};
use crate::config::AppConfig;

/// Shared by every handler and the guard; cloning is two `Arc` bumps
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub baas: Arc<dyn Baas>,
}

impl AppState {
    pub fn new(config: AppConfig, baas: Arc<dyn Baas>) -> Self {
        Self { config: Arc::new(config), baas }
    }

    /// Production wiring: a `RestBaas` built from the backend settings
    pub fn from_config(config: AppConfig) -> Result<Self, BaasError> {
        let baas = RestBaas::new(&config.baas)?;
        Ok(Self::new(config, Arc::new(baas)))
    }
}
