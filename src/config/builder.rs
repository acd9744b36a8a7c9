use dotenvy::dotenv;
use serde::{Deserialize, Serialize};
use std::env;

use crate::constants::{BACKEND_URL_ENV, DEFAULT_BACKEND_URL, DEFAULT_LOG_DIR, DEFAULT_STRATEGY_NAME};
use crate::properties::PropertyControls;

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct BuilderConfig {
    /// Base URL the save/deploy endpoints are appended to.
    #[serde(default = "default_backend_url")]
    pub backend_url: String,
    #[serde(default = "default_strategy_name")]
    pub strategy_name: String,
    /// Directory for submissions.csv.
    #[serde(default = "default_audit_dir")]
    pub audit_dir: String,
    /// Initial values of the property controls.
    #[serde(default)]
    pub properties: Option<PropertyControls>,
}

fn default_backend_url() -> String {
    DEFAULT_BACKEND_URL.to_string()
}

fn default_strategy_name() -> String {
    DEFAULT_STRATEGY_NAME.to_string()
}

fn default_audit_dir() -> String {
    DEFAULT_LOG_DIR.to_string()
}

impl Default for BuilderConfig {
    fn default() -> Self {
        Self {
            backend_url: default_backend_url(),
            strategy_name: default_strategy_name(),
            audit_dir: default_audit_dir(),
            properties: None,
        }
    }
}

impl BuilderConfig {
    pub fn validate(&self) -> anyhow::Result<()> {
        if !(self.backend_url.starts_with("http://") || self.backend_url.starts_with("https://")) {
            return Err(anyhow::anyhow!(
                "backend_url '{}' must start with http:// or https://",
                self.backend_url
            ));
        }
        if self.strategy_name.trim().is_empty() {
            return Err(anyhow::anyhow!("strategy_name must not be empty."));
        }
        if self.audit_dir.trim().is_empty() {
            return Err(anyhow::anyhow!("audit_dir must not be empty."));
        }
        Ok(())
    }

    /// Apply `STRATEGY_BACKEND_URL` (from the environment or `.env`).
    pub fn with_env_overrides(mut self) -> Self {
        dotenv().ok(); // .env is optional

        if let Ok(url) = env::var(BACKEND_URL_ENV) {
            if !url.trim().is_empty() {
                log::debug!("{} overrides backend_url", BACKEND_URL_ENV);
                self.backend_url = url.trim().to_string();
            }
        }
        self
    }

    pub fn initial_properties(&self) -> PropertyControls {
        self.properties.clone().unwrap_or_default()
    }
}
