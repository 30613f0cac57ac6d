#![allow(clippy::result_large_err)]

use crate::core::error::AppError;
use crate::core::types::ErrorCategory;
use std::env;

pub const SOURCE_URL_VAR: &str = "SOURCE_N8N_URL";
pub const SOURCE_KEY_VAR: &str = "SOURCE_API_KEY";
pub const DESTINATION_URL_VAR: &str = "DESTINATION_N8N_URL";
pub const DESTINATION_KEY_VAR: &str = "DESTINATION_API_KEY";

/// Credentials for one n8n instance: where it lives and how to authenticate.
#[derive(Debug, Clone)]
pub struct InstanceConfig {
    /// Base URL with any trailing slash trimmed, e.g. `https://n8n.example.com`.
    pub base_url: String,
    pub api_key: String,
}

impl InstanceConfig {
    pub fn new<U: Into<String>, K: Into<String>>(base_url: U, api_key: K) -> Self {
        InstanceConfig {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        }
    }
}

/// Process-wide relay configuration, loaded once at startup and never mutated.
#[derive(Debug, Clone)]
pub struct RelayConfig {
    pub source: InstanceConfig,
    pub destination: InstanceConfig,
}

impl RelayConfig {
    /// Load both credential pairs from the environment.
    ///
    /// Every missing variable is reported in a single error so the operator can
    /// fix the `.env` file in one pass.
    pub fn from_env() -> Result<RelayConfig, AppError> {
        let mut missing = Vec::new();

        let source_url = require_var(SOURCE_URL_VAR, &mut missing);
        let source_key = require_var(SOURCE_KEY_VAR, &mut missing);
        let destination_url = require_var(DESTINATION_URL_VAR, &mut missing);
        let destination_key = require_var(DESTINATION_KEY_VAR, &mut missing);

        if !missing.is_empty() {
            return Err(AppError::new(
                ErrorCategory::ConfigError,
                format!(
                    "missing required environment variables: {}",
                    missing.join(", ")
                ),
            )
            .with_code("RLY-CONFIG-001"));
        }

        Ok(RelayConfig {
            source: InstanceConfig::new(source_url.unwrap(), source_key.unwrap()),
            destination: InstanceConfig::new(destination_url.unwrap(), destination_key.unwrap()),
        })
    }
}

fn require_var(name: &'static str, missing: &mut Vec<&'static str>) -> Option<String> {
    match env::var(name) {
        Ok(value) if !value.trim().is_empty() => Some(value),
        _ => {
            missing.push(name);
            None
        }
    }
}
