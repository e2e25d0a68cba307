use std::path::PathBuf;

use anyhow::Context as _;
use asegurate_core::{Catalog, DEFAULT_MODEL, GEMINI_API_KEY_VAR, client::GEMINI_MODEL_VAR};

pub const BIND_ADDR_VAR: &str = "ASEGURATE_BIND_ADDR";
pub const CATALOG_PATH_VAR: &str = "ASEGURATE_CATALOG_PATH";
pub const LOG_FORMAT_VAR: &str = "LOG_FORMAT";
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Structured JSON logging for production
    Json,
    /// Human-readable logging for development
    Pretty,
}

/// Configuration for the advisor service, read from the environment
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub bind_addr: String,
    pub gemini_api_key: Option<String>,
    pub gemini_model: String,
    pub catalog_path: Option<PathBuf>,
    pub log_format: LogFormat,
}

impl ServiceConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from any key lookup; unset and blank values fall back to defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let log_format = match get(LOG_FORMAT_VAR).as_deref() {
            Some("pretty") => LogFormat::Pretty,
            _ => LogFormat::Json,
        };

        Self {
            bind_addr: get(BIND_ADDR_VAR).unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string()),
            gemini_api_key: lookup(GEMINI_API_KEY_VAR),
            gemini_model: get(GEMINI_MODEL_VAR).unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            catalog_path: get(CATALOG_PATH_VAR).map(PathBuf::from),
            log_format,
        }
    }

    /// The catalog file when one is configured, the built-in products otherwise.
    pub fn load_catalog(&self) -> anyhow::Result<Catalog> {
        match &self.catalog_path {
            Some(path) => Catalog::from_path(path)
                .with_context(|| format!("loading catalog from {}", path.display())),
            None => Ok(Catalog::builtin()),
        }
    }
}
