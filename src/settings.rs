//! Settings for the schema config service
//!
//! Settings start from defaults, may be read from a YAML file, and are then
//! overridden from environment variables.

use schema_config_monitoring::MonitoringConfig;
use schema_config_store::{FileSource, SchemaSource};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::error::SettingsError;

/// Comma separated list of schema source files
pub const ENV_SOURCES: &str = "SCHEMA_CONFIG_SOURCES";
/// Log filter directive
pub const ENV_LOG: &str = "SCHEMA_CONFIG_LOG";
/// "true"/"1" to log JSON lines
pub const ENV_JSON_LOGS: &str = "SCHEMA_CONFIG_JSON_LOGS";
/// Log file path
pub const ENV_LOG_FILE: &str = "SCHEMA_CONFIG_LOG_FILE";

/// Service settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaConfigSettings {
    /// Schema source files, merged in this order
    #[serde(default)]
    pub sources: Vec<PathBuf>,

    /// Log filter
    #[serde(default = "default_log_filter")]
    pub log_filter: String,

    /// Emit JSON log lines
    #[serde(default)]
    pub json_logs: bool,

    /// Optional log file
    #[serde(default)]
    pub log_file: Option<String>,
}

fn default_log_filter() -> String {
    "info".to_string()
}

impl Default for SchemaConfigSettings {
    fn default() -> Self {
        Self {
            sources: Vec::new(),
            log_filter: default_log_filter(),
            json_logs: false,
            log_file: None,
        }
    }
}

impl SchemaConfigSettings {
    /// Load settings from defaults and environment variables
    pub fn load() -> Self {
        let settings = Self::default().with_overrides(|key| env::var(key).ok());
        info!(source_count = settings.sources.len(), "Loaded schema config settings");
        settings
    }

    /// Load settings from a YAML file, then apply environment variables
    pub fn load_with_file(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let settings = Self::from_yaml_file(path)?.with_overrides(|key| env::var(key).ok());
        info!(source_count = settings.sources.len(), "Loaded schema config settings");
        Ok(settings)
    }

    /// Read settings from a YAML file
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(serde_yaml::from_str(&content)?)
    }

    /// Apply overrides looked up by environment variable name
    pub fn with_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(sources) = lookup(ENV_SOURCES) {
            self.sources = sources
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(PathBuf::from)
                .collect();
        }

        if let Some(log_filter) = lookup(ENV_LOG) {
            self.log_filter = log_filter;
        }

        if let Some(json_logs) = lookup(ENV_JSON_LOGS) {
            match json_logs.to_lowercase().as_str() {
                "true" | "1" => self.json_logs = true,
                "false" | "0" => self.json_logs = false,
                _ => warn!("Invalid {} value: {}", ENV_JSON_LOGS, json_logs),
            }
        }

        if let Some(log_file) = lookup(ENV_LOG_FILE) {
            self.log_file = Some(log_file).filter(|f| !f.is_empty());
        }

        if self.sources.is_empty() {
            warn!("No schema sources configured - the schema will be empty");
        }

        self
    }

    /// One file source per configured path
    pub fn schema_sources(&self) -> Vec<Box<dyn SchemaSource>> {
        self.sources
            .iter()
            .map(|path| Box::new(FileSource::new(path)) as Box<dyn SchemaSource>)
            .collect()
    }

    /// Logging configuration derived from these settings
    pub fn monitoring_config(&self) -> MonitoringConfig {
        MonitoringConfig {
            log_filter: self.log_filter.clone(),
            enable_json_logging: self.json_logs,
            log_file: self.log_file.clone(),
            ..MonitoringConfig::default()
        }
    }
}
