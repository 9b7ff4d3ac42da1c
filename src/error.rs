//! Error types for the schema config service

use schema_config_store::StoreError;
use std::path::PathBuf;
use thiserror::Error;

/// Settings loading errors
#[derive(Error, Debug)]
pub enum SettingsError {
    /// Settings file could not be read
    #[error("Failed to read settings file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Settings file is not valid YAML
    #[error("Settings parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl SettingsError {
    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            SettingsError::Io { .. } => "ERR_SETTINGS_IO",
            SettingsError::Yaml(_) => "ERR_SETTINGS_YAML_PARSE",
        }
    }
}

/// Service error types
#[derive(Error, Debug)]
pub enum ServiceError {
    /// Settings could not be loaded
    #[error("Settings error: {0}")]
    Settings(#[from] SettingsError),

    /// Schema sources could not be loaded
    #[error("Schema store error: {0}")]
    Store(#[from] StoreError),
}

impl ServiceError {
    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            ServiceError::Settings(err) => err.error_code(),
            ServiceError::Store(err) => err.error_code(),
        }
    }
}

/// Result type for service operations
pub type ServiceResult<T> = Result<T, ServiceError>;
