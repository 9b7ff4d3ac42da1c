//! Logging setup for the schema config service.

use serde::{Deserialize, Serialize};

pub mod logging;

pub use logging::{init_logging, LogExt};

/// Configuration for initializing logging
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonitoringConfig {
    /// Service name attached to the startup log line
    pub service_name: String,
    /// Log level filter (e.g., "info,schema_config_core=debug")
    pub log_filter: String,
    /// Emit JSON lines instead of pretty output
    pub enable_json_logging: bool,
    /// Optional log file, rotated daily
    pub log_file: Option<String>,
}

impl Default for MonitoringConfig {
    fn default() -> Self {
        Self {
            service_name: "schema-config".to_string(),
            log_filter: "info".to_string(),
            enable_json_logging: false,
            log_file: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = MonitoringConfig::default();
        assert_eq!(config.service_name, "schema-config");
        assert_eq!(config.log_filter, "info");
        assert!(!config.enable_json_logging);
        assert!(config.log_file.is_none());
    }
}
