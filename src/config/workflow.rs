//! Workflow configuration loading from workflow.toml
//!
//! Every section and key is optional; a missing file yields the defaults
//! (notifications enabled, held orders resume only to their pre-hold status).

use crate::errors::{Error, Result};
use serde::Deserialize;
use std::{io::ErrorKind, path::Path};
use tracing::{debug, info};

/// Configuration structure representing the entire workflow.toml file
#[derive(Debug, Default, Deserialize, Clone, PartialEq, Eq)]
pub struct WorkflowConfig {
    /// Notification dispatch settings
    #[serde(default)]
    pub notifications: NotificationConfig,
    /// Order-specific transition settings
    #[serde(default)]
    pub orders: OrderConfig,
}

/// `[notifications]` section
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct NotificationConfig {
    /// When false, transitions commit without producing notification rows
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
        }
    }
}

const fn default_enabled() -> bool {
    true
}

/// `[orders]` section
#[derive(Debug, Default, Deserialize, Clone, PartialEq, Eq)]
pub struct OrderConfig {
    #[serde(default)]
    pub resume_policy: ResumePolicy,
}

/// Where an order may go when it leaves `on_hold`
#[derive(Debug, Default, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ResumePolicy {
    /// Only back to the status recorded when the hold began (or to `cancelled`)
    #[default]
    Previous,
    /// Any edge the state graph declares out of `on_hold`
    Any,
}

/// Loads workflow configuration from a TOML file
///
/// # Errors
/// Returns an error if the file exists but cannot be read, or if it is not valid TOML
/// for [`WorkflowConfig`]. A missing file is not an error.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<WorkflowConfig> {
    let path_ref = path.as_ref();
    debug!("Attempting to load workflow configuration from: {:?}", path_ref);
    let contents = match std::fs::read_to_string(path_ref) {
        Ok(contents) => contents,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            info!("No workflow config at {:?}; using defaults", path_ref);
            return Ok(WorkflowConfig::default());
        }
        Err(e) => {
            return Err(Error::Config {
                message: format!("Failed to read config file {path_ref:?}: {e}"),
            });
        }
    };

    toml::from_str(&contents).map_err(|e| Error::Config {
        message: format!("Failed to parse workflow.toml: {e}"),
    })
}

/// Loads workflow configuration from the default location (./workflow.toml)
pub fn load_default_config() -> Result<WorkflowConfig> {
    load_config("workflow.toml")
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn test_parse_workflow_config() {
        let toml_str = r#"
            [notifications]
            enabled = false

            [orders]
            resume_policy = "any"
        "#;

        let config: WorkflowConfig = toml::from_str(toml_str).unwrap();
        assert!(!config.notifications.enabled);
        assert_eq!(config.orders.resume_policy, ResumePolicy::Any);
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: WorkflowConfig = toml::from_str("").unwrap();
        assert_eq!(config, WorkflowConfig::default());
        assert!(config.notifications.enabled);
        assert_eq!(config.orders.resume_policy, ResumePolicy::Previous);
    }

    #[test]
    fn test_unknown_resume_policy_is_rejected() {
        let result: std::result::Result<WorkflowConfig, _> =
            toml::from_str("[orders]\nresume_policy = \"sometimes\"");
        assert!(result.is_err());
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let config = load_config("definitely/not/here/workflow.toml").unwrap();
        assert_eq!(config, WorkflowConfig::default());
    }
}
