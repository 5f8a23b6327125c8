//! Engine configuration with defaults.

use crate::domain::approval::ApprovalPolicy;
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Parties whose approval moves a letter to `APPROVED`.
    pub approval_policy: ApprovalPolicy,
    /// `tracing` filter directive used when `RUST_LOG` is not set.
    pub log_filter: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            approval_policy: ApprovalPolicy::STANDARD,
            log_filter: "info".to_string(),
        }
    }
}

/// Load configuration, falling back to defaults.
///
/// Without a path the defaults are returned. Fields missing from the file
/// keep their default values.
pub fn load_config(path: Option<&Path>) -> Result<EngineConfig> {
    match path {
        Some(path) => {
            let content = fs::read_to_string(path)?;
            Ok(serde_json::from_str(&content)?)
        }
        None => Ok(EngineConfig::default()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_load_config_defaults() {
        let config = load_config(None).unwrap();
        assert_eq!(config.approval_policy, ApprovalPolicy::STANDARD);
        assert_eq!(config.log_filter, "info");
    }

    #[test]
    fn test_load_config_from_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.json");
        let content = r#"{
            "approval_policy": {"exporting_bank": false}
        }"#;
        fs::write(&path, content).unwrap();

        let config = load_config(Some(&path)).unwrap();
        assert!(!config.approval_policy.exporting_bank);
        assert!(config.approval_policy.issuing_bank);
        // Default for unspecified field
        assert_eq!(config.log_filter, "info");
    }

    #[test]
    fn test_load_config_missing_file() {
        let temp = TempDir::new().unwrap();
        let result = load_config(Some(&temp.path().join("absent.json")));
        assert!(result.is_err());
    }
}
