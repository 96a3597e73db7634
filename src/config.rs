//! Migration settings.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Directory scanned when none is given on the command line.
pub const DEFAULT_SCENES_DIR: &str = "resources/scenes";

fn default_scenes_dir() -> PathBuf {
    PathBuf::from(DEFAULT_SCENES_DIR)
}

fn default_legacy_extension() -> String {
    "sc".to_string()
}

fn default_output_extension() -> String {
    "json".to_string()
}

/// Where to look for legacy scenes and how converted files are named.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MigrationConfig {
    /// Directory holding the legacy scenes; outputs are written next to them.
    #[serde(default = "default_scenes_dir")]
    pub scenes_dir: PathBuf,

    /// Extension of legacy scene files, without the dot.
    #[serde(default = "default_legacy_extension")]
    pub legacy_extension: String,

    /// Extension given to converted files, without the dot.
    #[serde(default = "default_output_extension")]
    pub output_extension: String,
}

impl Default for MigrationConfig {
    fn default() -> Self {
        Self::new(default_scenes_dir())
    }
}

impl MigrationConfig {
    /// Default extensions, custom directory.
    pub fn new(scenes_dir: impl Into<PathBuf>) -> Self {
        Self {
            scenes_dir: scenes_dir.into(),
            legacy_extension: default_legacy_extension(),
            output_extension: default_output_extension(),
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.legacy_extension.is_empty() || self.output_extension.is_empty() {
            return Err("File extensions cannot be empty".to_string());
        }
        if self.legacy_extension == self.output_extension {
            return Err(format!(
                "Legacy and output extension are both {:?}",
                self.legacy_extension
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = MigrationConfig::default();
        assert_eq!(config.scenes_dir, PathBuf::from("resources/scenes"));
        assert_eq!(config.legacy_extension, "sc");
        assert_eq!(config.output_extension, "json");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_deserialize_partial() {
        let config: MigrationConfig = serde_json::from_str(r#"{"scenesDir": "old/scenes"}"#).unwrap();
        assert_eq!(config.scenes_dir, PathBuf::from("old/scenes"));
        assert_eq!(config.legacy_extension, "sc");
    }

    #[test]
    fn test_validate_rejects_same_extension() {
        let mut config = MigrationConfig::new("scenes");
        config.output_extension = "sc".to_string();
        assert!(config.validate().is_err());

        config.output_extension = String::new();
        assert!(config.validate().is_err());
    }
}
