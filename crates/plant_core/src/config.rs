//! Optional TOML settings. Every field has a default, so the file may be
//! absent or partial. The model input size and the confidence threshold are
//! part of the trained model's contract and are not configurable.

use crate::error::{ClassifierError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_FILE: &str = "plant_classifier.toml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub model_path: PathBuf,
    /// One label per line; the built-in table is used when unset.
    pub labels_path: Option<PathBuf>,
    pub thumbnail_size: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            model_path: PathBuf::from("models/plant_classifier.onnx"),
            labels_path: None,
            thumbnail_size: 200,
        }
    }
}

impl AppConfig {
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            tracing::debug!("no config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let raw = fs::read_to_string(path)?;
        let cfg: Self = toml::from_str(&raw).map_err(|e| ClassifierError::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        if cfg.thumbnail_size == 0 {
            return Err(ClassifierError::Config {
                path: path.to_path_buf(),
                message: "thumbnail_size must be positive".into(),
            });
        }
        tracing::info!("loaded config from {}", path.display());
        Ok(cfg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use rstest::rstest;
    use tempfile::tempdir;

    #[test]
    fn missing_file_yields_defaults() -> Result<()> {
        let dir = tempdir()?;
        let cfg = AppConfig::load_or_default(dir.path().join("nope.toml"))?;
        assert_eq!(cfg, AppConfig::default());
        assert_eq!(cfg.thumbnail_size, 200);
        Ok(())
    }

    #[test]
    fn partial_file_keeps_other_defaults() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join(DEFAULT_CONFIG_FILE);
        fs::write(&path, "model_path = \"/opt/models/plants.onnx\"\n")?;
        let cfg = AppConfig::load_or_default(&path)?;
        assert_eq!(cfg.model_path, PathBuf::from("/opt/models/plants.onnx"));
        assert_eq!(cfg.thumbnail_size, 200);
        assert_eq!(cfg.labels_path, None);
        Ok(())
    }

    #[test]
    fn malformed_file_is_a_config_error() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join(DEFAULT_CONFIG_FILE);
        fs::write(&path, "thumbnail_size = \"big\"")?;
        let err = AppConfig::load_or_default(&path).unwrap_err();
        assert!(matches!(err, ClassifierError::Config { .. }));
        Ok(())
    }

    #[rstest]
    #[case("input_size = 224")]
    #[case("confidence_threshold = 0.6")]
    fn model_contract_settings_are_rejected(#[case] line: &str) -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join(DEFAULT_CONFIG_FILE);
        fs::write(&path, line)?;
        let err = AppConfig::load_or_default(&path).unwrap_err();
        assert!(matches!(err, ClassifierError::Config { .. }));
        Ok(())
    }

    #[test]
    fn zero_thumbnail_size_is_rejected() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join(DEFAULT_CONFIG_FILE);
        fs::write(&path, "thumbnail_size = 0")?;
        let err = AppConfig::load_or_default(&path).unwrap_err();
        assert!(matches!(err, ClassifierError::Config { .. }));
        Ok(())
    }
}
