use crate::core::dirs::get_config_directory;
use crate::core::error::{GitAliasError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const CONFIG_FILE: &str = "config.json";

/// User settings for the browser and the log command.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct AliasConfig {
    /// Entries per page in the commit browser
    pub page_size: usize,
    /// Default number of commits loaded by `log`
    pub log_limit: usize,
    /// Upper bound for the table view width
    pub max_table_width: usize,
}

impl Default for AliasConfig {
    fn default() -> Self {
        Self {
            page_size: 5,
            log_limit: 100,
            max_table_width: 80,
        }
    }
}

impl AliasConfig {
    pub fn config_path() -> Result<PathBuf> {
        Ok(get_config_directory()?.join(CONFIG_FILE))
    }

    /// Loads the user config, falling back to defaults when no file exists.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .map_err(|e| GitAliasError::config_read_failed(path, e))?;
        serde_json::from_str(&content).map_err(|e| GitAliasError::config_parse_failed(path, e))
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| GitAliasError::config_write_failed(parent, e))?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content).map_err(|e| GitAliasError::config_write_failed(path, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_yields_defaults() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let config = AliasConfig::load_from(&temp_dir.path().join("none.json"))?;
        assert_eq!(config, AliasConfig::default());
        assert_eq!(config.page_size, 5);
        Ok(())
    }

    #[test]
    fn test_save_then_load() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let path = temp_dir.path().join("nested").join(CONFIG_FILE);
        let config = AliasConfig {
            page_size: 8,
            log_limit: 30,
            max_table_width: 100,
        };
        config.save_to(&path)?;
        assert_eq!(AliasConfig::load_from(&path)?, config);
        Ok(())
    }

    #[test]
    fn test_partial_file_fills_defaults() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let path = temp_dir.path().join(CONFIG_FILE);
        std::fs::write(&path, r#"{ "page_size": 3 }"#)?;
        let config = AliasConfig::load_from(&path)?;
        assert_eq!(config.page_size, 3);
        assert_eq!(config.log_limit, 100);
        Ok(())
    }

    #[test]
    fn test_invalid_file_is_parse_error() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let path = temp_dir.path().join(CONFIG_FILE);
        std::fs::write(&path, "page_size = 3")?;
        let err = AliasConfig::load_from(&path).unwrap_err();
        assert!(matches!(err, GitAliasError::ConfigParseFailed { .. }));
        Ok(())
    }
}
