use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::{
    errors::StorageError,
    utils::{app_data_dir, config_file_in, write_atomic},
};

const DEFAULT_RECENT_TRANSACTIONS: usize = 10;
const DEFAULT_OVERVIEW_MONTHS: usize = 6;

/// User preferences and display caps. Missing fields fall back to defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub locale: String,
    pub currency: String,
    pub timezone: String,
    /// Entries shown in the dashboard's recent-transactions list.
    pub recent_transactions: usize,
    /// Months shown in the analytics monthly overview.
    pub monthly_overview_months: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            locale: "en-PK".into(),
            currency: "PKR".into(),
            timezone: "Asia/Karachi".into(),
            recent_transactions: DEFAULT_RECENT_TRANSACTIONS,
            monthly_overview_months: DEFAULT_OVERVIEW_MONTHS,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ConfigManager {
    path: PathBuf,
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigManager {
    pub fn new() -> Self {
        Self::with_base_dir(app_data_dir())
    }

    /// Points at `config.json` inside `base`. The directory is created on first save.
    pub fn with_base_dir(base: PathBuf) -> Self {
        Self {
            path: config_file_in(&base),
        }
    }

    pub fn load(&self) -> Result<Config, StorageError> {
        if self.path.exists() {
            let data = fs::read_to_string(&self.path)?;
            Ok(serde_json::from_str(&data)?)
        } else {
            Ok(Config::default())
        }
    }

    pub fn save(&self, config: &Config) -> Result<(), StorageError> {
        let json = serde_json::to_string_pretty(config)?;
        write_atomic(&self.path, &json)?;
        tracing::debug!(path = %self.path.display(), "configuration saved");
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn load_defaults_when_missing() {
        let temp = tempdir().unwrap();
        let manager = ConfigManager::with_base_dir(temp.path().to_path_buf());
        assert_eq!(manager.load().unwrap(), Config::default());
    }

    #[test]
    fn save_then_load_preserves_caps() {
        let temp = tempdir().unwrap();
        let manager = ConfigManager::with_base_dir(temp.path().to_path_buf());
        let config = Config {
            recent_transactions: 3,
            ..Config::default()
        };
        manager.save(&config).unwrap();
        assert_eq!(manager.load().unwrap().recent_transactions, 3);
    }

    #[test]
    fn partial_file_fills_defaults() {
        let temp = tempdir().unwrap();
        let manager = ConfigManager::with_base_dir(temp.path().to_path_buf());
        fs::write(manager.path(), r#"{"currency":"USD"}"#).unwrap();
        let config = manager.load().unwrap();
        assert_eq!(config.currency, "USD");
        assert_eq!(config.monthly_overview_months, 6);
    }

    #[test]
    fn directory_is_created_only_on_save() {
        let temp = tempdir().unwrap();
        let base = temp.path().join("nested");
        let manager = ConfigManager::with_base_dir(base.clone());
        assert_eq!(manager.load().unwrap(), Config::default());
        assert!(!base.exists());

        manager.save(&Config::default()).unwrap();
        assert!(manager.path().exists());
    }
}
