use crate::error::{Result, ShowDesignError};
use crate::paths;
use crate::repository::DEFAULT_STORAGE_KEY;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

pub const DEFAULT_TITLES: [&str; 5] = [
    "Echoes of Tomorrow",
    "The Golden Horizon",
    "Velocity",
    "Urban Myths",
    "Starlight Revolution",
];

// ---------------------------------------------------------------------------
// ConfigWarning / WarnLevel
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigWarning {
    pub level: WarnLevel,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarnLevel {
    Warning,
    Error,
}

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_storage_key")]
    pub storage_key: String,
    #[serde(default = "default_lock")]
    pub lock_signed_drafts: bool,
    #[serde(default = "default_titles")]
    pub title_candidates: Vec<String>,
}

fn default_storage_key() -> String {
    DEFAULT_STORAGE_KEY.to_string()
}

fn default_lock() -> bool {
    true
}

fn default_titles() -> Vec<String> {
    DEFAULT_TITLES.iter().map(|s| s.to_string()).collect()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            storage_key: default_storage_key(),
            lock_signed_drafts: default_lock(),
            title_candidates: default_titles(),
        }
    }
}

impl Config {
    // -----------------------------------------------------------------------
    // Persistence
    // -----------------------------------------------------------------------

    pub fn load(root: &Path) -> Result<Self> {
        let path = paths::config_path(root);
        if !path.exists() {
            return Err(ShowDesignError::NotInitialized);
        }
        let data = std::fs::read_to_string(&path)?;
        let cfg: Config = serde_yaml::from_str(&data)?;
        Ok(cfg)
    }

    /// Like [`Config::load`], but an uninitialized root gets the defaults.
    pub fn load_or_default(root: &Path) -> Result<Self> {
        match Self::load(root) {
            Err(ShowDesignError::NotInitialized) => Ok(Self::default()),
            other => other,
        }
    }

    pub fn save(&self, root: &Path) -> Result<()> {
        let path = paths::config_path(root);
        let data = serde_yaml::to_string(self)?;
        crate::io::atomic_write(&path, data.as_bytes())
    }

    // -----------------------------------------------------------------------
    // Validation
    // -----------------------------------------------------------------------

    pub fn validate(&self) -> Vec<ConfigWarning> {
        let mut warnings = Vec::new();

        if paths::validate_storage_key(&self.storage_key).is_err() {
            warnings.push(ConfigWarning {
                level: WarnLevel::Error,
                message: format!(
                    "storage_key '{}' must be 1-64 letters, digits, '-' or '_'",
                    self.storage_key
                ),
            });
        }

        if self.title_candidates.iter().all(|t| t.trim().is_empty()) {
            warnings.push(ConfigWarning {
                level: WarnLevel::Error,
                message: "title_candidates has no usable titles".to_string(),
            });
        }

        let mut seen = HashSet::new();
        for title in &self.title_candidates {
            if !seen.insert(title.as_str()) {
                warnings.push(ConfigWarning {
                    level: WarnLevel::Warning,
                    message: format!("duplicate title candidate '{title}'"),
                });
            }
        }

        warnings
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
