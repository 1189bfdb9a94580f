use std::path::Path;

use crate::error::ConfigError;
use crate::movelog::DEFAULT_LOG_PATH;
use crate::selfplay::SelfPlayParams;

/// Top-level configuration, loadable from JSON.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Move log used by interactive play and replay.
    pub log_path: std::path::PathBuf,
    /// Whether interactive play shows reach cells.
    pub show_reach: bool,
    pub selfplay: SelfPlayParams,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            log_path: DEFAULT_LOG_PATH.into(),
            show_reach: true,
            selfplay: SelfPlayParams::default(),
        }
    }
}

impl AppConfig {
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        let cfg: AppConfig = serde_json::from_str(s)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)
            .map_err(|source| ConfigError::FileRead { path: path.to_path_buf(), source })?;
        Self::from_json_str(&text)
    }

    /// Loads `path` when given, defaults otherwise.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(p) => Self::load(p),
            None => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.log_path.as_os_str().is_empty() {
            return Err(ConfigError::Validation("log_path must not be empty".to_string()));
        }
        if self.selfplay.log_path.as_os_str().is_empty() {
            return Err(ConfigError::Validation("selfplay.log_path must not be empty".to_string()));
        }
        Ok(())
    }
}
