//! Application configuration.
//!
//! Read from `<config dir>/nutrition-tui/config.toml` unless a path is given.
//! Every section has defaults, so a missing file or a partial file is fine.
//!
//! ```toml
//! [data]
//! url = "https://example.com/nutrition_data.json"
//!
//! [optimizer]
//! endpoint = "http://127.0.0.1:5000"
//! problem = "problem.toml"
//!
//! [display]
//! rows_per_page = 10
//! max_buttons = 10
//!
//! [logging]
//! level = "debug"
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::paginator::{DEFAULT_MAX_BUTTONS, DEFAULT_PER_PAGE};

pub const APP_NAME: &str = "nutrition-tui";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub data: DataConfig,
    pub optimizer: OptimizerConfig,
    pub display: DisplayConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    /// Dataset location: an http(s) URL or a local path.
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OptimizerConfig {
    /// Base URL; requests go to `<endpoint>/optimize`.
    pub endpoint: String,
    pub problem: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub rows_per_page: usize,
    pub max_buttons: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Used when `RUST_LOG` is unset.
    pub level: String,
    pub file: Option<PathBuf>,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            url: "static/nutrition_data.json".to_string(),
        }
    }
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://127.0.0.1:5000".to_string(),
            problem: None,
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            rows_per_page: DEFAULT_PER_PAGE,
            max_buttons: DEFAULT_MAX_BUTTONS,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
        }
    }
}

impl AppConfig {
    /// `<config dir>/nutrition-tui/config.toml`, when the platform has one.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_NAME).join("config.toml"))
    }

    /// Loads defaults overlaid with the file at `path` (or the default path).
    ///
    /// An explicitly given file must exist; the default file may be absent.
    /// The result is not validated, so command-line overrides can still
    /// replace a bad value before [`AppConfig::validate`] runs.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        let (path, required) = match path {
            Some(path) => (Some(path.to_path_buf()), true),
            None => (Self::default_path(), false),
        };
        if let Some(path) = path {
            if required || path.exists() {
                config.merge(Self::from_file(&path)?);
            }
        }

        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Overlays `other`; values that differ from the defaults win.
    pub fn merge(&mut self, other: AppConfig) {
        self.data.merge(other.data);
        self.optimizer.merge(other.optimizer);
        self.display.merge(other.display);
        self.logging.merge(other.logging);
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.data.url.trim().is_empty() {
            return Err(ConfigError::Invalid("data.url must not be empty".to_string()));
        }
        if self.optimizer.endpoint.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "optimizer.endpoint must not be empty".to_string(),
            ));
        }
        if self.display.rows_per_page == 0 {
            return Err(ConfigError::Invalid(
                "display.rows_per_page must be greater than 0".to_string(),
            ));
        }
        if self.display.max_buttons == 0 {
            return Err(ConfigError::Invalid(
                "display.max_buttons must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}

impl DataConfig {
    pub fn merge(&mut self, other: Self) {
        if other.url != Self::default().url {
            self.url = other.url;
        }
    }
}

impl OptimizerConfig {
    pub fn merge(&mut self, other: Self) {
        if other.endpoint != Self::default().endpoint {
            self.endpoint = other.endpoint;
        }
        if other.problem.is_some() {
            self.problem = other.problem;
        }
    }
}

impl DisplayConfig {
    pub fn merge(&mut self, other: Self) {
        let default = Self::default();
        if other.rows_per_page != default.rows_per_page {
            self.rows_per_page = other.rows_per_page;
        }
        if other.max_buttons != default.max_buttons {
            self.max_buttons = other.max_buttons;
        }
    }
}

impl LoggingConfig {
    pub fn merge(&mut self, other: Self) {
        if other.level != Self::default().level {
            self.level = other.level;
        }
        if other.file.is_some() {
            self.file = other.file;
        }
    }
}
