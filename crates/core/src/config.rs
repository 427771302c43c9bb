//! Service configuration.
//!
//! Read from `<config_dir>/groovyscope/config.json`; every field is optional.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

pub const CONFIG_DIR: &str = "groovyscope";
pub const CONFIG_FILE: &str = "config.json";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// Rename `getX`/`setX`/`isX` along with a field or property `x`.
    pub synthesize_accessors: bool,
    /// Class names treated as external; never offered for rename.
    pub builtin_types: Vec<String>,
    pub logging: LoggingConfig,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            synthesize_accessors: true,
            builtin_types: [
                "Object",
                "String",
                "GString",
                "Integer",
                "Long",
                "Double",
                "Float",
                "Boolean",
                "BigDecimal",
                "BigInteger",
                "List",
                "Map",
                "Set",
                "Class",
                "Closure",
                "Script",
                "Binding",
                "Exception",
                "RuntimeException",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
            logging: LoggingConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is unset.
    pub filter: String,
    /// Log directory; defaults to `~/.groovyscope/logs`.
    pub directory: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
            directory: None,
        }
    }
}

impl ServiceConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Loads `path`, falling back to defaults when the file does not exist.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }

    pub fn load_or_default() -> Result<Self> {
        match Self::default_path() {
            Some(path) => Self::load(&path),
            None => Ok(Self::default()),
        }
    }

    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(CONFIG_DIR).join(CONFIG_FILE))
    }

    pub fn is_builtin_type(&self, name: &str) -> bool {
        self.builtin_types.iter().any(|t| t == name)
    }
}
