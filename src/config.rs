//! Configuration loading and management.

use crate::access::ViewerAccess;
use crate::error::{Error, Result};
use crate::model::DEFAULT_CONTEXT;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default config file location, relative to the working directory.
pub const DEFAULT_CONFIG_PATH: &str = ".tasklists/config.yaml";

/// Application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub session: SessionConfig,

    #[serde(default)]
    pub list: ListConfig,

    #[serde(default)]
    pub viewer: ViewerConfig,
}

/// Storage configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Path to the SQLite database file.
    #[serde(default = "default_db_path")]
    pub db_path: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            db_path: default_db_path(),
        }
    }
}

fn default_db_path() -> PathBuf {
    PathBuf::from(".tasklists/tasklists.db")
}

/// Where persisted filter state lives between invocations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    #[serde(default = "default_session_path")]
    pub path: PathBuf,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            path: default_session_path(),
        }
    }
}

fn default_session_path() -> PathBuf {
    dirs::home_dir()
        .map(|home| home.join(".tasklists").join("session.json"))
        .unwrap_or_else(|| PathBuf::from(".tasklists/session.json"))
}

/// List defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListConfig {
    /// Context key under which filters are persisted.
    #[serde(default = "default_context")]
    pub context: String,

    /// Page size when none was chosen; 0 lists everything.
    #[serde(default = "default_limit")]
    pub default_limit: i64,
}

impl Default for ListConfig {
    fn default() -> Self {
        Self {
            context: default_context(),
            default_limit: default_limit(),
        }
    }
}

fn default_context() -> String {
    DEFAULT_CONTEXT.to_string()
}

fn default_limit() -> i64 {
    20
}

/// Default viewer permissions when none are given on the command line.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewerConfig {
    #[serde(default)]
    pub admin: bool,

    /// Granted view levels.
    #[serde(default = "default_levels")]
    pub levels: Vec<i64>,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            admin: false,
            levels: default_levels(),
        }
    }
}

fn default_levels() -> Vec<i64> {
    vec![1]
}

impl ViewerConfig {
    pub fn access(&self) -> ViewerAccess {
        ViewerAccess::from_grants(self.admin, &self.levels)
    }
}

impl Config {
    /// Load configuration from file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        serde_yaml::from_str(&content).map_err(|source| Error::Yaml {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load configuration from the default location or return defaults,
    /// then apply environment overrides.
    pub fn load_or_default() -> Result<Self> {
        let mut config = if Path::new(DEFAULT_CONFIG_PATH).exists() {
            Self::load(DEFAULT_CONFIG_PATH)?
        } else {
            Self::default()
        };
        config.apply_env();
        Ok(config)
    }

    /// Apply `TASKLISTS_*` environment overrides.
    pub fn apply_env(&mut self) {
        if let Ok(db_path) = std::env::var("TASKLISTS_DB_PATH") {
            self.server.db_path = PathBuf::from(db_path);
        }

        if let Ok(session_path) = std::env::var("TASKLISTS_SESSION_PATH") {
            self.session.path = PathBuf::from(session_path);
        }

        if let Ok(limit) = std::env::var("TASKLISTS_LIST_LIMIT") {
            if let Ok(limit) = limit.parse() {
                self.list.default_limit = limit;
            }
        }
    }

    /// Ensure the database directory exists.
    pub fn ensure_db_dir(&self) -> Result<()> {
        if let Some(parent) = self.server.db_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
            }
        }
        Ok(())
    }
}
