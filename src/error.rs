//! Error types for session, configuration and fixture I/O.
//!
//! Filter input never produces an error, and database failures travel as
//! `anyhow::Error` from the db layer unchanged. This enum only covers the
//! file-backed collaborators around them.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// Reading or writing a file failed.
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The session file exists but is not a JSON object of strings.
    #[error("Malformed session file {path}: {source}")]
    SessionFormat {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A YAML document (config or fixture) could not be parsed.
    #[error("Malformed YAML in {path}: {source}")]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type for file-backed operations.
pub type Result<T> = std::result::Result<T, Error>;
