//! Storage location configuration.
//!
//! The location override is passed in explicitly (CLI flag or `PERSIST_PATH`
//! resolved by the binary); nothing in here reads the process environment.

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Environment variable that overrides the storage file location.
pub const PERSIST_PATH_ENV: &str = "PERSIST_PATH";

/// Directory under the user's home holding the state file.
pub const DEFAULT_DIR: &str = ".clab";

/// File name of the state file inside [`DEFAULT_DIR`].
pub const DEFAULT_FILE: &str = "persist.yaml";

/// Inputs for resolving where the persisted set lives.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoreConfig {
    /// Explicit file path. Blank values are treated as absent.
    pub path_override: Option<String>,
    /// Home directory used for the default location. `None` means "ask the OS".
    pub home_dir: Option<PathBuf>,
}

/// The storage location could not be determined.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("cannot determine home directory; set PERSIST_PATH to choose a file")]
pub struct LocationError;

impl StoreConfig {
    /// Config with an explicit override (blank strings fall back to the default).
    pub fn with_override(path: impl Into<String>) -> Self {
        Self {
            path_override: Some(path.into()),
            home_dir: None,
        }
    }

    /// Config that resolves the default location under `home`.
    pub fn with_home(home: impl Into<PathBuf>) -> Self {
        Self {
            path_override: None,
            home_dir: Some(home.into()),
        }
    }

    /// Resolve the storage file path.
    ///
    /// Pure and idempotent: the same config always yields the same path.
    pub fn resolve_location(&self) -> Result<PathBuf, LocationError> {
        let explicit = self
            .path_override
            .as_deref()
            .map(str::trim)
            .filter(|path| !path.is_empty());
        if let Some(path) = explicit {
            return Ok(PathBuf::from(path));
        }
        let home = match &self.home_dir {
            Some(home) => home.clone(),
            None => dirs::home_dir().ok_or(LocationError)?,
        };
        Ok(default_location(&home))
    }
}

/// `<home>/.clab/persist.yaml`.
pub fn default_location(home: &Path) -> PathBuf {
    home.join(DEFAULT_DIR).join(DEFAULT_FILE)
}
