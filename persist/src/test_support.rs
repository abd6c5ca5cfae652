//! Test-only helpers: throwaway state files and a recording observer.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use tempfile::TempDir;

use crate::core::types::ToggleOutcome;
use crate::io::config::StoreConfig;
use crate::io::notify::ChangeObserver;
use crate::io::store::PersistStore;

/// State file inside a temporary home directory, removed on drop.
pub struct TestStore {
    home: TempDir,
}

impl TestStore {
    pub fn new() -> Result<Self> {
        let home = tempfile::tempdir().context("create temp home")?;
        Ok(Self { home })
    }

    /// Temporary directory standing in for the user's home.
    pub fn home(&self) -> &Path {
        self.home.path()
    }

    /// Default location under the temporary home.
    pub fn location(&self) -> PathBuf {
        crate::io::config::default_location(self.home())
    }

    pub fn config(&self) -> StoreConfig {
        StoreConfig::with_home(self.home())
    }

    pub fn store(&self) -> PersistStore {
        PersistStore::new(self.config())
    }

    /// Write raw document text, creating parent directories.
    pub fn seed(&self, contents: &str) -> Result<()> {
        let location = self.location();
        if let Some(parent) = location.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("create {}", parent.display()))?;
        }
        fs::write(&location, contents).with_context(|| format!("seed {}", location.display()))
    }

    /// Raw document text currently on disk.
    pub fn contents(&self) -> Result<String> {
        let location = self.location();
        fs::read_to_string(&location).with_context(|| format!("read {}", location.display()))
    }
}

/// Observer that records every notification it receives.
///
/// Clones share the same log, so a test can keep one handle and give the
/// service another.
#[derive(Debug, Clone, Default)]
pub struct RecordingObserver {
    events: Arc<Mutex<Vec<(PathBuf, ToggleOutcome)>>>,
}

impl RecordingObserver {
    pub fn events(&self) -> Vec<(PathBuf, ToggleOutcome)> {
        self.events
            .lock()
            .map(|events| events.clone())
            .unwrap_or_default()
    }
}

impl ChangeObserver for RecordingObserver {
    fn changed(&self, location: &Path, outcome: ToggleOutcome) {
        if let Ok(mut events) = self.events.lock() {
            events.push((location.to_path_buf(), outcome));
        }
    }
}
