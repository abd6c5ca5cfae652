//! Change notification sinks.
//!
//! The [`ChangeObserver`] trait decouples the toggle service from whatever needs
//! refreshing after the persisted set changes (a UI tree, a shell hook). Tests use
//! closures or the recording observer from `test_support`.

use std::path::Path;
use std::process::{Command, Stdio};

use tracing::{debug, warn};

use crate::core::types::ToggleOutcome;

/// One-way "the persisted set changed" signal.
///
/// Called once after each successful write. No return value and no retry:
/// observers must handle their own failures.
pub trait ChangeObserver {
    fn changed(&self, location: &Path, outcome: ToggleOutcome);
}

impl<F> ChangeObserver for F
where
    F: Fn(&Path, ToggleOutcome),
{
    fn changed(&self, location: &Path, outcome: ToggleOutcome) {
        self(location, outcome);
    }
}

/// Observer that ignores every notification.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl ChangeObserver for NoopObserver {
    fn changed(&self, _location: &Path, _outcome: ToggleOutcome) {}
}

/// Observer that spawns a shell command after each change.
///
/// The command sees `PERSIST_FILE` and `PERSIST_OUTCOME` in its environment.
/// It is detached: the toggle does not wait for it, and spawn failures are
/// only logged.
#[derive(Debug, Clone)]
pub struct CommandObserver {
    command: String,
}

impl CommandObserver {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
        }
    }

    fn shell(&self) -> Command {
        #[cfg(windows)]
        {
            let mut cmd = Command::new("cmd");
            cmd.arg("/C").arg(&self.command);
            cmd
        }
        #[cfg(not(windows))]
        {
            let mut cmd = Command::new("sh");
            cmd.arg("-c").arg(&self.command);
            cmd
        }
    }
}

impl ChangeObserver for CommandObserver {
    fn changed(&self, location: &Path, outcome: ToggleOutcome) {
        let spawned = self
            .shell()
            .env("PERSIST_FILE", location)
            .env("PERSIST_OUTCOME", outcome.to_string())
            .stdin(Stdio::null())
            .spawn();
        match spawned {
            Ok(child) => debug!(pid = child.id(), command = %self.command, "notify command spawned"),
            Err(err) => warn!(command = %self.command, err = %err, "failed to spawn notify command"),
        }
    }
}
