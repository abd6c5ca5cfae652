//! Shared types for the persisted path set.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Set of absolute lab paths marked for persistence.
///
/// Ordered so that iteration (and therefore serialization) is deterministic.
pub type PathSet = BTreeSet<String>;

/// Which branch a toggle took.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToggleOutcome {
    /// Path was absent and has been added.
    Added,
    /// Path was present and has been removed.
    Removed,
}

impl ToggleOutcome {
    /// Human-readable confirmation shown after a successful toggle.
    pub fn message(self) -> &'static str {
        match self {
            Self::Added => "Added to persist list",
            Self::Removed => "Removed from persist list",
        }
    }
}

impl fmt::Display for ToggleOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Added => f.write_str("added"),
            Self::Removed => f.write_str("removed"),
        }
    }
}

/// Flip membership of `path` in `set`, returning which branch was taken.
pub fn flip(set: &mut PathSet, path: &str) -> ToggleOutcome {
    if set.remove(path) {
        ToggleOutcome::Removed
    } else {
        set.insert(path.to_string());
        ToggleOutcome::Added
    }
}
