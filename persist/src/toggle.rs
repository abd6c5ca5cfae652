//! Toggle orchestration: read, flip membership, atomically write back, notify.
//!
//! There is no cross-process lock around the read-modify-write sequence. With a
//! single writer this is safe; concurrent writers on the same file race and the
//! last rename wins.

use tracing::{debug, info, instrument};

use crate::core::codec::{decode, encode};
use crate::core::types::{ToggleOutcome, flip};
use crate::error::ToggleError;
use crate::io::notify::{ChangeObserver, NoopObserver};
use crate::io::store::{PersistStore, read_current, write_atomic};

/// Adds or removes lab paths in the persisted set.
pub struct ToggleService {
    store: PersistStore,
    observer: Box<dyn ChangeObserver>,
}

impl ToggleService {
    pub fn new(store: PersistStore, observer: Box<dyn ChangeObserver>) -> Self {
        Self { store, observer }
    }

    /// Service without any change notification.
    pub fn silent(store: PersistStore) -> Self {
        Self::new(store, Box::new(NoopObserver))
    }

    /// Add `path` if absent, remove it if present.
    ///
    /// `path` is compared verbatim; callers normalize it beforehand. An empty
    /// path fails with [`ToggleError::InvalidInput`] before any I/O.
    #[instrument(skip(self))]
    pub fn toggle(&self, path: &str) -> Result<ToggleOutcome, ToggleError> {
        if path.is_empty() {
            return Err(ToggleError::InvalidInput);
        }

        let location = self.store.location()?;
        let mut labs = decode(&read_current(&location));
        debug!(path = %location.display(), entries = labs.len(), "loaded persisted labs");

        let outcome = flip(&mut labs, path);
        write_atomic(&location, &encode(&labs))?;
        info!(%outcome, entries = labs.len(), "persist list updated");

        self.observer.changed(&location, outcome);
        Ok(outcome)
    }
}
