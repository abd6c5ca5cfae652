//! Durable storage for the persisted path set.
//!
//! Reads are tolerant: I/O failures yield the empty document and undecodable
//! bytes are replaced rather than rejected. Writes go through a sibling temp
//! file and a rename, so the target is always either the old or the new
//! complete content.

use std::borrow::Cow;
use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, warn};

use super::config::{LocationError, StoreConfig};
use crate::core::codec::{EMPTY_DOCUMENT, decode};
use crate::core::types::PathSet;

/// Suffix appended to the target file name for the staging copy.
pub const STAGING_SUFFIX: &str = ".tmp";

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Failure while replacing the state file.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage path has no parent directory: {}", path.display())]
    MissingParent { path: PathBuf },
    #[error("create directory {}", path.display())]
    CreateDir { path: PathBuf, source: io::Error },
    #[error("write temp file {}", path.display())]
    WriteTemp { path: PathBuf, source: io::Error },
    #[error("replace {}", path.display())]
    Replace { path: PathBuf, source: io::Error },
}

/// Handle on the state file described by a [`StoreConfig`].
///
/// Holds no cached content; every call goes back to disk.
#[derive(Debug, Clone)]
pub struct PersistStore {
    config: StoreConfig,
}

impl PersistStore {
    pub fn new(config: StoreConfig) -> Self {
        Self { config }
    }

    /// Resolve the state file path. Recomputed on every call.
    pub fn location(&self) -> Result<PathBuf, LocationError> {
        self.config.resolve_location()
    }

    /// Current persisted set, read fresh from disk.
    pub fn load(&self) -> Result<PathSet, LocationError> {
        let location = self.location()?;
        Ok(decode(&read_current(&location)))
    }
}

/// Read the document at `location`, returning [`EMPTY_DOCUMENT`] when it cannot
/// be read.
///
/// Bytes are decoded lossily (invalid sequences become U+FFFD) after dropping a
/// leading UTF-8 BOM, so one bad byte costs at most the entry it sits in.
/// I/O failures other than `NotFound` (permissions, directories, ...) are also
/// mapped to the empty document, so a subsequent write replaces whatever was there.
pub fn read_current(location: &Path) -> String {
    match fs::read(location) {
        Ok(bytes) => {
            debug!(path = %location.display(), bytes = bytes.len(), "read persist file");
            decode_text(&bytes)
        }
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            debug!(path = %location.display(), "persist file missing; starting empty");
            EMPTY_DOCUMENT.to_string()
        }
        Err(err) => {
            warn!(path = %location.display(), err = %err, "unreadable persist file; treating as empty");
            EMPTY_DOCUMENT.to_string()
        }
    }
}

fn decode_text(bytes: &[u8]) -> String {
    let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
    let text = String::from_utf8_lossy(bytes);
    if let Cow::Owned(_) = text {
        warn!("persist file is not valid UTF-8; bad bytes replaced");
    }
    text.into_owned()
}

/// Atomically replace `location` with `contents` (temp file + rename).
pub fn write_atomic(location: &Path, contents: &str) -> Result<(), StorageError> {
    let parent = location
        .parent()
        .ok_or_else(|| StorageError::MissingParent {
            path: location.to_path_buf(),
        })?;
    fs::create_dir_all(parent).map_err(|source| StorageError::CreateDir {
        path: parent.to_path_buf(),
        source,
    })?;
    let tmp_path = staging_path(location);
    fs::write(&tmp_path, contents).map_err(|source| StorageError::WriteTemp {
        path: tmp_path.clone(),
        source,
    })?;
    fs::rename(&tmp_path, location).map_err(|source| StorageError::Replace {
        path: location.to_path_buf(),
        source,
    })?;
    debug!(path = %location.display(), bytes = contents.len(), "persist file replaced");
    Ok(())
}

/// `<location>.tmp`, next to the target so the rename stays on one filesystem.
pub fn staging_path(location: &Path) -> PathBuf {
    let mut name = OsString::from(location.as_os_str());
    name.push(STAGING_SUFFIX);
    PathBuf::from(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_missing_returns_empty_document() {
        let temp = tempfile::tempdir().expect("tempdir");
        let text = read_current(&temp.path().join("absent.yaml"));
        assert_eq!(text, EMPTY_DOCUMENT);
        assert!(decode(&text).is_empty());
    }

    #[test]
    fn read_directory_degrades_to_empty_document() {
        let temp = tempfile::tempdir().expect("tempdir");
        assert_eq!(read_current(temp.path()), EMPTY_DOCUMENT);
    }

    #[test]
    fn read_strips_leading_bom() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("persist.yaml");
        fs::write(&path, "\u{FEFF}labs:\n  - \"/x\"\n  - \"/y\"\n").expect("seed");

        let text = read_current(&path);

        assert_eq!(text, "labs:\n  - \"/x\"\n  - \"/y\"\n");
    }

    #[test]
    fn read_keeps_valid_entries_around_invalid_utf8() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("persist.yaml");
        fs::write(&path, b"labs:\n  - \"/x\"\n  - \"/caf\xe9\"\n  - \"/y\"\n").expect("seed");

        let labs = decode(&read_current(&path));

        assert!(labs.contains("/x"));
        assert!(labs.contains("/y"));
        assert!(labs.contains("/caf\u{FFFD}"));
        assert_eq!(labs.len(), 3);
    }

    #[test]
    fn write_creates_parents_and_leaves_no_staging_file() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("nested/dir/persist.yaml");

        write_atomic(&path, "labs:\n  - \"/a\"\n").expect("write");

        assert_eq!(
            fs::read_to_string(&path).expect("read"),
            "labs:\n  - \"/a\"\n"
        );
        assert!(!staging_path(&path).exists());
    }

    #[test]
    fn write_overwrites_existing_content() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("persist.yaml");
        fs::write(&path, "labs:\n  - \"/old\"\n").expect("seed");

        write_atomic(&path, EMPTY_DOCUMENT).expect("write");

        assert_eq!(fs::read_to_string(&path).expect("read"), EMPTY_DOCUMENT);
    }

    #[test]
    fn unusable_parent_reports_create_dir_failure() {
        let temp = tempfile::tempdir().expect("tempdir");
        // A regular file where the parent directory should be.
        let blocker = temp.path().join("blocker");
        fs::write(&blocker, "not a dir").expect("seed");
        let path = blocker.join("persist.yaml");

        let err = write_atomic(&path, EMPTY_DOCUMENT).expect_err("should fail");

        assert!(matches!(err, StorageError::CreateDir { .. }));
        assert_eq!(fs::read_to_string(&blocker).expect("read"), "not a dir");
    }

    #[test]
    fn staging_path_appends_suffix() {
        assert_eq!(
            staging_path(Path::new("/home/lab/.clab/persist.yaml")),
            PathBuf::from("/home/lab/.clab/persist.yaml.tmp")
        );
    }

    #[test]
    fn store_load_reads_fresh_each_call() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("persist.yaml");
        let store = PersistStore::new(StoreConfig::with_override(path.display().to_string()));

        assert!(store.load().expect("load").is_empty());
        fs::write(&path, "labs:\n  - \"/x\"\n").expect("write");
        let loaded = store.load().expect("load");
        assert!(loaded.contains("/x"));
    }
}
