//! Error types for the TaskSave persistence system
//!
//! Two closed taxonomies, one per direction: [`SaveError`] for anything that
//! writes to disk, [`LoadError`] for anything that reads. Success is the `Ok`
//! arm of the surrounding `Result`, so the variant sets below mirror the
//! failure kinds exactly. We use `thiserror` for `Display`/`Error` impls.
//!
//! No exception-style propagation crosses the public boundary: internal I/O
//! and codec failures are classified into these kinds at the coordinator.

use std::io;
use thiserror::Error;

/// Failure kinds for save-direction operations (save, backup, restore).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SaveError {
    /// Generic write/copy failure.
    #[error("write failed: {0}")]
    Write(String),

    /// The operating system denied access to the target path.
    #[error("permission denied: {0}")]
    Permission(String),

    /// The target volume is out of space.
    #[error("disk full: {0}")]
    DiskFull(String),

    /// Anything outside the filesystem taxonomy, including encode failures.
    #[error("unexpected save failure: {0}")]
    Unknown(String),
}

/// Failure kinds for load-direction operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoadError {
    /// The main save file does not exist.
    #[error("save file not found: {0}")]
    NotFound(String),

    /// The file exists but could not be read as bytes. Never used for
    /// syntactically or structurally bad content.
    #[error("read failed: {0}")]
    Read(String),

    /// Malformed JSON syntax or an envelope failing structural validation.
    #[error("corrupted save data: {0}")]
    Corrupted(String),

    /// The envelope carries a schema version this build cannot decode.
    #[error("unsupported save version {found}, expected {expected}")]
    VersionMismatch {
        /// Schema version this build writes and reads.
        expected: String,
        /// Version string found in the envelope.
        found: String,
    },

    /// Decode failure of a structurally valid document, or anything else
    /// outside the taxonomy.
    #[error("unexpected load failure: {0}")]
    Unknown(String),
}

// ENOSPC on unix, ERROR_DISK_FULL on windows
#[cfg(unix)]
const DISK_FULL_OS_CODE: i32 = 28;
#[cfg(windows)]
const DISK_FULL_OS_CODE: i32 = 112;
#[cfg(not(any(unix, windows)))]
const DISK_FULL_OS_CODE: i32 = 28;

fn is_disk_full(err: &io::Error) -> bool {
    err.raw_os_error() == Some(DISK_FULL_OS_CODE)
}

impl SaveError {
    /// Classify a filesystem error from a write-direction operation.
    pub fn from_io(context: &str, err: &io::Error) -> Self {
        if err.kind() == io::ErrorKind::PermissionDenied {
            SaveError::Permission(format!("{context}: {err}"))
        } else if is_disk_full(err) {
            SaveError::DiskFull(format!("{context}: {err}"))
        } else {
            SaveError::Write(format!("{context}: {err}"))
        }
    }
}

impl LoadError {
    /// Classify a filesystem error from a read-direction operation.
    ///
    /// Everything lands in [`LoadError::Read`]: a file that cannot even be
    /// opened as bytes is a read fault, not corruption.
    pub fn from_io(context: &str, err: &io::Error) -> Self {
        LoadError::Read(format!("{context}: {err}"))
    }
}
