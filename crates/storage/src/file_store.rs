//! Synchronous filesystem primitives
//!
//! Thin, explicit wrappers over `std::fs`. Errors are returned as plain
//! `io::Result` at this boundary; classification into the save/load error
//! taxonomy happens in the coordinator. No retry policy lives here.

use std::fs;
use std::io;
use std::path::Path;
use tracing::debug;

/// Primitive, synchronous, side-effecting filesystem operations.
///
/// Stateless; owned by the coordinator so all disk access funnels through
/// one place.
#[derive(Debug, Default)]
pub struct FileStore;

impl FileStore {
    /// Create `path` and all missing parents. Idempotent.
    pub fn ensure_directory(&self, path: &Path) -> io::Result<()> {
        fs::create_dir_all(path)
    }

    /// Read the entire file as bytes.
    pub fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
        fs::read(path)
    }

    /// Truncating write of `bytes` to `path`.
    pub fn write(&self, path: &Path, bytes: &[u8]) -> io::Result<()> {
        fs::write(path, bytes)?;
        debug!(path = %path.display(), bytes = bytes.len(), "wrote file");
        Ok(())
    }

    /// Copy `src` to `dst`, overwriting `dst` if it exists.
    /// Returns the number of bytes copied.
    pub fn copy(&self, src: &Path, dst: &Path) -> io::Result<u64> {
        let copied = fs::copy(src, dst)?;
        debug!(src = %src.display(), dst = %dst.display(), bytes = copied, "copied file");
        Ok(copied)
    }

    /// Delete the file at `path`.
    pub fn remove(&self, path: &Path) -> io::Result<()> {
        fs::remove_file(path)
    }

    /// Whether a file or directory exists at `path`.
    pub fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    /// Size of the file at `path` in bytes, 0 if missing or unreadable.
    pub fn size(&self, path: &Path) -> u64 {
        fs::metadata(path).map(|m| m.len()).unwrap_or(0)
    }
}
