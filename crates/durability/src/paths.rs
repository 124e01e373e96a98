//! Save file locations
//!
//! Two sibling files under one directory: the main save and its
//! single-generation backup. The default directory is the platform app-data
//! location (`%APPDATA%\TaskTown`, `~/Library/Application Support/TaskTown`,
//! `~/.local/share/TaskTown`), falling back to `./save_data` when the
//! platform offers none.

use std::path::{Path, PathBuf};

/// File name of the main save document.
pub const MAIN_SAVE_FILE: &str = "game_save.json";

/// File name of the single-generation backup.
pub const BACKUP_SAVE_FILE: &str = "game_save_backup.json";

/// Directory name under the platform app-data root.
const APP_DIR_NAME: &str = "TaskTown";

/// Fallback directory when no platform app-data root can be resolved.
const FALLBACK_DIR: &str = "./save_data";

/// Resolved save directory plus the two file paths inside it.
///
/// Immutable after construction; requires no locking.
#[derive(Debug, Clone)]
pub struct SavePaths {
    directory: PathBuf,
    main: PathBuf,
    backup: PathBuf,
}

impl SavePaths {
    /// Place the save files under an explicit directory.
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        let directory = directory.into();
        let main = directory.join(MAIN_SAVE_FILE);
        let backup = directory.join(BACKUP_SAVE_FILE);
        SavePaths {
            directory,
            main,
            backup,
        }
    }

    /// Place the save files under the platform-appropriate app-data
    /// directory.
    pub fn platform_default() -> Self {
        let directory = dirs::data_dir()
            .map(|base| base.join(APP_DIR_NAME))
            .unwrap_or_else(|| PathBuf::from(FALLBACK_DIR));
        SavePaths::new(directory)
    }

    /// The save directory.
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Path of the main save file.
    pub fn main(&self) -> &Path {
        &self.main
    }

    /// Path of the backup file.
    pub fn backup(&self) -> &Path {
        &self.backup
    }
}
