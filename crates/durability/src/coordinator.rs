//! Save/load orchestration
//!
//! [`SaveCoordinator`] is the public face of the persistence subsystem. It
//! owns the [`FileStore`], the [`StateCodec`], and the two save paths, and
//! layers the failure-recovery policy on top of them:
//!
//! - saving refreshes the backup before overwriting the main file (backup
//!   failure is logged and non-fatal)
//! - loading falls back to the backup when the main file fails
//!   read/parse/validate, transparently to the caller
//! - a coordinator-wide mutex serializes save/load/backup/restore, so when
//!   the foreground and the auto-save worker race, last-write-wins is a
//!   guarantee rather than an accident
//!
//! Diagnostics: alongside the per-call `Result`, the most recent failure
//! description is kept in a mutex-guarded last-error slot that every failing
//! public call clears-then-sets, so stale errors never leak across
//! unrelated operations.

use crate::autosave::AutoSaveWorker;
use crate::codec::{CodecError, StateCodec, SAVE_FORMAT_VERSION};
use crate::paths::SavePaths;
use chrono::{DateTime, TimeZone, Utc};
use parking_lot::Mutex;
use serde_json::Value;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tasksave_core::{GameSnapshot, LoadError, SaveError};
use tasksave_storage::FileStore;
use tracing::{debug, info, warn};

/// Shared save/load engine.
///
/// Everything the foreground API and the auto-save worker both need lives
/// here, behind one `Arc`. Paths, codec and store are immutable after
/// construction; the io lock and the two diagnostic slots are the only
/// mutable state.
pub(crate) struct SaveEngine {
    store: FileStore,
    codec: StateCodec,
    paths: SavePaths,
    // Serializes save/load/backup/restore across foreground and worker
    io_lock: Mutex<()>,
    last_error: Mutex<Option<String>>,
    last_auto_save: Mutex<Option<DateTime<Utc>>>,
    compression_enabled: AtomicBool,
}

impl SaveEngine {
    fn new(paths: SavePaths) -> Self {
        SaveEngine {
            store: FileStore,
            codec: StateCodec,
            paths,
            io_lock: Mutex::new(()),
            last_error: Mutex::new(None),
            last_auto_save: Mutex::new(None),
            compression_enabled: AtomicBool::new(false),
        }
    }

    fn clear_last_error(&self) {
        *self.last_error.lock() = None;
    }

    /// Record a failing result in the shared diagnostic and pass it through.
    fn note_failure<T, E: std::fmt::Display>(
        &self,
        result: Result<T, E>,
    ) -> Result<T, E> {
        if let Err(err) = &result {
            *self.last_error.lock() = Some(err.to_string());
        }
        result
    }

    pub(crate) fn save(&self, snapshot: &GameSnapshot) -> Result<(), SaveError> {
        self.clear_last_error();
        let _io = self.io_lock.lock();
        self.note_failure(self.save_locked(snapshot))
    }

    fn save_locked(&self, snapshot: &GameSnapshot) -> Result<(), SaveError> {
        // Refresh the backup before overwriting; the save proceeds either way
        if self.store.exists(self.paths.main()) {
            if let Err(err) = self.create_backup_locked() {
                warn!(error = %err, "failed to refresh backup before save, continuing");
            }
        }

        let doc = self
            .codec
            .encode(snapshot)
            .map_err(|e| SaveError::Unknown(e.to_string()))?;
        let bytes = self
            .codec
            .to_pretty_bytes(&doc)
            .map_err(|e| SaveError::Unknown(e.to_string()))?;
        self.store
            .write(self.paths.main(), &bytes)
            .map_err(|e| SaveError::from_io("writing main save file", &e))?;

        info!(path = %self.paths.main().display(), "game state saved");
        Ok(())
    }

    pub(crate) fn load(&self) -> Result<GameSnapshot, LoadError> {
        self.clear_last_error();
        let _io = self.io_lock.lock();
        self.note_failure(self.load_locked())
    }

    fn load_locked(&self) -> Result<GameSnapshot, LoadError> {
        if !self.store.exists(self.paths.main()) {
            return Err(LoadError::NotFound(
                self.paths.main().display().to_string(),
            ));
        }

        let doc = match self.read_envelope(self.paths.main()) {
            Ok(doc) => doc,
            Err(main_err) => {
                if !self.store.exists(self.paths.backup()) {
                    return Err(main_err);
                }
                warn!(
                    error = %main_err,
                    "main save file unusable, attempting backup recovery"
                );
                match self.read_envelope(self.paths.backup()) {
                    Ok(doc) => {
                        info!(path = %self.paths.backup().display(), "recovered save from backup");
                        doc
                    }
                    Err(backup_err) => {
                        warn!(error = %backup_err, "backup is unusable too");
                        return Err(LoadError::Corrupted(
                            "main save and backup are both unreadable".to_string(),
                        ));
                    }
                }
            }
        };

        let snapshot = self.codec.decode(&doc).map_err(load_error_from_codec)?;
        debug!(path = %self.paths.main().display(), "game state loaded");
        Ok(snapshot)
    }

    /// Read + parse + validate one file. The backup fallback retries exactly
    /// this sequence.
    fn read_envelope(&self, path: &Path) -> Result<Value, LoadError> {
        let bytes = self
            .store
            .read(path)
            .map_err(|e| LoadError::from_io("reading save file", &e))?;
        let doc = self
            .codec
            .parse(&bytes)
            .map_err(|e| LoadError::Corrupted(e.to_string()))?;
        if !self.codec.validate_envelope(&doc) {
            return Err(LoadError::Corrupted(format!(
                "envelope failed structural validation: {}",
                path.display()
            )));
        }
        Ok(doc)
    }

    pub(crate) fn create_backup(&self) -> Result<(), SaveError> {
        self.clear_last_error();
        let _io = self.io_lock.lock();
        self.note_failure(self.create_backup_locked())
    }

    fn create_backup_locked(&self) -> Result<(), SaveError> {
        if !self.store.exists(self.paths.main()) {
            return Err(SaveError::Write(
                "cannot create backup: main save file does not exist".to_string(),
            ));
        }
        self.store
            .copy(self.paths.main(), self.paths.backup())
            .map_err(|e| SaveError::from_io("copying save to backup", &e))?;
        debug!(path = %self.paths.backup().display(), "backup refreshed");
        Ok(())
    }

    pub(crate) fn restore_from_backup(&self) -> Result<(), SaveError> {
        self.clear_last_error();
        let _io = self.io_lock.lock();
        self.note_failure(self.restore_locked())
    }

    fn restore_locked(&self) -> Result<(), SaveError> {
        if !self.store.exists(self.paths.backup()) {
            return Err(SaveError::Write(
                "cannot restore: backup file does not exist".to_string(),
            ));
        }
        self.store
            .copy(self.paths.backup(), self.paths.main())
            .map_err(|e| SaveError::from_io("restoring main save from backup", &e))?;
        info!(path = %self.paths.main().display(), "restored save from backup");
        Ok(())
    }

    pub(crate) fn record_auto_save(&self, at: DateTime<Utc>) {
        *self.last_auto_save.lock() = Some(at);
    }

    fn read_envelope_quietly(&self, path: &Path) -> Option<Value> {
        let bytes = self.store.read(path).ok()?;
        let doc = self.codec.parse(&bytes).ok()?;
        self.codec.validate_envelope(&doc).then_some(doc)
    }
}

fn load_error_from_codec(err: CodecError) -> LoadError {
    match err {
        CodecError::Syntax(msg) | CodecError::Structure(msg) => LoadError::Corrupted(msg),
        CodecError::UnsupportedVersion(found) => LoadError::VersionMismatch {
            expected: SAVE_FORMAT_VERSION.to_string(),
            found,
        },
        CodecError::Decode { section, message } => {
            LoadError::Unknown(format!("decoding `{section}` failed: {message}"))
        }
        CodecError::Encode(msg) => LoadError::Unknown(msg),
    }
}

/// Public save/load/backup/restore API plus the auto-save surface.
///
/// One coordinator per save directory. Dropping the coordinator disables
/// auto-save, which joins the worker and flushes any pending snapshot.
pub struct SaveCoordinator {
    engine: Arc<SaveEngine>,
    autosave: Mutex<Option<AutoSaveWorker>>,
}

impl SaveCoordinator {
    /// Create a coordinator saving under an explicit directory.
    ///
    /// The directory is created recursively; failure to create it is
    /// recorded in the last-error slot (the first save will then surface
    /// the real error).
    pub fn new(directory: impl Into<std::path::PathBuf>) -> Self {
        Self::with_paths(SavePaths::new(directory))
    }

    /// Create a coordinator saving under the platform app-data directory.
    pub fn with_default_directory() -> Self {
        Self::with_paths(SavePaths::platform_default())
    }

    fn with_paths(paths: SavePaths) -> Self {
        let engine = SaveEngine::new(paths);
        if let Err(err) = engine.store.ensure_directory(engine.paths.directory()) {
            warn!(
                directory = %engine.paths.directory().display(),
                error = %err,
                "failed to create save directory"
            );
            *engine.last_error.lock() = Some(format!(
                "failed to create save directory {}: {err}",
                engine.paths.directory().display()
            ));
        }
        SaveCoordinator {
            engine: Arc::new(engine),
            autosave: Mutex::new(None),
        }
    }

    /// Persist a snapshot to the main save file, refreshing the backup
    /// first if a main file already exists.
    pub fn save(&self, snapshot: &GameSnapshot) -> Result<(), SaveError> {
        self.engine.save(snapshot)
    }

    /// Load the current snapshot, transparently recovering from the backup
    /// when the main file is unusable.
    pub fn load(&self) -> Result<GameSnapshot, LoadError> {
        self.engine.load()
    }

    /// Copy the main save file over the backup slot.
    pub fn create_backup(&self) -> Result<(), SaveError> {
        self.engine.create_backup()
    }

    /// Copy the backup over the main save file.
    pub fn restore_from_backup(&self) -> Result<(), SaveError> {
        self.engine.restore_from_backup()
    }

    /// Whether a backup file exists.
    pub fn has_backup(&self) -> bool {
        self.engine.store.exists(self.engine.paths.backup())
    }

    /// Whether the main save file exists.
    pub fn save_file_exists(&self) -> bool {
        self.engine.store.exists(self.engine.paths.main())
    }

    /// Read + parse + validate an arbitrary file without side effects.
    pub fn is_valid_save_file(&self, path: &Path) -> bool {
        self.engine.read_envelope_quietly(path).is_some()
    }

    /// Schema version stamped in the main save file, if readable.
    pub fn save_file_version(&self) -> Option<String> {
        let doc = self.engine.read_envelope_quietly(self.engine.paths.main())?;
        self.engine.codec.version(&doc)
    }

    /// Time of the last committed save, parsed from the envelope's
    /// `savedAt` stamp (not filesystem mtime).
    pub fn last_save_time(&self) -> Option<DateTime<Utc>> {
        let doc = self.engine.read_envelope_quietly(self.engine.paths.main())?;
        let secs = self.engine.codec.saved_at(&doc)?;
        Utc.timestamp_opt(secs, 0).single()
    }

    /// Size of the main save file in bytes, 0 if missing.
    pub fn save_file_size(&self) -> u64 {
        self.engine.store.size(self.engine.paths.main())
    }

    /// Path of the main save file.
    pub fn save_file_path(&self) -> &Path {
        self.engine.paths.main()
    }

    /// Path of the backup file.
    pub fn backup_file_path(&self) -> &Path {
        self.engine.paths.backup()
    }

    /// Most recent failure description, if any operation has failed since
    /// the last clear.
    pub fn last_error(&self) -> Option<String> {
        self.engine.last_error.lock().clone()
    }

    /// Clear the shared diagnostic slot.
    pub fn clear_last_error(&self) {
        self.engine.clear_last_error();
    }

    /// Reserved: compression of the on-disk document. Currently a no-op.
    pub fn set_compression_enabled(&self, enabled: bool) {
        self.engine
            .compression_enabled
            .store(enabled, Ordering::Relaxed);
    }

    /// Whether the reserved compression flag is set.
    pub fn is_compression_enabled(&self) -> bool {
        self.engine.compression_enabled.load(Ordering::Relaxed)
    }

    /// Start background auto-save with the given interval (clamped to a
    /// 5-second floor).
    ///
    /// Calling while already enabled performs a full disable (join + flush)
    /// and restarts with the new interval; there are never two workers.
    pub fn enable_auto_save(&self, interval_secs: u64) {
        let mut slot = self.autosave.lock();
        if let Some(worker) = slot.take() {
            worker.shutdown();
        }
        *slot = Some(AutoSaveWorker::spawn(
            Arc::clone(&self.engine),
            interval_secs,
        ));
    }

    /// Stop background auto-save: joins the worker thread, then flushes any
    /// still-pending snapshot on the calling thread. No-op when disabled.
    pub fn disable_auto_save(&self) {
        if let Some(worker) = self.autosave.lock().take() {
            worker.shutdown();
        }
    }

    /// Whether the auto-save worker is running.
    pub fn is_auto_save_enabled(&self) -> bool {
        self.autosave.lock().is_some()
    }

    /// Hand a snapshot to the auto-save worker, replacing any pending one
    /// (last-write-wins). Ignored while auto-save is disabled.
    pub fn trigger_auto_save(&self, snapshot: &GameSnapshot) {
        if let Some(worker) = self.autosave.lock().as_ref() {
            worker.trigger(snapshot.clone());
        }
    }

    /// Time of the last successful auto-save, if any.
    pub fn last_auto_save_time(&self) -> Option<DateTime<Utc>> {
        *self.engine.last_auto_save.lock()
    }

    #[cfg(test)]
    pub(crate) fn engine_for_tests(&self) -> Arc<SaveEngine> {
        Arc::clone(&self.engine)
    }
}

impl Drop for SaveCoordinator {
    fn drop(&mut self) {
        self.disable_auto_save();
    }
}
