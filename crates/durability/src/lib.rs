//! Durable save/load for TaskTown game state
//!
//! This crate is the persistence subsystem proper:
//! - [`StateCodec`]: snapshot ⇄ on-disk JSON envelope, version/timestamp
//!   stamping, structural validation
//! - [`SaveCoordinator`]: the public save/load/backup/restore API with
//!   backup-before-overwrite and backup-fallback-on-corruption
//! - auto-save: a debounced background worker with a single-slot coalescing
//!   queue, driven through the coordinator
//!
//! The on-disk format is a pretty-printed UTF-8 JSON document at
//! `<dir>/game_save.json`, with a single-generation backup sibling at
//! `<dir>/game_save_backup.json`.

#![warn(clippy::all)]

mod autosave;
pub mod codec;
pub mod coordinator;
pub mod paths;

pub use codec::{CodecError, StateCodec, SAVE_FORMAT_VERSION};
pub use coordinator::SaveCoordinator;
pub use paths::{SavePaths, BACKUP_SAVE_FILE, MAIN_SAVE_FILE};

// Re-export the core types so embedders need only this crate.
pub use tasksave_core::{
    BuildingState, Character, CharacterState, Direction, Frequency, GameSnapshot,
    GamificationState, Habit, LoadError, Note, Position, Priority, SaveError, Task, TaskStatus,
    TownState,
};
