//! TaskSave — durable JSON persistence for the TaskTown productivity game
//!
//! TaskSave saves and loads the game's aggregate state (character, tasks,
//! notes, habits, town, gamification progress) as a single pretty-printed
//! JSON document, with a single-generation backup for corruption recovery
//! and a debounced background auto-save worker.
//!
//! # Quick Start
//!
//! ```no_run
//! use tasksave::{Character, GameSnapshot, SaveCoordinator};
//!
//! let saves = SaveCoordinator::with_default_directory();
//!
//! let snapshot = GameSnapshot::new(Character {
//!     name: "Player".to_string(),
//!     position: Default::default(),
//!     facing_direction: Default::default(),
//!     current_state: Default::default(),
//!     level: 1,
//!     experience: 0,
//!     movement_speed: 100.0,
//! });
//! saves.save(&snapshot)?;
//!
//! // Background persistence: debounced, last-write-wins
//! saves.enable_auto_save(30);
//! saves.trigger_auto_save(&snapshot);
//! saves.disable_auto_save(); // joins the worker and flushes anything pending
//!
//! let restored = saves.load()?;
//! assert_eq!(restored.character.name, "Player");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! # Architecture
//!
//! The workspace layers bottom-up: `tasksave-core` (models, error
//! taxonomies), `tasksave-storage` (primitive file I/O), and
//! `tasksave-durability` (codec, coordinator, auto-save). This facade
//! re-exports the public API.

// Re-export the public API from tasksave-durability
pub use tasksave_durability::*;
