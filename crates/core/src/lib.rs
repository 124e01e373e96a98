//! Core types for the TaskSave persistence system
//!
//! This crate defines the foundational types shared across the workspace:
//! - GameSnapshot: the aggregate game state handed to the persistence layer
//! - Domain models: Character, Task, Note, Habit, TownState, GamificationState
//! - Error: the closed save/load error taxonomies

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod snapshot;

pub use error::{LoadError, SaveError};
pub use snapshot::{
    BuildingState, Character, CharacterState, Direction, Frequency, GameSnapshot,
    GamificationState, Habit, Note, Position, Priority, Task, TaskStatus, TownState,
};
