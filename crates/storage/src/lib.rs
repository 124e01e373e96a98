//! Primitive file I/O for the TaskSave persistence system
//!
//! [`FileStore`] is the single point where the save system touches the
//! filesystem. Operations are synchronous and may block; callers that must
//! not stall (the auto-save worker) arrange their own threading around it.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod file_store;

pub use file_store::FileStore;
