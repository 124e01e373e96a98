//! Aggregate game state handed to the persistence layer
//!
//! [`GameSnapshot`] is an immutable-at-capture aggregate: the persistence
//! layer never mutates one, it only encodes and decodes. Every model carries
//! serde derives with the external camelCase field names the save format
//! uses; enum discriminants serialize as SCREAMING_SNAKE_CASE strings.
//!
//! Collections are lenient on decode: absent `tasks`/`notes`/`habits`/
//! `townState`/`gamificationState` sections default to empty. `character` is
//! mandatory and has no default. Maps are `BTreeMap` so encoded output is
//! deterministic.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// 2D position of the character in the town, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    /// Horizontal coordinate.
    pub x: f32,
    /// Vertical coordinate.
    pub y: f32,
}

/// Cardinal direction the character faces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Direction {
    /// Facing up.
    Up,
    /// Facing down.
    #[default]
    Down,
    /// Facing left.
    Left,
    /// Facing right.
    Right,
}

/// Animation/behavior state of the character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CharacterState {
    /// Standing still.
    #[default]
    Idle,
    /// Moving through the town.
    Walking,
    /// Interacting with a building or object.
    Interacting,
    /// In a focus/pomodoro session.
    Focused,
}

/// The player character.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Character {
    /// Display name.
    pub name: String,
    /// Current position in the town.
    #[serde(default)]
    pub position: Position,
    /// Direction the sprite faces.
    #[serde(default)]
    pub facing_direction: Direction,
    /// Current behavior state.
    #[serde(default)]
    pub current_state: CharacterState,
    /// Character level.
    #[serde(default = "default_level")]
    pub level: i32,
    /// Accumulated experience points.
    #[serde(default)]
    pub experience: i32,
    /// Movement speed in pixels per second.
    #[serde(default)]
    pub movement_speed: f32,
}

fn default_level() -> i32 {
    1
}

/// Task priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Priority {
    /// Low priority.
    Low,
    /// Medium priority.
    #[default]
    Medium,
    /// High priority.
    High,
}

/// Task completion status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskStatus {
    /// Not started.
    #[default]
    Pending,
    /// Started but not finished.
    InProgress,
    /// Done.
    Completed,
}

/// A single todo item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Stable identifier assigned by the task engine.
    pub id: u32,
    /// Task title.
    pub title: String,
    /// Priority bucket.
    #[serde(default)]
    pub priority: Priority,
    /// Completion status.
    #[serde(default)]
    pub status: TaskStatus,
    /// When the task is due.
    pub due_date: DateTime<Utc>,
    /// When the task was created.
    pub created_at: DateTime<Utc>,
    /// Child task IDs. Resolution to actual tasks belongs to the task
    /// engine after load, not to the persistence layer.
    #[serde(default)]
    pub subtasks: Vec<u32>,
}

/// A free-form note.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    /// Stable identifier assigned by the note engine.
    pub id: u32,
    /// Note title.
    pub title: String,
    /// Note body.
    #[serde(default)]
    pub content: String,
    /// Free-form tags.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Last modification time.
    pub modified_at: DateTime<Utc>,
}

/// How often a habit is due.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Frequency {
    /// Due every day.
    #[default]
    Daily,
    /// Due every week.
    Weekly,
    /// Due every month.
    Monthly,
}

/// A recurring habit with streak tracking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Habit {
    /// Stable identifier assigned by the habit tracker.
    pub id: u32,
    /// Habit name.
    pub name: String,
    /// Check-in cadence.
    #[serde(default)]
    pub frequency: Frequency,
    /// Current consecutive-completion streak.
    #[serde(default)]
    pub current_streak: i32,
    /// Longest streak ever reached.
    #[serde(default)]
    pub longest_streak: i32,
    /// Most recent check-in, `None` (JSON null) when never completed.
    #[serde(default)]
    pub last_completed: Option<DateTime<Utc>>,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Every recorded check-in, oldest first.
    #[serde(default)]
    pub completion_history: Vec<DateTime<Utc>>,
}

/// Upgrade state of a single town building.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildingState {
    /// Upgrade level, starts at 1.
    #[serde(default = "default_level")]
    pub level: i32,
    /// Decoration item IDs applied to this building.
    #[serde(default)]
    pub decorations: Vec<String>,
}

impl Default for BuildingState {
    fn default() -> Self {
        BuildingState {
            level: 1,
            decorations: Vec::new(),
        }
    }
}

/// State of the whole town.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TownState {
    /// Per-building state, keyed by building name.
    #[serde(default)]
    pub buildings: BTreeMap<String, BuildingState>,
    /// Decoration item IDs placed outside any building.
    #[serde(default)]
    pub global_decorations: Vec<String>,
    /// Shop items the player has unlocked.
    #[serde(default)]
    pub unlocked_items: Vec<String>,
}

/// Progress counters maintained by the gamification engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GamificationState {
    /// Lifetime experience points.
    #[serde(default)]
    pub total_experience: i32,
    /// Account level derived from experience.
    #[serde(default = "default_level")]
    pub level: i32,
    /// Unlocked achievement IDs.
    #[serde(default)]
    pub achievements: Vec<String>,
    /// Currency balances, keyed by currency name (coffee, experience, ...).
    #[serde(default)]
    pub currency: BTreeMap<String, i64>,
}

impl Default for GamificationState {
    fn default() -> Self {
        GamificationState {
            total_experience: 0,
            level: 1,
            achievements: Vec::new(),
            currency: BTreeMap::new(),
        }
    }
}

/// Point-in-time aggregate of everything the game persists.
///
/// Captured by the application and handed to the save layer; the save layer
/// only ever encodes or decodes it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameSnapshot {
    /// The player character. Mandatory in the save format.
    pub character: Character,
    /// All tasks, in engine order.
    #[serde(default)]
    pub tasks: Vec<Task>,
    /// All notes, in engine order.
    #[serde(default)]
    pub notes: Vec<Note>,
    /// All habits, in engine order.
    #[serde(default)]
    pub habits: Vec<Habit>,
    /// Town and building state.
    #[serde(default)]
    pub town_state: TownState,
    /// Gamification counters.
    #[serde(default)]
    pub gamification_state: GamificationState,
}

impl GameSnapshot {
    /// Create a snapshot containing only a character, everything else empty.
    pub fn new(character: Character) -> Self {
        GameSnapshot {
            character,
            tasks: Vec::new(),
            notes: Vec::new(),
            habits: Vec::new(),
            town_state: TownState::default(),
            gamification_state: GamificationState::default(),
        }
    }
}
