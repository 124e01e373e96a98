//! Shared fixtures for the integration suite.

// Each test binary compiles this module and uses a subset of it
#![allow(dead_code)]

use chrono::{TimeZone, Utc};
use tasksave::{
    BuildingState, Character, CharacterState, Direction, Frequency, GameSnapshot,
    GamificationState, Habit, Note, Position, Priority, Task, TaskStatus,
};

/// A snapshot exercising every section of the envelope.
pub fn full_snapshot() -> GameSnapshot {
    let mut snapshot = GameSnapshot::new(Character {
        name: "TestPlayer".to_string(),
        position: Position { x: 50.0, y: 75.0 },
        facing_direction: Direction::Left,
        current_state: CharacterState::Walking,
        level: 2,
        experience: 100,
        movement_speed: 120.0,
    });

    snapshot.tasks.push(Task {
        id: 1,
        title: "Test Task".to_string(),
        priority: Priority::High,
        status: TaskStatus::InProgress,
        due_date: Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap(),
        created_at: Utc.with_ymd_and_hms(2025, 5, 1, 9, 30, 0).unwrap(),
        subtasks: vec![2, 3],
    });

    snapshot.notes.push(Note {
        id: 1,
        title: "Test Note".to_string(),
        content: "Test content".to_string(),
        tags: vec!["test".to_string()],
        created_at: Utc.with_ymd_and_hms(2025, 5, 2, 8, 0, 0).unwrap(),
        modified_at: Utc.with_ymd_and_hms(2025, 5, 3, 8, 0, 0).unwrap(),
    });

    snapshot.habits.push(Habit {
        id: 1,
        name: "Test Habit".to_string(),
        frequency: Frequency::Daily,
        current_streak: 3,
        longest_streak: 10,
        last_completed: Some(Utc.with_ymd_and_hms(2025, 5, 4, 7, 0, 0).unwrap()),
        created_at: Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap(),
        completion_history: vec![
            Utc.with_ymd_and_hms(2025, 5, 2, 7, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2025, 5, 3, 7, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2025, 5, 4, 7, 0, 0).unwrap(),
        ],
    });

    snapshot.town_state.buildings.insert(
        "coffeeShop".to_string(),
        BuildingState {
            level: 2,
            decorations: vec!["plant_01".to_string()],
        },
    );
    snapshot
        .town_state
        .global_decorations
        .push("tree_01".to_string());
    snapshot
        .town_state
        .unlocked_items
        .push("fountain".to_string());

    snapshot.gamification_state = GamificationState {
        total_experience: 100,
        level: 2,
        achievements: vec!["first_task".to_string()],
        currency: [("coffee".to_string(), 3)].into_iter().collect(),
    };

    snapshot
}

/// A minimal snapshot whose character name makes test output readable.
pub fn named_snapshot(name: &str) -> GameSnapshot {
    GameSnapshot::new(Character {
        name: name.to_string(),
        position: Position::default(),
        facing_direction: Direction::default(),
        current_state: CharacterState::default(),
        level: 1,
        experience: 0,
        movement_speed: 100.0,
    })
}
