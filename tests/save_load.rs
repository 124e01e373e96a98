//! Foreground save/load behavior: round-trips, corruption classification,
//! backup fallback, and metadata queries.

mod common;

use common::{full_snapshot, named_snapshot};
use std::fs;
use tasksave::{LoadError, SaveCoordinator, SaveError};
use tempfile::TempDir;

#[test]
fn round_trip_reproduces_every_field() {
    let temp_dir = TempDir::new().unwrap();
    let coordinator = SaveCoordinator::new(temp_dir.path());

    let snapshot = full_snapshot();
    coordinator.save(&snapshot).unwrap();
    let loaded = coordinator.load().unwrap();

    assert_eq!(loaded, snapshot);
}

#[test]
fn empty_directory_has_no_save() {
    let temp_dir = TempDir::new().unwrap();
    let coordinator = SaveCoordinator::new(temp_dir.path());

    assert!(!coordinator.save_file_exists());
    assert!(matches!(coordinator.load(), Err(LoadError::NotFound(_))));
}

#[test]
fn save_then_metadata_reports_current_version() {
    let temp_dir = TempDir::new().unwrap();
    let coordinator = SaveCoordinator::new(temp_dir.path());

    coordinator.save(&named_snapshot("A")).unwrap();

    assert!(coordinator.save_file_exists());
    assert_eq!(coordinator.save_file_version().unwrap(), "1.0.0");
    assert!(coordinator.save_file_size() > 0);
    assert!(coordinator.last_save_time().is_some());
}

#[test]
fn save_file_is_pretty_printed_json() {
    let temp_dir = TempDir::new().unwrap();
    let coordinator = SaveCoordinator::new(temp_dir.path());

    coordinator.save(&full_snapshot()).unwrap();

    let text = fs::read_to_string(coordinator.save_file_path()).unwrap();
    assert!(text.contains("\n  \"version\""));
    let doc: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(doc["character"]["name"], "TestPlayer");
    assert!(doc["tasks"].is_array());
}

#[test]
fn corrupt_main_without_backup_is_corrupted_data() {
    let temp_dir = TempDir::new().unwrap();
    let coordinator = SaveCoordinator::new(temp_dir.path());

    fs::write(coordinator.save_file_path(), "{ bad").unwrap();

    assert!(matches!(coordinator.load(), Err(LoadError::Corrupted(_))));
    assert!(coordinator.last_error().is_some());
}

#[test]
fn corrupt_main_with_backup_recovers_silently() {
    let temp_dir = TempDir::new().unwrap();
    let coordinator = SaveCoordinator::new(temp_dir.path());

    let snapshot = full_snapshot();
    coordinator.save(&snapshot).unwrap();
    coordinator.create_backup().unwrap();

    // Garbage bytes over the main file
    fs::write(coordinator.save_file_path(), "{ bad").unwrap();

    let loaded = coordinator.load().unwrap();
    assert_eq!(loaded, snapshot);
}

#[test]
fn both_files_corrupt_is_corrupted_data() {
    let temp_dir = TempDir::new().unwrap();
    let coordinator = SaveCoordinator::new(temp_dir.path());

    coordinator.save(&named_snapshot("A")).unwrap();
    coordinator.create_backup().unwrap();

    fs::write(coordinator.save_file_path(), "{ bad").unwrap();
    fs::write(coordinator.backup_file_path(), "also bad").unwrap();

    assert!(matches!(coordinator.load(), Err(LoadError::Corrupted(_))));
}

#[test]
fn envelope_missing_character_is_corrupted_and_never_partially_decoded() {
    let temp_dir = TempDir::new().unwrap();
    let coordinator = SaveCoordinator::new(temp_dir.path());

    fs::write(
        coordinator.save_file_path(),
        r#"{"version": "1.0.0", "incomplete": true}"#,
    )
    .unwrap();

    assert!(matches!(coordinator.load(), Err(LoadError::Corrupted(_))));
}

#[test]
fn envelope_with_non_array_tasks_is_corrupted() {
    let temp_dir = TempDir::new().unwrap();
    let coordinator = SaveCoordinator::new(temp_dir.path());

    fs::write(
        coordinator.save_file_path(),
        r#"{"version": "1.0.0", "character": {"name": "A"}, "tasks": {"oops": true}}"#,
    )
    .unwrap();

    assert!(matches!(coordinator.load(), Err(LoadError::Corrupted(_))));
}

#[test]
fn structurally_invalid_main_falls_back_to_backup() {
    let temp_dir = TempDir::new().unwrap();
    let coordinator = SaveCoordinator::new(temp_dir.path());

    let snapshot = named_snapshot("good");
    coordinator.save(&snapshot).unwrap();
    coordinator.create_backup().unwrap();

    // Valid JSON, invalid envelope: fallback still engages
    fs::write(
        coordinator.save_file_path(),
        r#"{"version": "1.0.0", "incomplete": true}"#,
    )
    .unwrap();

    assert_eq!(coordinator.load().unwrap(), snapshot);
}

#[test]
fn backup_and_restore_round_trip() {
    let temp_dir = TempDir::new().unwrap();
    let coordinator = SaveCoordinator::new(temp_dir.path());

    coordinator.save(&named_snapshot("v1")).unwrap();
    coordinator.create_backup().unwrap();
    assert!(coordinator.has_backup());

    coordinator.save(&named_snapshot("v2")).unwrap();
    assert_eq!(coordinator.load().unwrap().character.name, "v2");

    coordinator.restore_from_backup().unwrap();
    assert_eq!(coordinator.load().unwrap().character.name, "v1");
}

#[test]
fn overwriting_save_refreshes_backup_opportunistically() {
    let temp_dir = TempDir::new().unwrap();
    let coordinator = SaveCoordinator::new(temp_dir.path());

    coordinator.save(&named_snapshot("gen1")).unwrap();
    assert!(!coordinator.has_backup());

    coordinator.save(&named_snapshot("gen2")).unwrap();
    assert!(coordinator.has_backup());

    // Exactly one generation is retained
    coordinator.save(&named_snapshot("gen3")).unwrap();
    coordinator.restore_from_backup().unwrap();
    assert_eq!(coordinator.load().unwrap().character.name, "gen2");
}

#[test]
fn backup_without_main_file_is_write_error() {
    let temp_dir = TempDir::new().unwrap();
    let coordinator = SaveCoordinator::new(temp_dir.path());

    assert!(matches!(
        coordinator.create_backup(),
        Err(SaveError::Write(_))
    ));
}

#[test]
fn last_error_does_not_leak_across_operations() {
    let temp_dir = TempDir::new().unwrap();
    let coordinator = SaveCoordinator::new(temp_dir.path());

    assert!(matches!(coordinator.load(), Err(LoadError::NotFound(_))));
    assert!(coordinator.last_error().is_some());

    coordinator.save(&named_snapshot("A")).unwrap();
    assert!(coordinator.last_error().is_none());

    coordinator.clear_last_error();
    assert!(coordinator.last_error().is_none());
}

#[test]
fn is_valid_save_file_has_no_side_effects() {
    let temp_dir = TempDir::new().unwrap();
    let coordinator = SaveCoordinator::new(temp_dir.path());

    coordinator.save(&named_snapshot("A")).unwrap();
    let before = fs::read(coordinator.save_file_path()).unwrap();

    assert!(coordinator.is_valid_save_file(coordinator.save_file_path()));
    assert!(!coordinator.is_valid_save_file(coordinator.backup_file_path()));

    let after = fs::read(coordinator.save_file_path()).unwrap();
    assert_eq!(before, after);
    assert!(!coordinator.has_backup());
}
