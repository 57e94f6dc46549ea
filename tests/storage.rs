//! Integration tests for the JSON snapshot storage.

use dart_bracket_web::storage::{self, StorageError, STORAGE_KEY};
use dart_bracket_web::{update_legs, Workspace};
use std::path::PathBuf;

fn sample_workspaces() -> Vec<Workspace> {
    let mut played = Workspace::default();
    for name in ["Anna", "Ben", "Cleo", "Dan", "Eve"] {
        played.add_player(name).unwrap();
    }
    played.generate().unwrap();
    played
        .update_tournament(|t| update_legs(t, 0, 0, 2, 1))
        .unwrap();

    let mut setup = Workspace::new(5).unwrap();
    setup.add_player("Solo").unwrap();

    vec![played, setup]
}

fn temp_path() -> PathBuf {
    std::env::temp_dir().join(format!("dart-bracket-{}.json", uuid::Uuid::new_v4()))
}

#[test]
fn encode_then_decode_restores_workspaces() {
    let workspaces = sample_workspaces();
    let json = storage::encode(&workspaces).unwrap();
    assert!(json.contains(STORAGE_KEY));
    assert_eq!(storage::decode(&json).unwrap(), workspaces);
}

#[test]
fn decode_rejects_other_key() {
    let json = r#"{"key":"darts-tournament:v1","workspaces":[]}"#;
    assert!(matches!(
        storage::decode(json),
        Err(StorageError::KeyMismatch { found }) if found == "darts-tournament:v1"
    ));
}

#[test]
fn decode_rejects_malformed_json() {
    assert!(matches!(storage::decode("{not json"), Err(StorageError::Json(_))));
}

#[test]
fn missing_file_loads_as_empty() {
    let path = temp_path();
    assert!(storage::load_from_file(&path).unwrap().is_empty());
}

#[test]
fn save_then_load_from_file() {
    let path = temp_path();
    let workspaces = sample_workspaces();
    storage::save_to_file(&path, &workspaces).unwrap();
    let loaded = storage::load_from_file(&path);
    std::fs::remove_file(&path).unwrap();
    assert_eq!(loaded.unwrap(), workspaces);
}
