//! Persistence boundary: all workspaces as one JSON snapshot under a versioned key.

use crate::models::Workspace;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Versioned key every snapshot is stored under. Snapshots with another key are rejected.
pub const STORAGE_KEY: &str = "darts-tournament:v2";

/// Errors reading or writing a snapshot.
#[derive(Debug)]
pub enum StorageError {
    Io(std::io::Error),
    Json(serde_json::Error),
    /// The snapshot was written under a different key (older format).
    KeyMismatch { found: String },
}

impl std::fmt::Display for StorageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageError::Io(e) => write!(f, "Storage I/O error: {}", e),
            StorageError::Json(e) => write!(f, "Malformed snapshot: {}", e),
            StorageError::KeyMismatch { found } => {
                write!(f, "Snapshot key {:?} does not match {:?}", found, STORAGE_KEY)
            }
        }
    }
}

impl std::error::Error for StorageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StorageError::Io(e) => Some(e),
            StorageError::Json(e) => Some(e),
            StorageError::KeyMismatch { .. } => None,
        }
    }
}

impl From<std::io::Error> for StorageError {
    fn from(e: std::io::Error) -> Self {
        StorageError::Io(e)
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(e: serde_json::Error) -> Self {
        StorageError::Json(e)
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct Snapshot {
    key: String,
    workspaces: Vec<Workspace>,
}

/// Serialize workspaces to the snapshot JSON.
pub fn encode(workspaces: &[Workspace]) -> Result<String, StorageError> {
    let snapshot = Snapshot {
        key: STORAGE_KEY.to_string(),
        workspaces: workspaces.to_vec(),
    };
    Ok(serde_json::to_string(&snapshot)?)
}

/// Parse snapshot JSON written by [`encode`].
pub fn decode(json: &str) -> Result<Vec<Workspace>, StorageError> {
    let snapshot: Snapshot = serde_json::from_str(json)?;
    if snapshot.key != STORAGE_KEY {
        return Err(StorageError::KeyMismatch { found: snapshot.key });
    }
    Ok(snapshot.workspaces)
}

/// Load workspaces from `path`. A missing file is an empty state.
pub fn load_from_file(path: &Path) -> Result<Vec<Workspace>, StorageError> {
    match std::fs::read_to_string(path) {
        Ok(json) => decode(&json),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Vec::new()),
        Err(e) => Err(e.into()),
    }
}

pub fn save_to_file(path: &Path, workspaces: &[Workspace]) -> Result<(), StorageError> {
    let json = encode(workspaces)?;
    std::fs::write(path, json)?;
    Ok(())
}
