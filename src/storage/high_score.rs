//! High score persistence
//!
//! Only one number outlives a session. [`JsonFileStore`] keeps it in
//! `high_score.json` under the platform data directory; [`MemoryStore`] is
//! used when persistence is disabled or unavailable.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("high score file I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("high score file is malformed: {0}")]
    Json(#[from] serde_json::Error),
}

/// A persisted high score
pub trait HighScoreStore {
    /// The stored score, or 0 if none was ever saved
    fn get(&self) -> Result<u32, StoreError>;

    fn set(&mut self, score: u32) -> Result<(), StoreError>;
}

#[derive(Debug, Serialize, Deserialize)]
struct HighScoreRecord {
    high_score: u32,
}

#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `high_score.json` in the platform data directory, e.g.
    /// `~/.local/share/grid_snake` on Linux
    pub fn default_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "grid_snake")
            .map(|dirs| dirs.data_dir().join("high_score.json"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl HighScoreStore for JsonFileStore {
    fn get(&self) -> Result<u32, StoreError> {
        let json = match std::fs::read_to_string(&self.path) {
            Ok(json) => json,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(0),
            Err(err) => return Err(err.into()),
        };
        let record: HighScoreRecord = serde_json::from_str(&json)?;
        Ok(record.high_score)
    }

    fn set(&mut self, score: u32) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(&HighScoreRecord { high_score: score })?;
        std::fs::write(&self.path, json)?;
        Ok(())
    }
}

/// Keeps the score for the lifetime of the process only
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    high_score: u32,
}

impl MemoryStore {
    pub fn new(high_score: u32) -> Self {
        Self { high_score }
    }
}

impl HighScoreStore for MemoryStore {
    fn get(&self) -> Result<u32, StoreError> {
        Ok(self.high_score)
    }

    fn set(&mut self, score: u32) -> Result<(), StoreError> {
        self.high_score = score;
        Ok(())
    }
}
