//! Best-score persistence
//!
//! The only state that outlives a process is a single number, stored as a
//! small JSON document so the file stays readable and can grow fields later.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Default file name, relative to the working directory
pub const DEFAULT_HIGH_SCORE_FILE: &str = "snake_highscore.json";

/// On-disk record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighScoreRecord {
    pub best: u32,

    /// Crate version that wrote the file
    pub version: String,
}

impl HighScoreRecord {
    pub fn new(best: u32) -> Self {
        Self {
            best,
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// Reads and writes the best score at a fixed path
#[derive(Debug, Clone)]
pub struct HighScoreStore {
    path: PathBuf,
}

impl HighScoreStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the best score. A missing file means no game has been played yet.
    pub fn load(&self) -> Result<u32> {
        if !self.path.exists() {
            debug!(path = ?self.path, "no high score file, starting at 0");
            return Ok(0);
        }

        let json = std::fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read high score from {:?}", self.path))?;
        let record: HighScoreRecord = serde_json::from_str(&json)
            .with_context(|| format!("Failed to parse high score in {:?}", self.path))?;

        info!(best = record.best, path = ?self.path, "loaded high score");
        Ok(record.best)
    }

    /// Write the best score, creating parent directories if needed
    pub fn save(&self, best: u32) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create directory: {:?}", parent))?;
            }
        }

        let json = serde_json::to_string_pretty(&HighScoreRecord::new(best))
            .context("Failed to serialize high score")?;
        std::fs::write(&self.path, json)
            .with_context(|| format!("Failed to write high score to {:?}", self.path))?;

        info!(best, path = ?self.path, "saved high score");
        Ok(())
    }
}

impl Default for HighScoreStore {
    fn default() -> Self {
        Self::new(DEFAULT_HIGH_SCORE_FILE)
    }
}
