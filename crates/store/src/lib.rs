//! Best-score persistence for the puzzle mini-game
//!
//! One record per difficulty tier, monotonic max, read at session start
//! and written at game over. Storage problems never abort a session:
//! missing or corrupt records read as zero, and callers log-and-continue
//! on write failures.

use std::collections::HashMap;
use std::fmt::Debug;
use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use log::warn;

use blockfall_types::Difficulty;

/// Capability for reading and writing per-tier best scores
///
/// The session holds one of these behind a box; tests and headless
/// collaborators plug in [`MemoryScoreStore`].
pub trait ScoreStore: Debug {
    /// Best score recorded for a tier; 0 when no usable record exists
    fn read(&self, tier: Difficulty) -> u32;

    /// Persist a best score for a tier
    fn write(&mut self, tier: Difficulty, score: u32) -> Result<()>;
}

/// File-backed store: one `record_<tier>` file per tier in a directory
///
/// Each record holds a single decimal integer; surrounding whitespace is
/// tolerated. The directory is created on first write.
#[derive(Debug, Clone)]
pub struct FileScoreStore {
    dir: PathBuf,
}

impl FileScoreStore {
    /// Store records under `dir`
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Path of a tier's record file
    pub fn record_path(&self, tier: Difficulty) -> PathBuf {
        self.dir.join(format!("record_{}", tier.as_str()))
    }
}

impl ScoreStore for FileScoreStore {
    fn read(&self, tier: Difficulty) -> u32 {
        let path = self.record_path(tier);
        let contents = match fs::read_to_string(&path) {
            Ok(contents) => contents,
            // No record yet is the normal first-run case.
            Err(_) => return 0,
        };
        match contents.trim().parse() {
            Ok(score) => score,
            Err(_) => {
                warn!("ignoring corrupt best-score record at {}", path.display());
                0
            }
        }
    }

    fn write(&mut self, tier: Difficulty, score: u32) -> Result<()> {
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("creating record directory {}", self.dir.display()))?;
        let path = self.record_path(tier);
        fs::write(&path, format!("{score}\n"))
            .with_context(|| format!("writing best-score record {}", path.display()))?;
        Ok(())
    }
}

/// In-memory store for tests and headless collaborators
#[derive(Debug, Clone, Default)]
pub struct MemoryScoreStore {
    records: HashMap<Difficulty, u32>,
}

impl MemoryScoreStore {
    /// Create an empty store (every tier reads as 0)
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-seed a tier's record
    pub fn with_record(mut self, tier: Difficulty, score: u32) -> Self {
        self.records.insert(tier, score);
        self
    }
}

impl ScoreStore for MemoryScoreStore {
    fn read(&self, tier: Difficulty) -> u32 {
        self.records.get(&tier).copied().unwrap_or(0)
    }

    fn write(&mut self, tier: Difficulty, score: u32) -> Result<()> {
        self.records.insert(tier, score);
        Ok(())
    }
}
