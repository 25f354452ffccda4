//! Saved puzzles and solve history, persisted as a single JSON document.

use std::{
    fs,
    path::{Path, PathBuf},
    time::{SystemTime, UNIX_EPOCH},
};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::{
    error::{Error, Result},
    puzzle::Board,
};

/// Algorithm name recorded for solves performed by [`crate::solver::Solver`].
pub const BFS: &str = "BFS";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedPuzzle {
    pub id: u64,
    pub name: String,
    pub board: Board,
    /// Unix seconds.
    pub created_at: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolveRecord {
    pub board: Board,
    pub moves: usize,
    pub elapsed_secs: f64,
    pub algorithm: String,
    /// Unix seconds.
    pub solved_at: u64,
}

/// Aggregates over every recorded solve.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Statistics {
    pub total_solved: usize,
    pub average_moves: f64,
    pub average_time: f64,
    /// Shortest recorded solution, if any solve has been recorded.
    pub best_moves: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct History {
    #[serde(default)]
    puzzles: Vec<SavedPuzzle>,
    #[serde(default)]
    solves: Vec<SolveRecord>,
    #[serde(default)]
    next_id: u64,
}

fn now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default()
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `board` under `name` and return its id. Ids start at 1 and never
    /// repeat, even when `next_id` is missing from an older file.
    pub fn save_puzzle(&mut self, name: impl Into<String>, board: Board) -> u64 {
        let highest = self.puzzles.iter().map(|p| p.id).max().unwrap_or(0);
        let id = self.next_id.max(highest) + 1;
        self.next_id = id;
        self.puzzles.push(SavedPuzzle {
            id,
            name: name.into(),
            board,
            created_at: now(),
        });
        id
    }

    pub fn load_puzzle(&self, id: u64) -> Result<Board> {
        self.puzzles
            .iter()
            .find(|p| p.id == id)
            .map(|p| p.board)
            .ok_or(Error::UnknownPuzzle { id })
    }

    /// Saved puzzles, newest first.
    pub fn puzzles(&self) -> Vec<&SavedPuzzle> {
        let mut puzzles: Vec<&SavedPuzzle> = self.puzzles.iter().collect();
        puzzles.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        puzzles
    }

    pub fn solves(&self) -> &[SolveRecord] {
        &self.solves
    }

    pub fn record_solve(
        &mut self,
        board: Board,
        moves: usize,
        elapsed_secs: f64,
        algorithm: impl Into<String>,
    ) {
        self.solves.push(SolveRecord {
            board,
            moves,
            elapsed_secs,
            algorithm: algorithm.into(),
            solved_at: now(),
        });
    }

    pub fn statistics(&self) -> Statistics {
        let total_solved = self.solves.len();
        if total_solved == 0 {
            return Statistics::default();
        }

        let total_moves: usize = self.solves.iter().map(|s| s.moves).sum();
        let total_time: f64 = self.solves.iter().map(|s| s.elapsed_secs).sum();

        Statistics {
            total_solved,
            average_moves: total_moves as f64 / total_solved as f64,
            average_time: total_time / total_solved as f64,
            best_moves: self.solves.iter().map(|s| s.moves).min(),
        }
    }
}

/// JSON file holding a [`History`].
#[derive(Debug, Clone)]
pub struct HistoryStore {
    path: PathBuf,
}

impl HistoryStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the history; a missing file is an empty history.
    pub fn load(&self) -> Result<History> {
        if !self.path.exists() {
            debug!(path = ?self.path, "no history file yet");
            return Ok(History::new());
        }

        let contents = fs::read_to_string(&self.path).map_err(|source| Error::Io {
            operation: format!("read history file {:?}", self.path),
            source,
        })?;
        Ok(serde_json::from_str(&contents)?)
    }

    pub fn save(&self, history: &History) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| Error::Io {
                operation: format!("create directory {parent:?}"),
                source,
            })?;
        }

        let json = serde_json::to_string_pretty(history)?;
        fs::write(&self.path, json).map_err(|source| Error::Io {
            operation: format!("write history file {:?}", self.path),
            source,
        })?;
        info!(path = ?self.path, "history saved");
        Ok(())
    }

    /// Load, apply `f`, and write back.
    pub fn update<T>(&self, f: impl FnOnce(&mut History) -> T) -> Result<T> {
        let mut history = self.load()?;
        let out = f(&mut history);
        self.save(&history)?;
        Ok(out)
    }
}
