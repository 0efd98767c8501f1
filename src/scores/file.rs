//! JSON file score store.
//!
//! File layout:
//!
//! ```json
//! {"scores":[{"category":"Fruits","moves":9}]}
//! ```
//!
//! The whole file is rewritten (via a temporary sibling and a rename)
//! whenever a best score improves.

use std::collections::hash_map::Entry;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::{improves, BestScore, Result, ScoreStore, StoreError};
use crate::catalog::Category;

#[derive(Debug, Default, Serialize, Deserialize)]
struct ScoreFile {
    #[serde(default)]
    scores: Vec<BestScore>,
}

/// Scores persisted to a JSON file.
#[derive(Clone, Debug)]
pub struct JsonFileScoreStore {
    path: PathBuf,
    best: FxHashMap<Category, u32>,
}

impl JsonFileScoreStore {
    /// Open the store at `path`, loading existing scores.
    ///
    /// A missing file is an empty store; it is created on the first
    /// improvement.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let best = match fs::read_to_string(&path) {
            Ok(text) => load(&path, &text)?,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %path.display(), "no score file yet");
                FxHashMap::default()
            }
            Err(e) => return Err(StoreError::io(path, e)),
        };
        Ok(Self { path, best })
    }

    /// Location of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn save(&self) -> Result<()> {
        let mut scores: Vec<BestScore> = self
            .best
            .iter()
            .map(|(&category, &moves)| BestScore { category, moves })
            .collect();
        scores.sort_by_key(|s| s.category);

        let text = serde_json::to_string_pretty(&ScoreFile { scores })?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, text).map_err(|e| StoreError::io(&tmp, e))?;
        fs::rename(&tmp, &self.path).map_err(|e| StoreError::io(&self.path, e))
    }
}

fn load(path: &Path, text: &str) -> Result<FxHashMap<Category, u32>> {
    let file: ScoreFile = serde_json::from_str(text).map_err(|source| StoreError::Malformed {
        path: path.to_path_buf(),
        source,
    })?;

    let mut best = FxHashMap::default();
    for score in file.scores {
        match best.entry(score.category) {
            Entry::Vacant(slot) => {
                slot.insert(score.moves);
            }
            // Keep the lowest if a category appears twice.
            Entry::Occupied(mut slot) => {
                warn!(category = %score.category, "duplicate score entry");
                if score.moves < *slot.get() {
                    slot.insert(score.moves);
                }
            }
        }
    }
    Ok(best)
}

impl ScoreStore for JsonFileScoreStore {
    fn best_score(&self, category: Category) -> Result<Option<u32>> {
        Ok(self.best.get(&category).copied())
    }

    fn record_score(&mut self, category: Category, moves: u32) -> Result<bool> {
        let previous = self.best.get(&category).copied();
        if !improves(previous, moves) {
            return Ok(false);
        }

        self.best.insert(category, moves);
        if let Err(e) = self.save() {
            match previous {
                Some(p) => self.best.insert(category, p),
                None => self.best.remove(&category),
            };
            return Err(e);
        }
        debug!(%category, moves, "new best score saved");
        Ok(true)
    }
}
