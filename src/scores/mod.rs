//! Best-score persistence.
//!
//! The game only needs two things from storage: the best (lowest) move
//! count per category, and a way to offer a new result. [`ScoreStore`] is
//! that seam; hosts pick an implementation.
//!
//! - [`MemoryScoreStore`]: in-process map, for tests and ephemeral hosts
//! - [`JsonFileScoreStore`]: a small JSON file rewritten on improvement

mod error;
mod file;
mod memory;

pub use error::{Result, StoreError};
pub use file::JsonFileScoreStore;
pub use memory::MemoryScoreStore;

use serde::{Deserialize, Serialize};

use crate::catalog::Category;

/// Best result for one category.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BestScore {
    pub category: Category,
    /// Fewest moves a round in this category has been completed in.
    pub moves: u32,
}

/// Storage for best scores.
pub trait ScoreStore {
    /// Best (lowest) move count recorded for a category.
    fn best_score(&self, category: Category) -> Result<Option<u32>>;

    /// Offer a finished round's move count.
    ///
    /// Keeps the minimum. Returns `true` if `moves` became the new best.
    fn record_score(&mut self, category: Category, moves: u32) -> Result<bool>;

    /// Best scores for every category that has one, in menu order.
    fn all_scores(&self) -> Result<Vec<BestScore>> {
        let mut scores = Vec::new();
        for category in Category::ALL {
            if let Some(moves) = self.best_score(category)? {
                scores.push(BestScore { category, moves });
            }
        }
        Ok(scores)
    }
}

/// Whether `moves` beats `current`.
pub(crate) fn improves(current: Option<u32>, moves: u32) -> bool {
    current.map_or(true, |best| moves < best)
}
