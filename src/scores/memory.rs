//! In-memory score store.

use rustc_hash::FxHashMap;

use super::{improves, Result, ScoreStore};
use crate::catalog::Category;

/// Scores kept in a map for the lifetime of the process.
#[derive(Clone, Debug, Default)]
pub struct MemoryScoreStore {
    best: FxHashMap<Category, u32>,
}

impl MemoryScoreStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl ScoreStore for MemoryScoreStore {
    fn best_score(&self, category: Category) -> Result<Option<u32>> {
        Ok(self.best.get(&category).copied())
    }

    fn record_score(&mut self, category: Category, moves: u32) -> Result<bool> {
        let improved = improves(self.best.get(&category).copied(), moves);
        if improved {
            self.best.insert(category, moves);
        }
        Ok(improved)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_store() {
        let store = MemoryScoreStore::new();
        for category in Category::ALL {
            assert_eq!(store.best_score(category).unwrap(), None);
        }
    }

    #[test]
    fn test_keeps_minimum() {
        let mut store = MemoryScoreStore::new();

        assert!(store.record_score(Category::Fruits, 15).unwrap());
        assert!(!store.record_score(Category::Fruits, 18).unwrap());
        assert!(store.record_score(Category::Fruits, 11).unwrap());
        assert!(!store.record_score(Category::Fruits, 11).unwrap());

        assert_eq!(store.best_score(Category::Fruits).unwrap(), Some(11));
        assert_eq!(store.best_score(Category::Animals).unwrap(), None);
    }
}
