//! Host-facing session: a game paired with a score store.
//!
//! The reducer knows nothing about persistence. `GameSession` watches for
//! completed rounds and offers each result to the store exactly once, and
//! builds the category menu with best scores.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::catalog::Category;
use crate::core::{CardId, Clock, GameConfig, SystemClock};
use crate::game::{MatchGame, Selection};
use crate::scores::{Result, ScoreStore};

/// One row of the category menu.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategorySummary {
    pub category: Category,
    pub best: Option<u32>,
}

/// Result of a finished round.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundOutcome {
    pub category: Category,
    pub moves: u32,
    pub elapsed: Duration,
    /// The result set a new best score for the category.
    pub new_best: bool,
}

/// A game plus the store its results are recorded in.
#[derive(Debug)]
pub struct GameSession<S: ScoreStore, C: Clock = SystemClock> {
    game: MatchGame<C>,
    store: S,
    recorded: Option<u64>,
}

impl<S: ScoreStore> GameSession<S> {
    /// Create a session on the system clock.
    pub fn new(config: GameConfig, store: S) -> Self {
        Self::with_game(MatchGame::new(config), store)
    }
}

impl<S: ScoreStore, C: Clock> GameSession<S, C> {
    /// Wrap an existing game.
    pub fn with_game(game: MatchGame<C>, store: S) -> Self {
        Self {
            game,
            store,
            recorded: None,
        }
    }

    /// Start a round in `category`.
    pub fn play(&mut self, category: Category) {
        self.game.start_round(category);
    }

    /// Flip a card.
    pub fn select_card(&mut self, id: CardId) -> Selection {
        self.game.select_card(id)
    }

    /// Run deferred work up to `now`. Records the result if the round
    /// just completed.
    pub fn advance_to(&mut self, now: Duration) -> Result<Option<RoundOutcome>> {
        self.game.advance_to(now);
        self.record_if_completed()
    }

    /// Advance to the game clock's current time.
    pub fn poll(&mut self) -> Result<Option<RoundOutcome>> {
        self.game.poll();
        self.record_if_completed()
    }

    fn record_if_completed(&mut self) -> Result<Option<RoundOutcome>> {
        let generation = self.game.generation();
        if !self.game.is_completed() || self.recorded == Some(generation) {
            return Ok(None);
        }
        let Some(category) = self.game.category() else {
            return Ok(None);
        };

        let moves = self.game.move_count();
        let new_best = self.store.record_score(category, moves)?;
        self.recorded = Some(generation);

        if new_best {
            info!(%category, moves, "new best score");
        }
        Ok(Some(RoundOutcome {
            category,
            moves,
            elapsed: self.game.elapsed_time(),
            new_best,
        }))
    }

    /// Every category with its best score, in menu order.
    pub fn menu(&self) -> Result<Vec<CategorySummary>> {
        Category::ALL
            .into_iter()
            .map(|category| {
                Ok(CategorySummary {
                    category,
                    best: self.store.best_score(category)?,
                })
            })
            .collect()
    }

    /// Best score for a category.
    pub fn best_score(&self, category: Category) -> Result<Option<u32>> {
        self.store.best_score(category)
    }

    /// The game.
    #[must_use]
    pub fn game(&self) -> &MatchGame<C> {
        &self.game
    }

    /// The game, mutably (for subscribing listeners or ending the round).
    pub fn game_mut(&mut self) -> &mut MatchGame<C> {
        &mut self.game
    }

    /// The score store.
    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }
}
