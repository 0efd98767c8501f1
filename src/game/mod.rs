//! The match reducer.
//!
//! `MatchGame` owns the round: it deals the deck, flips cards, counts
//! moves, and resolves two-card attempts after the reveal delay.
//!
//! ## Lifecycle
//!
//! `Idle → Playing → Resolving → Playing … → Completed`
//!
//! - `start_round` deals a fresh deck (from any phase)
//! - `select_card` flips a card; the second flip of an attempt counts a
//!   move and schedules its resolution
//! - `advance_to` / `poll` run deferred work that has come due
//!
//! ## Example Usage
//!
//! ```
//! use std::time::Duration;
//! use find_pairs::catalog::Category;
//! use find_pairs::core::{GameConfig, ManualClock, Phase};
//! use find_pairs::game::{MatchGame, Selection};
//!
//! let clock = ManualClock::new();
//! let mut game = MatchGame::with_clock(GameConfig::default().with_seed(7), clock.clone());
//! game.start_round(Category::Fruits);
//!
//! let first = game.cards()[0].id;
//! let second = game.cards()[1].id;
//! assert_eq!(game.select_card(first), Selection::Flipped);
//! assert!(matches!(game.select_card(second), Selection::Attempt { .. }));
//! assert_eq!(game.move_count(), 1);
//! assert_eq!(game.phase(), Phase::Resolving);
//!
//! clock.advance(Duration::from_secs(1));
//! game.poll();
//! assert_eq!(game.phase(), Phase::Playing);
//! ```

mod engine;
mod matching;

pub use engine::{IgnoreReason, MatchGame, Selection};
pub use matching::cards_match;
