//! Round state.
//!
//! ## RoundState
//!
//! Mutable state owned by the game while a round is played:
//! - Cards in grid order
//! - Move counter and timing
//! - Pending selection (at most two card ids)
//! - Round generation
//!
//! ## RoundSnapshot
//!
//! Immutable view handed to observers and hosts. Cards live in an `im`
//! persistent vector, so taking a snapshot after every mutation is O(1).

use std::time::Duration;

use im::Vector;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::card::{Card, CardId};
use crate::catalog::Category;

/// Where a round is in its lifecycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// No round has been started.
    Idle,
    /// Waiting for the player to flip a card.
    Playing,
    /// Two cards are revealed and their resolution is scheduled.
    Resolving,
    /// Every card is matched.
    Completed,
}

/// State of the round being played.
#[derive(Clone, Debug)]
pub struct RoundState {
    /// Category the deck was drawn from.
    pub category: Category,

    /// Cards in grid order.
    pub(crate) cards: Vector<Card>,

    /// Completed two-card attempts.
    pub move_count: u32,

    /// Clock reading when the round started.
    pub start_time: Duration,

    /// Time since `start_time`, refreshed by ticks and frozen on completion.
    pub elapsed_time: Duration,

    /// Every card is matched.
    pub completed: bool,

    /// Flipped but unresolved cards.
    pub(crate) pending: SmallVec<[CardId; 2]>,

    /// Round generation token.
    pub generation: u64,
}

impl RoundState {
    /// Create a fresh round over an already shuffled deck.
    #[must_use]
    pub fn new(
        category: Category,
        cards: Vector<Card>,
        start_time: Duration,
        generation: u64,
    ) -> Self {
        Self {
            category,
            cards,
            move_count: 0,
            start_time,
            elapsed_time: Duration::ZERO,
            completed: false,
            pending: SmallVec::new(),
            generation,
        }
    }

    /// Cards in grid order.
    #[must_use]
    pub fn cards(&self) -> &Vector<Card> {
        &self.cards
    }

    /// Flipped but unresolved card ids, in flip order.
    #[must_use]
    pub fn pending(&self) -> &[CardId] {
        &self.pending
    }

    /// Grid position of a card.
    #[must_use]
    pub fn position(&self, id: CardId) -> Option<usize> {
        self.cards.iter().position(|c| c.id == id)
    }

    /// Get a card by id.
    #[must_use]
    pub fn card(&self, id: CardId) -> Option<&Card> {
        self.cards.iter().find(|c| c.id == id)
    }

    /// Get a mutable card by id.
    pub(crate) fn card_mut(&mut self, id: CardId) -> Option<&mut Card> {
        let index = self.position(id)?;
        self.cards.get_mut(index)
    }

    /// Check if every card is matched.
    #[must_use]
    pub fn all_matched(&self) -> bool {
        self.cards.iter().all(|c| c.is_matched)
    }

    /// Number of matched pairs so far.
    #[must_use]
    pub fn matched_pairs(&self) -> usize {
        self.cards.iter().filter(|c| c.is_matched).count() / 2
    }

    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> Phase {
        if self.completed {
            Phase::Completed
        } else if self.pending.len() == 2 {
            Phase::Resolving
        } else {
            Phase::Playing
        }
    }

    /// Take an immutable snapshot.
    #[must_use]
    pub fn snapshot(&self) -> RoundSnapshot {
        RoundSnapshot {
            category: Some(self.category),
            cards: self.cards.clone(),
            move_count: self.move_count,
            elapsed_time: self.elapsed_time,
            completed: self.completed,
            phase: self.phase(),
            generation: self.generation,
        }
    }
}

/// Read-only view of a round at one instant.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundSnapshot {
    /// Category of the round. `None` before any round starts.
    pub category: Option<Category>,

    /// Cards in grid order.
    pub cards: Vector<Card>,

    /// Completed two-card attempts.
    pub move_count: u32,

    /// Elapsed time as last refreshed.
    pub elapsed_time: Duration,

    /// Every card is matched.
    pub completed: bool,

    /// Lifecycle phase.
    pub phase: Phase,

    /// Round generation token (0 before any round starts).
    pub generation: u64,
}

impl RoundSnapshot {
    /// Snapshot of a game with no round.
    #[must_use]
    pub fn idle() -> Self {
        Self {
            category: None,
            cards: Vector::new(),
            move_count: 0,
            elapsed_time: Duration::ZERO,
            completed: false,
            phase: Phase::Idle,
            generation: 0,
        }
    }

    /// Get a card by id.
    #[must_use]
    pub fn card(&self, id: CardId) -> Option<&Card> {
        self.cards.iter().find(|c| c.id == id)
    }
}
