//! # find-pairs
//!
//! Engine for a memory-matching card game: flip cards on a 4×4 grid to
//! find symbol/word pairs ("🍎" ↔ "apple") within a category, counting
//! moves and elapsed time, with a best score kept per category.
//!
//! ## Design Principles
//!
//! 1. **Pure reducer**: `MatchGame` never sleeps or spawns. Deferred work
//!    (pair resolution, elapsed-time ticks) is scheduled as data and run
//!    when the host advances time.
//!
//! 2. **Generation-guarded tasks**: Every deferred task carries the round
//!    generation that created it. Starting a new round makes older tasks
//!    inert.
//!
//! 3. **Injected collaborators**: Clock, scheduler, observers, and score
//!    storage sit behind small traits.
//!
//! ## Modules
//!
//! - `catalog`: Categories and their pairs
//! - `core`: Cards, round state, RNG, clocks, configuration
//! - `schedule`: Deferred task timeline
//! - `events`: Round events and listeners
//! - `game`: The match reducer
//! - `scores`: Best-score stores
//! - `session`: Game plus store, as a host would use them

pub mod catalog;
pub mod core;
pub mod events;
pub mod game;
pub mod schedule;
pub mod scores;
pub mod session;

// Re-export commonly used types
pub use crate::catalog::{pairs_for, word_for_symbol, Category, Pair};

pub use crate::core::{
    format_duration, Card, CardId, Clock, ConfigError, GameConfig, GameRng, ManualClock, Phase,
    RoundSnapshot, RoundState, SystemClock, CARDS_PER_ROUND, PAIRS_PER_ROUND,
};

pub use crate::events::{ListenerId, RoundEvent};

pub use crate::game::{cards_match, IgnoreReason, MatchGame, Selection};

pub use crate::schedule::{Scheduler, Task, TaskHandle, TaskQueue};

pub use crate::scores::{BestScore, JsonFileScoreStore, MemoryScoreStore, ScoreStore, StoreError};

pub use crate::session::{CategorySummary, GameSession, RoundOutcome};
