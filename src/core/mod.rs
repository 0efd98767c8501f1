//! Core types: cards, round state, RNG, clocks, configuration.
//!
//! Everything here is independent of how a round is driven. The reducer in
//! `game` composes these pieces.

pub mod card;
pub mod config;
pub mod rng;
pub mod state;
pub mod time;

pub use card::{Card, CardId, CardIdAllocator};
pub use config::{ConfigError, GameConfig, CARDS_PER_ROUND, PAIRS_PER_ROUND};
pub use rng::GameRng;
pub use state::{Phase, RoundSnapshot, RoundState};
pub use time::{format_duration, Clock, ManualClock, SystemClock};
