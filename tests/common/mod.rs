//! Shared helpers for integration tests.

#![allow(dead_code)]

use std::time::Duration;

use find_pairs::core::{CardId, GameConfig, ManualClock};
use find_pairs::game::MatchGame;
use once_cell::sync::OnceCell;
use tracing_subscriber::{fmt, EnvFilter};

static LOGGING: OnceCell<()> = OnceCell::new();

/// Install a test subscriber once.
///
/// Level comes from `TEST_LOG`, then `RUST_LOG`, then `"warn"`.
pub fn init_logging() {
    LOGGING.get_or_init(|| {
        let filter = std::env::var("TEST_LOG")
            .or_else(|_| std::env::var("RUST_LOG"))
            .map(EnvFilter::new)
            .unwrap_or_else(|_| EnvFilter::new("warn"));

        fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .without_time()
            .try_init()
            .ok();
    });
}

/// A seeded game on a manual clock.
pub fn seeded_game(seed: u64) -> (MatchGame<ManualClock>, ManualClock) {
    init_logging();
    let clock = ManualClock::new();
    let game = MatchGame::with_clock(GameConfig::default().with_seed(seed), clock.clone());
    (game, clock)
}

/// Id of the card showing `content`.
pub fn card_with(game: &MatchGame<ManualClock>, content: &str) -> CardId {
    game.cards()
        .iter()
        .find(|c| c.content == content)
        .map(|c| c.id)
        .unwrap_or_else(|| panic!("no card showing {content}"))
}

/// Advance the clock past the reveal delay and run what came due.
pub fn settle(game: &mut MatchGame<ManualClock>, clock: &ManualClock) {
    clock.advance(Duration::from_secs(1));
    game.poll();
}
