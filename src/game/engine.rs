//! `MatchGame`: round state plus the deferred work that drives it.

use std::time::Duration;

use im::Vector;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, trace, warn};

use super::matching::cards_match;
use crate::catalog::{pairs_for, Category};
use crate::core::{
    format_duration, Card, CardId, CardIdAllocator, Clock, GameConfig, GameRng, Phase,
    RoundSnapshot, RoundState, SystemClock, PAIRS_PER_ROUND,
};
use crate::events::{ListenerId, ListenerRegistry, RoundEvent};
use crate::schedule::{Scheduler, Task, TaskHandle, TaskQueue};

/// Why a selection was ignored.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IgnoreReason {
    /// No round has been started.
    NoRound,
    /// The round is already completed.
    Completed,
    /// The id is not on the current board.
    UnknownCard,
    /// The card is already part of a found pair.
    AlreadyMatched,
    /// The card is already face-up.
    AlreadyFaceUp,
    /// Two cards are revealed and waiting to resolve.
    ResolutionPending,
}

/// Outcome of [`MatchGame::select_card`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Selection {
    /// Nothing changed.
    Ignored(IgnoreReason),
    /// First card of an attempt is now face-up.
    Flipped,
    /// Second card is face-up; the move is counted and resolution scheduled.
    Attempt { is_match: bool },
}

impl Selection {
    /// Check if the selection changed state.
    #[must_use]
    pub fn is_ignored(&self) -> bool {
        matches!(self, Selection::Ignored(_))
    }
}

/// The match reducer.
///
/// Generic over the clock and scheduler so hosts and tests can supply
/// their own. All mutation goes through `&mut self`, so selections, ticks
/// and resolutions are always serialized.
pub struct MatchGame<C: Clock = SystemClock, S: Scheduler = TaskQueue> {
    config: GameConfig,
    clock: C,
    scheduler: S,
    /// Picks which pairs are dealt.
    draw_rng: GameRng,
    /// Shuffles the dealt cards.
    deck_rng: GameRng,
    ids: CardIdAllocator,
    round: Option<RoundState>,
    generation: u64,
    tick: Option<TaskHandle>,
    resolution: Option<TaskHandle>,
    listeners: ListenerRegistry,
}

impl MatchGame {
    /// Create a game on the system clock.
    #[must_use]
    pub fn new(config: GameConfig) -> Self {
        Self::with_clock(config, SystemClock::new())
    }
}

impl<C: Clock> MatchGame<C, TaskQueue> {
    /// Create a game on a custom clock.
    #[must_use]
    pub fn with_clock(config: GameConfig, clock: C) -> Self {
        Self::with_parts(config, clock, TaskQueue::new())
    }
}

impl<C: Clock, S: Scheduler> MatchGame<C, S> {
    /// Create a game from a clock and a scheduler.
    ///
    /// A zero tick interval would reschedule the tick at the instant it
    /// ran, so it is replaced by the default interval.
    #[must_use]
    pub fn with_parts(mut config: GameConfig, clock: C, scheduler: S) -> Self {
        if let Err(e) = config.validate() {
            let fallback = GameConfig::default().tick_interval;
            warn!(error = %e, ?fallback, "invalid game config");
            config.tick_interval = fallback;
        }

        let rng = config.seed.map_or_else(GameRng::from_entropy, GameRng::new);
        debug!(seed = rng.seed(), "game created");

        Self {
            draw_rng: rng.for_context("pairs"),
            deck_rng: rng.for_context("deck"),
            config,
            clock,
            scheduler,
            ids: CardIdAllocator::new(),
            round: None,
            generation: 0,
            tick: None,
            resolution: None,
            listeners: ListenerRegistry::new(),
        }
    }

    // === Round Control ===

    /// Deal a fresh round for `category`.
    ///
    /// Replaces any round in progress. Deferred work from the previous
    /// round is cancelled, and anything that slips through is dropped by
    /// the generation check.
    pub fn start_round(&mut self, category: Category) {
        self.cancel_round_tasks();
        self.generation += 1;

        let pairs = pairs_for(category);
        let drawn = if pairs.len() > PAIRS_PER_ROUND {
            self.draw_rng.sample(pairs, PAIRS_PER_ROUND)
        } else {
            pairs.to_vec()
        };

        let mut deck: Vec<Card> = Vec::with_capacity(drawn.len() * 2);
        for pair in &drawn {
            deck.push(Card::symbol(self.ids.alloc(), pair.symbol));
            deck.push(Card::word(self.ids.alloc(), pair.word));
        }
        self.deck_rng.shuffle(&mut deck);

        let now = self.clock.now();
        self.round = Some(RoundState::new(
            category,
            deck.into_iter().collect::<Vector<_>>(),
            now,
            self.generation,
        ));
        self.tick = Some(self.scheduler.schedule_at(
            now + self.config.tick_interval,
            Task::Tick {
                generation: self.generation,
            },
        ));

        debug!(%category, generation = self.generation, "round started");
        self.emit(RoundEvent::RoundStarted {
            category,
            generation: self.generation,
        });
    }

    /// Tear down the round: stop ticking, drop any pending resolution and
    /// return to `Idle`.
    ///
    /// Returns the final state of the board, or `None` if no round was
    /// being played.
    pub fn end_round(&mut self) -> Option<RoundState> {
        let round = self.round.take()?;
        self.cancel_round_tasks();
        debug!(generation = self.generation, "round ended");
        self.emit(RoundEvent::RoundEnded {
            generation: self.generation,
        });
        Some(round)
    }

    fn cancel_round_tasks(&mut self) {
        if let Some(handle) = self.tick.take() {
            self.scheduler.cancel(handle);
        }
        if let Some(handle) = self.resolution.take() {
            self.scheduler.cancel(handle);
        }
    }

    // === Selection ===

    /// Flip a card.
    ///
    /// Selections that are not allowed right now change nothing and are
    /// reported as [`Selection::Ignored`].
    pub fn select_card(&mut self, id: CardId) -> Selection {
        let Some(round) = self.round.as_mut() else {
            return ignored(id, IgnoreReason::NoRound);
        };
        if round.completed {
            return ignored(id, IgnoreReason::Completed);
        }
        let Some(card) = round.card(id) else {
            return ignored(id, IgnoreReason::UnknownCard);
        };
        if card.is_matched {
            return ignored(id, IgnoreReason::AlreadyMatched);
        }
        if card.is_face_up {
            return ignored(id, IgnoreReason::AlreadyFaceUp);
        }
        if round.pending.len() >= 2 {
            return ignored(id, IgnoreReason::ResolutionPending);
        }

        if let Some(card) = round.card_mut(id) {
            card.is_face_up = true;
        }
        round.pending.push(id);
        trace!(card = %id, pending = round.pending.len(), "card flipped");

        let selection = if let [first, second] = round.pending[..] {
            round.move_count += 1;
            let is_match = match (round.card(first), round.card(second)) {
                (Some(a), Some(b)) => cards_match(a, b),
                _ => false,
            };
            let due = self.clock.now() + self.config.reveal_delay;
            self.resolution = Some(self.scheduler.schedule_at(
                due,
                Task::Resolve {
                    first,
                    second,
                    is_match,
                    generation: self.generation,
                },
            ));
            debug!(moves = round.move_count, is_match, "attempt scheduled");
            Selection::Attempt { is_match }
        } else {
            Selection::Flipped
        };

        self.emit(RoundEvent::CardFlipped { card: id });
        selection
    }

    // === Time ===

    /// Run every task due at or before `now`, each at its own due time.
    ///
    /// Returns how many tasks were applied (stale tasks are not counted).
    pub fn advance_to(&mut self, now: Duration) -> usize {
        let mut applied = 0;
        while let Some((at, task)) = self.scheduler.pop_due(now) {
            if task.generation() != self.generation {
                trace!(?task, current = self.generation, "dropping stale task");
                continue;
            }
            let ran = match task {
                Task::Resolve {
                    first,
                    second,
                    is_match,
                    ..
                } => self.resolve(at, first, second, is_match),
                Task::Tick { .. } => self.on_tick(at),
            };
            if ran {
                applied += 1;
            }
        }
        applied
    }

    /// Run everything due according to the game's clock.
    pub fn poll(&mut self) -> usize {
        let now = self.clock.now();
        self.advance_to(now)
    }

    /// When the next deferred task is due, if any.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Duration> {
        self.scheduler.next_deadline()
    }

    fn resolve(&mut self, at: Duration, first: CardId, second: CardId, is_match: bool) -> bool {
        self.resolution = None;
        let Some(round) = self.round.as_mut() else {
            return false;
        };

        for id in [first, second] {
            if let Some(card) = round.card_mut(id) {
                if is_match {
                    card.is_matched = true;
                } else {
                    card.is_face_up = false;
                }
            }
        }
        round.pending.clear();

        let completed = round.all_matched();
        if completed {
            round.completed = true;
            round.elapsed_time = at.saturating_sub(round.start_time);
        }
        let moves = round.move_count;
        let elapsed = round.elapsed_time;

        debug!(%first, %second, is_match, "attempt resolved");
        self.emit(if is_match {
            RoundEvent::PairMatched { first, second }
        } else {
            RoundEvent::PairMismatched { first, second }
        });

        if completed {
            if let Some(handle) = self.tick.take() {
                self.scheduler.cancel(handle);
            }
            info!(moves, elapsed = %format_duration(elapsed), "round completed");
            self.emit(RoundEvent::RoundCompleted { moves, elapsed });
        }
        true
    }

    fn on_tick(&mut self, at: Duration) -> bool {
        self.tick = None;
        let Some(round) = self.round.as_mut() else {
            return false;
        };
        if round.completed {
            return false;
        }

        round.elapsed_time = at.saturating_sub(round.start_time);
        let elapsed = round.elapsed_time;
        self.tick = Some(self.scheduler.schedule_at(
            at + self.config.tick_interval,
            Task::Tick {
                generation: self.generation,
            },
        ));

        trace!(elapsed = %format_duration(elapsed), "tick");
        self.emit(RoundEvent::Tick { elapsed });
        true
    }

    // === Observers ===

    /// Register a listener, invoked after every mutation.
    pub fn subscribe<F>(&mut self, listener: F) -> ListenerId
    where
        F: FnMut(&RoundEvent, &RoundSnapshot) + Send + 'static,
    {
        self.listeners.subscribe(listener)
    }

    /// Remove a listener.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        self.listeners.unsubscribe(id)
    }

    fn emit(&mut self, event: RoundEvent) {
        if self.listeners.is_empty() {
            return;
        }
        let snapshot = self.snapshot();
        self.listeners.notify(&event, &snapshot);
    }

    // === Read Access ===

    /// The round being played, if any.
    #[must_use]
    pub fn round(&self) -> Option<&RoundState> {
        self.round.as_ref()
    }

    /// Snapshot of the current round.
    #[must_use]
    pub fn snapshot(&self) -> RoundSnapshot {
        self.round
            .as_ref()
            .map_or_else(RoundSnapshot::idle, RoundState::snapshot)
    }

    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> Phase {
        self.round.as_ref().map_or(Phase::Idle, RoundState::phase)
    }

    /// Cards in grid order (empty before the first round).
    #[must_use]
    pub fn cards(&self) -> Vector<Card> {
        self.round
            .as_ref()
            .map(|r| r.cards().clone())
            .unwrap_or_default()
    }

    /// Get a card on the current board.
    #[must_use]
    pub fn card(&self, id: CardId) -> Option<&Card> {
        self.round.as_ref()?.card(id)
    }

    /// Flipped but unresolved card ids.
    #[must_use]
    pub fn pending(&self) -> &[CardId] {
        match &self.round {
            Some(round) => round.pending(),
            None => &[],
        }
    }

    /// Completed two-card attempts this round.
    #[must_use]
    pub fn move_count(&self) -> u32 {
        self.round.as_ref().map_or(0, |r| r.move_count)
    }

    /// Elapsed time as of the last tick, or the final time once completed.
    #[must_use]
    pub fn elapsed_time(&self) -> Duration {
        self.round.as_ref().map_or(Duration::ZERO, |r| r.elapsed_time)
    }

    /// Elapsed time formatted as `MM:SS`.
    #[must_use]
    pub fn elapsed_display(&self) -> String {
        format_duration(self.elapsed_time())
    }

    /// Check if the round is completed.
    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.round.as_ref().is_some_and(|r| r.completed)
    }

    /// Category of the current round.
    #[must_use]
    pub fn category(&self) -> Option<Category> {
        self.round.as_ref().map(|r| r.category)
    }

    /// Current round generation (0 before the first round).
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// The game configuration.
    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// The game clock.
    #[must_use]
    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// The scheduler.
    #[must_use]
    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }
}

impl<C: Clock, S: Scheduler> std::fmt::Debug for MatchGame<C, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MatchGame")
            .field("config", &self.config)
            .field("generation", &self.generation)
            .field("phase", &self.phase())
            .field("move_count", &self.move_count())
            .field("listeners", &self.listeners.len())
            .finish_non_exhaustive()
    }
}

fn ignored(id: CardId, reason: IgnoreReason) -> Selection {
    trace!(card = %id, ?reason, "selection ignored");
    Selection::Ignored(reason)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{ManualClock, CARDS_PER_ROUND};

    fn game() -> (MatchGame<ManualClock>, ManualClock) {
        let clock = ManualClock::new();
        let game = MatchGame::with_clock(GameConfig::default().with_seed(42), clock.clone());
        (game, clock)
    }

    fn find(game: &MatchGame<ManualClock>, content: &str) -> CardId {
        game.cards()
            .iter()
            .find(|c| c.content == content)
            .map(|c| c.id)
            .expect("card on board")
    }

    #[test]
    fn test_idle_before_first_round() {
        let (mut game, _) = game();

        assert_eq!(game.phase(), Phase::Idle);
        assert!(game.cards().is_empty());
        assert_eq!(
            game.select_card(CardId::new(0)),
            Selection::Ignored(IgnoreReason::NoRound)
        );
    }

    #[test]
    fn test_start_round_deals_sixteen() {
        let (mut game, _) = game();
        game.start_round(Category::Animals);

        let cards = game.cards();
        assert_eq!(cards.len(), CARDS_PER_ROUND);
        assert_eq!(cards.iter().filter(|c| c.is_symbol).count(), 8);
        assert!(cards.iter().all(|c| !c.is_face_up && !c.is_matched));
        assert_eq!(game.phase(), Phase::Playing);
        assert_eq!(game.generation(), 1);
    }

    #[test]
    fn test_start_round_schedules_tick() {
        let (mut game, _) = game();
        game.start_round(Category::Animals);

        assert_eq!(game.next_deadline(), Some(Duration::from_secs(1)));
    }

    #[test]
    fn test_first_flip_does_not_count() {
        let (mut game, _) = game();
        game.start_round(Category::Fruits);

        let apple = find(&game, "🍎");
        assert_eq!(game.select_card(apple), Selection::Flipped);
        assert_eq!(game.move_count(), 0);
        assert_eq!(game.pending(), &[apple]);
        assert!(game.card(apple).is_some_and(|c| c.is_face_up));
    }

    #[test]
    fn test_match_resolves_after_delay() {
        let (mut game, clock) = game();
        game.start_round(Category::Fruits);

        let apple = find(&game, "🍎");
        let word = find(&game, "apple");
        game.select_card(apple);
        assert_eq!(
            game.select_card(word),
            Selection::Attempt { is_match: true }
        );
        assert_eq!(game.move_count(), 1);

        // Not yet due
        clock.advance(Duration::from_millis(999));
        game.poll();
        assert!(game.card(apple).is_some_and(|c| !c.is_matched));

        clock.advance(Duration::from_millis(1));
        game.poll();
        for id in [apple, word] {
            let card = game.card(id).unwrap();
            assert!(card.is_matched);
            assert!(card.is_face_up);
        }
        assert!(game.pending().is_empty());
    }

    #[test]
    fn test_mismatch_flips_back() {
        let (mut game, clock) = game();
        game.start_round(Category::Fruits);

        let apple = find(&game, "🍎");
        let banana = find(&game, "banana");
        game.select_card(apple);
        assert_eq!(
            game.select_card(banana),
            Selection::Attempt { is_match: false }
        );

        clock.advance(Duration::from_secs(1));
        game.poll();

        for id in [apple, banana] {
            let card = game.card(id).unwrap();
            assert!(!card.is_face_up);
            assert!(!card.is_matched);
        }
        assert_eq!(game.move_count(), 1);
        assert_eq!(game.phase(), Phase::Playing);
    }

    #[test]
    fn test_third_card_ignored_while_resolving() {
        let (mut game, _) = game();
        game.start_round(Category::Fruits);

        game.select_card(find(&game, "🍎"));
        game.select_card(find(&game, "banana"));
        let kiwi = find(&game, "🥝");

        assert_eq!(
            game.select_card(kiwi),
            Selection::Ignored(IgnoreReason::ResolutionPending)
        );
        assert!(game.card(kiwi).is_some_and(|c| !c.is_face_up));
        assert_eq!(game.move_count(), 1);
    }

    #[test]
    fn test_face_up_card_ignored() {
        let (mut game, _) = game();
        game.start_round(Category::Fruits);

        let apple = find(&game, "🍎");
        game.select_card(apple);
        assert_eq!(
            game.select_card(apple),
            Selection::Ignored(IgnoreReason::AlreadyFaceUp)
        );
        assert_eq!(game.pending().len(), 1);
    }

    #[test]
    fn test_unknown_card_ignored() {
        let (mut game, _) = game();
        game.start_round(Category::Fruits);

        assert_eq!(
            game.select_card(CardId::new(9_999)),
            Selection::Ignored(IgnoreReason::UnknownCard)
        );
    }

    #[test]
    fn test_ids_from_previous_round_are_unknown() {
        let (mut game, _) = game();
        game.start_round(Category::Fruits);
        let old = game.cards()[0].id;

        game.start_round(Category::Fruits);
        assert!(game.card(old).is_none());
        assert_eq!(
            game.select_card(old),
            Selection::Ignored(IgnoreReason::UnknownCard)
        );
    }

    #[test]
    fn test_ticks_update_elapsed() {
        let (mut game, clock) = game();
        game.start_round(Category::Vehicles);

        clock.advance(Duration::from_millis(3_500));
        assert_eq!(game.poll(), 3);
        assert_eq!(game.elapsed_time(), Duration::from_secs(3));
        assert_eq!(game.elapsed_display(), "00:03");
        assert_eq!(game.next_deadline(), Some(Duration::from_secs(4)));
    }

    #[test]
    fn test_restart_drops_pending_resolution() {
        let (mut game, clock) = game();
        game.start_round(Category::Fruits);

        game.select_card(find(&game, "🍎"));
        game.select_card(find(&game, "apple"));

        game.start_round(Category::Fruits);
        clock.advance(Duration::from_secs(1));
        game.poll();

        assert!(game.cards().iter().all(|c| !c.is_matched && !c.is_face_up));
        assert_eq!(game.move_count(), 0);
    }

    #[test]
    fn test_end_round_stops_everything() {
        let (mut game, clock) = game();
        game.start_round(Category::Fruits);
        game.select_card(find(&game, "🍎"));
        game.select_card(find(&game, "pear"));

        let last = game.end_round().expect("round was active");
        assert_eq!(last.move_count, 1);
        assert!(game.scheduler().is_empty());
        assert_eq!(game.phase(), Phase::Idle);

        clock.advance(Duration::from_secs(10));
        assert_eq!(game.poll(), 0);
        assert_eq!(
            game.select_card(last.cards()[0].id),
            Selection::Ignored(IgnoreReason::NoRound)
        );
        assert!(game.end_round().is_none());
    }

    #[test]
    fn test_seeded_games_deal_identically() {
        let (mut a, _) = game();
        let (mut b, _) = game();
        a.start_round(Category::Animals);
        b.start_round(Category::Animals);

        let contents = |g: &MatchGame<ManualClock>| {
            g.cards().iter().map(|c| c.content.clone()).collect::<Vec<_>>()
        };
        assert_eq!(contents(&a), contents(&b));
    }

    #[test]
    fn test_zero_tick_interval_falls_back() {
        let clock = ManualClock::new();
        let config = GameConfig {
            tick_interval: Duration::ZERO,
            ..GameConfig::default().with_seed(42)
        };
        let mut game = MatchGame::with_clock(config, clock.clone());
        assert_eq!(game.config().tick_interval, Duration::from_secs(1));

        game.start_round(Category::Fruits);
        clock.advance(Duration::from_secs(2));
        assert_eq!(game.poll(), 2);
        assert_eq!(game.elapsed_time(), Duration::from_secs(2));
    }

    #[test]
    fn test_debug_output() {
        let (game, _) = game();
        let debug = format!("{game:?}");
        assert!(debug.contains("MatchGame"));
        assert!(debug.contains("Idle"));
    }
}
