//! Clocks and duration formatting.
//!
//! Time is measured as a `Duration` offset from an arbitrary origin chosen
//! by the clock. The game only ever subtracts two readings from the same
//! clock, so the origin never matters.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Source of the current time.
pub trait Clock {
    /// Monotonic time since the clock's origin.
    fn now(&self) -> Duration;
}

/// Wall-clock time backed by `Instant`.
#[derive(Clone, Debug)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    /// Create a clock whose origin is the moment of creation.
    #[must_use]
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}

/// Clock that only moves when told to.
///
/// Clones share the same reading, so a host can keep one handle and give
/// another to the game.
///
/// ```
/// use std::time::Duration;
/// use find_pairs::core::{Clock, ManualClock};
///
/// let clock = ManualClock::new();
/// let handle = clock.clone();
/// handle.advance(Duration::from_secs(3));
/// assert_eq!(clock.now(), Duration::from_secs(3));
/// ```
#[derive(Clone, Debug, Default)]
pub struct ManualClock {
    nanos: Arc<AtomicU64>,
}

impl ManualClock {
    /// Create a clock reading zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Move the clock forward.
    pub fn advance(&self, by: Duration) {
        self.nanos.fetch_add(duration_to_nanos(by), Ordering::SeqCst);
    }

    /// Set the clock to an absolute reading.
    pub fn set(&self, at: Duration) {
        self.nanos.store(duration_to_nanos(at), Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        Duration::from_nanos(self.nanos.load(Ordering::SeqCst))
    }
}

fn duration_to_nanos(d: Duration) -> u64 {
    u64::try_from(d.as_nanos()).unwrap_or(u64::MAX)
}

/// Format a duration as `MM:SS`.
///
/// Minutes are not capped at 59; fractional seconds are truncated.
///
/// ```
/// use std::time::Duration;
/// use find_pairs::core::format_duration;
///
/// assert_eq!(format_duration(Duration::from_secs(3661)), "61:01");
/// ```
#[must_use]
pub fn format_duration(d: Duration) -> String {
    let total = d.as_secs();
    format!("{:02}:{:02}", total / 60, total % 60)
}
