//! Game configuration.
//!
//! Board size is fixed at a 4×4 grid. What hosts can tune is timing
//! and the shuffle seed.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Pairs dealt per round (4×4 grid).
pub const PAIRS_PER_ROUND: usize = 8;

/// Cards dealt per round.
pub const CARDS_PER_ROUND: usize = PAIRS_PER_ROUND * 2;

/// Rejected configuration values.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("tick interval must be non-zero")]
    ZeroTickInterval,
}

/// Game configuration.
///
/// Deserializing goes through [`GameConfig::validate`], so a stored config
/// can never carry a zero tick interval.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawGameConfig")]
pub struct GameConfig {
    /// How long a two-card attempt stays revealed before it resolves.
    pub reveal_delay: Duration,

    /// Interval between elapsed-time updates.
    pub tick_interval: Duration,

    /// Shuffle seed. `None` picks a fresh seed from entropy.
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            reveal_delay: Duration::from_secs(1),
            tick_interval: Duration::from_secs(1),
            seed: None,
        }
    }
}

#[derive(Deserialize)]
struct RawGameConfig {
    reveal_delay: Duration,
    tick_interval: Duration,
    seed: Option<u64>,
}

impl TryFrom<RawGameConfig> for GameConfig {
    type Error = ConfigError;

    fn try_from(raw: RawGameConfig) -> Result<Self, Self::Error> {
        let config = Self {
            reveal_delay: raw.reveal_delay,
            tick_interval: raw.tick_interval,
            seed: raw.seed,
        };
        config.validate()?;
        Ok(config)
    }
}

impl GameConfig {
    /// Check values the builders would have rejected.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tick_interval.is_zero() {
            return Err(ConfigError::ZeroTickInterval);
        }
        Ok(())
    }

    /// Use a fixed seed so deals are reproducible.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the reveal delay.
    #[must_use]
    pub fn with_reveal_delay(mut self, delay: Duration) -> Self {
        self.reveal_delay = delay;
        self
    }

    /// Set the tick interval.
    ///
    /// Panics on a zero interval, which would never let time advance.
    #[must_use]
    pub fn with_tick_interval(mut self, interval: Duration) -> Self {
        assert!(!interval.is_zero(), "Tick interval must be non-zero");
        self.tick_interval = interval;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GameConfig::default();
        assert_eq!(config.reveal_delay, Duration::from_secs(1));
        assert_eq!(config.tick_interval, Duration::from_secs(1));
        assert_eq!(config.seed, None);
    }

    #[test]
    fn test_builder_pattern() {
        let config = GameConfig::default()
            .with_seed(123)
            .with_reveal_delay(Duration::from_millis(500))
            .with_tick_interval(Duration::from_millis(250));

        assert_eq!(config.seed, Some(123));
        assert_eq!(config.reveal_delay, Duration::from_millis(500));
        assert_eq!(config.tick_interval, Duration::from_millis(250));
    }

    #[test]
    #[should_panic(expected = "Tick interval must be non-zero")]
    fn test_zero_tick_interval() {
        let _ = GameConfig::default().with_tick_interval(Duration::ZERO);
    }

    #[test]
    fn test_grid_size() {
        assert_eq!(CARDS_PER_ROUND, 16);
    }

    #[test]
    fn test_validate() {
        assert_eq!(GameConfig::default().validate(), Ok(()));

        let zero = GameConfig {
            tick_interval: Duration::ZERO,
            ..GameConfig::default()
        };
        assert_eq!(zero.validate(), Err(ConfigError::ZeroTickInterval));
    }

    #[test]
    fn test_deserialize_rejects_zero_tick_interval() {
        let json = r#"{
            "reveal_delay": {"secs": 1, "nanos": 0},
            "tick_interval": {"secs": 0, "nanos": 0},
            "seed": 4
        }"#;
        let err = serde_json::from_str::<GameConfig>(json).unwrap_err();
        assert!(err.to_string().contains("tick interval must be non-zero"));
    }

    #[test]
    fn test_serialization() {
        let config = GameConfig::default().with_seed(9);
        let json = serde_json::to_string(&config).unwrap();
        let deserialized: GameConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, deserialized);
    }
}
