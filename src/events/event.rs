//! Round event types.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::catalog::Category;
use crate::core::CardId;

/// Something that changed in the round.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundEvent {
    /// A new deck was dealt.
    RoundStarted { category: Category, generation: u64 },

    /// A card was turned face-up.
    CardFlipped { card: CardId },

    /// A two-card attempt resolved as a pair.
    PairMatched { first: CardId, second: CardId },

    /// A two-card attempt resolved as a miss; both cards are face-down again.
    PairMismatched { first: CardId, second: CardId },

    /// Elapsed time was refreshed.
    Tick { elapsed: Duration },

    /// The last pair was found.
    RoundCompleted { moves: u32, elapsed: Duration },

    /// The round was torn down; no further ticks or resolutions will fire.
    RoundEnded { generation: u64 },
}

impl RoundEvent {
    /// Short name for logging.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            RoundEvent::RoundStarted { .. } => "round_started",
            RoundEvent::CardFlipped { .. } => "card_flipped",
            RoundEvent::PairMatched { .. } => "pair_matched",
            RoundEvent::PairMismatched { .. } => "pair_mismatched",
            RoundEvent::Tick { .. } => "tick",
            RoundEvent::RoundCompleted { .. } => "round_completed",
            RoundEvent::RoundEnded { .. } => "round_ended",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind() {
        let event = RoundEvent::PairMatched {
            first: CardId::new(1),
            second: CardId::new(2),
        };
        assert_eq!(event.kind(), "pair_matched");
        assert_eq!(RoundEvent::Tick { elapsed: Duration::ZERO }.kind(), "tick");
    }

    #[test]
    fn test_serialization() {
        let event = RoundEvent::RoundCompleted {
            moves: 12,
            elapsed: Duration::from_secs(75),
        };
        let json = serde_json::to_string(&event).unwrap();
        let deserialized: RoundEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(event, deserialized);
    }
}
