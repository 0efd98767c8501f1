//! Card identity and per-card flip state.
//!
//! Every card dealt onto the board has a unique `CardId`. Identity is
//! distinct from content: the symbol card "🍎" and the word card "apple"
//! are two cards with two ids that happen to form a pair.
//!
//! ## ID Allocation
//!
//! Ids come from a counter owned by the game and are never reused, so a
//! card id captured during one round is never found on a later board.
//!
//! ```
//! use find_pairs::core::{Card, CardId};
//!
//! let card = Card::symbol(CardId::new(3), "🍎");
//! assert!(card.is_symbol);
//! assert!(!card.is_face_up);
//! assert!(!card.is_matched);
//! ```

use serde::{Deserialize, Serialize};

/// Opaque identifier for a card on the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CardId(pub u32);

impl CardId {
    /// Create a card ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl From<u32> for CardId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card({})", self.0)
    }
}

/// Allocates card ids for the lifetime of a game.
#[derive(Clone, Debug, Default)]
pub struct CardIdAllocator {
    next: u32,
}

impl CardIdAllocator {
    /// Create an allocator starting at id 0.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate the next id.
    pub fn alloc(&mut self) -> CardId {
        let id = CardId(self.next);
        self.next = self.next.wrapping_add(1);
        id
    }
}

/// A card on the board.
///
/// Created in bulk when a round starts and mutated in place while the
/// round is played. A matched card is always face-up.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    /// Unique id for this card.
    pub id: CardId,

    /// Text shown when face-up: an emoji or a word.
    pub content: String,

    /// Symbol side of a pair (`false` for the word side).
    pub is_symbol: bool,

    /// Currently showing its content.
    pub is_face_up: bool,

    /// Part of a found pair.
    pub is_matched: bool,
}

impl Card {
    /// Create a face-down, unmatched card.
    #[must_use]
    pub fn new(id: CardId, content: impl Into<String>, is_symbol: bool) -> Self {
        Self {
            id,
            content: content.into(),
            is_symbol,
            is_face_up: false,
            is_matched: false,
        }
    }

    /// Create the symbol card of a pair.
    #[must_use]
    pub fn symbol(id: CardId, content: impl Into<String>) -> Self {
        Self::new(id, content, true)
    }

    /// Create the word card of a pair.
    #[must_use]
    pub fn word(id: CardId, content: impl Into<String>) -> Self {
        Self::new(id, content, false)
    }
}
