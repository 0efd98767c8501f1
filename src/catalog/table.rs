//! The pair table.

use super::category::Category;

/// One symbol/word association.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Pair {
    /// Emoji shown on the symbol card.
    pub symbol: &'static str,
    /// Word shown on the word card.
    pub word: &'static str,
}

const fn pair(symbol: &'static str, word: &'static str) -> Pair {
    Pair { symbol, word }
}

const ANIMALS: [Pair; 8] = [
    pair("🐶", "dog"),
    pair("🐱", "cat"),
    pair("🐼", "panda"),
    pair("🐨", "koala"),
    pair("🦁", "lion"),
    pair("🐯", "tiger"),
    pair("🐮", "cow"),
    pair("🐷", "pig"),
];

const FRUITS: [Pair; 8] = [
    pair("🍎", "apple"),
    pair("🍌", "banana"),
    pair("🍇", "grapes"),
    pair("🍊", "orange"),
    pair("🍓", "strawberry"),
    pair("🍐", "pear"),
    pair("🍍", "pineapple"),
    pair("🥝", "kiwi"),
];

const VEHICLES: [Pair; 8] = [
    pair("🚗", "car"),
    pair("🚌", "bus"),
    pair("✈️", "plane"),
    pair("🚲", "bicycle"),
    pair("🏍️", "motorcycle"),
    pair("🚂", "train"),
    pair("🚁", "helicopter"),
    pair("⛵️", "boat"),
];

/// The ordered pairs for a category.
#[must_use]
pub fn pairs_for(category: Category) -> &'static [Pair] {
    match category {
        Category::Animals => &ANIMALS,
        Category::Fruits => &FRUITS,
        Category::Vehicles => &VEHICLES,
    }
}

/// Look up the word paired with `symbol`.
///
/// Scans every category in menu order and answers from the first one that
/// contains the symbol, so the lookup stays correct even for symbols drawn
/// outside the current round.
#[must_use]
pub fn word_for_symbol(symbol: &str) -> Option<&'static str> {
    Category::ALL
        .into_iter()
        .find_map(|c| pairs_for(c).iter().find(|p| p.symbol == symbol))
        .map(|p| p.word)
}
