//! Match evaluation.

use crate::catalog::word_for_symbol;
use crate::core::Card;

/// Check whether two cards form a pair.
///
/// Exactly one card must be a symbol card, and the other card's word must
/// be the one the catalog pairs with that symbol. The lookup goes through
/// the whole catalog, not just the category being played.
#[must_use]
pub fn cards_match(a: &Card, b: &Card) -> bool {
    if a.is_symbol == b.is_symbol {
        return false;
    }

    let (symbol, word) = if a.is_symbol { (a, b) } else { (b, a) };
    word_for_symbol(&symbol.content).is_some_and(|w| w == word.content)
}
