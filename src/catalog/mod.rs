//! Content catalog: categories and their symbol/word pairs.
//!
//! ## Key Types
//!
//! - `Category`: Closed set of themes a round can be played in
//! - `Pair`: One symbol/word association
//!
//! The table is static. Adding a category means adding a variant and a
//! table entry; the reducer never changes.

mod category;
mod table;

pub use category::{Category, ParseCategoryError};
pub use table::{pairs_for, word_for_symbol, Pair};
