//! Category tags.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A theme for a round. Each category maps to a fixed list of pairs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Category {
    Animals,
    Fruits,
    Vehicles,
}

impl Category {
    /// Every category, in menu order.
    pub const ALL: [Category; 3] = [Category::Animals, Category::Fruits, Category::Vehicles];

    /// Display name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Category::Animals => "Animals",
            Category::Fruits => "Fruits",
            Category::Vehicles => "Vehicles",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Returned when a string names no known category.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown category: {0}")]
pub struct ParseCategoryError(pub String);

impl FromStr for Category {
    type Err = ParseCategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Category::ALL
            .into_iter()
            .find(|c| c.name().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| ParseCategoryError(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names() {
        assert_eq!(Category::Animals.name(), "Animals");
        assert_eq!(format!("{}", Category::Vehicles), "Vehicles");
    }

    #[test]
    fn test_parse_case_insensitive() {
        assert_eq!("fruits".parse::<Category>(), Ok(Category::Fruits));
        assert_eq!(" ANIMALS ".parse::<Category>(), Ok(Category::Animals));
        assert_eq!(
            "plants".parse::<Category>(),
            Err(ParseCategoryError("plants".to_string()))
        );
    }

    #[test]
    fn test_all_in_menu_order() {
        assert_eq!(
            Category::ALL,
            [Category::Animals, Category::Fruits, Category::Vehicles]
        );
    }

    #[test]
    fn test_serde_uses_variant_name() {
        let json = serde_json::to_string(&Category::Fruits).unwrap();
        assert_eq!(json, "\"Fruits\"");
        let back: Category = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Category::Fruits);
    }
}
