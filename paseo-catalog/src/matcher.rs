use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::product::{CartLine, CartSnapshot, ProductCategory};

/// The category that switches on the excursion checkout fields.
///
/// The storefront does not keep the slug and the term id in sync, so a category matches when
/// either one matches.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct QualifyingCategory {
    #[serde(default = "default_slug")]
    pub slug: String,
    #[serde(default = "default_id")]
    pub id: u64,
}

fn default_slug() -> String {
    "excursiones".to_string()
}

fn default_id() -> u64 {
    44
}

impl Default for QualifyingCategory {
    fn default() -> Self {
        Self {
            slug: default_slug(),
            id: default_id(),
        }
    }
}

impl QualifyingCategory {
    fn matches_slug(&self, category: &ProductCategory) -> bool {
        category.slug == self.slug
    }

    fn matches_id(&self, category: &ProductCategory) -> bool {
        category.id == self.id
    }

    pub fn matches(&self, category: &ProductCategory) -> bool {
        self.matches_slug(category) || self.matches_id(category)
    }
}

/// Decides whether a cart qualifies for the excursion fields.
///
/// Stateless; every component re-derives the flag from the cart it is handed.
#[derive(Debug, Clone, Default)]
pub struct CategoryMatcher {
    category: QualifyingCategory,
}

impl CategoryMatcher {
    pub fn new(category: QualifyingCategory) -> Self {
        Self { category }
    }

    pub fn category(&self) -> &QualifyingCategory {
        &self.category
    }

    pub fn line_qualifies(&self, line: &CartLine) -> bool {
        if !line.is_resolved() {
            return false;
        }
        line.categories().iter().any(|c| self.category.matches(c))
    }

    pub fn qualifies(&self, cart: &CartSnapshot) -> bool {
        let hit = cart.iter().position(|line| self.line_qualifies(line));
        debug!(
            lines = cart.lines.len(),
            matched_line = ?hit,
            "excursion category check"
        );
        hit.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn excursion() -> ProductCategory {
        ProductCategory::new(44, "excursiones")
    }

    fn souvenirs() -> ProductCategory {
        ProductCategory::new(12, "recuerdos")
    }

    #[test]
    fn test_empty_cart_does_not_qualify() {
        let matcher = CategoryMatcher::default();
        assert!(!matcher.qualifies(&CartSnapshot::default()));
    }

    #[test]
    fn test_no_matching_items() {
        let matcher = CategoryMatcher::default();
        let cart = CartSnapshot::new(vec![
            CartLine::new(1, vec![souvenirs()]),
            CartLine::new(2, vec![]),
        ]);
        assert!(!matcher.qualifies(&cart));
    }

    #[test]
    fn test_matching_item_in_any_position() {
        let matcher = CategoryMatcher::default();
        for position in 0..3 {
            let mut lines: Vec<CartLine> = (0..3).map(|i| CartLine::new(i, vec![souvenirs()])).collect();
            lines[position] = CartLine::new(99, vec![souvenirs(), excursion()]);
            assert!(matcher.qualifies(&CartSnapshot::new(lines)), "position {}", position);
        }
    }

    #[test]
    fn test_several_matching_items() {
        let matcher = CategoryMatcher::default();
        let cart = CartSnapshot::new(vec![
            CartLine::new(1, vec![excursion()]),
            CartLine::new(2, vec![excursion()]),
        ]);
        assert!(matcher.qualifies(&cart));
    }

    #[test]
    fn test_slug_or_id_match_independently() {
        let matcher = CategoryMatcher::default();

        let by_slug = CartSnapshot::new(vec![CartLine::new(1, vec![ProductCategory::new(7, "excursiones")])]);
        assert!(matcher.qualifies(&by_slug));

        let by_id = CartSnapshot::new(vec![CartLine::new(1, vec![ProductCategory::new(44, "tours-renombrado")])]);
        assert!(matcher.qualifies(&by_id));
    }

    #[test]
    fn test_stale_product_is_ignored() {
        let matcher = CategoryMatcher::default();
        let cart = CartSnapshot::new(vec![CartLine::stale(Some(5)), CartLine::stale(None)]);
        assert!(!matcher.qualifies(&cart));

        let mixed = CartSnapshot::new(vec![CartLine::stale(Some(5)), CartLine::new(6, vec![excursion()])]);
        assert!(matcher.qualifies(&mixed));
    }

    #[test]
    fn test_custom_category() {
        let matcher = CategoryMatcher::new(QualifyingCategory {
            slug: "tours".to_string(),
            id: 3,
        });
        let cart = CartSnapshot::new(vec![CartLine::new(1, vec![excursion()])]);
        assert!(!matcher.qualifies(&cart));
    }
}
