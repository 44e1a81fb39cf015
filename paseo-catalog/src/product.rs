use serde::{Deserialize, Serialize};

/// A product category term as the storefront reports it on a cart line
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProductCategory {
    pub id: u64,
    pub slug: String,
}

impl ProductCategory {
    pub fn new(id: u64, slug: impl Into<String>) -> Self {
        Self {
            id,
            slug: slug.into(),
        }
    }
}

/// One line of the cart.
///
/// `categories` is `None` when the referenced product could not be resolved (deleted or stale
/// product); such lines never qualify.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartLine {
    pub product_id: Option<u64>,
    #[serde(default)]
    pub categories: Option<Vec<ProductCategory>>,
}

impl CartLine {
    pub fn new(product_id: u64, categories: Vec<ProductCategory>) -> Self {
        Self {
            product_id: Some(product_id),
            categories: Some(categories),
        }
    }

    /// A line whose product reference no longer resolves
    pub fn stale(product_id: Option<u64>) -> Self {
        Self {
            product_id,
            categories: None,
        }
    }

    pub fn is_resolved(&self) -> bool {
        self.product_id.is_some() && self.categories.is_some()
    }

    pub fn categories(&self) -> &[ProductCategory] {
        self.categories.as_deref().unwrap_or(&[])
    }
}

/// Read-only view of the cart for a single request
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CartSnapshot {
    #[serde(default)]
    pub lines: Vec<CartLine>,
}

impl CartSnapshot {
    pub fn new(lines: Vec<CartLine>) -> Self {
        Self { lines }
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CartLine> {
        self.lines.iter()
    }
}
