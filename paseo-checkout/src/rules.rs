use paseo_catalog::{CategoryMatcher, QualifyingCategory};
use serde::Deserialize;

use crate::schema::{PassengerManifestSchema, DEFAULT_MAX_PASSENGERS};

/// Business rules for the excursion checkout, loaded from the `checkout` config section
#[derive(Debug, Clone, Deserialize)]
pub struct CheckoutRules {
    #[serde(default)]
    pub category: QualifyingCategory,
    /// When set, passenger emails and dates are checked for format as well as presence.
    #[serde(default)]
    pub strict_formats: bool,
    /// Upper bound on the declared passenger count
    #[serde(default = "default_max_passengers")]
    pub max_passengers: u32,
}

fn default_max_passengers() -> u32 {
    DEFAULT_MAX_PASSENGERS
}

impl Default for CheckoutRules {
    fn default() -> Self {
        Self {
            category: QualifyingCategory::default(),
            strict_formats: false,
            max_passengers: DEFAULT_MAX_PASSENGERS,
        }
    }
}

impl CheckoutRules {
    pub fn matcher(&self) -> CategoryMatcher {
        CategoryMatcher::new(self.category.clone())
    }

    pub fn schema(&self) -> PassengerManifestSchema {
        PassengerManifestSchema::new(self.max_passengers)
    }
}
