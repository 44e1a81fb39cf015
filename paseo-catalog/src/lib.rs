pub mod product;
pub mod matcher;

pub use product::{CartLine, CartSnapshot, ProductCategory};
pub use matcher::{CategoryMatcher, QualifyingCategory};
