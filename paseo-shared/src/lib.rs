pub mod pii;
pub mod sanitize;

pub use pii::Masked;
pub use sanitize::{escape_html, is_empty_value, sanitize_email, sanitize_text_field};
