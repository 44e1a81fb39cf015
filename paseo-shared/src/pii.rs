use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// Wraps passenger-identifying data (document numbers, emails, phone numbers) so it never
/// leaks through `Debug`/`Display` in log macros. Serialization still emits the real value.
#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct Masked<T>(pub T);

impl<T: AsRef<str>> Masked<T> {
    /// Number of trailing characters left visible when logging.
    const VISIBLE_TAIL: usize = 3;

    fn masked(&self) -> String {
        let value = self.0.as_ref();
        let len = value.chars().count();
        if len <= Self::VISIBLE_TAIL * 2 {
            return "****".to_string();
        }
        let tail: String = value.chars().skip(len - Self::VISIBLE_TAIL).collect();
        format!("****{}", tail)
    }
}

impl<T: AsRef<str>> fmt::Debug for Masked<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Masked({})", self.masked())
    }
}

impl<T: AsRef<str>> fmt::Display for Masked<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.masked())
    }
}

impl<T: Serialize> Serialize for Masked<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        // Admin views need the real value; masking only applies to formatting.
        self.0.serialize(serializer)
    }
}

impl<T> Masked<T> {
    pub fn into_inner(self) -> T {
        self.0
    }
}
