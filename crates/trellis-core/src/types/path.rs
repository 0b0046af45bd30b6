//! Opaque path values.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A filesystem path as written in a project description.
///
/// No normalization is applied: two values are equal only when their text
/// is identical.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PathValue(String);

impl PathValue {
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl From<&str> for PathValue {
    fn from(path: &str) -> Self {
        Self::new(path)
    }
}

impl From<String> for PathValue {
    fn from(path: String) -> Self {
        Self(path)
    }
}

impl AsRef<str> for PathValue {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PathValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equality_is_textual() {
        assert_eq!(PathValue::new("Sources/App"), PathValue::from("Sources/App"));
        assert_ne!(PathValue::new("Sources/App"), PathValue::new("Sources//App"));
        assert_ne!(PathValue::new("Sources/App"), PathValue::new("./Sources/App"));
    }

    #[test]
    fn test_serializes_as_plain_string() {
        let path = PathValue::new("Resources/**");
        assert_eq!(serde_json::to_string(&path).unwrap(), "\"Resources/**\"");
        let back: PathValue = serde_json::from_str("\"Resources/**\"").unwrap();
        assert_eq!(back, path);
    }
}
