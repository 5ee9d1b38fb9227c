//! Ordered, duplicate-free list of CSS classes.

use std::fmt;

/// The `class` attribute of an element, kept as an ordered set of tokens.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassList {
    tokens: Vec<String>,
}

impl ClassList {
    /// Creates an empty class list.
    #[must_use]
    pub const fn new() -> Self {
        Self { tokens: Vec::new() }
    }

    /// Parses a whitespace-separated class attribute, dropping duplicates.
    #[must_use]
    pub fn parse(value: &str) -> Self {
        let mut list = Self::new();
        for token in value.split_whitespace() {
            list.add(token);
        }
        list
    }

    /// Returns whether the list holds `class`.
    #[must_use]
    pub fn contains(&self, class: &str) -> bool {
        self.tokens.iter().any(|t| t == class)
    }

    /// Adds a single class token. Returns `false` if it was already present.
    pub fn add(&mut self, class: &str) -> bool {
        if class.is_empty() || self.contains(class) {
            return false;
        }
        self.tokens.push(class.to_string());
        true
    }

    /// Removes a single class token. Returns `false` if it was absent.
    pub fn remove(&mut self, class: &str) -> bool {
        let before = self.tokens.len();
        self.tokens.retain(|t| t != class);
        self.tokens.len() != before
    }

    /// Iterates over the tokens in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.tokens.iter().map(String::as_str)
    }

    /// Returns the number of tokens.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Returns whether the list is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

impl From<&str> for ClassList {
    fn from(value: &str) -> Self {
        Self::parse(value)
    }
}

impl fmt::Display for ClassList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.tokens.join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_drops_duplicates_and_whitespace() {
        let list = ClassList::parse("  a b  a\tc ");
        assert_eq!(list.to_string(), "a b c");
        assert_eq!(list.len(), 3);
    }

    #[test]
    fn test_add_is_idempotent() {
        let mut list = ClassList::new();
        assert!(list.add("has-feedback"));
        assert!(!list.add("has-feedback"));
        assert!(!list.add(""));
        assert_eq!(list.to_string(), "has-feedback");
    }

    #[test]
    fn test_remove() {
        let mut list = ClassList::parse("success error");
        assert!(list.remove("success"));
        assert!(!list.remove("success"));
        assert!(list.contains("error"));
        assert!(!list.contains("success"));
    }
}
