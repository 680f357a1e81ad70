//! Style value handling
//!
//! Provides type-safe CSS values for the per-button style rules
//! (`red`, `#5bfc37`, `#FF000080`, `rgb(0, 0, 0)`, `14px`).
//!
//! Values are injected verbatim into a `<style>` block, so anything able to
//! terminate the declaration or the block is rejected up front. Accepted
//! values are passed through unchanged.

use std::fmt;

/// Characters that could close a declaration, a rule or the style element
const FORBIDDEN: &[char] = &[';', '{', '}', '<', '>', '"', '\'', '\\'];

/// A single CSS property value safe to embed in a style rule
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CssValue(String);

impl CssValue {
    /// Parse a configured value:
    /// - Surrounding whitespace is trimmed
    /// - Empty values are rejected
    /// - Control characters and rule delimiters are rejected
    pub fn parse(raw: &str) -> Option<Self> {
        let value = raw.trim();
        if value.is_empty() || value.chars().any(|c| c.is_control() || FORBIDDEN.contains(&c)) {
            return None;
        }

        Some(Self(value.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CssValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
