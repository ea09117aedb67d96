// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! The knobs a [`crate::Formattable`] value receives along with its destination buffer:
//! [`FormatSpec`] (what shape) and [`Locale`] (which separators).

use serde::{Deserialize, Serialize};

/// Format specifier handed to [`crate::Formattable::try_format`].
///
/// - `width`: minimum width in chars, padded with spaces. Numbers are right-aligned and
///   everything else is left-aligned, just like [`std::fmt`] does by default.
/// - `precision`: fraction digits for floats, max chars for text.
/// - `pattern`: [`chrono`] strftime pattern for temporal values. Ignored by the rest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FormatSpec<'a> {
    pub width: Option<usize>,
    pub precision: Option<usize>,
    pub pattern: Option<&'a str>,
}

impl<'a> FormatSpec<'a> {
    pub const NONE: FormatSpec<'static> = FormatSpec {
        width: None,
        precision: None,
        pattern: None,
    };

    #[must_use]
    pub fn with_width(self, width: usize) -> Self {
        Self {
            width: Some(width),
            ..self
        }
    }

    #[must_use]
    pub fn with_precision(self, precision: usize) -> Self {
        Self {
            precision: Some(precision),
            ..self
        }
    }

    #[must_use]
    pub fn with_pattern(self, pattern: &'a str) -> Self {
        Self {
            pattern: Some(pattern),
            ..self
        }
    }

    /// How many padding chars are needed to bring `content_len` up to `width`.
    #[must_use]
    pub fn padding_for(&self, content_len: usize) -> usize {
        self.width
            .map_or(0, |width| width.saturating_sub(content_len))
    }
}

/// Locale provider for numeric values. Only separators are modelled, since that is all
/// chat markup needs (no currency symbols or digit substitution).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Locale {
    pub decimal_separator: char,
    /// When set, the integer part of a number is grouped in threes.
    pub group_separator: Option<char>,
}

impl Default for Locale {
    fn default() -> Self { Self::INVARIANT }
}

impl Locale {
    pub const INVARIANT: Locale = Locale {
        decimal_separator: '.',
        group_separator: None,
    };

    #[must_use]
    pub const fn new(decimal_separator: char, group_separator: Option<char>) -> Self {
        Self {
            decimal_separator,
            group_separator,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_methods_compose() {
        let spec = FormatSpec::NONE.with_width(8).with_precision(2);
        assert_eq!(spec.width, Some(8));
        assert_eq!(spec.precision, Some(2));
        assert_eq!(spec.pattern, None);
    }

    #[test]
    fn test_padding_for() {
        assert_eq!(FormatSpec::NONE.padding_for(3), 0);
        assert_eq!(FormatSpec::NONE.with_width(5).padding_for(3), 2);
        assert_eq!(FormatSpec::NONE.with_width(2).padding_for(3), 0);
    }
}
