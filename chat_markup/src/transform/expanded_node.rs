// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use super::{ExpandedChars, ExpansionRule, SizingReport, count_node, count_value,
            expanded_char_at, transform_node_into, transform_value_into};
use crate::{Formattable, MarkupNode, RenderResult, VALUE_CHARS_INLINE_SIZE, ValueFormat,
            assert_destination_fits};

/// A node with every char expanded by `rule`, eg: markdown or HTML escaping applied on
/// the fly. The inner node is never mutated and the expanded text is never stored.
///
/// The count pass runs once, in [`Expanded::new`], so every length is known up front.
/// The source chars are the content, and the chars the expansions add are the syntax.
///
/// ```
/// use r3bl_chat_markup::{MarkupNode, PrefixEscape, TextNode, render_to_string};
///
/// let escaped = TextNode::new("2*3").expanded(PrefixEscape::backslash(&['*']));
/// assert_eq!(render_to_string(&escaped).unwrap(), "2\\*3");
/// assert_eq!(escaped.inner_length(), 3);
/// assert_eq!(escaped.syntax_length(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expanded<N, R> {
    inner: N,
    rule: R,
    sizing: SizingReport,
}

impl<N: MarkupNode, R: ExpansionRule> Expanded<N, R> {
    pub fn new(inner: N, rule: R) -> Self {
        let sizing = count_node(&inner, &rule);
        Self {
            inner,
            rule,
            sizing,
        }
    }

    pub fn inner(&self) -> &N { &self.inner }

    pub fn rule(&self) -> &R { &self.rule }

    pub fn sizing(&self) -> &SizingReport { &self.sizing }
}

impl<N: MarkupNode, R: ExpansionRule> MarkupNode for Expanded<N, R> {
    type Chars<'a>
        = ExpandedChars<'a, N::Chars<'a>, R>
    where
        Self: 'a;

    fn syntax_length(&self) -> usize { self.sizing.extra_chars }

    fn inner_length(&self) -> usize { self.sizing.source_chars }

    fn copy_to(&self, dst: &mut [char]) -> RenderResult<usize> {
        assert_destination_fits(dst.len(), self.total_length(), "Expanded");
        transform_node_into(&self.inner, &self.rule, &self.sizing, dst)
    }

    fn try_get_char(&self, index: usize) -> Option<char> {
        if index >= self.total_length() {
            return None;
        }
        expanded_char_at(self.inner.chars(), &self.rule, index)
    }

    fn chars(&self) -> Self::Chars<'_> { ExpandedChars::new(self.inner.chars(), &self.rule) }
}

/// A [`Formattable`] value with every char of its formatted text expanded by `rule`.
///
/// Unlike [`Expanded`], there is no inner node to copy from, so every operation formats
/// the value into a scratch buffer from the growth loop and reads it from there.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpandedValue<T, R> {
    value: T,
    format: ValueFormat,
    rule: R,
    sizing: SizingReport,
}

impl<T: Formattable, R: ExpansionRule> ExpandedValue<T, R> {
    /// # Errors
    ///
    /// Returns [`crate::RenderError::CapacityExceeded`] if the value doesn't fit in
    /// [`crate::BufferSettings::max_size`] chars.
    pub fn try_new(value: T, rule: R) -> RenderResult<Self> {
        Self::try_with_format(value, ValueFormat::default(), rule)
    }

    /// # Errors
    ///
    /// Returns [`crate::RenderError::CapacityExceeded`] if the value doesn't fit in
    /// `format.settings.max_size()` chars.
    pub fn try_with_format(value: T, format: ValueFormat, rule: R) -> RenderResult<Self> {
        let sizing = count_value(
            &format.allocator(),
            &value,
            &format.spec,
            &format.locale,
            &rule,
        )?;
        Ok(Self {
            value,
            format,
            rule,
            sizing,
        })
    }

    pub fn value(&self) -> &T { &self.value }

    pub fn sizing(&self) -> &SizingReport { &self.sizing }
}

impl<T: Formattable, R: ExpansionRule> MarkupNode for ExpandedValue<T, R> {
    type Chars<'a>
        = ExpandedChars<'a, smallvec::IntoIter<[char; VALUE_CHARS_INLINE_SIZE]>, R>
    where
        Self: 'a;

    fn syntax_length(&self) -> usize { self.sizing.extra_chars }

    fn inner_length(&self) -> usize { self.sizing.source_chars }

    fn copy_to(&self, dst: &mut [char]) -> RenderResult<usize> {
        let total_length = self.total_length();
        assert_destination_fits(dst.len(), total_length, "ExpandedValue");
        transform_value_into(
            &self.format.allocator(),
            &self.value,
            &self.format.spec,
            &self.format.locale,
            &self.rule,
            Some(self.sizing.source_chars),
            &mut dst[..total_length],
        )
    }

    fn try_get_char(&self, index: usize) -> Option<char> {
        if index >= self.total_length() {
            return None;
        }
        self.format
            .allocator()
            .with_formatted(
                &self.value,
                &self.format.spec,
                &self.format.locale,
                Some(self.sizing.source_chars),
                |written: &[char]| expanded_char_at(written.iter().copied(), &self.rule, index),
            )
            .unwrap_or_else(|error| {
                tracing::warn!(%error, index, "char lookup in expanded value failed");
                None
            })
    }

    fn chars(&self) -> Self::Chars<'_> {
        let source = self
            .format
            .collect_chars(&self.value, self.sizing.source_chars);
        ExpandedChars::new(source.into_iter(), &self.rule)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{BufferSettings, EscapeTable, FormatSpec, Locale, PrefixEscape, RenderError,
                TextNode, render_to_string};

    const HTML: EscapeTable = EscapeTable::new(&[('<', "&lt;"), ('>', "&gt;")]);
    const MD: PrefixEscape = PrefixEscape::backslash(&['*', '_', '~']);

    #[test]
    fn test_expanded_text() {
        let node = TextNode::new("<b>").expanded(HTML);
        assert_eq!(node.total_length(), 9);
        assert_eq!(node.inner_length(), 3);
        assert_eq!(node.syntax_length(), 6);
        assert_eq!(render_to_string(&node).unwrap(), "&lt;b&gt;");
        assert_eq!(node.try_get_char(4), Some('b'));
        assert_eq!(node.try_get_char(9), None);
        assert_eq!(node.chars().collect::<String>(), "&lt;b&gt;");
    }

    #[test]
    fn test_nothing_to_expand() {
        let node = TextNode::new("plain").expanded(MD);
        assert_eq!(node.syntax_length(), 0);
        assert_eq!(render_to_string(&node).unwrap(), "plain");
    }

    #[test]
    fn test_escaped_bold_around_escaped_text() {
        let node = TextNode::new("a*b").expanded(MD).enclosed("**", "**");
        assert_eq!(render_to_string(&node).unwrap(), "**a\\*b**");
        assert_eq!(node.total_length(), 8);
    }

    #[test]
    fn test_expanded_value() {
        let format = ValueFormat {
            spec: FormatSpec::NONE.with_width(6),
            ..Default::default()
        };
        let node = ExpandedValue::try_with_format("_x_", format, MD).unwrap();
        assert_eq!(node.inner_length(), 6);
        assert_eq!(node.syntax_length(), 2);
        assert_eq!(render_to_string(&node).unwrap(), "\\_x\\_   ");
        assert_eq!(node.try_get_char(0), Some('\\'));
        assert_eq!(node.try_get_char(3), Some('\\'));
        assert_eq!(node.try_get_char(8), None);
        assert_eq!(node.chars().collect::<String>(), "\\_x\\_   ");
    }

    #[test]
    fn test_expanded_number_with_grouping() {
        const GROUP_ESCAPE: PrefixEscape = PrefixEscape::backslash(&['.']);
        let format = ValueFormat {
            locale: Locale::new(',', Some('.')),
            ..Default::default()
        };
        let node = ExpandedValue::try_with_format(1_234_567_u32, format, GROUP_ESCAPE).unwrap();
        assert_eq!(render_to_string(&node).unwrap(), "1\\.234\\.567");
    }

    #[test]
    fn test_expanded_value_over_capacity() {
        let format = ValueFormat {
            settings: BufferSettings::try_new(2.0, 4, 8, 4, 8).unwrap(),
            ..Default::default()
        };
        let result = ExpandedValue::try_with_format("more than eight", format, MD);
        assert!(matches!(
            result,
            Err(RenderError::CapacityExceeded {
                attempted: 8,
                max_size: 8
            })
        ));
    }
}
