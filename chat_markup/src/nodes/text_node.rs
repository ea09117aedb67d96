// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use super::{MarkupNode, assert_destination_fits};
use crate::RenderResult;

/// Leaf node over borrowed text. The char count is computed when the node is built.
///
/// Random access is O(1) for ASCII text (byte index == char index) and O(index)
/// otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextNode<'t> {
    text: &'t str,
    char_count: usize,
    is_ascii: bool,
}

impl<'t> TextNode<'t> {
    #[must_use]
    pub fn new(text: &'t str) -> Self {
        let is_ascii = text.is_ascii();
        let char_count = if is_ascii {
            text.len()
        } else {
            text.chars().count()
        };
        Self {
            text,
            char_count,
            is_ascii,
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &'t str { self.text }
}

impl<'t> From<&'t str> for TextNode<'t> {
    fn from(text: &'t str) -> Self { Self::new(text) }
}

impl MarkupNode for TextNode<'_> {
    type Chars<'a>
        = std::str::Chars<'a>
    where
        Self: 'a;

    fn syntax_length(&self) -> usize { 0 }

    fn inner_length(&self) -> usize { self.char_count }

    fn copy_to(&self, dst: &mut [char]) -> RenderResult<usize> {
        assert_destination_fits(dst.len(), self.char_count, "TextNode");
        for (slot, ch) in dst.iter_mut().zip(self.text.chars()) {
            *slot = ch;
        }
        Ok(self.char_count)
    }

    fn try_get_char(&self, index: usize) -> Option<char> {
        if self.is_ascii {
            self.text.as_bytes().get(index).map(|byte| char::from(*byte))
        } else {
            self.text.chars().nth(index)
        }
    }

    fn chars(&self) -> Self::Chars<'_> { self.text.chars() }
}
