// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::{iter::{Chain, Copied},
          slice};

use super::{Expanded, ExpandedChars, LINE_SEPARATOR, LineMarkerRule, transform_node_into};
use crate::{MarkupNode, RenderResult, assert_destination_fits};

/// A marker at the start of the inner node and after every [`LINE_SEPARATOR`] in
/// it, eg: `> ` for a block quote.
///
/// This is an [`Expanded`] node with a [`LineMarkerRule`], plus one more marker up
/// front. So for `n` separators there are `n + 1` markers, and they are all syntax:
///
/// ```text
/// total_length  = inner_length + marker_len * (separators + 1)
/// syntax_length =                marker_len * (separators + 1)
/// ```
///
/// An empty inner node is one (empty) line, so it renders as just the marker.
///
/// ```
/// use r3bl_chat_markup::{MarkupNode, TextNode, render_to_string};
///
/// let quote = TextNode::new("line1\nline2\nline3").line_prefixed(">");
/// assert_eq!(render_to_string(&quote).unwrap(), ">line1\n>line2\n>line3");
/// assert_eq!(quote.total_length(), 17 + 3);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinePrefixed<N> {
    expanded: Expanded<N, LineMarkerRule>,
    line_count: usize,
}

impl<N: MarkupNode> LinePrefixed<N> {
    pub fn new(inner: N, marker: &str) -> Self {
        // The sizing only sees separators when the marker is not empty.
        let separators = inner.chars().filter(|&ch| ch == LINE_SEPARATOR).count();
        Self {
            expanded: Expanded::new(inner, LineMarkerRule::new(marker)),
            line_count: separators + 1,
        }
    }

    pub fn inner(&self) -> &N { self.expanded.inner() }

    pub fn marker(&self) -> &[char] { self.expanded.rule().marker() }

    /// Lines in the inner node, which is also the number of markers.
    pub fn line_count(&self) -> usize { self.line_count }
}

impl<N: MarkupNode> MarkupNode for LinePrefixed<N> {
    type Chars<'a>
        = Chain<Copied<slice::Iter<'a, char>>, ExpandedChars<'a, N::Chars<'a>, LineMarkerRule>>
    where
        Self: 'a;

    fn syntax_length(&self) -> usize { self.marker().len() * self.line_count() }

    fn inner_length(&self) -> usize { self.expanded.inner_length() }

    fn copy_to(&self, dst: &mut [char]) -> RenderResult<usize> {
        let total_length = self.total_length();
        assert_destination_fits(dst.len(), total_length, "LinePrefixed");

        let marker = self.marker();
        dst[..marker.len()].copy_from_slice(marker);
        let written = transform_node_into(
            self.expanded.inner(),
            self.expanded.rule(),
            self.expanded.sizing(),
            &mut dst[marker.len()..total_length],
        )?;
        Ok(marker.len() + written)
    }

    fn try_get_char(&self, index: usize) -> Option<char> {
        let marker = self.marker();
        match marker.get(index) {
            Some(ch) => Some(*ch),
            None => self.expanded.try_get_char(index - marker.len()),
        }
    }

    fn chars(&self) -> Self::Chars<'_> {
        self.marker().iter().copied().chain(self.expanded.chars())
    }
}
