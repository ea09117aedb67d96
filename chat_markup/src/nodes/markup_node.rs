// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! # The node contract
//!
//! Every renderable unit of chat markup implements [`MarkupNode`]. A caller asks a
//! (possibly deeply nested) node for its [`MarkupNode::total_length`], allocates a buffer
//! of exactly that many chars, and calls [`MarkupNode::copy_to`]. Each node delegates to
//! its children, and leaves that wrap a [`crate::Formattable`] value go through the
//! growth loop in [`crate::BufferAllocator`]. Wrappers that inject chars mid-stream
//! delegate to the streaming transform in [`crate::transform`].
//!
//! Nodes are immutable values. Lengths are computed once, when the node is built, and
//! cached in the node, so asking for them is free and always returns the same answer.
//! Since there is no shared mutable state, one node tree can be rendered from many
//! threads at once.
//!
//! ## Invariants
//!
//! For every node `n`:
//! - `n.total_length() == n.syntax_length() + n.inner_length()`.
//! - `n.copy_to(dst)` writes and returns exactly `n.total_length()` chars.
//! - For every `i` in `0..n.total_length()`, `n.try_get_char(i)` is the char that
//!   `copy_to` wrote at `i`, and it is [`None`] for every other `i`.
//! - `n.chars()` yields the same sequence as `copy_to` writes.
//!
//! These are checked for every node kind in `tests/node_contract.rs`.

use crate::{Concat, Enclosed, Expanded, ExpansionRule, LinePrefixed, RenderResult,
            TextNode};

pub trait MarkupNode {
    /// Sequential, left-to-right iterator over the rendered chars.
    type Chars<'a>: Iterator<Item = char>
    where
        Self: 'a;

    /// Chars this node adds on its own: literal prefixes and suffixes, injected markers,
    /// escape chars.
    fn syntax_length(&self) -> usize;

    /// Chars of the wrapped content.
    fn inner_length(&self) -> usize;

    fn total_length(&self) -> usize { self.syntax_length() + self.inner_length() }

    /// Writes exactly [`MarkupNode::total_length`] chars to the start of `dst` and
    /// returns that count.
    ///
    /// # Errors
    ///
    /// Returns [`crate::RenderError::CapacityExceeded`] if a formatted value somewhere in
    /// the tree can't be materialized under its [`crate::BufferSettings`].
    ///
    /// # Panics
    ///
    /// Panics if `dst` is shorter than [`MarkupNode::total_length`]. That is the caller
    /// breaking the contract, not a recoverable condition.
    fn copy_to(&self, dst: &mut [char]) -> RenderResult<usize>;

    /// The char at `index` of the rendered output, or [`None`] if `index` is outside
    /// `0..total_length()`.
    fn try_get_char(&self, index: usize) -> Option<char>;

    fn chars(&self) -> Self::Chars<'_>;

    fn is_empty(&self) -> bool { self.total_length() == 0 }

    /// `self` followed by `next`.
    fn then<B: MarkupNode>(self, next: B) -> Concat<Self, B>
    where
        Self: Sized,
    {
        Concat::new(self, next)
    }

    /// `self` between two literals, eg: `**` and `**` for bold.
    fn enclosed<'t>(self, prefix: &'t str, suffix: &'t str) -> Enclosed<'t, Self>
    where
        Self: Sized,
    {
        Enclosed::new(TextNode::new(prefix), self, TextNode::new(suffix))
    }

    /// `marker` at the start of `self` and after every line separator.
    fn line_prefixed(self, marker: &str) -> LinePrefixed<Self>
    where
        Self: Sized,
    {
        LinePrefixed::new(self, marker)
    }

    /// `self` with every char expanded by `rule`, eg: escaping.
    fn expanded<R: ExpansionRule>(self, rule: R) -> Expanded<Self, R>
    where
        Self: Sized,
    {
        Expanded::new(self, rule)
    }
}

/// Borrowed nodes are nodes, so a composite can refer to operands it doesn't own.
impl<N: MarkupNode + ?Sized> MarkupNode for &N {
    type Chars<'a>
        = N::Chars<'a>
    where
        Self: 'a;

    fn syntax_length(&self) -> usize { (**self).syntax_length() }

    fn inner_length(&self) -> usize { (**self).inner_length() }

    fn total_length(&self) -> usize { (**self).total_length() }

    fn copy_to(&self, dst: &mut [char]) -> RenderResult<usize> { (**self).copy_to(dst) }

    fn try_get_char(&self, index: usize) -> Option<char> { (**self).try_get_char(index) }

    fn chars(&self) -> Self::Chars<'_> { (**self).chars() }
}

/// The explicit guard every [`MarkupNode::copy_to`] runs before writing.
///
/// # Panics
///
/// Panics if `available < required`.
#[track_caller]
pub fn assert_destination_fits(available: usize, required: usize, node_kind: &str) {
    assert!(
        available >= required,
        "{node_kind}: destination has room for {available} chars, but {required} are needed"
    );
}
