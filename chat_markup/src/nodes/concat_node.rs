// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::iter::Chain;

use super::{MarkupNode, assert_destination_fits};
use crate::RenderResult;

/// Composite of two nodes rendered back to back. No escaping, no syntax of its own: the
/// lengths are just sums. Build longer sequences by nesting, eg:
/// `a.then(b).then(c)`, which renders the same as `a.then(b.then(c))`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Concat<A, B> {
    left: A,
    right: B,
    left_length: usize,
    right_length: usize,
}

impl<A: MarkupNode, B: MarkupNode> Concat<A, B> {
    pub fn new(left: A, right: B) -> Self {
        let left_length = left.total_length();
        let right_length = right.total_length();
        Self {
            left,
            right,
            left_length,
            right_length,
        }
    }

    pub fn left(&self) -> &A { &self.left }

    pub fn right(&self) -> &B { &self.right }
}

/// Shorthand for [`Concat::new`].
pub fn concat_nodes<A: MarkupNode, B: MarkupNode>(left: A, right: B) -> Concat<A, B> {
    Concat::new(left, right)
}

impl<A: MarkupNode, B: MarkupNode> MarkupNode for Concat<A, B> {
    type Chars<'a>
        = Chain<A::Chars<'a>, B::Chars<'a>>
    where
        Self: 'a;

    fn syntax_length(&self) -> usize { 0 }

    fn inner_length(&self) -> usize { self.left_length + self.right_length }

    fn copy_to(&self, dst: &mut [char]) -> RenderResult<usize> {
        let total_length = self.inner_length();
        assert_destination_fits(dst.len(), total_length, "Concat");
        let (left_dst, right_dst) = dst.split_at_mut(self.left_length);
        let left_written = self.left.copy_to(left_dst)?;
        let right_written = self.right.copy_to(&mut right_dst[..self.right_length])?;
        Ok(left_written + right_written)
    }

    fn try_get_char(&self, index: usize) -> Option<char> {
        if index < self.left_length {
            self.left.try_get_char(index)
        } else {
            self.right.try_get_char(index - self.left_length)
        }
    }

    fn chars(&self) -> Self::Chars<'_> { self.left.chars().chain(self.right.chars()) }
}
