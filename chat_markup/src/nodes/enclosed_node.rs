// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::iter::Chain;

use super::{MarkupNode, TextNode, assert_destination_fits};
use crate::RenderResult;

/// Inner node between a literal prefix and suffix. This is plain arithmetic composition,
/// and it is all that concrete wrappers like bold (`**x**`), inline code (`` `x` ``) or
/// spoilers (`||x||`) need. The literals are the syntax, the inner node is the content.
///
/// ```
/// use r3bl_chat_markup::{MarkupNode, TextNode, render_to_string};
///
/// let bold_code = TextNode::new("cargo").enclosed("`", "`").enclosed("**", "**");
/// assert_eq!(render_to_string(&bold_code).unwrap(), "**`cargo`**");
/// assert_eq!(bold_code.syntax_length(), 4);
/// assert_eq!(bold_code.inner_length(), 7);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Enclosed<'t, N> {
    prefix: TextNode<'t>,
    inner: N,
    suffix: TextNode<'t>,
    inner_length: usize,
}

impl<'t, N: MarkupNode> Enclosed<'t, N> {
    pub fn new(prefix: TextNode<'t>, inner: N, suffix: TextNode<'t>) -> Self {
        let inner_length = inner.total_length();
        Self {
            prefix,
            inner,
            suffix,
            inner_length,
        }
    }

    pub fn inner(&self) -> &N { &self.inner }
}

impl<N: MarkupNode> MarkupNode for Enclosed<'_, N> {
    type Chars<'a>
        = Chain<Chain<std::str::Chars<'a>, N::Chars<'a>>, std::str::Chars<'a>>
    where
        Self: 'a;

    fn syntax_length(&self) -> usize {
        self.prefix.total_length() + self.suffix.total_length()
    }

    fn inner_length(&self) -> usize { self.inner_length }

    fn copy_to(&self, dst: &mut [char]) -> RenderResult<usize> {
        let total_length = self.total_length();
        assert_destination_fits(dst.len(), total_length, "Enclosed");

        let mut offset = self.prefix.copy_to(dst)?;
        offset += self
            .inner
            .copy_to(&mut dst[offset..offset + self.inner_length])?;
        offset += self.suffix.copy_to(&mut dst[offset..])?;
        Ok(offset)
    }

    fn try_get_char(&self, index: usize) -> Option<char> {
        let prefix_length = self.prefix.total_length();
        if index < prefix_length {
            return self.prefix.try_get_char(index);
        }
        let index = index - prefix_length;
        if index < self.inner_length {
            return self.inner.try_get_char(index);
        }
        self.suffix.try_get_char(index - self.inner_length)
    }

    fn chars(&self) -> Self::Chars<'_> {
        self.prefix
            .chars()
            .chain(self.inner.chars())
            .chain(self.suffix.chars())
    }
}
