// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! # Virtual addressing
//!
//! Reading the expanded output of an [`ExpansionRule`] without ever writing it down.
//! The output is virtual: only the source chars exist, and a [`VirtualCursor`] keeps two
//! positions in step, one in the source and one in the (imaginary) expanded output.
//!
//! ```text
//! source:    l  i  n  e  1  ⏎     l  i  n  e  2
//! original:  0  1  2  3  4  5     6  7  8  9  10
//! virtual:   0  1  2  3  4  5  6  7  8  9  10 11
//! output:    l  i  n  e  1  ⏎  >  l  i  n  e  2
//!                              ╰─ injected, emitted_in_expansion = 1
//! ```
//!
//! 1. [`expanded_char_at`] answers a single lookup. It walks from the start of the
//!    source, skipping over whole expansions, until the virtual index passes the
//!    requested index. This is `O(source length)` per call.
//! 2. [`ExpandedChars`] is for full left-to-right traversal. It holds the cursor across
//!    calls to [`Iterator::next`], so walking the whole output is linear in its length
//!    instead of quadratic (which is what calling [`expanded_char_at`] for every index
//!    would cost).

use super::ExpansionRule;

/// Position in an expanded char stream. Created fresh for each traversal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct VirtualCursor {
    /// Index of the source char being expanded.
    pub original_index: usize,
    /// Index of the next output char.
    pub virtual_index: usize,
    /// How many chars of the current source char's expansion have been emitted.
    pub emitted_in_expansion: usize,
}

/// The char at `index` of the expansion of `source`, or [`None`] if the expanded output
/// is not that long.
pub fn expanded_char_at<R: ExpansionRule + ?Sized>(
    source: impl IntoIterator<Item = char>,
    rule: &R,
    index: usize,
) -> Option<char> {
    let mut cursor = VirtualCursor::default();
    for ch in source {
        let expanded_len = rule.expanded_len(ch);
        if index < cursor.virtual_index + expanded_len {
            return Some(rule.expanded_char_at(ch, index - cursor.virtual_index));
        }
        cursor.virtual_index += expanded_len;
        cursor.original_index += 1;
    }
    None
}

/// Sequential iterator over the expansion of a source char iterator.
#[derive(Debug, Clone)]
pub struct ExpandedChars<'r, I, R: ?Sized> {
    source: I,
    rule: &'r R,
    current: Option<char>,
    cursor: VirtualCursor,
}

impl<'r, I, R> ExpandedChars<'r, I, R>
where
    I: Iterator<Item = char>,
    R: ExpansionRule + ?Sized,
{
    pub fn new(source: I, rule: &'r R) -> Self {
        Self {
            source,
            rule,
            current: None,
            cursor: VirtualCursor::default(),
        }
    }

    pub fn cursor(&self) -> VirtualCursor { self.cursor }
}

impl<I, R> Iterator for ExpandedChars<'_, I, R>
where
    I: Iterator<Item = char>,
    R: ExpansionRule + ?Sized,
{
    type Item = char;

    fn next(&mut self) -> Option<char> {
        loop {
            if let Some(ch) = self.current {
                let offset = self.cursor.emitted_in_expansion;
                if offset < self.rule.expanded_len(ch) {
                    self.cursor.emitted_in_expansion += 1;
                    self.cursor.virtual_index += 1;
                    return Some(self.rule.expanded_char_at(ch, offset));
                }
                self.cursor.original_index += 1;
                self.cursor.emitted_in_expansion = 0;
            }
            self.current = Some(self.source.next()?);
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let pending = self.current.map_or(0, |ch| {
            self.rule.expanded_len(ch) - self.cursor.emitted_in_expansion
        });
        (pending + self.source.size_hint().0, None)
    }
}
