// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! # Count pass
//!
//! The first half of count-then-transform. Walk the whole source once, and for every
//! char ask the [`ExpansionRule`] how long its expansion is. The result is a
//! [`SizingReport`], and [`SizingReport::expanded_total`] is the exact size of the
//! destination that the transform pass in [`crate::transform::stream_transform`] will
//! fill. So the destination is allocated once and never resized mid-write.

use super::ExpansionRule;
use crate::{BufferAllocator, FormatSpec, Formattable, Locale, MarkupNode, RenderResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SizingReport {
    /// Chars in the source.
    pub source_chars: usize,
    /// Source chars whose expansion is longer than the char itself.
    pub escaped_chars: usize,
    /// Chars the expansions add, on top of `source_chars`.
    pub extra_chars: usize,
}

impl SizingReport {
    #[must_use]
    pub fn expanded_total(&self) -> usize { self.source_chars + self.extra_chars }
}

pub fn count_chars(
    source: impl IntoIterator<Item = char>,
    rule: &impl ExpansionRule,
) -> SizingReport {
    source
        .into_iter()
        .fold(SizingReport::default(), |mut acc, ch| {
            let expanded_len = rule.expanded_len(ch);
            acc.source_chars += 1;
            if expanded_len > 1 {
                acc.escaped_chars += 1;
                acc.extra_chars += expanded_len - 1;
            }
            acc
        })
}

/// Streams the node's chars, nothing is materialized.
pub fn count_node(node: &impl MarkupNode, rule: &impl ExpansionRule) -> SizingReport {
    count_chars(node.chars(), rule)
}

/// Formats the value into a tiered scratch buffer and counts over it.
///
/// # Errors
///
/// See [`BufferAllocator::with_formatted`].
pub fn count_value<V: Formattable + ?Sized>(
    allocator: &BufferAllocator<'_>,
    value: &V,
    spec: &FormatSpec<'_>,
    locale: &Locale,
    rule: &impl ExpansionRule,
) -> RenderResult<SizingReport> {
    allocator.with_formatted(value, spec, locale, None, |written: &[char]| {
        count_chars(written.iter().copied(), rule)
    })
}
