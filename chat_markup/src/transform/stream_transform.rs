// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! # Transform pass
//!
//! The second half of count-then-transform. The destination has already been sized
//! exactly from a [`SizingReport`]. This pass fills it, and never grows it.
//!
//! There are two sources:
//!
//! 1. **A node** ([`transform_node_into`]). The node copies itself into the front of the
//!    destination, then the chars are expanded in place walking from the back. The
//!    write cursor starts at the end of the destination and the read cursor at the end
//!    of the copied source. Since no char expands to less than one char, the write
//!    cursor never passes the read cursor, so unread source chars are never
//!    overwritten. No scratch space is used at all.
//!
//! 2. **A formatted value** ([`transform_value_into`]). The value has no text until it
//!    is formatted, so it is formatted into a scratch buffer from the growth loop in
//!    [`BufferAllocator`] (stack, pooled, or heap tier), and expanded forward from
//!    there into the destination.

use super::{ExpansionRule, SizingReport};
use crate::{BufferAllocator, FormatSpec, Formattable, Locale, MarkupNode, RenderResult,
            assert_destination_fits};

/// Returns the number of chars written, which is `sizing.expanded_total()`.
///
/// # Errors
///
/// See [`MarkupNode::copy_to`].
///
/// # Panics
///
/// Panics if `dst` is shorter than `sizing.expanded_total()`, or if `sizing` was not
/// counted from `node` with `rule`.
pub fn transform_node_into<N, R>(
    node: &N,
    rule: &R,
    sizing: &SizingReport,
    dst: &mut [char],
) -> RenderResult<usize>
where
    N: MarkupNode + ?Sized,
    R: ExpansionRule + ?Sized,
{
    let expanded_total = sizing.expanded_total();
    assert_destination_fits(dst.len(), expanded_total, "transform_node_into");
    let dst = &mut dst[..expanded_total];

    let copied = node.copy_to(&mut dst[..sizing.source_chars])?;
    assert_eq!(copied, sizing.source_chars, "sizing was not counted from this node");

    let mut write_end = expanded_total;
    for read_index in (0..sizing.source_chars).rev() {
        let ch = dst[read_index];
        let write_start = write_end - rule.expanded_len(ch);
        debug_assert!(write_start >= read_index);
        rule.write_expansion(ch, &mut dst[write_start..write_end]);
        write_end = write_start;
    }
    debug_assert_eq!(write_end, 0, "sizing was not counted with this rule");

    Ok(expanded_total)
}

/// Returns the number of chars written. `source_len_hint` is the formatted length of
/// the value if it is already known (eg: `sizing.source_chars`), which lets the growth
/// loop succeed on its first attempt.
///
/// # Errors
///
/// See [`BufferAllocator::with_formatted`].
///
/// # Panics
///
/// Panics if the expanded value doesn't fit in `dst`. Size `dst` with
/// [`crate::count_value`] first.
pub fn transform_value_into<V, R>(
    allocator: &BufferAllocator<'_>,
    value: &V,
    spec: &FormatSpec<'_>,
    locale: &Locale,
    rule: &R,
    source_len_hint: Option<usize>,
    dst: &mut [char],
) -> RenderResult<usize>
where
    V: Formattable + ?Sized,
    R: ExpansionRule + ?Sized,
{
    allocator.with_formatted(value, spec, locale, source_len_hint, |written: &[char]| {
        let mut offset = 0;
        for &ch in written {
            let expanded_len = rule.expanded_len(ch);
            assert_destination_fits(dst.len() - offset, expanded_len, "transform_value_into");
            offset += rule.write_expansion(ch, &mut dst[offset..]);
        }
        offset
    })
}
