// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use smallvec::SmallVec;

use super::{MarkupNode, assert_destination_fits};
use crate::{BufferAllocator, BufferSettings, CharAt, FormatSpec, Formattable, Locale,
            RenderResult};

/// Inline capacity for [`ValueNode::chars`]. Formatted values in chat markup are short
/// (numbers, dates, names), so this almost never spills.
pub const VALUE_CHARS_INLINE_SIZE: usize = 32;

/// Chars of a formatted value, materialized for sequential iteration. When this gets
/// larger than [`VALUE_CHARS_INLINE_SIZE`], it will be [`smallvec::SmallVec::spilled`]
/// on the heap.
pub type ValueChars = SmallVec<[char; VALUE_CHARS_INLINE_SIZE]>;

/// Options that travel with a formatted value, used by [`ValueNode`] and
/// [`crate::ExpandedValue`].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ValueFormat {
    pub spec: FormatSpec<'static>,
    pub locale: Locale,
    pub settings: BufferSettings,
}

impl ValueFormat {
    #[must_use]
    pub fn allocator(&self) -> BufferAllocator<'static> {
        BufferAllocator::with_shared_pool(self.settings)
    }

    /// Format `value` and collect the chars. Returns an empty list (and logs) if the
    /// value can't be formatted, which can only happen if its
    /// [`Formattable::try_format`] is not deterministic.
    pub(crate) fn collect_chars<T: Formattable + ?Sized>(
        &self,
        value: &T,
        size_hint: usize,
    ) -> ValueChars {
        self.allocator()
            .with_formatted(
                value,
                &self.spec,
                &self.locale,
                Some(size_hint),
                |written: &[char]| ValueChars::from_slice(written),
            )
            .unwrap_or_else(|error| {
                tracing::warn!(%error, "formatted value could not be iterated");
                ValueChars::new()
            })
    }
}

/// Leaf node wrapping a single [`Formattable`] value, eg: a count, a price, a timestamp.
///
/// The value is never stored as text. Its length is measured once, in
/// [`ValueNode::try_new`], by running the growth loop with the
/// [`crate::MeasureLength`] processor. After that, [`MarkupNode::copy_to`] formats the
/// value straight into a scratch buffer sized from that length and copies it out, and
/// [`MarkupNode::try_get_char`] does the same with the [`crate::CharAt`] processor.
///
/// ```
/// use r3bl_chat_markup::{FormatSpec, Locale, MarkupNode, ValueFormat, ValueNode,
///                        render_to_string};
///
/// let format = ValueFormat {
///     spec: FormatSpec::NONE.with_precision(2),
///     locale: Locale::new(',', Some('.')),
///     ..Default::default()
/// };
/// let node = ValueNode::try_with_format(1234.5_f64, format).unwrap();
/// assert_eq!(node.total_length(), 8);
/// assert_eq!(render_to_string(&node).unwrap(), "1.234,50");
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValueNode<T> {
    value: T,
    format: ValueFormat,
    length: usize,
}

impl<T: Formattable> ValueNode<T> {
    /// Uses [`ValueFormat::default`]: no spec, invariant locale, default settings.
    ///
    /// # Errors
    ///
    /// Returns [`crate::RenderError::CapacityExceeded`] if the value doesn't fit in
    /// [`BufferSettings::max_size`] chars.
    pub fn try_new(value: T) -> RenderResult<Self> {
        Self::try_with_format(value, ValueFormat::default())
    }

    /// # Errors
    ///
    /// Returns [`crate::RenderError::CapacityExceeded`] if the value doesn't fit in
    /// `format.settings.max_size()` chars.
    pub fn try_with_format(value: T, format: ValueFormat) -> RenderResult<Self> {
        let length = format
            .allocator()
            .measure(&value, &format.spec, &format.locale)?;
        Ok(Self {
            value,
            format,
            length,
        })
    }

    pub fn value(&self) -> &T { &self.value }

    pub fn format(&self) -> &ValueFormat { &self.format }
}

impl<T: Formattable> MarkupNode for ValueNode<T> {
    type Chars<'a>
        = smallvec::IntoIter<[char; VALUE_CHARS_INLINE_SIZE]>
    where
        Self: 'a;

    fn syntax_length(&self) -> usize { 0 }

    fn inner_length(&self) -> usize { self.length }

    fn copy_to(&self, dst: &mut [char]) -> RenderResult<usize> {
        assert_destination_fits(dst.len(), self.length, "ValueNode");
        self.format.allocator().copy_into(
            &self.value,
            &self.format.spec,
            &self.format.locale,
            &mut dst[..self.length],
        )
    }

    fn try_get_char(&self, index: usize) -> Option<char> {
        if index >= self.length {
            return None;
        }
        self.format
            .allocator()
            .with_formatted(
                &self.value,
                &self.format.spec,
                &self.format.locale,
                Some(self.length),
                CharAt(index),
            )
            .unwrap_or_else(|error| {
                tracing::warn!(%error, index, "char lookup in formatted value failed");
                None
            })
    }

    fn chars(&self) -> Self::Chars<'_> {
        self.format.collect_chars(&self.value, self.length).into_iter()
    }
}
