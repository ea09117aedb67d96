// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::fmt::{Display, Write};

use super::{FormatSpec, Locale};
use crate::FixedCharWriter;

/// A domain value (numeric, temporal, textual) that can write its own textual form into
/// a caller-supplied buffer.
///
/// The value owns no buffer. It writes into `dst[..n]` and returns `Some(n)`, or returns
/// [`None`] when `dst` is too small, in which case the contents of `dst` are
/// unspecified. The caller (usually [`crate::BufferAllocator`]) reacts to [`None`] by
/// retrying with a bigger buffer, so implementations must be deterministic: the same
/// value, spec, and locale always produce the same chars.
///
/// Most implementations just wrap `dst` in a [`FixedCharWriter`] and use [`write!`].
pub trait Formattable {
    fn try_format(
        &self,
        dst: &mut [char],
        spec: &FormatSpec<'_>,
        locale: &Locale,
    ) -> Option<usize>;
}

impl<T: Formattable + ?Sized> Formattable for &T {
    fn try_format(
        &self,
        dst: &mut [char],
        spec: &FormatSpec<'_>,
        locale: &Locale,
    ) -> Option<usize> {
        (**self).try_format(dst, spec, locale)
    }
}

/// Adapter that makes any [`Display`] type [`Formattable`]. The output is left-aligned
/// and padded to `spec.width`. `spec.precision` and `locale` are not applied, since
/// there is no way to pass them through [`Display`] generically.
///
/// A [`Display`] impl that fails for reasons other than running out of room is
/// indistinguishable from a capacity failure, and ends up as
/// [`crate::RenderError::CapacityExceeded`] once the growth loop hits its max.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Displayed<T>(pub T);

impl<T: Display> Formattable for Displayed<T> {
    fn try_format(
        &self,
        dst: &mut [char],
        spec: &FormatSpec<'_>,
        _locale: &Locale,
    ) -> Option<usize> {
        let mut writer = FixedCharWriter::new(dst);
        write!(writer, "{}", self.0).ok()?;
        pad_after(writer, spec)
    }
}

/// Left-align helper: everything has been written, top up with spaces to `spec.width`.
pub(crate) fn pad_after(mut writer: FixedCharWriter<'_>, spec: &FormatSpec<'_>) -> Option<usize> {
    let padding = spec.padding_for(writer.written());
    writer.push_repeated(' ', padding).ok()?;
    writer.finish()
}
