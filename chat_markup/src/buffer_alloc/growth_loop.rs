// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! # Growth loop
//!
//! A [`crate::Formattable`] value doesn't know how long its text is until it has been
//! written somewhere. [`BufferAllocator::with_formatted`] finds the smallest adequate
//! scratch buffer for it:
//!
//! 1. Start from the caller's size hint, or [`BufferSettings::initial_size`].
//! 2. Pick a [`BufferTier`] for that size and acquire a [`ScratchChars`].
//! 3. Ask the value to format itself into it. On success, run the [`ScratchProcessor`]
//!    over the written chars and return its output.
//! 4. On a capacity failure, release the scratch buffer, grow the candidate size by
//!    [`BufferSettings::grow`] and go to 2.
//! 5. If the value still doesn't fit once the candidate has reached
//!    [`BufferSettings::max_size`], fail with [`RenderError::CapacityExceeded`].
//!
//! Since every candidate after the first is `min(ceil(size * growth_factor), max_size)`,
//! a value that needs `R <= max_size` chars is found in at most
//! `1 + ceil(log_growth_factor(R / start))` attempts, and a value that needs more than
//! `max_size` fails after the attempt at `max_size`. There is no unbounded loop.

use super::{BufferSettings, BufferTier, CharAt, CharBufferPool, CopyInto, MeasureLength,
            ScratchChars, ScratchProcessor};
use crate::{FormatSpec, Formattable, Locale, RenderError, RenderResult};

/// Runs the growth loop for one node kind's [`BufferSettings`] against a
/// [`CharBufferPool`]. Cheap to build, so nodes make one on the fly for each call.
#[derive(Debug, Clone, Copy)]
pub struct BufferAllocator<'p> {
    settings: BufferSettings,
    pool: &'p CharBufferPool,
}

impl BufferAllocator<'static> {
    /// Uses [`CharBufferPool::shared`].
    #[must_use]
    pub fn with_shared_pool(settings: BufferSettings) -> Self {
        Self::new(settings, CharBufferPool::shared())
    }
}

impl<'p> BufferAllocator<'p> {
    #[must_use]
    pub fn new(settings: BufferSettings, pool: &'p CharBufferPool) -> Self {
        Self { settings, pool }
    }

    #[must_use]
    pub fn settings(&self) -> &BufferSettings { &self.settings }

    /// See the [module docs](self) for the algorithm.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::CapacityExceeded`] if the value does not fit in
    /// [`BufferSettings::max_size`] chars.
    pub fn with_formatted<V, P>(
        &self,
        value: &V,
        spec: &FormatSpec<'_>,
        locale: &Locale,
        size_hint: Option<usize>,
        processor: P,
    ) -> RenderResult<P::Output>
    where
        V: Formattable + ?Sized,
        P: ScratchProcessor,
    {
        let max_size = self.settings.max_size();
        let mut candidate = size_hint
            .unwrap_or_else(|| self.settings.initial_size())
            .min(max_size);
        let mut attempt = 1_usize;

        loop {
            let tier: BufferTier = self.settings.select_tier(candidate);
            tracing::trace!(attempt, candidate, ?tier, "formatting into scratch buffer");

            let mut scratch = ScratchChars::acquire(tier, candidate, self.pool);
            if let Some(written) = value.try_format(&mut scratch, spec, locale) {
                return Ok(processor.process(&scratch[..written]));
            }
            drop(scratch);

            if candidate >= max_size {
                tracing::warn!(attempt, candidate, max_size, "growth loop gave up");
                return Err(RenderError::CapacityExceeded {
                    attempted: candidate,
                    max_size,
                });
            }
            candidate = self.settings.grow(candidate);
            attempt += 1;
        }
    }

    /// # Errors
    ///
    /// See [`BufferAllocator::with_formatted`].
    pub fn measure<V: Formattable + ?Sized>(
        &self,
        value: &V,
        spec: &FormatSpec<'_>,
        locale: &Locale,
    ) -> RenderResult<usize> {
        self.with_formatted(value, spec, locale, None, MeasureLength)
    }

    /// Uses `index + 1` as the size hint, since the value is at least that long if the
    /// char exists.
    ///
    /// # Errors
    ///
    /// See [`BufferAllocator::with_formatted`].
    pub fn char_at<V: Formattable + ?Sized>(
        &self,
        value: &V,
        spec: &FormatSpec<'_>,
        locale: &Locale,
        index: usize,
    ) -> RenderResult<Option<char>> {
        let size_hint = index.saturating_add(1);
        self.with_formatted(value, spec, locale, Some(size_hint), CharAt(index))
    }

    /// Uses `dst.len()` as the size hint, so a destination that was sized from a
    /// previous [`BufferAllocator::measure`] succeeds on the first attempt.
    ///
    /// # Errors
    ///
    /// See [`BufferAllocator::with_formatted`].
    pub fn copy_into<V: Formattable + ?Sized>(
        &self,
        value: &V,
        spec: &FormatSpec<'_>,
        locale: &Locale,
        dst: &mut [char],
    ) -> RenderResult<usize> {
        let size_hint = dst.len();
        self.with_formatted(value, spec, locale, Some(size_hint), CopyInto(dst))
    }
}
