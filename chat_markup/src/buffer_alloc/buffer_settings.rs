// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Be very careful when adjusting these tuning parameters. The rule of thumb is that
//! smaller static allocation sizes are better than larger. There is a tradeoff between
//! pre-allocating large amounts of memory and allocating small amounts (on the heap) as
//! you need it. Also huge stack allocations can cause stack overflow errors, which is
//! why the stack tier never holds more than [`crate::STACK_TIER_INLINE_CAPACITY`] chars
//! inline, no matter what `stack_threshold` says.

use serde::{Deserialize, Serialize};

use super::BufferTier;
use crate::{RenderError, RenderResult};

pub const DEFAULT_GROWTH_FACTOR: f64 = 2.0;
pub const DEFAULT_INITIAL_SIZE: usize = 64;
/// 1M chars (4MB of `char`s). Anything bigger than this is not chat markup.
pub const DEFAULT_MAX_SIZE: usize = 1_048_576;
pub const DEFAULT_STACK_THRESHOLD: usize = 256;
pub const DEFAULT_POOL_THRESHOLD: usize = 65_536;

/// Per-node-kind configuration for the growth loop in [`crate::BufferAllocator`]. All
/// sizes are in chars. This is an immutable value, build it once and copy it around.
///
/// Invariants (checked by [`BufferSettings::try_new`] and
/// [`BufferSettings::from_json_str`]):
/// - `growth_factor` is finite and `> 1.0`.
/// - `1 <= initial_size <= max_size`.
/// - `stack_threshold <= pool_threshold`.
///
/// Tier boundaries are inclusive, see [`BufferSettings::select_tier`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BufferSettings {
    growth_factor: f64,
    initial_size: usize,
    max_size: usize,
    stack_threshold: usize,
    pool_threshold: usize,
}

impl Default for BufferSettings {
    fn default() -> Self { Self::DEFAULT }
}

impl BufferSettings {
    pub const DEFAULT: BufferSettings = BufferSettings {
        growth_factor: DEFAULT_GROWTH_FACTOR,
        initial_size: DEFAULT_INITIAL_SIZE,
        max_size: DEFAULT_MAX_SIZE,
        stack_threshold: DEFAULT_STACK_THRESHOLD,
        pool_threshold: DEFAULT_POOL_THRESHOLD,
    };

    /// # Errors
    ///
    /// Returns [`RenderError::InvalidSettings`] if any invariant is violated.
    pub fn try_new(
        growth_factor: f64,
        initial_size: usize,
        max_size: usize,
        stack_threshold: usize,
        pool_threshold: usize,
    ) -> RenderResult<Self> {
        let it = Self {
            growth_factor,
            initial_size,
            max_size,
            stack_threshold,
            pool_threshold,
        };
        it.validate()?;
        Ok(it)
    }

    /// Missing fields fall back to [`BufferSettings::DEFAULT`].
    ///
    /// ```
    /// use r3bl_chat_markup::BufferSettings;
    ///
    /// let it = BufferSettings::from_json_str(r#"{ "max_size": 4096 }"#).unwrap();
    /// assert_eq!(it.max_size(), 4096);
    /// assert_eq!(it.initial_size(), 64);
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::SettingsParse`] for malformed JSON, and
    /// [`RenderError::InvalidSettings`] if the decoded value violates an invariant.
    pub fn from_json_str(json: &str) -> RenderResult<Self> {
        let it: Self = serde_json::from_str(json)?;
        it.validate()?;
        Ok(it)
    }

    /// # Errors
    ///
    /// Returns [`RenderError::InvalidSettings`] describing the first violated invariant.
    pub fn validate(&self) -> RenderResult<()> {
        if !self.growth_factor.is_finite() || self.growth_factor <= 1.0 {
            return Err(RenderError::invalid_settings(format!(
                "growth_factor must be finite and > 1.0, got {}",
                self.growth_factor
            )));
        }
        if self.initial_size == 0 {
            return Err(RenderError::invalid_settings("initial_size must be at least 1"));
        }
        if self.initial_size > self.max_size {
            return Err(RenderError::invalid_settings(format!(
                "initial_size ({}) must not exceed max_size ({})",
                self.initial_size, self.max_size
            )));
        }
        if self.stack_threshold > self.pool_threshold {
            return Err(RenderError::invalid_settings(format!(
                "stack_threshold ({}) must not exceed pool_threshold ({})",
                self.stack_threshold, self.pool_threshold
            )));
        }
        Ok(())
    }

    #[must_use]
    pub fn growth_factor(&self) -> f64 { self.growth_factor }

    #[must_use]
    pub fn initial_size(&self) -> usize { self.initial_size }

    #[must_use]
    pub fn max_size(&self) -> usize { self.max_size }

    #[must_use]
    pub fn stack_threshold(&self) -> usize { self.stack_threshold }

    #[must_use]
    pub fn pool_threshold(&self) -> usize { self.pool_threshold }

    /// Inclusive on both thresholds:
    /// - `size <= stack_threshold` → [`BufferTier::Stack`]
    /// - `size <= pool_threshold` → [`BufferTier::Pooled`]
    /// - otherwise → [`BufferTier::Heap`]
    #[must_use]
    pub fn select_tier(&self, size: usize) -> BufferTier {
        if size <= self.stack_threshold {
            BufferTier::Stack
        } else if size <= self.pool_threshold {
            BufferTier::Pooled
        } else {
            BufferTier::Heap
        }
    }

    /// Next candidate size: `ceil(size * growth_factor)`, at least `size + 1`, and never
    /// more than `max_size`.
    #[must_use]
    #[allow(
        clippy::cast_precision_loss,
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss
    )]
    pub fn grow(&self, size: usize) -> usize {
        // Float to int `as` casts saturate, so a huge product lands on usize::MAX.
        let scaled = (size as f64 * self.growth_factor).ceil() as usize;
        scaled.max(size.saturating_add(1)).min(self.max_size)
    }
}
