// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::ops::{Deref, DerefMut};

use smallvec::SmallVec;

use super::{CharBufferPool, PooledChars};

/// Inline capacity of the stack tier: 256 chars, 1KB of stack.
pub const STACK_TIER_INLINE_CAPACITY: usize = 256;

/// Stack allocated scratch chars. When this gets larger than
/// [`STACK_TIER_INLINE_CAPACITY`], it will be [`smallvec::SmallVec::spilled`] on the heap.
pub type StackChars = SmallVec<[char; STACK_TIER_INLINE_CAPACITY]>;

/// Storage strategy for a scratch buffer, chosen by size via
/// [`crate::BufferSettings::select_tier`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BufferTier {
    /// Transient, lives in the current stack frame.
    Stack,
    /// Borrowed from a [`CharBufferPool`] and returned on drop.
    Pooled,
    /// One-off heap allocation, freed on drop.
    Heap,
}

/// A scratch buffer in one of the three [`BufferTier`]s. Derefs to `[char]` of exactly
/// the requested length, so the growth loop doesn't care which tier it got.
#[derive(Debug)]
pub enum ScratchChars<'p> {
    Stack(StackChars),
    Pooled(PooledChars<'p>),
    Heap(Vec<char>),
}

impl<'p> ScratchChars<'p> {
    #[must_use]
    pub fn acquire(tier: BufferTier, len: usize, pool: &'p CharBufferPool) -> Self {
        match tier {
            BufferTier::Stack => ScratchChars::Stack(SmallVec::from_elem('\0', len)),
            BufferTier::Pooled => ScratchChars::Pooled(pool.rent(len)),
            BufferTier::Heap => ScratchChars::Heap(vec!['\0'; len]),
        }
    }

    #[must_use]
    pub fn tier(&self) -> BufferTier {
        match self {
            ScratchChars::Stack(_) => BufferTier::Stack,
            ScratchChars::Pooled(_) => BufferTier::Pooled,
            ScratchChars::Heap(_) => BufferTier::Heap,
        }
    }
}

impl Deref for ScratchChars<'_> {
    type Target = [char];

    fn deref(&self) -> &Self::Target {
        match self {
            ScratchChars::Stack(it) => &it[..],
            ScratchChars::Pooled(it) => &it[..],
            ScratchChars::Heap(it) => &it[..],
        }
    }
}

impl DerefMut for ScratchChars<'_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        match self {
            ScratchChars::Stack(it) => &mut it[..],
            ScratchChars::Pooled(it) => &mut it[..],
            ScratchChars::Heap(it) => &mut it[..],
        }
    }
}
