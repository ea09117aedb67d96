// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Thread safe pool of `Vec<char>` scratch buffers, see [`CharBufferPool`].

use std::{ops::{Deref, DerefMut},
          sync::{LazyLock, Mutex, PoisonError,
                 atomic::{AtomicUsize, Ordering}}};

/// How many idle buffers a pool keeps around. Anything returned beyond this is dropped.
pub const DEFAULT_MAX_RETAINED_BUFFERS: usize = 16;

static SHARED_POOL: LazyLock<CharBufferPool> = LazyLock::new(CharBufferPool::default);

/// Borrow-and-return pool for mid-sized scratch buffers (the
/// [`crate::BufferTier::Pooled`] tier).
///
/// Buffers are only ever handed out inside a [`PooledChars`] guard, which gives the
/// buffer back in its [`Drop`] impl. So a buffer is returned on every exit path, including
/// `?` early returns and panics that unwind through the borrowing scope. No buffer is
/// retained past the call that rented it.
///
/// The idle list is behind a [`Mutex`], so one pool can be shared by every thread doing
/// renders. A poisoned lock is recovered from, since the idle list is always in a
/// consistent state (it's just a stack of spare `Vec`s).
#[derive(Debug)]
pub struct CharBufferPool {
    idle: Mutex<Vec<Vec<char>>>,
    max_retained: usize,
    rented: AtomicUsize,
    returned: AtomicUsize,
    reused: AtomicUsize,
    allocated: AtomicUsize,
}

/// Snapshot of a [`CharBufferPool`]'s counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PoolStats {
    pub rented: usize,
    pub returned: usize,
    /// Rentals served from an idle buffer.
    pub reused: usize,
    /// Rentals that had to allocate a fresh buffer.
    pub allocated: usize,
    pub idle: usize,
}

impl PoolStats {
    /// Buffers currently out on loan.
    #[must_use]
    pub fn outstanding(&self) -> usize { self.rented.saturating_sub(self.returned) }
}

impl Default for CharBufferPool {
    fn default() -> Self { Self::new(DEFAULT_MAX_RETAINED_BUFFERS) }
}

impl CharBufferPool {
    #[must_use]
    pub fn new(max_retained: usize) -> Self {
        Self {
            idle: Mutex::new(Vec::with_capacity(max_retained)),
            max_retained,
            rented: AtomicUsize::new(0),
            returned: AtomicUsize::new(0),
            reused: AtomicUsize::new(0),
            allocated: AtomicUsize::new(0),
        }
    }

    /// The process wide pool used by the node types in this crate.
    #[must_use]
    pub fn shared() -> &'static CharBufferPool { &SHARED_POOL }

    /// Rent a buffer of exactly `len` chars (all `'\0'`). The smallest idle buffer whose
    /// capacity fits is reused, otherwise a new one is allocated.
    #[must_use]
    pub fn rent(&self, len: usize) -> PooledChars<'_> {
        self.rented.fetch_add(1, Ordering::Release);

        let maybe_idle = {
            let mut idle = self.idle.lock().unwrap_or_else(PoisonError::into_inner);
            let best_fit = idle
                .iter()
                .enumerate()
                .filter(|(_, buffer)| buffer.capacity() >= len)
                .min_by_key(|(_, buffer)| buffer.capacity())
                .map(|(index, _)| index);
            best_fit.map(|index| idle.swap_remove(index))
        };

        let mut buffer = match maybe_idle {
            Some(buffer) => {
                self.reused.fetch_add(1, Ordering::Relaxed);
                tracing::debug!(len, capacity = buffer.capacity(), "reusing pooled buffer");
                buffer
            }
            None => {
                self.allocated.fetch_add(1, Ordering::Relaxed);
                tracing::debug!(len, "allocating pooled buffer");
                Vec::with_capacity(len)
            }
        };
        buffer.clear();
        buffer.resize(len, '\0');

        PooledChars { pool: self, buffer }
    }

    fn give_back(&self, buffer: Vec<char>) {
        self.returned.fetch_add(1, Ordering::Release);
        let mut idle = self.idle.lock().unwrap_or_else(PoisonError::into_inner);
        if idle.len() < self.max_retained {
            idle.push(buffer);
        }
    }

    #[must_use]
    pub fn stats(&self) -> PoolStats {
        // Every return is preceded by its rent, so reading `returned` first keeps
        // `returned <= rented` in the snapshot even while other threads are renting.
        let returned = self.returned.load(Ordering::Acquire);
        let rented = self.rented.load(Ordering::Acquire);
        PoolStats {
            rented,
            returned,
            reused: self.reused.load(Ordering::Relaxed),
            allocated: self.allocated.load(Ordering::Relaxed),
            idle: self.idle.lock().unwrap_or_else(PoisonError::into_inner).len(),
        }
    }
}

/// Scoped loan of a buffer from a [`CharBufferPool`]. Derefs to `[char]`.
#[derive(Debug)]
pub struct PooledChars<'p> {
    pool: &'p CharBufferPool,
    buffer: Vec<char>,
}

impl Deref for PooledChars<'_> {
    type Target = [char];

    fn deref(&self) -> &Self::Target { &self.buffer }
}

impl DerefMut for PooledChars<'_> {
    fn deref_mut(&mut self) -> &mut Self::Target { &mut self.buffer }
}

impl Drop for PooledChars<'_> {
    fn drop(&mut self) { self.pool.give_back(std::mem::take(&mut self.buffer)); }
}
