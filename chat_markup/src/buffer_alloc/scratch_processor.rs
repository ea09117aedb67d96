// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! What to do with a formatted value once the growth loop has found a buffer big enough
//! to hold it. See [`ScratchProcessor`].

/// Strategy that the growth loop in [`crate::BufferAllocator::with_formatted`] runs over
/// the written region of its scratch buffer. The growth and tier logic is written once,
/// and every use case (measure, pick one char, copy out, count escapes, ...) is just a
/// different processor.
///
/// Any `FnOnce(&[char]) -> T` closure is a processor. The named processors below cover
/// the cases that the node types need.
pub trait ScratchProcessor {
    type Output;

    fn process(self, written: &[char]) -> Self::Output;
}

impl<F, T> ScratchProcessor for F
where
    F: FnOnce(&[char]) -> T,
{
    type Output = T;

    fn process(self, written: &[char]) -> T { self(written) }
}

/// Number of chars the value formats to.
#[derive(Debug, Clone, Copy, Default)]
pub struct MeasureLength;

impl ScratchProcessor for MeasureLength {
    type Output = usize;

    fn process(self, written: &[char]) -> usize { written.len() }
}

/// The char at the given index of the formatted value, if there is one.
#[derive(Debug, Clone, Copy)]
pub struct CharAt(pub usize);

impl ScratchProcessor for CharAt {
    type Output = Option<char>;

    fn process(self, written: &[char]) -> Option<char> { written.get(self.0).copied() }
}

/// Copies the formatted value to the start of the destination and returns the count.
///
/// # Panics
///
/// Panics if the destination is shorter than the formatted value.
#[derive(Debug)]
pub struct CopyInto<'d>(pub &'d mut [char]);

impl ScratchProcessor for CopyInto<'_> {
    type Output = usize;

    fn process(self, written: &[char]) -> usize {
        let count = written.len();
        assert!(
            self.0.len() >= count,
            "destination has room for {} chars, formatted value needs {count}",
            self.0.len()
        );
        self.0[..count].copy_from_slice(written);
        count
    }
}
