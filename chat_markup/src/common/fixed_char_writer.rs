// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! A [`std::fmt::Write`] sink backed by a caller-owned `&mut [char]`. See
//! [`FixedCharWriter`].

use std::fmt::{Error, Result, Write};

/// Writes `char`s into a fixed-size, caller-owned slice. When the slice is full, the
/// write fails with [`std::fmt::Error`] and [`FixedCharWriter::overflowed`] becomes
/// `true`. Nothing is ever allocated.
///
/// This is what lets any [`std::fmt::Display`] type "format itself into a buffer" and
/// report a capacity failure, which the growth loop in [`crate::BufferAllocator`]
/// reacts to by trying a bigger buffer.
///
/// ```
/// use std::fmt::Write;
/// use r3bl_chat_markup::FixedCharWriter;
///
/// let mut buf = ['\0'; 4];
/// let mut writer = FixedCharWriter::new(&mut buf);
/// assert!(write!(writer, "{}", 42).is_ok());
/// assert_eq!(writer.written(), 2);
/// assert!(write!(writer, "{}", 123).is_err());
/// assert!(writer.overflowed());
/// ```
#[derive(Debug)]
pub struct FixedCharWriter<'a> {
    dst: &'a mut [char],
    written: usize,
    overflowed: bool,
}

impl<'a> FixedCharWriter<'a> {
    pub fn new(dst: &'a mut [char]) -> Self {
        Self {
            dst,
            written: 0,
            overflowed: false,
        }
    }

    #[must_use]
    pub fn written(&self) -> usize { self.written }

    #[must_use]
    pub fn overflowed(&self) -> bool { self.overflowed }

    #[must_use]
    pub fn remaining(&self) -> usize { self.dst.len() - self.written }

    /// Returns `Some(written)` if nothing overflowed, otherwise `None`. This is the
    /// shape [`crate::Formattable::try_format`] reports in.
    #[must_use]
    pub fn finish(self) -> Option<usize> {
        if self.overflowed {
            None
        } else {
            Some(self.written)
        }
    }

    /// Appends `count` copies of `ch`.
    ///
    /// # Errors
    ///
    /// Returns [`std::fmt::Error`] if there is not enough room left.
    pub fn push_repeated(&mut self, ch: char, count: usize) -> Result {
        if count > self.remaining() {
            self.overflowed = true;
            return Err(Error);
        }
        self.dst[self.written..self.written + count].fill(ch);
        self.written += count;
        Ok(())
    }
}

impl Write for FixedCharWriter<'_> {
    fn write_str(&mut self, s: &str) -> Result {
        for ch in s.chars() {
            self.write_char(ch)?;
        }
        Ok(())
    }

    fn write_char(&mut self, ch: char) -> Result {
        match self.dst.get_mut(self.written) {
            Some(slot) => {
                *slot = ch;
                self.written += 1;
                Ok(())
            }
            None => {
                self.overflowed = true;
                Err(Error)
            }
        }
    }
}
