// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use smallvec::SmallVec;

/// Per-char expansion applied by the streaming transform: each source char becomes
/// `expanded_len(ch)` output chars, where `expanded_len(ch) >= 1`.
///
/// Never expanding to zero chars is what lets
/// [`crate::transform_node_into`] expand in place, from the back of the destination,
/// without overwriting source chars it hasn't read yet.
pub trait ExpansionRule {
    fn expanded_len(&self, ch: char) -> usize;

    /// The `offset`th output char for `ch`, where `offset < expanded_len(ch)`.
    fn expanded_char_at(&self, ch: char, offset: usize) -> char;

    /// Writes the expansion of `ch` to the start of `dst` and returns its length.
    ///
    /// # Panics
    ///
    /// Panics if `dst` is shorter than `expanded_len(ch)`.
    fn write_expansion(&self, ch: char, dst: &mut [char]) -> usize {
        let len = self.expanded_len(ch);
        debug_assert!(len >= 1, "{ch:?} expands to nothing");
        for (offset, slot) in dst[..len].iter_mut().enumerate() {
            *slot = self.expanded_char_at(ch, offset);
        }
        len
    }
}

impl<R: ExpansionRule + ?Sized> ExpansionRule for &R {
    fn expanded_len(&self, ch: char) -> usize { (**self).expanded_len(ch) }

    fn expanded_char_at(&self, ch: char, offset: usize) -> char {
        (**self).expanded_char_at(ch, offset)
    }

    fn write_expansion(&self, ch: char, dst: &mut [char]) -> usize {
        (**self).write_expansion(ch, dst)
    }
}

pub const LINE_SEPARATOR: char = '\n';

/// Line markers are things like `> ` or `-# `, so they nearly always fit inline.
pub const MARKER_INLINE_SIZE: usize = 8;

/// Stack allocated marker chars. When this gets larger than [`MARKER_INLINE_SIZE`], it
/// will be [`smallvec::SmallVec::spilled`] on the heap.
pub type MarkerChars = SmallVec<[char; MARKER_INLINE_SIZE]>;

/// Every [`LINE_SEPARATOR`] is followed by the marker. Everything else maps to itself.
/// In `"a\r\nb"` the `'\r'` is an ordinary char.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineMarkerRule {
    marker: MarkerChars,
}

impl LineMarkerRule {
    #[must_use]
    pub fn new(marker: &str) -> Self {
        Self {
            marker: marker.chars().collect(),
        }
    }

    #[must_use]
    pub fn marker(&self) -> &[char] { &self.marker }
}

impl ExpansionRule for LineMarkerRule {
    fn expanded_len(&self, ch: char) -> usize {
        if ch == LINE_SEPARATOR {
            1 + self.marker.len()
        } else {
            1
        }
    }

    fn expanded_char_at(&self, ch: char, offset: usize) -> char {
        match offset {
            0 => ch,
            _ => self.marker[offset - 1],
        }
    }
}

/// Variable length escaping from a lookup table, eg: `<` → `&lt;`. Chars that aren't in
/// the table map to themselves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EscapeTable {
    replacements: &'static [(char, &'static str)],
}

impl EscapeTable {
    /// # Panics
    ///
    /// Panics (at compile time, when used in a `const`) if a replacement is empty.
    #[must_use]
    pub const fn new(replacements: &'static [(char, &'static str)]) -> Self {
        let mut index = 0;
        while index < replacements.len() {
            assert!(!replacements[index].1.is_empty(), "escape replacement is empty");
            index += 1;
        }
        Self { replacements }
    }

    #[must_use]
    pub fn replacement_for(&self, ch: char) -> Option<&'static str> {
        self.replacements
            .iter()
            .find(|(it, _)| *it == ch)
            .map(|(_, replacement)| *replacement)
    }
}

impl ExpansionRule for EscapeTable {
    fn expanded_len(&self, ch: char) -> usize {
        self.replacement_for(ch)
            .map_or(1, |replacement| replacement.chars().count())
    }

    fn expanded_char_at(&self, ch: char, offset: usize) -> char {
        match self.replacement_for(ch) {
            Some(replacement) => replacement.chars().nth(offset).unwrap_or(ch),
            None => ch,
        }
    }

    /// One table lookup per char, then a straight copy of the replacement.
    fn write_expansion(&self, ch: char, dst: &mut [char]) -> usize {
        match self.replacement_for(ch) {
            Some(replacement) => {
                let mut written = 0;
                for (slot, it) in dst.iter_mut().zip(replacement.chars()) {
                    *slot = it;
                    written += 1;
                }
                assert_eq!(
                    written,
                    replacement.chars().count(),
                    "destination too short for {replacement:?}"
                );
                written
            }
            None => {
                dst[0] = ch;
                1
            }
        }
    }
}

/// Boolean escaping: chars in the set get `escape_char` in front of them, eg: `*` →
/// `\*`. Each escaped char contributes exactly one extra char.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrefixEscape {
    escape_char: char,
    escaped: &'static [char],
}

impl PrefixEscape {
    #[must_use]
    pub const fn new(escape_char: char, escaped: &'static [char]) -> Self {
        Self {
            escape_char,
            escaped,
        }
    }

    #[must_use]
    pub const fn backslash(escaped: &'static [char]) -> Self { Self::new('\\', escaped) }

    #[must_use]
    pub fn is_escaped(&self, ch: char) -> bool { self.escaped.contains(&ch) }
}

impl ExpansionRule for PrefixEscape {
    fn expanded_len(&self, ch: char) -> usize {
        if self.is_escaped(ch) { 2 } else { 1 }
    }

    fn expanded_char_at(&self, ch: char, offset: usize) -> char {
        if offset == 0 && self.is_escaped(ch) {
            self.escape_char
        } else {
            ch
        }
    }
}
