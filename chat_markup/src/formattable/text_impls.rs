// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! [`Formattable`] for textual primitives. Text is left-aligned to `spec.width` and
//! truncated to `spec.precision` chars, which is what [`std::fmt`] does for `{:<w.p}`.

use std::fmt::Write;

use super::{FormatSpec, Formattable, Locale, formattable_api::pad_after};
use crate::FixedCharWriter;

impl Formattable for str {
    fn try_format(
        &self,
        dst: &mut [char],
        spec: &FormatSpec<'_>,
        _locale: &Locale,
    ) -> Option<usize> {
        let mut writer = FixedCharWriter::new(dst);
        let max_chars = spec.precision.unwrap_or(usize::MAX);
        for ch in self.chars().take(max_chars) {
            writer.write_char(ch).ok()?;
        }
        pad_after(writer, spec)
    }
}

impl Formattable for String {
    fn try_format(
        &self,
        dst: &mut [char],
        spec: &FormatSpec<'_>,
        locale: &Locale,
    ) -> Option<usize> {
        self.as_str().try_format(dst, spec, locale)
    }
}

impl Formattable for char {
    fn try_format(
        &self,
        dst: &mut [char],
        spec: &FormatSpec<'_>,
        _locale: &Locale,
    ) -> Option<usize> {
        let mut writer = FixedCharWriter::new(dst);
        if spec.precision != Some(0) {
            writer.write_char(*self).ok()?;
        }
        pad_after(writer, spec)
    }
}

impl Formattable for bool {
    fn try_format(
        &self,
        dst: &mut [char],
        spec: &FormatSpec<'_>,
        locale: &Locale,
    ) -> Option<usize> {
        let text = if *self { "true" } else { "false" };
        text.try_format(dst, spec, locale)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn fmt(value: &impl Formattable, cap: usize, spec: &FormatSpec<'_>) -> Option<String> {
        let mut buf = vec!['\0'; cap];
        let n = value.try_format(&mut buf, spec, &Locale::INVARIANT)?;
        Some(buf[..n].iter().collect())
    }

    #[test]
    fn test_str_exact_fit() {
        assert_eq!(fmt(&"日本語", 3, &FormatSpec::NONE).unwrap(), "日本語");
        assert_eq!(fmt(&"日本語", 2, &FormatSpec::NONE), None);
    }

    #[test]
    fn test_str_precision_truncates_before_padding() {
        let spec = FormatSpec::NONE.with_precision(3).with_width(5);
        assert_eq!(fmt(&"abcdef", 5, &spec).unwrap(), "abc  ");
    }

    #[test]
    fn test_string_forwards_to_str() {
        assert_eq!(fmt(&String::from("hi"), 2, &FormatSpec::NONE).unwrap(), "hi");
    }

    #[test]
    fn test_char_and_bool() {
        assert_eq!(fmt(&'x', 1, &FormatSpec::NONE).unwrap(), "x");
        assert_eq!(fmt(&false, 5, &FormatSpec::NONE).unwrap(), "false");
        assert_eq!(fmt(&true, 3, &FormatSpec::NONE), None);
    }

    #[test]
    fn test_empty_str_in_empty_buffer() {
        assert_eq!(fmt(&"", 0, &FormatSpec::NONE).unwrap(), "");
    }
}
