// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! [`Formattable`] for the primitive numeric types, with [`Locale`] separators.
//!
//! Digits are first staged on the stack in a [`NumberStaging`] string using the plain
//! [`std::fmt`] machinery, then copied into the destination while the decimal point is
//! swapped and the integer part is grouped. The staging string only spills to the heap
//! for huge floats (an `f64` can print ~300 digits).

use std::fmt::Write;

use smallstr::SmallString;

use super::{FormatSpec, Formattable, Locale};
use crate::FixedCharWriter;

/// Fits every integer type (`i128::MIN` is 40 chars) and most floats.
pub const NUMBER_STAGING_SIZE: usize = 40;

/// Stack allocated storage for number digits. When this gets larger than
/// [`NUMBER_STAGING_SIZE`], it will be [`smallvec::SmallVec::spilled`] on the heap.
pub type NumberStaging = SmallString<[u8; NUMBER_STAGING_SIZE]>;

/// Copies ASCII number text (`-1234.5`, `inf`, `NaN`) into `dst` right-aligned to
/// `spec.width`, applying the separators from `locale`.
fn write_localized(
    staged: &str,
    dst: &mut [char],
    spec: &FormatSpec<'_>,
    locale: &Locale,
) -> Option<usize> {
    let (sign, unsigned) = match staged.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", staged),
    };
    let (int_part, frac_part) = match unsigned.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (unsigned, None),
    };

    let int_len = int_part.len();
    let group_count = match locale.group_separator {
        Some(_) if int_len > 3 => (int_len - 1) / 3,
        _ => 0,
    };
    let content_len = sign.len()
        + int_len
        + group_count
        + frac_part.map_or(0, |frac| 1 + frac.len());

    let mut writer = FixedCharWriter::new(dst);
    writer.push_repeated(' ', spec.padding_for(content_len)).ok()?;
    writer.write_str(sign).ok()?;
    for (index, digit) in int_part.chars().enumerate() {
        if let Some(separator) = locale.group_separator
            && index > 0
            && (int_len - index).is_multiple_of(3)
        {
            writer.write_char(separator).ok()?;
        }
        writer.write_char(digit).ok()?;
    }
    if let Some(frac) = frac_part {
        writer.write_char(locale.decimal_separator).ok()?;
        writer.write_str(frac).ok()?;
    }
    writer.finish()
}

macro_rules! impl_formattable_for_integer {
    ($($int_type:ty),* $(,)?) => {
        $(
            impl Formattable for $int_type {
                fn try_format(
                    &self,
                    dst: &mut [char],
                    spec: &FormatSpec<'_>,
                    locale: &Locale,
                ) -> Option<usize> {
                    let mut staged = NumberStaging::new();
                    write!(staged, "{self}").ok()?;
                    write_localized(&staged, dst, spec, locale)
                }
            }
        )*
    };
}

impl_formattable_for_integer!(
    i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize
);

macro_rules! impl_formattable_for_float {
    ($($float_type:ty),* $(,)?) => {
        $(
            impl Formattable for $float_type {
                fn try_format(
                    &self,
                    dst: &mut [char],
                    spec: &FormatSpec<'_>,
                    locale: &Locale,
                ) -> Option<usize> {
                    let mut staged = NumberStaging::new();
                    match spec.precision {
                        Some(precision) => write!(staged, "{self:.precision$}").ok()?,
                        None => write!(staged, "{self}").ok()?,
                    }
                    write_localized(&staged, dst, spec, locale)
                }
            }
        )*
    };
}

impl_formattable_for_float!(f32, f64);
