// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! [`Formattable`] for [`chrono`] temporal values. `spec.pattern` is a strftime pattern.
//! A pattern that [`chrono`] can't parse falls back to the type's default pattern, since
//! a bad pattern can't be told apart from a full buffer once it reaches the writer.

use std::fmt::{Display, Write};

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, TimeZone,
             format::{Item, StrftimeItems}};

use super::{FormatSpec, Formattable, Locale, formattable_api::pad_after};
use crate::FixedCharWriter;

pub const DEFAULT_DATE_PATTERN: &str = "%Y-%m-%d";
pub const DEFAULT_TIME_PATTERN: &str = "%H:%M:%S";
pub const DEFAULT_DATE_TIME_PATTERN: &str = "%Y-%m-%d %H:%M:%S";
/// Same output as [`DateTime::to_rfc3339`], without the intermediate `String`.
pub const DEFAULT_RFC3339_PATTERN: &str = "%+";

fn pick_pattern<'a>(spec: &FormatSpec<'a>, default_pattern: &'a str) -> &'a str {
    match spec.pattern {
        Some(pattern) if !StrftimeItems::new(pattern).any(|it| it == Item::Error) => {
            pattern
        }
        Some(pattern) => {
            tracing::warn!(
                pattern,
                default_pattern,
                "invalid strftime pattern, using the default"
            );
            default_pattern
        }
        None => default_pattern,
    }
}

fn write_temporal(
    formatted: impl Display,
    dst: &mut [char],
    spec: &FormatSpec<'_>,
) -> Option<usize> {
    let mut writer = FixedCharWriter::new(dst);
    write!(writer, "{formatted}").ok()?;
    pad_after(writer, spec)
}

impl Formattable for NaiveDate {
    fn try_format(
        &self,
        dst: &mut [char],
        spec: &FormatSpec<'_>,
        _locale: &Locale,
    ) -> Option<usize> {
        let pattern = pick_pattern(spec, DEFAULT_DATE_PATTERN);
        write_temporal(self.format(pattern), dst, spec)
    }
}

impl Formattable for NaiveTime {
    fn try_format(
        &self,
        dst: &mut [char],
        spec: &FormatSpec<'_>,
        _locale: &Locale,
    ) -> Option<usize> {
        let pattern = pick_pattern(spec, DEFAULT_TIME_PATTERN);
        write_temporal(self.format(pattern), dst, spec)
    }
}

impl Formattable for NaiveDateTime {
    fn try_format(
        &self,
        dst: &mut [char],
        spec: &FormatSpec<'_>,
        _locale: &Locale,
    ) -> Option<usize> {
        let pattern = pick_pattern(spec, DEFAULT_DATE_TIME_PATTERN);
        write_temporal(self.format(pattern), dst, spec)
    }
}

/// Without a pattern this is RFC 3339.
impl<Tz> Formattable for DateTime<Tz>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    fn try_format(
        &self,
        dst: &mut [char],
        spec: &FormatSpec<'_>,
        _locale: &Locale,
    ) -> Option<usize> {
        let pattern = pick_pattern(spec, DEFAULT_RFC3339_PATTERN);
        write_temporal(self.format(pattern), dst, spec)
    }
}

#[cfg(test)]
mod tests {
    use chrono::{FixedOffset, Timelike, Utc};
    use pretty_assertions::assert_eq;

    use super::*;

    fn fmt(value: &impl Formattable, spec: &FormatSpec<'_>) -> String {
        let mut buf = ['\0'; 64];
        let n = value.try_format(&mut buf, spec, &Locale::INVARIANT).unwrap();
        buf[..n].iter().collect()
    }

    fn date() -> NaiveDate { NaiveDate::from_ymd_opt(2025, 3, 7).unwrap() }

    #[test]
    fn test_default_patterns() {
        assert_eq!(fmt(&date(), &FormatSpec::NONE), "2025-03-07");
        let time = NaiveTime::from_hms_opt(9, 5, 0).unwrap();
        assert_eq!(fmt(&time, &FormatSpec::NONE), "09:05:00");
        assert_eq!(fmt(&date().and_time(time), &FormatSpec::NONE), "2025-03-07 09:05:00");
    }

    #[test]
    fn test_custom_pattern() {
        let spec = FormatSpec::NONE.with_pattern("%d/%m/%Y");
        assert_eq!(fmt(&date(), &spec), "07/03/2025");
    }

    #[test]
    fn test_invalid_pattern_falls_back() {
        let spec = FormatSpec::NONE.with_pattern("%Q");
        assert_eq!(fmt(&date(), &spec), "2025-03-07");
    }

    #[test]
    fn test_utc_rfc3339() {
        let it = Utc.with_ymd_and_hms(2025, 3, 7, 9, 5, 0).unwrap();
        assert_eq!(fmt(&it, &FormatSpec::NONE), "2025-03-07T09:05:00+00:00");
    }

    #[test]
    fn test_rfc3339_matches_chrono_with_offset_and_fraction() {
        let offset = FixedOffset::east_opt(5 * 3600 + 30 * 60).unwrap();
        let it = offset
            .with_ymd_and_hms(2025, 3, 7, 9, 5, 0)
            .unwrap()
            .with_nanosecond(250_000_000)
            .unwrap();
        assert_eq!(fmt(&it, &FormatSpec::NONE), it.to_rfc3339());
        assert_eq!(fmt(&it, &FormatSpec::NONE), "2025-03-07T09:05:00.250+05:30");
    }

    #[test]
    fn test_too_small() {
        let mut buf = ['\0'; 9];
        assert_eq!(date().try_format(&mut buf, &FormatSpec::NONE, &Locale::INVARIANT), None);
    }
}
