use alloc::borrow::Cow;
use alloc::boxed::Box;
use alloc::string::{String, ToString};
use core::any::type_name;
use core::fmt::{self, Write};
use core::marker::PhantomData;

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, ParseError, Utc};
use vc_plain::{Plain, PlainKind};

use crate::caster::{Caster, downcast};
use crate::error::CastError;
use crate::value::Value;

// -----------------------------------------------------------------------------
// Temporal

/// A temporal type that can be written and read with a `strftime` format.
pub trait Temporal: Value + Sized {
    /// Format used when a member does not bind its own.
    const DEFAULT_FORMAT: &'static str;

    /// Writes `self` with `format`, failing on an invalid format.
    fn format_into(&self, format: &str, out: &mut String) -> fmt::Result;

    fn parse(input: &str, format: &str) -> Result<Self, ParseError>;
}

/// Parses a value without offset, falling back to a date at midnight.
fn parse_naive(input: &str, format: &str) -> Result<NaiveDateTime, ParseError> {
    NaiveDateTime::parse_from_str(input, format).or_else(|err| {
        NaiveDate::parse_from_str(input, format)
            .map(|date| date.and_time(NaiveTime::MIN))
            .map_err(|_| err)
    })
}

impl Temporal for DateTime<Utc> {
    const DEFAULT_FORMAT: &'static str = "%Y-%m-%d %H:%M:%S%.6f%z";

    fn format_into(&self, format: &str, out: &mut String) -> fmt::Result {
        write!(out, "{}", self.format(format))
    }

    // Formats without an offset are read as UTC.
    fn parse(input: &str, format: &str) -> Result<Self, ParseError> {
        match DateTime::parse_from_str(input, format) {
            Ok(value) => Ok(value.with_timezone(&Utc)),
            Err(err) => parse_naive(input, format)
                .map(|naive| naive.and_utc())
                .map_err(|_| err),
        }
    }
}

impl Temporal for DateTime<FixedOffset> {
    const DEFAULT_FORMAT: &'static str = "%Y-%m-%d %H:%M:%S%.6f%z";

    fn format_into(&self, format: &str, out: &mut String) -> fmt::Result {
        write!(out, "{}", self.format(format))
    }

    fn parse(input: &str, format: &str) -> Result<Self, ParseError> {
        DateTime::parse_from_str(input, format).or_else(|err| {
            parse_naive(input, format)
                .map(|naive| naive.and_utc().fixed_offset())
                .map_err(|_| err)
        })
    }
}

impl Temporal for NaiveDateTime {
    const DEFAULT_FORMAT: &'static str = "%Y-%m-%d %H:%M:%S%.6f";

    fn format_into(&self, format: &str, out: &mut String) -> fmt::Result {
        write!(out, "{}", self.format(format))
    }

    fn parse(input: &str, format: &str) -> Result<Self, ParseError> {
        parse_naive(input, format)
    }
}

impl Temporal for NaiveDate {
    const DEFAULT_FORMAT: &'static str = "%Y-%m-%d";

    fn format_into(&self, format: &str, out: &mut String) -> fmt::Result {
        write!(out, "{}", self.format(format))
    }

    fn parse(input: &str, format: &str) -> Result<Self, ParseError> {
        NaiveDate::parse_from_str(input, format)
    }
}

// -----------------------------------------------------------------------------
// DateTimeCaster

/// Casts a [`Temporal`] value to and from a string with a fixed format.
///
/// The registry holds one per temporal type with its default format; a
/// member can bind its own instance to use another format.
///
/// Default formats for date-times write six fractional digits, so precision
/// below a microsecond is truncated on the way out. A member that needs
/// nanoseconds binds a format with `%.9f`.
///
/// # Examples
///
/// ```
/// use chrono::{DateTime, TimeZone, Utc};
/// use vc_mapper::caster::{Caster, DateTimeCaster};
/// use vc_plain::Plain;
///
/// let date = Utc.with_ymd_and_hms(1987, 11, 24, 0, 0, 0).unwrap();
///
/// let default = DateTimeCaster::<DateTime<Utc>>::new();
/// assert_eq!(
///     default.to_plain(&date).unwrap(),
///     Plain::from("1987-11-24 00:00:00.000000+0000"),
/// );
///
/// let short = DateTimeCaster::<DateTime<Utc>>::with_format("%d-%m-%Y");
/// let plain = short.to_plain(&date).unwrap();
/// assert_eq!(plain, Plain::from("24-11-1987"));
///
/// let back = short.to_value(&plain).unwrap();
/// assert_eq!(back.take::<DateTime<Utc>>().ok(), Some(date));
/// ```
pub struct DateTimeCaster<T> {
    format: Cow<'static, str>,
    _marker: PhantomData<fn() -> T>,
}

impl<T: Temporal> DateTimeCaster<T> {
    /// A caster using [`Temporal::DEFAULT_FORMAT`].
    #[inline]
    pub fn new() -> Self {
        Self::with_format(T::DEFAULT_FORMAT)
    }

    /// A caster bound to a `strftime` format.
    #[inline]
    pub fn with_format(format: impl Into<Cow<'static, str>>) -> Self {
        Self {
            format: format.into(),
            _marker: PhantomData,
        }
    }

    #[inline]
    pub fn format(&self) -> &str {
        &self.format
    }

    fn parse(&self, input: &str) -> Result<T, CastError> {
        T::parse(input, &self.format).map_err(|err| CastError::Format {
            input: String::from(input),
            format: self.format.to_string(),
            reason: err.to_string(),
        })
    }
}

impl<T: Temporal> Default for DateTimeCaster<T> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Temporal> Caster for DateTimeCaster<T> {
    #[inline]
    fn kind(&self) -> PlainKind {
        PlainKind::String
    }

    /// Only strings matching the bound format are accepted.
    fn accepts(&self, plain: &Plain) -> bool {
        plain
            .as_str()
            .is_some_and(|input| T::parse(input, &self.format).is_ok())
    }

    fn to_plain(&self, value: &dyn Value) -> Result<Plain, CastError> {
        let value = downcast::<T>(value)?;
        let mut out = String::new();
        value.format_into(&self.format, &mut out).map_err(|_| {
            CastError::custom(format_args!(
                "cannot write `{}` with the format `{}`",
                type_name::<T>(),
                self.format,
            ))
        })?;
        Ok(Plain::String(out))
    }

    fn to_value(&self, plain: &Plain) -> Result<Box<dyn Value>, CastError> {
        let input = plain.as_str().ok_or(CastError::UnexpectedPlain {
            expected: PlainKind::String,
            found: plain.kind(),
        })?;
        self.parse(input).map(|v| Box::new(v) as Box<dyn Value>)
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, TimeZone, Utc};
    use vc_plain::Plain;

    use super::DateTimeCaster;
    use crate::caster::Caster;
    use crate::error::CastError;

    #[test]
    fn default_format_keeps_microseconds_and_offset() {
        let caster = DateTimeCaster::<DateTime<Utc>>::new();
        let plain = Plain::from("2024-02-03 04:05:06.123456+0000");

        let value = caster.to_value(&plain).unwrap();
        let value = value.take::<DateTime<Utc>>().unwrap();
        assert_eq!(value.timestamp_subsec_micros(), 123_456);
        assert_eq!(caster.to_plain(&value).unwrap(), plain);
    }

    #[test]
    fn default_format_truncates_below_microseconds() {
        let caster = DateTimeCaster::<DateTime<Utc>>::new();
        let value = Utc.timestamp_opt(1_000_000_000, 123_456_789).unwrap();

        let plain = caster.to_plain(&value).unwrap();
        assert_eq!(plain, Plain::from("2001-09-09 01:46:40.123456+0000"));

        let back = caster.to_value(&plain).unwrap();
        let back = back.take::<DateTime<Utc>>().unwrap();
        assert_eq!(back.timestamp_subsec_nanos(), 123_456_000);

        let caster = DateTimeCaster::<DateTime<Utc>>::with_format("%Y-%m-%d %H:%M:%S%.9f%z");
        let back = caster.to_value(&caster.to_plain(&value).unwrap()).unwrap();
        assert_eq!(back.take::<DateTime<Utc>>().ok(), Some(value));
    }

    #[test]
    fn fixed_offsets_survive() {
        let caster = DateTimeCaster::<DateTime<FixedOffset>>::new();
        let offset = FixedOffset::east_opt(5 * 3600 + 1800).unwrap();
        let value = offset.with_ymd_and_hms(2001, 2, 3, 4, 5, 6).unwrap();

        let plain = caster.to_plain(&value).unwrap();
        assert_eq!(plain, Plain::from("2001-02-03 04:05:06.000000+0530"));

        let back = caster.to_value(&plain).unwrap();
        let back = back.take::<DateTime<FixedOffset>>().unwrap();
        assert_eq!(back.offset(), &offset);
    }

    #[test]
    fn naive_types_use_their_own_defaults() {
        let date = NaiveDate::from_ymd_opt(1987, 11, 26).unwrap();
        let caster = DateTimeCaster::<NaiveDate>::new();
        assert_eq!(caster.to_plain(&date).unwrap(), Plain::from("1987-11-26"));

        let caster = DateTimeCaster::<NaiveDateTime>::new();
        let value = caster.to_value(&Plain::from("1987-11-26 10:00:00.000001")).unwrap();
        let value = value.take::<NaiveDateTime>().unwrap();
        assert_eq!(value.date(), date);
    }

    #[test]
    fn accepts_only_matching_strings() {
        let caster = DateTimeCaster::<DateTime<Utc>>::with_format("%d-%m-%Y");
        assert!(caster.accepts(&Plain::from("24-11-1987")));
        assert!(!caster.accepts(&Plain::from("1987-11-24")));
        assert!(!caster.accepts(&Plain::Int(1)));

        let err = caster.to_value(&Plain::from("tomorrow")).unwrap_err();
        assert!(matches!(err, CastError::Format { .. }));
    }

    #[test]
    fn invalid_formats_fail_without_panicking() {
        let caster = DateTimeCaster::<NaiveDate>::with_format("%Q");
        let date = NaiveDate::from_ymd_opt(2000, 1, 1).unwrap();
        assert!(matches!(caster.to_plain(&date), Err(CastError::Custom(_))));

        // No offset available on naive values.
        let caster = DateTimeCaster::<NaiveDateTime>::with_format("%Y %z");
        let value = date.and_hms_opt(0, 0, 0).unwrap();
        assert!(caster.to_plain(&value).is_err());

        let caster = DateTimeCaster::<DateTime<Utc>>::new();
        assert!(caster.to_plain(&date).is_err());
    }
}
