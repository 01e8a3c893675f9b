//! Compact `number+unit` durations such as `10m`, `1h30m` or `1.5s`.
//!
//! A duration is one or more `<number><unit>` terms written back to back.
//! Numbers may carry a decimal fraction, units are `ns`, `us` (also `µs` and
//! `μs`), `ms`, `s`, `m` and `h`. A bare `0` is accepted without a unit and
//! an optional leading `+` is ignored. Negative durations are rejected since
//! retention cannot run backwards.

use std::time::Duration;

use serde::Serializer;
use thiserror::Error;

const NANOS_PER_MICRO: u64 = 1_000;
const NANOS_PER_MILLI: u64 = 1_000_000;
const NANOS_PER_SECOND: u64 = 1_000_000_000;
const NANOS_PER_MINUTE: u64 = 60 * NANOS_PER_SECOND;
const NANOS_PER_HOUR: u64 = 60 * NANOS_PER_MINUTE;

/// Fraction digits beyond this precision cannot change the result.
const MAX_FRACTION_DIGITS: usize = 18;

/// Reasons a duration string is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum DurationError {
    /// The input was empty.
    #[error("empty duration")]
    Empty,
    /// The input started with `-`.
    #[error("negative duration '{0}'")]
    Negative(String),
    /// A term had no digits.
    #[error("invalid duration '{0}'")]
    Invalid(String),
    /// A number was not followed by a unit.
    #[error("missing unit in duration '{0}'")]
    MissingUnit(String),
    /// A term used a unit outside the supported set.
    #[error("unknown unit '{unit}' in duration '{input}'")]
    UnknownUnit {
        /// The offending unit.
        unit: String,
        /// The full input.
        input: String,
    },
    /// The total does not fit in 64 bits of nanoseconds.
    #[error("duration '{0}' is out of range")]
    Overflow(String),
}

fn unit_nanos(unit: &str) -> Option<u64> {
    match unit {
        "ns" => Some(1),
        "us" | "\u{b5}s" | "\u{3bc}s" => Some(NANOS_PER_MICRO),
        "ms" => Some(NANOS_PER_MILLI),
        "s" => Some(NANOS_PER_SECOND),
        "m" => Some(NANOS_PER_MINUTE),
        "h" => Some(NANOS_PER_HOUR),
        _ => None,
    }
}

fn split_digits(input: &str) -> (&str, &str) {
    let len = input.bytes().take_while(u8::is_ascii_digit).count();
    input.split_at(len)
}

/// Nanoseconds contributed by `digits` read as a decimal fraction of `unit`.
#[expect(
    clippy::integer_division,
    reason = "fractions of a nanosecond are truncated"
)]
fn fraction_nanos(digits: &str, unit: u64) -> u64 {
    let mut value: u128 = 0;
    let mut scale: u128 = 1;
    for digit in digits.bytes().take(MAX_FRACTION_DIGITS) {
        value = value * 10 + u128::from(digit - b'0');
        scale *= 10;
    }
    // value < scale, so the quotient is below `unit` and fits in u64.
    u64::try_from(value * u128::from(unit) / scale).unwrap_or(u64::MAX)
}

/// Parse a compact duration string.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use gigapi_config::duration::parse_duration;
///
/// assert_eq!(parse_duration("1h").unwrap(), Duration::from_secs(3600));
/// assert_eq!(parse_duration("1m30s").unwrap(), Duration::from_secs(90));
/// assert_eq!(parse_duration("250ms").unwrap(), Duration::from_millis(250));
/// ```
///
/// # Errors
///
/// Returns a [`DurationError`] when the input is empty, negative, malformed,
/// uses an unknown unit or overflows.
pub fn parse_duration(input: &str) -> Result<Duration, DurationError> {
    if input.starts_with('-') {
        return Err(DurationError::Negative(input.to_owned()));
    }
    let mut rest = input.strip_prefix('+').unwrap_or(input);
    if rest == "0" {
        return Ok(Duration::ZERO);
    }
    if rest.is_empty() {
        return Err(DurationError::Empty);
    }

    let overflow = || DurationError::Overflow(input.to_owned());
    let mut total: u64 = 0;
    while !rest.is_empty() {
        let (whole, after_whole) = split_digits(rest);
        let (fraction, after_number) = match after_whole.strip_prefix('.') {
            Some(tail) => split_digits(tail),
            None => ("", after_whole),
        };
        if whole.is_empty() && fraction.is_empty() {
            return Err(DurationError::Invalid(input.to_owned()));
        }

        let unit_len = after_number
            .find(|c: char| c.is_ascii_digit() || c == '.')
            .unwrap_or(after_number.len());
        let (unit, tail) = after_number.split_at(unit_len);
        if unit.is_empty() {
            return Err(DurationError::MissingUnit(input.to_owned()));
        }
        let scale = unit_nanos(unit).ok_or_else(|| DurationError::UnknownUnit {
            unit: unit.to_owned(),
            input: input.to_owned(),
        })?;

        let whole_value = if whole.is_empty() {
            0
        } else {
            whole.parse::<u64>().map_err(|_| overflow())?
        };
        let term = whole_value
            .checked_mul(scale)
            .and_then(|nanos| nanos.checked_add(fraction_nanos(fraction, scale)))
            .ok_or_else(overflow)?;
        total = total.checked_add(term).ok_or_else(overflow)?;
        rest = tail;
    }
    Ok(Duration::from_nanos(total))
}

/// Render a duration in the grammar accepted by [`parse_duration`].
///
/// Zero renders as `0s`; otherwise every non-zero component from hours down
/// to nanoseconds is written, so `parse_duration(&format_duration(d))`
/// returns `d`.
///
/// ```
/// use std::time::Duration;
/// use gigapi_config::duration::format_duration;
///
/// assert_eq!(format_duration(Duration::from_secs(5400)), "1h30m");
/// ```
#[must_use]
#[expect(
    clippy::integer_division,
    clippy::integer_division_remainder_used,
    reason = "splitting a duration into clock components"
)]
pub fn format_duration(duration: Duration) -> String {
    if duration.is_zero() {
        return "0s".to_owned();
    }
    let secs = duration.as_secs();
    let nanos = u64::from(duration.subsec_nanos());
    let components = [
        (secs / 3600, "h"),
        (secs / 60 % 60, "m"),
        (secs % 60, "s"),
        (nanos / NANOS_PER_MILLI, "ms"),
        (nanos / NANOS_PER_MICRO % 1000, "us"),
        (nanos % NANOS_PER_MICRO, "ns"),
    ];
    components
        .iter()
        .filter(|(value, _)| *value > 0)
        .map(|(value, unit)| format!("{value}{unit}"))
        .collect()
}

/// Serde adapter writing a [`Duration`] with [`format_duration`].
///
/// # Errors
///
/// Propagates serializer failures.
pub fn serialize<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&format_duration(*duration))
}
