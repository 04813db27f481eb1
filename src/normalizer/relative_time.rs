//! Turns footers like `🚀 alice · 3 hours ago` into absolute timestamps.
//!
//! Months count as 30 days and years as 365. The station only ever offers
//! coarse phrases, so calendar-accurate arithmetic would buy nothing.

use chrono::{DateTime, Duration, FixedOffset};

/// Glyph the station puts between the footer fields.
pub const SEPARATOR: char = '·';

/// Recognised units in match order, with their length in seconds.
const UNITS: [(&str, i64); 7] = [
    ("second", 1),
    ("minute", 60),
    ("hour", 60 * 60),
    ("day", 24 * 60 * 60),
    ("week", 7 * 24 * 60 * 60),
    ("month", 30 * 24 * 60 * 60),
    ("year", 365 * 24 * 60 * 60),
];

/// Resolves the trailing `<n> <unit>[s] ago` phrase of `footer` against `now`.
///
/// Never fails: an unreadable magnitude counts as zero and an unknown unit
/// leaves `now` untouched.
pub fn resolve(footer: &str, now: DateTime<FixedOffset>) -> DateTime<FixedOffset> {
    let phrase = footer.rsplit(SEPARATOR).next().unwrap_or(footer).trim();
    let mut tokens = phrase.split_whitespace();

    let magnitude = tokens
        .next()
        .and_then(|token| token.parse::<u64>().ok())
        .unwrap_or(0);

    let Some(unit) = tokens.next().and_then(unit_seconds) else {
        return now;
    };

    i64::try_from(magnitude)
        .ok()
        .and_then(|magnitude| magnitude.checked_mul(unit))
        .and_then(Duration::try_seconds)
        .and_then(|elapsed| now.checked_sub_signed(elapsed))
        .unwrap_or(now)
}

fn unit_seconds(token: &str) -> Option<i64> {
    UNITS
        .iter()
        .find(|(name, _)| token.contains(name))
        .map(|&(_, seconds)| seconds)
}
