use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Timelike, Utc};
use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use super::error::EphemerisError;

/// Length of the mandatory `YYYY-DDDTHH:MM:SS` prefix.
const FIXED_PREFIX_LEN: usize = 17;
const MAX_FRACTION_DIGITS: usize = 6;
const NANOS_DIGITS: usize = 9;

/// A feed epoch: the identifier exactly as it appears in the feed,
/// together with the instant it denotes.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Epoch {
    id: String,
    instant: DateTime<Utc>,
}

impl Epoch {
    pub fn parse(text: &str) -> Result<Self, EphemerisError> {
        Ok(Self {
            id: text.to_string(),
            instant: parse_epoch(text)?,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn instant(&self) -> DateTime<Utc> {
        self.instant
    }

    pub fn hour(&self) -> u32 {
        self.instant.hour()
    }

    pub fn minute(&self) -> u32 {
        self.instant.minute()
    }
}

impl FromStr for Epoch {
    type Err = EphemerisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Epoch::parse(s)
    }
}

impl fmt::Display for Epoch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.id)
    }
}

impl Serialize for Epoch {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.id)
    }
}

/// Parses a day-of-year timestamp such as `2024-045T12:04:00.000Z`.
///
/// The layout is strict: four digit year, three digit day of year, two digit
/// hour, minute and second, a `.` followed by one to six fraction digits, and
/// a trailing `Z`. Out of range fields (day 400, hour 25) are
/// rejected as well.
pub fn parse_epoch(text: &str) -> Result<DateTime<Utc>, EphemerisError> {
    let malformed = || EphemerisError::MalformedEpoch(text.to_string());
    let bytes = text.as_bytes();

    if bytes.len() < FIXED_PREFIX_LEN + 1 || !text.is_ascii() {
        return Err(malformed());
    }

    let separators = [(4, b'-'), (8, b'T'), (11, b':'), (14, b':')];
    if separators.iter().any(|&(i, c)| bytes[i] != c) {
        return Err(malformed());
    }

    let field = |range: std::ops::Range<usize>| -> Result<u32, EphemerisError> {
        let digits = &text[range];
        if !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(malformed());
        }
        digits.parse().map_err(|_| malformed())
    };

    let year = field(0..4)?;
    let day_of_year = field(5..8)?;
    let hour = field(9..11)?;
    let minute = field(12..14)?;
    let second = field(15..17)?;

    let rest = text[FIXED_PREFIX_LEN..]
        .strip_suffix('Z')
        .ok_or_else(malformed)?;
    let nanos = rest
        .strip_prefix('.')
        .and_then(parse_fraction_nanos)
        .ok_or_else(malformed)?;

    let date = NaiveDate::from_yo_opt(year as i32, day_of_year).ok_or_else(malformed)?;
    let time = NaiveTime::from_hms_nano_opt(hour, minute, second, nanos).ok_or_else(malformed)?;

    Ok(NaiveDateTime::new(date, time).and_utc())
}

fn parse_fraction_nanos(fraction: &str) -> Option<u32> {
    if fraction.is_empty()
        || fraction.len() > MAX_FRACTION_DIGITS
        || !fraction.bytes().all(|b| b.is_ascii_digit())
    {
        return None;
    }
    let scale = 10u32.pow((NANOS_DIGITS - fraction.len()) as u32);
    fraction.parse::<u32>().ok().map(|v| v * scale)
}
