//! UTC timestamps backed by a split Julian date.
//!
//! [`UTC`] is the time type the rest of the workspace passes around. It can
//! be built from the system clock, from validated calendar components, or
//! parsed from ISO 8601 text. A date without a time of day is evaluated at
//! 12:00 UTC: a bare calendar date names the whole day, and noon keeps the
//! result away from the midnight cycle-boundary ambiguity.
//!
//! Leap seconds are not modeled; the phase math downstream works at a
//! precision where they are invisible.

use crate::constants::{
    NANOSECONDS_PER_SECOND_F64, SECONDS_PER_DAY, SECONDS_PER_DAY_F64, UNIX_EPOCH_JD,
};
use crate::errors::{LunarError, LunarResult};
use crate::julian::JulianDate;
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

const MAX_INPUT_LENGTH: usize = 32;

#[derive(Debug, Clone, Copy)]
pub struct UTC(JulianDate);

impl UTC {
    /// Creates UTC from a Unix timestamp (seconds and nanoseconds since
    /// 1970-01-01 00:00:00). Whole days go into `jd1`, the remainder into
    /// `jd2`, preserving sub-second precision.
    pub fn new(seconds: i64, nanos: u32) -> Self {
        let days = seconds.div_euclid(SECONDS_PER_DAY);
        let remainder = seconds.rem_euclid(SECONDS_PER_DAY);
        let jd1 = UNIX_EPOCH_JD + days as f64;
        let jd2 =
            (remainder as f64 + f64::from(nanos) / NANOSECONDS_PER_SECOND_F64) / SECONDS_PER_DAY_F64;
        Self(JulianDate::new(jd1, jd2))
    }

    pub fn from_julian_date(jd: JulianDate) -> Self {
        Self(jd)
    }

    pub fn j2000() -> Self {
        Self(JulianDate::j2000())
    }

    pub fn to_julian_date(&self) -> JulianDate {
        self.0
    }

    /// Current UTC from the system clock.
    pub fn now() -> Self {
        use std::time::{SystemTime, UNIX_EPOCH};
        let duration = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default();
        Self::new(duration.as_secs() as i64, duration.subsec_nanos())
    }

    /// Builds UTC from calendar components, rejecting anything that is not
    /// a real instant on the Gregorian calendar.
    pub fn from_calendar(
        year: i32,
        month: u8,
        day: u8,
        hour: u8,
        minute: u8,
        second: f64,
    ) -> LunarResult<Self> {
        if !(1..=12).contains(&month) {
            return Err(LunarError::invalid_date(format!(
                "month out of range: {month}"
            )));
        }
        let month_days = days_in_month(year, month);
        if day < 1 || day > month_days {
            return Err(LunarError::invalid_date(format!(
                "day out of range for {year}-{month:02}: {day}"
            )));
        }
        if hour > 23 {
            return Err(LunarError::invalid_date(format!(
                "hour out of range: {hour}"
            )));
        }
        if minute > 59 {
            return Err(LunarError::invalid_date(format!(
                "minute out of range: {minute}"
            )));
        }
        if !second.is_finite() || !(0.0..60.0).contains(&second) {
            return Err(LunarError::invalid_date(format!(
                "second out of range: {second}"
            )));
        }
        Ok(Self(JulianDate::from_calendar(
            year, month, day, hour, minute, second,
        )))
    }

    /// Builds UTC for a bare calendar date, evaluated at 12:00 UTC.
    pub fn from_date(year: i32, month: u8, day: u8) -> LunarResult<Self> {
        Self::from_calendar(year, month, day, 12, 0, 0.0)
    }

    pub fn add_days(&self, days: f64) -> Self {
        Self(self.0.add_days(days))
    }

    pub fn add_seconds(&self, seconds: f64) -> Self {
        Self(self.0.add_seconds(seconds))
    }

    /// Signed difference `self - earlier` in days.
    pub fn days_since(&self, earlier: &UTC) -> f64 {
        self.0.days_since(&earlier.0)
    }

    /// Formats as ISO 8601 (`YYYY-MM-DDTHH:MM:SS.sss`).
    ///
    /// Rounds to the printed millisecond before splitting the day, so an
    /// instant a hair below midnight renders as 00:00 of the next day
    /// rather than 23:59:60 of the previous one.
    pub fn to_iso8601(&self) -> String {
        let rounded = self.0.add_seconds(0.0005);
        let (year, month, day, frac) = rounded.to_calendar();
        let total_ms = (frac * SECONDS_PER_DAY_F64 * 1000.0).floor() as i64;
        let hour = total_ms / 3_600_000;
        let minute = (total_ms % 3_600_000) / 60_000;
        let second = (total_ms % 60_000) as f64 / 1000.0;
        format!("{year:04}-{month:02}-{day:02}T{hour:02}:{minute:02}:{second:06.3}")
    }

    /// Formats the calendar date only (`YYYY-MM-DD`).
    pub fn to_iso8601_date(&self) -> String {
        let (year, month, day, _) = self.0.add_seconds(0.0005).to_calendar();
        format!("{year:04}-{month:02}-{day:02}")
    }
}

fn days_in_month(year: i32, month: u8) -> u8 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 => {
            let leap = year % 4 == 0 && (year % 100 != 0 || year % 400 == 0);
            if leap {
                29
            } else {
                28
            }
        }
        _ => 0,
    }
}

fn parse_field<T: FromStr>(field: Option<&str>, what: &str, input: &str) -> LunarResult<T> {
    field
        .and_then(|s| s.parse().ok())
        .ok_or_else(|| LunarError::invalid_date(format!("bad {what} in '{input}'")))
}

impl FromStr for UTC {
    type Err = LunarError;

    /// Parses `YYYY-MM-DD` (evaluated at noon) or
    /// `YYYY-MM-DD[T ]HH:MM:SS[.sss][Z]`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() || s.len() > MAX_INPUT_LENGTH {
            return Err(LunarError::invalid_date(
                "expected YYYY-MM-DD or YYYY-MM-DDTHH:MM:SS",
            ));
        }
        let s = s.strip_suffix('Z').unwrap_or(s);

        let (date_part, time_part) = match s.find(['T', ' ']) {
            Some(i) => (&s[..i], Some(&s[i + 1..])),
            None => (s, None),
        };

        let mut fields = date_part.split('-');
        let year: i32 = parse_field(fields.next(), "year", s)?;
        let month: u8 = parse_field(fields.next(), "month", s)?;
        let day: u8 = parse_field(fields.next(), "day", s)?;
        if fields.next().is_some() {
            return Err(LunarError::invalid_date(format!(
                "trailing date fields in '{s}'"
            )));
        }

        match time_part {
            None => Self::from_date(year, month, day),
            Some(t) => {
                let mut fields = t.split(':');
                let hour: u8 = parse_field(fields.next(), "hour", s)?;
                let minute: u8 = parse_field(fields.next(), "minute", s)?;
                let second: f64 = parse_field(fields.next(), "second", s)?;
                if fields.next().is_some() {
                    return Err(LunarError::invalid_date(format!(
                        "trailing time fields in '{s}'"
                    )));
                }
                Self::from_calendar(year, month, day, hour, minute, second)
            }
        }
    }
}

// Equality and ordering compare the instant, not the jd1/jd2 split, so
// two representations of the same moment are equal.
impl PartialEq for UTC {
    fn eq(&self, other: &Self) -> bool {
        self.days_since(other) == 0.0
    }
}

impl PartialOrd for UTC {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.days_since(other).partial_cmp(&0.0)
    }
}

impl fmt::Display for UTC {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_iso8601())
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for UTC {
    fn serialize<S: serde::Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&self.to_iso8601())
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for UTC {
    fn deserialize<D: serde::Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        let text = <String as serde::Deserialize>::deserialize(d)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::J2000_JD;

    #[test]
    fn test_unix_epoch() {
        let utc = UTC::new(0, 0);
        assert_eq!(utc.to_julian_date().to_f64(), UNIX_EPOCH_JD);
    }

    #[test]
    fn test_from_unix_timestamp() {
        // 2024-01-01 00:00:00 UTC
        let utc = UTC::new(1_704_067_200, 0);
        assert_eq!(utc.to_iso8601_date(), "2024-01-01");
    }

    #[test]
    fn test_negative_unix_timestamp() {
        // One hour before the epoch must land on 1969-12-31 23:00.
        let utc = UTC::new(-3600, 0);
        assert_eq!(utc.to_iso8601(), "1969-12-31T23:00:00.000");
    }

    #[test]
    fn test_from_calendar_validation() {
        assert!(UTC::from_calendar(2024, 2, 29, 0, 0, 0.0).is_ok());
        assert!(UTC::from_calendar(2023, 2, 29, 0, 0, 0.0).is_err());
        assert!(UTC::from_calendar(2024, 13, 1, 0, 0, 0.0).is_err());
        assert!(UTC::from_calendar(2024, 4, 31, 0, 0, 0.0).is_err());
        assert!(UTC::from_calendar(2024, 1, 1, 24, 0, 0.0).is_err());
        assert!(UTC::from_calendar(2024, 1, 1, 0, 60, 0.0).is_err());
        assert!(UTC::from_calendar(2024, 1, 1, 0, 0, 60.0).is_err());
        assert!(UTC::from_calendar(2024, 1, 1, 0, 0, f64::NAN).is_err());
    }

    #[test]
    fn test_parse_date_only_is_noon() {
        let utc: UTC = "2024-01-11".parse().unwrap();
        assert_eq!(utc.to_iso8601(), "2024-01-11T12:00:00.000");
    }

    #[test]
    fn test_parse_full_timestamp() {
        let utc: UTC = "2000-01-01T12:00:00".parse().unwrap();
        assert_eq!(utc.to_julian_date().to_f64(), J2000_JD);

        let with_z: UTC = "2000-01-01 12:00:00Z".parse().unwrap();
        assert_eq!(with_z, utc);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        for bad in ["", "not-a-date", "2024-01", "2024-13-01", "2024-01-01T25:00:00", "2024-01-01TXX:00:00"] {
            let parsed = bad.parse::<UTC>();
            assert!(
                matches!(parsed, Err(LunarError::InvalidDate { .. })),
                "expected InvalidDate for {bad:?}"
            );
        }
    }

    #[test]
    fn test_ordering() {
        let earlier: UTC = "2024-01-11".parse().unwrap();
        let later: UTC = "2024-01-25".parse().unwrap();
        assert!(earlier < later);
        assert!((later.days_since(&earlier) - 14.0).abs() < 1e-9);
    }

    #[test]
    fn test_iso8601_round_trip() {
        let utc = UTC::from_calendar(2024, 6, 5, 18, 30, 15.5).unwrap();
        assert_eq!(utc.to_iso8601(), "2024-06-05T18:30:15.500");
        let back: UTC = utc.to_iso8601().parse().unwrap();
        assert!(back.days_since(&utc).abs() < 1e-9);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serde_as_iso8601() {
        let utc = UTC::from_calendar(2024, 1, 25, 17, 54, 0.0).unwrap();
        let json = serde_json::to_string(&utc).unwrap();
        assert_eq!(json, "\"2024-01-25T17:54:00.000\"");
        let back: UTC = serde_json::from_str(&json).unwrap();
        assert!(back.days_since(&utc).abs() < 1e-6);
    }
}
