//! Split-precision Julian dates.
//!
//! A [`JulianDate`] carries the date as two f64 parts whose sum is the
//! Julian Date. Keeping whole days in `jd1` and the day fraction in `jd2`
//! preserves sub-second precision that a single f64 JD would lose.
//! Calendar conversion assumes the Gregorian calendar.

use crate::constants::{J2000_JD, SECONDS_PER_DAY_F64};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct JulianDate {
    pub jd1: f64,
    pub jd2: f64,
}

impl JulianDate {
    pub fn new(jd1: f64, jd2: f64) -> Self {
        Self { jd1, jd2 }
    }

    pub fn from_f64(jd: f64) -> Self {
        Self::new(jd, 0.0)
    }

    pub fn j2000() -> Self {
        Self::new(J2000_JD, 0.0)
    }

    pub fn jd1(&self) -> f64 {
        self.jd1
    }

    pub fn jd2(&self) -> f64 {
        self.jd2
    }

    pub fn to_f64(&self) -> f64 {
        self.jd1 + self.jd2
    }

    pub fn add_days(&self, days: f64) -> Self {
        Self::new(self.jd1, self.jd2 + days)
    }

    pub fn add_seconds(&self, seconds: f64) -> Self {
        self.add_days(seconds / SECONDS_PER_DAY_F64)
    }

    /// Signed difference `self - earlier` in days.
    ///
    /// Differences the two parts separately, which keeps precision when
    /// both dates share the same whole-day part.
    pub fn days_since(&self, earlier: &JulianDate) -> f64 {
        (self.jd1 - earlier.jd1) + (self.jd2 - earlier.jd2)
    }

    /// Builds a Julian date from Gregorian calendar components.
    ///
    /// `jd1` lands on the midnight JD of the given day and `jd2` carries
    /// the time of day. Components are not range-checked here; callers
    /// that accept user input validate first (see `UTC::from_calendar`).
    pub fn from_calendar(year: i32, month: u8, day: u8, hour: u8, minute: u8, second: f64) -> Self {
        let (y, m) = if month <= 2 {
            (f64::from(year) - 1.0, f64::from(month) + 12.0)
        } else {
            (f64::from(year), f64::from(month))
        };

        let a = (y / 100.0).floor();
        let b = 2.0 - a + (a / 4.0).floor();

        let jd1 = (365.25 * (y + 4716.0)).floor() + (30.6001 * (m + 1.0)).floor()
            + f64::from(day)
            + b
            - 1524.5;
        let jd2 = (3600.0 * f64::from(hour) + 60.0 * f64::from(minute) + second)
            / SECONDS_PER_DAY_F64;

        Self::new(jd1, jd2)
    }

    /// Splits the date back into `(year, month, day, day_fraction)`,
    /// with `day_fraction` in [0, 1) measured from midnight.
    pub fn to_calendar(&self) -> (i32, u8, u8, f64) {
        let jd = self.to_f64() + 0.5;
        let z = jd.floor();
        let f = jd - z;

        let a = if z < 2_299_161.0 {
            z
        } else {
            let alpha = ((z - 1_867_216.25) / 36_524.25).floor();
            z + 1.0 + alpha - (alpha / 4.0).floor()
        };

        let b = a + 1524.0;
        let c = ((b - 122.1) / 365.25).floor();
        let d = (365.25 * c).floor();
        let e = ((b - d) / 30.6001).floor();

        let day = (b - d - (30.6001 * e).floor()) as u8;
        let month = if e < 14.0 { e - 1.0 } else { e - 13.0 } as u8;
        let year = if month > 2 { c - 4716.0 } else { c - 4715.0 } as i32;

        (year, month, day, f)
    }
}

impl fmt::Display for JulianDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "JD {:.9}", self.to_f64())
    }
}

impl From<f64> for JulianDate {
    fn from(jd: f64) -> Self {
        Self::from_f64(jd)
    }
}
