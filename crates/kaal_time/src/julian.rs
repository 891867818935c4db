//! Julian Day (UT) instants and Gregorian calendar conversion.
//!
//! Every instant inside kaal is a [`JulianDay`] on the UT scale. Chrono
//! `DateTime<Utc>` values are accepted at the edges and converted here, so
//! all comparisons and arithmetic happen on plain day counts.
//!
//! Calendar algorithms: Meeus, "Astronomical Algorithms", ch. 7.

use std::cmp::Ordering;
use std::fmt::{Display, Formatter};

use chrono::{DateTime, Datelike, NaiveDate, SecondsFormat, Timelike, Utc};

use crate::error::TimeError;

/// Julian Date of the J2000.0 epoch (2000-01-01 12:00 TT).
pub const J2000_JD: f64 = 2_451_545.0;

/// Julian Date of the Unix epoch (1970-01-01 00:00 UTC).
pub const UNIX_EPOCH_JD: f64 = 2_440_587.5;

/// Seconds per day.
pub const SECONDS_PER_DAY: f64 = 86_400.0;

/// Days per Julian century.
pub const DAYS_PER_CENTURY: f64 = 36_525.0;

/// Gregorian calendar date and fractional day to Julian Date.
///
/// `day` may carry a fractional part (e.g. 15.5 = noon on the 15th).
pub fn calendar_to_jd(year: i32, month: u32, day: f64) -> f64 {
    let (y, m) = if month <= 2 {
        (year - 1, month + 12)
    } else {
        (year, month)
    };
    let a = (y as f64 / 100.0).floor();
    let b = 2.0 - a + (a / 4.0).floor();
    (365.25 * (y as f64 + 4716.0)).floor() + (30.6001 * (m as f64 + 1.0)).floor() + day + b
        - 1524.5
}

/// Julian Date to Gregorian `(year, month, fractional day)`.
pub fn jd_to_calendar(jd: f64) -> (i32, u32, f64) {
    let jd = jd + 0.5;
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

    let day = b - d - (30.6001 * e).floor() + f;
    let month = if e < 14.0 { e - 1.0 } else { e - 13.0 };
    let year = if month > 2.0 { c - 4716.0 } else { c - 4715.0 };
    (year as i32, month as u32, day)
}

/// An instant expressed as a Julian Day on the UT scale.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct JulianDay(pub f64);

impl JulianDay {
    /// J2000.0 as a UT instant.
    pub const J2000: JulianDay = JulianDay(J2000_JD);

    /// Wrap a raw Julian Day value.
    pub const fn new(jd: f64) -> Self {
        Self(jd)
    }

    /// Build from Gregorian date and UTC time of day, validating ranges.
    pub fn from_ymd_hms(
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
        minute: u32,
        second: f64,
    ) -> Result<Self, TimeError> {
        if NaiveDate::from_ymd_opt(year, month, day).is_none() {
            return Err(TimeError::InvalidDate(format!(
                "{year:04}-{month:02}-{day:02}"
            )));
        }
        if hour > 23 || minute > 59 || !(0.0..60.0).contains(&second) {
            return Err(TimeError::InvalidDate(format!(
                "{hour:02}:{minute:02}:{second}"
            )));
        }
        let day_frac = day as f64
            + hour as f64 / 24.0
            + minute as f64 / 1440.0
            + second / SECONDS_PER_DAY;
        Ok(Self(calendar_to_jd(year, month, day_frac)))
    }

    /// 0h UT on the given civil date.
    pub fn from_date(date: NaiveDate) -> Self {
        Self(calendar_to_jd(date.year(), date.month(), date.day() as f64))
    }

    /// Convert a chrono UTC timestamp.
    pub fn from_utc(dt: &DateTime<Utc>) -> Self {
        let secs = dt.timestamp() as f64 + dt.nanosecond() as f64 * 1e-9;
        Self(UNIX_EPOCH_JD + secs / SECONDS_PER_DAY)
    }

    /// Convert to a chrono UTC timestamp, rounded to the millisecond.
    pub fn to_utc(self) -> Result<DateTime<Utc>, TimeError> {
        if !self.0.is_finite() {
            return Err(TimeError::Unrepresentable(self.0));
        }
        let millis = ((self.0 - UNIX_EPOCH_JD) * SECONDS_PER_DAY * 1000.0).round() as i64;
        DateTime::from_timestamp_millis(millis).ok_or(TimeError::Unrepresentable(self.0))
    }

    /// Raw Julian Day value.
    pub const fn value(self) -> f64 {
        self.0
    }

    /// UTC civil date containing this instant.
    pub fn utc_date(self) -> Result<NaiveDate, TimeError> {
        let (y, m, d) = jd_to_calendar(self.0);
        NaiveDate::from_ymd_opt(y, m, d.floor() as u32)
            .ok_or_else(|| TimeError::InvalidDate(format!("JD {}", self.0)))
    }

    /// UTC calendar year containing this instant.
    pub fn utc_year(self) -> i32 {
        jd_to_calendar(self.0).0
    }

    /// 0h UT of the UTC day containing this instant.
    pub fn utc_midnight(self) -> Self {
        Self((self.0 - 0.5).floor() + 0.5)
    }

    /// Day of week of the UTC day, 0 = Sunday .. 6 = Saturday.
    pub fn weekday_index(self) -> u8 {
        ((self.0 + 1.5).floor() as i64).rem_euclid(7) as u8
    }

    /// Shift by a (possibly fractional) number of days.
    pub fn add_days(self, days: f64) -> Self {
        Self(self.0 + days)
    }

    /// Shift by a (possibly fractional) number of hours.
    pub fn add_hours(self, hours: f64) -> Self {
        Self(self.0 + hours / 24.0)
    }

    /// Signed difference `self - other` in days.
    pub fn days_since(self, other: JulianDay) -> f64 {
        self.0 - other.0
    }

    /// Julian centuries since J2000.0 on this instant's own scale.
    pub fn centuries_since_j2000(self) -> f64 {
        (self.0 - J2000_JD) / DAYS_PER_CENTURY
    }

    /// Total ordering, usable in `sort_by`.
    pub fn total_cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }

    /// Whole-second key, for deduplication.
    pub fn second_key(self) -> i64 {
        (self.0 * SECONDS_PER_DAY).round() as i64
    }
}

impl Display for JulianDay {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.to_utc() {
            Ok(dt) => {
                let dt = dt.with_nanosecond(0).unwrap_or(dt);
                write!(f, "{}", dt.to_rfc3339_opts(SecondsFormat::Secs, true))
            }
            Err(_) => write!(f, "JD {}", self.0),
        }
    }
}

impl From<DateTime<Utc>> for JulianDay {
    fn from(dt: DateTime<Utc>) -> Self {
        Self::from_utc(&dt)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for JulianDay {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let dt = self.to_utc().map_err(serde::ser::Error::custom)?;
        serializer.serialize_str(&dt.to_rfc3339_opts(SecondsFormat::Millis, true))
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for JulianDay {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        let dt = DateTime::parse_from_rfc3339(&s).map_err(serde::de::Error::custom)?;
        Ok(Self::from_utc(&dt.with_timezone(&Utc)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn j2000_calendar() {
        let jd = calendar_to_jd(2000, 1, 1.5);
        assert!((jd - J2000_JD).abs() < 1e-9);
    }

    #[test]
    fn meeus_example_7a() {
        // 1957 October 4.81 = JD 2436116.31
        let jd = calendar_to_jd(1957, 10, 4.81);
        assert!((jd - 2_436_116.31).abs() < 1e-6);
    }

    #[test]
    fn calendar_roundtrip_leap_day() {
        let jd = calendar_to_jd(2024, 2, 29.25);
        let (y, m, d) = jd_to_calendar(jd);
        assert_eq!((y, m), (2024, 2));
        assert!((d - 29.25).abs() < 1e-6);
    }

    #[test]
    fn weekday_of_known_dates() {
        // 2000-01-01 was a Saturday, 2024-03-25 a Monday
        assert_eq!(JulianDay::J2000.weekday_index(), 6);
        let jd = JulianDay::from_ymd_hms(2024, 3, 25, 6, 0, 0.0).unwrap();
        assert_eq!(jd.weekday_index(), 1);
    }

    #[test]
    fn chrono_bridge() {
        let dt = DateTime::parse_from_rfc3339("2024-03-25T06:00:00Z")
            .unwrap()
            .with_timezone(&Utc);
        let jd = JulianDay::from_utc(&dt);
        let expected = JulianDay::from_ymd_hms(2024, 3, 25, 6, 0, 0.0).unwrap();
        assert!((jd.0 - expected.0).abs() < 1e-9);
        assert_eq!(jd.to_utc().unwrap(), dt);
    }

    #[test]
    fn utc_date_and_midnight() {
        let jd = JulianDay::from_ymd_hms(2024, 1, 15, 23, 59, 0.0).unwrap();
        assert_eq!(
            jd.utc_date().unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()
        );
        let midnight = jd.utc_midnight();
        assert!((midnight.0 - calendar_to_jd(2024, 1, 15.0)).abs() < 1e-9);
    }

    #[test]
    fn rejects_invalid_components() {
        assert!(JulianDay::from_ymd_hms(2023, 2, 29, 0, 0, 0.0).is_err());
        assert!(JulianDay::from_ymd_hms(2024, 1, 1, 24, 0, 0.0).is_err());
        assert!(JulianDay::from_ymd_hms(2024, 1, 1, 0, 0, 60.0).is_err());
    }

    #[test]
    fn display_is_utc_timestamp() {
        let jd = JulianDay::from_ymd_hms(2024, 4, 8, 18, 21, 0.0).unwrap();
        assert_eq!(jd.to_string(), "2024-04-08T18:21:00Z");
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serializes_as_utc_string() {
        let jd = JulianDay::from_ymd_hms(2024, 3, 25, 6, 0, 0.0).unwrap();
        let json = serde_json::to_string(&jd).unwrap();
        assert_eq!(json, "\"2024-03-25T06:00:00.000Z\"");
        let back: JulianDay = serde_json::from_str(&json).unwrap();
        assert!((back.0 - jd.0).abs() < 1e-8);
    }
}
