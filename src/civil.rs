//! Civil (wall-clock) time in a zone at a fixed offset from UTC.
//!
//! Every pillar is computed from local civil time rather than from UTC:
//! the birth instant arrives already normalized to UTC, and is shifted here
//! by the offset of the civil zone the calendar is kept in (Korea Standard
//! Time, UTC+9, unless configured otherwise).

use chrono::{DateTime, Datelike, FixedOffset, NaiveDateTime, SecondsFormat, Timelike, Utc};

use crate::date::Date;
use crate::error::{Error, Result};

/// Offset of Korea Standard Time from UTC, in minutes.
pub const KST_OFFSET_MINUTES: i32 = 9 * 60;

const SECS_PER_DAY: u32 = 86_400;

/// A local civil instant: a [`Date`] plus the seconds elapsed since its
/// midnight.
///
/// Ordering is chronological, which is what the month-boundary lookup relies
/// on.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct CivilTime {
    date: Date,
    secs: u32,
}

impl CivilTime {
    /// Creates a civil time from a date and a time of day.
    ///
    /// Returns `None` unless `hour < 24`, `minute < 60` and `second < 60`.
    pub fn new(date: Date, hour: u32, minute: u32, second: u32) -> Option<Self> {
        if hour >= 24 || minute >= 60 || second >= 60 {
            return None;
        }
        Some(Self {
            date,
            secs: hour * 3600 + minute * 60 + second,
        })
    }
    /// The first instant of `date`.
    pub fn midnight(date: Date) -> Self {
        Self { date, secs: 0 }
    }

    /// Shifts a UTC instant into the civil zone `offset_minutes` ahead (east)
    /// of UTC.
    ///
    /// For Korea Standard Time (UTC+9), `offset_minutes` should be +540.
    ///
    /// # Example
    ///
    /// ```
    /// use chrono::{TimeZone, Utc};
    /// use manse::civil::CivilTime;
    ///
    /// let utc = Utc.with_ymd_and_hms(2023, 1, 19, 22, 30, 0).unwrap();
    /// let local = CivilTime::from_utc(utc, 540).unwrap();
    /// assert_eq!("2023-01-20", local.date().iso_gregorian());
    /// assert_eq!((7, 30), (local.hour(), local.minute()));
    /// ```
    pub fn from_utc(instant: DateTime<Utc>, offset_minutes: i32) -> Result<Self> {
        let zone = offset_minutes
            .checked_mul(60)
            .and_then(FixedOffset::east_opt)
            .ok_or(Error::OffsetOutOfRange(offset_minutes))?;
        Self::from_naive(instant.with_timezone(&zone).naive_local())
    }
    /// Reads a naive local date-time as civil time.
    pub fn from_naive(local: NaiveDateTime) -> Result<Self> {
        let date = Date::from_gregorian(local.year(), local.month() as i32, local.day() as i32)
            .ok_or_else(|| Error::MalformedInstant(local.to_string()))?;
        Ok(Self {
            date,
            secs: local.num_seconds_from_midnight(),
        })
    }

    pub fn date(&self) -> Date {
        self.date
    }
    pub fn hour(&self) -> u32 {
        self.secs / 3600
    }
    pub fn minute(&self) -> u32 {
        self.secs / 60 % 60
    }
    pub fn second(&self) -> u32 {
        self.secs % 60
    }
    /// Whole minutes elapsed since local midnight, `0..1440`.
    pub fn minutes_since_midnight(&self) -> u32 {
        self.secs / 60
    }

    /// Continuous Julian date of the instant, counted from noon.
    ///
    /// Midnight of a day with JDN `n` is `n - 0.5`, so
    /// `(jd + 0.5).floor()` recovers the JDN of the civil date.
    ///
    /// # Example
    ///
    /// ```
    /// use manse::Date;
    /// use manse::civil::CivilTime;
    ///
    /// let noon = CivilTime::new(Date::from_jdn(2451545), 12, 0, 0).unwrap();
    /// assert_eq!(2451545.0, noon.julian_day());
    /// ```
    pub fn julian_day(&self) -> f64 {
        self.date.jdn() as f64 + (self.secs as f64 - 43_200.0) / SECS_PER_DAY as f64
    }

    /// Signed span from `self` to `later`, in (fractional) days.
    pub fn days_until(&self, later: CivilTime) -> f64 {
        (later.date - self.date) as f64
            + (later.secs as f64 - self.secs as f64) / SECS_PER_DAY as f64
    }

    /// Formats the instant as `YYYY-MM-DDTHH:MM:SS` (no zone designator).
    pub fn iso(&self) -> String {
        format!(
            "{}T{:02}:{:02}:{:02}",
            self.date.iso_gregorian(),
            self.hour(),
            self.minute(),
            self.second()
        )
    }
}

/// Parses an RFC 3339 timestamp (any offset) into a UTC instant.
///
/// # Example
///
/// ```
/// use manse::civil::parse_instant;
///
/// let a = parse_instant("2023-01-19T22:30:00Z").unwrap();
/// let b = parse_instant("2023-01-20T07:30:00+09:00").unwrap();
/// assert_eq!(a, b);
/// assert!(parse_instant("yesterday").is_err());
/// ```
pub fn parse_instant(text: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(text.trim())
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| Error::MalformedInstant(format!("{text:?}: {e}")))
}

/// Builds a UTC instant from milliseconds since the Unix epoch.
///
/// Non-finite or unrepresentable values are rejected rather than clamped.
pub fn instant_from_millis(millis: f64) -> Result<DateTime<Utc>> {
    if !millis.is_finite() {
        return Err(Error::MalformedInstant(format!("{millis} ms")));
    }
    DateTime::from_timestamp_millis(millis.floor() as i64)
        .ok_or_else(|| Error::MalformedInstant(format!("{millis} ms")))
}

/// Formats a UTC instant the way it is echoed back in results.
pub fn format_utc(instant: DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn kst(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> CivilTime {
        let utc = Utc.with_ymd_and_hms(y, mo, d, h, mi, 0).unwrap();
        CivilTime::from_utc(utc, KST_OFFSET_MINUTES).unwrap()
    }

    #[test]
    fn shifts_into_local_zone() {
        let local = kst(2023, 1, 19, 22, 30);
        assert_eq!((2023, 1, 20), local.date().gregorian());
        assert_eq!(450, local.minutes_since_midnight());
        assert_eq!("2023-01-20T07:30:00", local.iso());

        let local = kst(2023, 12, 31, 15, 0);
        assert_eq!("2024-01-01T00:00:00", local.iso());
    }

    #[test]
    fn negative_offsets() {
        let utc = Utc.with_ymd_and_hms(2023, 1, 1, 3, 0, 0).unwrap();
        let local = CivilTime::from_utc(utc, -300).unwrap();
        assert_eq!("2022-12-31T22:00:00", local.iso());
    }

    #[test]
    fn rejects_offsets_of_a_day_or_more() {
        let utc = Utc.with_ymd_and_hms(2023, 1, 1, 0, 0, 0).unwrap();
        for offset in [1440, -1440, i32::MAX] {
            assert_eq!(
                Err(Error::OffsetOutOfRange(offset)),
                CivilTime::from_utc(utc, offset)
            );
        }
    }

    #[test]
    fn julian_day_rounds_to_civil_jdn() {
        for (h, m) in [(0, 0), (7, 30), (11, 59), (12, 0), (23, 59)] {
            let t = CivilTime::new(Date::from_jdn(2459965), h, m, 0).unwrap();
            assert_eq!(2459965, (t.julian_day() + 0.5).floor() as i64, "{h:02}:{m:02}");
        }
    }

    #[test]
    fn ordering_and_spans() {
        let a = kst(2023, 1, 19, 22, 30);
        let b = CivilTime::midnight(Date::from_gregorian(2023, 2, 4).unwrap());
        assert!(a < b);
        assert!((a.days_until(b) - 14.6875).abs() < 1e-9);
        assert!((b.days_until(a) + 14.6875).abs() < 1e-9);
    }

    #[test]
    fn invalid_time_of_day() {
        let date = Date::from_jdn(2459965);
        assert!(CivilTime::new(date, 24, 0, 0).is_none());
        assert!(CivilTime::new(date, 0, 60, 0).is_none());
        assert!(CivilTime::new(date, 23, 59, 59).is_some());
    }

    #[test]
    fn millis_must_be_finite() {
        for bad in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY, 1e300] {
            assert!(matches!(
                instant_from_millis(bad),
                Err(Error::MalformedInstant(_))
            ));
        }
        let instant = instant_from_millis(1_674_167_400_000.0).unwrap();
        assert_eq!("2023-01-19T22:30:00.000Z", format_utc(instant));
    }
}
