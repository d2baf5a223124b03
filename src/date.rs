//! Calendar-independant date.

use std::ops::{Add, Sub};

/// A calendar-independant date, identified by its Julian day number (JDN).
///
/// Conversions treat every year as proleptic Gregorian; there is no special
/// handling of the 1582 calendar reform.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct Date {
    jdn: i64,
}

impl Date {
    /// Creates a `Date` with a Julian day number (JDN).
    pub fn from_jdn(jdn: i64) -> Self {
        Self { jdn }
    }
    /// Returns the Julian day number (JDN) of the date.
    pub fn jdn(&self) -> i64 {
        self.jdn
    }

    /// Creates a `Date` with a Gregorian calendar date.
    ///
    /// `year` should be an astronomical year number, i.e. 1 BC is `0`, 2
    /// BC is `-1`, etc.
    ///
    /// Returns `None` if `month` or `day` does not name a real day of that
    /// year.
    ///
    /// # Example
    ///
    /// ```
    /// use manse::Date;
    ///
    /// let date = Date::from_gregorian(2000, 1, 1).unwrap();
    /// assert_eq!(2451545, date.jdn());
    /// assert!(Date::from_gregorian(2023, 2, 29).is_none());
    /// ```
    pub fn from_gregorian(year: i32, month: i32, day: i32) -> Option<Self> {
        if !(1..=12).contains(&month) {
            return None;
        }
        if day < 1 || day > days_in_month(month, YearType::from_gregorian(year)) {
            return None;
        }
        Some(Self::from_jdn(gregorian_to_jdn(year, month, day)))
    }
    /// Represents the date in Gregorian calendar.
    ///
    /// Returns in `(year, month, day)` format.
    ///
    /// # Example
    ///
    /// ```
    /// use manse::Date;
    ///
    /// let date = Date::from_jdn(2451545);
    /// assert_eq!((2000, 1, 1), date.gregorian());
    /// ```
    pub fn gregorian(&self) -> (i32, i32, i32) {
        let a = self.jdn + 32044;
        let b = (4 * a + 3).div_euclid(146097);
        let c = a - (146097 * b).div_euclid(4);
        let d = (4 * c + 3).div_euclid(1461);
        let e = c - (1461 * d).div_euclid(4);
        let m = (5 * e + 2).div_euclid(153);
        let day = e - (153 * m + 2).div_euclid(5) + 1;
        let month = m + 3 - 12 * (m / 10);
        let year = 100 * b + d - 4800 + m / 10;
        (year as i32, month as i32, day as i32)
    }
    /// Formats the date in ISO 8601 format.
    ///
    /// # Example
    ///
    /// ```
    /// use manse::Date;
    ///
    /// let date = Date::from_gregorian(2000, 1, 1).unwrap();
    /// assert_eq!("2000-01-01", date.iso_gregorian());
    /// ```
    pub fn iso_gregorian(&self) -> String {
        let (y, m, d) = self.gregorian();
        format!("{:04}-{:02}-{:02}", y, m, d)
    }

    /// Returns the position of the date in the sexagenary day cycle,
    /// numbered from 0 (甲子) to 59 (癸亥).
    ///
    /// # Example
    ///
    /// ```
    /// use manse::Date;
    ///
    /// let date = Date::from_gregorian(2000, 1, 1).unwrap();
    /// assert_eq!(54, date.sexagenary_index()); // 戊午
    /// ```
    pub fn sexagenary_index(&self) -> u32 {
        (self.jdn + 49).rem_euclid(60) as u32
    }
}

impl Add<i64> for Date {
    type Output = Date;
    fn add(self, rhs: i64) -> Self::Output {
        Date::from_jdn(self.jdn + rhs)
    }
}
impl Sub<Date> for Date {
    type Output = i64;
    fn sub(self, rhs: Date) -> Self::Output {
        self.jdn - rhs.jdn
    }
}

/// Indicates whether a year is a leap year or common year.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum YearType {
    Common,
    Leap,
}

impl YearType {
    /// Determines if `year` is a leap year in Gregorian calendar.
    pub fn from_gregorian(year: i32) -> Self {
        if year.rem_euclid(4) == 0 && year.rem_euclid(100) != 0 || year.rem_euclid(400) == 0 {
            Self::Leap
        } else {
            Self::Common
        }
    }
    /// Returns `true` if `self` is `Leap`, otherwise `false`.
    pub fn is_leap(&self) -> bool {
        matches!(self, YearType::Leap)
    }
}

/// JDN of a Gregorian date, without checking that the date exists.
///
/// Months before March count as the end of the previous year so that the
/// leap day falls last.
pub(crate) fn gregorian_to_jdn(year: i32, month: i32, day: i32) -> i64 {
    let (y, m, d) = (year as i64, month as i64, day as i64);
    let a = (14 - m).div_euclid(12);
    let y = y + 4800 - a;
    let m = m + 12 * a - 3;
    d + (153 * m + 2).div_euclid(5) + 365 * y + y.div_euclid(4) - y.div_euclid(100)
        + y.div_euclid(400)
        - 32045
}

fn days_in_month(month: i32, year_type: YearType) -> i32 {
    match month {
        2 => 28 + year_type.is_leap() as i32,
        4 | 6 | 9 | 11 => 30,
        _ => 31,
    }
}


#[cfg(test)]
mod tests_priv {
    use super::*;

    #[test]
    fn priv_days_in_month() {
        use YearType::*;
        assert_eq!(28, days_in_month(2, Common));
        assert_eq!(29, days_in_month(2, Leap));
        assert_eq!(30, days_in_month(9, Common));
        assert_eq!(31, days_in_month(12, Leap));
    }
}
