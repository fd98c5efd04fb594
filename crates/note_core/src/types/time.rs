//! Time types for structured note schedules.
//!
//! This module provides:
//! - `Date`: Type-safe date wrapper around chrono::NaiveDate
//! - `Tenor`: Product maturity expressed in years or months (`6Y`, `18M`)
//!
//! # Examples
//!
//! ```
//! use note_core::types::time::{Date, Tenor};
//!
//! let start = Date::from_ymd(2024, 1, 31).unwrap();
//! let tenor: Tenor = "6Y".parse().unwrap();
//! assert_eq!(tenor.months(), 72);
//!
//! let maturity = start.add_tenor(tenor).unwrap();
//! assert_eq!(maturity.to_string(), "2030-01-31");
//! ```

use chrono::{Datelike, Months, NaiveDate};
use std::fmt;
use std::ops::Sub;
use std::str::FromStr;

use super::error::DateError;

/// Type-safe date wrapper around chrono::NaiveDate.
///
/// Provides ISO 8601 serialisation and the date arithmetic needed
/// for observation schedules.
///
/// # Examples
///
/// ```
/// use note_core::types::time::Date;
///
/// let date = Date::from_ymd(2024, 6, 15).unwrap();
/// let parsed: Date = "2024-06-15".parse().unwrap();
/// assert_eq!(date, parsed);
///
/// let start = Date::from_ymd(2024, 1, 1).unwrap();
/// let end = Date::from_ymd(2024, 1, 11).unwrap();
/// assert_eq!(end - start, 10);
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Date(NaiveDate);

impl Date {
    /// Creates a Date from year, month, and day components.
    ///
    /// # Returns
    /// `Ok(Date)` if the date is valid, `Err(DateError::InvalidDate)` otherwise.
    ///
    /// # Examples
    ///
    /// ```
    /// use note_core::types::time::Date;
    ///
    /// assert!(Date::from_ymd(2024, 2, 29).is_ok());
    /// assert!(Date::from_ymd(2024, 2, 30).is_err());
    /// ```
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Result<Self, DateError> {
        NaiveDate::from_ymd_opt(year, month, day)
            .map(Date)
            .ok_or(DateError::InvalidDate { year, month, day })
    }

    /// Parses a date from ISO 8601 format (`YYYY-MM-DD`) or the compact
    /// `YYYYMMDD` form used by some price feeds.
    ///
    /// # Examples
    ///
    /// ```
    /// use note_core::types::time::Date;
    ///
    /// let dashed = Date::parse("2024-06-15").unwrap();
    /// let compact = Date::parse("20240615").unwrap();
    /// assert_eq!(dashed, compact);
    ///
    /// assert!(Date::parse("not-a-date").is_err());
    /// ```
    pub fn parse(s: &str) -> Result<Self, DateError> {
        let trimmed = s.trim();
        let format = if trimmed.contains('-') {
            "%Y-%m-%d"
        } else {
            "%Y%m%d"
        };
        NaiveDate::parse_from_str(trimmed, format)
            .map(Date)
            .map_err(|e| DateError::ParseError(format!("'{}': {}", s, e)))
    }

    /// Returns the year component.
    pub fn year(&self) -> i32 {
        self.0.year()
    }

    /// Returns the month component (1-12).
    pub fn month(&self) -> u32 {
        self.0.month()
    }

    /// Returns the day component (1-31).
    pub fn day(&self) -> u32 {
        self.0.day()
    }

    /// Adds calendar months, clamping to the last day of the target month.
    ///
    /// # Examples
    ///
    /// ```
    /// use note_core::types::time::Date;
    ///
    /// let date = Date::from_ymd(2024, 1, 31).unwrap();
    /// assert_eq!(date.add_months(1).unwrap(), Date::from_ymd(2024, 2, 29).unwrap());
    /// ```
    pub fn add_months(self, months: u32) -> Result<Self, DateError> {
        self.0
            .checked_add_months(Months::new(months))
            .map(Date)
            .ok_or_else(|| DateError::Overflow(format!("{} + {} months", self, months)))
    }

    /// Adds a maturity tenor.
    pub fn add_tenor(self, tenor: Tenor) -> Result<Self, DateError> {
        self.add_months(tenor.months())
    }
}

impl Sub for Date {
    type Output = i64;

    /// Returns the number of days between two dates.
    fn sub(self, other: Self) -> i64 {
        (self.0 - other.0).num_days()
    }
}

impl FromStr for Date {
    type Err = DateError;

    fn from_str(s: &str) -> Result<Self, DateError> {
        Date::parse(s)
    }
}

impl fmt::Display for Date {
    /// Formats the date as ISO 8601 (YYYY-MM-DD).
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

/// Product maturity tenor.
///
/// # Variants
/// - `Years(n)`: `n` whole years, written `nY`
/// - `Months(n)`: `n` calendar months, written `nM`
///
/// # Examples
///
/// ```
/// use note_core::types::time::Tenor;
///
/// assert_eq!("6Y".parse::<Tenor>().unwrap(), Tenor::Years(6));
/// assert_eq!("18M".parse::<Tenor>().unwrap().months(), 18);
/// assert!("6W".parse::<Tenor>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tenor {
    /// Whole years.
    Years(u32),
    /// Calendar months.
    Months(u32),
}

impl Tenor {
    /// Returns the tenor length in calendar months.
    pub fn months(&self) -> u32 {
        match self {
            Tenor::Years(years) => years.saturating_mul(12),
            Tenor::Months(months) => *months,
        }
    }
}

impl FromStr for Tenor {
    type Err = DateError;

    fn from_str(s: &str) -> Result<Self, DateError> {
        let trimmed = s.trim();
        let invalid = || DateError::InvalidTenor(s.to_string());

        let unit = trimmed.chars().last().ok_or_else(invalid)?;
        let count = &trimmed[..trimmed.len() - unit.len_utf8()];
        if count.is_empty() || !count.chars().all(|c| c.is_ascii_digit()) {
            return Err(invalid());
        }
        let count: u32 = count.parse().map_err(|_| invalid())?;

        match unit {
            'Y' | 'y' => Ok(Tenor::Years(count)),
            'M' | 'm' => Ok(Tenor::Months(count)),
            _ => Err(invalid()),
        }
    }
}

impl fmt::Display for Tenor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tenor::Years(n) => write!(f, "{}Y", n),
            Tenor::Months(n) => write!(f, "{}M", n),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_ymd_valid_and_invalid() {
        let date = Date::from_ymd(2024, 6, 15).unwrap();
        assert_eq!(date.year(), 2024);
        assert_eq!(date.month(), 6);
        assert_eq!(date.day(), 15);

        assert_eq!(
            Date::from_ymd(2023, 2, 29),
            Err(DateError::InvalidDate {
                year: 2023,
                month: 2,
                day: 29
            })
        );
    }

    #[test]
    fn test_parse_dashed_and_compact() {
        let expected = Date::from_ymd(1999, 9, 9).unwrap();
        assert_eq!(Date::parse("1999-09-09").unwrap(), expected);
        assert_eq!(Date::parse("19990909").unwrap(), expected);
        assert_eq!(Date::parse(" 1999-09-09 ").unwrap(), expected);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(matches!(Date::parse("2024-13-01"), Err(DateError::ParseError(_))));
        assert!(matches!(Date::parse(""), Err(DateError::ParseError(_))));
        assert!(matches!(Date::parse("June 1st"), Err(DateError::ParseError(_))));
    }

    #[test]
    fn test_display_roundtrip() {
        let date = Date::from_ymd(2024, 3, 5).unwrap();
        assert_eq!(date.to_string(), "2024-03-05");
        assert_eq!(date.to_string().parse::<Date>().unwrap(), date);
    }

    #[test]
    fn test_ordering_and_difference() {
        let a = Date::from_ymd(2024, 1, 1).unwrap();
        let b = Date::from_ymd(2024, 3, 1).unwrap();
        assert!(a < b);
        assert_eq!(b - a, 60);
        assert_eq!(a - b, -60);
    }

    #[test]
    fn test_add_months_clamps_to_month_end() {
        let date = Date::from_ymd(2023, 8, 31).unwrap();
        assert_eq!(date.add_months(6).unwrap(), Date::from_ymd(2024, 2, 29).unwrap());
        assert_eq!(date.add_months(0).unwrap(), date);
    }

    #[test]
    fn test_tenor_parse() {
        assert_eq!("6Y".parse::<Tenor>().unwrap(), Tenor::Years(6));
        assert_eq!("18m".parse::<Tenor>().unwrap(), Tenor::Months(18));
        assert_eq!("6Y".parse::<Tenor>().unwrap().months(), 72);

        for bad in ["", "Y", "6", "6W", "-6Y", "6.5Y", "Y6"] {
            assert_eq!(
                bad.parse::<Tenor>(),
                Err(DateError::InvalidTenor(bad.to_string())),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_tenor_display() {
        assert_eq!(Tenor::Years(6).to_string(), "6Y");
        assert_eq!(Tenor::Months(18).to_string(), "18M");
    }

    #[test]
    fn test_add_tenor() {
        let start = Date::from_ymd(2020, 5, 15).unwrap();
        assert_eq!(
            start.add_tenor(Tenor::Years(6)).unwrap(),
            Date::from_ymd(2026, 5, 15).unwrap()
        );
        assert_eq!(
            start.add_tenor(Tenor::Months(18)).unwrap(),
            Date::from_ymd(2021, 11, 15).unwrap()
        );
    }
}
