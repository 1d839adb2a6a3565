use std::{fmt, str::FromStr};

use chrono::{Datelike as _, NaiveDate, Weekday};

use crate::{Error, ParseDateError};

/// The first year a [`CalendarDate`] can represent.
pub const MIN_YEAR: i32 = 1;

/// The last year a [`CalendarDate`] can represent.
///
/// Keeps every date printable as a four digit `YYYY`.
pub const MAX_YEAR: i32 = 9999;

/// Gregorian leap year rule.
#[inline]
pub fn is_leap_year(year: i32) -> bool {
    year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
}

/// Number of days in the given month.
///
/// # Errors
/// If `month` is not in `1..=12` or `year` is not in [`MIN_YEAR`]`..=`[`MAX_YEAR`].
pub fn days_in_month(year: i32, month: u32) -> Result<u32, Error> {
    YearMonth::new(year, month).map(|year_month| year_month.days())
}

fn check_year(year: i32) -> Result<(), Error> {
    if (MIN_YEAR..=MAX_YEAR).contains(&year) {
        Ok(())
    } else {
        Err(Error::YearOutOfRange(year))
    }
}

// ----------------------------------------------------------------------------

/// A month of a specific year, e.g. the month shown by a date picker.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(try_from = "(i32, u32)", into = "(i32, u32)"))]
pub struct YearMonth {
    // Field order gives calendar ordering.
    year: i32,
    month: u32,
}

impl YearMonth {
    pub const MIN: Self = Self {
        year: MIN_YEAR,
        month: 1,
    };

    pub const MAX: Self = Self {
        year: MAX_YEAR,
        month: 12,
    };

    /// # Errors
    /// If `month` is not in `1..=12` or `year` is out of range.
    pub fn new(year: i32, month: u32) -> Result<Self, Error> {
        if !(1..=12).contains(&month) {
            return Err(Error::InvalidMonth(month));
        }
        check_year(year)?;
        Ok(Self { year, month })
    }

    #[inline]
    pub fn year(self) -> i32 {
        self.year
    }

    /// `1..=12`
    #[inline]
    pub fn month(self) -> u32 {
        self.month
    }

    /// Number of days in this month, 28 to 31.
    pub fn days(self) -> u32 {
        match self.month {
            4 | 6 | 9 | 11 => 30,
            2 if is_leap_year(self.year) => 29,
            2 => 28,
            _ => 31,
        }
    }

    /// Is `day` a day of this month?
    #[inline]
    pub fn has_day(self, day: u32) -> bool {
        (1..=self.days()).contains(&day)
    }

    /// The given day of this month.
    ///
    /// # Errors
    /// If the day does not exist in this month.
    pub fn date(self, day: u32) -> Result<CalendarDate, Error> {
        if !self.has_day(day) {
            return Err(Error::InvalidDay {
                year: self.year,
                month: self.month,
                day,
            });
        }
        NaiveDate::from_ymd_opt(self.year, self.month, day)
            .map(CalendarDate)
            .ok_or(Error::InvalidDay {
                year: self.year,
                month: self.month,
                day,
            })
    }

    /// The given day of this month, or the last day of the month if `day` is past it.
    pub fn date_clamped(self, day: u32) -> CalendarDate {
        let day = day.clamp(1, self.days());
        // Both the month and the clamped day are valid, so this cannot fail.
        CalendarDate(
            NaiveDate::from_ymd_opt(self.year, self.month, day).unwrap_or(NaiveDate::MIN),
        )
    }

    /// The first day of the month.
    #[inline]
    pub fn first_day(self) -> CalendarDate {
        self.date_clamped(1)
    }

    /// Move `delta` months forward (or backward if negative), rolling over the year.
    ///
    /// Saturates at [`Self::MIN`] and [`Self::MAX`].
    pub fn add_months(self, delta: i32) -> Self {
        let index = i64::from(self.year) * 12 + i64::from(self.month - 1) + i64::from(delta);
        let min = i64::from(MIN_YEAR) * 12;
        let max = i64::from(MAX_YEAR) * 12 + 11;
        let index = index.clamp(min, max);
        Self {
            year: (index / 12) as i32,
            month: (index % 12) as u32 + 1,
        }
    }

    /// Move `delta` years forward (or backward if negative), keeping the month.
    ///
    /// Saturates at [`MIN_YEAR`] and [`MAX_YEAR`].
    pub fn add_years(self, delta: i32) -> Self {
        Self {
            year: self.year.saturating_add(delta).clamp(MIN_YEAR, MAX_YEAR),
            month: self.month,
        }
    }

    /// Does `date` fall within this month?
    #[inline]
    pub fn contains(self, date: CalendarDate) -> bool {
        date.year_month() == self
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl TryFrom<(i32, u32)> for YearMonth {
    type Error = Error;

    fn try_from((year, month): (i32, u32)) -> Result<Self, Self::Error> {
        Self::new(year, month)
    }
}

impl From<YearMonth> for (i32, u32) {
    fn from(year_month: YearMonth) -> Self {
        (year_month.year, year_month.month)
    }
}

// ----------------------------------------------------------------------------

/// A valid Gregorian calendar date without time or timezone.
///
/// Ordered in calendar order. Formats (and parses) as `YYYY-MM-DD`.
///
/// ```
/// # use ecalendar::CalendarDate;
/// let date: CalendarDate = "2024-02-29".parse().unwrap();
/// assert_eq!(date.day(), 29);
/// assert_eq!(date.to_string(), "2024-02-29");
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(try_from = "NaiveDate", into = "NaiveDate"))]
pub struct CalendarDate(NaiveDate);

impl CalendarDate {
    /// # Errors
    /// If the triple is not a date on the calendar, or the year is out of range.
    pub fn new(year: i32, month: u32, day: u32) -> Result<Self, Error> {
        YearMonth::new(year, month)?.date(day)
    }

    /// Today, according to the local clock.
    ///
    /// Read at call time, so call it when the picker is created, not once per program.
    pub fn today() -> Self {
        Self(chrono::Local::now().date_naive())
    }

    #[inline]
    pub fn year(self) -> i32 {
        self.0.year()
    }

    #[inline]
    pub fn month(self) -> u32 {
        self.0.month()
    }

    #[inline]
    pub fn day(self) -> u32 {
        self.0.day()
    }

    #[inline]
    pub fn year_month(self) -> YearMonth {
        YearMonth {
            year: self.year(),
            month: self.month(),
        }
    }

    #[inline]
    pub fn weekday(self) -> Weekday {
        self.0.weekday()
    }

    /// ISO 8601 week number, `1..=53`.
    #[inline]
    pub fn iso_week(self) -> u32 {
        self.0.iso_week().week()
    }

    #[inline]
    pub fn is_weekend(self) -> bool {
        matches!(self.weekday(), Weekday::Sat | Weekday::Sun)
    }

    /// The same month, a different day.
    ///
    /// # Errors
    /// If the day does not exist in this month.
    pub fn with_day(self, day: u32) -> Result<Self, Error> {
        self.year_month().date(day)
    }

    /// The underlying [`chrono`] date.
    #[inline]
    pub fn naive(self) -> NaiveDate {
        self.0
    }

    /// Format with a [`chrono::format::strftime`] string, e.g. `"%a, %b %d"`.
    pub fn format(self, fmt: &str) -> String {
        self.0.format(fmt).to_string()
    }

    /// Parse a zero padded `YYYY-MM-DD` date, ignoring surrounding whitespace.
    ///
    /// # Errors
    /// If the text is empty, not shaped like `YYYY-MM-DD`, or names a day that does not exist.
    pub fn parse_iso(text: &str) -> Result<Self, ParseDateError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(ParseDateError::Empty);
        }

        let bytes = text.as_bytes();
        let well_formed = bytes.len() == 10
            && bytes.iter().enumerate().all(|(i, &b)| {
                if i == 4 || i == 7 {
                    b == b'-'
                } else {
                    b.is_ascii_digit()
                }
            });
        if !well_formed {
            return Err(ParseDateError::Malformed(text.to_owned()));
        }

        let number = |digits: &[u8]| {
            digits
                .iter()
                .fold(0_u32, |acc, &b| acc * 10 + u32::from(b - b'0'))
        };
        let year = number(&bytes[0..4]) as i32;
        let month = number(&bytes[5..7]);
        let day = number(&bytes[8..10]);

        Self::new(year, month, day)
            .ok()
            .ok_or_else(|| ParseDateError::NonexistentDate(text.to_owned()))
    }
}

impl fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year(), self.month(), self.day())
    }
}

impl FromStr for CalendarDate {
    type Err = ParseDateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_iso(s)
    }
}

impl TryFrom<NaiveDate> for CalendarDate {
    type Error = Error;

    fn try_from(date: NaiveDate) -> Result<Self, Self::Error> {
        check_year(date.year())?;
        Ok(Self(date))
    }
}

impl From<CalendarDate> for NaiveDate {
    #[inline]
    fn from(date: CalendarDate) -> Self {
        date.0
    }
}

// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leap_years() {
        assert!(is_leap_year(2024));
        assert!(is_leap_year(2000));
        assert!(!is_leap_year(1900));
        assert!(!is_leap_year(2023));
    }

    #[test]
    fn month_lengths_match_chrono() {
        for year in [1, 1600, 1900, 1999, 2000, 2023, 2024, 2100, 9999] {
            for month in 1..=12 {
                let ours = days_in_month(year, month).unwrap();
                let first = NaiveDate::from_ymd_opt(year, month, 1).unwrap();
                let next = first
                    .checked_add_months(chrono::Months::new(1))
                    .unwrap_or_else(|| NaiveDate::from_ymd_opt(10000, 1, 1).unwrap());
                let chrono_days = (next - first).num_days() as u32;
                assert_eq!(ours, chrono_days, "{year}-{month}");
            }
        }
    }

    #[test]
    fn invalid_arguments() {
        assert_eq!(YearMonth::new(2023, 0), Err(Error::InvalidMonth(0)));
        assert_eq!(YearMonth::new(2023, 13), Err(Error::InvalidMonth(13)));
        assert_eq!(YearMonth::new(0, 1), Err(Error::YearOutOfRange(0)));
        assert_eq!(
            CalendarDate::new(2023, 2, 29),
            Err(Error::InvalidDay {
                year: 2023,
                month: 2,
                day: 29
            })
        );
        assert!(CalendarDate::new(2023, 4, 0).is_err());
    }

    #[test]
    fn add_months_rolls_over_years() {
        let december = YearMonth::new(2023, 12).unwrap();
        assert_eq!(december.add_months(1), YearMonth::new(2024, 1).unwrap());
        assert_eq!(december.add_months(13), YearMonth::new(2025, 1).unwrap());

        let january = YearMonth::new(2023, 1).unwrap();
        assert_eq!(january.add_months(-1), YearMonth::new(2022, 12).unwrap());
        assert_eq!(january.add_months(-25), YearMonth::new(2020, 12).unwrap());
    }

    #[test]
    fn add_months_saturates() {
        assert_eq!(YearMonth::MIN.add_months(-1), YearMonth::MIN);
        assert_eq!(YearMonth::MAX.add_months(1), YearMonth::MAX);
        assert_eq!(YearMonth::MAX.add_years(i32::MAX), YearMonth::MAX);
        assert_eq!(YearMonth::MIN.add_years(i32::MIN), YearMonth::MIN);
    }

    #[test]
    fn ordering_is_calendar_order() {
        let a = CalendarDate::new(2023, 12, 31).unwrap();
        let b = CalendarDate::new(2024, 1, 1).unwrap();
        let c = CalendarDate::new(2024, 2, 1).unwrap();
        assert!(a < b && b < c);
        assert!(YearMonth::new(2023, 12).unwrap() < YearMonth::new(2024, 1).unwrap());
    }

    #[test]
    fn date_clamped() {
        let february = YearMonth::new(2023, 2).unwrap();
        assert_eq!(february.date_clamped(31).day(), 28);
        assert_eq!(february.date_clamped(0).day(), 1);
    }

    #[test]
    fn formatting_is_zero_padded() {
        let date = CalendarDate::new(7, 3, 4).unwrap();
        assert_eq!(date.to_string(), "0007-03-04");
        assert_eq!(date.year_month().to_string(), "0007-03");
        assert_eq!(
            CalendarDate::new(2023, 1, 1).unwrap().format("%a, %b %d"),
            "Sun, Jan 01"
        );
    }

    #[test]
    fn strict_parsing() {
        assert_eq!(
            CalendarDate::parse_iso("2024-02-29").ok(),
            CalendarDate::new(2024, 2, 29).ok()
        );
        assert_eq!(
            CalendarDate::parse_iso("  2024-02-29\n").map(|d| d.day()),
            Ok(29)
        );
        assert_eq!(CalendarDate::parse_iso(""), Err(ParseDateError::Empty));
        assert_eq!(CalendarDate::parse_iso("   "), Err(ParseDateError::Empty));

        for malformed in ["2024-2-29", "24-02-29", "2024/02/29", "2024-02-29T00:00", "+202-01-01"] {
            assert_eq!(
                CalendarDate::parse_iso(malformed),
                Err(ParseDateError::Malformed(malformed.to_owned())),
                "{malformed}"
            );
        }

        for nonexistent in ["2024-02-30", "2023-02-29", "2023-13-01", "2023-00-10", "0000-01-01"] {
            assert_eq!(
                CalendarDate::parse_iso(nonexistent),
                Err(ParseDateError::NonexistentDate(nonexistent.to_owned())),
                "{nonexistent}"
            );
        }
    }

    #[test]
    fn naive_date_conversion_checks_range() {
        let ok = NaiveDate::from_ymd_opt(2023, 5, 6).unwrap();
        assert_eq!(CalendarDate::try_from(ok).map(NaiveDate::from), Ok(ok));

        let too_late = NaiveDate::from_ymd_opt(10_000, 1, 1).unwrap();
        assert_eq!(
            CalendarDate::try_from(too_late),
            Err(Error::YearOutOfRange(10_000))
        );
    }
}
