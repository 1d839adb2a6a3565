use chrono::Weekday;

use crate::{CalendarDate, Error, YearMonth};

/// One row of a [`MonthGrid`]: seven cells, each a day of the month or empty.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct Week {
    number: u32,
    days: [Option<u32>; 7],
}

impl Week {
    /// The ISO 8601 week number of the first in-month day of this row.
    #[inline]
    pub fn iso_number(&self) -> u32 {
        self.number
    }

    /// The seven cells in column order.
    #[inline]
    pub fn cells(&self) -> &[Option<u32>; 7] {
        &self.days
    }

    /// The days of the month in this row, left to right.
    pub fn days(&self) -> impl Iterator<Item = u32> + '_ {
        self.days.iter().flatten().copied()
    }
}

/// The days of one month laid out in weekday columns.
///
/// Column 0 is the configured first weekday (Sunday unless told otherwise).
/// Cells before day 1 and after the last day are empty.
///
/// ```
/// # use ecalendar::MonthGrid;
/// let grid = MonthGrid::new(2023, 1).unwrap(); // starts on a Sunday
/// assert_eq!(grid.weeks().len(), 5);
/// assert_eq!(grid.weeks()[0].cells()[0], Some(1));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct MonthGrid {
    year_month: YearMonth,
    first_weekday: Weekday,
    weeks: Vec<Week>,
}

impl MonthGrid {
    /// Sunday-first grid for the given month.
    ///
    /// # Errors
    /// If `month` is not in `1..=12` or the year is out of range.
    pub fn new(year: i32, month: u32) -> Result<Self, Error> {
        Self::with_first_weekday(year, month, Weekday::Sun)
    }

    /// # Errors
    /// If `month` is not in `1..=12` or the year is out of range.
    pub fn with_first_weekday(year: i32, month: u32, first_weekday: Weekday) -> Result<Self, Error> {
        Ok(Self::for_month(YearMonth::new(year, month)?, first_weekday))
    }

    /// Lay out an already validated month.
    pub fn for_month(year_month: YearMonth, first_weekday: Weekday) -> Self {
        let first = year_month.first_day();
        let days_in_month = year_month.days();
        let leading_blanks = ((first.weekday().num_days_from_monday() + 7
            - first_weekday.num_days_from_monday())
            % 7) as usize;

        let mut weeks = Vec::with_capacity(6);
        let mut days = [None; 7];
        let mut column = leading_blanks;
        for day in 1..=days_in_month {
            days[column] = Some(day);
            column += 1;
            if column == 7 || day == days_in_month {
                let first_in_row = days.iter().flatten().next().copied().unwrap_or(day);
                weeks.push(Week {
                    number: year_month.date_clamped(first_in_row).iso_week(),
                    days,
                });
                days = [None; 7];
                column = 0;
            }
        }

        log::trace!(
            "Laid out {year_month} in {} weeks, starting with {first_weekday}",
            weeks.len()
        );

        Self {
            year_month,
            first_weekday,
            weeks,
        }
    }

    #[inline]
    pub fn year_month(&self) -> YearMonth {
        self.year_month
    }

    #[inline]
    pub fn first_weekday(&self) -> Weekday {
        self.first_weekday
    }

    /// Between 4 and 6 rows.
    #[inline]
    pub fn weeks(&self) -> &[Week] {
        &self.weeks
    }

    /// The weekday shown in the given column (`0..7`).
    pub fn weekday_of_column(&self, column: usize) -> Weekday {
        (0..column % 7).fold(self.first_weekday, |weekday, _| weekday.succ())
    }

    /// The seven weekdays in column order.
    pub fn header(&self) -> [Weekday; 7] {
        weekday_header(self.first_weekday)
    }

    /// Row and column of the given day, if it is a day of this month.
    pub fn position_of(&self, day: u32) -> Option<(usize, usize)> {
        self.weeks.iter().enumerate().find_map(|(row, week)| {
            week.days
                .iter()
                .position(|&cell| cell == Some(day))
                .map(|column| (row, column))
        })
    }

    /// Row and column of `date`, if it lies in this month.
    pub fn position_of_date(&self, date: CalendarDate) -> Option<(usize, usize)> {
        if self.year_month.contains(date) {
            self.position_of(date.day())
        } else {
            None
        }
    }

    /// The day in the given cell, if any.
    pub fn day_at(&self, row: usize, column: usize) -> Option<u32> {
        self.weeks
            .get(row)
            .and_then(|week| week.days.get(column).copied().flatten())
    }
}

/// The seven weekdays in column order for a grid starting on `first_weekday`.
pub fn weekday_header(first_weekday: Weekday) -> [Weekday; 7] {
    let mut header = [first_weekday; 7];
    for column in 1..7 {
        header[column] = header[column - 1].succ();
    }
    header
}

/// Two letter weekday name, e.g. `"Mo"`.
pub fn short_weekday_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "Mo",
        Weekday::Tue => "Tu",
        Weekday::Wed => "We",
        Weekday::Thu => "Th",
        Weekday::Fri => "Fr",
        Weekday::Sat => "Sa",
        Weekday::Sun => "Su",
    }
}
