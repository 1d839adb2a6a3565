/// A calendar operation was called with an argument outside its domain.
///
/// These are programming errors on the caller's side (an out-of-range month,
/// a day that does not exist in the displayed month, ...), so the operation
/// is rejected and nothing is changed.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("month {0} is not in the range 1..=12")]
    InvalidMonth(u32),

    #[error("day {day} does not exist in {year:04}-{month:02}")]
    InvalidDay { year: i32, month: u32, day: u32 },

    #[error("year {0} is outside the supported range 1..=9999")]
    YearOutOfRange(i32),
}

/// User typed text that is not a `YYYY-MM-DD` calendar date.
///
/// This is a soft failure: [`crate::DateTextSync`] reports it to the user and
/// keeps the previous value.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ParseDateError {
    #[error("no date was entered")]
    Empty,

    #[error("expected a date formatted as YYYY-MM-DD, got {0:?}")]
    Malformed(String),

    #[error("{0:?} is not a date on the calendar")]
    NonexistentDate(String),
}
