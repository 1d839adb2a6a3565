//! Calendar state for date picker widgets, independent of any GUI framework.
//!
//! * [`MonthGrid`] lays out the days of a month in weekday columns.
//! * [`DatePickerState`] holds the displayed month and the committed date,
//!   and notifies listeners when the committed date changes.
//! * [`DateTextSync`] binds a `YYYY-MM-DD` text field to a [`DatePickerState`].
//!
//! Only the proleptic Gregorian calendar is supported, for years `1..=9999`.
//! There are no timezones: "today" is whatever the caller says it is
//! (or [`CalendarDate::today`] for the local clock).
//!
//! ## Feature flags
#![cfg_attr(feature = "document-features", doc = document_features::document_features!())]
//!

#![forbid(unsafe_code)]

mod date;
mod error;
mod grid;
mod id;
mod state;
mod text_sync;

pub use chrono::Weekday;

pub use crate::{
    date::{CalendarDate, MAX_YEAR, MIN_YEAR, YearMonth, days_in_month, is_leap_year},
    error::{Error, ParseDateError},
    grid::{MonthGrid, Week, short_weekday_name, weekday_header},
    id::SourceId,
    state::{
        ChangeEvent, DatePickerOptions, DatePickerState, ListenerId, Mode, NotifyPolicy, Redraw,
    },
    text_sync::{DateTextSync, SubmitOutcome},
};
