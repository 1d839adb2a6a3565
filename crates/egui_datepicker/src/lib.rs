//! Date picker widgets for [`egui`](https://github.com/emilk/egui).
//!
//! The widgets do not own any calendar state. You keep an
//! [`ecalendar::DatePickerState`] (and, for [`DateInput`], an
//! [`ecalendar::DateTextSync`]) in your app and hand the widgets a
//! mutable reference each frame:
//!
//! ```
//! use ecalendar::{CalendarDate, DatePickerState, DateTextSync};
//! use egui_datepicker::{DateInput, DatePicker};
//!
//! # egui::__run_test_ui(|ui| {
//! let mut picker = DatePickerState::new(CalendarDate::new(2023, 1, 1).unwrap());
//! ui.add(DatePicker::new(&mut picker));
//!
//! let mut input = DatePickerState::unselected(CalendarDate::new(2023, 1, 1).unwrap());
//! let mut text = DateTextSync::for_state(&input);
//! ui.add(DateInput::new(&mut text, &mut input));
//! # });
//! ```
//!
//! ## Feature flags
#![cfg_attr(feature = "document-features", doc = document_features::document_features!())]
//!

#![forbid(unsafe_code)]

mod input;
mod picker;

pub use ecalendar;

pub use crate::{input::DateInput, picker::DatePicker};
