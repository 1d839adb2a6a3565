//! End-to-end scenarios: a picker and a text field kept in agreement.

use std::{cell::RefCell, rc::Rc};

use ecalendar::{
    CalendarDate, ChangeEvent, DatePickerState, DateTextSync, Mode, MonthGrid, ParseDateError,
    SourceId, SubmitOutcome, YearMonth,
};

fn date(year: i32, month: u32, day: u32) -> CalendarDate {
    CalendarDate::new(year, month, day).unwrap()
}

#[test]
fn browse_then_pick() {
    let mut state = DatePickerState::new(date(2023, 1, 1));

    let january: Vec<_> = state.grid().weeks().iter().map(|w| *w.cells()).collect();
    assert_eq!(january.len(), 5);
    assert_eq!(january[0], [1, 2, 3, 4, 5, 6, 7].map(Some));

    state.navigate_month(1);
    assert_eq!(state.displayed(), YearMonth::new(2023, 2).unwrap());
    assert_eq!(state.selected(), Some(date(2023, 1, 1)));
    assert_eq!(state.grid(), &MonthGrid::new(2023, 2).unwrap());
    assert_eq!(state.grid().position_of(1), Some((0, 3)), "starts on a Wednesday");

    state.select_day(15).unwrap();
    assert_eq!(state.selected(), Some(date(2023, 2, 15)));
    assert_eq!(state.displayed(), YearMonth::new(2023, 2).unwrap());
    assert_eq!(state.mode(), Mode::Synced);
}

#[test]
fn picker_and_field_stay_in_sync() {
    let source = SourceId::new("due_date");
    let mut state = DatePickerState::unselected(date(2023, 1, 10)).with_source(source);
    let mut field = DateTextSync::for_state(&state);

    let seen = Rc::new(RefCell::new(Vec::<ChangeEvent>::new()));
    let sink = Rc::clone(&seen);
    state.subscribe(move |event| sink.borrow_mut().push(*event));

    // Typing into the field moves the picker.
    "2024-02-29".clone_into(field.text_mut());
    assert_eq!(
        field.submit(&mut state),
        SubmitOutcome::Changed(date(2024, 2, 29))
    );
    assert_eq!(state.displayed(), YearMonth::new(2024, 2).unwrap());
    assert_eq!(state.highlighted_cell(), state.grid().position_of(29));

    // Picking in the grid rewrites the field.
    state.navigate_month(-1);
    state.select_day(5).unwrap();
    if let Some(event) = state.take_change() {
        field.apply_change(&event);
    }
    assert_eq!(field.text(), "2024-01-05");

    // Garbage is rejected and the last good value survives.
    "2024-02-30".clone_into(field.text_mut());
    assert!(field.submit(&mut state).is_rejected());
    assert_eq!(state.selected(), Some(date(2024, 1, 5)));
    assert_eq!(
        field.last_error(),
        Some(&ParseDateError::NonexistentDate("2024-02-30".to_owned()))
    );

    let values: Vec<_> = seen.borrow().iter().map(|event| event.value).collect();
    assert_eq!(values, [Some(date(2024, 2, 29)), Some(date(2024, 1, 5))]);
    assert!(seen.borrow().iter().all(|event| event.source == source));
}

#[test]
fn two_pickers_are_told_apart() {
    let mut start = DatePickerState::new(date(2023, 6, 1)).with_source(SourceId::new("start"));
    let mut end = DatePickerState::new(date(2023, 6, 30)).with_source(SourceId::new("end"));

    start.select_day(2).unwrap();
    end.select_day(29).unwrap();

    let start_event = start.take_change().unwrap();
    let end_event = end.take_change().unwrap();
    assert_ne!(start_event.source, end_event.source);
    assert_eq!(start_event.source, SourceId::new("start"));
}

#[test]
fn leap_day_clamp_survives_until_reselected() {
    let mut state = DatePickerState::new(date(2024, 2, 29));
    state.navigate_year(1);
    state.navigate_year(3);
    assert_eq!(state.cursor(), date(2028, 2, 28));

    state.select_day(29).unwrap();
    state.navigate_year(-4);
    assert_eq!(state.cursor(), date(2024, 2, 29));
}
