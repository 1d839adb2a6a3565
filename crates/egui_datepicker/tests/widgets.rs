use ecalendar::{CalendarDate, DatePickerState, DateTextSync, Mode, ParseDateError};
use egui::accesskit::Role;
use egui_datepicker::{DateInput, DatePicker};
use egui_kittest::{Harness, kittest::Queryable as _};

fn date(year: i32, month: u32, day: u32) -> CalendarDate {
    CalendarDate::new(year, month, day).unwrap()
}

fn picker_harness(initial: CalendarDate) -> Harness<'static, DatePickerState> {
    Harness::new_ui_state(
        |ui, state: &mut DatePickerState| {
            ui.add(DatePicker::new(state));
        },
        DatePickerState::new(initial),
    )
}

#[test]
fn month_arrows_only_move_the_display() {
    let mut harness = picker_harness(date(2023, 1, 1));

    harness.get_by_label(">").click();
    harness.run();

    let state = harness.state();
    assert_eq!(state.displayed().month(), 2);
    assert_eq!(state.selected(), Some(date(2023, 1, 1)));
    assert_eq!(state.mode(), Mode::Browsing);
    harness.get_by_label("February");

    for _ in 0..2 {
        harness.get_by_label("<").click();
        harness.run();
    }
    assert_eq!(harness.state().displayed().month(), 12);
    assert_eq!(harness.state().displayed().year(), 2022);
}

#[test]
fn year_arrows_clamp_leap_day() {
    let mut harness = picker_harness(date(2024, 2, 29));

    harness.get_by_label(">>").click();
    harness.run();

    assert_eq!(harness.state().displayed().year(), 2025);
    assert_eq!(harness.state().cursor(), date(2025, 2, 28));
    harness.get_by_label("Fri, Feb 28");
}

#[test]
fn clicking_a_day_commits_it() {
    let mut harness = picker_harness(date(2023, 1, 1));

    harness.get_by_label(">").click();
    harness.run();
    harness.get_by_label("15").click();
    harness.run();

    let state = harness.state();
    assert_eq!(state.selected(), Some(date(2023, 2, 15)));
    assert_eq!(state.mode(), Mode::Synced);
    assert_eq!(state.highlighted_cell(), Some((2, 3)));
}

struct Form {
    state: DatePickerState,
    text: DateTextSync,
}

fn form_harness(state: DatePickerState) -> Harness<'static, Form> {
    let text = DateTextSync::for_state(&state);
    Harness::new_ui_state(
        |ui, form: &mut Form| {
            ui.add(DateInput::new(&mut form.text, &mut form.state));
        },
        Form { state, text },
    )
}

fn type_and_submit(harness: &mut Harness<'_, Form>, text: &str) {
    harness.get_by_role(Role::TextInput).focus();
    harness.run();
    harness.get_by_role(Role::TextInput).type_text(text);
    harness.run();
    harness.key_press(egui::Key::Enter);
    harness.run();
}

#[test]
fn date_input_popup_writes_the_field() {
    let mut harness = form_harness(DatePickerState::unselected(date(2023, 2, 1)));
    assert_eq!(harness.state().text.text(), "");

    harness.get_by_label("📆").click();
    harness.run();

    harness.get_by_label("14").click();
    harness.run();

    let form = harness.state();
    assert_eq!(form.state.selected(), Some(date(2023, 2, 14)));
    assert_eq!(form.text.text(), "2023-02-14");
    assert!(
        harness.query_by_label("14").is_none(),
        "picking a day closes the popup"
    );
}

#[test]
fn picking_the_selected_day_closes_the_popup() {
    let mut harness = form_harness(DatePickerState::new(date(2023, 2, 14)));

    harness.get_by_label("📆").click();
    harness.run();
    harness.get_by_label("14").click();
    harness.run();

    assert_eq!(harness.state().state.selected(), Some(date(2023, 2, 14)));
    assert!(harness.query_by_label("14").is_none());
}

#[test]
fn typed_nonexistent_date_is_rejected() {
    let mut harness = form_harness(DatePickerState::unselected(date(2024, 2, 1)));

    type_and_submit(&mut harness, "2024-02-30");

    let form = harness.state();
    assert_eq!(form.state.selected(), None);
    assert_eq!(form.text.text(), "2024-02-30");
    assert!(matches!(
        form.text.last_error(),
        Some(ParseDateError::NonexistentDate(_))
    ));
}

#[test]
fn typed_leap_day_is_committed() {
    let mut harness = form_harness(DatePickerState::unselected(date(2024, 1, 1)));

    type_and_submit(&mut harness, "2024-02-29");

    let form = harness.state();
    assert_eq!(form.state.selected(), Some(date(2024, 2, 29)));
    assert_eq!(form.state.displayed().month(), 2);
    assert_eq!(form.text.text(), "2024-02-29");
    assert_eq!(form.text.last_error(), None);
}
