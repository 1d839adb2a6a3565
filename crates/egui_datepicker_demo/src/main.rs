//! A date picker and a date input kept in agreement.

#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")] // hide console window on Windows in release

use ecalendar::{CalendarDate, ChangeEvent, DatePickerState, DateTextSync, SourceId};
use eframe::egui;
use egui_datepicker::{DateInput, DatePicker};

fn main() -> eframe::Result {
    env_logger::init(); // Log to stderr (if you run with `RUST_LOG=debug`).

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([420.0, 360.0]),
        ..Default::default()
    };

    let today = CalendarDate::today();
    let mut picker = DatePickerState::new(today).with_source(SourceId::new("picker"));
    let mut input = DatePickerState::unselected(today).with_source(SourceId::new("input"));
    let mut text = DateTextSync::for_state(&input)
        .with_alert(|err| log::info!("Not a date: {err}"));

    eframe::run_simple_native("Date picker demo", options, move |ctx, _frame| {
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.add(DatePicker::new(&mut picker).id_salt("picker").today(today));
                ui.separator();
                ui.add(DateInput::new(&mut text, &mut input).id_salt("input"));
            });
        });

        if let Some(ChangeEvent {
            source,
            value: Some(date),
        }) = picker.take_change()
        {
            log::debug!("{source:?} picked {date}");
            if input.set_value(date) {
                text.sync_from(&input);
            }
        }
        if let Some(ChangeEvent {
            source,
            value: Some(date),
        }) = input.take_change()
        {
            log::debug!("{source:?} set to {date}");
            picker.set_value(date);
        }
    })
}
