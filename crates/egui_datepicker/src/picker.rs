use ecalendar::{CalendarDate, DatePickerState, Weekday, short_weekday_name};
use egui::{
    Align, Button, Color32, Grid, Id, InnerResponse, Layout, Response, RichText, Ui, Vec2, Widget,
    vec2,
};

/// A calendar showing one month, with arrows for paging through months and years.
///
/// Clicking a day commits it to the [`DatePickerState`], which notifies its
/// listeners. The returned [`Response`] is marked as changed when that happens.
///
/// ```
/// # egui::__run_test_ui(|ui| {
/// # use ecalendar::{CalendarDate, DatePickerState};
/// # let mut state = DatePickerState::new(CalendarDate::new(2023, 1, 1).unwrap());
/// if ui.add(egui_datepicker::DatePicker::new(&mut state)).changed() {
///     println!("Picked {:?}", state.selected());
/// }
/// # });
/// ```
pub struct DatePicker<'a> {
    state: &'a mut DatePickerState,
    id_salt: Option<Id>,
    header: bool,
    calendar_week: bool,
    highlight_weekends: bool,
    today: Option<CalendarDate>,
}

impl<'a> DatePicker<'a> {
    pub fn new(state: &'a mut DatePickerState) -> Self {
        Self {
            state,
            id_salt: None,
            header: true,
            calendar_week: false,
            highlight_weekends: true,
            today: None,
        }
    }

    /// Add id source.
    /// Must be set if multiple date pickers are in the same Ui.
    #[inline]
    pub fn id_salt(mut self, id_salt: impl std::hash::Hash) -> Self {
        self.id_salt = Some(Id::new(id_salt));
        self
    }

    /// Show the year and the `"Sun, Jan 01"` title above the arrows. (Default: true)
    #[inline]
    pub fn header(mut self, header: bool) -> Self {
        self.header = header;
        self
    }

    /// Show the ISO week number in front of each row. (Default: false)
    #[inline]
    pub fn calendar_week(mut self, calendar_week: bool) -> Self {
        self.calendar_week = calendar_week;
        self
    }

    /// Highlight weekend days. (Default: true)
    #[inline]
    pub fn highlight_weekends(mut self, highlight_weekends: bool) -> Self {
        self.highlight_weekends = highlight_weekends;
        self
    }

    /// Encircle this date in the grid. (Default: none)
    #[inline]
    pub fn today(mut self, today: CalendarDate) -> Self {
        self.today = Some(today);
        self
    }
}

impl Widget for DatePicker<'_> {
    fn ui(self, ui: &mut Ui) -> Response {
        self.show(ui).response
    }
}

impl DatePicker<'_> {
    /// Like [`Widget::ui`], but `inner` tells whether a day was clicked,
    /// even one that was already committed.
    pub fn show(self, ui: &mut Ui) -> InnerResponse<bool> {
        let Self {
            state,
            id_salt,
            header,
            calendar_week,
            highlight_weekends,
            today,
        } = self;

        let id = ui.make_persistent_id(id_salt);
        let committed_before = state.selected();

        let InnerResponse {
            inner: clicked_day,
            mut response,
        } = ui.vertical(|ui| {
            if header {
                ui.label(state.year_label());
                ui.label(RichText::new(state.title()).strong());
                ui.add_space(4.0);
            }

            navigation(ui, state);

            let picked = day_grid(
                ui,
                id.with("days"),
                state,
                calendar_week,
                highlight_weekends,
                today,
            );
            if let Some(day) = picked {
                if let Err(err) = state.select_day(day) {
                    log::warn!("Ignoring click on day {day}: {err}");
                }
            }
            picked.is_some()
        });

        // Labels above the grid were painted with the old state this frame.
        if !state.take_redraw().is_empty() {
            ui.ctx().request_repaint();
        }

        if state.selected() != committed_before {
            response.mark_changed();
        }
        InnerResponse::new(clicked_day, response)
    }
}

fn navigation(ui: &mut Ui, state: &mut DatePickerState) {
    ui.horizontal(|ui| {
        if ui.button("<").on_hover_text("Previous month").clicked() {
            state.navigate_month(-1);
        }
        ui.add_enabled(
            false,
            Button::new(state.month_label()).min_size(vec2(90.0, 0.0)),
        );
        if ui.button(">").on_hover_text("Next month").clicked() {
            state.navigate_month(1);
        }

        ui.add_space(8.0);

        if ui.button("<<").on_hover_text("Previous year").clicked() {
            state.navigate_year(-1);
        }
        ui.add_enabled(false, Button::new(state.year_label()));
        if ui.button(">>").on_hover_text("Next year").clicked() {
            state.navigate_year(1);
        }
    });
}

/// Returns the day that was clicked, if any.
fn day_grid(
    ui: &mut Ui,
    id: Id,
    state: &DatePickerState,
    calendar_week: bool,
    highlight_weekends: bool,
    today: Option<CalendarDate>,
) -> Option<u32> {
    let grid = state.grid();
    let highlighted = state.highlighted_cell();
    let cell_size = vec2(28.0, 20.0);

    Grid::new(id)
        .num_columns(if calendar_week { 8 } else { 7 })
        .spacing(Vec2::splat(2.0))
        .show(ui, |ui| {
            if calendar_week {
                ui.label("Week");
            }
            for weekday in grid.header() {
                ui.with_layout(Layout::top_down(Align::Center), |ui| {
                    ui.weak(short_weekday_name(weekday));
                });
            }
            ui.end_row();

            let mut picked = None;
            for (row, week) in grid.weeks().iter().enumerate() {
                if calendar_week {
                    ui.weak(week.iso_number().to_string());
                }
                for (column, cell) in week.cells().iter().enumerate() {
                    let Some(day) = *cell else {
                        ui.label("");
                        continue;
                    };

                    let weekend = matches!(
                        grid.weekday_of_column(column),
                        Weekday::Sat | Weekday::Sun
                    );
                    let fill_color = if highlighted == Some((row, column)) {
                        ui.visuals().selection.bg_fill
                    } else if highlight_weekends && weekend {
                        if ui.visuals().dark_mode {
                            Color32::DARK_RED
                        } else {
                            Color32::LIGHT_RED
                        }
                    } else {
                        ui.visuals().extreme_bg_color
                    };

                    let button_response = ui.add(
                        Button::new(day.to_string())
                            .fill(fill_color)
                            .min_size(cell_size),
                    );

                    let is_today = today.is_some_and(|today| {
                        grid.year_month().contains(today) && today.day() == day
                    });
                    if is_today {
                        let stroke = ui.visuals().widgets.inactive.fg_stroke;
                        ui.painter()
                            .circle_stroke(button_response.rect.center(), 9.0, stroke);
                    }

                    if button_response.clicked() {
                        picked = Some(day);
                    }
                }
                ui.end_row();
            }
            picked
        })
        .inner
}
