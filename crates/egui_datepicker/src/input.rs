use ecalendar::{DatePickerState, DateTextSync};
use egui::{Area, Button, Frame, Id, Key, Order, Response, TextEdit, Ui, Widget};

use crate::DatePicker;

#[derive(Clone, Copy, Debug, Default)]
struct DateInputState {
    picker_visible: bool,
}

/// A `YYYY-MM-DD` text field with a button that opens a [`DatePicker`] popup.
///
/// Pressing Enter in the field commits the typed date. Text that is not a date
/// is shown in the error color and the previous value is kept.
/// Picking a day in the popup rewrites the field and closes the popup.
///
/// The returned [`Response`] is marked as changed when the committed value changes.
pub struct DateInput<'a> {
    sync: &'a mut DateTextSync,
    state: &'a mut DatePickerState,
    id_salt: Option<Id>,
    hint_text: String,
    desired_width: f32,
    show_button: bool,
}

impl<'a> DateInput<'a> {
    pub fn new(sync: &'a mut DateTextSync, state: &'a mut DatePickerState) -> Self {
        Self {
            sync,
            state,
            id_salt: None,
            hint_text: "Date".to_owned(),
            desired_width: 100.0,
            show_button: true,
        }
    }

    /// Add id source.
    /// Must be set if multiple date inputs are in the same Ui.
    #[inline]
    pub fn id_salt(mut self, id_salt: impl std::hash::Hash) -> Self {
        self.id_salt = Some(Id::new(id_salt));
        self
    }

    /// Shown in the empty field. (Default: "Date")
    #[inline]
    pub fn hint_text(mut self, hint_text: impl Into<String>) -> Self {
        self.hint_text = hint_text.into();
        self
    }

    /// Width of the text field. (Default: 100)
    #[inline]
    pub fn desired_width(mut self, desired_width: f32) -> Self {
        self.desired_width = desired_width;
        self
    }

    /// Show the button that opens the calendar popup. (Default: true)
    #[inline]
    pub fn show_button(mut self, show_button: bool) -> Self {
        self.show_button = show_button;
        self
    }
}

impl Widget for DateInput<'_> {
    fn ui(self, ui: &mut Ui) -> Response {
        let Self {
            sync,
            state,
            id_salt,
            hint_text,
            desired_width,
            show_button,
        } = self;

        let id = ui.make_persistent_id(id_salt);
        let mut input_state = ui
            .data_mut(|data| data.get_temp::<DateInputState>(id))
            .unwrap_or_default();
        let committed_before = state.selected();

        let inner = ui.horizontal(|ui| {
            let text_color = sync
                .last_error()
                .is_some()
                .then(|| ui.visuals().error_fg_color);
            let mut text_edit = TextEdit::singleline(sync.text_mut())
                .hint_text(hint_text)
                .desired_width(desired_width);
            if let Some(color) = text_color {
                text_edit = text_edit.text_color(color);
            }
            let text_response = ui.add(text_edit);

            if text_response.changed() {
                sync.clear_error();
            }
            if text_response.lost_focus() && ui.input(|i| i.key_pressed(Key::Enter)) {
                let outcome = sync.submit(state);
                log::debug!("Date input submitted: {outcome:?}");
            }

            if show_button {
                let button_response = ui
                    .add(Button::new("📆").selected(input_state.picker_visible))
                    .on_hover_text("Pick a date");
                if button_response.clicked() {
                    input_state.picker_visible = !input_state.picker_visible;
                }
                button_response.clicked()
            } else {
                input_state.picker_visible = false;
                false
            }
        });
        let toggled_this_frame = inner.inner;
        let mut response = inner.response;

        if input_state.picker_visible {
            let area = Area::new(id.with("picker"))
                .kind(egui::UiKind::Picker)
                .order(Order::Foreground)
                .fixed_pos(response.rect.left_bottom())
                .show(ui.ctx(), |ui| {
                    Frame::popup(ui.style())
                        .show(ui, |ui| DatePicker::new(state).id_salt(id).show(ui).inner)
                        .inner
                });

            if area.inner {
                sync.sync_from(state);
                input_state.picker_visible = false;
            } else if !toggled_this_frame
                && (ui.input(|i| i.key_pressed(Key::Escape)) || area.response.clicked_elsewhere())
            {
                input_state.picker_visible = false;
            }
        }

        ui.data_mut(|data| data.insert_temp(id, input_state));

        if state.selected() != committed_before {
            response.mark_changed();
        }
        response
    }
}
