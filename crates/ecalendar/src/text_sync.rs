use crate::{CalendarDate, ChangeEvent, DatePickerState, ParseDateError};

/// What happened when the user submitted the text field.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The text was a new date, which is now committed.
    Changed(CalendarDate),

    /// The text was the date that was already committed.
    Unchanged(CalendarDate),

    /// The text was not a date. Nothing was changed and the user was alerted.
    Rejected(ParseDateError),
}

impl SubmitOutcome {
    #[inline]
    pub fn is_rejected(&self) -> bool {
        matches!(self, Self::Rejected(_))
    }
}

type Alert = Box<dyn FnMut(&ParseDateError)>;

/// Keeps a free-text date field and a [`DatePickerState`] in agreement.
///
/// The host edits [`Self::text_mut`] freely; nothing is parsed until
/// [`Self::submit`]. When the picker changes, [`Self::apply_change`] writes
/// the new value into the field without parsing it again.
///
/// ```
/// # use ecalendar::{CalendarDate, DatePickerState, DateTextSync, SubmitOutcome};
/// let mut state = DatePickerState::unselected(CalendarDate::new(2024, 1, 1).unwrap());
/// let mut sync = DateTextSync::for_state(&state);
/// assert_eq!(sync.text(), "");
///
/// *sync.text_mut() = "2024-02-29".to_owned();
/// assert!(matches!(sync.submit(&mut state), SubmitOutcome::Changed(_)));
/// assert_eq!(state.selected().map(|d| d.to_string()).as_deref(), Some("2024-02-29"));
/// ```
pub struct DateTextSync {
    text: String,
    alert: Option<Alert>,
    last_error: Option<ParseDateError>,
}

impl std::fmt::Debug for DateTextSync {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DateTextSync")
            .field("text", &self.text)
            .field("last_error", &self.last_error)
            .finish_non_exhaustive()
    }
}

impl DateTextSync {
    /// A field showing `value`, or empty.
    pub fn new(value: Option<CalendarDate>) -> Self {
        Self {
            text: format_value(value),
            alert: None,
            last_error: None,
        }
    }

    /// A field showing the committed value of `state`.
    pub fn for_state(state: &DatePickerState) -> Self {
        Self::new(state.selected())
    }

    /// Called whenever submitted text is rejected, e.g. to ring a bell.
    ///
    /// Without an alert, rejections are only logged.
    #[inline]
    pub fn with_alert(mut self, alert: impl FnMut(&ParseDateError) + 'static) -> Self {
        self.alert = Some(Box::new(alert));
        self
    }

    /// The current field contents.
    #[inline]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The field contents, for the host's text editor to write into.
    #[inline]
    pub fn text_mut(&mut self) -> &mut String {
        &mut self.text
    }

    /// The error of the last rejected submission, until the next submission or sync.
    #[inline]
    pub fn last_error(&self) -> Option<&ParseDateError> {
        self.last_error.as_ref()
    }

    /// Forget the last rejection, e.g. when the user edits the text again.
    #[inline]
    pub fn clear_error(&mut self) {
        self.last_error = None;
    }

    /// The user committed the field (e.g. pressed Enter).
    ///
    /// A valid date is set on `state` and the field is rewritten in canonical form.
    /// Anything else is reported through the alert and leaves both the state and the
    /// field text unchanged.
    pub fn submit(&mut self, state: &mut DatePickerState) -> SubmitOutcome {
        match CalendarDate::parse_iso(&self.text) {
            Ok(date) => {
                self.last_error = None;
                self.text = date.to_string();
                if state.set_value(date) {
                    SubmitOutcome::Changed(date)
                } else {
                    SubmitOutcome::Unchanged(date)
                }
            }
            Err(err) => {
                log::warn!("Rejected date input {:?}: {err}", self.text);
                if let Some(alert) = &mut self.alert {
                    alert(&err);
                }
                self.last_error = Some(err.clone());
                SubmitOutcome::Rejected(err)
            }
        }
    }

    /// Show the value carried by a picker notification.
    pub fn apply_change(&mut self, event: &ChangeEvent) {
        self.show(event.value);
    }

    /// Show the committed value of `state`.
    pub fn sync_from(&mut self, state: &DatePickerState) {
        self.show(state.selected());
    }

    fn show(&mut self, value: Option<CalendarDate>) {
        self.text = format_value(value);
        self.last_error = None;
    }
}

fn format_value(value: Option<CalendarDate>) -> String {
    value.map(|date| date.to_string()).unwrap_or_default()
}
