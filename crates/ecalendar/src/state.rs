use chrono::{TimeDelta, Weekday};

use crate::{CalendarDate, Error, MonthGrid, SourceId, YearMonth};

/// When does a [`DatePickerState`] emit a [`ChangeEvent`]?
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum NotifyPolicy {
    /// Only when the committed value changes.
    #[default]
    OnValueChange,

    /// On every interaction, including paging through months and years.
    ///
    /// The event then carries the (possibly unchanged) committed value.
    EveryInteraction,
}

/// Configuration of a [`DatePickerState`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DatePickerOptions {
    /// The weekday shown in the first grid column. Default: Sunday.
    pub first_weekday: Weekday,

    /// Default: [`NotifyPolicy::OnValueChange`].
    pub notify: NotifyPolicy,
}

impl Default for DatePickerOptions {
    fn default() -> Self {
        Self {
            first_weekday: Weekday::Sun,
            notify: NotifyPolicy::default(),
        }
    }
}

impl DatePickerOptions {
    #[inline]
    pub fn first_weekday(mut self, first_weekday: Weekday) -> Self {
        self.first_weekday = first_weekday;
        self
    }

    #[inline]
    pub fn notify(mut self, notify: NotifyPolicy) -> Self {
        self.notify = notify;
        self
    }
}

/// Is the user looking at the month of the committed value?
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum Mode {
    /// The displayed month is the month of the committed value.
    Synced,

    /// The user is paging through other months, or nothing is committed yet.
    Browsing,
}

/// Emitted by a [`DatePickerState`] when its committed value changes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct ChangeEvent {
    /// The picker that emitted the event.
    pub source: SourceId,

    /// The new committed value.
    pub value: Option<CalendarDate>,
}

bitflags::bitflags! {
    /// Which parts of a date picker need to be drawn again.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Redraw: u8 {
        /// The `"Sun, Jan 01"` style title.
        const TITLE = 1 << 0;

        /// The month label between the month arrows.
        const MONTH_LABEL = 1 << 1;

        /// The year label between the year arrows.
        const YEAR_LABEL = 1 << 2;

        /// The day cells.
        const GRID = 1 << 3;

        /// The selected cell moved (or appeared or disappeared).
        const HIGHLIGHT = 1 << 4;
    }
}

/// Handle for removing a listener again, see [`DatePickerState::unsubscribe`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type Listener = Box<dyn FnMut(&ChangeEvent)>;

/// The state of a date picker: which month is shown, and which date is committed.
///
/// The displayed month can differ from the month of the committed value while
/// the user pages through months without picking a day.
/// Picking a day (or setting the value from outside) brings the two back together.
///
/// The picker also remembers a *cursor day*: the day that was last selected,
/// which is previewed in the title while browsing. The cursor keeps its
/// day-of-month when paging through months, and is clamped to the end of the
/// month when paging through years (Feb 29 in a non-leap year becomes Feb 28,
/// and stays 28 until another day is picked).
///
/// ```
/// # use ecalendar::{CalendarDate, DatePickerState};
/// let mut state = DatePickerState::new(CalendarDate::new(2023, 1, 1).unwrap());
/// state.navigate_month(1);
/// assert_eq!(state.displayed().to_string(), "2023-02");
/// assert_eq!(state.selected(), CalendarDate::new(2023, 1, 1).ok());
///
/// state.select_day(15).unwrap();
/// assert_eq!(state.selected(), CalendarDate::new(2023, 2, 15).ok());
/// ```
pub struct DatePickerState {
    source: SourceId,
    options: DatePickerOptions,

    displayed: YearMonth,
    selected: Option<CalendarDate>,
    cursor_day: u32,

    /// Can the committed value be absent?
    optional: bool,

    /// Grid for `displayed`.
    grid: MonthGrid,

    redraw: Redraw,
    pending_change: Option<ChangeEvent>,
    listeners: Vec<(ListenerId, Listener)>,
    next_listener_id: u64,
}

impl std::fmt::Debug for DatePickerState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatePickerState")
            .field("source", &self.source)
            .field("options", &self.options)
            .field("displayed", &self.displayed)
            .field("selected", &self.selected)
            .field("cursor_day", &self.cursor_day)
            .field("optional", &self.optional)
            .field("redraw", &self.redraw)
            .field("listeners", &self.listeners.len())
            .finish_non_exhaustive()
    }
}

impl DatePickerState {
    /// A picker that always holds a value, starting at `initial`.
    pub fn new(initial: CalendarDate) -> Self {
        Self::build(initial, Some(initial), false)
    }

    /// A picker that always holds a value, starting at today's date.
    ///
    /// The clock is read now, not when the program started.
    pub fn today() -> Self {
        Self::new(CalendarDate::today())
    }

    /// A picker without a committed value, as used by a date input field.
    ///
    /// It shows the month of `today`.
    pub fn unselected(today: CalendarDate) -> Self {
        Self::build(today, None, true)
    }

    /// A picker whose value may be cleared, starting at `value`.
    pub fn optional(value: Option<CalendarDate>, today: CalendarDate) -> Self {
        Self::build(value.unwrap_or(today), value, true)
    }

    fn build(cursor: CalendarDate, selected: Option<CalendarDate>, optional: bool) -> Self {
        let options = DatePickerOptions::default();
        let displayed = cursor.year_month();
        Self {
            source: SourceId::default(),
            options,
            displayed,
            selected,
            cursor_day: cursor.day(),
            optional,
            grid: MonthGrid::for_month(displayed, options.first_weekday),
            redraw: Redraw::all(),
            pending_change: None,
            listeners: Vec::new(),
            next_listener_id: 0,
        }
    }

    /// Set the identity carried by emitted [`ChangeEvent`]s.
    #[inline]
    pub fn with_source(mut self, source: SourceId) -> Self {
        self.source = source;
        self
    }

    pub fn with_options(mut self, options: DatePickerOptions) -> Self {
        self.set_options(options);
        self
    }

    pub fn set_options(&mut self, options: DatePickerOptions) {
        if options.first_weekday != self.options.first_weekday {
            self.grid = MonthGrid::for_month(self.displayed, options.first_weekday);
            self.redraw |= Redraw::GRID | Redraw::HIGHLIGHT;
        }
        self.options = options;
    }

    // ------------------------------------------------------------------------
    // Reading:

    #[inline]
    pub fn source(&self) -> SourceId {
        self.source
    }

    #[inline]
    pub fn options(&self) -> &DatePickerOptions {
        &self.options
    }

    /// The month currently shown.
    #[inline]
    pub fn displayed(&self) -> YearMonth {
        self.displayed
    }

    /// The committed value.
    #[inline]
    pub fn selected(&self) -> Option<CalendarDate> {
        self.selected
    }

    /// Can the committed value be absent?
    #[inline]
    pub fn is_optional(&self) -> bool {
        self.optional
    }

    /// The cursor day in the displayed month.
    ///
    /// A cursor day past the end of a shorter month shows as its last day.
    pub fn cursor(&self) -> CalendarDate {
        self.displayed.date_clamped(self.cursor_day)
    }

    /// The grid of the displayed month.
    #[inline]
    pub fn grid(&self) -> &MonthGrid {
        &self.grid
    }

    pub fn mode(&self) -> Mode {
        match self.selected {
            Some(selected) if self.displayed.contains(selected) => Mode::Synced,
            _ => Mode::Browsing,
        }
    }

    /// Row and column of the committed day, if it is in the displayed grid.
    pub fn highlighted_cell(&self) -> Option<(usize, usize)> {
        self.selected
            .and_then(|selected| self.grid.position_of_date(selected))
    }

    /// Row and column of the cursor day.
    pub fn cursor_cell(&self) -> Option<(usize, usize)> {
        self.grid.position_of(self.cursor().day())
    }

    /// E.g. `"Sun, Jan 01"`, for the cursor date.
    pub fn title(&self) -> String {
        self.cursor().format("%a, %b %d")
    }

    /// E.g. `"January"`.
    pub fn month_label(&self) -> String {
        self.displayed.first_day().format("%B")
    }

    /// E.g. `"2023"`.
    pub fn year_label(&self) -> String {
        format!("{:04}", self.displayed.year())
    }

    // ------------------------------------------------------------------------
    // Navigation:

    /// Show the month `delta` months away (backwards if negative).
    ///
    /// The committed value is not changed.
    pub fn navigate_month(&mut self, delta: i32) {
        let target = self.displayed.add_months(delta);
        log::debug!("Date picker {:?}: month {delta:+} -> {target}", self.source);
        self.show_month(target);
        self.notify_interaction();
    }

    /// Show the same month `delta` years away (backwards if negative).
    ///
    /// The committed value is not changed, but the cursor day is clamped to the
    /// length of the target month.
    pub fn navigate_year(&mut self, delta: i32) {
        let target = self.displayed.add_years(delta);
        log::debug!("Date picker {:?}: year {delta:+} -> {target}", self.source);
        self.show_month(target);

        let last_day = target.days();
        if self.cursor_day > last_day {
            log::debug!(
                "Date picker {:?}: clamping day {} to {last_day}",
                self.source,
                self.cursor_day
            );
            self.cursor_day = last_day;
            self.redraw |= Redraw::TITLE;
        }
        self.notify_interaction();
    }

    /// Move the cursor by `days` days, showing its month.
    ///
    /// The committed value is not changed. Stops at the ends of the supported range.
    pub fn move_cursor(&mut self, days: i32) {
        let moved = self
            .cursor()
            .naive()
            .checked_add_signed(TimeDelta::days(i64::from(days)))
            .and_then(|date| CalendarDate::try_from(date).ok());
        let Some(moved) = moved else {
            log::debug!(
                "Date picker {:?}: cursor cannot move {days:+} days",
                self.source
            );
            return;
        };

        self.cursor_day = moved.day();
        self.show_month(moved.year_month());
        self.redraw |= Redraw::TITLE;
        self.notify_interaction();
    }

    // ------------------------------------------------------------------------
    // Selection:

    /// Commit the given day of the displayed month.
    ///
    /// Returns `true` if the committed value changed.
    ///
    /// # Errors
    /// If the day does not exist in the displayed month. Nothing is changed then.
    pub fn select_day(&mut self, day: u32) -> Result<bool, Error> {
        let date = self.displayed.date(day)?;
        self.cursor_day = day;
        self.redraw |= Redraw::TITLE;
        Ok(self.commit(Some(date)))
    }

    /// Commit the cursor day.
    ///
    /// Returns `true` if the committed value changed.
    pub fn commit_cursor(&mut self) -> bool {
        let cursor = self.cursor();
        self.cursor_day = cursor.day();
        self.commit(Some(cursor))
    }

    /// Set the committed value from outside, e.g. from a text field.
    ///
    /// Shows the month of `date`. Only notifies if the value actually changed.
    ///
    /// Returns `true` if the committed value changed.
    pub fn set_value(&mut self, date: CalendarDate) -> bool {
        if self.cursor_day != date.day() {
            self.cursor_day = date.day();
            self.redraw |= Redraw::TITLE;
        }
        self.show_month(date.year_month());
        self.assign(Some(date))
    }

    /// Remove the committed value.
    ///
    /// Has no effect on a picker that always holds a value.
    /// Returns `true` if the committed value changed.
    pub fn clear(&mut self) -> bool {
        if !self.optional {
            log::debug!(
                "Date picker {:?} always holds a value, ignoring clear",
                self.source
            );
            return false;
        }
        self.commit(None)
    }

    /// A user commit: counts as an interaction even if the value stays the same.
    fn commit(&mut self, value: Option<CalendarDate>) -> bool {
        let changed = self.assign(value);
        if !changed {
            self.notify_interaction();
        }
        changed
    }

    fn assign(&mut self, value: Option<CalendarDate>) -> bool {
        if self.selected == value {
            return false;
        }

        log::debug!(
            "Date picker {:?}: {} -> {}",
            self.source,
            display_value(self.selected),
            display_value(value)
        );
        self.selected = value;
        self.redraw |= Redraw::HIGHLIGHT;
        self.emit();
        true
    }

    fn show_month(&mut self, target: YearMonth) {
        if target == self.displayed {
            return;
        }

        let mut redraw = Redraw::GRID | Redraw::HIGHLIGHT | Redraw::TITLE;
        if target.month() != self.displayed.month() {
            redraw |= Redraw::MONTH_LABEL;
        }
        if target.year() != self.displayed.year() {
            redraw |= Redraw::YEAR_LABEL;
        }

        self.displayed = target;
        self.grid = MonthGrid::for_month(target, self.options.first_weekday);
        self.redraw |= redraw;
    }

    // ------------------------------------------------------------------------
    // Notifications:

    /// Call `listener` (synchronously) with every [`ChangeEvent`] from now on.
    pub fn subscribe(&mut self, listener: impl FnMut(&ChangeEvent) + 'static) -> ListenerId {
        let id = ListenerId(self.next_listener_id);
        self.next_listener_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Returns `false` if there was no such listener.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(listener_id, _)| *listener_id != id);
        self.listeners.len() != before
    }

    /// The last [`ChangeEvent`] since the previous call, for hosts that poll.
    pub fn take_change(&mut self) -> Option<ChangeEvent> {
        self.pending_change.take()
    }

    /// What needs to be drawn again since the previous call.
    ///
    /// Everything is dirty right after construction.
    pub fn take_redraw(&mut self) -> Redraw {
        std::mem::take(&mut self.redraw)
    }

    fn notify_interaction(&mut self) {
        if self.options.notify == NotifyPolicy::EveryInteraction {
            self.emit();
        }
    }

    fn emit(&mut self) {
        let event = ChangeEvent {
            source: self.source,
            value: self.selected,
        };
        for (_, listener) in &mut self.listeners {
            listener(&event);
        }
        self.pending_change = Some(event);
    }
}

fn display_value(value: Option<CalendarDate>) -> String {
    value.map_or_else(|| "none".to_owned(), |date| date.to_string())
}
