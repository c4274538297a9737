//! Date-time selection state
//!
//! `DateTimePicker` tracks the displayed month, the chosen calendar day and a
//! 12-hour time of day. Nothing is emitted until the user confirms; the
//! composed value is then handed to the `on_change` callback exactly once.
//!
//! The picker is either closed or open. While open it holds an outside-click
//! subscription, which is released on every close path.

pub mod calendar;
pub mod clock;
pub mod listener;
pub mod quick_range;
pub mod time;

use calendar::{month_grid, DateBounds, DayCell, DisplayMonth};
use chrono::{NaiveDate, NaiveDateTime};
use clock::{Clock, SystemClock};
use listener::{ClickAwayListeners, ClickAwaySubscription};
use quick_range::QuickRange;
use time::TimeOfDay;
use tracing::debug;

pub const DEFAULT_PLACEHOLDER: &str = "Select Date & Time";

enum PickerState {
    Closed,
    Open {
        click_away: ClickAwaySubscription,
    },
}

pub struct DateTimePicker<C: Clock = SystemClock> {
    clock: C,
    listeners: ClickAwayListeners,
    state: PickerState,
    displayed_month: DisplayMonth,
    selected_date: Option<NaiveDate>,
    time: TimeOfDay,
    quick_range: Option<QuickRange>,
    bounds: DateBounds,
    disabled: bool,
    placeholder: String,
    on_change: Option<Box<dyn FnMut(NaiveDateTime)>>,
}

impl DateTimePicker<SystemClock> {
    pub fn new(listeners: ClickAwayListeners) -> Self {
        Self::with_clock(SystemClock, listeners)
    }
}

impl<C: Clock> DateTimePicker<C> {
    pub fn with_clock(clock: C, listeners: ClickAwayListeners) -> Self {
        let displayed_month = DisplayMonth::containing(clock.today());
        Self {
            clock,
            listeners,
            state: PickerState::Closed,
            displayed_month,
            selected_date: None,
            time: TimeOfDay::default(),
            quick_range: None,
            bounds: DateBounds::default(),
            disabled: false,
            placeholder: DEFAULT_PLACEHOLDER.to_owned(),
            on_change: None,
        }
    }

    /// Seed the selection from an existing value
    pub fn initial_value(mut self, value: NaiveDateTime) -> Self {
        self.selected_date = Some(value.date());
        self.displayed_month = DisplayMonth::containing(value.date());
        self.time = TimeOfDay::from_naive_time(value.time());
        self
    }

    pub fn bounds(mut self, min: Option<NaiveDate>, max: Option<NaiveDate>) -> Self {
        self.bounds = DateBounds::new(min, max);
        self
    }

    #[cfg(test)]
    pub fn disabled(mut self, disabled: bool) -> Self {
        self.set_disabled(disabled);
        self
    }

    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    pub fn on_change(mut self, callback: impl FnMut(NaiveDateTime) + 'static) -> Self {
        self.on_change = Some(Box::new(callback));
        self
    }

    pub fn set_bounds(&mut self, min: Option<NaiveDate>, max: Option<NaiveDate>) {
        self.bounds = DateBounds::new(min, max);
    }

    /// Disabling also closes an open picker
    pub fn set_disabled(&mut self, disabled: bool) {
        self.disabled = disabled;
        if disabled {
            self.close();
        }
    }

    // ------------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------------

    pub fn is_open(&self) -> bool {
        matches!(self.state, PickerState::Open { .. })
    }

    /// The outside-click subscription, held only while open
    pub fn click_away(&self) -> Option<&ClickAwaySubscription> {
        match &self.state {
            PickerState::Open { click_away } => Some(click_away),
            PickerState::Closed => None,
        }
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    pub fn displayed_month(&self) -> DisplayMonth {
        self.displayed_month
    }

    pub fn selected_date(&self) -> Option<NaiveDate> {
        self.selected_date
    }

    pub fn time(&self) -> TimeOfDay {
        self.time
    }

    pub fn quick_range(&self) -> Option<QuickRange> {
        self.quick_range
    }

    pub fn date_bounds(&self) -> DateBounds {
        self.bounds
    }

    pub fn grid(&self) -> Vec<DayCell> {
        month_grid(
            self.displayed_month,
            &self.bounds,
            self.clock.today(),
            self.selected_date,
        )
    }

    /// The value confirm would emit, if a date is chosen
    pub fn composed(&self) -> Option<NaiveDateTime> {
        self.selected_date
            .map(|date| date.and_time(self.time.to_naive_time()))
    }

    /// Trigger text: "M/D/YYYY, H:MM AM" or the placeholder
    pub fn display_value(&self) -> String {
        match self.selected_date {
            Some(date) => format!("{}, {}", date.format("%-m/%-d/%Y"), self.time),
            None => self.placeholder.clone(),
        }
    }

    // ------------------------------------------------------------------------
    // Open / close
    // ------------------------------------------------------------------------

    pub fn open(&mut self) {
        if self.disabled || self.is_open() {
            return;
        }
        debug!("Date-time picker opened");
        self.state = PickerState::Open {
            click_away: self.listeners.subscribe("date_time_picker"),
        };
    }

    pub fn toggle(&mut self) {
        if self.is_open() {
            self.close();
        } else {
            self.open();
        }
    }

    /// Close without touching the selection. Outside clicks land here.
    pub fn close(&mut self) {
        if self.is_open() {
            debug!("Date-time picker closed");
        }
        self.state = PickerState::Closed;
    }

    // ------------------------------------------------------------------------
    // Calendar
    // ------------------------------------------------------------------------

    pub fn previous_month(&mut self) {
        if !self.disabled {
            self.displayed_month = self.displayed_month.previous();
        }
    }

    pub fn next_month(&mut self) {
        if !self.disabled {
            self.displayed_month = self.displayed_month.next();
        }
    }

    /// Select a day of the displayed month. Returns false when the day is
    /// disabled or not part of the displayed month.
    pub fn select_date(&mut self, date: NaiveDate) -> bool {
        if self.disabled || !self.displayed_month.contains(date) {
            return false;
        }
        if self.bounds.is_disabled(date, self.clock.today()) {
            return false;
        }
        self.selected_date = Some(date);
        true
    }

    pub fn apply_quick_range(&mut self, range: QuickRange) {
        if self.disabled {
            return;
        }
        let date = range.resolve(self.clock.today());
        debug!(range = range.key(), %date, "Quick range applied");
        self.quick_range = Some(range);
        self.selected_date = Some(date);
        self.displayed_month = DisplayMonth::containing(date);
    }

    // ------------------------------------------------------------------------
    // Time
    // ------------------------------------------------------------------------

    pub fn increment_hour(&mut self) {
        self.edit_time(TimeOfDay::increment_hour);
    }

    pub fn decrement_hour(&mut self) {
        self.edit_time(TimeOfDay::decrement_hour);
    }

    pub fn increment_minute(&mut self) {
        self.edit_time(TimeOfDay::increment_minute);
    }

    pub fn decrement_minute(&mut self) {
        self.edit_time(TimeOfDay::decrement_minute);
    }

    pub fn toggle_period(&mut self) {
        self.edit_time(TimeOfDay::toggle_period);
    }

    fn edit_time(&mut self, edit: impl FnOnce(&mut TimeOfDay)) {
        if !self.disabled {
            edit(&mut self.time);
        }
    }

    // ------------------------------------------------------------------------
    // Confirm / cancel
    // ------------------------------------------------------------------------

    /// Emit the composed value and close. Without a selected date nothing is
    /// emitted and the picker stays open.
    pub fn confirm(&mut self) -> Option<NaiveDateTime> {
        if self.disabled || !self.is_open() {
            return None;
        }
        let value = self.composed()?;
        if let Some(callback) = self.on_change.as_mut() {
            callback(value);
        }
        self.close();
        Some(value)
    }

    /// Close and clear the quick range indicator. The chosen date and time
    /// stay in place for the next open.
    pub fn cancel(&mut self) {
        self.quick_range = None;
        self.close();
    }
}

#[cfg(test)]
mod tests {
    use super::clock::FixedClock;
    use super::time::Period;
    use super::*;
    use chrono::NaiveTime;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn picker_on(today: NaiveDate) -> (DateTimePicker<FixedClock>, ClickAwayListeners) {
        let listeners = ClickAwayListeners::new();
        (DateTimePicker::with_clock(FixedClock(today), listeners.clone()), listeners)
    }

    fn recording(
        picker: DateTimePicker<FixedClock>,
    ) -> (DateTimePicker<FixedClock>, Rc<RefCell<Vec<NaiveDateTime>>>) {
        let emitted = Rc::new(RefCell::new(Vec::new()));
        let sink = emitted.clone();
        (picker.on_change(move |v| sink.borrow_mut().push(v)), emitted)
    }

    #[test]
    fn starts_closed_on_current_month() {
        let (picker, _) = picker_on(ymd(2025, 9, 10));
        assert!(!picker.is_open());
        assert_eq!(picker.displayed_month(), DisplayMonth::new(2025, 8).unwrap());
        assert_eq!(picker.selected_date(), None);
        assert_eq!(picker.time(), TimeOfDay::default());
        assert_eq!(picker.display_value(), DEFAULT_PLACEHOLDER);
    }

    #[test]
    fn confirm_without_date_is_blocked() {
        let (picker, _) = picker_on(ymd(2025, 9, 10));
        let (mut picker, emitted) = recording(picker);
        picker.open();

        assert_eq!(picker.confirm(), None);
        assert!(picker.is_open());
        assert!(emitted.borrow().is_empty());
    }

    #[test]
    fn confirm_emits_composed_value_once() {
        let (picker, listeners) = picker_on(ymd(2025, 9, 10));
        let (mut picker, emitted) = recording(picker);
        picker.open();
        assert!(picker.select_date(ymd(2025, 9, 15)));
        while picker.time().hour() != 3 {
            picker.increment_hour();
        }
        while picker.time().minute() != 5 {
            picker.increment_minute();
        }
        assert_eq!(picker.time().period(), Period::Pm);

        let expected = ymd(2025, 9, 15).and_time(NaiveTime::from_hms_opt(15, 5, 0).unwrap());
        assert_eq!(picker.confirm(), Some(expected));
        assert_eq!(*emitted.borrow(), vec![expected]);
        assert!(!picker.is_open());
        assert_eq!(listeners.active(), 0);

        // Closed picker does not emit again
        assert_eq!(picker.confirm(), None);
        assert_eq!(emitted.borrow().len(), 1);
    }

    #[test]
    fn disabled_and_filler_days_cannot_be_selected() {
        let (mut picker, _) = picker_on(ymd(2025, 9, 10));
        picker.open();

        assert!(!picker.select_date(ymd(2025, 9, 9)));
        assert!(!picker.select_date(ymd(2025, 10, 1)));
        assert_eq!(picker.selected_date(), None);

        assert!(picker.select_date(ymd(2025, 9, 10)));
        assert_eq!(picker.selected_date(), Some(ymd(2025, 9, 10)));
    }

    #[test]
    fn bounds_limit_selection() {
        let (picker, _) = picker_on(ymd(2025, 1, 1));
        let mut picker = picker.bounds(Some(ymd(2025, 1, 10)), Some(ymd(2025, 1, 20)));
        picker.open();

        assert!(!picker.select_date(ymd(2025, 1, 9)));
        assert!(!picker.select_date(ymd(2025, 1, 21)));
        assert!(picker.select_date(ymd(2025, 1, 15)));

        picker.set_bounds(None, None);
        assert_eq!(picker.date_bounds(), DateBounds::default());
        assert!(picker.select_date(ymd(2025, 1, 21)));
    }

    #[test]
    fn navigation_keeps_selection() {
        let (mut picker, _) = picker_on(ymd(2025, 9, 10));
        picker.open();
        picker.select_date(ymd(2025, 9, 20));

        picker.next_month();
        assert_eq!(picker.displayed_month().label(), "Oct 2025");
        assert_eq!(picker.selected_date(), Some(ymd(2025, 9, 20)));
        assert!(!picker.grid().iter().any(|c| c.is_selected));

        picker.previous_month();
        let selected: Vec<_> = picker.grid().into_iter().filter(|c| c.is_selected).collect();
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].date, ymd(2025, 9, 20));
    }

    #[test]
    fn quick_ranges_move_selection_and_month() {
        let today = ymd(2025, 3, 4);
        let (mut picker, _) = picker_on(today);
        picker.open();
        picker.increment_minute();
        let time = picker.time();

        picker.next_month();
        picker.apply_quick_range(QuickRange::Today);
        assert_eq!(picker.selected_date(), Some(today));
        assert_eq!(picker.displayed_month(), DisplayMonth::containing(today));

        picker.apply_quick_range(QuickRange::Last7Days);
        assert_eq!(picker.selected_date(), Some(ymd(2025, 2, 25)));
        assert_eq!(picker.displayed_month().label(), "Feb 2025");

        picker.apply_quick_range(QuickRange::ThisMonth);
        assert_eq!(picker.selected_date(), Some(ymd(2025, 3, 1)));
        assert_eq!(picker.quick_range(), Some(QuickRange::ThisMonth));
        assert_eq!(picker.time(), time);
    }

    #[test]
    fn cancel_keeps_selection_but_clears_quick_range() {
        let (mut picker, listeners) = picker_on(ymd(2025, 3, 4));
        picker.open();
        picker.apply_quick_range(QuickRange::Today);
        picker.toggle_period();

        picker.cancel();
        assert!(!picker.is_open());
        assert_eq!(picker.quick_range(), None);
        assert_eq!(picker.selected_date(), Some(ymd(2025, 3, 4)));
        assert_eq!(picker.time().period(), Period::Am);
        assert_eq!(listeners.active(), 0);
    }

    #[test]
    fn every_close_path_releases_listener() {
        let (mut picker, listeners) = picker_on(ymd(2025, 3, 4));
        for round in 0..4 {
            picker.open();
            picker.open();
            assert_eq!(listeners.active(), 1);
            assert!(picker.click_away().is_some());
            match round {
                0 => picker.close(),
                1 => picker.cancel(),
                2 => picker.toggle(),
                _ => {
                    picker.apply_quick_range(QuickRange::Today);
                    picker.confirm();
                }
            }
            assert!(!picker.is_open());
            assert!(picker.click_away().is_none());
            assert_eq!(listeners.active(), 0);
        }
    }

    #[test]
    fn disabled_picker_ignores_interaction() {
        let (picker, listeners) = picker_on(ymd(2025, 3, 4));
        let mut picker = picker.disabled(true);
        picker.open();
        picker.toggle();
        assert!(!picker.is_open());
        assert_eq!(listeners.active(), 0);

        picker.next_month();
        picker.increment_hour();
        picker.apply_quick_range(QuickRange::Today);
        assert_eq!(picker.displayed_month().label(), "Mar 2025");
        assert_eq!(picker.time(), TimeOfDay::default());
        assert_eq!(picker.selected_date(), None);

        picker.set_disabled(false);
        picker.open();
        assert!(picker.is_open());
        picker.set_disabled(true);
        assert!(!picker.is_open());
        assert_eq!(listeners.active(), 0);
    }

    #[test]
    fn seeds_from_initial_value() {
        let (picker, _) = picker_on(ymd(2025, 1, 1));
        let value = ymd(2025, 3, 4).and_time(NaiveTime::from_hms_opt(0, 15, 0).unwrap());
        let picker = picker.initial_value(value);

        assert_eq!(picker.selected_date(), Some(ymd(2025, 3, 4)));
        assert_eq!(picker.displayed_month().label(), "Mar 2025");
        assert_eq!(picker.time().to_string(), "12:15 AM");
        assert_eq!(picker.display_value(), "3/4/2025, 12:15 AM");
        assert_eq!(picker.composed(), Some(value));
    }
}
