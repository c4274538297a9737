//! 12-hour time of day with AM/PM period

use chrono::{NaiveTime, Timelike};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Period {
    Am,
    Pm,
}

impl Period {
    pub fn toggled(self) -> Self {
        match self {
            Period::Am => Period::Pm,
            Period::Pm => Period::Am,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Period::Am => "AM",
            Period::Pm => "PM",
        }
    }
}

/// Hour in 1..=12, minute in 0..=59 and a period. Each field wraps
/// independently; changing one never carries into another.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeOfDay {
    hour: u8,
    minute: u8,
    period: Period,
}

impl Default for TimeOfDay {
    /// 12:46 PM
    fn default() -> Self {
        Self {
            hour: 12,
            minute: 46,
            period: Period::Pm,
        }
    }
}

impl TimeOfDay {
    #[cfg(test)]
    pub fn new(hour: u8, minute: u8, period: Period) -> Option<Self> {
        if !(1..=12).contains(&hour) || minute > 59 {
            return None;
        }
        Some(Self { hour, minute, period })
    }

    /// Convert a 24-hour wall clock time, dropping seconds
    pub fn from_naive_time(time: NaiveTime) -> Self {
        let h24 = time.hour();
        let hour = match h24 % 12 {
            0 => 12,
            h => h as u8,
        };
        Self {
            hour,
            minute: time.minute() as u8,
            period: if h24 >= 12 { Period::Pm } else { Period::Am },
        }
    }

    pub fn hour(&self) -> u8 {
        self.hour
    }

    pub fn minute(&self) -> u8 {
        self.minute
    }

    pub fn period(&self) -> Period {
        self.period
    }

    pub fn increment_hour(&mut self) {
        self.hour = if self.hour == 12 { 1 } else { self.hour + 1 };
    }

    pub fn decrement_hour(&mut self) {
        self.hour = if self.hour == 1 { 12 } else { self.hour - 1 };
    }

    pub fn increment_minute(&mut self) {
        self.minute = if self.minute == 59 { 0 } else { self.minute + 1 };
    }

    pub fn decrement_minute(&mut self) {
        self.minute = if self.minute == 0 { 59 } else { self.minute - 1 };
    }

    pub fn toggle_period(&mut self) {
        self.period = self.period.toggled();
    }

    /// 12 AM is midnight (0), 12 PM stays 12
    pub fn hour24(&self) -> u32 {
        let hour = self.hour as u32;
        match self.period {
            Period::Pm if hour != 12 => hour + 12,
            Period::Am if hour == 12 => 0,
            _ => hour,
        }
    }

    /// Composed time with seconds and sub-seconds zeroed
    pub fn to_naive_time(&self) -> NaiveTime {
        NaiveTime::from_hms_opt(self.hour24(), self.minute as u32, 0).unwrap_or(NaiveTime::MIN)
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{:02} {}", self.hour, self.minute, self.period.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn time(hour: u8, minute: u8, period: Period) -> TimeOfDay {
        TimeOfDay::new(hour, minute, period).unwrap()
    }

    #[test]
    fn hour_wraps_without_touching_period() {
        let mut t = time(12, 0, Period::Am);
        t.increment_hour();
        assert_eq!(t.hour(), 1);
        assert_eq!(t.period(), Period::Am);

        t.decrement_hour();
        assert_eq!(t.hour(), 12);

        let mut t = time(11, 0, Period::Am);
        t.increment_hour();
        assert_eq!((t.hour(), t.period()), (12, Period::Am));
    }

    #[test]
    fn minute_wraps_without_carry() {
        let mut t = time(3, 59, Period::Pm);
        t.increment_minute();
        assert_eq!((t.hour(), t.minute()), (3, 0));

        t.decrement_minute();
        assert_eq!((t.hour(), t.minute()), (3, 59));
    }

    #[test]
    fn period_toggles() {
        let mut t = time(5, 30, Period::Am);
        t.toggle_period();
        assert_eq!(t.period(), Period::Pm);
        t.toggle_period();
        assert_eq!(t.period(), Period::Am);
    }

    #[test]
    fn converts_to_24_hour() {
        assert_eq!(time(12, 0, Period::Am).hour24(), 0);
        assert_eq!(time(12, 0, Period::Pm).hour24(), 12);
        assert_eq!(time(9, 0, Period::Pm).hour24(), 21);
        assert_eq!(time(9, 0, Period::Am).hour24(), 9);
        assert_eq!(
            time(3, 5, Period::Pm).to_naive_time(),
            NaiveTime::from_hms_opt(15, 5, 0).unwrap()
        );
    }

    #[test]
    fn seeds_from_24_hour_time() {
        let t = TimeOfDay::from_naive_time(NaiveTime::from_hms_opt(0, 15, 42).unwrap());
        assert_eq!(t, time(12, 15, Period::Am));

        let t = TimeOfDay::from_naive_time(NaiveTime::from_hms_opt(13, 30, 0).unwrap());
        assert_eq!(t, time(1, 30, Period::Pm));

        let t = TimeOfDay::from_naive_time(NaiveTime::from_hms_opt(12, 0, 0).unwrap());
        assert_eq!(t, time(12, 0, Period::Pm));
    }

    #[test]
    fn rejects_out_of_range_fields() {
        assert!(TimeOfDay::new(0, 0, Period::Am).is_none());
        assert!(TimeOfDay::new(13, 0, Period::Am).is_none());
        assert!(TimeOfDay::new(1, 60, Period::Am).is_none());
    }

    #[test]
    fn default_and_display() {
        assert_eq!(TimeOfDay::default().to_string(), "12:46 PM");
        assert_eq!(time(3, 5, Period::Am).to_string(), "3:05 AM");
    }
}
