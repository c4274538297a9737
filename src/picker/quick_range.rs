//! Named shortcuts resolving to a single anchor date

use chrono::{Datelike, Days, NaiveDate};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuickRange {
    Today,
    /// Anchors on the day one week ago rather than selecting a range
    Last7Days,
    ThisMonth,
}

impl QuickRange {
    pub const ALL: [QuickRange; 3] = [QuickRange::Today, QuickRange::Last7Days, QuickRange::ThisMonth];

    pub fn label(self) -> &'static str {
        match self {
            QuickRange::Today => "Today",
            QuickRange::Last7Days => "Last 7 Days",
            QuickRange::ThisMonth => "This Month",
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            QuickRange::Today => "today",
            QuickRange::Last7Days => "last7days",
            QuickRange::ThisMonth => "thismonth",
        }
    }

    pub fn resolve(self, today: NaiveDate) -> NaiveDate {
        match self {
            QuickRange::Today => today,
            QuickRange::Last7Days => today.checked_sub_days(Days::new(7)).unwrap_or(today),
            QuickRange::ThisMonth => today.with_day(1).unwrap_or(today),
        }
    }
}

impl FromStr for QuickRange {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        QuickRange::ALL
            .into_iter()
            .find(|r| r.key() == s)
            .ok_or_else(|| format!("unknown quick range: {}", s))
    }
}
