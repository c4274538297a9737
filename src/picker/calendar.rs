//! Month grid generation and date bounds

use chrono::{Datelike, Days, Months, NaiveDate};

/// Cells in a rendered month: 6 weeks of 7 days
pub const GRID_CELLS: usize = 42;

pub const MONTH_NAMES: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

pub const DAY_NAMES: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// The month currently shown in the grid.
///
/// Stored as the first day of the month so that year rollover is handled
/// by chrono when navigating. The first and last years chrono can represent
/// are out of range, so every month has full weeks on both sides.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayMonth {
    first: NaiveDate,
}

fn earliest_month() -> NaiveDate {
    NaiveDate::from_ymd_opt(NaiveDate::MIN.year() + 1, 1, 1).unwrap_or(NaiveDate::MIN)
}

fn latest_month() -> NaiveDate {
    NaiveDate::from_ymd_opt(NaiveDate::MAX.year() - 1, 12, 1).unwrap_or(NaiveDate::MAX)
}

impl DisplayMonth {
    /// `month0` is zero-based (0 = January). Returns None for an out of range month.
    pub fn new(year: i32, month0: u32) -> Option<Self> {
        let first = month0
            .checked_add(1)
            .and_then(|month| NaiveDate::from_ymd_opt(year, month, 1))?;
        (earliest_month()..=latest_month())
            .contains(&first)
            .then_some(Self { first })
    }

    fn clamped(first: NaiveDate) -> Self {
        Self {
            first: first.clamp(earliest_month(), latest_month()),
        }
    }

    /// The month containing `date`, clamped to the supported range
    pub fn containing(date: NaiveDate) -> Self {
        Self::new(date.year(), date.month0())
            .unwrap_or_else(|| Self::clamped(date.with_day(1).unwrap_or(date)))
    }

    pub fn year(&self) -> i32 {
        self.first.year()
    }

    /// Zero-based month index
    pub fn month0(&self) -> u32 {
        self.first.month0()
    }

    pub fn first_day(&self) -> NaiveDate {
        self.first
    }

    #[cfg(test)]
    pub fn days_in_month(&self) -> u32 {
        self.next().first.pred_opt().map(|d| d.day()).unwrap_or(31)
    }

    /// Stays put at the end of the supported range
    pub fn next(&self) -> Self {
        Self::clamped(self.first.checked_add_months(Months::new(1)).unwrap_or(self.first))
    }

    pub fn previous(&self) -> Self {
        Self::clamped(self.first.checked_sub_months(Months::new(1)).unwrap_or(self.first))
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year() && date.month0() == self.month0()
    }

    /// Header label such as "Sep 2025"
    pub fn label(&self) -> String {
        format!("{} {}", MONTH_NAMES[self.month0() as usize], self.year())
    }
}

/// Optional inclusive [min, max] bounds on selectable days
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateBounds {
    pub min: Option<NaiveDate>,
    pub max: Option<NaiveDate>,
}

impl DateBounds {
    pub fn new(min: Option<NaiveDate>, max: Option<NaiveDate>) -> Self {
        Self { min, max }
    }

    /// A day is disabled when it is in the past or falls outside the bounds.
    pub fn is_disabled(&self, date: NaiveDate, today: NaiveDate) -> bool {
        if date < today {
            return true;
        }
        if self.min.is_some_and(|min| date < min) {
            return true;
        }
        self.max.is_some_and(|max| date > max)
    }
}

/// Which month a grid cell belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellMonth {
    Previous,
    Current,
    Next,
}

/// One cell of the month grid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayCell {
    pub date: NaiveDate,
    pub day: u32,
    pub month: CellMonth,
    pub disabled: bool,
    pub is_today: bool,
    pub is_selected: bool,
}

impl DayCell {
    /// Filler days from neighbouring months are never clickable
    pub fn is_filler(&self) -> bool {
        self.month != CellMonth::Current
    }
}

/// Build the 42-cell grid for `month`, weeks starting on Sunday.
pub fn month_grid(
    month: DisplayMonth,
    bounds: &DateBounds,
    today: NaiveDate,
    selected: Option<NaiveDate>,
) -> Vec<DayCell> {
    let first = month.first_day();
    let leading = first.weekday().num_days_from_sunday() as u64;
    let start = first.checked_sub_days(Days::new(leading)).unwrap_or(first);

    start
        .iter_days()
        .take(GRID_CELLS)
        .map(|date| {
            let cell_month = if date < first {
                CellMonth::Previous
            } else if month.contains(date) {
                CellMonth::Current
            } else {
                CellMonth::Next
            };

            if cell_month == CellMonth::Current {
                DayCell {
                    date,
                    day: date.day(),
                    month: cell_month,
                    disabled: bounds.is_disabled(date, today),
                    is_today: date == today,
                    is_selected: selected == Some(date),
                }
            } else {
                DayCell {
                    date,
                    day: date.day(),
                    month: cell_month,
                    disabled: true,
                    is_today: false,
                    is_selected: false,
                }
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn every_month_has_42_cells() {
        let today = ymd(2020, 1, 1);
        for year in [1999, 2000, 2024, 2025, 2100] {
            for month0 in 0..12 {
                let month = DisplayMonth::new(year, month0).unwrap();
                let grid = month_grid(month, &DateBounds::default(), today, None);
                assert_eq!(grid.len(), GRID_CELLS, "{}", month.label());
            }
        }
    }

    #[test]
    fn leading_filler_matches_first_weekday() {
        // 1 Sep 2025 is a Monday
        let month = DisplayMonth::new(2025, 8).unwrap();
        let grid = month_grid(month, &DateBounds::default(), ymd(2025, 1, 1), None);

        assert_eq!(grid[0].month, CellMonth::Previous);
        assert_eq!(grid[0].day, 31);
        assert_eq!(grid[1].date, ymd(2025, 9, 1));

        let current: Vec<u32> = grid
            .iter()
            .filter(|c| c.month == CellMonth::Current)
            .map(|c| c.day)
            .collect();
        assert_eq!(current, (1..=30).collect::<Vec<_>>());
        assert!(grid[31..].iter().all(|c| c.month == CellMonth::Next));
    }

    #[test]
    fn month_starting_on_sunday_has_no_leading_filler() {
        // 1 Jun 2025 is a Sunday
        let month = DisplayMonth::new(2025, 5).unwrap();
        let grid = month_grid(month, &DateBounds::default(), ymd(2025, 1, 1), None);
        assert_eq!(grid[0].date, ymd(2025, 6, 1));
        assert_eq!(grid[0].month, CellMonth::Current);
    }

    #[test]
    fn past_days_are_disabled() {
        let today = ymd(2025, 9, 15);
        let month = DisplayMonth::containing(today);
        let grid = month_grid(month, &DateBounds::default(), today, None);

        for cell in grid.iter().filter(|c| !c.is_filler()) {
            assert_eq!(cell.disabled, cell.date < today, "{}", cell.date);
        }
        let today_cell = grid.iter().find(|c| c.date == today).unwrap();
        assert!(today_cell.is_today);
        assert!(!today_cell.disabled);
    }

    #[test]
    fn min_and_max_bounds_are_inclusive() {
        let bounds = DateBounds::new(Some(ymd(2025, 1, 10)), Some(ymd(2025, 1, 20)));
        let today = ymd(2025, 1, 1);

        assert!(bounds.is_disabled(ymd(2025, 1, 9), today));
        assert!(bounds.is_disabled(ymd(2025, 1, 21), today));
        assert!(!bounds.is_disabled(ymd(2025, 1, 10), today));
        assert!(!bounds.is_disabled(ymd(2025, 1, 15), today));
        assert!(!bounds.is_disabled(ymd(2025, 1, 20), today));
    }

    #[test]
    fn filler_cells_are_inert() {
        let month = DisplayMonth::new(2025, 8).unwrap();
        let selected = Some(ymd(2025, 8, 31));
        let grid = month_grid(month, &DateBounds::default(), ymd(2025, 8, 31), selected);

        let filler = &grid[0];
        assert!(filler.is_filler());
        assert!(filler.disabled);
        assert!(!filler.is_today);
        assert!(!filler.is_selected);
    }

    #[test]
    fn navigation_rolls_over_year() {
        let dec = DisplayMonth::new(2025, 11).unwrap();
        assert_eq!(dec.next(), DisplayMonth::new(2026, 0).unwrap());
        assert_eq!(dec.next().previous(), dec);
        assert_eq!(DisplayMonth::new(2024, 1).unwrap().days_in_month(), 29);
        assert_eq!(dec.label(), "Dec 2025");
        assert!(DisplayMonth::new(2025, 12).is_none());
        assert!(DisplayMonth::new(2025, u32::MAX).is_none());
    }

    #[test]
    fn range_limits_keep_full_weeks() {
        let today = ymd(2020, 1, 1);
        let last = DisplayMonth::containing(NaiveDate::MAX);
        assert_eq!(last.year(), NaiveDate::MAX.year() - 1);
        assert_eq!(last.month0(), 11);
        assert_eq!(last.next(), last);
        assert!(DisplayMonth::new(NaiveDate::MAX.year(), 0).is_none());

        let first = DisplayMonth::containing(NaiveDate::MIN);
        assert_eq!(first.year(), NaiveDate::MIN.year() + 1);
        assert_eq!(first.month0(), 0);
        assert_eq!(first.previous(), first);

        for month in [last, first] {
            let grid = month_grid(month, &DateBounds::default(), today, None);
            assert_eq!(grid.len(), GRID_CELLS, "{}", month.label());
            assert_eq!(grid[0].date.weekday(), chrono::Weekday::Sun);
            let leading = month.first_day().weekday().num_days_from_sunday() as usize;
            assert_eq!(grid[leading].date, month.first_day());
        }
    }
}
