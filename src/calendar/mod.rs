//! Calendar engine: month values, grid building, navigation rules and the
//! picker configuration/session built on top of them.
//!
//! Everything in here is pure. Nothing touches a terminal, a file or a clock;
//! the host application feeds dates in and renders what comes out.

use std::fmt;

use chrono::{Datelike, NaiveDate};

pub mod config;
pub mod grid;
pub mod nav;
pub mod session;

pub use config::{ConfigError, Picker, PickerConfig, DEFAULT_DAY_NAMES, DEFAULT_MONTH_NAMES};
pub use grid::{build_grid, leading_blanks, GridCell, MonthGrid, GRID_CELLS, GRID_COLUMNS, GRID_ROWS};
pub use nav::{apply_step, can_step, shift_date, Step};
pub use session::{Intent, Outcome, Session};

// ─── Year / month ─────────────────────────────────────────────────────────────

/// The (year, month) a grid is showing. Ordered by year, then month.
///
/// Stored as the first day of the month, so a `YearMonth` can only exist for
/// months chrono can represent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth(NaiveDate);

impl YearMonth {
    /// `None` when `month` is outside 1..=12 or the year is out of range.
    pub fn new(year: i32, month: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, 1).map(Self)
    }

    /// The month containing `date`.
    pub fn of(date: NaiveDate) -> Self {
        Self(date.with_day(1).unwrap_or(date))
    }

    pub fn year(self) -> i32 { self.0.year() }
    pub fn month(self) -> u32 { self.0.month() }

    pub fn first_day(self) -> NaiveDate { self.0 }

    /// The given day of this month, if it exists.
    pub fn day(self, day: u32) -> Option<NaiveDate> { self.0.with_day(day) }

    pub fn days(self) -> u32 { days_in_month(self.year(), self.month()) }

    pub fn contains(self, date: NaiveDate) -> bool { Self::of(date) == self }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year(), self.month())
    }
}

pub fn days_in_month(year: i32, month: u32) -> u32 {
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    };
    match (NaiveDate::from_ymd_opt(year, month, 1), next) {
        (Some(first), Some(next)) => (next - first).num_days() as u32,
        // December of the last representable year
        (Some(_), None) => 31,
        (None, _) => 0,
    }
}

// ─── Bounds ───────────────────────────────────────────────────────────────────

/// Optional earliest / latest selectable dates, both inclusive.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Bounds {
    pub earliest: Option<NaiveDate>,
    pub latest:   Option<NaiveDate>,
}

impl Bounds {
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.earliest.map_or(true, |e| e <= date) && self.latest.map_or(true, |l| date <= l)
    }
}
