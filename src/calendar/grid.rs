use chrono::{Datelike, NaiveDate, Weekday};

use super::{PickerConfig, YearMonth};

pub const GRID_COLUMNS: usize = 7;
pub const GRID_ROWS:    usize = 6;
pub const GRID_CELLS:   usize = GRID_COLUMNS * GRID_ROWS;

// ─── Cells ────────────────────────────────────────────────────────────────────

/// One position of the 6×7 day body. `date == None` is a blank cell.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GridCell {
    pub date:        Option<NaiveDate>,
    pub enabled:     bool,
    pub highlighted: bool,
}

impl GridCell {
    pub fn day(&self) -> Option<u32> { self.date.map(|d| d.day()) }
    pub fn is_blank(&self) -> bool { self.date.is_none() }
}

/// A freshly computed month grid. Rebuilt on every navigation, never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthGrid {
    month: YearMonth,
    cells: [GridCell; GRID_CELLS],
}

impl MonthGrid {
    pub fn month(&self) -> YearMonth { self.month }

    pub fn cells(&self) -> &[GridCell; GRID_CELLS] { &self.cells }

    pub fn cell(&self, index: usize) -> Option<&GridCell> { self.cells.get(index) }

    /// Row-major weeks, always six of them.
    pub fn rows(&self) -> impl Iterator<Item = &[GridCell]> { self.cells.chunks(GRID_COLUMNS) }

    /// The date behind `index` if that cell can be picked.
    pub fn resolve(&self, index: usize) -> Option<NaiveDate> {
        self.cell(index).filter(|c| c.enabled).and_then(|c| c.date)
    }

    pub fn position(&self, date: NaiveDate) -> Option<usize> {
        self.cells.iter().position(|c| c.date == Some(date))
    }

    pub fn highlighted(&self) -> Option<usize> {
        self.cells.iter().position(|c| c.highlighted)
    }

    pub fn first_enabled(&self) -> Option<usize> {
        self.cells.iter().position(|c| c.enabled)
    }

    pub fn enabled_count(&self) -> usize {
        self.cells.iter().filter(|c| c.enabled).count()
    }
}

// ─── Builder ──────────────────────────────────────────────────────────────────

/// Number of cells in front of the 1st when weeks start on `week_start`.
pub fn leading_blanks(first: Weekday, week_start: Weekday) -> u32 {
    (first.num_days_from_monday() + 7 - week_start.num_days_from_monday()) % 7
}

/// Lays `month` out on the 42-cell grid.
///
/// Only days of `month` itself get a date; spill-over days and days outside
/// the configured bounds are blank. Excluded weekdays keep their date but are
/// disabled. The highlight follows `anchor`'s day-of-month, whatever month
/// `anchor` is in.
pub fn build_grid(month: YearMonth, anchor: NaiveDate, config: &PickerConfig) -> MonthGrid {
    let offset = leading_blanks(month.first_day().weekday(), config.week_start()) as usize;
    let total  = month.days() as usize;
    let bounds = config.bounds();

    let mut cells = [GridCell::default(); GRID_CELLS];
    for (index, cell) in cells.iter_mut().enumerate() {
        let Some(day) = (index + 1).checked_sub(offset).filter(|d| (1..=total).contains(d)) else {
            continue;
        };
        let Some(date) = month.day(day as u32) else { continue };
        if !bounds.contains(date) {
            continue;
        }
        cell.date        = Some(date);
        cell.enabled     = !config.is_excluded(date.weekday());
        cell.highlighted = date.day() == anchor.day();
    }

    MonthGrid { month, cells }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::Picker;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn month(y: i32, m: u32) -> YearMonth {
        YearMonth::new(y, m).unwrap()
    }

    const WEEKDAYS: [Weekday; 7] = [
        Weekday::Mon, Weekday::Tue, Weekday::Wed, Weekday::Thu,
        Weekday::Fri, Weekday::Sat, Weekday::Sun,
    ];

    #[test]
    fn february_2024_sunday_start() {
        let anchor = ymd(2024, 2, 15);
        let grid   = build_grid(YearMonth::of(anchor), anchor, &PickerConfig::default());

        let first_row: Vec<Option<u32>> = grid.rows().next().unwrap().iter().map(GridCell::day).collect();
        assert_eq!(first_row, vec![None, None, None, None, Some(1), Some(2), Some(3)]);

        assert!(grid.position(ymd(2024, 2, 29)).is_some());
        let fifteenth = grid.position(ymd(2024, 2, 15)).unwrap();
        assert!(grid.cells()[fifteenth].highlighted);
        assert_eq!(grid.highlighted(), Some(fifteenth));
    }

    #[test]
    fn always_forty_two_cells_and_one_per_day() {
        let config = PickerConfig::default();
        for year in [1900, 2023, 2024, 2100] {
            for m in 1..=12 {
                let ym   = month(year, m);
                let grid = build_grid(ym, ym.first_day(), &config);
                assert_eq!(grid.cells().len(), GRID_CELLS);
                assert_eq!(grid.rows().count(), GRID_ROWS);
                let dated = grid.cells().iter().filter(|c| !c.is_blank()).count();
                assert_eq!(dated as u32, ym.days(), "{ym}");
            }
        }
    }

    #[test]
    fn leading_blanks_match_every_week_start() {
        for start in WEEKDAYS {
            let mut picker = Picker::new(ymd(2024, 1, 1));
            picker.week_start(start);
            let config = picker.build();
            for m in 1..=12 {
                let ym    = month(2024, m);
                let grid  = build_grid(ym, ym.first_day(), &config);
                let first = grid.cells().iter().position(|c| !c.is_blank()).unwrap();
                assert_eq!(first as u32, leading_blanks(ym.first_day().weekday(), start));
                assert_eq!(grid.cells()[first].date, Some(ym.first_day()));

                // every column holds a single weekday, counted from `start`
                for (index, cell) in grid.cells().iter().enumerate() {
                    if let Some(date) = cell.date {
                        let column = (index % GRID_COLUMNS) as u32;
                        assert_eq!(
                            date.weekday().num_days_from_monday(),
                            (start.num_days_from_monday() + column) % 7,
                            "{date} in column {column}",
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn week_start_shifts_the_first_column() {
        // June 2025 starts on a Sunday
        let ym = month(2025, 6);
        let mut picker = Picker::new(ym.first_day());
        picker.week_start(Weekday::Mon);
        let grid = build_grid(ym, ym.first_day(), &picker.build());
        assert_eq!(grid.cells()[6].date, Some(ym.first_day()));

        picker.week_start(Weekday::Sun);
        let grid = build_grid(ym, ym.first_day(), &picker.build());
        assert_eq!(grid.cells()[0].date, Some(ym.first_day()));

        // a Sunday 1st lands four columns in when weeks start on Wednesday
        picker.week_start(Weekday::Wed);
        let grid = build_grid(ym, ym.first_day(), &picker.build());
        assert_eq!(grid.cells()[4].date, Some(ym.first_day()));
    }

    #[test]
    fn six_row_months_fit() {
        // March 2025: Saturday 1st, 31 days, Sunday start -> 6 rows
        let ym   = month(2025, 3);
        let grid = build_grid(ym, ym.first_day(), &PickerConfig::default());
        assert_eq!(grid.cells()[6].date, Some(ym.first_day()));
        assert_eq!(grid.cells()[36].date, Some(ymd(2025, 3, 31)));
        assert!(grid.cells()[37..].iter().all(GridCell::is_blank));
    }

    #[test]
    fn excluded_weekdays_are_disabled() {
        let anchor = ymd(2024, 5, 10);
        let mut picker = Picker::new(anchor);
        picker.exclude([Weekday::Sat, Weekday::Sun]);
        let grid = build_grid(YearMonth::of(anchor), anchor, &picker.build());

        for cell in grid.cells() {
            let Some(date) = cell.date else {
                assert!(!cell.enabled);
                continue;
            };
            let weekend = matches!(date.weekday(), Weekday::Sat | Weekday::Sun);
            assert_eq!(cell.enabled, !weekend, "{date}");
        }
        assert_eq!(grid.enabled_count(), 23);
    }

    #[test]
    fn excluding_everything_leaves_nothing_selectable() {
        let anchor = ymd(2024, 5, 10);
        let mut picker = Picker::new(anchor);
        picker.exclude(WEEKDAYS);
        let grid = build_grid(YearMonth::of(anchor), anchor, &picker.build());
        assert_eq!(grid.enabled_count(), 0);
        assert_eq!(grid.first_enabled(), None);
        assert!((0..GRID_CELLS).all(|i| grid.resolve(i).is_none()));
        // the days are still shown
        assert_eq!(grid.cells().iter().filter(|c| !c.is_blank()).count(), 31);
    }

    #[test]
    fn out_of_bounds_days_are_blank() {
        let anchor = ymd(2024, 3, 20);
        let mut picker = Picker::new(anchor);
        picker.earliest(ymd(2024, 3, 15)).unwrap().latest(ymd(2024, 3, 25)).unwrap();
        let grid = build_grid(YearMonth::of(anchor), anchor, &picker.build());

        let days: Vec<u32> = grid.cells().iter().filter_map(GridCell::day).collect();
        assert_eq!(days, (15..=25).collect::<Vec<_>>());
        assert!(grid.position(ymd(2024, 3, 14)).is_none());
        assert!(grid.cells().iter().filter(|c| c.is_blank()).all(|c| !c.enabled && !c.highlighted));
    }

    #[test]
    fn highlight_follows_anchor_day_in_other_months() {
        let anchor = ymd(2024, 2, 15);
        let config = PickerConfig::default();
        let grid   = build_grid(month(2024, 5), anchor, &config);
        let idx    = grid.highlighted().unwrap();
        assert_eq!(grid.cells()[idx].date, Some(ymd(2024, 5, 15)));
        assert_eq!(grid.cells().iter().filter(|c| c.highlighted).count(), 1);

        // no 31st in April
        let grid = build_grid(month(2024, 4), ymd(2024, 1, 31), &config);
        assert_eq!(grid.highlighted(), None);
    }

    #[test]
    fn excluded_anchor_day_is_still_highlighted() {
        // 2024-02-17 is a Saturday
        let anchor = ymd(2024, 2, 17);
        let mut picker = Picker::new(anchor);
        picker.exclude([Weekday::Sat]);
        let grid = build_grid(YearMonth::of(anchor), anchor, &picker.build());
        let cell = grid.cells()[grid.highlighted().unwrap()];
        assert_eq!(cell.date, Some(anchor));
        assert!(!cell.enabled);
        assert_eq!(grid.resolve(grid.highlighted().unwrap()), None);
    }

    #[test]
    fn build_is_deterministic() {
        let anchor = ymd(2031, 7, 4);
        let config = PickerConfig::default();
        assert_eq!(
            build_grid(YearMonth::of(anchor), anchor, &config),
            build_grid(YearMonth::of(anchor), anchor, &config),
        );
    }

    #[test]
    fn resolve_rejects_out_of_range_index() {
        let anchor = ymd(2024, 2, 15);
        let grid   = build_grid(YearMonth::of(anchor), anchor, &PickerConfig::default());
        assert_eq!(grid.resolve(GRID_CELLS), None);
        assert_eq!(grid.resolve(0), None);
        assert_eq!(grid.resolve(4), Some(ymd(2024, 2, 1)));
    }
}
