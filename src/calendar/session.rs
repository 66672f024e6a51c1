use chrono::NaiveDate;

use super::{build_grid, can_step, shift_date, MonthGrid, PickerConfig, Step, YearMonth};

/// Everything a front end can ask of an open picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    Navigate(Step),
    /// Pick the cell at this grid index (0..42).
    Select(usize),
    Cancel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The displayed month changed; grid and title need repainting.
    Redraw,
    /// Nothing happened: blocked step, dead cell, or the session already ended.
    Ignored,
    Selected(NaiveDate),
    Cancelled,
}

/// One interaction with a picker, from opening to selection or cancellation.
#[derive(Debug, Clone)]
pub struct Session {
    config:   PickerConfig,
    anchor:   NaiveDate,
    // Moves with navigation, clamping its day; supplies the highlight day.
    cursor:   NaiveDate,
    grid:     MonthGrid,
    open:     bool,
    selected: Option<NaiveDate>,
}

impl Session {
    pub fn open(anchor: NaiveDate, config: PickerConfig) -> Self {
        let grid = build_grid(YearMonth::of(anchor), anchor, &config);
        tracing::info!("picker opened on {anchor}");
        Self { config, anchor, cursor: anchor, grid, open: true, selected: None }
    }

    pub fn apply(&mut self, intent: Intent) -> Outcome {
        if !self.open {
            return Outcome::Ignored;
        }
        match intent {
            Intent::Navigate(step) => self.navigate(step),
            Intent::Select(index)  => self.select(index),
            Intent::Cancel => {
                self.open = false;
                tracing::info!("picker cancelled");
                Outcome::Cancelled
            }
        }
    }

    fn navigate(&mut self, step: Step) -> Outcome {
        let current = self.displayed();
        if !can_step(current, step, self.config.bounds()) {
            tracing::debug!("{step:?} from {current} blocked by bounds");
            return Outcome::Ignored;
        }
        let Some(cursor) = shift_date(self.cursor, step) else { return Outcome::Ignored };
        self.cursor = cursor;
        self.grid   = build_grid(YearMonth::of(cursor), cursor, &self.config);
        Outcome::Redraw
    }

    fn select(&mut self, index: usize) -> Outcome {
        match self.grid.resolve(index) {
            Some(date) => {
                self.open     = false;
                self.selected = Some(date);
                tracing::info!("picker selected {date}");
                Outcome::Selected(date)
            }
            None => {
                tracing::debug!("cell {index} is not selectable");
                Outcome::Ignored
            }
        }
    }

    /// Whether `step` would currently be accepted.
    pub fn can_step(&self, step: Step) -> bool {
        self.open && can_step(self.displayed(), step, self.config.bounds())
    }

    pub fn grid(&self) -> &MonthGrid { &self.grid }
    pub fn displayed(&self) -> YearMonth { self.grid.month() }
    pub fn title(&self) -> String { self.config.title(self.displayed()) }
    pub fn header(&self) -> [String; 7] { self.config.header() }
    pub fn config(&self) -> &PickerConfig { &self.config }
    pub fn anchor(&self) -> NaiveDate { self.anchor }
    pub fn cursor(&self) -> NaiveDate { self.cursor }
    pub fn selected(&self) -> Option<NaiveDate> { self.selected }
    pub fn is_open(&self) -> bool { self.open }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::Picker;
    use chrono::Weekday;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn month(y: i32, m: u32) -> YearMonth {
        YearMonth::new(y, m).unwrap()
    }

    #[test]
    fn opens_on_anchor_month() {
        let s = Picker::new(ymd(2024, 2, 15)).open();
        assert!(s.is_open());
        assert_eq!(s.displayed(), month(2024, 2));
        assert_eq!(s.title(), "February 2024");
        assert_eq!(s.header()[0], "Sun");
        assert_eq!(s.selected(), None);
        assert_eq!(s.anchor(), ymd(2024, 2, 15));
    }

    #[test]
    fn navigation_updates_month_and_title() {
        let mut s = Picker::new(ymd(2024, 12, 10)).open();
        assert_eq!(s.apply(Intent::Navigate(Step::NextMonth)), Outcome::Redraw);
        assert_eq!(s.title(), "January 2025");
        assert_eq!(s.apply(Intent::Navigate(Step::PrevYear)), Outcome::Redraw);
        assert_eq!(s.displayed(), month(2024, 1));
        assert_eq!(s.apply(Intent::Navigate(Step::NextYear)), Outcome::Redraw);
        assert_eq!(s.apply(Intent::Navigate(Step::PrevMonth)), Outcome::Redraw);
        assert_eq!(s.displayed(), month(2024, 12));
        assert_eq!(s.grid().month(), s.displayed());
    }

    #[test]
    fn blocked_navigation_is_a_no_op() {
        let mut picker = Picker::new(ymd(2024, 3, 20));
        picker.earliest(ymd(2024, 3, 15)).unwrap();
        let mut s = picker.open();
        let before = s.grid().clone();

        assert!(!s.can_step(Step::PrevMonth));
        assert_eq!(s.apply(Intent::Navigate(Step::PrevMonth)), Outcome::Ignored);
        assert_eq!(s.apply(Intent::Navigate(Step::PrevYear)), Outcome::Ignored);
        assert_eq!(s.displayed(), month(2024, 3));
        assert_eq!(s.grid(), &before);
        assert!(s.is_open());

        assert_eq!(s.apply(Intent::Navigate(Step::NextMonth)), Outcome::Redraw);
        assert_eq!(s.apply(Intent::Navigate(Step::PrevMonth)), Outcome::Redraw);
        assert_eq!(s.displayed(), month(2024, 3));
    }

    #[test]
    fn latest_bound_stops_forward_steps() {
        let mut picker = Picker::new(ymd(2024, 3, 20));
        picker.latest(ymd(2024, 4, 2)).unwrap();
        let mut s = picker.open();
        assert_eq!(s.apply(Intent::Navigate(Step::NextYear)), Outcome::Ignored);
        assert_eq!(s.apply(Intent::Navigate(Step::NextMonth)), Outcome::Redraw);
        assert_eq!(s.apply(Intent::Navigate(Step::NextMonth)), Outcome::Ignored);
        let days: Vec<u32> = s.grid().cells().iter().filter_map(|c| c.day()).collect();
        assert_eq!(days, vec![1, 2]);
    }

    #[test]
    fn selecting_an_enabled_cell_ends_the_session() {
        let mut s = Picker::new(ymd(2024, 2, 15)).open();
        let index = s.grid().position(ymd(2024, 2, 20)).unwrap();
        assert_eq!(s.apply(Intent::Select(index)), Outcome::Selected(ymd(2024, 2, 20)));
        assert_eq!(s.selected(), Some(ymd(2024, 2, 20)));
        assert!(!s.is_open());

        // further intents are ignored
        assert_eq!(s.apply(Intent::Navigate(Step::NextMonth)), Outcome::Ignored);
        assert_eq!(s.apply(Intent::Cancel), Outcome::Ignored);
        assert_eq!(s.selected(), Some(ymd(2024, 2, 20)));
        assert!(!s.can_step(Step::NextMonth));
    }

    #[test]
    fn selection_after_navigation_uses_displayed_month() {
        let mut s = Picker::new(ymd(2024, 2, 15)).open();
        s.apply(Intent::Navigate(Step::NextMonth));
        let index = s.grid().position(ymd(2024, 3, 1)).unwrap();
        assert_eq!(s.apply(Intent::Select(index)), Outcome::Selected(ymd(2024, 3, 1)));
    }

    #[test]
    fn blank_and_excluded_cells_are_ignored() {
        let mut picker = Picker::new(ymd(2024, 2, 15));
        picker.exclude([Weekday::Sat, Weekday::Sun]);
        let mut s = picker.open();

        // index 0 is blank: Feb 2024 starts on a Thursday
        assert_eq!(s.apply(Intent::Select(0)), Outcome::Ignored);
        let saturday = s.grid().position(ymd(2024, 2, 3)).unwrap();
        assert_eq!(s.apply(Intent::Select(saturday)), Outcome::Ignored);
        assert_eq!(s.apply(Intent::Select(99)), Outcome::Ignored);
        assert_eq!(s.selected(), None);
        assert!(s.is_open());
    }

    #[test]
    fn cancel_leaves_no_selection() {
        let mut s = Picker::new(ymd(2024, 2, 15)).open();
        assert_eq!(s.apply(Intent::Cancel), Outcome::Cancelled);
        assert_eq!(s.selected(), None);
        assert!(!s.is_open());
        assert_eq!(s.apply(Intent::Select(20)), Outcome::Ignored);
    }

    #[test]
    fn highlight_day_drifts_with_clamping() {
        let mut s = Picker::new(ymd(2024, 1, 31)).open();
        s.apply(Intent::Navigate(Step::NextMonth));
        assert_eq!(s.cursor(), ymd(2024, 2, 29));
        let idx = s.grid().highlighted().unwrap();
        assert_eq!(s.grid().cells()[idx].date, Some(ymd(2024, 2, 29)));

        // the clamped day sticks once it has drifted
        s.apply(Intent::Navigate(Step::NextMonth));
        let idx = s.grid().highlighted().unwrap();
        assert_eq!(s.grid().cells()[idx].date, Some(ymd(2024, 3, 29)));
    }

    #[test]
    fn all_days_excluded_can_only_cancel() {
        let mut picker = Picker::new(ymd(2024, 2, 15));
        picker.exclude([
            Weekday::Mon, Weekday::Tue, Weekday::Wed, Weekday::Thu,
            Weekday::Fri, Weekday::Sat, Weekday::Sun,
        ]);
        let mut s = picker.open();
        for index in 0..crate::calendar::GRID_CELLS {
            assert_eq!(s.apply(Intent::Select(index)), Outcome::Ignored);
        }
        assert_eq!(s.apply(Intent::Cancel), Outcome::Cancelled);
        assert_eq!(s.selected(), None);
    }
}
