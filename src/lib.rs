//! Month-grid date picker engine.
//!
//! A [`Picker`] collects validated settings for one anchor date and opens a
//! [`Session`]. The session turns navigation and selection [`Intent`]s into a
//! fresh [`MonthGrid`] of 42 cells, or into the picked date.

pub mod calendar;

pub use calendar::{
    apply_step, build_grid, can_step, days_in_month, Bounds, ConfigError, GridCell, Intent,
    MonthGrid, Outcome, Picker, PickerConfig, Session, Step, YearMonth, GRID_CELLS,
};
