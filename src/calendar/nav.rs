use chrono::{Months, NaiveDate};

use super::{Bounds, YearMonth};

/// One press of a `<<`, `<`, `>` or `>>` control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Step {
    PrevYear,
    PrevMonth,
    NextMonth,
    NextYear,
}

impl Step {
    pub const ALL: [Step; 4] = [Step::PrevYear, Step::PrevMonth, Step::NextMonth, Step::NextYear];

    pub fn is_backward(self) -> bool {
        matches!(self, Step::PrevYear | Step::PrevMonth)
    }

    fn months(self) -> Months {
        match self {
            Step::PrevYear | Step::NextYear   => Months::new(12),
            Step::PrevMonth | Step::NextMonth => Months::new(1),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Step::PrevYear  => "<<",
            Step::PrevMonth => "<",
            Step::NextMonth => ">",
            Step::NextYear  => ">>",
        }
    }
}

/// Moves `date` by one step, clamping the day to the end of a shorter month
/// (Jan 31 + 1 month = Feb 28/29).
pub fn shift_date(date: NaiveDate, step: Step) -> Option<NaiveDate> {
    if step.is_backward() {
        date.checked_sub_months(step.months())
    } else {
        date.checked_add_months(step.months())
    }
}

/// The month one step away from `current`. `None` past chrono's range.
pub fn apply_step(current: YearMonth, step: Step) -> Option<YearMonth> {
    shift_date(current.first_day(), step).map(YearMonth::of)
}

/// Whether `step` keeps the displayed month within `bounds`.
///
/// Checked per month: a bound anywhere inside a month lets the grid show that
/// whole month, but never the month beyond it.
pub fn can_step(current: YearMonth, step: Step, bounds: &Bounds) -> bool {
    let Some(candidate) = apply_step(current, step) else { return false };
    if step.is_backward() {
        bounds.earliest.map_or(true, |e| YearMonth::of(e) <= candidate)
    } else {
        bounds.latest.map_or(true, |l| candidate <= YearMonth::of(l))
    }
}
