use std::collections::HashSet;

use chrono::{NaiveDate, Weekday};
use thiserror::Error;

use super::{Bounds, Session, YearMonth};

pub const DEFAULT_MONTH_NAMES: [&str; 12] = [
    "January", "February", "March",     "April",   "May",      "June",
    "July",    "August",   "September", "October", "November", "December",
];

/// Indexed by `Weekday::num_days_from_monday`.
pub const DEFAULT_DAY_NAMES: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

// ─── Errors ───────────────────────────────────────────────────────────────────

/// A configuration change that was refused. The previous value stays in place.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("there must be 7 day names, {0} provided")]
    DayNames(usize),
    #[error("there must be 12 month names, {0} provided")]
    MonthNames(usize),
    #[error("earliest date {earliest} must not come after the calendar date {anchor}")]
    EarliestAfterAnchor { earliest: NaiveDate, anchor: NaiveDate },
    #[error("latest date {latest} must not come before the calendar date {anchor}")]
    LatestBeforeAnchor { latest: NaiveDate, anchor: NaiveDate },
}

// ─── Validated configuration ──────────────────────────────────────────────────

/// Immutable picker settings shared by grid building and navigation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickerConfig {
    week_start:  Weekday,
    excluded:    HashSet<Weekday>,
    bounds:      Bounds,
    day_names:   Option<[String; 7]>,
    month_names: [String; 12],
}

impl Default for PickerConfig {
    fn default() -> Self {
        Self {
            week_start:  Weekday::Sun,
            excluded:    HashSet::new(),
            bounds:      Bounds::default(),
            day_names:   None,
            month_names: DEFAULT_MONTH_NAMES.map(str::to_owned),
        }
    }
}

impl PickerConfig {
    pub fn week_start(&self) -> Weekday { self.week_start }
    pub fn bounds(&self) -> &Bounds { &self.bounds }
    pub fn excluded(&self) -> &HashSet<Weekday> { &self.excluded }
    pub fn is_excluded(&self, day: Weekday) -> bool { self.excluded.contains(&day) }

    /// Column labels, leftmost first. Without custom names the English short
    /// names are rotated to the week start.
    pub fn header(&self) -> [String; 7] {
        match &self.day_names {
            Some(names) => names.clone(),
            None => {
                let start = self.week_start.num_days_from_monday() as usize;
                std::array::from_fn(|i| DEFAULT_DAY_NAMES[(start + i) % 7].to_owned())
            }
        }
    }

    pub fn month_names(&self) -> &[String; 12] { &self.month_names }

    /// `"February 2024"`, or the configured equivalent.
    pub fn title(&self, month: YearMonth) -> String {
        format!("{} {}", self.month_names[month.month() as usize - 1], month.year())
    }
}

// ─── Builder ──────────────────────────────────────────────────────────────────

/// Collects settings for a picker opened on `anchor`.
///
/// Every setter validates on the spot; a rejected value never replaces the
/// current one. Calls chain through `?`:
///
/// ```
/// # use chrono::{NaiveDate, Weekday};
/// # use datepick::Picker;
/// # fn main() -> Result<(), datepick::ConfigError> {
/// let today = NaiveDate::from_ymd_opt(2024, 2, 15).unwrap();
/// let mut picker = Picker::new(today);
/// picker
///     .earliest(today)?
///     .latest(NaiveDate::from_ymd_opt(2025, 2, 15).unwrap())?
///     .exclude([Weekday::Sat, Weekday::Sun]);
/// let session = picker.open();
/// assert_eq!(session.title(), "February 2024");
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Picker {
    anchor: NaiveDate,
    config: PickerConfig,
}

impl Picker {
    pub fn new(anchor: NaiveDate) -> Self {
        Self { anchor, config: PickerConfig::default() }
    }

    pub fn anchor(&self) -> NaiveDate { self.anchor }
    pub fn config(&self) -> &PickerConfig { &self.config }

    pub fn week_start(&mut self, start: Weekday) -> &mut Self {
        self.config.week_start = start;
        self
    }

    /// Sets the week start together with matching column labels.
    pub fn week<S: AsRef<str>>(&mut self, start: Weekday, names: &[S]) -> Result<&mut Self, ConfigError> {
        let names = fixed::<7, S>(names).ok_or_else(|| reject(ConfigError::DayNames(names.len())))?;
        self.config.week_start = start;
        self.config.day_names  = Some(names);
        Ok(self)
    }

    pub fn day_names<S: AsRef<str>>(&mut self, names: &[S]) -> Result<&mut Self, ConfigError> {
        let names = fixed::<7, S>(names).ok_or_else(|| reject(ConfigError::DayNames(names.len())))?;
        self.config.day_names = Some(names);
        Ok(self)
    }

    pub fn month_names<S: AsRef<str>>(&mut self, names: &[S]) -> Result<&mut Self, ConfigError> {
        let names = fixed::<12, S>(names).ok_or_else(|| reject(ConfigError::MonthNames(names.len())))?;
        self.config.month_names = names;
        Ok(self)
    }

    /// Replaces the excluded weekdays. Excluding all seven is allowed.
    pub fn exclude<I: IntoIterator<Item = Weekday>>(&mut self, days: I) -> &mut Self {
        self.config.excluded = days.into_iter().collect();
        self
    }

    pub fn earliest(&mut self, earliest: NaiveDate) -> Result<&mut Self, ConfigError> {
        if earliest > self.anchor {
            return Err(reject(ConfigError::EarliestAfterAnchor { earliest, anchor: self.anchor }));
        }
        self.config.bounds.earliest = Some(earliest);
        Ok(self)
    }

    pub fn latest(&mut self, latest: NaiveDate) -> Result<&mut Self, ConfigError> {
        if latest < self.anchor {
            return Err(reject(ConfigError::LatestBeforeAnchor { latest, anchor: self.anchor }));
        }
        self.config.bounds.latest = Some(latest);
        Ok(self)
    }

    pub fn build(&self) -> PickerConfig { self.config.clone() }

    pub fn open(self) -> Session { Session::open(self.anchor, self.config) }
}

fn fixed<const N: usize, S: AsRef<str>>(names: &[S]) -> Option<[String; N]> {
    let owned: Vec<String> = names.iter().map(|s| s.as_ref().to_owned()).collect();
    owned.try_into().ok()
}

fn reject(err: ConfigError) -> ConfigError {
    tracing::debug!("picker configuration rejected: {err}");
    err
}
