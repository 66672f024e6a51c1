use anyhow::Result;
use chrono::{NaiveDate, Weekday};
use datepick::{ConfigError, Picker};
use serde::Deserialize;
use std::path::PathBuf;

/// `config.toml`:
///
/// ```toml
/// theme = "nord"
///
/// [picker]
/// week_start  = "Mon"
/// exclude     = ["Sat", "Sun"]
/// day_names   = ["Lu", "Ma", "Me", "Je", "Ve", "Sa", "Di"]
/// month_names = ["janvier", "février", "mars", "avril", "mai", "juin",
///                "juillet", "août", "septembre", "octobre", "novembre", "décembre"]
/// ```
#[derive(Debug, Deserialize, Default)]
pub struct AppConfig {
    pub theme:  Option<String>,
    pub picker: Option<PickerSection>,
}

#[derive(Debug, Deserialize, Default)]
pub struct PickerSection {
    pub week_start:  Option<Weekday>,
    pub exclude:     Option<Vec<Weekday>>,
    pub day_names:   Option<Vec<String>>,
    pub month_names: Option<Vec<String>>,
}

impl AppConfig {
    pub fn load() -> Result<Self> {
        let path = config_dir().join("config.toml");
        if path.exists() {
            Self::parse(&std::fs::read_to_string(&path)?)
        } else {
            Ok(AppConfig::default())
        }
    }

    pub fn parse(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Copies the file's week and naming settings onto `picker`.
    pub fn apply(&self, picker: &mut Picker) -> Result<(), ConfigError> {
        let Some(p) = &self.picker else { return Ok(()) };
        if let Some(start) = p.week_start {
            picker.week_start(start);
        }
        if let Some(names) = &p.day_names {
            picker.day_names(names.as_slice())?;
        }
        if let Some(names) = &p.month_names {
            picker.month_names(names.as_slice())?;
        }
        if let Some(days) = &p.exclude {
            picker.exclude(days.iter().copied());
        }
        Ok(())
    }

    /// Fails on settings no picker would accept, so they surface at startup.
    pub fn check(&self) -> Result<(), ConfigError> {
        self.apply(&mut Picker::new(NaiveDate::MIN))
    }
}

pub fn config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("datepick")
}
