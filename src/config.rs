use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use time::{format_description, macros::date, Date, Weekday};

const CONFIG_PATH_ENV_VAR: &str = "HABITGRID_CONFIG";

const DEFAULT_MONTH_FORMAT: &str = "[year]-[month]";

const DEFAULT_DAY_LABELS: [&str; 7] = ["SUN", "MON", "TUE", "WED", "THU", "FRI", "SAT"];

/// Returns the settings file to use: an explicit path if given, else
/// `$HABITGRID_CONFIG`, else `habitgrid/config.toml` in the user's config
/// directory
pub(crate) fn config_path(explicit: Option<PathBuf>) -> Result<PathBuf, ConfigError> {
    if let Some(path) = explicit {
        return Ok(path);
    }
    if let Some(path) = env::var_os(CONFIG_PATH_ENV_VAR).filter(|p| !p.is_empty()) {
        return Ok(PathBuf::from(path));
    }
    dirs::config_dir()
        .map(|dir| dir.join("habitgrid").join("config.toml"))
        .ok_or(ConfigError::NoConfigDir)
}

/// User preferences that shape every rendered calendar
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default, deny_unknown_fields, rename_all = "camelCase")]
pub(crate) struct Config {
    pub(crate) start_of_week: StartOfWeek,
    pub(crate) month_format: MonthFormat,
    pub(crate) display_head: bool,
    pub(crate) enable_raw_markup_in_marks: bool,
    // Must stay last so that it serializes as a trailing TOML table
    pub(crate) day_labels: DayLabels,
}

impl Default for Config {
    fn default() -> Config {
        Config {
            start_of_week: StartOfWeek::default(),
            month_format: MonthFormat::default(),
            display_head: true,
            enable_raw_markup_in_marks: false,
            day_labels: DayLabels::default(),
        }
    }
}

impl Config {
    /// Loads settings from `path`.  A file that does not exist yields the
    /// defaults.
    pub(crate) fn load(path: &Path) -> Result<Config, ConfigError> {
        let src = match fs::read_to_string(path) {
            Ok(src) => src,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                log::debug!("No settings file at {}; using defaults", path.display());
                return Ok(Config::default());
            }
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_owned(),
                    source,
                })
            }
        };
        toml::from_str(&src).map_err(|source| ConfigError::Parse {
            path: path.to_owned(),
            source: Box::new(source),
        })
    }

    pub(crate) fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let src = self.to_toml()?;
        let write = |path: &Path| -> io::Result<()> {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent)?;
            }
            fs::write(path, src)
        };
        write(path).map_err(|source| ConfigError::Write {
            path: path.to_owned(),
            source,
        })?;
        log::info!("Saved settings to {}", path.display());
        Ok(())
    }

    pub(crate) fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string(self)?)
    }

    /// Applies a single `key = value` edit.  On error the settings are left
    /// unchanged.
    pub(crate) fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let invalid = |reason: String| ConfigError::InvalidValue {
            key: key.to_owned(),
            value: value.to_owned(),
            reason,
        };
        match key {
            "startOfWeek" => {
                let index = value
                    .trim()
                    .parse::<u8>()
                    .map_err(|e| invalid(e.to_string()))?;
                self.start_of_week = StartOfWeek::try_from(index).map_err(invalid)?;
            }
            "monthFormat" => {
                self.month_format = MonthFormat::try_from(value.to_owned()).map_err(invalid)?;
            }
            "displayHead" => {
                self.display_head = parse_bool(value).map_err(invalid)?;
            }
            "enableRawMarkupInMarks" => {
                self.enable_raw_markup_in_marks = parse_bool(value).map_err(invalid)?;
            }
            _ => {
                let Some(wd) = weekday_from_name(key) else {
                    return Err(ConfigError::UnknownKey(key.to_owned()));
                };
                self.day_labels.set(wd, value);
            }
        }
        Ok(())
    }
}

/// Index of the weekday shown in the first column, counted from Sunday = 0
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(try_from = "u8", into = "u8")]
pub(crate) struct StartOfWeek(u8);

impl StartOfWeek {
    pub(crate) fn index(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for StartOfWeek {
    type Error = String;

    fn try_from(index: u8) -> Result<StartOfWeek, String> {
        if index < 7 {
            Ok(StartOfWeek(index))
        } else {
            Err(format!("start of week must be between 0 and 6, got {index}"))
        }
    }
}

impl From<StartOfWeek> for u8 {
    fn from(value: StartOfWeek) -> u8 {
        value.0
    }
}

/// A `time` format description used to write the month label, e.g.
/// `[year]-[month]` or `[month repr:long] [year]`
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(try_from = "String", into = "String")]
pub(crate) struct MonthFormat(String);

impl MonthFormat {
    pub(crate) fn format(&self, date: Date) -> String {
        match try_format(&self.0, date) {
            Ok(s) => s,
            Err(e) => {
                log::warn!("Could not format month label with {:?}: {e}", self.0);
                format!("{}-{:02}", date.year(), u8::from(date.month()))
            }
        }
    }
}

impl Default for MonthFormat {
    fn default() -> MonthFormat {
        MonthFormat(String::from(DEFAULT_MONTH_FORMAT))
    }
}

impl TryFrom<String> for MonthFormat {
    type Error = String;

    fn try_from(s: String) -> Result<MonthFormat, String> {
        // Formatting a sample date also rejects descriptions that ask for
        // components a date does not have, such as `[hour]`
        try_format(&s, date!(2021 - 01 - 15)).map_err(|e| e.to_string())?;
        Ok(MonthFormat(s))
    }
}

impl From<MonthFormat> for String {
    fn from(value: MonthFormat) -> String {
        value.0
    }
}

impl fmt::Display for MonthFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn try_format(description: &str, date: Date) -> Result<String, time::error::Error> {
    let items = format_description::parse_borrowed::<2>(description)?;
    Ok(date.format(&items)?)
}

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct DayLabels {
    sunday: String,
    monday: String,
    tuesday: String,
    wednesday: String,
    thursday: String,
    friday: String,
    saturday: String,
}

impl DayLabels {
    /// Label for the weekday `index` days after Sunday, wrapping around
    pub(crate) fn get(&self, index: u8) -> &str {
        match Weekday::Sunday.nth_next(index % 7) {
            Weekday::Sunday => &self.sunday,
            Weekday::Monday => &self.monday,
            Weekday::Tuesday => &self.tuesday,
            Weekday::Wednesday => &self.wednesday,
            Weekday::Thursday => &self.thursday,
            Weekday::Friday => &self.friday,
            Weekday::Saturday => &self.saturday,
        }
    }

    /// Sets the label for `wd`; an empty value restores the default
    pub(crate) fn set(&mut self, wd: Weekday, value: &str) {
        let index = usize::from(wd.number_days_from_sunday());
        let value = if value.is_empty() {
            DEFAULT_DAY_LABELS
                .get(index)
                .copied()
                .unwrap_or_default()
                .to_owned()
        } else {
            value.to_owned()
        };
        let slot = match wd {
            Weekday::Sunday => &mut self.sunday,
            Weekday::Monday => &mut self.monday,
            Weekday::Tuesday => &mut self.tuesday,
            Weekday::Wednesday => &mut self.wednesday,
            Weekday::Thursday => &mut self.thursday,
            Weekday::Friday => &mut self.friday,
            Weekday::Saturday => &mut self.saturday,
        };
        *slot = value;
    }
}

impl Default for DayLabels {
    fn default() -> DayLabels {
        let [sunday, monday, tuesday, wednesday, thursday, friday, saturday] =
            DEFAULT_DAY_LABELS.map(String::from);
        DayLabels {
            sunday,
            monday,
            tuesday,
            wednesday,
            thursday,
            friday,
            saturday,
        }
    }
}

fn weekday_from_name(name: &str) -> Option<Weekday> {
    match name.to_ascii_lowercase().as_str() {
        "sunday" => Some(Weekday::Sunday),
        "monday" => Some(Weekday::Monday),
        "tuesday" => Some(Weekday::Tuesday),
        "wednesday" => Some(Weekday::Wednesday),
        "thursday" => Some(Weekday::Thursday),
        "friday" => Some(Weekday::Friday),
        "saturday" => Some(Weekday::Saturday),
        _ => None,
    }
}

fn parse_bool(value: &str) -> Result<bool, String> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Ok(true),
        "false" | "no" | "off" | "0" => Ok(false),
        _ => Err(String::from("expected true or false")),
    }
}

/// Settings bound to the file they were loaded from.  Every successful edit
/// is written back before returning.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Settings {
    path: PathBuf,
    config: Config,
}

impl Settings {
    pub(crate) fn open(path: PathBuf) -> Result<Settings, ConfigError> {
        let config = Config::load(&path)?;
        Ok(Settings { path, config })
    }

    pub(crate) fn config(&self) -> &Config {
        &self.config
    }

    pub(crate) fn edit(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let mut config = self.config.clone();
        config.set(key, value)?;
        config.save(&self.path)?;
        self.config = config;
        Ok(())
    }
}
