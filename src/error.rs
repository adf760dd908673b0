use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Reasons a markup block cannot be turned into a calendar.  The messages are
/// shown to the user as-is in place of the table.
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub(crate) enum DirectiveError {
    #[error("Fail: Month not found. e.g. [month: 2021-01]")]
    MissingMonth,
    #[error("Fail: Invalid Date. {token}")]
    InvalidMonth { token: String },
}

#[derive(Debug, Error)]
pub(crate) enum ConfigError {
    #[error("failed to read settings from {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse settings file {}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: Box<toml::de::Error>,
    },
    #[error("failed to serialize settings")]
    Serialize(#[from] toml::ser::Error),
    #[error("failed to write settings to {}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("could not determine a location for the settings file")]
    NoConfigDir,
    #[error("unknown setting {0:?}")]
    UnknownKey(String),
    #[error("invalid value {value:?} for {key}: {reason}")]
    InvalidValue {
        key: String,
        value: String,
        reason: String,
    },
}
