use hifitime::Epoch;
use thiserror::Error;

use crate::events::Direction;

#[derive(Error, Debug)]
pub enum ObsPlanError {
    #[error("No {direction} crossing found within {horizon_hours} h after {start}")]
    NoCrossingFound {
        direction: Direction,
        start: Epoch,
        horizon_hours: f64,
    },

    #[error("Invalid coordinate: {0}")]
    InvalidCoordinate(String),

    #[error("Invalid sexagesimal string: {0}")]
    InvalidSexagesimal(String),

    #[error("Invalid calendar date (expected YYYY-MM-DD): {0}")]
    InvalidDate(String),

    #[error("Invalid sample count {0}: at least two instants are required")]
    InvalidSampleCount(usize),

    #[error("Invalid night window: start {start} is not before end {end}")]
    InvalidWindow { start: Epoch, end: Epoch },

    #[error("Unknown observatory: {0}")]
    UnknownObservatory(String),

    #[error("ROOTS finding error: {0}")]
    RootFindingError(#[from] roots::SearchError),

    #[error("Time system error: {0}")]
    TimeError(#[from] hifitime::HifitimeError),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Unable to perform file operation: {0}")]
    IoError(#[from] std::io::Error),
}

impl From<toml::de::Error> for ObsPlanError {
    fn from(err: toml::de::Error) -> Self {
        ObsPlanError::ConfigError(err.to_string())
    }
}

impl PartialEq for ObsPlanError {
    fn eq(&self, other: &Self) -> bool {
        use ObsPlanError::*;
        match (self, other) {
            (
                NoCrossingFound {
                    direction: d1,
                    start: s1,
                    horizon_hours: h1,
                },
                NoCrossingFound {
                    direction: d2,
                    start: s2,
                    horizon_hours: h2,
                },
            ) => d1 == d2 && s1 == s2 && h1 == h2,
            (InvalidCoordinate(a), InvalidCoordinate(b)) => a == b,
            (InvalidSexagesimal(a), InvalidSexagesimal(b)) => a == b,
            (InvalidDate(a), InvalidDate(b)) => a == b,
            (InvalidSampleCount(a), InvalidSampleCount(b)) => a == b,
            (InvalidWindow { start: s1, end: e1 }, InvalidWindow { start: s2, end: e2 }) => {
                s1 == s2 && e1 == e2
            }
            (UnknownObservatory(a), UnknownObservatory(b)) => a == b,
            (RootFindingError(a), RootFindingError(b)) => a == b,
            (ConfigError(a), ConfigError(b)) => a == b,

            // Not comparable: equal when the variant matches
            (TimeError(_), TimeError(_)) => true,
            (IoError(_), IoError(_)) => true,

            _ => false,
        }
    }
}
