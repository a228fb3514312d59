//! Configuration error types
//!
//! The simulation itself never fails: positions are clamped and missing
//! subsystems are skipped. The only fallible edge is loading balance data.

use std::fmt;

/// Error returned when tuning data cannot be used.
#[derive(Debug)]
pub enum TuningError {
    /// The tuning file could not be read.
    Io(std::io::Error),

    /// The JSON document did not parse.
    Parse(serde_json::Error),

    /// A value parsed but is outside the range the simulation can run with.
    Invalid {
        /// Dotted path of the offending field (for logging).
        field: &'static str,
        /// Human-readable description of the accepted range.
        expected: &'static str,
    },
}

impl fmt::Display for TuningError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TuningError::Io(err) => write!(f, "tuning file could not be read: {}", err),
            TuningError::Parse(err) => write!(f, "tuning JSON did not parse: {}", err),
            TuningError::Invalid { field, expected } => {
                write!(f, "tuning field '{}' is invalid: expected {}", field, expected)
            }
        }
    }
}

impl std::error::Error for TuningError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TuningError::Io(err) => Some(err),
            TuningError::Parse(err) => Some(err),
            TuningError::Invalid { .. } => None,
        }
    }
}

impl From<std::io::Error> for TuningError {
    fn from(err: std::io::Error) -> Self {
        TuningError::Io(err)
    }
}

impl From<serde_json::Error> for TuningError {
    fn from(err: serde_json::Error) -> Self {
        TuningError::Parse(err)
    }
}
