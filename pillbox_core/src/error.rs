//! Error types for the pillbox_core library.

use chrono::NaiveDate;
use std::io;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for pillbox_core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// IO error occurred
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// TOML parsing error
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Configuration validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Medication history could not be found or used
    #[error("History error: {0}")]
    History(String),

    /// An event is dated before the creation record.
    ///
    /// The caller handed over an inconsistent history; nothing is computed.
    #[error("created was not the first event: event on {event_day} precedes creation on {created_day}")]
    TemporalOrdering {
        event_day: NaiveDate,
        created_day: NaiveDate,
    },

    /// The fold met an event whose day is not the current day cursor.
    #[error("skipped a day: expected an event on {expected}, found one on {found}")]
    SkippedDay {
        expected: NaiveDate,
        found: NaiveDate,
    },

    /// A pill count left the representable range
    #[error("count out of range: {pills} pills adjusted by {change} on {day}")]
    CountOutOfRange {
        day: NaiveDate,
        pills: i64,
        change: i64,
    },

    /// Advancing past the last representable calendar day
    #[error("date out of range: no calendar day follows {0}")]
    DateOutOfRange(NaiveDate),
}
