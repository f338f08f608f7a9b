use chrono::NaiveDate;
use thiserror::Error;

/// Centralized error type for the epiweek-br crate
#[derive(Error, Debug)]
pub enum EpiWeekError {
    #[error("date {0} is outside the covered epidemiological calendar")]
    DateOutOfRange(NaiveDate),

    #[error("malformed epidemiological calendar: {0}")]
    Calendar(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON (de)serialization error: {0}")]
    SerdeJson(#[from] serde_json::Error),
}

/// Alias for fallible operations in the epiweek-br crate
pub type EpiWeekResult<T> = Result<T, EpiWeekError>;
