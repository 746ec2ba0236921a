use chrono::NaiveDate;
use thiserror::Error;

/// Failures the engine reports to its callers. All of these are recoverable;
/// the engine never retries and never swallows them internally.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("invalid coordinate: {0}")]
    InvalidCoordinate(String),
    #[error("invalid range: {0}")]
    InvalidRange(String),
    #[error("invalid timezone: {0}")]
    InvalidTimezone(String),
    #[error("no solution at latitude {latitude:.4} on {date} (polar day or night)")]
    NoSolutionAtLatitude { latitude: f64, date: NaiveDate },
    #[error("schedule exhausted and no next-day schedule supplied")]
    NoUpcomingInstant,
    #[error("invalid schedule: {0}")]
    InvalidSchedule(String),
    #[error("solar calculation failed: {0}")]
    Calculation(String),
}

pub type Result<T> = std::result::Result<T, Error>;
