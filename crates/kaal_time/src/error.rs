//! Error types for instant and calendar conversions.

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Errors from calendar conversion or instant construction.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum TimeError {
    /// A calendar date or time-of-day component is out of range.
    InvalidDate(String),
    /// The Julian Day cannot be represented as a chrono UTC timestamp.
    Unrepresentable(f64),
    /// An empty or inverted date range was requested.
    EmptyRange,
}

impl Display for TimeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidDate(msg) => write!(f, "invalid date: {msg}"),
            Self::Unrepresentable(jd) => write!(f, "JD {jd} has no UTC representation"),
            Self::EmptyRange => write!(f, "date range is empty"),
        }
    }
}

impl Error for TimeError {}
