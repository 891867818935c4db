//! Error types for Vedic classification.

use std::error::Error;
use std::fmt::{Display, Formatter};

use kaal_time::TimeError;

/// Errors from pure classification and division routines.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum VedicError {
    /// Error from instant or calendar conversion.
    Time(TimeError),
    /// Invalid geographic location parameter.
    InvalidLocation(&'static str),
    /// Inputs violate an ordering or range precondition.
    InvalidInput(&'static str),
}

impl Display for VedicError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Time(e) => write!(f, "time error: {e}"),
            Self::InvalidLocation(msg) => write!(f, "invalid location: {msg}"),
            Self::InvalidInput(msg) => write!(f, "invalid input: {msg}"),
        }
    }
}

impl Error for VedicError {}

impl From<TimeError> for VedicError {
    fn from(e: TimeError) -> Self {
        Self::Time(e)
    }
}
