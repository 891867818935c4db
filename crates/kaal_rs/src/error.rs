//! Error type for the almanac facade.

use std::error::Error;
use std::fmt::{Display, Formatter};

use kaal_search::SearchError;
use kaal_time::TimeError;
use kaal_vedic_base::VedicError;

#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum AlmanacError {
    /// Requested year lies outside the supported span.
    YearOutOfRange(i32),
    /// Rejected input, before any computation.
    InvalidInput(&'static str),
    /// Configuration could not be parsed or is inconsistent.
    Config(String),
    Vedic(VedicError),
    Time(TimeError),
    Search(SearchError),
}

impl Display for AlmanacError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::YearOutOfRange(y) => write!(
                f,
                "year {y} outside supported range {}..={}",
                crate::MIN_YEAR,
                crate::MAX_YEAR
            ),
            Self::InvalidInput(msg) => write!(f, "invalid input: {msg}"),
            Self::Config(msg) => write!(f, "config error: {msg}"),
            Self::Vedic(e) => write!(f, "{e}"),
            Self::Time(e) => write!(f, "time error: {e}"),
            Self::Search(e) => write!(f, "{e}"),
        }
    }
}

impl Error for AlmanacError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Vedic(e) => Some(e),
            Self::Time(e) => Some(e),
            Self::Search(e) => Some(e),
            _ => None,
        }
    }
}

impl From<VedicError> for AlmanacError {
    fn from(e: VedicError) -> Self {
        Self::Vedic(e)
    }
}

impl From<TimeError> for AlmanacError {
    fn from(e: TimeError) -> Self {
        Self::Time(e)
    }
}

impl From<SearchError> for AlmanacError {
    fn from(e: SearchError) -> Self {
        Self::Search(e)
    }
}

impl From<toml::de::Error> for AlmanacError {
    fn from(e: toml::de::Error) -> Self {
        Self::Config(e.to_string())
    }
}
