//! Error type for the analytic ephemeris.

use std::error::Error;
use std::fmt::{Display, Formatter};

use kaal_search::{ProviderError, SearchError};
use kaal_time::JulianDay;
use kaal_vedic_base::Graha;

#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum EphemError {
    /// The series are not trusted this far from J2000.
    OutOfRange(JulianDay),
    /// Only the Sun and Moon are modelled.
    UnsupportedBody(Graha),
    /// A phase search needed for eclipse detection failed.
    Search(String),
}

impl Display for EphemError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::OutOfRange(jd) => write!(f, "instant {jd} outside the series validity range"),
            Self::UnsupportedBody(g) => write!(f, "body not modelled: {}", g.english_name()),
            Self::Search(msg) => write!(f, "phase search failed: {msg}"),
        }
    }
}

impl Error for EphemError {}

impl From<SearchError> for EphemError {
    fn from(e: SearchError) -> Self {
        Self::Search(e.to_string())
    }
}

impl From<EphemError> for ProviderError {
    fn from(e: EphemError) -> Self {
        match e {
            EphemError::OutOfRange(jd) => ProviderError::OutOfRange(jd),
            EphemError::UnsupportedBody(g) => ProviderError::UnsupportedBody(g),
            other => ProviderError::Failed(other.to_string()),
        }
    }
}
