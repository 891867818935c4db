//! Error types for search and assembly operations.

use std::error::Error;
use std::fmt::{Display, Formatter};

use kaal_time::TimeError;
use kaal_vedic_base::VedicError;

use crate::provider::ProviderError;

/// Errors from boundary searches, panchang assembly, and scans.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum SearchError {
    /// The ephemeris provider failed for a single query.
    Provider(ProviderError),
    /// Classification or hora division rejected its inputs.
    Vedic(VedicError),
    /// Instant or calendar conversion failed.
    Time(TimeError),
    /// Invalid search or scan configuration.
    InvalidConfig(&'static str),
    /// A required boundary was not bracketed within the search span.
    NoConvergence(&'static str),
}

impl Display for SearchError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Provider(e) => write!(f, "provider error: {e}"),
            Self::Vedic(e) => write!(f, "{e}"),
            Self::Time(e) => write!(f, "time error: {e}"),
            Self::InvalidConfig(msg) => write!(f, "invalid config: {msg}"),
            Self::NoConvergence(msg) => write!(f, "no convergence: {msg}"),
        }
    }
}

impl Error for SearchError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Provider(e) => Some(e),
            Self::Vedic(e) => Some(e),
            Self::Time(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ProviderError> for SearchError {
    fn from(e: ProviderError) -> Self {
        Self::Provider(e)
    }
}

impl From<VedicError> for SearchError {
    fn from(e: VedicError) -> Self {
        Self::Vedic(e)
    }
}

impl From<TimeError> for SearchError {
    fn from(e: TimeError) -> Self {
        Self::Time(e)
    }
}
