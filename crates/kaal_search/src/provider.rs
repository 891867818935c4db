//! The ephemeris oracle consumed by every search in this crate.
//!
//! Positions, rise/set events, and eclipse extrema come from an
//! [`EphemerisProvider`]. The sidereal frame travels with each call as an
//! explicit [`EphemerisContext`] value; providers hold no mutable frame state.

use std::error::Error;
use std::fmt::{Display, Formatter};

use kaal_time::JulianDay;
use kaal_vedic_base::{AyanamshaSystem, GeoLocation, Graha};

/// Failure reported by an ephemeris provider for a single query.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum ProviderError {
    /// The provider does not model this body.
    UnsupportedBody(Graha),
    /// The instant lies outside the provider's supported span.
    OutOfRange(JulianDay),
    /// Any other provider-side failure.
    Failed(String),
}

impl Display for ProviderError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnsupportedBody(g) => write!(f, "body {} is not supported", g.english_name()),
            Self::OutOfRange(jd) => write!(f, "instant {jd} outside provider range"),
            Self::Failed(msg) => write!(f, "{msg}"),
        }
    }
}

impl Error for ProviderError {}

/// Sidereal reference frame for provider queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct EphemerisContext {
    /// Ayanamsha subtracted from tropical longitudes.
    pub ayanamsha: AyanamshaSystem,
    /// Apply nutation in longitude to the tropical positions.
    pub use_nutation: bool,
}

impl EphemerisContext {
    pub const fn new(ayanamsha: AyanamshaSystem, use_nutation: bool) -> Self {
        Self {
            ayanamsha,
            use_nutation,
        }
    }
}

/// Outcome of a rise or set query.
///
/// Circumpolar cases stay distinguishable from a computed instant.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(tag = "state", content = "at", rename_all = "snake_case"))]
pub enum RiseSet {
    Event(JulianDay),
    /// Body stays above the horizon all day.
    AlwaysUp,
    /// Body stays below the horizon all day.
    AlwaysDown,
    /// The event could not be determined.
    Undefined,
}

impl RiseSet {
    /// The instant, when one exists.
    pub fn event(self) -> Option<JulianDay> {
        match self {
            Self::Event(jd) => Some(jd),
            _ => None,
        }
    }
}

/// Rise and set events of the Sun and Moon for one local civil day.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SunMoonTimes {
    pub sunrise: RiseSet,
    pub sunset: RiseSet,
    pub moonrise: RiseSet,
    pub moonset: RiseSet,
}

/// Sun or Moon eclipse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum EclipseBody {
    Solar,
    Lunar,
}

/// Eclipse classification at greatest eclipse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum EclipseKind {
    Total,
    Annular,
    Partial,
    Penumbral,
}

/// Greatest-eclipse data reported by a provider.
///
/// For a solar eclipse every field is local to the observer passed to
/// [`EphemerisProvider::next_solar_eclipse`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EclipseExtremum {
    pub body: EclipseBody,
    pub kind: EclipseKind,
    pub peak: JulianDay,
    /// First contact, when the provider reports it.
    pub start: Option<JulianDay>,
    /// Last contact, when the provider reports it.
    pub end: Option<JulianDay>,
    /// Fraction of the eclipsed body's diameter covered at peak. Central
    /// solar eclipses report the Moon-to-Sun diameter ratio.
    pub magnitude: f64,
    /// Fraction of the Sun's disk area hidden at peak. Solar only.
    pub obscuration: Option<f64>,
}

/// A discrete panchang element with a governing angular quantity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum ElementKind {
    Tithi,
    Nakshatra,
    Yoga,
    Karana,
}

/// Search direction in time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
}

impl Direction {
    pub(crate) fn signed(self, step: f64) -> f64 {
        match self {
            Self::Forward => step,
            Self::Backward => -step,
        }
    }
}

/// Ephemeris oracle.
///
/// Implementations must be safe to share across the worker threads used by
/// year scans.
pub trait EphemerisProvider: Send + Sync {
    /// Sidereal ecliptic longitude of `body` in degrees, [0, 360).
    fn sidereal_longitude(
        &self,
        ctx: &EphemerisContext,
        body: Graha,
        at: JulianDay,
    ) -> Result<f64, ProviderError>;

    /// Rise and set events for the local civil day whose approximate local
    /// noon is `local_noon`. Sunrise precedes noon and sunset follows it
    /// where they exist; moonrise and moonset belong to the Moon's meridian
    /// transit nearest `local_noon`.
    fn sun_moon_times(
        &self,
        ctx: &EphemerisContext,
        local_noon: JulianDay,
        location: &GeoLocation,
    ) -> Result<SunMoonTimes, ProviderError>;

    /// Topocentric altitude of `body` above the horizon, degrees.
    fn altitude_deg(
        &self,
        ctx: &EphemerisContext,
        body: Graha,
        at: JulianDay,
        location: &GeoLocation,
    ) -> Result<f64, ProviderError>;

    /// First solar eclipse seen from `location` with its local maximum after
    /// `after` and the Sun above the horizon at that maximum.
    fn next_solar_eclipse(
        &self,
        ctx: &EphemerisContext,
        after: JulianDay,
        location: &GeoLocation,
    ) -> Result<Option<EclipseExtremum>, ProviderError>;

    /// First lunar eclipse with peak after `after`.
    fn next_lunar_eclipse(
        &self,
        ctx: &EphemerisContext,
        after: JulianDay,
    ) -> Result<Option<EclipseExtremum>, ProviderError>;

    /// Boundary of the element cell adjacent to `at`, when the provider can
    /// supply it directly: the start of the current cell for
    /// [`Direction::Backward`], its end for [`Direction::Forward`].
    ///
    /// The default defers to the boundary locator.
    fn adjacent_element(
        &self,
        _ctx: &EphemerisContext,
        _kind: ElementKind,
        _at: JulianDay,
        _direction: Direction,
    ) -> Result<Option<JulianDay>, ProviderError> {
        Ok(None)
    }
}
