//! Analytic Sun and Moon ephemeris for kaal.
//!
//! This crate provides:
//! - Truncated solar (Meeus ch. 25) and lunar (ELP-2000/82, Meeus ch. 47) series
//! - IAU 2000B nutation (leading terms) and true obliquity
//! - Sunrise, sunset, moonrise and moonset by iterative hour-angle refinement
//! - Lunar eclipses from shadow geometry and local solar eclipse circumstances
//! - [`AnalyticEphemeris`], an [`kaal_search::EphemerisProvider`] built on the above
//!
//! Only the Sun and Moon are modelled; queries for other grahas fail with
//! [`EphemError::UnsupportedBody`].

pub mod coords;
pub mod eclipse;
pub mod error;
pub mod moon;
pub mod nutation;
pub mod provider;
pub mod riseset;
pub mod sun;

pub use coords::{Equatorial, altitude_rad, ecliptic_to_equatorial, topocentric_altitude_deg};
pub use eclipse::{LunarShadow, next_lunar_eclipse, next_solar_eclipse};
pub use error::EphemError;
pub use moon::{LunarPosition, lunar_position};
pub use nutation::{mean_obliquity_deg, nutation_deg, true_obliquity_deg};
pub use riseset::{RiseSetEvent, rise_set, sun_moon_times};
pub use sun::{AU_KM, SolarPosition, solar_position};

use kaal_search::EphemerisContext;
use kaal_time::JulianDay;
use kaal_vedic_base::{Graha, ayanamsha_deg, normalize_360};

/// Earth equatorial radius in km (IAU 2015 Resolution B3).
pub const EARTH_RADIUS_KM: f64 = 6378.137;

/// Sun nominal radius in km (IAU 2015 Resolution B3).
pub const SUN_RADIUS_KM: f64 = 696_000.0;

/// Moon mean radius in km.
pub const MOON_RADIUS_KM: f64 = 1737.4;

/// Default validity span either side of J2000, Julian centuries.
const DEFAULT_MAX_CENTURIES: f64 = 5.0;

/// Geocentric ecliptic place of a body referred to the equinox of date.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EclipticPlace {
    pub longitude_deg: f64,
    pub latitude_deg: f64,
    pub distance_km: f64,
}

impl EclipticPlace {
    /// Angular semidiameter for a body of `radius_km`, degrees.
    pub fn semidiameter_deg(&self, radius_km: f64) -> f64 {
        (radius_km / self.distance_km).asin().to_degrees()
    }

    /// Equatorial horizontal parallax, degrees.
    pub fn parallax_deg(&self) -> f64 {
        (EARTH_RADIUS_KM / self.distance_km).asin().to_degrees()
    }

    /// Great-circle separation from another place, degrees.
    pub fn separation_deg(&self, other: &EclipticPlace) -> f64 {
        let (l1, b1) = (self.longitude_deg.to_radians(), self.latitude_deg.to_radians());
        let (l2, b2) = (other.longitude_deg.to_radians(), other.latitude_deg.to_radians());
        let cos_sep = b1.sin() * b2.sin() + b1.cos() * b2.cos() * (l1 - l2).cos();
        cos_sep.clamp(-1.0, 1.0).acos().to_degrees()
    }
}

/// Sun and Moon from truncated analytic series.
///
/// Stateless apart from its validity span, so one instance can be shared
/// across scan threads.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnalyticEphemeris {
    max_centuries: f64,
}

impl Default for AnalyticEphemeris {
    fn default() -> Self {
        Self {
            max_centuries: DEFAULT_MAX_CENTURIES,
        }
    }
}

impl AnalyticEphemeris {
    pub fn new() -> Self {
        Self::default()
    }

    /// Accept instants within `max_centuries` of J2000.
    pub fn with_max_centuries(max_centuries: f64) -> Self {
        Self { max_centuries }
    }

    /// Julian centuries of TT since J2000 for `at`, or `OutOfRange`.
    pub fn tt_centuries(&self, at: JulianDay) -> Result<f64, EphemError> {
        let t = (at.to_jd_tt() - kaal_time::J2000_JD) / kaal_time::DAYS_PER_CENTURY;
        if !t.is_finite() || t.abs() > self.max_centuries {
            return Err(EphemError::OutOfRange(at));
        }
        Ok(t)
    }

    /// Apparent place of the Sun or Moon. Nutation in longitude is added
    /// when `with_nutation` is set.
    pub fn ecliptic_place(
        &self,
        body: Graha,
        at: JulianDay,
        with_nutation: bool,
    ) -> Result<EclipticPlace, EphemError> {
        let t = self.tt_centuries(at)?;
        let dpsi = if with_nutation { nutation_deg(t).0 } else { 0.0 };
        match body {
            Graha::Surya => {
                let sun = solar_position(t);
                Ok(EclipticPlace {
                    longitude_deg: normalize_360(sun.aberrated_longitude_deg + dpsi),
                    latitude_deg: 0.0,
                    distance_km: sun.distance_km(),
                })
            }
            Graha::Chandra => {
                let moon = lunar_position(t);
                Ok(EclipticPlace {
                    longitude_deg: normalize_360(moon.longitude_deg + dpsi),
                    latitude_deg: moon.latitude_deg,
                    distance_km: moon.distance_km,
                })
            }
            other => Err(EphemError::UnsupportedBody(other)),
        }
    }

    /// Geocentric right ascension and declination of date.
    pub fn equatorial(
        &self,
        body: Graha,
        at: JulianDay,
    ) -> Result<(Equatorial, EclipticPlace), EphemError> {
        let place = self.ecliptic_place(body, at, true)?;
        let eps = true_obliquity_deg(self.tt_centuries(at)?);
        let eq = ecliptic_to_equatorial(place.longitude_deg, place.latitude_deg, eps);
        Ok((eq, place))
    }

    /// Sidereal longitude in the frame named by `ctx`, degrees in [0, 360).
    pub fn sidereal_longitude_deg(
        &self,
        ctx: &EphemerisContext,
        body: Graha,
        at: JulianDay,
    ) -> Result<f64, EphemError> {
        let place = self.ecliptic_place(body, at, ctx.use_nutation)?;
        let t = self.tt_centuries(at)?;
        Ok(normalize_360(place.longitude_deg - ayanamsha_deg(ctx.ayanamsha, t)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kaal_vedic_base::AyanamshaSystem;

    #[test]
    fn rejects_far_instants() {
        let eph = AnalyticEphemeris::new();
        let far = JulianDay::new(kaal_time::J2000_JD + 800.0 * 365.25);
        assert_eq!(
            eph.ecliptic_place(Graha::Surya, far, false),
            Err(EphemError::OutOfRange(far))
        );
        let wide = AnalyticEphemeris::with_max_centuries(10.0);
        assert!(wide.ecliptic_place(Graha::Surya, far, false).is_ok());
    }

    #[test]
    fn planets_are_unsupported() {
        let eph = AnalyticEphemeris::new();
        assert_eq!(
            eph.ecliptic_place(Graha::Guru, JulianDay::J2000, false),
            Err(EphemError::UnsupportedBody(Graha::Guru))
        );
    }

    #[test]
    fn sidereal_sun_at_equinox_is_minus_ayanamsha() {
        let eph = AnalyticEphemeris::new();
        let equinox = JulianDay::new(2_460_389.629);
        let ctx = EphemerisContext::default();
        let lon = eph.sidereal_longitude_deg(&ctx, Graha::Surya, equinox).unwrap();
        assert!((lon - (360.0 - 24.19)).abs() < 0.05, "{lon}");
        assert_eq!(ctx.ayanamsha, AyanamshaSystem::Lahiri);
    }

    #[test]
    fn nutation_shifts_longitude_by_seconds() {
        let eph = AnalyticEphemeris::new();
        let at = JulianDay::new(2_460_389.629);
        let plain = eph.ecliptic_place(Graha::Chandra, at, false).unwrap();
        let nutated = eph.ecliptic_place(Graha::Chandra, at, true).unwrap();
        let diff = kaal_vedic_base::shortest_arc_deg(plain.longitude_deg, nutated.longitude_deg);
        assert!(diff.abs() > 0.0 && diff.abs() * 3600.0 < 20.0, "{diff}");
    }

    #[test]
    fn separation_of_opposite_points() {
        let a = EclipticPlace { longitude_deg: 10.0, latitude_deg: 0.0, distance_km: 1.0 };
        let b = EclipticPlace { longitude_deg: 190.0, latitude_deg: 0.0, distance_km: 1.0 };
        assert!((a.separation_deg(&b) - 180.0).abs() < 1e-9);
    }
}
