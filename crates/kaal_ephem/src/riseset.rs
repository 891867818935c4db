//! Sunrise, sunset, moonrise and moonset.
//!
//! Iterative hour-angle refinement: start from the meridian transit nearest
//! the supplied local noon, step to the hour angle at which the body's
//! centre reaches its standard altitude, then recompute the body's place at
//! the estimate and correct until the step is below a tenth of a second.
//!
//! Standard altitudes (Meeus ch. 15): −0°50′ for the Sun (refraction plus
//! semidiameter); `0.7275·π − 0°34′` for the Moon, where π is its horizontal
//! parallax. Both are lowered by the dip of the horizon for an elevated
//! observer.

use std::f64::consts::TAU;

use kaal_search::{RiseSet, SunMoonTimes};
use kaal_time::{JulianDay, SIDEREAL_RATE_RAD_PER_DAY, gmst_rad, local_sidereal_time_rad};
use kaal_vedic_base::{GeoLocation, Graha};
use tracing::trace;

use crate::AnalyticEphemeris;
use crate::coords::wrap_pi;
use crate::error::EphemError;

/// Refinement iterations; the Moon needs more than the Sun.
const MAX_ITERATIONS: usize = 10;

/// Convergence threshold in days (~0.086 s).
const CONVERGENCE_DAYS: f64 = 1.0e-6;

/// A final correction larger than this (~1.4 min) means the iteration
/// wandered and the event is reported as undefined.
const ACCEPT_DAYS: f64 = 1.0e-3;

/// Sun standard altitude, degrees.
const SUN_STANDARD_ALTITUDE_DEG: f64 = -0.8333;

/// Horizon refraction term of the Moon's standard altitude, degrees.
const MOON_REFRACTION_DEG: f64 = 0.5667;

/// Mean hour-angle rate of the Moon, radians per day.
const MOON_HOUR_ANGLE_RATE: f64 = TAU * 0.966;

/// Rising or setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RiseSetEvent {
    Rise,
    Set,
}

impl RiseSetEvent {
    fn is_rising(self) -> bool {
        matches!(self, Self::Rise)
    }
}

/// Dip of the sea horizon for an observer `altitude_m` above it, degrees.
fn horizon_dip_deg(altitude_m: f64) -> f64 {
    0.0293 * altitude_m.max(0.0).sqrt()
}

fn hour_angle_rate(body: Graha) -> f64 {
    match body {
        Graha::Chandra => MOON_HOUR_ANGLE_RATE,
        _ => SIDEREAL_RATE_RAD_PER_DAY,
    }
}

/// Right ascension, declination and standard altitude (radians) at `at`.
fn body_state(
    eph: &AnalyticEphemeris,
    body: Graha,
    at: JulianDay,
    location: &GeoLocation,
) -> Result<(f64, f64, f64), EphemError> {
    let (eq, place) = eph.equatorial(body, at)?;
    let h0_deg = match body {
        Graha::Chandra => 0.7275 * place.parallax_deg() - MOON_REFRACTION_DEG,
        _ => SUN_STANDARD_ALTITUDE_DEG,
    } - horizon_dip_deg(location.altitude_m);
    Ok((eq.ra_rad, eq.dec_rad, h0_deg.to_radians()))
}

/// Hour angle of the standard altitude, or the circumpolar state.
fn target_hour_angle(h0: f64, phi: f64, dec: f64) -> Result<f64, RiseSet> {
    let cos_h0 = (h0.sin() - phi.sin() * dec.sin()) / (phi.cos() * dec.cos());
    if cos_h0.is_nan() {
        return Err(RiseSet::Undefined);
    }
    if cos_h0 > 1.0 {
        return Err(RiseSet::AlwaysDown);
    }
    if cos_h0 < -1.0 {
        return Err(RiseSet::AlwaysUp);
    }
    Ok(cos_h0.acos())
}

fn hour_angle(at: JulianDay, ra: f64, location: &GeoLocation) -> f64 {
    let lst = local_sidereal_time_rad(gmst_rad(at), location.longitude_rad());
    wrap_pi(lst - ra)
}

/// Rise or set of the Sun or Moon about the transit nearest `local_noon`.
pub fn rise_set(
    eph: &AnalyticEphemeris,
    body: Graha,
    location: &GeoLocation,
    event: RiseSetEvent,
    local_noon: JulianDay,
) -> Result<RiseSet, EphemError> {
    let phi = location.latitude_rad();
    let rate = hour_angle_rate(body);

    let (ra, dec, h0) = body_state(eph, body, local_noon, location)?;
    let h_target = match target_hour_angle(h0, phi, dec) {
        Ok(h) => h,
        Err(state) => return Ok(state),
    };

    let transit = local_noon.add_days(-hour_angle(local_noon, ra, location) / rate);
    let mut estimate = if event.is_rising() {
        transit.add_days(-h_target / rate)
    } else {
        transit.add_days(h_target / rate)
    };

    let mut correction = f64::INFINITY;
    for _ in 0..MAX_ITERATIONS {
        let (ra_i, dec_i, h0_i) = body_state(eph, body, estimate, location)?;
        let h_i = match target_hour_angle(h0_i, phi, dec_i) {
            Ok(h) => h,
            Err(state) => return Ok(state),
        };
        let ha_target = if event.is_rising() { -h_i } else { h_i };
        let dha = wrap_pi(ha_target - hour_angle(estimate, ra_i, location));
        correction = dha / rate;
        estimate = estimate.add_days(correction);
        if correction.abs() < CONVERGENCE_DAYS {
            break;
        }
    }

    if !estimate.value().is_finite() || correction.abs() > ACCEPT_DAYS {
        trace!(?body, ?event, correction, "rise/set did not settle");
        return Ok(RiseSet::Undefined);
    }
    Ok(RiseSet::Event(estimate))
}

/// All four Sun and Moon events for the civil day around `local_noon`.
pub fn sun_moon_times(
    eph: &AnalyticEphemeris,
    local_noon: JulianDay,
    location: &GeoLocation,
) -> Result<SunMoonTimes, EphemError> {
    Ok(SunMoonTimes {
        sunrise: rise_set(eph, Graha::Surya, location, RiseSetEvent::Rise, local_noon)?,
        sunset: rise_set(eph, Graha::Surya, location, RiseSetEvent::Set, local_noon)?,
        moonrise: rise_set(eph, Graha::Chandra, location, RiseSetEvent::Rise, local_noon)?,
        moonset: rise_set(eph, Graha::Chandra, location, RiseSetEvent::Set, local_noon)?,
    })
}
