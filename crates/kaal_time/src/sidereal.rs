//! Greenwich Mean Sidereal Time and Earth Rotation Angle.
//!
//! Functions take a [`JulianDay`] on the UT scale; UT1 − UTC (< 0.9 s) is
//! ignored, which is well inside the rise/set tolerances used here.
//!
//! Sources:
//! - ERA: IERS Conventions 2010, Eq. 5.15.
//! - GMST polynomial: Capitaine et al. 2003, Table 2.

use std::f64::consts::{PI, TAU};

use crate::julian::{DAYS_PER_CENTURY, J2000_JD, JulianDay};

/// Arcseconds to radians.
const ARCSEC_TO_RAD: f64 = PI / (180.0 * 3600.0);

/// Sidereal rotation rate in radians per UT day.
pub const SIDEREAL_RATE_RAD_PER_DAY: f64 = TAU * 1.002_737_811_911_354_6;

/// Earth Rotation Angle in radians, [0, 2π).
pub fn earth_rotation_angle_rad(jd: JulianDay) -> f64 {
    let du = jd.0 - J2000_JD;
    let theta = TAU * (0.779_057_273_264_0 + 1.002_737_811_911_354_6 * du);
    theta.rem_euclid(TAU)
}

/// Greenwich Mean Sidereal Time in radians, [0, 2π).
pub fn gmst_rad(jd: JulianDay) -> f64 {
    let era = earth_rotation_angle_rad(jd);
    let t = (jd.0 - J2000_JD) / DAYS_PER_CENTURY;
    let poly_arcsec = 0.014506 + 4612.156534 * t + 1.3915817 * t.powi(2)
        - 0.00000044 * t.powi(3)
        - 0.000029956 * t.powi(4)
        - 0.0000000368 * t.powi(5);
    (era + poly_arcsec * ARCSEC_TO_RAD).rem_euclid(TAU)
}

/// Local sidereal time from GMST and east longitude, radians in [0, 2π).
pub fn local_sidereal_time_rad(gmst: f64, longitude_east_rad: f64) -> f64 {
    (gmst + longitude_east_rad).rem_euclid(TAU)
}

/// Approximate local solar noon for the UTC date starting at `midnight`.
pub fn approximate_local_noon(midnight: JulianDay, longitude_deg: f64) -> JulianDay {
    JulianDay(midnight.0 + 0.5 - longitude_deg / 360.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn era_at_j2000() {
        let deg = earth_rotation_angle_rad(JulianDay::J2000).to_degrees();
        assert!((deg - 280.46).abs() < 0.1, "era = {deg}");
    }

    #[test]
    fn gmst_close_to_era_near_j2000() {
        let era = earth_rotation_angle_rad(JulianDay::J2000);
        let gmst = gmst_rad(JulianDay::J2000);
        assert!((gmst - era).abs() < 1e-6);
    }

    #[test]
    fn gmst_meeus_example_12a() {
        // 1987 April 10, 0h UT: GMST = 13h10m46.3668s = 197.693195°
        let jd = JulianDay(2_446_895.5);
        let deg = gmst_rad(jd).to_degrees();
        assert!((deg - 197.693195).abs() < 1e-3, "gmst = {deg}");
    }

    #[test]
    fn lst_wraps() {
        let lst = local_sidereal_time_rad(6.0, 1.0);
        assert!((0.0..TAU).contains(&lst));
    }

    #[test]
    fn local_noon_shifts_with_longitude() {
        let midnight = JulianDay(2_460_394.5);
        let delhi = approximate_local_noon(midnight, 77.209);
        assert!((delhi.0 - (2_460_394.5 + 0.5 - 77.209 / 360.0)).abs() < 1e-12);
        let greenwich = approximate_local_noon(midnight, 0.0);
        assert!(greenwich.0 > delhi.0);
    }
}
