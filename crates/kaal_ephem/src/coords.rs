//! Ecliptic to equatorial conversion and horizon altitude.

use std::f64::consts::{PI, TAU};

use crate::EARTH_RADIUS_KM;

/// WGS84 flattening.
const EARTH_FLATTENING: f64 = 1.0 / 298.257_223_563;

/// Right ascension and declination, radians. RA in [0, 2π).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Equatorial {
    pub ra_rad: f64,
    pub dec_rad: f64,
}

/// Convert ecliptic longitude/latitude (degrees) with obliquity (degrees).
pub fn ecliptic_to_equatorial(lon_deg: f64, lat_deg: f64, obliquity_deg: f64) -> Equatorial {
    let (lon, lat, eps) = (
        lon_deg.to_radians(),
        lat_deg.to_radians(),
        obliquity_deg.to_radians(),
    );
    let ra = (lon.sin() * eps.cos() - lat.tan() * eps.sin()).atan2(lon.cos());
    let dec = (lat.sin() * eps.cos() + lat.cos() * eps.sin() * lon.sin()).asin();
    Equatorial {
        ra_rad: ra.rem_euclid(TAU),
        dec_rad: dec,
    }
}

/// Wrap an angle to [-π, π].
pub fn wrap_pi(angle: f64) -> f64 {
    let a = angle.rem_euclid(TAU);
    if a > PI { a - TAU } else { a }
}

/// Geocentric altitude (radians) for hour angle `ha_rad` at latitude `phi_rad`.
pub fn altitude_rad(ha_rad: f64, dec_rad: f64, phi_rad: f64) -> f64 {
    (phi_rad.sin() * dec_rad.sin() + phi_rad.cos() * dec_rad.cos() * ha_rad.cos()).asin()
}

/// Reduce a geocentric altitude to topocentric for a body with horizontal
/// parallax `parallax_deg`.
pub fn topocentric_altitude_deg(geocentric_alt_deg: f64, parallax_deg: f64) -> f64 {
    let h = geocentric_alt_deg.to_radians();
    geocentric_alt_deg - (parallax_deg.to_radians().sin() * h.cos()).asin().to_degrees()
}

/// Rectangular equatorial coordinates of a body at `distance_km`.
pub fn equatorial_vector_km(eq: &Equatorial, distance_km: f64) -> [f64; 3] {
    let (sin_ra, cos_ra) = eq.ra_rad.sin_cos();
    let (sin_dec, cos_dec) = eq.dec_rad.sin_cos();
    [
        distance_km * cos_dec * cos_ra,
        distance_km * cos_dec * sin_ra,
        distance_km * sin_dec,
    ]
}

/// Geocentric position of an observer on the WGS84 ellipsoid in the
/// equatorial frame of date, km.
pub fn observer_vector_km(phi_rad: f64, height_km: f64, lst_rad: f64) -> [f64; 3] {
    let e2 = EARTH_FLATTENING * (2.0 - EARTH_FLATTENING);
    let (sin_phi, cos_phi) = phi_rad.sin_cos();
    let n = EARTH_RADIUS_KM / (1.0 - e2 * sin_phi * sin_phi).sqrt();
    let rho_cos = (n + height_km) * cos_phi;
    [
        rho_cos * lst_rad.cos(),
        rho_cos * lst_rad.sin(),
        (n * (1.0 - e2) + height_km) * sin_phi,
    ]
}

pub fn vector_norm(v: &[f64; 3]) -> f64 {
    (v[0] * v[0] + v[1] * v[1] + v[2] * v[2]).sqrt()
}

/// Angle between two vectors, degrees.
pub fn angle_between_deg(a: &[f64; 3], b: &[f64; 3]) -> f64 {
    let cross = [
        a[1] * b[2] - a[2] * b[1],
        a[2] * b[0] - a[0] * b[2],
        a[0] * b[1] - a[1] * b[0],
    ];
    let dot = a[0] * b[0] + a[1] * b[1] + a[2] * b[2];
    vector_norm(&cross).atan2(dot).to_degrees()
}
