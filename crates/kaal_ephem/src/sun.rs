//! Geocentric Sun from the low-accuracy solar theory (Meeus ch. 25).
//!
//! Good to about 0.01 degree in longitude over several centuries around
//! J2000. Latitude is taken as zero.

use kaal_vedic_base::normalize_360;

/// Astronomical unit, km.
pub const AU_KM: f64 = 149_597_870.7;

/// Geometric and apparent solar coordinates of date.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolarPosition {
    /// True geometric longitude referred to the mean equinox of date, degrees.
    pub true_longitude_deg: f64,
    /// Longitude corrected for aberration (not nutation), degrees.
    pub aberrated_longitude_deg: f64,
    pub distance_au: f64,
}

impl SolarPosition {
    pub fn distance_km(&self) -> f64 {
        self.distance_au * AU_KM
    }
}

/// Sun at `t` Julian centuries of TT since J2000.0.
pub fn solar_position(t: f64) -> SolarPosition {
    let l0 = 280.46646 + 36000.76983 * t + 0.0003032 * t * t;
    let m = (357.52911 + 35999.05029 * t - 0.0001537 * t * t).to_radians();
    let e = 0.016708634 - 0.000042037 * t - 0.0000001267 * t * t;

    let c = (1.914602 - 0.004817 * t - 0.000014 * t * t) * m.sin()
        + (0.019993 - 0.000101 * t) * (2.0 * m).sin()
        + 0.000289 * (3.0 * m).sin();

    let true_lon = normalize_360(l0 + c);
    let nu = m + c.to_radians();
    let r = 1.000001018 * (1.0 - e * e) / (1.0 + e * nu.cos());

    SolarPosition {
        true_longitude_deg: true_lon,
        aberrated_longitude_deg: normalize_360(true_lon - 20.4898 / 3600.0 / r),
        distance_au: r,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn meeus_example_25a() {
        // 1992 October 13.0 TD.
        let t = (2_448_908.5 - 2_451_545.0) / 36525.0;
        let sun = solar_position(t);
        assert!((sun.true_longitude_deg - 199.90988).abs() < 1e-3);
        assert!((sun.distance_au - 0.99766).abs() < 1e-4);
    }

    #[test]
    fn equinox_2024() {
        // March equinox 2024-03-20 03:06 UT.
        let t = (2_460_389.629 - 2_451_545.0) / 36525.0;
        let lon = solar_position(t).aberrated_longitude_deg;
        let off = kaal_vedic_base::shortest_arc_deg(0.0, lon);
        assert!(off.abs() < 0.02, "{off}");
    }
}
