//! ΔT = TT − UT.
//!
//! Piecewise polynomials of Espenak & Meeus (NASA eclipse web site, 2006).
//! Accuracy is a few seconds over 1800–2050, which is far below the
//! tolerances of day-level calendar work.

use crate::julian::{JulianDay, SECONDS_PER_DAY, jd_to_calendar};

/// ΔT in seconds for a decimal year.
pub fn delta_t_seconds(year: f64) -> f64 {
    let y = year;
    if y < 1800.0 {
        let u = (y - 1820.0) / 100.0;
        -20.0 + 32.0 * u * u
    } else if y < 1860.0 {
        let t = y - 1800.0;
        13.72 - 0.332447 * t + 0.0068612 * t.powi(2) + 0.0041116 * t.powi(3)
            - 0.00037436 * t.powi(4)
            + 0.0000121272 * t.powi(5)
            - 0.0000001699 * t.powi(6)
            + 0.000000000875 * t.powi(7)
    } else if y < 1900.0 {
        let t = y - 1860.0;
        7.62 + 0.5737 * t - 0.251754 * t.powi(2) + 0.01680668 * t.powi(3)
            - 0.0004473624 * t.powi(4)
            + t.powi(5) / 233_174.0
    } else if y < 1920.0 {
        let t = y - 1900.0;
        -2.79 + 1.494119 * t - 0.0598939 * t.powi(2) + 0.0061966 * t.powi(3)
            - 0.000197 * t.powi(4)
    } else if y < 1941.0 {
        let t = y - 1920.0;
        21.20 + 0.84493 * t - 0.076100 * t.powi(2) + 0.0020936 * t.powi(3)
    } else if y < 1961.0 {
        let t = y - 1950.0;
        29.07 + 0.407 * t - t.powi(2) / 233.0 + t.powi(3) / 2547.0
    } else if y < 1986.0 {
        let t = y - 1975.0;
        45.45 + 1.067 * t - t.powi(2) / 260.0 - t.powi(3) / 718.0
    } else if y < 2005.0 {
        let t = y - 2000.0;
        63.86 + 0.3345 * t - 0.060374 * t.powi(2)
            + 0.0017275 * t.powi(3)
            + 0.000651814 * t.powi(4)
            + 0.00002373599 * t.powi(5)
    } else if y < 2050.0 {
        let t = y - 2000.0;
        62.92 + 0.32217 * t + 0.005589 * t.powi(2)
    } else if y < 2150.0 {
        let u = (y - 1820.0) / 100.0;
        -20.0 + 32.0 * u * u - 0.5628 * (2150.0 - y)
    } else {
        let u = (y - 1820.0) / 100.0;
        -20.0 + 32.0 * u * u
    }
}

/// Decimal year of a Julian Day (month granularity is enough for ΔT).
fn decimal_year(jd: f64) -> f64 {
    let (y, m, _) = jd_to_calendar(jd);
    y as f64 + (m as f64 - 0.5) / 12.0
}

impl JulianDay {
    /// ΔT in seconds at this instant.
    pub fn delta_t_seconds(self) -> f64 {
        delta_t_seconds(decimal_year(self.0))
    }

    /// Julian Date on the TT scale (raw value, not a UT instant).
    pub fn to_jd_tt(self) -> f64 {
        self.0 + self.delta_t_seconds() / SECONDS_PER_DAY
    }
}
