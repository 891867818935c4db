//! Truncated IAU 2000B nutation and mean obliquity.
//!
//! The thirteen largest lunisolar terms of IERS Conventions 2010 Table 5.3b
//! reproduce the full model to about 0.1 arcsecond, well below the accuracy
//! of the Sun and Moon series they correct.

use std::f64::consts::TAU;

/// Arcseconds to radians.
const AS2RAD: f64 = TAU / 1_296_000.0;

/// Delaunay arguments `[l, l', F, D, Ω]` in radians, `t` in Julian
/// centuries of TT since J2000.0 (IERS Conventions 2010, Table 5.2e).
pub fn fundamental_arguments(t: f64) -> [f64; 5] {
    let t2 = t * t;
    let t3 = t2 * t;
    let t4 = t3 * t;

    let l = (485868.249036 + 1717915923.2178 * t + 31.8792 * t2 + 0.051635 * t3 - 0.00024470 * t4)
        * AS2RAD;
    let lp = (1287104.79305 + 129596581.0481 * t - 0.5532 * t2 + 0.000136 * t3 - 0.00001149 * t4)
        * AS2RAD;
    let f = (335779.526232 + 1739527262.8478 * t - 12.7512 * t2 - 0.001037 * t3 + 0.00000417 * t4)
        * AS2RAD;
    let d = (1072260.70369 + 1602961601.2090 * t - 6.3706 * t2 + 0.006593 * t3 - 0.00003169 * t4)
        * AS2RAD;
    let om =
        (450160.398036 - 6962890.5431 * t + 7.4722 * t2 + 0.007702 * t3 - 0.00005939 * t4) * AS2RAD;

    [l, lp, f, d, om]
}

/// Rows: `[nl, nl', nF, nD, nΩ, S, S', C, C']`, amplitudes in 0.1 μas.
#[rustfmt::skip]
static NUTATION_TERMS: [[i64; 9]; 13] = [
    [   0,   0,   0,   0,   1, -172064161,  -174666,   92052331,    9086],
    [   0,   0,   2,  -2,   2,  -13170906,    -1675,    5730336,   -3015],
    [   0,   0,   2,   0,   2,   -2276413,     -234,     978459,    -485],
    [   0,   0,   0,   0,   2,    2074554,      207,    -897492,     470],
    [   0,   1,   0,   0,   0,    1475877,    -3633,      73871,    -184],
    [   0,   1,   2,  -2,   2,    -516821,     1226,     224386,    -677],
    [   1,   0,   0,   0,   0,     711159,       73,      -6750,       0],
    [   0,   0,   2,   0,   1,    -387298,     -367,     200728,      18],
    [   1,   0,   2,   0,   2,    -301461,      -36,     129025,     -63],
    [   0,  -1,   2,  -2,   2,     215829,     -494,     -95929,     299],
    [   0,   0,   2,  -2,   1,     128227,      137,     -68982,      -9],
    [  -1,   0,   2,   0,   2,     123457,       11,     -53311,      32],
    [  -1,   0,   0,   2,   0,     156994,       10,      -1235,       0],
];

/// Nutation in longitude and obliquity `(Δψ, Δε)`, degrees.
pub fn nutation_deg(t: f64) -> (f64, f64) {
    let args = fundamental_arguments(t);
    let mut dpsi = 0.0;
    let mut deps = 0.0;
    for row in &NUTATION_TERMS {
        let arg: f64 = row[..5]
            .iter()
            .zip(args.iter())
            .map(|(n, a)| *n as f64 * a)
            .sum();
        dpsi += (row[5] as f64 + row[6] as f64 * t) * arg.sin();
        deps += (row[7] as f64 + row[8] as f64 * t) * arg.cos();
    }
    (dpsi * 1e-7 / 3600.0, deps * 1e-7 / 3600.0)
}

/// Mean obliquity of the ecliptic (IAU 2006), degrees.
pub fn mean_obliquity_deg(t: f64) -> f64 {
    let arcsec = 84381.406 - 46.836769 * t - 0.0001831 * t * t + 0.00200340 * t.powi(3);
    arcsec / 3600.0
}

/// True obliquity, degrees.
pub fn true_obliquity_deg(t: f64) -> f64 {
    mean_obliquity_deg(t) + nutation_deg(t).1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn amplitude_is_bounded() {
        for i in 0..40 {
            let t = -2.0 + 0.1 * i as f64;
            let (dpsi, deps) = nutation_deg(t);
            assert!(dpsi.abs() * 3600.0 < 20.0);
            assert!(deps.abs() * 3600.0 < 11.0);
        }
    }

    #[test]
    fn obliquity_at_j2000() {
        assert!((mean_obliquity_deg(0.0) - 23.439_279).abs() < 1e-5);
    }

    #[test]
    fn node_term_dominates() {
        // Near 2024 the node term alone gives about -5 arcsec.
        let t = (2_460_310.5 - 2_451_545.0) / 36525.0;
        let (dpsi, _) = nutation_deg(t);
        assert!(dpsi.abs() * 3600.0 < 18.0);
    }
}
