//! Lunar and solar eclipses from Sun-Moon geometry.
//!
//! Syzygies come from the phase search in `kaal_search`, run against this
//! ephemeris. At each candidate the time of greatest eclipse is refined by
//! minimising the relevant separation, then classified:
//!
//! - Lunar: the Moon's distance from the shadow axis against the Earth's
//!   umbra and penumbra, enlarged by the Danjon factor (Meeus ch. 54).
//! - Solar: a geocentric test first decides whether the penumbra touches
//!   the Earth at all. Local circumstances then come from the topocentric
//!   Sun and Moon: the maximum is the least apparent separation, and the
//!   kind, magnitude and obscuration follow from the two apparent disks.
//!   An eclipse whose local maximum falls with the Sun below the horizon is
//!   not reported.
//!
//! Contacts are the instants the geometry crosses the outer limit, found by
//! bisection either side of the peak.

use kaal_search::{
    EclipseBody, EclipseExtremum, EclipseKind, EphemerisContext, LocatorConfig, next_full_moon,
    next_new_moon,
};
use kaal_time::{JulianDay, gmst_rad, local_sidereal_time_rad};
use kaal_vedic_base::{GeoLocation, Graha};
use tracing::{debug, trace};

use crate::coords::{angle_between_deg, equatorial_vector_km, observer_vector_km, vector_norm};
use crate::error::EphemError;
use crate::{AnalyticEphemeris, EclipticPlace, MOON_RADIUS_KM, SUN_RADIUS_KM};

/// Danjon atmospheric enlargement of the Earth's shadow.
const DANJON_ENLARGEMENT: f64 = 1.02;

/// Moon latitude beyond which a syzygy cannot be eclipsed, degrees.
const ECLIPSE_LAT_THRESHOLD_DEG: f64 = 2.0;

/// Lunations tried before giving up on the next eclipse.
const MAX_LUNATIONS: usize = 50;

/// Half-width of the peak refinement window around the syzygy, days.
const PEAK_WINDOW_DAYS: f64 = 0.25;

/// Half-width of the contact bracket around the peak, days.
const CONTACT_WINDOW_DAYS: f64 = 0.3;

/// Sampling step of the coarse scan for the local maximum, days.
const LOCAL_SCAN_STEP_DAYS: f64 = 0.01;

const GOLDEN_ITERATIONS: u32 = 60;
const CONTACT_MAX_ITER: u32 = 50;
const CONTACT_CONVERGENCE_DAYS: f64 = 1e-7;

/// Earth's shadow at the Moon's distance, angular radii in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LunarShadow {
    pub penumbra_deg: f64,
    pub umbra_deg: f64,
}

impl LunarShadow {
    fn new(sun: &EclipticPlace, moon: &EclipticPlace) -> Self {
        let pi_sun = sun.parallax_deg();
        let pi_moon = moon.parallax_deg();
        let s_sun = sun.semidiameter_deg(SUN_RADIUS_KM);
        Self {
            penumbra_deg: DANJON_ENLARGEMENT * (pi_moon + pi_sun + s_sun),
            umbra_deg: DANJON_ENLARGEMENT * (pi_moon + pi_sun - s_sun),
        }
    }

    /// Eclipse kind for a Moon of `moon_radius_deg` at `offset_deg` from
    /// the shadow axis.
    fn classify(&self, offset_deg: f64, moon_radius_deg: f64) -> Option<EclipseKind> {
        let near = offset_deg - moon_radius_deg;
        let far = offset_deg + moon_radius_deg;
        if near >= self.penumbra_deg {
            None
        } else if far <= self.umbra_deg {
            Some(EclipseKind::Total)
        } else if near < self.umbra_deg {
            Some(EclipseKind::Partial)
        } else {
            Some(EclipseKind::Penumbral)
        }
    }
}

/// Apparent Sun and Moon disks for one observer, degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
struct LocalDisks {
    separation_deg: f64,
    sun_radius_deg: f64,
    moon_radius_deg: f64,
}

impl LocalDisks {
    fn contact_limit_deg(&self) -> f64 {
        self.sun_radius_deg + self.moon_radius_deg
    }

    /// Kind, magnitude and obscuration, or `None` when the disks do not
    /// overlap.
    fn phase(&self) -> Option<(EclipseKind, f64, f64)> {
        let sep = self.separation_deg;
        let (sun_r, moon_r) = (self.sun_radius_deg, self.moon_radius_deg);
        if sep >= self.contact_limit_deg() {
            return None;
        }
        if sep <= (moon_r - sun_r).abs() {
            let ratio = moon_r / sun_r;
            return Some(if moon_r >= sun_r {
                (EclipseKind::Total, ratio, 1.0)
            } else {
                (EclipseKind::Annular, ratio, ratio * ratio)
            });
        }
        let magnitude = (self.contact_limit_deg() - sep) / (2.0 * sun_r);
        Some((EclipseKind::Partial, magnitude, overlap_fraction(sep, sun_r, moon_r)))
    }
}

/// Fraction of a disk of radius `sun_r` hidden by a disk of radius `moon_r`
/// whose centre is `sep` away. Small-angle plane geometry.
fn overlap_fraction(sep: f64, sun_r: f64, moon_r: f64) -> f64 {
    if sep >= sun_r + moon_r {
        return 0.0;
    }
    if sep <= (moon_r - sun_r).abs() {
        let inner = sun_r.min(moon_r);
        return (inner * inner / (sun_r * sun_r)).min(1.0);
    }
    let cos_moon = (sep * sep + moon_r * moon_r - sun_r * sun_r) / (2.0 * sep * moon_r);
    let cos_sun = (sep * sep + sun_r * sun_r - moon_r * moon_r) / (2.0 * sep * sun_r);
    let kite = (-sep + moon_r + sun_r)
        * (sep + moon_r - sun_r)
        * (sep - moon_r + sun_r)
        * (sep + moon_r + sun_r);
    let lens = moon_r * moon_r * cos_moon.clamp(-1.0, 1.0).acos()
        + sun_r * sun_r * cos_sun.clamp(-1.0, 1.0).acos()
        - 0.5 * kite.max(0.0).sqrt();
    (lens / (std::f64::consts::PI * sun_r * sun_r)).clamp(0.0, 1.0)
}

/// Topocentric Sun and Moon disks seen from `location` at `at`.
fn local_disks(
    eph: &AnalyticEphemeris,
    at: JulianDay,
    location: &GeoLocation,
) -> Result<LocalDisks, EphemError> {
    let lst = local_sidereal_time_rad(gmst_rad(at), location.longitude_rad());
    let observer = observer_vector_km(location.latitude_rad(), location.altitude_m / 1000.0, lst);
    let topocentric = |body: Graha| -> Result<[f64; 3], EphemError> {
        let (eq, place) = eph.equatorial(body, at)?;
        let v = equatorial_vector_km(&eq, place.distance_km);
        Ok([v[0] - observer[0], v[1] - observer[1], v[2] - observer[2]])
    };
    let sun = topocentric(Graha::Surya)?;
    let moon = topocentric(Graha::Chandra)?;
    Ok(LocalDisks {
        separation_deg: angle_between_deg(&sun, &moon),
        sun_radius_deg: (SUN_RADIUS_KM / vector_norm(&sun)).asin().to_degrees(),
        moon_radius_deg: (MOON_RADIUS_KM / vector_norm(&moon)).asin().to_degrees(),
    })
}

fn sun_and_moon(
    eph: &AnalyticEphemeris,
    at: JulianDay,
) -> Result<(EclipticPlace, EclipticPlace), EphemError> {
    Ok((
        eph.ecliptic_place(Graha::Surya, at, false)?,
        eph.ecliptic_place(Graha::Chandra, at, false)?,
    ))
}

/// Moon's angular distance from the anti-solar point, degrees.
fn shadow_offset_deg(eph: &AnalyticEphemeris, at: JulianDay) -> Result<f64, EphemError> {
    let (sun, moon) = sun_and_moon(eph, at)?;
    let anti_sun = EclipticPlace {
        longitude_deg: (sun.longitude_deg + 180.0).rem_euclid(360.0),
        latitude_deg: 0.0,
        distance_km: sun.distance_km,
    };
    Ok(moon.separation_deg(&anti_sun))
}

fn sun_moon_separation_deg(eph: &AnalyticEphemeris, at: JulianDay) -> Result<f64, EphemError> {
    let (sun, moon) = sun_and_moon(eph, at)?;
    Ok(moon.separation_deg(&sun))
}

/// Golden-section minimum of `f` over `[a, b]`.
fn golden_minimum<F>(f: F, a: JulianDay, b: JulianDay) -> Result<(JulianDay, f64), EphemError>
where
    F: Fn(JulianDay) -> Result<f64, EphemError>,
{
    let ratio = (5.0_f64.sqrt() - 1.0) / 2.0;
    let (mut a, mut b) = (a.value(), b.value());
    let mut c = b - ratio * (b - a);
    let mut d = a + ratio * (b - a);
    let mut fc = f(JulianDay::new(c))?;
    let mut fd = f(JulianDay::new(d))?;
    for _ in 0..GOLDEN_ITERATIONS {
        if fc < fd {
            b = d;
            d = c;
            fd = fc;
            c = b - ratio * (b - a);
            fc = f(JulianDay::new(c))?;
        } else {
            a = c;
            c = d;
            fc = fd;
            d = a + ratio * (b - a);
            fd = f(JulianDay::new(d))?;
        }
    }
    let t = JulianDay::new(0.5 * (a + b));
    Ok((t, f(t)?))
}

/// Least value of `f` within `PEAK_WINDOW_DAYS` of `centre`: a coarse scan
/// picks the bracket, golden section refines it.
fn scanned_minimum<F>(f: F, centre: JulianDay) -> Result<(JulianDay, f64), EphemError>
where
    F: Fn(JulianDay) -> Result<f64, EphemError>,
{
    let steps = (2.0 * PEAK_WINDOW_DAYS / LOCAL_SCAN_STEP_DAYS).round() as i32;
    let at = |i: i32| centre.add_days(-PEAK_WINDOW_DAYS + f64::from(i) * LOCAL_SCAN_STEP_DAYS);
    let mut best = (0, f64::INFINITY);
    for i in 0..=steps {
        let value = f(at(i))?;
        if value < best.1 {
            best = (i, value);
        }
    }
    golden_minimum(&f, at(best.0 - 1), at(best.0 + 1))
}

/// Zero of `f` in `[a, b]`, or `None` when the ends do not bracket one.
fn bisect_contact<F>(f: F, a: JulianDay, b: JulianDay) -> Result<Option<JulianDay>, EphemError>
where
    F: Fn(JulianDay) -> Result<f64, EphemError>,
{
    let (mut ta, mut tb) = (a.value(), b.value());
    let mut fa = f(a)?;
    if fa * f(b)? > 0.0 {
        return Ok(None);
    }
    for _ in 0..CONTACT_MAX_ITER {
        let tm = 0.5 * (ta + tb);
        let fm = f(JulianDay::new(tm))?;
        if fa * fm <= 0.0 {
            tb = tm;
        } else {
            ta = tm;
            fa = fm;
        }
        if (tb - ta).abs() < CONTACT_CONVERGENCE_DAYS {
            break;
        }
    }
    Ok(Some(JulianDay::new(0.5 * (ta + tb))))
}

/// Outer contacts either side of `peak` for a limit crossed by `f`.
fn contacts<F>(f: F, peak: JulianDay) -> Result<(Option<JulianDay>, Option<JulianDay>), EphemError>
where
    F: Fn(JulianDay) -> Result<f64, EphemError>,
{
    let start = bisect_contact(&f, peak.add_days(-CONTACT_WINDOW_DAYS), peak)?;
    let end = bisect_contact(&f, peak, peak.add_days(CONTACT_WINDOW_DAYS))?;
    Ok((start, end))
}

fn lunar_at_full_moon(
    eph: &AnalyticEphemeris,
    full_moon: JulianDay,
) -> Result<Option<EclipseExtremum>, EphemError> {
    let moon = eph.ecliptic_place(Graha::Chandra, full_moon, false)?;
    if moon.latitude_deg.abs() > ECLIPSE_LAT_THRESHOLD_DEG {
        return Ok(None);
    }

    let offset_at = |t| shadow_offset_deg(eph, t);
    let (peak, offset) = golden_minimum(
        offset_at,
        full_moon.add_days(-PEAK_WINDOW_DAYS),
        full_moon.add_days(PEAK_WINDOW_DAYS),
    )?;
    let (sun, moon) = sun_and_moon(eph, peak)?;
    let shadow = LunarShadow::new(&sun, &moon);
    let moon_r = moon.semidiameter_deg(MOON_RADIUS_KM);

    let Some(kind) = shadow.classify(offset, moon_r) else {
        return Ok(None);
    };
    let limit = match kind {
        EclipseKind::Penumbral => shadow.penumbra_deg,
        _ => shadow.umbra_deg,
    };
    let magnitude = (limit - offset + moon_r) / (2.0 * moon_r);

    let (start, end) = contacts(
        |t| Ok(offset_at(t)? - moon_r - shadow.penumbra_deg),
        peak,
    )?;
    trace!(peak = %peak, ?kind, magnitude, "lunar eclipse");
    Ok(Some(EclipseExtremum {
        body: EclipseBody::Lunar,
        kind,
        peak,
        start,
        end,
        magnitude,
        obscuration: None,
    }))
}

/// Geocentric greatest eclipse at `new_moon`, when the Moon's penumbra
/// reaches the Earth.
fn geocentric_solar_peak(
    eph: &AnalyticEphemeris,
    new_moon: JulianDay,
) -> Result<Option<JulianDay>, EphemError> {
    let moon = eph.ecliptic_place(Graha::Chandra, new_moon, false)?;
    if moon.latitude_deg.abs() > ECLIPSE_LAT_THRESHOLD_DEG {
        return Ok(None);
    }
    let (peak, sep) = golden_minimum(
        |t| sun_moon_separation_deg(eph, t),
        new_moon.add_days(-PEAK_WINDOW_DAYS),
        new_moon.add_days(PEAK_WINDOW_DAYS),
    )?;
    let (sun, moon) = sun_and_moon(eph, peak)?;
    let partial_limit = sun.semidiameter_deg(SUN_RADIUS_KM)
        + moon.semidiameter_deg(MOON_RADIUS_KM)
        + moon.parallax_deg()
        - sun.parallax_deg();
    Ok((sep < partial_limit).then_some(peak))
}

fn solar_at_new_moon(
    eph: &AnalyticEphemeris,
    new_moon: JulianDay,
    location: &GeoLocation,
) -> Result<Option<EclipseExtremum>, EphemError> {
    let Some(greatest) = geocentric_solar_peak(eph, new_moon)? else {
        return Ok(None);
    };

    let separation_at = |t: JulianDay| -> Result<f64, EphemError> {
        Ok(local_disks(eph, t, location)?.separation_deg)
    };
    let (peak, _) = scanned_minimum(&separation_at, greatest)?;
    let disks = local_disks(eph, peak, location)?;
    let Some((kind, magnitude, obscuration)) = disks.phase() else {
        trace!(greatest = %greatest, "solar eclipse misses the observer");
        return Ok(None);
    };
    let sun_alt = eph.altitude(Graha::Surya, peak, location)?;
    if sun_alt <= 0.0 {
        debug!(peak = %peak, sun_alt, "solar eclipse below horizon");
        return Ok(None);
    }

    let limit = disks.contact_limit_deg();
    let (start, end) = contacts(|t| Ok(separation_at(t)? - limit), peak)?;
    trace!(peak = %peak, ?kind, magnitude, obscuration, "solar eclipse");
    Ok(Some(EclipseExtremum {
        body: EclipseBody::Solar,
        kind,
        peak,
        start,
        end,
        magnitude,
        obscuration: Some(obscuration),
    }))
}

/// Walk syzygies from `after` until `classify` yields an eclipse peaking
/// after `after`.
fn next_eclipse<S, C>(
    eph: &AnalyticEphemeris,
    after: JulianDay,
    syzygy: S,
    classify: C,
) -> Result<Option<EclipseExtremum>, EphemError>
where
    S: Fn(JulianDay) -> Result<JulianDay, EphemError>,
    C: Fn(&AnalyticEphemeris, JulianDay) -> Result<Option<EclipseExtremum>, EphemError>,
{
    let mut cursor = after;
    for _ in 0..MAX_LUNATIONS {
        let moment = syzygy(cursor)?;
        if let Some(e) = classify(eph, moment)? {
            if e.peak > after {
                return Ok(Some(e));
            }
        }
        cursor = moment.add_days(1.0);
    }
    Ok(None)
}

/// First lunar eclipse peaking after `after`, with penumbral eclipses
/// included.
pub fn next_lunar_eclipse(
    eph: &AnalyticEphemeris,
    after: JulianDay,
) -> Result<Option<EclipseExtremum>, EphemError> {
    let ctx = EphemerisContext::default();
    let config = LocatorConfig::default();
    next_eclipse(
        eph,
        after,
        |t| Ok(next_full_moon(eph, &ctx, t, &config)?.moment),
        lunar_at_full_moon,
    )
}

/// First solar eclipse seen from `location` whose local maximum falls after
/// `after` with the Sun above the horizon.
///
/// Peak, contacts, kind, magnitude and obscuration are the observer's own.
pub fn next_solar_eclipse(
    eph: &AnalyticEphemeris,
    after: JulianDay,
    location: &GeoLocation,
) -> Result<Option<EclipseExtremum>, EphemError> {
    let ctx = EphemerisContext::default();
    let config = LocatorConfig::default();
    next_eclipse(
        eph,
        after,
        |t| Ok(next_new_moon(eph, &ctx, t, &config)?.moment),
        |eph, t| solar_at_new_moon(eph, t, location),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn jd(y: i32, m: u32, d: u32, h: u32, min: u32) -> JulianDay {
        JulianDay::from_ymd_hms(y, m, d, h, min, 0.0).unwrap()
    }

    #[test]
    fn total_solar_eclipse_over_dallas() {
        let eph = AnalyticEphemeris::new();
        let dallas = GeoLocation::at_sea_level(32.78, -96.80);
        let e = next_solar_eclipse(&eph, jd(2024, 1, 1, 0, 0), &dallas)
            .unwrap()
            .unwrap();
        assert_eq!(e.kind, EclipseKind::Total);
        // Local maximum 18:42 UT, contacts 17:23 and 20:02.
        assert!(e.peak.days_since(jd(2024, 4, 8, 18, 42)).abs() < 0.005, "{}", e.peak);
        assert!(e.magnitude > 1.0);
        assert_eq!(e.obscuration, Some(1.0));
        let (start, end) = (e.start.unwrap(), e.end.unwrap());
        assert!(start.days_since(jd(2024, 4, 8, 17, 23)).abs() < 0.005, "{start}");
        assert!(end.days_since(jd(2024, 4, 8, 20, 2)).abs() < 0.005, "{end}");
        assert!(eph.altitude(Graha::Surya, e.peak, &dallas).unwrap() > 50.0);
    }

    #[test]
    fn annular_over_easter_island() {
        let eph = AnalyticEphemeris::new();
        let easter = GeoLocation::at_sea_level(-27.15, -109.43);
        let e = next_solar_eclipse(&eph, jd(2024, 4, 10, 0, 0), &easter)
            .unwrap()
            .unwrap();
        assert_eq!(e.kind, EclipseKind::Annular);
        assert_eq!(e.peak.utc_date().unwrap().to_string(), "2024-10-02");
        assert!(e.magnitude < 1.0);
        let obscuration = e.obscuration.unwrap();
        assert!((obscuration - e.magnitude * e.magnitude).abs() < 1e-12);
    }

    #[test]
    fn partial_over_london_march_2025() {
        let eph = AnalyticEphemeris::new();
        let london = GeoLocation::at_sea_level(51.48, 0.0);
        let e = next_solar_eclipse(&eph, jd(2025, 1, 1, 0, 0), &london)
            .unwrap()
            .unwrap();
        assert_eq!(e.kind, EclipseKind::Partial);
        assert_eq!(e.peak.utc_date().unwrap().to_string(), "2025-03-29");
        assert!((0.3..0.5).contains(&e.magnitude), "{}", e.magnitude);
        let obscuration = e.obscuration.unwrap();
        assert!(obscuration > 0.2 && obscuration < e.magnitude, "{obscuration}");
    }

    #[test]
    fn night_side_eclipses_are_skipped() {
        // April and October 2024 both peak with the Sun below Delhi's
        // horizon; the next one seen there is the partial of August 2027.
        let eph = AnalyticEphemeris::new();
        let delhi = GeoLocation::at_sea_level(28.6139, 77.2090);
        let e = next_solar_eclipse(&eph, jd(2024, 1, 1, 0, 0), &delhi)
            .unwrap()
            .unwrap();
        assert_eq!(e.peak.utc_date().unwrap().to_string(), "2027-08-02");
        assert_eq!(e.kind, EclipseKind::Partial);
        assert!(eph.altitude(Graha::Surya, e.peak, &delhi).unwrap() > 0.0);
    }

    #[test]
    fn overlap_of_two_disks() {
        assert_eq!(overlap_fraction(0.6, 0.26, 0.27), 0.0);
        assert_eq!(overlap_fraction(0.005, 0.26, 0.27), 1.0);
        let annular = overlap_fraction(0.0, 0.27, 0.25);
        assert!((annular - (0.25_f64 / 0.27).powi(2)).abs() < 1e-12);
        // Equal disks half a radius apart.
        let half = overlap_fraction(0.13, 0.26, 0.26);
        assert!((half - 0.6850).abs() < 1e-3, "{half}");
        assert!(overlap_fraction(0.4, 0.26, 0.26) < overlap_fraction(0.3, 0.26, 0.26));
    }

    #[test]
    fn penumbral_lunar_eclipse_of_march_2024() {
        let eph = AnalyticEphemeris::new();
        let e = next_lunar_eclipse(&eph, jd(2024, 1, 1, 0, 0)).unwrap().unwrap();
        assert_eq!(e.kind, EclipseKind::Penumbral);
        // Greatest eclipse 07:13 UT.
        assert!(e.peak.days_since(jd(2024, 3, 25, 7, 13)).abs() < 0.02, "{}", e.peak);
        assert!((0.9..1.05).contains(&e.magnitude), "{}", e.magnitude);
    }

    #[test]
    fn partial_lunar_eclipse_of_september_2024() {
        let eph = AnalyticEphemeris::new();
        let e = next_lunar_eclipse(&eph, jd(2024, 3, 27, 0, 0)).unwrap().unwrap();
        assert_eq!(e.kind, EclipseKind::Partial);
        assert_eq!(e.peak.utc_date().unwrap().to_string(), "2024-09-18");
        assert!(e.magnitude > 0.0 && e.magnitude < 0.2, "{}", e.magnitude);
    }

    #[test]
    fn total_lunar_eclipse_of_march_2025() {
        let eph = AnalyticEphemeris::new();
        let e = next_lunar_eclipse(&eph, jd(2025, 1, 1, 0, 0)).unwrap().unwrap();
        assert_eq!(e.kind, EclipseKind::Total);
        assert!(e.magnitude > 1.0);
        assert_eq!(e.peak.utc_date().unwrap().to_string(), "2025-03-14");
    }

    #[test]
    fn shadow_classification() {
        let shadow = LunarShadow {
            penumbra_deg: 1.25,
            umbra_deg: 0.7,
        };
        assert_eq!(shadow.classify(1.6, 0.26), None);
        assert_eq!(shadow.classify(1.2, 0.26), Some(EclipseKind::Penumbral));
        assert_eq!(shadow.classify(0.8, 0.26), Some(EclipseKind::Partial));
        assert_eq!(shadow.classify(0.2, 0.26), Some(EclipseKind::Total));
    }
}
