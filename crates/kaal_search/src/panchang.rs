//! Panchang assembly: Tithi, Nakshatra, Yoga, Karana, Vaar, and lunar month
//! for one instant and place.
//!
//! Longitudes are read once per instant; each element's start and end come
//! from the provider when it can supply them and from the boundary locator
//! otherwise. All instants are absolute (UT Julian Days).

use kaal_time::{JulianDay, approximate_local_noon};
use kaal_vedic_base::{
    GeoLocation, Graha, HoraSlot, Masa, Paksha, divide_horas, karana_from_elongation,
    masa_from_rashi_index, nakshatra_from_longitude, normalize_360, purnimanta_index,
    rashi_from_longitude, solar_day_of_month, tithi_from_elongation, vaar_at, yoga_from_sum,
};
use tracing::debug;

use crate::error::SearchError;
use crate::locator::{LocatorConfig, element_bounds};
use crate::lunar_phase::{next_new_moon, prev_new_moon};
use crate::panchang_types::{
    KaranaInfo, LunarMonth, NakshatraInfo, PanchangRecord, TithiInfo, VaarInfo, YogaInfo,
};
use crate::provider::{ElementKind, EphemerisContext, EphemerisProvider, RiseSet};

/// Approximate local noon of the local mean-time civil day containing `at`.
pub fn local_noon(at: JulianDay, longitude_deg: f64) -> JulianDay {
    let midnight = at.add_days(longitude_deg / 360.0).utc_midnight();
    approximate_local_noon(midnight, longitude_deg)
}

/// Bounds of the Vedic day containing an instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VedicDay {
    /// Sunrise, or local mean midnight when the Sun does not rise.
    pub start: JulianDay,
    /// Next sunrise, or the following local mean midnight.
    pub end: JulianDay,
    /// Sunset between `start` and `end`, when there is one.
    pub sunset: Option<JulianDay>,
    /// Local noon of the civil day the Vedic day begins on.
    pub noon: JulianDay,
    pub sunrise_based: bool,
}

impl VedicDay {
    /// Instant representative of the day's weekday.
    fn weekday_probe(&self) -> JulianDay {
        if self.sunrise_based { self.start } else { self.noon }
    }
}

/// The sunrise-to-sunrise day containing `at`.
///
/// Before today's sunrise the day belongs to yesterday's sunrise. Where the
/// Sun does not rise (or its rise is undefined) the local civil day is used.
pub fn vedic_day<P: EphemerisProvider + ?Sized>(
    provider: &P,
    ctx: &EphemerisContext,
    at: JulianDay,
    location: &GeoLocation,
) -> Result<VedicDay, SearchError> {
    let noon = local_noon(at, location.longitude_deg);
    let today = provider.sun_moon_times(ctx, noon, location)?;

    let bracket = match today.sunrise {
        RiseSet::Event(sunrise) if at >= sunrise => {
            let tomorrow = provider.sun_moon_times(ctx, noon.add_days(1.0), location)?;
            tomorrow
                .sunrise
                .event()
                .map(|next| (sunrise, next, today.sunset.event(), noon))
        }
        RiseSet::Event(sunrise) => {
            let prev_noon = noon.add_days(-1.0);
            let yesterday = provider.sun_moon_times(ctx, prev_noon, location)?;
            yesterday
                .sunrise
                .event()
                .map(|prev| (prev, sunrise, yesterday.sunset.event(), prev_noon))
        }
        other => {
            debug!(state = ?other, "sunrise undefined, using local civil day");
            None
        }
    };

    Ok(match bracket {
        Some((start, end, sunset, noon)) => VedicDay {
            start,
            end,
            sunset: sunset.filter(|s| *s > start && *s < end),
            noon,
            sunrise_based: true,
        },
        None => VedicDay {
            start: noon.add_days(-0.5),
            end: noon.add_days(0.5),
            sunset: None,
            noon,
            sunrise_based: false,
        },
    })
}

/// Weekday of the Vedic day containing `at`.
pub fn vaar_for<P: EphemerisProvider + ?Sized>(
    provider: &P,
    ctx: &EphemerisContext,
    at: JulianDay,
    location: &GeoLocation,
) -> Result<VaarInfo, SearchError> {
    let day = vedic_day(provider, ctx, at, location)?;
    Ok(vaar_from_day(&day, location))
}

pub(crate) fn vaar_from_day(day: &VedicDay, location: &GeoLocation) -> VaarInfo {
    VaarInfo {
        vaar: vaar_at(day.weekday_probe(), location.longitude_deg),
        start: day.start,
        end: day.end,
        sunrise_based: day.sunrise_based,
    }
}

/// The 24 horas of the Vedic day containing `at`.
pub fn hora_schedule_at<P: EphemerisProvider + ?Sized>(
    provider: &P,
    ctx: &EphemerisContext,
    at: JulianDay,
    location: &GeoLocation,
) -> Result<Vec<HoraSlot>, SearchError> {
    let day = vedic_day(provider, ctx, at, location)?;
    let sunset = match (day.sunrise_based, day.sunset) {
        (true, Some(s)) => s,
        _ => {
            return Err(SearchError::NoConvergence(
                "sun does not rise and set at this location",
            ));
        }
    };
    let vaar = vaar_at(day.start, location.longitude_deg);
    Ok(divide_horas(day.start, sunset, day.end, vaar)?)
}

/// Tithi at `at` from a pre-computed elongation.
pub fn tithi_at<P: EphemerisProvider + ?Sized>(
    provider: &P,
    ctx: &EphemerisContext,
    at: JulianDay,
    elongation_deg: f64,
    config: &LocatorConfig,
) -> Result<TithiInfo, SearchError> {
    let pos = tithi_from_elongation(elongation_deg);
    let (start, end) =
        element_bounds(provider, ctx, ElementKind::Tithi, pos.tithi_index, at, config)?;
    Ok(TithiInfo {
        tithi: pos.tithi,
        tithi_index: pos.tithi_index,
        paksha: pos.paksha,
        tithi_in_paksha: pos.tithi_in_paksha,
        start,
        end,
    })
}

/// Karana at `at` from a pre-computed elongation.
pub fn karana_at<P: EphemerisProvider + ?Sized>(
    provider: &P,
    ctx: &EphemerisContext,
    at: JulianDay,
    elongation_deg: f64,
    config: &LocatorConfig,
) -> Result<KaranaInfo, SearchError> {
    let pos = karana_from_elongation(elongation_deg);
    let (start, end) =
        element_bounds(provider, ctx, ElementKind::Karana, pos.karana_index, at, config)?;
    Ok(KaranaInfo {
        karana: pos.karana,
        karana_index: pos.karana_index,
        start,
        end,
    })
}

/// Yoga at `at` from a pre-computed sidereal Sun + Moon sum.
pub fn yoga_at<P: EphemerisProvider + ?Sized>(
    provider: &P,
    ctx: &EphemerisContext,
    at: JulianDay,
    sidereal_sum_deg: f64,
    config: &LocatorConfig,
) -> Result<YogaInfo, SearchError> {
    let pos = yoga_from_sum(sidereal_sum_deg);
    let (start, end) =
        element_bounds(provider, ctx, ElementKind::Yoga, pos.yoga_index, at, config)?;
    Ok(YogaInfo {
        yoga: pos.yoga,
        yoga_index: pos.yoga_index,
        start,
        end,
    })
}

/// Nakshatra at `at` from a pre-computed Moon sidereal longitude.
pub fn nakshatra_at<P: EphemerisProvider + ?Sized>(
    provider: &P,
    ctx: &EphemerisContext,
    at: JulianDay,
    moon_sidereal_deg: f64,
    config: &LocatorConfig,
) -> Result<NakshatraInfo, SearchError> {
    let pos = nakshatra_from_longitude(moon_sidereal_deg);
    let (start, end) = element_bounds(
        provider,
        ctx,
        ElementKind::Nakshatra,
        pos.nakshatra_index,
        at,
        config,
    )?;
    Ok(NakshatraInfo {
        nakshatra: pos.nakshatra,
        nakshatra_index: pos.nakshatra_index,
        pada: pos.pada,
        start,
        end,
    })
}

fn sun_rashi_index<P: EphemerisProvider + ?Sized>(
    provider: &P,
    ctx: &EphemerisContext,
    at: JulianDay,
) -> Result<u8, SearchError> {
    let sun = provider.sidereal_longitude(ctx, Graha::Surya, at)?;
    Ok(rashi_from_longitude(sun).rashi_index)
}

/// Lunar month containing `at`.
///
/// A month is named after the sign the Sun occupies at its closing new
/// moon. When the Sun holds one sign at both new moons the month is adhika
/// and takes the name of the month that follows it.
pub fn lunar_month_at<P: EphemerisProvider + ?Sized>(
    provider: &P,
    ctx: &EphemerisContext,
    at: JulianDay,
    paksha: Paksha,
    config: &LocatorConfig,
) -> Result<LunarMonth, SearchError> {
    let prev = prev_new_moon(provider, ctx, at, config)?;
    let next = next_new_moon(provider, ctx, prev.moment.add_days(1.0), config)?;

    let rashi_at_prev = sun_rashi_index(provider, ctx, prev.moment)?;
    let rashi_at_next = sun_rashi_index(provider, ctx, next.moment)?;

    let (amanta, adhika) = if rashi_at_prev != rashi_at_next {
        (masa_from_rashi_index(rashi_at_next), false)
    } else {
        (masa_from_rashi_index((rashi_at_prev + 1) % 12), true)
    };
    let purnimanta = purnimanta_index(amanta.index(), paksha);

    Ok(LunarMonth {
        amanta,
        amanta_index: amanta.index(),
        purnimanta: Masa::from_index(purnimanta),
        purnimanta_index: purnimanta,
        adhika,
        start: prev.moment,
        end: next.moment,
    })
}

/// Full panchang for `at` at `location`.
///
/// Any provider or search failure fails the whole record.
pub fn panchang_at<P: EphemerisProvider + ?Sized>(
    provider: &P,
    ctx: &EphemerisContext,
    at: JulianDay,
    location: &GeoLocation,
    config: &LocatorConfig,
) -> Result<PanchangRecord, SearchError> {
    location.validate()?;
    config.validate().map_err(SearchError::InvalidConfig)?;

    let sun = provider.sidereal_longitude(ctx, Graha::Surya, at)?;
    let moon = provider.sidereal_longitude(ctx, Graha::Chandra, at)?;
    let elongation = normalize_360(moon - sun);
    let sum = normalize_360(moon + sun);

    let tithi = tithi_at(provider, ctx, at, elongation, config)?;
    let karana = karana_at(provider, ctx, at, elongation, config)?;
    let yoga = yoga_at(provider, ctx, at, sum, config)?;
    let nakshatra = nakshatra_at(provider, ctx, at, moon, config)?;

    let day = vedic_day(provider, ctx, at, location)?;
    let vaar = vaar_from_day(&day, location);
    let lunar_month = lunar_month_at(provider, ctx, at, tithi.paksha, config)?;

    Ok(PanchangRecord {
        instant: at,
        location: *location,
        tithi,
        nakshatra,
        yoga,
        karana,
        vaar,
        lunar_month,
        solar_day: solar_day_of_month(sun),
        sun_longitude_deg: sun,
        moon_longitude_deg: moon,
        sun_rashi: rashi_from_longitude(sun).rashi,
        moon_rashi: rashi_from_longitude(moon).rashi,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::LinearProvider;
    use kaal_vedic_base::{Tithi, Vaar};

    fn greenwich() -> GeoLocation {
        GeoLocation::at_sea_level(51.48, 0.0)
    }

    #[test]
    fn elements_contain_instant() {
        let p = LinearProvider::spring_2024();
        let ctx = EphemerisContext::default();
        let cfg = LocatorConfig::default();
        for k in 0..12 {
            let at = p.epoch.add_days(2.3 * k as f64 + 0.17);
            let rec = panchang_at(&p, &ctx, at, &greenwich(), &cfg).unwrap();
            for (name, s, e) in [
                ("tithi", rec.tithi.start, rec.tithi.end),
                ("nakshatra", rec.nakshatra.start, rec.nakshatra.end),
                ("yoga", rec.yoga.start, rec.yoga.end),
                ("karana", rec.karana.start, rec.karana.end),
                ("vaar", rec.vaar.start, rec.vaar.end),
            ] {
                assert!(s <= at && at < e, "{name} at step {k}: {s:?} {at:?} {e:?}");
            }
        }
    }

    #[test]
    fn tithi_bounds_match_linear_motion() {
        let p = LinearProvider::spring_2024();
        let ctx = EphemerisContext::default();
        let cfg = LocatorConfig::default();
        let at = p.epoch.add_days(5.0);
        let rec = panchang_at(&p, &ctx, at, &greenwich(), &cfg).unwrap();
        let idx = rec.tithi.tithi_index as f64;
        let rate = 360.0 / p.synodic_month_days();
        assert!((rec.tithi.start.days_since(p.epoch) - idx * 12.0 / rate).abs() < 1e-6);
        assert!((rec.tithi.end.days_since(p.epoch) - (idx + 1.0) * 12.0 / rate).abs() < 1e-6);
        assert_eq!(rec.tithi.paksha, Paksha::Shukla);
    }

    #[test]
    fn purnima_eve_of_2024() {
        let p = LinearProvider::spring_2024();
        let ctx = EphemerisContext::default();
        let cfg = LocatorConfig::default();
        let at = JulianDay::from_ymd_hms(2024, 3, 25, 6, 0, 0.0).unwrap();
        let rec = panchang_at(&p, &ctx, at, &GeoLocation::at_sea_level(28.6139, 77.209), &cfg)
            .unwrap();
        assert_eq!(rec.tithi.tithi, Tithi::Purnima);
        assert_eq!(rec.tithi.tithi_in_paksha, 15);
        assert_eq!(rec.tithi.paksha, Paksha::Shukla);
        assert_eq!(rec.lunar_month.amanta, Masa::Phalguna);
        assert_eq!(rec.lunar_month.amanta_index, 11);
        assert_eq!(rec.lunar_month.purnimanta_index, 11);
        assert!(!rec.lunar_month.adhika);
        assert_eq!(rec.vaar.vaar, Vaar::Somvaar);
    }

    #[test]
    fn krishna_paksha_advances_purnimanta() {
        let p = LinearProvider::spring_2024();
        let ctx = EphemerisContext::default();
        let cfg = LocatorConfig::default();
        let at = p.epoch.add_days(20.0);
        let m = lunar_month_at(&p, &ctx, at, Paksha::Krishna, &cfg).unwrap();
        assert_eq!(m.amanta, Masa::Phalguna);
        assert_eq!(m.purnimanta, Masa::Chaitra);
        assert!((m.start.0 - p.epoch.0).abs() < 1e-6);
        assert!((m.end.days_since(m.start) - p.synodic_month_days()).abs() < 1e-6);
    }

    #[test]
    fn adhika_when_sun_stays_in_sign() {
        // Sun moves ~29.1 deg per synodic month: from 0.5 deg it stays in Mesha.
        let p = LinearProvider::with_sun_at_new_moon(JulianDay(2_460_000.5), 0.5);
        let ctx = EphemerisContext::default();
        let cfg = LocatorConfig::default();
        let m = lunar_month_at(&p, &ctx, p.epoch.add_days(10.0), Paksha::Shukla, &cfg).unwrap();
        assert!(m.adhika);
        assert_eq!(m.amanta, Masa::Vaishakha);
    }

    #[test]
    fn before_sunrise_belongs_to_previous_day() {
        let p = LinearProvider::spring_2024();
        let ctx = EphemerisContext::default();
        // Synthetic sunrise at 06:00 UT on the meridian.
        let at = JulianDay::from_ymd_hms(2024, 3, 25, 3, 0, 0.0).unwrap();
        let day = vedic_day(&p, &ctx, at, &greenwich()).unwrap();
        assert!(day.sunrise_based);
        assert!(day.start < at && at < day.end);
        let vaar = vaar_for(&p, &ctx, at, &greenwich()).unwrap();
        assert_eq!(vaar.vaar, Vaar::Ravivaar);
    }

    #[test]
    fn polar_day_falls_back_to_civil_day() {
        let mut p = LinearProvider::spring_2024();
        p.polar = true;
        let ctx = EphemerisContext::default();
        let at = JulianDay::from_ymd_hms(2024, 6, 21, 12, 0, 0.0).unwrap();
        let loc = GeoLocation::at_sea_level(78.2, 15.6);
        let vaar = vaar_for(&p, &ctx, at, &loc).unwrap();
        assert!(!vaar.sunrise_based);
        assert_eq!(vaar.vaar, Vaar::Shukravaar);
        assert!((vaar.end.days_since(vaar.start) - 1.0).abs() < 1e-6);
        assert!(hora_schedule_at(&p, &ctx, at, &loc).is_err());
    }

    #[test]
    fn hora_schedule_spans_vedic_day() {
        let p = LinearProvider::spring_2024();
        let ctx = EphemerisContext::default();
        let at = JulianDay::from_ymd_hms(2024, 3, 25, 9, 0, 0.0).unwrap();
        let slots = hora_schedule_at(&p, &ctx, at, &greenwich()).unwrap();
        assert_eq!(slots.len(), 24);
        assert_eq!(slots[0].ruler, Graha::Chandra);
        assert!((slots[11].end.0 - at.utc_midnight().add_days(0.75).0).abs() < 1e-9);
    }

    #[test]
    fn provider_failure_fails_record() {
        let mut p = LinearProvider::spring_2024();
        let at = p.epoch.add_days(3.0);
        p.fail_window = Some((at.add_days(-0.1), at.add_days(0.1)));
        let ctx = EphemerisContext::default();
        let err = panchang_at(&p, &ctx, at, &greenwich(), &LocatorConfig::default());
        assert!(matches!(err, Err(SearchError::Provider(_))));
    }

    #[test]
    fn rejects_invalid_location() {
        let p = LinearProvider::spring_2024();
        let ctx = EphemerisContext::default();
        let bad = GeoLocation::at_sea_level(95.0, 0.0);
        let err = panchang_at(&p, &ctx, p.epoch, &bad, &LocatorConfig::default());
        assert!(matches!(err, Err(SearchError::Vedic(_))));
    }
}
