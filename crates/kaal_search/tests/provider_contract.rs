//! Behaviour of the engine at the provider seam, exercised through the
//! public API with a mean-motion provider.

use kaal_search::{
    Direction, EclipseExtremum, ElementKind, EphemerisContext, EphemerisProvider, LocatorConfig,
    ProviderError, RiseSet, ScanConfig, SearchError, SunMoonTimes, hora_schedule_at,
    panchang_at, sankrantis_for_year, tithi_dates, vedic_day,
};
use kaal_time::JulianDay;
use kaal_vedic_base::{GeoLocation, Graha};

const EPOCH: f64 = 2_460_380.0;

#[derive(Default)]
struct MeanMotion {
    /// Report tithi bounds directly instead of leaving them to the locator.
    tithi_hint: bool,
    sun_never_rises: bool,
}

impl EphemerisProvider for MeanMotion {
    fn sidereal_longitude(
        &self,
        _ctx: &EphemerisContext,
        body: Graha,
        at: JulianDay,
    ) -> Result<f64, ProviderError> {
        let d = at.0 - EPOCH;
        match body {
            Graha::Surya => Ok((326.0 + 0.985_609 * d).rem_euclid(360.0)),
            Graha::Chandra => Ok((326.0 + 13.176_358 * d).rem_euclid(360.0)),
            other => Err(ProviderError::UnsupportedBody(other)),
        }
    }

    fn sun_moon_times(
        &self,
        _ctx: &EphemerisContext,
        local_noon: JulianDay,
        _location: &GeoLocation,
    ) -> Result<SunMoonTimes, ProviderError> {
        let (sunrise, sunset) = if self.sun_never_rises {
            (RiseSet::AlwaysDown, RiseSet::AlwaysDown)
        } else {
            (
                RiseSet::Event(local_noon.add_days(-0.25)),
                RiseSet::Event(local_noon.add_days(0.25)),
            )
        };
        Ok(SunMoonTimes {
            sunrise,
            sunset,
            moonrise: RiseSet::Undefined,
            moonset: RiseSet::Undefined,
        })
    }

    fn altitude_deg(
        &self,
        _ctx: &EphemerisContext,
        _body: Graha,
        _at: JulianDay,
        _location: &GeoLocation,
    ) -> Result<f64, ProviderError> {
        Ok(10.0)
    }

    fn next_solar_eclipse(
        &self,
        _ctx: &EphemerisContext,
        _after: JulianDay,
        _location: &GeoLocation,
    ) -> Result<Option<EclipseExtremum>, ProviderError> {
        Ok(None)
    }

    fn next_lunar_eclipse(
        &self,
        _ctx: &EphemerisContext,
        _after: JulianDay,
    ) -> Result<Option<EclipseExtremum>, ProviderError> {
        Ok(None)
    }

    fn adjacent_element(
        &self,
        _ctx: &EphemerisContext,
        kind: ElementKind,
        at: JulianDay,
        direction: Direction,
    ) -> Result<Option<JulianDay>, ProviderError> {
        if !self.tithi_hint || kind != ElementKind::Tithi {
            return Ok(None);
        }
        Ok(Some(match direction {
            Direction::Backward => at.add_days(-0.1),
            Direction::Forward => at.add_days(0.2),
        }))
    }
}

fn delhi() -> GeoLocation {
    GeoLocation::at_sea_level(28.6139, 77.2090)
}

fn at() -> JulianDay {
    JulianDay::from_ymd_hms(2024, 3, 25, 6, 0, 0.0).unwrap()
}

#[test]
fn provider_bounds_take_precedence() {
    let p = MeanMotion {
        tithi_hint: true,
        ..MeanMotion::default()
    };
    let rec = panchang_at(&p, &EphemerisContext::default(), at(), &delhi(), &LocatorConfig::default())
        .unwrap();
    assert!((rec.tithi.start.days_since(at()) + 0.1).abs() < 1e-12);
    assert!((rec.tithi.end.days_since(at()) - 0.2).abs() < 1e-12);
    // Other elements still come from the locator.
    assert!(rec.nakshatra.start <= at() && rec.nakshatra.end > at());
}

#[test]
fn works_through_a_trait_object() {
    let p: Box<dyn EphemerisProvider> = Box::new(MeanMotion::default());
    let ctx = EphemerisContext::default();
    let dates = tithi_dates(p.as_ref(), &ctx, 2024, &delhi(), &[14], &ScanConfig::default())
        .unwrap();
    assert!(!dates.is_empty());
    let signs = sankrantis_for_year(p.as_ref(), &ctx, 2024, &ScanConfig::default()).unwrap();
    assert_eq!(signs.len(), 12);
}

#[test]
fn sunless_days_fall_back_to_civil_days() {
    let p = MeanMotion {
        sun_never_rises: true,
        ..MeanMotion::default()
    };
    let ctx = EphemerisContext::default();
    let day = vedic_day(&p, &ctx, at(), &delhi()).unwrap();
    assert!(!day.sunrise_based);
    assert!((day.end.days_since(day.start) - 1.0).abs() < 1e-9);
    assert!(day.start <= at() && at() < day.end);

    let horas = hora_schedule_at(&p, &ctx, at(), &delhi());
    assert!(matches!(horas, Err(SearchError::NoConvergence(_))));
}

#[test]
fn rejects_bad_locator_config() {
    let cfg = LocatorConfig {
        max_iterations: 0,
        ..LocatorConfig::default()
    };
    let r = panchang_at(&MeanMotion::default(), &EphemerisContext::default(), at(), &delhi(), &cfg);
    assert!(matches!(r, Err(SearchError::InvalidConfig(_))));
}
