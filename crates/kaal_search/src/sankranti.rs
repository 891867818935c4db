//! Sankranti: the Sun's ingress into each sidereal rashi.

use chrono::NaiveDate;
use kaal_time::JulianDay;
use kaal_vedic_base::{ALL_RASHIS, Rashi, rashi_from_longitude};
use rayon::prelude::*;
use tracing::{debug, warn};

use crate::error::SearchError;
use crate::locator::{Crossing, LocatorConfig, find_crossing_in_window, locate_angle};
use crate::provider::{Direction, EphemerisContext, EphemerisProvider};
use crate::quantity::AngularQuantity;
use crate::scan::ScanConfig;

/// Extra days searched past either end of the year for an ingress the
/// year window missed.
const WINDOW_MARGIN_DAYS: f64 = 20.0;

/// The Sun advances one rashi in at most ~31.5 days.
const INGRESS_SPAN_DAYS: f64 = 35.0;

/// Coarse scan step for the Sun.
const SOLAR_STEP_DAYS: f64 = 1.0;

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SankrantiEvent {
    /// "<western sign> Sankranti", e.g. "Capricorn Sankranti".
    pub name: String,
    pub rashi: Rashi,
    pub moment: JulianDay,
    /// UTC calendar date of `moment`.
    pub date: NaiveDate,
    pub sun_longitude_deg: f64,
}

impl SankrantiEvent {
    fn new(rashi: Rashi, moment: JulianDay, sun_longitude_deg: f64) -> Result<Self, SearchError> {
        Ok(Self {
            name: format!("{} Sankranti", rashi.western_name()),
            rashi,
            moment,
            date: moment.utc_date()?,
            sun_longitude_deg,
        })
    }
}

fn solar_longitude<P: EphemerisProvider + ?Sized>(
    provider: &P,
    ctx: &EphemerisContext,
    at: JulianDay,
) -> Result<f64, SearchError> {
    AngularQuantity::SolarLongitude.evaluate(provider, ctx, at)
}

fn ingress_in<P: EphemerisProvider + ?Sized>(
    provider: &P,
    ctx: &EphemerisContext,
    rashi: Rashi,
    start: JulianDay,
    end: JulianDay,
    config: &LocatorConfig,
) -> Result<Crossing, SearchError> {
    find_crossing_in_window(
        |t| solar_longitude(provider, ctx, t),
        start,
        end,
        rashi.start_deg(),
        SOLAR_STEP_DAYS,
        config,
    )
}

fn year_ingress<P: EphemerisProvider + ?Sized>(
    provider: &P,
    ctx: &EphemerisContext,
    rashi: Rashi,
    year_start: JulianDay,
    year_end: JulianDay,
    config: &LocatorConfig,
) -> Result<Option<SankrantiEvent>, SearchError> {
    let mut crossing = ingress_in(provider, ctx, rashi, year_start, year_end, config)?;
    if crossing == Crossing::Skipped {
        debug!(rashi = rashi.name(), "no ingress inside the year, widening window");
        crossing = ingress_in(
            provider,
            ctx,
            rashi,
            year_start.add_days(-WINDOW_MARGIN_DAYS),
            year_end.add_days(WINDOW_MARGIN_DAYS),
            config,
        )?;
    }
    match crossing {
        Crossing::Found(moment) => {
            let lon = solar_longitude(provider, ctx, moment)?;
            Ok(Some(SankrantiEvent::new(rashi, moment, lon)?))
        }
        other => {
            warn!(rashi = rashi.name(), outcome = ?other, "sankranti not found");
            Ok(None)
        }
    }
}

/// The twelve ingresses of Gregorian `year`, in time order.
///
/// An ingress missing from the year window is looked for a few weeks beyond
/// it. A sign whose ingress still cannot be found is logged and left out.
pub fn sankrantis_for_year<P: EphemerisProvider + ?Sized>(
    provider: &P,
    ctx: &EphemerisContext,
    year: i32,
    config: &ScanConfig,
) -> Result<Vec<SankrantiEvent>, SearchError> {
    config.validate().map_err(SearchError::InvalidConfig)?;
    let year_start = JulianDay::from_ymd_hms(year, 1, 1, 0, 0, 0.0)?;
    let year_end = JulianDay::from_ymd_hms(year + 1, 1, 1, 0, 0, 0.0)?;

    let run = |rashi: &Rashi| -> Option<SankrantiEvent> {
        match year_ingress(provider, ctx, *rashi, year_start, year_end, &config.locator) {
            Ok(found) => found,
            Err(e) => {
                warn!(rashi = rashi.name(), error = %e, "skipping sankranti");
                None
            }
        }
    };
    let mut events: Vec<SankrantiEvent> = if config.parallel {
        ALL_RASHIS.par_iter().filter_map(run).collect()
    } else {
        ALL_RASHIS.iter().filter_map(run).collect()
    };

    events.sort_by(|a, b| a.moment.total_cmp(&b.moment));
    if events.len() != ALL_RASHIS.len() {
        warn!(year, count = events.len(), "expected 12 sankrantis");
    }
    Ok(events)
}

fn adjacent_sankranti<P: EphemerisProvider + ?Sized>(
    provider: &P,
    ctx: &EphemerisContext,
    from: JulianDay,
    direction: Direction,
    config: &LocatorConfig,
) -> Result<SankrantiEvent, SearchError> {
    let current = rashi_from_longitude(solar_longitude(provider, ctx, from)?).rashi_index;
    let target = match direction {
        Direction::Forward => Rashi::from_index((current + 1) % 12),
        Direction::Backward => Rashi::from_index(current),
    };
    let moment = locate_angle(
        provider,
        ctx,
        AngularQuantity::SolarLongitude,
        target.start_deg(),
        from,
        direction,
        INGRESS_SPAN_DAYS,
        config,
    )?
    .require("could not find sankranti")?;
    let lon = solar_longitude(provider, ctx, moment)?;
    SankrantiEvent::new(target, moment, lon)
}

/// First ingress after `from`.
pub fn next_sankranti<P: EphemerisProvider + ?Sized>(
    provider: &P,
    ctx: &EphemerisContext,
    from: JulianDay,
    config: &LocatorConfig,
) -> Result<SankrantiEvent, SearchError> {
    adjacent_sankranti(provider, ctx, from, Direction::Forward, config)
}

/// Last ingress at or before `from`.
pub fn prev_sankranti<P: EphemerisProvider + ?Sized>(
    provider: &P,
    ctx: &EphemerisContext,
    from: JulianDay,
    config: &LocatorConfig,
) -> Result<SankrantiEvent, SearchError> {
    adjacent_sankranti(provider, ctx, from, Direction::Backward, config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{LinearProvider, SUN_RATE};
    use std::collections::HashSet;

    fn ctx() -> EphemerisContext {
        EphemerisContext::default()
    }

    #[test]
    fn twelve_distinct_ingresses_in_order() {
        let p = LinearProvider::spring_2024();
        let events = sankrantis_for_year(&p, &ctx(), 2024, &ScanConfig::default()).unwrap();
        assert_eq!(events.len(), 12);
        assert!(events.windows(2).all(|w| w[0].moment < w[1].moment));
        let signs: HashSet<_> = events.iter().map(|e| e.rashi).collect();
        assert_eq!(signs.len(), 12);
        for e in &events {
            assert!(e.moment.utc_year() == 2024);
            let off = kaal_vedic_base::shortest_arc_deg(e.sun_longitude_deg, e.rashi.start_deg());
            assert!(off.abs() < 1e-4, "{} off by {off}", e.name);
        }
    }

    #[test]
    fn capricorn_ingress_matches_linear_motion() {
        let p = LinearProvider::spring_2024();
        let events = sankrantis_for_year(&p, &ctx(), 2024, &ScanConfig::default()).unwrap();
        let makara = events.iter().find(|e| e.rashi == Rashi::Makara).unwrap();
        assert_eq!(makara.name, "Capricorn Sankranti");
        // 56 degrees before the 326 deg epoch position.
        let expected = p.epoch.add_days(-56.0 / SUN_RATE);
        assert!((makara.moment.days_since(expected)).abs() < 1e-5);
        assert_eq!(makara.date, expected.utc_date().unwrap());
    }

    #[test]
    fn next_and_prev_bracket_an_instant() {
        let p = LinearProvider::spring_2024();
        let cfg = LocatorConfig::default();
        let at = JulianDay::from_ymd_hms(2024, 6, 1, 0, 0, 0.0).unwrap();
        let next = next_sankranti(&p, &ctx(), at, &cfg).unwrap();
        let prev = prev_sankranti(&p, &ctx(), at, &cfg).unwrap();
        assert!(prev.moment <= at && next.moment > at);
        assert_eq!(next.rashi.index(), (prev.rashi.index() + 1) % 12);
        assert!(next.moment.days_since(prev.moment) < 31.5);
    }

    #[test]
    fn sequential_matches_parallel() {
        let p = LinearProvider::spring_2024();
        let seq = ScanConfig {
            parallel: false,
            ..ScanConfig::default()
        };
        let a = sankrantis_for_year(&p, &ctx(), 2024, &seq).unwrap();
        let b = sankrantis_for_year(&p, &ctx(), 2024, &ScanConfig::default()).unwrap();
        assert_eq!(a, b);
    }
}
