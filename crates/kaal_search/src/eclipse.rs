//! Solar and lunar eclipses of a Gregorian year.
//!
//! The provider finds eclipses one at a time; this module walks each kind
//! across the year, drops lunar eclipses whose maximum happens with the Moon
//! below the horizon, and merges both kinds by time of maximum. Solar
//! eclipses arrive already reduced to the observer.

use chrono::NaiveDate;
use kaal_time::JulianDay;
use kaal_vedic_base::{GeoLocation, Graha};
use tracing::{debug, info, warn};

use crate::error::SearchError;
use crate::provider::{
    EclipseBody, EclipseExtremum, EclipseKind, EphemerisContext, EphemerisProvider,
};

/// Cursor advance past a found eclipse; consecutive eclipses of one body are
/// at least two weeks apart.
const ADVANCE_DAYS: f64 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct EclipseEvent {
    pub body: EclipseBody,
    pub kind: EclipseKind,
    /// Time of greatest eclipse.
    pub peak: JulianDay,
    pub start: Option<JulianDay>,
    pub end: Option<JulianDay>,
    pub magnitude: f64,
    /// Fraction of the Sun's disk hidden at peak; `None` for lunar eclipses.
    pub obscuration: Option<f64>,
    /// UTC calendar date of `peak`.
    pub date: NaiveDate,
}

impl EclipseEvent {
    fn from_extremum(e: &EclipseExtremum) -> Result<Self, SearchError> {
        Ok(Self {
            body: e.body,
            kind: e.kind,
            peak: e.peak,
            start: e.start,
            end: e.end,
            magnitude: e.magnitude,
            obscuration: e.obscuration,
            date: e.peak.utc_date()?,
        })
    }
}

/// Successive eclipses from `next` whose peak falls in `year`.
///
/// Stops at the first eclipse past the year, at a provider failure (logged),
/// or when the provider stops advancing.
fn walk_year<F>(year: i32, from: JulianDay, body: EclipseBody, next: F) -> Vec<EclipseExtremum>
where
    F: Fn(JulianDay) -> Result<Option<EclipseExtremum>, SearchError>,
{
    let mut out = Vec::new();
    let mut cursor = from;
    loop {
        let found = match next(cursor) {
            Ok(Some(e)) => e,
            Ok(None) => break,
            Err(e) => {
                warn!(year, ?body, error = %e, "eclipse search stopped");
                break;
            }
        };
        if found.peak.utc_year() != year {
            break;
        }
        if found.peak <= cursor {
            warn!(year, ?body, "eclipse search did not advance");
            break;
        }
        cursor = found.peak.add_days(ADVANCE_DAYS);
        out.push(found);
    }
    out
}

/// Eclipses of `year` relevant to `location`, ordered by peak.
///
/// Solar eclipses are the provider's local ones for `location`. A lunar
/// eclipse is kept only when the Moon is above the horizon at its maximum.
pub fn eclipses_for_year<P: EphemerisProvider + ?Sized>(
    provider: &P,
    ctx: &EphemerisContext,
    year: i32,
    location: &GeoLocation,
) -> Result<Vec<EclipseEvent>, SearchError> {
    location.validate()?;
    let from = JulianDay::from_ymd_hms(year, 1, 1, 0, 0, 0.0)?;

    let solar = walk_year(year, from, EclipseBody::Solar, |t| {
        Ok(provider.next_solar_eclipse(ctx, t, location)?)
    });
    let lunar = walk_year(year, from, EclipseBody::Lunar, |t| {
        Ok(provider.next_lunar_eclipse(ctx, t)?)
    });

    let mut visible_lunar = Vec::with_capacity(lunar.len());
    for e in lunar {
        match provider.altitude_deg(ctx, Graha::Chandra, e.peak, location) {
            Ok(alt) if alt > 0.0 => visible_lunar.push(e),
            Ok(alt) => debug!(peak = %e.peak, alt, "lunar eclipse below horizon"),
            Err(err) => warn!(peak = %e.peak, error = %err, "moon altitude unavailable"),
        }
    }

    let mut events = solar
        .iter()
        .chain(visible_lunar.iter())
        .map(EclipseEvent::from_extremum)
        .collect::<Result<Vec<_>, _>>()?;
    events.sort_by(|a, b| a.peak.total_cmp(&b.peak));
    info!(year, count = events.len(), "eclipse scan complete");
    Ok(events)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::LinearProvider;

    fn extremum(
        body: EclipseBody,
        kind: EclipseKind,
        y: i32,
        m: u32,
        d: u32,
        h: u32,
    ) -> EclipseExtremum {
        let peak = JulianDay::from_ymd_hms(y, m, d, h, 0, 0.0).unwrap();
        EclipseExtremum {
            body,
            kind,
            peak,
            start: Some(peak.add_hours(-2.0)),
            end: Some(peak.add_hours(2.0)),
            magnitude: 0.8,
            obscuration: (body == EclipseBody::Solar).then_some(0.75),
        }
    }

    fn provider() -> LinearProvider {
        let mut p = LinearProvider::spring_2024();
        // Dallas: the October annular is only seen from the South Pacific.
        p.eclipses = vec![
            extremum(EclipseBody::Solar, EclipseKind::Total, 2024, 4, 8, 18),
            extremum(EclipseBody::Lunar, EclipseKind::Penumbral, 2024, 3, 25, 7),
            extremum(EclipseBody::Lunar, EclipseKind::Partial, 2024, 9, 18, 2),
            extremum(EclipseBody::Lunar, EclipseKind::Total, 2025, 3, 14, 6),
            extremum(EclipseBody::Solar, EclipseKind::Partial, 2023, 10, 14, 18),
        ];
        p
    }

    fn dallas() -> GeoLocation {
        GeoLocation::at_sea_level(32.78, -96.80)
    }

    #[test]
    fn year_is_sorted_and_dated_by_peak() {
        let events =
            eclipses_for_year(&provider(), &EphemerisContext::default(), 2024, &dallas()).unwrap();
        assert_eq!(events.len(), 3);
        assert!(events.windows(2).all(|w| w[0].peak < w[1].peak));
        for e in &events {
            assert_eq!(e.date, e.peak.utc_date().unwrap());
        }
        assert_eq!(events[0].body, EclipseBody::Lunar);
        assert_eq!(events[1].kind, EclipseKind::Total);
        assert_eq!(events[1].obscuration, Some(0.75));
        assert_eq!(events[2].obscuration, None);
    }

    #[test]
    fn lunar_below_horizon_is_dropped() {
        let mut p = provider();
        p.moon_altitude_deg = -5.0;
        let events =
            eclipses_for_year(&p, &EphemerisContext::default(), 2024, &dallas()).unwrap();
        assert_eq!(events.len(), 1);
        assert!(events.iter().all(|e| e.body == EclipseBody::Solar));
    }

    #[test]
    fn empty_year() {
        let events =
            eclipses_for_year(&provider(), &EphemerisContext::default(), 2030, &dallas()).unwrap();
        assert!(events.is_empty());
    }

    #[test]
    fn stalled_provider_stops_the_walk() {
        let from = JulianDay::from_ymd_hms(2024, 1, 1, 0, 0, 0.0).unwrap();
        let stuck = extremum(EclipseBody::Solar, EclipseKind::Total, 2024, 4, 8, 18);
        let out = walk_year(2024, from, EclipseBody::Solar, |_| Ok(Some(stuck)));
        assert_eq!(out.len(), 1);
    }
}
