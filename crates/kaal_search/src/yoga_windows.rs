//! Weekday/nakshatra yoga windows.
//!
//! Each rule pairs every weekday with one nakshatra. Whenever the Moon is in
//! that nakshatra during a Vedic day of that weekday, the overlap of the two
//! is a window. Days are walked from sunrise to the next sunrise, jumping to
//! the end of each nakshatra and stepping by a fixed number of hours when
//! that end cannot be located.

use chrono::NaiveDate;
use kaal_time::{DaySequence, DayStep, JulianDay, approximate_local_noon};
use kaal_vedic_base::{GeoLocation, Graha, Nakshatra, Vaar, nakshatra_from_longitude};
use std::collections::HashSet;
use tracing::{debug, info};

use crate::error::SearchError;
use crate::locator::element_bounds;
use crate::panchang::{vaar_from_day, vedic_day};
use crate::provider::{ElementKind, EphemerisContext, EphemerisProvider};
use crate::scan::{ScanConfig, scan_days};

/// Step past a located boundary so the next sample lands in the following
/// nakshatra.
const BOUNDARY_NUDGE_DAYS: f64 = 1.0 / 86_400.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum YogaNature {
    Auspicious,
    Inauspicious,
}

/// A named weekday-to-nakshatra table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YogaWindowRule {
    pub name: &'static str,
    pub nature: YogaNature,
    /// Nakshatra for each weekday, Sunday first.
    pub nakshatra_by_vaar: [Nakshatra; 7],
}

impl YogaWindowRule {
    pub const fn nakshatra_for(&self, vaar: Vaar) -> Nakshatra {
        self.nakshatra_by_vaar[vaar.index() as usize]
    }
}

pub const YOGA_WINDOW_RULES: &[YogaWindowRule] = &[
    YogaWindowRule {
        name: "Amrita Siddhi Yoga",
        nature: YogaNature::Auspicious,
        nakshatra_by_vaar: [
            Nakshatra::Hasta,
            Nakshatra::Mrigashira,
            Nakshatra::Ashwini,
            Nakshatra::Anuradha,
            Nakshatra::Pushya,
            Nakshatra::Revati,
            Nakshatra::Rohini,
        ],
    },
    YogaWindowRule {
        name: "Mrityu Yoga",
        nature: YogaNature::Inauspicious,
        nakshatra_by_vaar: [
            Nakshatra::Anuradha,
            Nakshatra::UttaraAshadha,
            Nakshatra::Shatabhisha,
            Nakshatra::Ashwini,
            Nakshatra::Mrigashira,
            Nakshatra::Ashlesha,
            Nakshatra::Hasta,
        ],
    },
];

/// One window, clipped to both the nakshatra and its Vedic day.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct YogaWindow {
    pub name: &'static str,
    pub nature: YogaNature,
    /// Civil date the Vedic day begins on.
    pub date: NaiveDate,
    pub vaar: Vaar,
    pub nakshatra: Nakshatra,
    pub start: JulianDay,
    pub end: JulianDay,
}

/// Windows of the built-in rules for one Gregorian month.
pub fn yoga_windows_for_month<P: EphemerisProvider + ?Sized>(
    provider: &P,
    ctx: &EphemerisContext,
    year: i32,
    month: u32,
    location: &GeoLocation,
    config: &ScanConfig,
) -> Result<Vec<YogaWindow>, SearchError> {
    let days = DaySequence::for_month(year, month)?;
    yoga_windows(provider, ctx, &days, location, YOGA_WINDOW_RULES, config)
}

/// Windows of the built-in rules for one Gregorian year.
pub fn yoga_windows_for_year<P: EphemerisProvider + ?Sized>(
    provider: &P,
    ctx: &EphemerisContext,
    year: i32,
    location: &GeoLocation,
    config: &ScanConfig,
) -> Result<Vec<YogaWindow>, SearchError> {
    let days = DaySequence::for_year(year)?;
    yoga_windows(provider, ctx, &days, location, YOGA_WINDOW_RULES, config)
}

/// Windows of `rules` over the Vedic days beginning on `days`, sorted by
/// start and deduplicated on (name, start, end) to the second.
pub fn yoga_windows<P: EphemerisProvider + ?Sized>(
    provider: &P,
    ctx: &EphemerisContext,
    days: &DaySequence,
    location: &GeoLocation,
    rules: &[YogaWindowRule],
    config: &ScanConfig,
) -> Result<Vec<YogaWindow>, SearchError> {
    config.validate().map_err(SearchError::InvalidConfig)?;
    location.validate()?;

    let mut windows = scan_days(days, config, |step| {
        windows_in_day(provider, ctx, step, location, rules, config)
    });

    windows.sort_by(|a, b| a.start.total_cmp(&b.start));
    let mut seen = HashSet::new();
    windows.retain(|w| seen.insert((w.name, w.start.second_key(), w.end.second_key())));
    info!(days = days.len(), count = windows.len(), "yoga window scan complete");
    Ok(windows)
}

fn windows_in_day<P: EphemerisProvider + ?Sized>(
    provider: &P,
    ctx: &EphemerisContext,
    step: &DayStep,
    location: &GeoLocation,
    rules: &[YogaWindowRule],
    config: &ScanConfig,
) -> Result<Vec<YogaWindow>, SearchError> {
    let noon = approximate_local_noon(step.midnight, location.longitude_deg);
    let day = vedic_day(provider, ctx, noon, location)?;
    let vaar = vaar_from_day(&day, location).vaar;
    let hour_step = config.hour_step_hours / 24.0;

    let mut out = Vec::new();
    let mut t = day.start;
    while t < day.end {
        let moon = provider.sidereal_longitude(ctx, Graha::Chandra, t)?;
        let pos = nakshatra_from_longitude(moon);
        let mut next = t.add_days(hour_step);

        match element_bounds(
            provider,
            ctx,
            ElementKind::Nakshatra,
            pos.nakshatra_index,
            t,
            &config.locator,
        ) {
            Ok((n_start, n_end)) => {
                let start = if n_start > day.start { n_start } else { day.start };
                let end = if n_end < day.end { n_end } else { day.end };
                if end > start {
                    out.extend(
                        rules
                            .iter()
                            .filter(|r| r.nakshatra_for(vaar) == pos.nakshatra)
                            .map(|r| YogaWindow {
                                name: r.name,
                                nature: r.nature,
                                date: step.date,
                                vaar,
                                nakshatra: pos.nakshatra,
                                start,
                                end,
                            }),
                    );
                }
                if n_end > t {
                    next = n_end.add_days(BOUNDARY_NUDGE_DAYS);
                }
            }
            Err(SearchError::NoConvergence(what)) => {
                debug!(date = %step.date, what, "nakshatra bounds unknown, stepping");
            }
            Err(e) => return Err(e),
        }
        t = next;
    }
    Ok(out)
}
