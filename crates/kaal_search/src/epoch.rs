//! Calendar epoch: Vikram Samvat, Saka year, and Samvatsara.
//!
//! All three are keyed to the Gregorian year of the luni-solar New Year
//! anchor, the first day whose sunrise falls in Chaitra Shukla Pratipada.
//! A kshaya Pratipada never holds at any sunrise, so Dwitiya is accepted as
//! well: the first day in Chaitra Shukla with tithi index 0 or 1.

use chrono::{Datelike, NaiveDate};
use kaal_time::{DaySequence, JulianDay};
use kaal_vedic_base::{GeoLocation, Paksha, Samvatsara, era_for_anchor_year};
use tracing::{debug, warn};

use crate::error::SearchError;
use crate::provider::{EphemerisContext, EphemerisProvider};
use crate::scan::{DaySnapshot, ScanConfig, day_snapshot};

/// Highest 0-based tithi index accepted on the anchor day.
const ANCHOR_MAX_TITHI_INDEX: u8 = 1;

/// The luni-solar New Year of one Gregorian year.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct NewYearAnchor {
    pub date: NaiveDate,
    /// Sample instant (sunrise, or local noon) of the anchor day.
    pub at: JulianDay,
    pub tithi_index: u8,
}

/// Era labels of an instant. Each field is `None` when no anchor could be
/// established.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct CalendarEpoch {
    pub anchor: Option<NewYearAnchor>,
    pub vikram_samvat: Option<i32>,
    pub saka_year: Option<i32>,
    pub samvatsara: Option<Samvatsara>,
}

impl CalendarEpoch {
    fn from_anchor(anchor: NewYearAnchor) -> Self {
        let era = era_for_anchor_year(anchor.date.year());
        Self {
            anchor: Some(anchor),
            vikram_samvat: Some(era.vikram_samvat),
            saka_year: Some(era.saka_year),
            samvatsara: Some(era.samvatsara),
        }
    }

    /// All fields unavailable.
    pub fn unavailable() -> Self {
        Self::default()
    }
}

fn is_anchor_day(snap: &DaySnapshot) -> bool {
    snap.month.amanta_index == 0
        && snap.tithi.paksha == Paksha::Shukla
        && snap.tithi.tithi_index <= ANCHOR_MAX_TITHI_INDEX
}

fn epoch_window(year: i32, config: &ScanConfig) -> Result<DaySequence, SearchError> {
    let (sm, sd) = config.epoch_window_start;
    let (em, ed) = config.epoch_window_end;
    let first = NaiveDate::from_ymd_opt(year, sm, sd)
        .ok_or(SearchError::InvalidConfig("epoch window start"))?;
    let last = NaiveDate::from_ymd_opt(year, em, ed)
        .ok_or(SearchError::InvalidConfig("epoch window end"))?;
    Ok(DaySequence::between(first, last)?)
}

/// First anchor day of `year` inside the configured window.
///
/// Days are probed in order and the scan stops at the first match. A day
/// whose evaluation fails is logged and skipped. `Ok(None)` means the
/// window held no qualifying day.
pub fn find_new_year_anchor<P: EphemerisProvider + ?Sized>(
    provider: &P,
    ctx: &EphemerisContext,
    year: i32,
    location: &GeoLocation,
    config: &ScanConfig,
) -> Result<Option<NewYearAnchor>, SearchError> {
    config.validate().map_err(SearchError::InvalidConfig)?;
    for step in epoch_window(year, config)? {
        let snap = match day_snapshot(provider, ctx, &step, location, &config.locator) {
            Ok(s) => s,
            Err(e) => {
                warn!(date = %step.date, error = %e, "skipping day in New Year search");
                continue;
            }
        };
        if is_anchor_day(&snap) {
            if snap.tithi.tithi_index > 0 {
                debug!(date = %step.date, "Pratipada skipped at sunrise, anchoring on Dwitiya");
            }
            return Ok(Some(NewYearAnchor {
                date: step.date,
                at: snap.sample.at,
                tithi_index: snap.tithi.tithi_index,
            }));
        }
    }
    Ok(None)
}

/// Era labels for `at`.
///
/// Before this year's anchor the previous year's anchor applies. When this
/// year's anchor cannot be found, instants before the end of the search
/// window fall back to the previous year; later instants, or a missing
/// previous anchor, leave every field unavailable.
pub fn resolve_epoch<P: EphemerisProvider + ?Sized>(
    provider: &P,
    ctx: &EphemerisContext,
    at: JulianDay,
    location: &GeoLocation,
    config: &ScanConfig,
) -> Result<CalendarEpoch, SearchError> {
    location.validate()?;
    let year = at.utc_year();

    match find_new_year_anchor(provider, ctx, year, location, config)? {
        Some(anchor) if at >= anchor.at => return Ok(CalendarEpoch::from_anchor(anchor)),
        Some(_) => {}
        None => {
            let (em, ed) = config.epoch_window_end;
            let window_end = NaiveDate::from_ymd_opt(year, em, ed)
                .and_then(|d| d.succ_opt())
                .map(JulianDay::from_date);
            if !window_end.is_some_and(|end| at < end) {
                warn!(year, "no New Year anchor found, epoch unavailable");
                return Ok(CalendarEpoch::unavailable());
            }
            debug!(year, "no anchor this year yet, trying the previous year");
        }
    }

    match find_new_year_anchor(provider, ctx, year - 1, location, config)? {
        Some(anchor) => Ok(CalendarEpoch::from_anchor(anchor)),
        None => {
            warn!(year = year - 1, "no New Year anchor found, epoch unavailable");
            Ok(CalendarEpoch::unavailable())
        }
    }
}
