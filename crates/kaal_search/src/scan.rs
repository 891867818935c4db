//! Shared machinery for year-long day scans.
//!
//! Each civil day is sampled once, at local sunrise or at local noon where
//! the Sun does not rise, and every rule is tested against that single
//! sample. Days are independent, so the scan fans out over the day
//! sequence with rayon and the caller restores order with a stable sort.

use chrono::NaiveDate;
use kaal_time::{DaySequence, DayStep, JulianDay, approximate_local_noon};
use kaal_vedic_base::{
    GeoLocation, Graha, NakshatraPosition, TithiPosition, normalize_360,
    nakshatra_from_longitude, tithi_from_elongation,
};
use rayon::prelude::*;
use tracing::warn;

use crate::error::SearchError;
use crate::locator::LocatorConfig;
use crate::panchang::lunar_month_at;
use crate::panchang_types::LunarMonth;
use crate::provider::{EphemerisContext, EphemerisProvider};

/// Tuning for day scans.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScanConfig {
    /// Evaluate days on the rayon pool.
    pub parallel: bool,
    /// Walk step inside a day when no nakshatra boundary is known.
    pub hour_step_hours: f64,
    /// First (month, day) probed for the New Year anchor.
    pub epoch_window_start: (u32, u32),
    /// Last (month, day) probed for the New Year anchor.
    pub epoch_window_end: (u32, u32),
    pub locator: LocatorConfig,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            parallel: true,
            hour_step_hours: 1.0,
            epoch_window_start: (2, 15),
            epoch_window_end: (4, 30),
            locator: LocatorConfig::default(),
        }
    }
}

impl ScanConfig {
    pub fn validate(&self) -> Result<(), &'static str> {
        if !self.hour_step_hours.is_finite()
            || self.hour_step_hours <= 0.0
            || self.hour_step_hours > 24.0
        {
            return Err("hour_step_hours must be in (0, 24]");
        }
        let (sm, sd) = self.epoch_window_start;
        let (em, ed) = self.epoch_window_end;
        // Probe against a leap year so Feb 29 is accepted.
        let start = NaiveDate::from_ymd_opt(2024, sm, sd).ok_or("invalid epoch window start")?;
        let end = NaiveDate::from_ymd_opt(2024, em, ed).ok_or("invalid epoch window end")?;
        if end < start {
            return Err("epoch window end precedes start");
        }
        self.locator.validate()
    }
}

/// The instant a civil day is evaluated at.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DaySample {
    pub date: NaiveDate,
    /// Sunrise, or local noon when there is none.
    pub at: JulianDay,
    pub sunrise: Option<JulianDay>,
}

/// Sample the civil day of `step` at `location`.
pub fn day_sample<P: EphemerisProvider + ?Sized>(
    provider: &P,
    ctx: &EphemerisContext,
    step: &DayStep,
    location: &GeoLocation,
) -> Result<DaySample, SearchError> {
    let noon = approximate_local_noon(step.midnight, location.longitude_deg);
    let sunrise = provider.sun_moon_times(ctx, noon, location)?.sunrise.event();
    Ok(DaySample {
        date: step.date,
        at: sunrise.unwrap_or(noon),
        sunrise,
    })
}

/// Tithi, nakshatra, and lunar month at a day's sample instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DaySnapshot {
    pub sample: DaySample,
    pub tithi: TithiPosition,
    pub nakshatra: NakshatraPosition,
    pub month: LunarMonth,
}

pub fn day_snapshot<P: EphemerisProvider + ?Sized>(
    provider: &P,
    ctx: &EphemerisContext,
    step: &DayStep,
    location: &GeoLocation,
    config: &LocatorConfig,
) -> Result<DaySnapshot, SearchError> {
    let sample = day_sample(provider, ctx, step, location)?;
    let sun = provider.sidereal_longitude(ctx, Graha::Surya, sample.at)?;
    let moon = provider.sidereal_longitude(ctx, Graha::Chandra, sample.at)?;
    let tithi = tithi_from_elongation(normalize_360(moon - sun));
    let month = lunar_month_at(provider, ctx, sample.at, tithi.paksha, config)?;
    Ok(DaySnapshot {
        sample,
        tithi,
        nakshatra: nakshatra_from_longitude(moon),
        month,
    })
}

/// Run `per_day` over every day of `days`, flattening the results.
///
/// A failing day is logged and contributes nothing; the rest of the scan
/// continues. Output order follows the day order.
pub(crate) fn scan_days<T, F>(days: &DaySequence, config: &ScanConfig, per_day: F) -> Vec<T>
where
    T: Send,
    F: Fn(&DayStep) -> Result<Vec<T>, SearchError> + Sync,
{
    let run = |i: usize| -> Vec<T> {
        let Some(step) = days.get(i) else {
            return Vec::new();
        };
        match per_day(&step) {
            Ok(found) => found,
            Err(e) => {
                warn!(date = %step.date, error = %e, "skipping day");
                Vec::new()
            }
        }
    };

    if config.parallel {
        (0..days.len()).into_par_iter().flat_map_iter(&run).collect()
    } else {
        (0..days.len()).flat_map(&run).collect()
    }
}
