//! Ephemeris-driven panchang engine for kaal.
//!
//! This crate provides:
//! - The `EphemerisProvider` contract and its explicit `EphemerisContext`
//! - A boundary locator for angular crossings (coarse scan + bisection)
//! - Panchang assembly for an instant and place, with element bounds
//! - New and full moon search, lunar month naming with adhika detection
//! - Calendar epoch resolution (Vikram Samvat, Saka year, Samvatsara)
//! - Year scans: tithi dates, festivals, yoga windows, Sankranti, eclipses

pub mod eclipse;
pub mod epoch;
pub mod error;
pub mod festival;
pub mod locator;
pub mod lunar_phase;
pub mod panchang;
pub mod panchang_types;
pub mod provider;
pub mod quantity;
pub mod sankranti;
pub mod scan;
pub mod tithi_search;
pub mod yoga_windows;

#[cfg(test)]
mod test_support;

pub use eclipse::{EclipseEvent, eclipses_for_year};
pub use epoch::{CalendarEpoch, NewYearAnchor, find_new_year_anchor, resolve_epoch};
pub use error::SearchError;
pub use festival::{FESTIVAL_RULES, FestivalEvent, FestivalRule, festivals, festivals_with_rules};
pub use locator::{
    Crossing, LocatorConfig, element_bounds, find_angle_crossing, find_crossing_in_window,
    locate_angle, locate_crossing,
};
pub use lunar_phase::{
    LunarPhase, LunarPhaseEvent, next_full_moon, next_new_moon, prev_full_moon, prev_new_moon,
};
pub use panchang::{
    VedicDay, hora_schedule_at, karana_at, local_noon, lunar_month_at, nakshatra_at,
    panchang_at, tithi_at, vaar_for, vedic_day, yoga_at,
};
pub use panchang_types::{
    KaranaInfo, LunarMonth, NakshatraInfo, PanchangRecord, TithiInfo, VaarInfo, YogaInfo,
};
pub use provider::{
    Direction, EclipseBody, EclipseExtremum, EclipseKind, ElementKind, EphemerisContext,
    EphemerisProvider, ProviderError, RiseSet, SunMoonTimes,
};
pub use quantity::AngularQuantity;
pub use sankranti::{SankrantiEvent, next_sankranti, prev_sankranti, sankrantis_for_year};
pub use scan::{DaySample, DaySnapshot, ScanConfig, day_sample, day_snapshot};
pub use tithi_search::{TithiDate, tithi_dates};
pub use yoga_windows::{
    YOGA_WINDOW_RULES, YogaNature, YogaWindow, YogaWindowRule, yoga_windows,
    yoga_windows_for_month, yoga_windows_for_year,
};
