//! Records produced by the panchang assembler.

use kaal_time::JulianDay;
use kaal_vedic_base::{
    GeoLocation, Karana, Masa, Nakshatra, Paksha, Rashi, Tithi, Vaar, Yoga,
};

/// Tithi with its absolute start and end.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct TithiInfo {
    pub tithi: Tithi,
    /// 0-based index over the lunar month (0..29): 0 is Shukla Pratipada,
    /// 14 Purnima, 15 Krishna Pratipada, 29 Amavasya. Not the 1-based
    /// paksha number; see `tithi_in_paksha`.
    pub tithi_index: u8,
    pub paksha: Paksha,
    /// 1-based number within the paksha (1..15).
    pub tithi_in_paksha: u8,
    pub start: JulianDay,
    pub end: JulianDay,
}

/// Moon's nakshatra with pada and bounds.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct NakshatraInfo {
    pub nakshatra: Nakshatra,
    /// 0-based index (0..26).
    pub nakshatra_index: u8,
    /// Quarter within the nakshatra (1..4).
    pub pada: u8,
    pub start: JulianDay,
    pub end: JulianDay,
}

/// Yoga with bounds.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct YogaInfo {
    pub yoga: Yoga,
    /// 0-based index (0..26).
    pub yoga_index: u8,
    pub start: JulianDay,
    pub end: JulianDay,
}

/// Karana with bounds.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct KaranaInfo {
    pub karana: Karana,
    /// 0-based position in the synodic month (0..59).
    pub karana_index: u8,
    pub start: JulianDay,
    pub end: JulianDay,
}

/// Weekday of the Vedic day (sunrise to next sunrise).
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct VaarInfo {
    pub vaar: Vaar,
    pub start: JulianDay,
    pub end: JulianDay,
    /// False when the Sun did not rise and the local civil day was used.
    pub sunrise_based: bool,
}

/// Lunar month in both naming conventions.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct LunarMonth {
    /// New-moon-to-new-moon month.
    pub amanta: Masa,
    /// 0 = Chaitra.
    pub amanta_index: u8,
    /// Full-moon-to-full-moon month.
    pub purnimanta: Masa,
    pub purnimanta_index: u8,
    /// Intercalary month: the Sun stayed in one sign between new moons.
    pub adhika: bool,
    /// Previous new moon.
    pub start: JulianDay,
    /// Next new moon.
    pub end: JulianDay,
}

/// Everything the assembler reports for one instant and place.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct PanchangRecord {
    pub instant: JulianDay,
    pub location: GeoLocation,
    pub tithi: TithiInfo,
    pub nakshatra: NakshatraInfo,
    pub yoga: YogaInfo,
    pub karana: KaranaInfo,
    pub vaar: VaarInfo,
    pub lunar_month: LunarMonth,
    /// Day of the solar month, 1..30.
    pub solar_day: u8,
    pub sun_longitude_deg: f64,
    pub moon_longitude_deg: f64,
    pub sun_rashi: Rashi,
    pub moon_rashi: Rashi,
}
