//! Rashi (zodiac sign) classification on the sidereal ecliptic.

use crate::util::{cell_index, normalize_360};

/// Span of one rashi in degrees.
pub const RASHI_SPAN_DEG: f64 = 30.0;

/// The 12 rashis from Mesha (Aries) to Meena (Pisces).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Rashi {
    Mesha,
    Vrishabha,
    Mithuna,
    Karka,
    Simha,
    Kanya,
    Tula,
    Vrischika,
    Dhanu,
    Makara,
    Kumbha,
    Meena,
}

pub const ALL_RASHIS: [Rashi; 12] = [
    Rashi::Mesha,
    Rashi::Vrishabha,
    Rashi::Mithuna,
    Rashi::Karka,
    Rashi::Simha,
    Rashi::Kanya,
    Rashi::Tula,
    Rashi::Vrischika,
    Rashi::Dhanu,
    Rashi::Makara,
    Rashi::Kumbha,
    Rashi::Meena,
];

impl Rashi {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Mesha => "Mesha",
            Self::Vrishabha => "Vrishabha",
            Self::Mithuna => "Mithuna",
            Self::Karka => "Karka",
            Self::Simha => "Simha",
            Self::Kanya => "Kanya",
            Self::Tula => "Tula",
            Self::Vrischika => "Vrischika",
            Self::Dhanu => "Dhanu",
            Self::Makara => "Makara",
            Self::Kumbha => "Kumbha",
            Self::Meena => "Meena",
        }
    }

    /// Western (Latin) sign name.
    pub const fn western_name(self) -> &'static str {
        match self {
            Self::Mesha => "Aries",
            Self::Vrishabha => "Taurus",
            Self::Mithuna => "Gemini",
            Self::Karka => "Cancer",
            Self::Simha => "Leo",
            Self::Kanya => "Virgo",
            Self::Tula => "Libra",
            Self::Vrischika => "Scorpio",
            Self::Dhanu => "Sagittarius",
            Self::Makara => "Capricorn",
            Self::Kumbha => "Aquarius",
            Self::Meena => "Pisces",
        }
    }

    pub const fn index(self) -> u8 {
        self as u8
    }

    /// Sidereal longitude at which this sign begins.
    pub const fn start_deg(self) -> f64 {
        self.index() as f64 * RASHI_SPAN_DEG
    }

    /// Rashi for a 0-based index, wrapping modulo 12.
    pub const fn from_index(index: u8) -> Self {
        ALL_RASHIS[(index % 12) as usize]
    }
}

/// Rashi position for a sidereal longitude.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RashiPosition {
    pub rashi: Rashi,
    pub rashi_index: u8,
    /// Degrees within the sign, [0, 30).
    pub degrees_in_rashi: f64,
}

pub fn rashi_from_longitude(sidereal_lon_deg: f64) -> RashiPosition {
    let lon = normalize_360(sidereal_lon_deg);
    let idx = cell_index(lon, RASHI_SPAN_DEG, 12);
    RashiPosition {
        rashi: Rashi::from_index(idx),
        rashi_index: idx,
        degrees_in_rashi: lon - idx as f64 * RASHI_SPAN_DEG,
    }
}

/// Solar calendar day of month: floor(longitude mod 30) + 1, in 1..=30.
pub fn solar_day_of_month(sun_sidereal_deg: f64) -> u8 {
    let within = normalize_360(sun_sidereal_deg) % RASHI_SPAN_DEG;
    (within.floor() as u8).min(29) + 1
}
