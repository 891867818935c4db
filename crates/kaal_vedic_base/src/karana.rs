//! Karana (half-tithi) classification.
//!
//! 60 cells of 6 degrees of elongation. Cell 0 is the fixed Kimstughna,
//! cells 1..=56 run the movable 7-cycle eight times, and cells 57..59 are
//! the fixed Shakuni, Chatushpada and Naga.

use crate::util::{cell_index, normalize_360};

/// Width of one karana in degrees of elongation.
pub const KARANA_SEGMENT_DEG: f64 = 6.0;

/// Number of karana cells in a synodic month.
pub const KARANA_COUNT: u8 = 60;

/// The 11 karana names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[allow(missing_docs)]
pub enum Karana {
    Bava,
    Balava,
    Kaulava,
    Taitila,
    Garaja,
    Vanija,
    Vishti,
    Shakuni,
    Chatushpada,
    Naga,
    Kimstughna,
}

/// The repeating movable cycle.
pub const MOVABLE_KARANAS: [Karana; 7] = [
    Karana::Bava,
    Karana::Balava,
    Karana::Kaulava,
    Karana::Taitila,
    Karana::Garaja,
    Karana::Vanija,
    Karana::Vishti,
];

impl Karana {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Bava => "Bava",
            Self::Balava => "Balava",
            Self::Kaulava => "Kaulava",
            Self::Taitila => "Taitila",
            Self::Garaja => "Garaja",
            Self::Vanija => "Vanija",
            Self::Vishti => "Vishti",
            Self::Shakuni => "Shakuni",
            Self::Chatushpada => "Chatushpada",
            Self::Naga => "Naga",
            Self::Kimstughna => "Kimstughna",
        }
    }

    /// Whether this is one of the four fixed karanas.
    pub const fn is_fixed(self) -> bool {
        matches!(
            self,
            Self::Shakuni | Self::Chatushpada | Self::Naga | Self::Kimstughna
        )
    }
}

/// Karana name for a 0-based cell index (0..59).
pub const fn karana_for_index(index: u8) -> Karana {
    match index % KARANA_COUNT {
        0 => Karana::Kimstughna,
        57 => Karana::Shakuni,
        58 => Karana::Chatushpada,
        59 => Karana::Naga,
        i => MOVABLE_KARANAS[((i - 1) % 7) as usize],
    }
}

/// Position of an elongation inside the karana partition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KaranaPosition {
    pub karana: Karana,
    /// 0-based cell index within the synodic month (0..59).
    pub karana_index: u8,
    pub degrees_in_karana: f64,
}

/// Classify a Moon-Sun elongation (degrees, any range).
pub fn karana_from_elongation(elongation_deg: f64) -> KaranaPosition {
    let e = normalize_360(elongation_deg);
    let idx = cell_index(e, KARANA_SEGMENT_DEG, KARANA_COUNT);
    KaranaPosition {
        karana: karana_for_index(idx),
        karana_index: idx,
        degrees_in_karana: e - idx as f64 * KARANA_SEGMENT_DEG,
    }
}
