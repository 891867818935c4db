//! Luni-solar Yoga: 27 cells of (Sun_sid + Moon_sid) mod 360.

use crate::util::{cell_index, normalize_360};

/// Width of one yoga in degrees of summed longitude.
pub const YOGA_SEGMENT_DEG: f64 = 360.0 / 27.0;

pub const YOGA_COUNT: u8 = 27;

/// The 27 yogas from Vishkambha to Vaidhriti.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[allow(missing_docs)]
pub enum Yoga {
    Vishkambha,
    Priti,
    Ayushman,
    Saubhagya,
    Shobhana,
    Atiganda,
    Sukarma,
    Dhriti,
    Shula,
    Ganda,
    Vriddhi,
    Dhruva,
    Vyaghata,
    Harshana,
    Vajra,
    Siddhi,
    Vyatipata,
    Variyan,
    Parigha,
    Shiva,
    Siddha,
    Sadhya,
    Shubha,
    Shukla,
    Brahma,
    Indra,
    Vaidhriti,
}

pub const ALL_YOGAS: [Yoga; 27] = [
    Yoga::Vishkambha,
    Yoga::Priti,
    Yoga::Ayushman,
    Yoga::Saubhagya,
    Yoga::Shobhana,
    Yoga::Atiganda,
    Yoga::Sukarma,
    Yoga::Dhriti,
    Yoga::Shula,
    Yoga::Ganda,
    Yoga::Vriddhi,
    Yoga::Dhruva,
    Yoga::Vyaghata,
    Yoga::Harshana,
    Yoga::Vajra,
    Yoga::Siddhi,
    Yoga::Vyatipata,
    Yoga::Variyan,
    Yoga::Parigha,
    Yoga::Shiva,
    Yoga::Siddha,
    Yoga::Sadhya,
    Yoga::Shubha,
    Yoga::Shukla,
    Yoga::Brahma,
    Yoga::Indra,
    Yoga::Vaidhriti,
];

const YOGA_NAMES: [&str; 27] = [
    "Vishkambha",
    "Priti",
    "Ayushman",
    "Saubhagya",
    "Shobhana",
    "Atiganda",
    "Sukarma",
    "Dhriti",
    "Shula",
    "Ganda",
    "Vriddhi",
    "Dhruva",
    "Vyaghata",
    "Harshana",
    "Vajra",
    "Siddhi",
    "Vyatipata",
    "Variyan",
    "Parigha",
    "Shiva",
    "Siddha",
    "Sadhya",
    "Shubha",
    "Shukla",
    "Brahma",
    "Indra",
    "Vaidhriti",
];

impl Yoga {
    pub const fn index(self) -> u8 {
        self as u8
    }

    pub fn name(self) -> &'static str {
        YOGA_NAMES[self.index() as usize]
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct YogaPosition {
    pub yoga: Yoga,
    /// 0-based yoga index (0..26).
    pub yoga_index: u8,
    pub degrees_in_yoga: f64,
}

/// Classify a sidereal luni-solar sum (degrees, any range).
pub fn yoga_from_sum(sidereal_sum_deg: f64) -> YogaPosition {
    let s = normalize_360(sidereal_sum_deg);
    let idx = cell_index(s, YOGA_SEGMENT_DEG, YOGA_COUNT);
    YogaPosition {
        yoga: ALL_YOGAS[idx as usize],
        yoga_index: idx,
        degrees_in_yoga: s - idx as f64 * YOGA_SEGMENT_DEG,
    }
}
