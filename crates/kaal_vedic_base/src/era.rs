//! Era numbering anchored to the Gregorian year of the luni-solar New Year.

use crate::samvatsara::{Samvatsara, samvatsara_for_saka_year};

/// Vikram Samvat runs 57 years ahead of the anchor's Gregorian year.
pub const VIKRAM_SAMVAT_OFFSET: i32 = 57;

/// Saka era runs 78 years behind the anchor's Gregorian year.
pub const SAKA_OFFSET: i32 = 78;

pub const fn vikram_samvat(anchor_year: i32) -> i32 {
    anchor_year + VIKRAM_SAMVAT_OFFSET
}

pub const fn saka_year(anchor_year: i32) -> i32 {
    anchor_year - SAKA_OFFSET
}

/// All three era labels for a New Year anchor in `anchor_year`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EraYears {
    pub vikram_samvat: i32,
    pub saka_year: i32,
    pub samvatsara: Samvatsara,
}

pub fn era_for_anchor_year(anchor_year: i32) -> EraYears {
    let saka = saka_year(anchor_year);
    EraYears {
        vikram_samvat: vikram_samvat(anchor_year),
        saka_year: saka,
        samvatsara: samvatsara_for_saka_year(saka),
    }
}
