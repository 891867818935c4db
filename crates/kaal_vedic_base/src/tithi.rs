//! Tithi (lunar day) and Paksha classification.
//!
//! The Moon-Sun elongation circle is cut into 30 cells of 12 degrees.
//! Cells 0..14 form the Shukla (waxing) paksha ending at Purnima, cells
//! 15..29 the Krishna (waning) paksha ending at Amavasya.

use crate::util::{cell_index, normalize_360};

/// Width of one tithi in degrees of elongation.
pub const TITHI_SEGMENT_DEG: f64 = 12.0;

/// Number of tithis in a synodic month.
pub const TITHI_COUNT: u8 = 30;

/// Lunar fortnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Paksha {
    /// Waxing half, new moon to full moon.
    Shukla,
    /// Waning half, full moon to new moon.
    Krishna,
}

impl Paksha {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Shukla => "Shukla",
            Self::Krishna => "Krishna",
        }
    }
}

/// The 30 tithis in order from Shukla Pratipada.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[allow(missing_docs)]
pub enum Tithi {
    ShuklaPratipada,
    ShuklaDwitiya,
    ShuklaTritiya,
    ShuklaChaturthi,
    ShuklaPanchami,
    ShuklaShashthi,
    ShuklaSaptami,
    ShuklaAshtami,
    ShuklaNavami,
    ShuklaDashami,
    ShuklaEkadashi,
    ShuklaDwadashi,
    ShuklaTrayodashi,
    ShuklaChaturdashi,
    Purnima,
    KrishnaPratipada,
    KrishnaDwitiya,
    KrishnaTritiya,
    KrishnaChaturthi,
    KrishnaPanchami,
    KrishnaShashthi,
    KrishnaSaptami,
    KrishnaAshtami,
    KrishnaNavami,
    KrishnaDashami,
    KrishnaEkadashi,
    KrishnaDwadashi,
    KrishnaTrayodashi,
    KrishnaChaturdashi,
    Amavasya,
}

/// All 30 tithis, index 0 = Shukla Pratipada.
pub const ALL_TITHIS: [Tithi; 30] = [
    Tithi::ShuklaPratipada,
    Tithi::ShuklaDwitiya,
    Tithi::ShuklaTritiya,
    Tithi::ShuklaChaturthi,
    Tithi::ShuklaPanchami,
    Tithi::ShuklaShashthi,
    Tithi::ShuklaSaptami,
    Tithi::ShuklaAshtami,
    Tithi::ShuklaNavami,
    Tithi::ShuklaDashami,
    Tithi::ShuklaEkadashi,
    Tithi::ShuklaDwadashi,
    Tithi::ShuklaTrayodashi,
    Tithi::ShuklaChaturdashi,
    Tithi::Purnima,
    Tithi::KrishnaPratipada,
    Tithi::KrishnaDwitiya,
    Tithi::KrishnaTritiya,
    Tithi::KrishnaChaturthi,
    Tithi::KrishnaPanchami,
    Tithi::KrishnaShashthi,
    Tithi::KrishnaSaptami,
    Tithi::KrishnaAshtami,
    Tithi::KrishnaNavami,
    Tithi::KrishnaDashami,
    Tithi::KrishnaEkadashi,
    Tithi::KrishnaDwadashi,
    Tithi::KrishnaTrayodashi,
    Tithi::KrishnaChaturdashi,
    Tithi::Amavasya,
];

/// Tithi names within a paksha, by 1-based number.
const PAKSHA_TITHI_NAMES: [&str; 15] = [
    "Pratipada",
    "Dwitiya",
    "Tritiya",
    "Chaturthi",
    "Panchami",
    "Shashthi",
    "Saptami",
    "Ashtami",
    "Navami",
    "Dashami",
    "Ekadashi",
    "Dwadashi",
    "Trayodashi",
    "Chaturdashi",
    "Purnima",
];

impl Tithi {
    /// 0-based index (0..29).
    pub const fn index(self) -> u8 {
        self as u8
    }

    /// Tithi for a 0-based index, wrapping modulo 30.
    pub const fn from_index(index: u8) -> Self {
        ALL_TITHIS[(index % TITHI_COUNT) as usize]
    }

    pub const fn paksha(self) -> Paksha {
        if self.index() < 15 {
            Paksha::Shukla
        } else {
            Paksha::Krishna
        }
    }

    /// 1-based number within the paksha (1..15).
    pub const fn number_in_paksha(self) -> u8 {
        self.index() % 15 + 1
    }

    /// Traditional name, e.g. "Shukla Ekadashi", "Purnima", "Amavasya".
    pub fn name(self) -> String {
        match self {
            Self::Purnima => "Purnima".to_string(),
            Self::Amavasya => "Amavasya".to_string(),
            t => format!(
                "{} {}",
                t.paksha().name(),
                PAKSHA_TITHI_NAMES[(t.number_in_paksha() - 1) as usize]
            ),
        }
    }
}

/// Position of an elongation inside the tithi partition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TithiPosition {
    pub tithi: Tithi,
    /// 0-based tithi index (0..29).
    pub tithi_index: u8,
    pub paksha: Paksha,
    /// 1-based tithi number within the paksha (1-15).
    pub tithi_in_paksha: u8,
    /// Degrees of elongation already elapsed in this tithi, [0, 12).
    pub degrees_in_tithi: f64,
}

/// Classify a Moon-Sun elongation (degrees, any range).
pub fn tithi_from_elongation(elongation_deg: f64) -> TithiPosition {
    let e = normalize_360(elongation_deg);
    let idx = cell_index(e, TITHI_SEGMENT_DEG, TITHI_COUNT);
    let tithi = Tithi::from_index(idx);
    TithiPosition {
        tithi,
        tithi_index: idx,
        paksha: tithi.paksha(),
        tithi_in_paksha: tithi.number_in_paksha(),
        degrees_in_tithi: e - idx as f64 * TITHI_SEGMENT_DEG,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partition_covers_circle() {
        // Every 12-degree cell maps to its own tithi, in order.
        for i in 0..30u8 {
            let mid = i as f64 * TITHI_SEGMENT_DEG + 6.0;
            assert_eq!(tithi_from_elongation(mid).tithi_index, i);
            let edge = i as f64 * TITHI_SEGMENT_DEG;
            assert_eq!(tithi_from_elongation(edge).tithi_index, i);
        }
    }

    #[test]
    fn purnima_and_amavasya() {
        let p = tithi_from_elongation(179.9);
        assert_eq!(p.tithi, Tithi::Purnima);
        assert_eq!(p.paksha, Paksha::Shukla);
        assert_eq!(p.tithi_in_paksha, 15);

        let a = tithi_from_elongation(-0.1);
        assert_eq!(a.tithi, Tithi::Amavasya);
        assert_eq!(a.paksha, Paksha::Krishna);
        assert_eq!(a.tithi_in_paksha, 15);
    }

    #[test]
    fn krishna_numbering() {
        let t = tithi_from_elongation(180.0 + 7.0 * 12.0 + 1.0);
        assert_eq!(t.tithi, Tithi::KrishnaAshtami);
        assert_eq!(t.tithi_in_paksha, 8);
        assert!((t.degrees_in_tithi - 1.0).abs() < 1e-9);
    }

    #[test]
    fn names() {
        assert_eq!(Tithi::ShuklaEkadashi.name(), "Shukla Ekadashi");
        assert_eq!(Tithi::KrishnaPratipada.name(), "Krishna Pratipada");
        assert_eq!(Tithi::Amavasya.name(), "Amavasya");
    }

    #[test]
    fn index_roundtrip() {
        for (i, t) in ALL_TITHIS.iter().enumerate() {
            assert_eq!(t.index() as usize, i);
            assert_eq!(Tithi::from_index(i as u8), *t);
        }
    }
}
