//! Masa (lunar month) naming for the Amanta and Purnimanta conventions.

use crate::tithi::Paksha;

/// The 12 lunar months, index 0 = Chaitra.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Masa {
    Chaitra,
    Vaishakha,
    Jyeshtha,
    Ashadha,
    Shravana,
    Bhadrapada,
    Ashvina,
    Kartika,
    Margashirsha,
    Pausha,
    Magha,
    Phalguna,
}

pub const ALL_MASAS: [Masa; 12] = [
    Masa::Chaitra,
    Masa::Vaishakha,
    Masa::Jyeshtha,
    Masa::Ashadha,
    Masa::Shravana,
    Masa::Bhadrapada,
    Masa::Ashvina,
    Masa::Kartika,
    Masa::Margashirsha,
    Masa::Pausha,
    Masa::Magha,
    Masa::Phalguna,
];

impl Masa {
    pub const fn index(self) -> u8 {
        self as u8
    }

    pub const fn from_index(index: u8) -> Self {
        ALL_MASAS[(index % 12) as usize]
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Chaitra => "Chaitra",
            Self::Vaishakha => "Vaishakha",
            Self::Jyeshtha => "Jyeshtha",
            Self::Ashadha => "Ashadha",
            Self::Shravana => "Shravana",
            Self::Bhadrapada => "Bhadrapada",
            Self::Ashvina => "Ashvina",
            Self::Kartika => "Kartika",
            Self::Margashirsha => "Margashirsha",
            Self::Pausha => "Pausha",
            Self::Magha => "Magha",
            Self::Phalguna => "Phalguna",
        }
    }
}

/// Amanta month named after the sign the Sun occupies when the month ends.
///
/// A month ending with the Sun in Mesha is Chaitra, in Vrishabha Vaishakha,
/// and so on.
pub const fn masa_from_rashi_index(rashi_index: u8) -> Masa {
    Masa::from_index(rashi_index)
}

/// Purnimanta month index: equal to Amanta in Shukla paksha, one ahead in
/// Krishna paksha.
pub const fn purnimanta_index(amanta_index: u8, paksha: Paksha) -> u8 {
    match paksha {
        Paksha::Shukla => amanta_index % 12,
        Paksha::Krishna => (amanta_index + 1) % 12,
    }
}
