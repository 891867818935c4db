//! The seven classical grahas that rule weekdays and horas.

/// Classical planets, in weekday order starting from Sunday's lord.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Graha {
    Surya,
    Chandra,
    Mangal,
    Buddh,
    Guru,
    Shukra,
    Shani,
}

pub const SAPTA_GRAHAS: [Graha; 7] = [
    Graha::Surya,
    Graha::Chandra,
    Graha::Mangal,
    Graha::Buddh,
    Graha::Guru,
    Graha::Shukra,
    Graha::Shani,
];

/// Hora ruler cycle: Sun, Venus, Mercury, Moon, Saturn, Jupiter, Mars.
pub const HORA_CYCLE: [Graha; 7] = [
    Graha::Surya,
    Graha::Shukra,
    Graha::Buddh,
    Graha::Chandra,
    Graha::Shani,
    Graha::Guru,
    Graha::Mangal,
];

impl Graha {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Surya => "Surya",
            Self::Chandra => "Chandra",
            Self::Mangal => "Mangal",
            Self::Buddh => "Buddh",
            Self::Guru => "Guru",
            Self::Shukra => "Shukra",
            Self::Shani => "Shani",
        }
    }

    pub const fn english_name(self) -> &'static str {
        match self {
            Self::Surya => "Sun",
            Self::Chandra => "Moon",
            Self::Mangal => "Mars",
            Self::Buddh => "Mercury",
            Self::Guru => "Jupiter",
            Self::Shukra => "Venus",
            Self::Shani => "Saturn",
        }
    }

    /// Position in [`HORA_CYCLE`].
    pub const fn hora_position(self) -> u8 {
        match self {
            Self::Surya => 0,
            Self::Shukra => 1,
            Self::Buddh => 2,
            Self::Chandra => 3,
            Self::Shani => 4,
            Self::Guru => 5,
            Self::Mangal => 6,
        }
    }

    /// The graha `steps` positions ahead in the hora cycle.
    pub const fn hora_ahead(self, steps: u8) -> Graha {
        HORA_CYCLE[((self.hora_position() as usize) + steps as usize) % 7]
    }
}
