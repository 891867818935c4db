//! Vaar (weekday) and its ruling graha.

use kaal_time::JulianDay;

use crate::graha::Graha;

/// Weekday, Sunday first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Vaar {
    Ravivaar,
    Somvaar,
    Mangalvaar,
    Budhvaar,
    Guruvaar,
    Shukravaar,
    Shanivaar,
}

pub const ALL_VAARS: [Vaar; 7] = [
    Vaar::Ravivaar,
    Vaar::Somvaar,
    Vaar::Mangalvaar,
    Vaar::Budhvaar,
    Vaar::Guruvaar,
    Vaar::Shukravaar,
    Vaar::Shanivaar,
];

impl Vaar {
    /// 0 = Sunday .. 6 = Saturday.
    pub const fn index(self) -> u8 {
        self as u8
    }

    pub const fn from_index(index: u8) -> Self {
        ALL_VAARS[(index % 7) as usize]
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Ravivaar => "Ravivaar",
            Self::Somvaar => "Somvaar",
            Self::Mangalvaar => "Mangalvaar",
            Self::Budhvaar => "Budhvaar",
            Self::Guruvaar => "Guruvaar",
            Self::Shukravaar => "Shukravaar",
            Self::Shanivaar => "Shanivaar",
        }
    }

    pub const fn english_name(self) -> &'static str {
        match self {
            Self::Ravivaar => "Sunday",
            Self::Somvaar => "Monday",
            Self::Mangalvaar => "Tuesday",
            Self::Budhvaar => "Wednesday",
            Self::Guruvaar => "Thursday",
            Self::Shukravaar => "Friday",
            Self::Shanivaar => "Saturday",
        }
    }

    /// Planetary lord of the weekday.
    pub const fn lord(self) -> Graha {
        match self {
            Self::Ravivaar => Graha::Surya,
            Self::Somvaar => Graha::Chandra,
            Self::Mangalvaar => Graha::Mangal,
            Self::Budhvaar => Graha::Buddh,
            Self::Guruvaar => Graha::Guru,
            Self::Shukravaar => Graha::Shukra,
            Self::Shanivaar => Graha::Shani,
        }
    }
}

/// Weekday of the local civil day containing `jd`.
///
/// Local mean time (`longitude_deg / 15` hours from UT) decides the date, so
/// a sunrise at 20:00 UT east of the date line still counts for the next
/// civil day.
pub fn vaar_at(jd: JulianDay, longitude_deg: f64) -> Vaar {
    let local = jd.add_days(longitude_deg / 360.0);
    Vaar::from_index(local.weekday_index())
}
