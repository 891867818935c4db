//! Pure panchang classification for kaal.
//!
//! Everything here is a function of angles or instants already in hand:
//! Tithi, Karana, Yoga, Nakshatra, Rashi, Masa, Vaar, Samvatsara, era
//! numbering, ayanamsha, and the hora division of a Vedic day. No
//! ephemeris access happens in this crate.

pub mod ayanamsha;
pub mod era;
pub mod error;
pub mod graha;
pub mod hora;
pub mod karana;
pub mod location;
pub mod masa;
pub mod nakshatra;
pub mod rashi;
pub mod samvatsara;
pub mod tithi;
pub mod util;
pub mod vaar;
pub mod yoga;

pub use ayanamsha::{AyanamshaSystem, ayanamsha_deg, general_precession_longitude_deg};
pub use era::{
    EraYears, SAKA_OFFSET, VIKRAM_SAMVAT_OFFSET, era_for_anchor_year, saka_year, vikram_samvat,
};
pub use error::VedicError;
pub use graha::{Graha, HORA_CYCLE, SAPTA_GRAHAS};
pub use hora::{HORAS_PER_ARC, HoraKind, HoraSlot, NIGHT_RULER_OFFSET, divide_horas, hora_at};
pub use karana::{
    KARANA_COUNT, KARANA_SEGMENT_DEG, Karana, KaranaPosition, karana_for_index,
    karana_from_elongation,
};
pub use location::GeoLocation;
pub use masa::{ALL_MASAS, Masa, masa_from_rashi_index, purnimanta_index};
pub use nakshatra::{
    ALL_NAKSHATRAS_27, NAKSHATRA_COUNT, NAKSHATRA_SPAN_27, Nakshatra, NakshatraPosition,
    nakshatra_from_longitude,
};
pub use rashi::{
    ALL_RASHIS, RASHI_SPAN_DEG, Rashi, RashiPosition, rashi_from_longitude, solar_day_of_month,
};
pub use samvatsara::{ALL_SAMVATSARAS, Samvatsara, samvatsara_for_saka_year};
pub use tithi::{
    ALL_TITHIS, Paksha, TITHI_COUNT, TITHI_SEGMENT_DEG, Tithi, TithiPosition,
    tithi_from_elongation,
};
pub use util::{normalize_360, normalize_to_pm180, shortest_arc_deg};
pub use vaar::{ALL_VAARS, Vaar, vaar_at};
pub use yoga::{ALL_YOGAS, YOGA_COUNT, YOGA_SEGMENT_DEG, Yoga, YogaPosition, yoga_from_sum};
