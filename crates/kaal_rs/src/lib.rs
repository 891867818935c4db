//! Almanac facade for the kaal panchang engine.
//!
//! Wraps the searches of `kaal_search` behind one [`Almanac`] value that
//! carries the sidereal frame and scan tuning, validates every input before
//! computing, and defaults to the built-in analytic ephemeris.
//!
//! # Quick start
//!
//! ```rust,ignore
//! use kaal_rs::*;
//!
//! let almanac = Almanac::analytic(&AlmanacConfig::default())?;
//! let delhi = GeoLocation::at_sea_level(28.6139, 77.2090);
//! let at = JulianDay::from_ymd_hms(2024, 3, 25, 6, 0, 0.0)?;
//!
//! let record = almanac.get_panchang(at, &delhi)?;
//! println!("{} {}", record.tithi.tithi.name(), record.lunar_month.amanta.name());
//!
//! for event in almanac.get_festivals(2024, &delhi)? {
//!     println!("{} {}", event.date, event.name);
//! }
//! ```

pub mod almanac;
pub mod config;
pub mod error;

// Primary re-exports; `use kaal_rs::*` covers a typical caller.
pub use almanac::{Almanac, MAX_YEAR, MIN_YEAR};
pub use config::{AlmanacConfig, FrameToml, ScanToml, SearchToml};
pub use error::AlmanacError;

pub use kaal_ephem::AnalyticEphemeris;
pub use kaal_search::{
    CalendarEpoch, EclipseBody, EclipseEvent, EclipseKind, EphemerisContext, EphemerisProvider,
    FestivalEvent, LocatorConfig, LunarMonth, NewYearAnchor, PanchangRecord, ProviderError,
    RiseSet, SankrantiEvent, ScanConfig, SearchError, TithiDate, TithiInfo, YogaNature,
    YogaWindow,
};
pub use kaal_time::JulianDay;
pub use kaal_vedic_base::{
    AyanamshaSystem, GeoLocation, Graha, HoraKind, HoraSlot, Karana, Masa, Nakshatra, Paksha,
    Rashi, Samvatsara, Tithi, Vaar, Yoga,
};
