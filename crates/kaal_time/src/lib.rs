//! Time foundation for kaal: Julian Day (UT) instants, Gregorian calendar
//! conversion, ΔT, sidereal time, and lazy day sequences.

pub mod day_sequence;
pub mod delta_t;
pub mod error;
pub mod julian;
pub mod sidereal;

pub use day_sequence::{DaySequence, DayStep};
pub use delta_t::delta_t_seconds;
pub use error::TimeError;
pub use julian::{
    DAYS_PER_CENTURY, J2000_JD, JulianDay, SECONDS_PER_DAY, UNIX_EPOCH_JD, calendar_to_jd,
    jd_to_calendar,
};
pub use sidereal::{
    SIDEREAL_RATE_RAD_PER_DAY, approximate_local_noon, earth_rotation_angle_rad, gmst_rad,
    local_sidereal_time_rad,
};
