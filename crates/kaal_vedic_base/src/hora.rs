//! Hora division: twelve day slots and twelve night slots.
//!
//! Daytime (sunrise to sunset) and nighttime (sunset to next sunrise) are
//! each cut into twelve equal slots. The first day slot is ruled by the
//! weekday lord and rulers advance through [`HORA_CYCLE`]. The first night
//! slot is ruled by the graha four places ahead of the day-start ruler.
//!
//! [`HORA_CYCLE`]: crate::graha::HORA_CYCLE

use kaal_time::JulianDay;

use crate::error::VedicError;
use crate::graha::Graha;
use crate::vaar::Vaar;

/// Slots per day arc and per night arc.
pub const HORAS_PER_ARC: usize = 12;

/// Positions between the day-start ruler and the night-start ruler.
pub const NIGHT_RULER_OFFSET: u8 = 4;

/// Day or night arc.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum HoraKind {
    Day,
    Night,
}

/// One hora slot.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct HoraSlot {
    pub kind: HoraKind,
    /// 0-based position in the 24-slot schedule.
    pub index: u8,
    pub ruler: Graha,
    pub start: JulianDay,
    pub end: JulianDay,
}

impl HoraSlot {
    /// Slot length in days.
    pub fn duration_days(&self) -> f64 {
        self.end.days_since(self.start)
    }
}

/// Split `[start, end]` into 12 contiguous boundaries (13 instants).
fn arc_boundaries(start: JulianDay, end: JulianDay) -> [JulianDay; HORAS_PER_ARC + 1] {
    let width = end.days_since(start) / HORAS_PER_ARC as f64;
    let mut bounds = [start; HORAS_PER_ARC + 1];
    for (i, b) in bounds.iter_mut().enumerate().skip(1) {
        *b = start.add_days(width * i as f64);
    }
    bounds[HORAS_PER_ARC] = end;
    bounds
}

/// Build the 24-slot hora schedule for one Vedic day.
///
/// Slots are contiguous: each slot's end is the next slot's start, the
/// twelfth day slot ends exactly at `sunset` and the last night slot ends
/// exactly at `next_sunrise`.
pub fn divide_horas(
    sunrise: JulianDay,
    sunset: JulianDay,
    next_sunrise: JulianDay,
    vaar: Vaar,
) -> Result<Vec<HoraSlot>, VedicError> {
    if !(sunrise.0.is_finite() && sunset.0.is_finite() && next_sunrise.0.is_finite()) {
        return Err(VedicError::InvalidInput("hora bounds must be finite"));
    }
    if sunset <= sunrise {
        return Err(VedicError::InvalidInput("sunset must follow sunrise"));
    }
    if next_sunrise <= sunset {
        return Err(VedicError::InvalidInput("next sunrise must follow sunset"));
    }

    let day_lord = vaar.lord();
    let night_lord = day_lord.hora_ahead(NIGHT_RULER_OFFSET);
    let day = arc_boundaries(sunrise, sunset);
    let night = arc_boundaries(sunset, next_sunrise);

    let mut slots = Vec::with_capacity(2 * HORAS_PER_ARC);
    for i in 0..HORAS_PER_ARC {
        slots.push(HoraSlot {
            kind: HoraKind::Day,
            index: i as u8,
            ruler: day_lord.hora_ahead(i as u8),
            start: day[i],
            end: day[i + 1],
        });
    }
    for i in 0..HORAS_PER_ARC {
        slots.push(HoraSlot {
            kind: HoraKind::Night,
            index: (HORAS_PER_ARC + i) as u8,
            ruler: night_lord.hora_ahead(i as u8),
            start: night[i],
            end: night[i + 1],
        });
    }
    Ok(slots)
}

/// The slot containing `jd`, if any. The final slot includes its end.
pub fn hora_at(slots: &[HoraSlot], jd: JulianDay) -> Option<&HoraSlot> {
    let last = slots.len().checked_sub(1)?;
    slots.iter().enumerate().find_map(|(i, s)| {
        let inside = s.start <= jd && (jd < s.end || (i == last && jd <= s.end));
        inside.then_some(s)
    })
}
