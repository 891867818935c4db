//! New moon (Amavasya) and full moon (Purnima) instants.

use kaal_time::JulianDay;

use crate::error::SearchError;
use crate::locator::{Crossing, LocatorConfig, locate_angle};
use crate::provider::{Direction, EphemerisContext, EphemerisProvider};
use crate::quantity::AngularQuantity;

/// One synodic month plus slack.
const PHASE_SPAN_DAYS: f64 = 35.0;

/// New or full moon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum LunarPhase {
    NewMoon,
    FullMoon,
}

impl LunarPhase {
    /// Elongation at which the phase occurs.
    pub const fn elongation_deg(self) -> f64 {
        match self {
            Self::NewMoon => 0.0,
            Self::FullMoon => 180.0,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::NewMoon => "Amavasya",
            Self::FullMoon => "Purnima",
        }
    }
}

/// A located lunar phase.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct LunarPhaseEvent {
    pub phase: LunarPhase,
    pub moment: JulianDay,
}

fn find_phase<P: EphemerisProvider + ?Sized>(
    provider: &P,
    ctx: &EphemerisContext,
    phase: LunarPhase,
    from: JulianDay,
    direction: Direction,
    config: &LocatorConfig,
) -> Result<Crossing, SearchError> {
    locate_angle(
        provider,
        ctx,
        AngularQuantity::Elongation,
        phase.elongation_deg(),
        from,
        direction,
        PHASE_SPAN_DAYS,
        config,
    )
}

fn require_phase(
    crossing: Crossing,
    phase: LunarPhase,
    what: &'static str,
) -> Result<LunarPhaseEvent, SearchError> {
    Ok(LunarPhaseEvent {
        phase,
        moment: crossing.require(what)?,
    })
}

/// First new moon at or after `from`.
pub fn next_new_moon<P: EphemerisProvider + ?Sized>(
    provider: &P,
    ctx: &EphemerisContext,
    from: JulianDay,
    config: &LocatorConfig,
) -> Result<LunarPhaseEvent, SearchError> {
    let phase = LunarPhase::NewMoon;
    let c = find_phase(provider, ctx, phase, from, Direction::Forward, config)?;
    require_phase(c, phase, "could not find next new moon")
}

/// Last new moon at or before `from`.
pub fn prev_new_moon<P: EphemerisProvider + ?Sized>(
    provider: &P,
    ctx: &EphemerisContext,
    from: JulianDay,
    config: &LocatorConfig,
) -> Result<LunarPhaseEvent, SearchError> {
    let phase = LunarPhase::NewMoon;
    let c = find_phase(provider, ctx, phase, from, Direction::Backward, config)?;
    require_phase(c, phase, "could not find previous new moon")
}

/// First full moon at or after `from`.
pub fn next_full_moon<P: EphemerisProvider + ?Sized>(
    provider: &P,
    ctx: &EphemerisContext,
    from: JulianDay,
    config: &LocatorConfig,
) -> Result<LunarPhaseEvent, SearchError> {
    let phase = LunarPhase::FullMoon;
    let c = find_phase(provider, ctx, phase, from, Direction::Forward, config)?;
    require_phase(c, phase, "could not find next full moon")
}

/// Last full moon at or before `from`.
pub fn prev_full_moon<P: EphemerisProvider + ?Sized>(
    provider: &P,
    ctx: &EphemerisContext,
    from: JulianDay,
    config: &LocatorConfig,
) -> Result<LunarPhaseEvent, SearchError> {
    let phase = LunarPhase::FullMoon;
    let c = find_phase(provider, ctx, phase, from, Direction::Backward, config)?;
    require_phase(c, phase, "could not find previous full moon")
}
