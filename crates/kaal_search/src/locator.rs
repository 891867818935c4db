//! Boundary locator: the instant at which an angular quantity reaches a
//! target degree.
//!
//! The target is turned into a zero of `f(t) = normalize(q(t) - target)`,
//! with `normalize` into (-180, 180]. A coarse scan brackets a sign change,
//! rejecting the ±180 wrap jump, and bisection refines it.

use kaal_time::JulianDay;
use kaal_vedic_base::normalize_to_pm180;

use crate::error::SearchError;
use crate::provider::{Direction, ElementKind, EphemerisContext, EphemerisProvider};
use crate::quantity::AngularQuantity;

/// Outcome of a crossing search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Crossing {
    /// The quantity reaches the target at this instant.
    Found(JulianDay),
    /// The bounded window holds no crossing: the event does not occur there.
    Skipped,
    /// The open-ended search ran out of steps or failed to converge.
    SearchExhausted,
}

impl Crossing {
    pub fn found(self) -> Option<JulianDay> {
        match self {
            Self::Found(jd) => Some(jd),
            _ => None,
        }
    }

    /// The instant, or `NoConvergence(what)` for any other outcome.
    pub fn require(self, what: &'static str) -> Result<JulianDay, SearchError> {
        self.found().ok_or(SearchError::NoConvergence(what))
    }
}

/// Bisection tolerances shared by all crossing searches.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocatorConfig {
    /// Maximum bisection iterations.
    pub max_iterations: u32,
    /// Stop once the bracket is narrower than this many days.
    pub convergence_days: f64,
}

impl Default for LocatorConfig {
    fn default() -> Self {
        Self {
            max_iterations: 50,
            convergence_days: 1e-8,
        }
    }
}

impl LocatorConfig {
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.max_iterations == 0 {
            return Err("max_iterations must be > 0");
        }
        if !self.convergence_days.is_finite() || self.convergence_days <= 0.0 {
            return Err("convergence_days must be positive");
        }
        Ok(())
    }
}

/// A sign change that is a real crossing and not the ±180 wrap jump.
fn is_genuine_crossing(f_a: f64, f_b: f64) -> bool {
    f_a * f_b < 0.0 && (f_a - f_b).abs() < 270.0
}

fn bisect<F>(
    f: &F,
    mut t_a: f64,
    mut f_a: f64,
    mut t_b: f64,
    config: &LocatorConfig,
) -> Result<Crossing, SearchError>
where
    F: Fn(JulianDay) -> Result<f64, SearchError>,
{
    for _ in 0..config.max_iterations {
        let t_mid = 0.5 * (t_a + t_b);
        let f_mid = f(JulianDay(t_mid))?;
        if f_a * f_mid <= 0.0 {
            t_b = t_mid;
        } else {
            t_a = t_mid;
            f_a = f_mid;
        }
        if (t_b - t_a).abs() < config.convergence_days {
            return Ok(Crossing::Found(JulianDay(0.5 * (t_a + t_b))));
        }
    }
    Ok(Crossing::SearchExhausted)
}

/// Scan from `from` in `direction` for up to `max_steps` steps of
/// `step_days`, then bisect the first bracketed crossing of `target_deg`.
///
/// Returns `Ok(None)` when no crossing was bracketed.
fn scan_and_bisect<F>(
    f: &F,
    from: JulianDay,
    target_deg: f64,
    step: f64,
    max_steps: usize,
    config: &LocatorConfig,
) -> Result<Option<Crossing>, SearchError>
where
    F: Fn(JulianDay) -> Result<f64, SearchError>,
{
    let wrapped = |t: JulianDay| -> Result<f64, SearchError> {
        Ok(normalize_to_pm180(f(t)? - target_deg))
    };

    let mut t_prev = from.0;
    let mut f_prev = wrapped(from)?;
    if f_prev == 0.0 {
        return Ok(Some(Crossing::Found(from)));
    }

    for _ in 0..max_steps {
        let t_curr = t_prev + step;
        let f_curr = wrapped(JulianDay(t_curr))?;
        if f_curr == 0.0 {
            return Ok(Some(Crossing::Found(JulianDay(t_curr))));
        }
        if is_genuine_crossing(f_prev, f_curr) {
            let (t_a, f_a, t_b) = if t_prev < t_curr {
                (t_prev, f_prev, t_curr)
            } else {
                (t_curr, f_curr, t_prev)
            };
            return bisect(&wrapped, t_a, f_a, t_b, config).map(Some);
        }
        t_prev = t_curr;
        f_prev = f_curr;
    }
    Ok(None)
}

/// Open-ended search for the nearest crossing of `target_deg` from `from`.
///
/// Scans at most `max_span_days`; running out is [`Crossing::SearchExhausted`].
pub fn find_angle_crossing<F>(
    f: F,
    from: JulianDay,
    target_deg: f64,
    direction: Direction,
    step_days: f64,
    max_span_days: f64,
    config: &LocatorConfig,
) -> Result<Crossing, SearchError>
where
    F: Fn(JulianDay) -> Result<f64, SearchError>,
{
    config.validate().map_err(SearchError::InvalidConfig)?;
    if !step_days.is_finite() || step_days <= 0.0 {
        return Err(SearchError::InvalidConfig("step_days must be positive"));
    }
    let max_steps = (max_span_days / step_days).ceil().max(1.0) as usize;
    let step = direction.signed(step_days);
    Ok(scan_and_bisect(&f, from, target_deg, step, max_steps, config)?
        .unwrap_or(Crossing::SearchExhausted))
}

/// Bounded search for a crossing of `target_deg` inside `[start, end]`.
///
/// A window without a crossing is [`Crossing::Skipped`].
pub fn find_crossing_in_window<F>(
    f: F,
    start: JulianDay,
    end: JulianDay,
    target_deg: f64,
    step_days: f64,
    config: &LocatorConfig,
) -> Result<Crossing, SearchError>
where
    F: Fn(JulianDay) -> Result<f64, SearchError>,
{
    config.validate().map_err(SearchError::InvalidConfig)?;
    if !step_days.is_finite() || step_days <= 0.0 {
        return Err(SearchError::InvalidConfig("step_days must be positive"));
    }
    let span = end.days_since(start);
    if span <= 0.0 {
        return Ok(Crossing::Skipped);
    }
    let max_steps = (span / step_days).ceil() as usize;
    // Shrink the last step so the scan never leaves the window.
    let step = span / max_steps.max(1) as f64;
    match scan_and_bisect(&f, start, target_deg, step, max_steps, config)? {
        Some(Crossing::Found(jd)) if jd <= end => Ok(Crossing::Found(jd)),
        Some(Crossing::Found(_)) | None => Ok(Crossing::Skipped),
        Some(other) => Ok(other),
    }
}

/// Nearest instant at which `quantity` reaches `target_deg`.
pub fn locate_angle<P: EphemerisProvider + ?Sized>(
    provider: &P,
    ctx: &EphemerisContext,
    quantity: AngularQuantity,
    target_deg: f64,
    from: JulianDay,
    direction: Direction,
    max_span_days: f64,
    config: &LocatorConfig,
) -> Result<Crossing, SearchError> {
    find_angle_crossing(
        |t| quantity.evaluate(provider, ctx, t),
        from,
        target_deg,
        direction,
        quantity.step_days(),
        max_span_days,
        config,
    )
}

/// Nearest instant at which `kind`'s governing quantity enters cell
/// `cell_index`, searching from `from` in `direction`.
pub fn locate_crossing<P: EphemerisProvider + ?Sized>(
    provider: &P,
    ctx: &EphemerisContext,
    kind: ElementKind,
    cell_index: u8,
    from: JulianDay,
    direction: Direction,
    config: &LocatorConfig,
) -> Result<Crossing, SearchError> {
    locate_angle(
        provider,
        ctx,
        kind.quantity(),
        kind.cell_start_deg(cell_index),
        from,
        direction,
        ELEMENT_SPAN_DAYS,
        config,
    )
}

/// No tithi, nakshatra, yoga or karana cell lasts longer than ~1.3 days.
const ELEMENT_SPAN_DAYS: f64 = 5.0;

/// Start and end of the `kind` cell containing `at`.
///
/// Provider-supplied boundaries take precedence; missing ones are located.
/// The returned start never exceeds `at`.
pub fn element_bounds<P: EphemerisProvider + ?Sized>(
    provider: &P,
    ctx: &EphemerisContext,
    kind: ElementKind,
    cell_index: u8,
    at: JulianDay,
    config: &LocatorConfig,
) -> Result<(JulianDay, JulianDay), SearchError> {
    let start = match provider.adjacent_element(ctx, kind, at, Direction::Backward)? {
        Some(jd) => jd,
        None => locate_crossing(provider, ctx, kind, cell_index, at, Direction::Backward, config)?
            .require(start_label(kind))?,
    };
    let end = match provider.adjacent_element(ctx, kind, at, Direction::Forward)? {
        Some(jd) => jd,
        None => locate_crossing(
            provider,
            ctx,
            kind,
            cell_index.wrapping_add(1) % kind.cell_count(),
            at,
            Direction::Forward,
            config,
        )?
        .require(end_label(kind))?,
    };
    let start = if start > at { at } else { start };
    Ok((start, end))
}

fn start_label(kind: ElementKind) -> &'static str {
    match kind {
        ElementKind::Tithi => "could not find tithi start",
        ElementKind::Nakshatra => "could not find nakshatra start",
        ElementKind::Yoga => "could not find yoga start",
        ElementKind::Karana => "could not find karana start",
    }
}

fn end_label(kind: ElementKind) -> &'static str {
    match kind {
        ElementKind::Tithi => "could not find tithi end",
        ElementKind::Nakshatra => "could not find nakshatra end",
        ElementKind::Yoga => "could not find yoga end",
        ElementKind::Karana => "could not find karana end",
    }
}
