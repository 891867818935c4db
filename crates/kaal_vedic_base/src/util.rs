//! Angle helpers shared by every classifier.

/// Normalize an angle to [0, 360) degrees.
pub fn normalize_360(deg: f64) -> f64 {
    let r = deg % 360.0;
    let r = if r < 0.0 { r + 360.0 } else { r };
    // -1e-17 % 360 + 360 rounds to exactly 360.0
    if r >= 360.0 { 0.0 } else { r }
}

/// Normalize an angle to (-180, +180].
pub fn normalize_to_pm180(deg: f64) -> f64 {
    let mut d = deg % 360.0;
    if d > 180.0 {
        d -= 360.0;
    } else if d <= -180.0 {
        d += 360.0;
    }
    d
}

/// Signed shortest arc from `from` to `to`, in (-180, +180].
///
/// Use this instead of raw subtraction whenever two longitudes may sit on
/// opposite sides of the 0°/360° seam.
pub fn shortest_arc_deg(from: f64, to: f64) -> f64 {
    normalize_to_pm180(to - from)
}

/// Cell index of `deg` in a partition of [0, 360) into `count` cells.
pub(crate) fn cell_index(deg: f64, width: f64, count: u8) -> u8 {
    let idx = (normalize_360(deg) / width).floor() as u8;
    idx.min(count - 1)
}
