//! Float policies shared by picking, snapping and tests.

use core::cmp::Ordering;

/// Canonicalize a floating-point value for deterministic ordering.
///
/// Rules:
/// - `-0.0` becomes `0.0`
/// - all NaNs become a single canonical NaN
pub fn canonical_f64(v: f64) -> f64 {
    if v == 0.0 {
        0.0
    } else if v.is_nan() {
        f64::NAN
    } else {
        v
    }
}

/// Deterministic total ordering for floats.
pub fn stable_total_cmp_f64(a: f64, b: f64) -> Ordering {
    canonical_f64(a).total_cmp(&canonical_f64(b))
}

/// Rounds to the nearest integer with halves going towards +infinity, like
/// JavaScript's `Math.round`.
pub fn round_half_up(v: f64) -> f64 {
    canonical_f64((v + 0.5).floor())
}

/// Rounds `v` to the nearest multiple of `unit`.
pub fn snap_to_multiple(v: f64, unit: f64) -> f64 {
    if unit <= 0.0 || !unit.is_finite() {
        return v;
    }
    canonical_f64(round_half_up(v / unit) * unit)
}

/// Absolute-tolerance comparison.
pub fn approx_eq(a: f64, b: f64, eps: f64) -> bool {
    (a - b).abs() <= eps
}
