//! Shared numeric helpers for pattern generation.

/// Linearly rescale `x` from `[in_min, in_max]` to `[out_min, out_max]`.
///
/// `in_min == in_max` divides by zero. Callers here always pass the literal
/// noise range `-1.0..1.0`, so this is only checked in debug builds.
#[inline]
pub fn map_range(x: f64, in_min: f64, in_max: f64, out_min: f64, out_max: f64) -> f64 {
    debug_assert!(in_min != in_max, "map_range called with an empty input range");
    (x - in_min) * (out_max - out_min) / (in_max - in_min) + out_min
}
