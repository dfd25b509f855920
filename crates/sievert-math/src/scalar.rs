//! Scalar helpers shared by the surface sampler and the UV mapping.

/// Linear interpolation between `a` and `b`.
#[inline]
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// Map `value` from `[min, max]` onto `[0, 1]`.
///
/// Values outside the range map outside `[0, 1]`; nothing is clamped.
#[inline]
pub fn normalize_range(value: f64, min: f64, max: f64) -> f64 {
    (value - min) / (max - min)
}
