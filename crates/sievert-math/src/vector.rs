use sievert_core::Tolerance;

use crate::Vector3;

/// Normalize `v`, or return `fallback` when `v` is zero-length or non-finite.
///
/// The flag tells the caller whether the fallback was taken.
pub fn normalize_or(v: Vector3, fallback: Vector3, tol: Tolerance) -> (Vector3, bool) {
    let len = v.length();
    if tol.is_zero_length(len) || !len.is_finite() {
        (fallback, true)
    } else {
        (v / len, false)
    }
}
