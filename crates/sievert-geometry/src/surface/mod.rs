//! Surface traits and implementations.

mod sievert;

use sievert_math::{normalize_range, Point2, Point3, Vector3};

pub use sievert::{SievertSurface, V_RANGE_OFFSET};

/// Trait for parametric surfaces in 3D space.
pub trait Surface: Send + Sync {
    /// Evaluate the surface at parameters `(u, v)`.
    fn point_at(&self, u: f64, v: f64) -> Point3;

    /// Evaluate the surface normal at parameters `(u, v)`.
    fn normal_at(&self, u: f64, v: f64) -> Vector3;

    /// Texture coordinate for parameters `(u, v)`.
    ///
    /// Defaults to the parameters normalized over the sampling domain.
    fn uv_at(&self, u: f64, v: f64) -> Point2 {
        let (u_min, u_max) = self.domain_u();
        let (v_min, v_max) = self.domain_v();
        Point2::new(
            normalize_range(u, u_min, u_max),
            normalize_range(v, v_min, v_max),
        )
    }

    /// Return the u-parameter domain `(u_min, u_max)`.
    fn domain_u(&self) -> (f64, f64);

    /// Return the v-parameter domain `(v_min, v_max)`.
    fn domain_v(&self) -> (f64, f64);
}
