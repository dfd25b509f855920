//! Sievert surface.

use std::f64::consts::{FRAC_PI_2, PI};

use sievert_core::{Result, SvError, Tolerance};
use sievert_math::{normalize_or, normalize_range, Point2, Point3, Vector3, DVec3};
use serde::{Deserialize, Serialize};

use super::Surface;

/// Distance kept from `v = 0` and `v = PI`, where `ln(tan(v/2))` diverges.
pub const V_RANGE_OFFSET: f64 = 0.1;

/// Parameter step used by the finite-difference normal.
const NORMAL_STEP: f64 = 1e-5;

/// The Sievert surface for shape constant `C`, parameterized by
/// `u` in `[-PI/2, PI/2]` and `v` in `[0.1, PI - 0.1]`.
///
/// ```text
/// phi = -u / sqrt(C+1) + atan(tan(u) * sqrt(C+1))
/// a   = 2 / (C+1 - C * sin(v)^2 * cos(u))
/// r   = a * sqrt((C+1) * (1 + C * sin(u)^2)) * sin(v) / sqrt(C)
/// P   = (r cos(phi) - 2, r sin(phi), (ln(tan(v/2)) + a (C+1) cos(v)) / sqrt(C))
/// ```
///
/// `u = +-PI/2` is evaluated as-is: `tan` returns a huge finite value there in
/// `f64`, `atan` brings it back to `+-PI/2`, and the point stays finite.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SievertSurface {
    c: f64,
    sqrt_c: f64,
    sqrt_c1: f64,
}

impl SievertSurface {
    /// Build the surface for shape constant `c`, which must be finite and positive.
    pub fn new(c: f64) -> Result<Self> {
        if !c.is_finite() || c <= 0.0 {
            return Err(SvError::invalid(format!(
                "shape constant C must be finite and > 0, got {c}"
            )));
        }
        Ok(Self {
            c,
            sqrt_c: c.sqrt(),
            sqrt_c1: (c + 1.0).sqrt(),
        })
    }

    pub fn c(&self) -> f64 {
        self.c
    }

    fn phi(&self, u: f64) -> f64 {
        -u / self.sqrt_c1 + (u.tan() * self.sqrt_c1).atan()
    }

    fn a(&self, u: f64, v: f64) -> f64 {
        let sin_v = v.sin();
        2.0 / (self.c + 1.0 - self.c * sin_v * sin_v * u.cos())
    }
}

impl Surface for SievertSurface {
    fn point_at(&self, u: f64, v: f64) -> Point3 {
        let c = self.c;
        let phi = self.phi(u);
        let a = self.a(u, v);
        let sin_u = u.sin();
        let r = a * ((c + 1.0) * (1.0 + c * sin_u * sin_u)).sqrt() * v.sin() / self.sqrt_c;

        let x = r * phi.cos() - 2.0;
        let y = r * phi.sin();
        let z = ((v / 2.0).tan().ln() + a * (c + 1.0) * v.cos()) / self.sqrt_c;
        DVec3::new(x, y, z)
    }

    /// Central-difference normal `dP/du x dP/dv`, one-sided at the domain edges.
    ///
    /// Oriented like the face normals of the grid triangulation.
    fn normal_at(&self, u: f64, v: f64) -> Vector3 {
        let (u_min, u_max) = self.domain_u();
        let (v_min, v_max) = self.domain_v();
        let (u0, u1) = ((u - NORMAL_STEP).max(u_min), (u + NORMAL_STEP).min(u_max));
        let (v0, v1) = ((v - NORMAL_STEP).max(v_min), (v + NORMAL_STEP).min(v_max));

        let du = self.point_at(u1, v) - self.point_at(u0, v);
        let dv = self.point_at(u, v1) - self.point_at(u, v0);
        normalize_or(du.cross(dv), Vector3::Y, Tolerance::default()).0
    }

    /// `u` is normalized over `[-PI/2, PI/2]`, `v` over the full `[0, PI]`,
    /// so the offset band near the poles is not stretched into the texture.
    fn uv_at(&self, u: f64, v: f64) -> Point2 {
        Point2::new(
            normalize_range(u, -FRAC_PI_2, FRAC_PI_2),
            normalize_range(v, 0.0, PI),
        )
    }

    fn domain_u(&self) -> (f64, f64) {
        (-FRAC_PI_2, FRAC_PI_2)
    }

    fn domain_v(&self) -> (f64, f64) {
        (V_RANGE_OFFSET, PI - V_RANGE_OFFSET)
    }
}
