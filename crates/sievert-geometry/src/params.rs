//! Surface shape and grid resolution, as supplied by the caller.

use serde::{Deserialize, Serialize};
use sievert_core::traits::Validate;
use sievert_core::{Result, SvError};

/// Inputs of one mesh generation: the shape constant `C` and the grid resolution.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SurfaceParams {
    /// Shape constant of the Sievert surface, must be > 0.
    pub c: f64,
    /// Number of cells along `u`, must be >= 1.
    pub u_steps: u32,
    /// Number of cells along `v`, must be >= 1.
    pub v_steps: u32,
}

impl SurfaceParams {
    pub const DEFAULT_STEPS: u32 = 250;

    pub fn new(c: f64, u_steps: u32, v_steps: u32) -> Self {
        Self {
            c,
            u_steps,
            v_steps,
        }
    }

    /// Same resolution, different shape constant.
    pub fn with_c(self, c: f64) -> Self {
        Self { c, ..self }
    }

    /// `(u_steps + 1) * (v_steps + 1)`
    pub fn vertex_count(&self) -> usize {
        (self.u_steps as usize + 1) * (self.v_steps as usize + 1)
    }

    /// `2 * u_steps * v_steps`
    pub fn triangle_count(&self) -> usize {
        2 * self.u_steps as usize * self.v_steps as usize
    }

    pub fn index_count(&self) -> usize {
        3 * self.triangle_count()
    }
}

impl Default for SurfaceParams {
    fn default() -> Self {
        Self::new(1.0, Self::DEFAULT_STEPS, Self::DEFAULT_STEPS)
    }
}

impl Validate for SurfaceParams {
    fn validate(&self) -> Result<()> {
        if !self.c.is_finite() || self.c <= 0.0 {
            return Err(SvError::invalid(format!(
                "shape constant C must be finite and > 0, got {}",
                self.c
            )));
        }
        if self.u_steps < 1 || self.v_steps < 1 {
            return Err(SvError::invalid(format!(
                "grid resolution must be at least 1x1, got {}x{}",
                self.u_steps, self.v_steps
            )));
        }
        let addressable = (self.u_steps as u64 + 1)
            .checked_mul(self.v_steps as u64 + 1)
            .is_some_and(|vertices| vertices <= u32::MAX as u64);
        if !addressable {
            return Err(SvError::invalid(format!(
                "{}x{} grid has more vertices than u32 indices can address",
                self.u_steps, self.v_steps
            )));
        }
        Ok(())
    }
}
