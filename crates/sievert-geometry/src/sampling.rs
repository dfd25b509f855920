//! Uniform sampling of a parametric surface on a regular `(u, v)` grid.

use rayon::prelude::*;
use sievert_core::{Result, SvError};
use sievert_math::{lerp, Point2, Point3};

use crate::surface::Surface;

/// Resolution and options for [`sample_grid`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridSpec {
    pub u_steps: u32,
    pub v_steps: u32,
    /// Also produce texture coordinates.
    pub with_uvs: bool,
    /// Pull both `u` endpoints inward by this many radians. `0.0` samples the
    /// domain edges exactly.
    pub pole_inset: f64,
}

impl GridSpec {
    pub fn new(u_steps: u32, v_steps: u32) -> Self {
        Self {
            u_steps,
            v_steps,
            with_uvs: true,
            pole_inset: 0.0,
        }
    }

    pub fn row_len(&self) -> usize {
        self.v_steps as usize + 1
    }

    pub fn point_count(&self) -> usize {
        (self.u_steps as usize + 1) * self.row_len()
    }
}

/// Positions (and optionally UVs) of a sampled grid, flattened row-major:
/// sample `(i, j)` lives at `i * (v_steps + 1) + j`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GridSamples {
    pub u_steps: u32,
    pub v_steps: u32,
    pub positions: Vec<Point3>,
    pub uvs: Vec<Point2>,
}

impl GridSamples {
    pub fn index(&self, i: u32, j: u32) -> usize {
        i as usize * (self.v_steps as usize + 1) + j as usize
    }

    /// Number of samples with a non-finite coordinate.
    pub fn non_finite_count(&self) -> usize {
        self.positions.iter().filter(|p| !p.is_finite()).count()
    }
}

/// Evaluate `surface` at every point of a `(u_steps+1) x (v_steps+1)` grid.
///
/// Row `i` uses `u = lerp(u_min, u_max, i / u_steps)`, column `j` uses
/// `v = lerp(v_min, v_max, j / v_steps)`. Rows are evaluated in parallel and
/// concatenated in order, so the output does not depend on scheduling.
pub fn sample_grid(surface: &dyn Surface, grid: GridSpec) -> Result<GridSamples> {
    if grid.u_steps < 1 || grid.v_steps < 1 {
        return Err(SvError::invalid(format!(
            "grid resolution must be at least 1x1, got {}x{}",
            grid.u_steps, grid.v_steps
        )));
    }

    let (mut u_min, mut u_max) = surface.domain_u();
    let (v_min, v_max) = surface.domain_v();
    if !(grid.pole_inset >= 0.0 && 2.0 * grid.pole_inset < u_max - u_min) {
        return Err(SvError::invalid(format!(
            "pole inset {} must be >= 0 and smaller than half the u domain",
            grid.pole_inset
        )));
    }
    u_min += grid.pole_inset;
    u_max -= grid.pole_inset;

    let rows: Vec<(Vec<Point3>, Vec<Point2>)> = (0..=grid.u_steps)
        .into_par_iter()
        .map(|i| {
            let u = lerp(u_min, u_max, i as f64 / grid.u_steps as f64);
            let mut positions = Vec::with_capacity(grid.row_len());
            let mut uvs = Vec::with_capacity(if grid.with_uvs { grid.row_len() } else { 0 });
            for j in 0..=grid.v_steps {
                let v = lerp(v_min, v_max, j as f64 / grid.v_steps as f64);
                positions.push(surface.point_at(u, v));
                if grid.with_uvs {
                    uvs.push(surface.uv_at(u, v));
                }
            }
            (positions, uvs)
        })
        .collect();

    let mut samples = GridSamples {
        u_steps: grid.u_steps,
        v_steps: grid.v_steps,
        positions: Vec::with_capacity(grid.point_count()),
        uvs: Vec::with_capacity(if grid.with_uvs { grid.point_count() } else { 0 }),
    };
    for (positions, uvs) in rows {
        samples.positions.extend(positions);
        samples.uvs.extend(uvs);
    }

    let bad = samples.non_finite_count();
    if bad > 0 {
        log::warn!(
            "{bad} of {} surface samples are not finite",
            samples.positions.len()
        );
    }

    Ok(samples)
}
