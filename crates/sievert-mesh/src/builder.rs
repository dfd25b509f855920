//! Assemble a complete Sievert surface mesh from shape and resolution.
//!
//! The pipeline is strictly one-way: sample the surface on the grid,
//! triangulate the grid, accumulate normals (and tangents), then freeze the
//! result into a [`SurfaceMesh`]. Nothing is reused between builds.

use std::time::Instant;

use serde::{Deserialize, Serialize};
use sievert_core::traits::Validate;
use sievert_core::{Result, Tolerance};
use sievert_geometry::{sample_grid, GridSpec, SievertSurface, SurfaceParams};
use sievert_math::{Aabb3, Point2, Point3, Vector3};

use crate::grid::triangulate_grid;
use crate::normals::{DegenerateStats, NormalAccumulator};
use crate::TriangleMesh;

/// What to produce besides positions, normals and indices.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MeshOptions {
    /// Produce per-vertex tangents for normal mapping. Implies `uvs`.
    pub tangents: bool,
    /// Produce per-vertex texture coordinates.
    pub uvs: bool,
    /// Radians to pull the `u = +-PI/2` grid rows inward; `0.0` keeps the poles.
    pub pole_inset: f64,
    pub tolerance: Tolerance,
}

impl MeshOptions {
    /// Options for the normal-mapped variant: UVs and tangents.
    pub fn textured() -> Self {
        Self {
            tangents: true,
            uvs: true,
            ..Self::default()
        }
    }

    fn wants_uvs(&self) -> bool {
        self.uvs || self.tangents
    }
}

impl Default for MeshOptions {
    fn default() -> Self {
        Self {
            tangents: false,
            uvs: true,
            pole_inset: 0.0,
            tolerance: Tolerance::default(),
        }
    }
}

/// Immutable result of one mesh build.
#[derive(Debug, Clone, PartialEq)]
pub struct SurfaceMesh {
    params: SurfaceParams,
    options: MeshOptions,
    mesh: TriangleMesh,
    stats: DegenerateStats,
}

impl SurfaceMesh {
    pub fn params(&self) -> &SurfaceParams {
        &self.params
    }

    pub fn options(&self) -> &MeshOptions {
        &self.options
    }

    pub fn mesh(&self) -> &TriangleMesh {
        &self.mesh
    }

    pub fn positions(&self) -> &[Point3] {
        &self.mesh.positions
    }

    pub fn normals(&self) -> &[Vector3] {
        &self.mesh.normals
    }

    pub fn tangents(&self) -> Option<&[Vector3]> {
        self.mesh.has_tangents().then_some(self.mesh.tangents.as_slice())
    }

    pub fn uvs(&self) -> Option<&[Point2]> {
        self.mesh.has_uvs().then_some(self.mesh.uvs.as_slice())
    }

    pub fn indices(&self) -> &[u32] {
        &self.mesh.indices
    }

    pub fn vertex_count(&self) -> usize {
        self.mesh.vertex_count()
    }

    pub fn triangle_count(&self) -> usize {
        self.mesh.triangle_count()
    }

    /// Fallbacks taken while computing normals and tangents.
    pub fn stats(&self) -> &DegenerateStats {
        &self.stats
    }

    pub fn bounds(&self) -> Aabb3 {
        self.mesh.bounding_box()
    }

}

/// Builds [`SurfaceMesh`]es with a fixed set of [`MeshOptions`].
#[derive(Debug, Clone, Copy, Default)]
pub struct MeshBuilder {
    options: MeshOptions,
}

impl MeshBuilder {
    pub fn new(options: MeshOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &MeshOptions {
        &self.options
    }

    /// Generate the full mesh for `params`.
    ///
    /// Invalid parameters are rejected before any sampling happens. The output
    /// is a pure function of `params` and the builder options.
    pub fn build(&self, params: &SurfaceParams) -> Result<SurfaceMesh> {
        params.validate()?;
        self.options.tolerance.validate()?;
        let start = Instant::now();

        let surface = SievertSurface::new(params.c)?;
        let grid = GridSpec {
            u_steps: params.u_steps,
            v_steps: params.v_steps,
            with_uvs: self.options.wants_uvs(),
            pole_inset: self.options.pole_inset,
        };
        let samples = sample_grid(&surface, grid)?;
        let indices = triangulate_grid(params.u_steps, params.v_steps);

        let accumulator = NormalAccumulator::new(self.options.tolerance);
        let (normals, mut stats) = accumulator.vertex_normals(&samples.positions, &indices);
        let tangents = if self.options.tangents {
            let (tangents, tangent_stats) =
                accumulator.vertex_tangents(&samples.positions, &samples.uvs, &indices, &normals);
            stats.merge(&tangent_stats);
            tangents
        } else {
            Vec::new()
        };

        let mesh = TriangleMesh {
            positions: samples.positions,
            normals,
            tangents,
            uvs: samples.uvs,
            indices,
        };

        log::debug!(
            "built C={} {}x{} surface: {} vertices, {} triangles in {:.2?}",
            params.c,
            params.u_steps,
            params.v_steps,
            mesh.vertex_count(),
            mesh.triangle_count(),
            start.elapsed()
        );
        if !stats.is_clean() {
            log::warn!("surface C={} used {} fallback vectors: {:?}", params.c, stats.total(), stats);
        }

        Ok(SurfaceMesh {
            params: *params,
            options: self.options,
            mesh,
            stats,
        })
    }
}

/// One-shot helper: `MeshBuilder::new(options).build(params)`.
pub fn build_surface_mesh(params: &SurfaceParams, options: MeshOptions) -> Result<SurfaceMesh> {
    MeshBuilder::new(options).build(params)
}
