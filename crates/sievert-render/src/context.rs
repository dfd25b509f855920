//! The one place that owns the current mesh, its GPU copy, and the view state.

use sievert_core::Result;
use sievert_geometry::SurfaceParams;
use sievert_mesh::{MeshBuilder, MeshOptions, SurfaceMesh};

use crate::backend::{GpuMesh, RenderBackend};
use crate::camera::Camera;
use crate::pipeline::{prepare_mesh, FrameUniforms, Material, RenderMode};

struct CurrentMesh {
    surface: SurfaceMesh,
    gpu: GpuMesh,
}

/// Render state passed explicitly to every rebuild and draw.
///
/// Holds at most one published mesh. A rebuild only replaces it once the new
/// mesh is built and uploaded; if either step fails the previous mesh stays
/// visible.
pub struct RenderContext<B: RenderBackend> {
    backend: B,
    builder: MeshBuilder,
    mode: RenderMode,
    pub camera: Camera,
    pub material: Material,
    current: Option<CurrentMesh>,
}

impl<B: RenderBackend> RenderContext<B> {
    pub fn new(backend: B, options: MeshOptions) -> Self {
        Self {
            backend,
            builder: MeshBuilder::new(options),
            mode: RenderMode::default(),
            camera: Camera::default(),
            material: Material::default(),
            current: None,
        }
    }

    pub fn with_mode(mut self, mode: RenderMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    pub fn mode(&self) -> RenderMode {
        self.mode
    }

    /// The published mesh, if any.
    pub fn current_mesh(&self) -> Option<&SurfaceMesh> {
        self.current.as_ref().map(|c| &c.surface)
    }

    pub fn current_gpu_mesh(&self) -> Option<&GpuMesh> {
        self.current.as_ref().map(|c| &c.gpu)
    }

    /// Regenerate the whole mesh for `params` and publish it.
    pub fn rebuild(&mut self, params: &SurfaceParams) -> Result<()> {
        let result = self
            .builder
            .build(params)
            .and_then(|surface| self.publish(surface));
        if let Err(err) = &result {
            log::warn!("rebuild for C={} not published: {err}", params.c);
        }
        result
    }

    /// Rebuild with a new shape constant, keeping the current resolution.
    pub fn set_shape(&mut self, c: f64) -> Result<()> {
        let params = self
            .current_mesh()
            .map(|m| *m.params())
            .unwrap_or_default()
            .with_c(c);
        self.rebuild(&params)
    }

    /// Switch between shaded and wireframe drawing, re-uploading the current
    /// mesh without regenerating it.
    pub fn set_mode(&mut self, mode: RenderMode) -> Result<()> {
        if mode == self.mode {
            return Ok(());
        }
        self.mode = mode;
        let Some(current) = self.current.take() else {
            return Ok(());
        };
        let render_mesh = prepare_mesh(&current.surface, mode);
        match GpuMesh::upload(&mut self.backend, &render_mesh) {
            Ok(gpu) => {
                current.gpu.release(&mut self.backend);
                self.current = Some(CurrentMesh {
                    surface: current.surface,
                    gpu,
                });
                Ok(())
            }
            Err(err) => {
                self.current = Some(current);
                Err(err)
            }
        }
    }

    /// Frame the published mesh with the camera.
    pub fn fit_camera(&mut self) {
        if let Some(current) = &self.current {
            self.camera.fit_to_aabb(&current.surface.bounds());
        }
    }

    /// Draw the published mesh once. Returns `false` when there is nothing to draw.
    pub fn draw_frame(&mut self) -> Result<bool> {
        let Some(current) = &self.current else {
            return Ok(false);
        };
        let uniforms = FrameUniforms::new(&self.camera, &self.material);
        self.backend.draw(current.gpu.handle, &uniforms)?;
        Ok(true)
    }

    /// Release GPU resources and hand the backend back.
    pub fn shutdown(mut self) -> B {
        if let Some(current) = self.current.take() {
            current.gpu.release(&mut self.backend);
        }
        self.backend
    }

    fn publish(&mut self, surface: SurfaceMesh) -> Result<()> {
        let render_mesh = prepare_mesh(&surface, self.mode);
        let gpu = GpuMesh::upload(&mut self.backend, &render_mesh)?;

        let params = surface.params();
        log::info!(
            "published C={} {}x{} mesh ({} triangles)",
            params.c,
            params.u_steps,
            params.v_steps,
            surface.triangle_count()
        );
        if let Some(previous) = self.current.replace(CurrentMesh { surface, gpu }) {
            previous.gpu.release(&mut self.backend);
        }
        Ok(())
    }
}
