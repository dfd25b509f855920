//! The seam between mesh data and whatever graphics API draws it.

use std::collections::HashMap;

use sievert_core::{Result, SvError};

use crate::pipeline::{FrameUniforms, Primitive, RenderMesh, VertexAttribute};

/// Opaque id of a mesh living on the backend side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MeshHandle(u64);

impl MeshHandle {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn value(self) -> u64 {
        self.0
    }
}

/// Upload arrays, bind them, draw an indexed primitive list.
///
/// Errors from a backend (lost context, failed shader compile or link) are
/// reported as [`SvError::Backend`] and end the rendering session.
pub trait RenderBackend {
    /// Copy every attribute stream and the index buffer to the GPU.
    fn upload(&mut self, mesh: &RenderMesh) -> Result<MeshHandle>;

    /// Free the GPU copies behind `handle`. Unknown handles are ignored.
    fn release(&mut self, handle: MeshHandle);

    /// Issue one indexed draw of `handle` with the given uniforms.
    fn draw(&mut self, handle: MeshHandle, uniforms: &FrameUniforms) -> Result<()>;
}

/// A mesh uploaded to a backend, with what is needed to draw it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GpuMesh {
    pub handle: MeshHandle,
    pub vertex_count: usize,
    pub index_count: usize,
    pub primitive: Primitive,
}

impl GpuMesh {
    pub fn upload<B: RenderBackend + ?Sized>(backend: &mut B, mesh: &RenderMesh) -> Result<Self> {
        let handle = backend.upload(mesh)?;
        Ok(Self {
            handle,
            vertex_count: mesh.vertex_count(),
            index_count: mesh.index_count(),
            primitive: mesh.primitive,
        })
    }

    pub fn release<B: RenderBackend + ?Sized>(self, backend: &mut B) {
        backend.release(self.handle);
    }
}

/// Buffers held by [`RecordingBackend`] for one handle.
#[derive(Debug, Clone, PartialEq)]
pub struct UploadedMesh {
    pub attributes: Vec<(VertexAttribute, Vec<u8>)>,
    pub index_bytes: Vec<u8>,
    pub index_count: usize,
    pub primitive: Primitive,
}

impl UploadedMesh {
    pub fn attribute(&self, attribute: VertexAttribute) -> Option<&[u8]> {
        self.attributes
            .iter()
            .find(|(a, _)| *a == attribute)
            .map(|(_, bytes)| bytes.as_slice())
    }
}

/// One recorded draw.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawCall {
    pub handle: MeshHandle,
    pub primitive: Primitive,
    pub index_count: usize,
    pub uniforms: FrameUniforms,
}

/// In-memory backend: keeps byte copies of uploads and a log of draws.
///
/// Used headless and in tests; `fail_uploads` / `fail_draws` simulate a
/// backend that has lost its context.
#[derive(Debug, Default)]
pub struct RecordingBackend {
    next_id: u64,
    meshes: HashMap<MeshHandle, UploadedMesh>,
    pub draws: Vec<DrawCall>,
    pub fail_uploads: bool,
    pub fail_draws: bool,
}

impl RecordingBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mesh(&self, handle: MeshHandle) -> Option<&UploadedMesh> {
        self.meshes.get(&handle)
    }

    /// Number of meshes currently held.
    pub fn live_meshes(&self) -> usize {
        self.meshes.len()
    }

    /// Total bytes currently held across all meshes.
    pub fn resident_bytes(&self) -> usize {
        self.meshes
            .values()
            .map(|m| m.index_bytes.len() + m.attributes.iter().map(|(_, b)| b.len()).sum::<usize>())
            .sum()
    }
}

impl RenderBackend for RecordingBackend {
    fn upload(&mut self, mesh: &RenderMesh) -> Result<MeshHandle> {
        if self.fail_uploads {
            return Err(SvError::Backend("upload rejected: context lost".into()));
        }

        let attributes = mesh
            .attributes()
            .into_iter()
            .filter_map(|a| mesh.attribute_bytes(a).map(|bytes| (a, bytes.to_vec())))
            .collect();

        self.next_id += 1;
        let handle = MeshHandle::new(self.next_id);
        self.meshes.insert(
            handle,
            UploadedMesh {
                attributes,
                index_bytes: mesh.index_bytes().to_vec(),
                index_count: mesh.index_count(),
                primitive: mesh.primitive,
            },
        );
        log::info!(
            "uploaded mesh {}: {} vertices, {} indices",
            handle.value(),
            mesh.vertex_count(),
            mesh.index_count()
        );
        Ok(handle)
    }

    fn release(&mut self, handle: MeshHandle) {
        if self.meshes.remove(&handle).is_some() {
            log::debug!("released mesh {}", handle.value());
        }
    }

    fn draw(&mut self, handle: MeshHandle, uniforms: &FrameUniforms) -> Result<()> {
        if self.fail_draws {
            return Err(SvError::Backend("draw rejected: context lost".into()));
        }
        if let Some((name, _)) = uniforms
            .named()
            .into_iter()
            .find(|(_, values)| values.iter().any(|v| !v.is_finite()))
        {
            return Err(SvError::Backend(format!("uniform `{name}` is not finite")));
        }
        let mesh = self
            .meshes
            .get(&handle)
            .ok_or_else(|| SvError::Backend(format!("draw of unknown mesh {}", handle.value())))?;
        self.draws.push(DrawCall {
            handle,
            primitive: mesh.primitive,
            index_count: mesh.index_count,
            uniforms: *uniforms,
        });
        Ok(())
    }
}
