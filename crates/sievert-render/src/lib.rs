pub mod backend;
pub mod camera;
pub mod context;
pub mod export;
pub mod pipeline;
pub mod shader;

// Re-export main types
pub use backend::{DrawCall, GpuMesh, MeshHandle, RecordingBackend, RenderBackend};
pub use camera::Camera;
pub use context::RenderContext;
pub use pipeline::{prepare_mesh, FrameUniforms, Material, Primitive, RenderMesh, RenderMode, VertexAttribute};
pub use shader::TextureSlot;
