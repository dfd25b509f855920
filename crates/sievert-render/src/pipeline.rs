use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};
use sievert_math::{DMat4, Point2, Vector3};
use sievert_mesh::{grid_wireframe, SurfaceMesh};

use crate::camera::Camera;
use crate::shader::{attributes, uniforms};

/// Per-vertex attribute streams, each uploaded as its own tightly packed
/// `f32` buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VertexAttribute {
    Position,
    Normal,
    Tangent,
    Uv,
}

impl VertexAttribute {
    /// Name of the matching shader input.
    pub fn name(self) -> &'static str {
        match self {
            VertexAttribute::Position => attributes::POSITION,
            VertexAttribute::Normal => attributes::NORMAL,
            VertexAttribute::Tangent => attributes::TANGENT,
            VertexAttribute::Uv => attributes::UV,
        }
    }

    /// Number of `f32` components per vertex.
    pub fn components(self) -> usize {
        match self {
            VertexAttribute::Uv => 2,
            _ => 3,
        }
    }

    /// Byte stride of one vertex in this stream.
    pub fn stride(self) -> usize {
        self.components() * std::mem::size_of::<f32>()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Primitive {
    Triangles,
    Lines,
}

/// How the surface is drawn.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderMode {
    /// Lit triangles.
    #[default]
    Shaded,
    /// The sample grid as lines.
    Wireframe,
}

/// Surface data converted to `f32` attribute streams plus an index buffer.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderMesh {
    pub positions: Vec<f32>,
    pub normals: Vec<f32>,
    pub tangents: Option<Vec<f32>>,
    pub uvs: Option<Vec<f32>>,
    pub indices: Vec<u32>,
    pub primitive: Primitive,
}

impl RenderMesh {
    pub fn vertex_count(&self) -> usize {
        self.positions.len() / 3
    }

    pub fn index_count(&self) -> usize {
        self.indices.len()
    }

    /// Attribute streams present in this mesh, in binding order.
    pub fn attributes(&self) -> Vec<VertexAttribute> {
        let mut attrs = vec![VertexAttribute::Position, VertexAttribute::Normal];
        if self.tangents.is_some() {
            attrs.push(VertexAttribute::Tangent);
        }
        if self.uvs.is_some() {
            attrs.push(VertexAttribute::Uv);
        }
        attrs
    }

    pub fn attribute_data(&self, attribute: VertexAttribute) -> Option<&[f32]> {
        match attribute {
            VertexAttribute::Position => Some(&self.positions),
            VertexAttribute::Normal => Some(&self.normals),
            VertexAttribute::Tangent => self.tangents.as_deref(),
            VertexAttribute::Uv => self.uvs.as_deref(),
        }
    }

    /// Raw bytes of one attribute stream, ready for upload.
    pub fn attribute_bytes(&self, attribute: VertexAttribute) -> Option<&[u8]> {
        self.attribute_data(attribute).map(bytemuck::cast_slice)
    }

    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }
}

/// Convert a surface mesh to GPU-ready streams.
///
/// `Wireframe` keeps the vertex streams and swaps the triangle list for the
/// grid's line list.
pub fn prepare_mesh(mesh: &SurfaceMesh, mode: RenderMode) -> RenderMesh {
    let (indices, primitive) = match mode {
        RenderMode::Shaded => (mesh.indices().to_vec(), Primitive::Triangles),
        RenderMode::Wireframe => {
            let params = mesh.params();
            (grid_wireframe(params.u_steps, params.v_steps), Primitive::Lines)
        }
    };

    RenderMesh {
        positions: flatten3(mesh.positions()),
        normals: flatten3(mesh.normals()),
        tangents: mesh.tangents().map(flatten3),
        uvs: mesh.uvs().map(flatten2),
        indices,
        primitive,
    }
}

fn flatten3(v: &[Vector3]) -> Vec<f32> {
    v.iter().flat_map(|p| p.as_vec3().to_array()).collect()
}

fn flatten2(v: &[Point2]) -> Vec<f32> {
    v.iter().flat_map(|p| p.as_vec2().to_array()).collect()
}

/// Surface color and light placement.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Material {
    pub color: [f32; 3],
    /// Point light position in view space.
    pub light_location: [f32; 3],
}

impl Default for Material {
    fn default() -> Self {
        Self {
            color: [1.0, 1.0, 0.0],
            light_location: [-2.0, 2.0, 0.0],
        }
    }
}

/// Uniform block written once per frame.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct FrameUniforms {
    pub projection: [[f32; 4]; 4],
    pub model_view: [[f32; 4]; 4],
    pub normal_matrix: [[f32; 4]; 4],
    pub color: [f32; 4],
    pub light_location: [f32; 4],
}

impl FrameUniforms {
    pub fn new(camera: &Camera, material: &Material) -> Self {
        let [r, g, b] = material.color;
        let [x, y, z] = material.light_location;
        Self {
            projection: to_f32(camera.projection_matrix()),
            model_view: to_f32(camera.view_matrix()),
            normal_matrix: to_f32(camera.normal_matrix()),
            color: [r, g, b, 1.0],
            light_location: [x, y, z, 1.0],
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::bytes_of(self)
    }

    /// Each uniform with the shader name it binds to, in block order.
    pub fn named(&self) -> [(&'static str, &[f32]); 5] {
        [
            (uniforms::PROJECTION, bytemuck::cast_slice(self.projection.as_slice())),
            (uniforms::MODEL_VIEW, bytemuck::cast_slice(self.model_view.as_slice())),
            (uniforms::NORMAL_MATRIX, bytemuck::cast_slice(self.normal_matrix.as_slice())),
            (uniforms::COLOR, self.color.as_slice()),
            (uniforms::LIGHT_LOCATION, self.light_location.as_slice()),
        ]
    }
}

/// Column-major `f32` copy of a matrix.
fn to_f32(mat: DMat4) -> [[f32; 4]; 4] {
    mat.as_mat4().to_cols_array_2d()
}
