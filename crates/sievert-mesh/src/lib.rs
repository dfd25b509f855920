pub mod builder;
pub mod grid;
pub mod normals;
pub mod triangle_mesh;

pub use builder::{build_surface_mesh, MeshBuilder, MeshOptions, SurfaceMesh};
pub use grid::{grid_wireframe, triangulate_grid};
pub use normals::{face_normal, face_tangent, DegenerateStats, NormalAccumulator};
pub use triangle_mesh::TriangleMesh;
