use sievert_core::traits::Validate;
use sievert_core::{Result, SvError};
use sievert_math::aabb::Aabb3;
use sievert_math::{Point2, Point3, Vector3};

/// Indexed triangle mesh with per-vertex attribute arrays.
///
/// `normals`, `tangents` and `uvs` are either empty or one entry per position.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TriangleMesh {
    pub positions: Vec<Point3>,
    pub normals: Vec<Vector3>,
    pub tangents: Vec<Vector3>,
    pub uvs: Vec<Point2>,
    pub indices: Vec<u32>,
}

impl TriangleMesh {
    /// Number of vertices in the mesh.
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Number of triangles in the mesh.
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn has_tangents(&self) -> bool {
        !self.tangents.is_empty()
    }

    pub fn has_uvs(&self) -> bool {
        !self.uvs.is_empty()
    }

    /// Compute the axis-aligned bounding box of all finite positions.
    pub fn bounding_box(&self) -> Aabb3 {
        Aabb3::from_points(&self.positions).unwrap_or(Aabb3::new(Point3::ZERO, Point3::ZERO))
    }
}

impl Validate for TriangleMesh {
    fn validate(&self) -> Result<()> {
        let n = self.positions.len();
        for (name, len) in [
            ("normals", self.normals.len()),
            ("tangents", self.tangents.len()),
            ("uvs", self.uvs.len()),
        ] {
            if len != 0 && len != n {
                return Err(SvError::invalid(format!(
                    "{name} has {len} entries for {n} vertices"
                )));
            }
        }
        if self.indices.len() % 3 != 0 {
            return Err(SvError::invalid(format!(
                "index count {} is not a multiple of 3",
                self.indices.len()
            )));
        }
        if let Some(&bad) = self.indices.iter().find(|&&i| i as usize >= n) {
            return Err(SvError::invalid(format!(
                "index {bad} out of bounds for {n} vertices"
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sievert_math::DVec3;

    fn single_triangle() -> TriangleMesh {
        TriangleMesh {
            positions: vec![
                DVec3::new(0.0, 0.0, 0.0),
                DVec3::new(1.0, 0.0, 0.0),
                DVec3::new(0.0, 1.0, 0.0),
            ],
            indices: vec![0, 1, 2],
            ..Default::default()
        }
    }

    #[test]
    fn test_vertex_and_triangle_count() {
        let mesh = single_triangle();
        assert_eq!(mesh.vertex_count(), 3);
        assert_eq!(mesh.triangle_count(), 1);
        assert!(!mesh.has_tangents());
        assert!(!mesh.has_uvs());
    }

    #[test]
    fn test_validate() {
        let mut mesh = single_triangle();
        mesh.validate().unwrap();

        mesh.normals = vec![DVec3::Z; 2];
        assert!(mesh.validate().is_err());

        let mut mesh = single_triangle();
        mesh.indices = vec![0, 1, 3];
        let err = mesh.validate().unwrap_err();
        assert!(err.to_string().contains("out of bounds"));

        mesh.indices = vec![0, 1];
        assert!(mesh.validate().is_err());
    }

    #[test]
    fn test_bounding_box() {
        let mesh = single_triangle();
        let bb = mesh.bounding_box();
        assert_eq!(bb.min, DVec3::new(0.0, 0.0, 0.0));
        assert_eq!(bb.max, DVec3::new(1.0, 1.0, 0.0));
    }

    #[test]
    fn test_empty_mesh() {
        let mesh = TriangleMesh::default();
        assert_eq!(mesh.vertex_count(), 0);
        assert_eq!(mesh.triangle_count(), 0);
        mesh.validate().unwrap();
        let bb = mesh.bounding_box();
        assert_eq!(bb.min, DVec3::ZERO);
        assert_eq!(bb.max, DVec3::ZERO);
    }
}
