//! Face and vertex normals/tangents for indexed triangle meshes.
//!
//! Face vectors are normalized before they are summed, so every adjacent face
//! contributes equally to a vertex regardless of its area. Collapsed faces and
//! singular UV mappings fall back to fixed vectors instead of producing NaN.

use serde::{Deserialize, Serialize};
use sievert_core::Tolerance;
use sievert_math::{normalize_or, Point2, Point3, Vector3};

/// Normal used when a face or vertex normal cannot be computed.
pub const FALLBACK_NORMAL: Vector3 = Vector3::Y;

/// Tangent used when a face or vertex tangent cannot be computed.
pub const FALLBACK_TANGENT: Vector3 = Vector3::X;

/// How many times each fallback was taken while accumulating.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DegenerateStats {
    /// Faces whose edge cross product had zero length.
    pub degenerate_faces: usize,
    /// Faces whose UV edges were linearly dependent (or whose solved tangent vanished).
    pub singular_uv_faces: usize,
    /// Vertices whose summed normal had zero length.
    pub zero_vertex_normals: usize,
    /// Vertices whose summed tangent had zero length.
    pub zero_vertex_tangents: usize,
    /// Vertices whose tangent was parallel to the normal and had to be replaced.
    pub parallel_tangents: usize,
}

impl DegenerateStats {
    pub fn total(&self) -> usize {
        self.degenerate_faces
            + self.singular_uv_faces
            + self.zero_vertex_normals
            + self.zero_vertex_tangents
            + self.parallel_tangents
    }

    pub fn is_clean(&self) -> bool {
        self.total() == 0
    }

    pub fn merge(&mut self, other: &DegenerateStats) {
        self.degenerate_faces += other.degenerate_faces;
        self.singular_uv_faces += other.singular_uv_faces;
        self.zero_vertex_normals += other.zero_vertex_normals;
        self.zero_vertex_tangents += other.zero_vertex_tangents;
        self.parallel_tangents += other.parallel_tangents;
    }
}

/// Face/vertex normal and tangent computation with a fixed tolerance.
#[derive(Debug, Clone, Copy, Default)]
pub struct NormalAccumulator {
    tolerance: Tolerance,
}

impl NormalAccumulator {
    pub fn new(tolerance: Tolerance) -> Self {
        Self { tolerance }
    }

    /// Unit normal of triangle `(p1, p2, p3)`: `(p2 - p1) x (p3 - p1)`.
    ///
    /// The flag is `true` when the triangle is collapsed and
    /// [`FALLBACK_NORMAL`] was returned.
    pub fn face_normal(&self, p1: Point3, p2: Point3, p3: Point3) -> (Vector3, bool) {
        normalize_or((p2 - p1).cross(p3 - p1), FALLBACK_NORMAL, self.tolerance)
    }

    /// Unit tangent (direction of increasing U) of a triangle with UVs.
    ///
    /// Solves `E1 = du1 T + dv1 B`, `E2 = du2 T + dv2 B` for `T`. The flag is
    /// `true` when the UV determinant is singular or `T` vanishes, in which
    /// case [`FALLBACK_TANGENT`] was returned.
    pub fn face_tangent(&self, p: [Point3; 3], uv: [Point2; 3]) -> (Vector3, bool) {
        let edge1 = p[1] - p[0];
        let edge2 = p[2] - p[0];
        let duv1 = uv[1] - uv[0];
        let duv2 = uv[2] - uv[0];

        let det = duv1.x * duv2.y - duv2.x * duv1.y;
        if self.tolerance.is_singular(det) {
            return (FALLBACK_TANGENT, true);
        }
        let tangent = (edge1 * duv2.y - edge2 * duv1.y) / det;
        normalize_or(tangent, FALLBACK_TANGENT, self.tolerance)
    }

    /// Smooth per-vertex normals: the normalized sum of the unit normals of all
    /// faces referencing each vertex.
    ///
    /// # Panics
    /// Panics if `indices.len()` is not a multiple of 3 or an index is out of
    /// range for `positions`.
    pub fn vertex_normals(
        &self,
        positions: &[Point3],
        indices: &[u32],
    ) -> (Vec<Vector3>, DegenerateStats) {
        assert!(indices.len() % 3 == 0, "Index count must be a multiple of 3");

        let mut stats = DegenerateStats::default();
        let mut sums = vec![Vector3::ZERO; positions.len()];

        for tri in indices.chunks_exact(3) {
            let (i0, i1, i2) = (tri[0] as usize, tri[1] as usize, tri[2] as usize);
            let (normal, degenerate) =
                self.face_normal(positions[i0], positions[i1], positions[i2]);
            if degenerate {
                stats.degenerate_faces += 1;
            }
            sums[i0] += normal;
            sums[i1] += normal;
            sums[i2] += normal;
        }

        let normals: Vec<Vector3> = sums
            .into_iter()
            .map(|sum| {
                let (n, fallback) = normalize_or(sum, FALLBACK_NORMAL, self.tolerance);
                if fallback {
                    stats.zero_vertex_normals += 1;
                }
                n
            })
            .collect();

        (normals, stats)
    }

    /// Per-vertex tangents: the normalized sum of adjacent face tangents,
    /// Gram-Schmidt orthogonalized against `normals`.
    ///
    /// If the orthogonalized tangent vanishes (tangent parallel to the normal)
    /// it is replaced by a unit vector perpendicular to the normal.
    ///
    /// # Panics
    /// Panics if `uvs` or `normals` are shorter than `positions`, if
    /// `indices.len()` is not a multiple of 3, or if an index is out of range.
    pub fn vertex_tangents(
        &self,
        positions: &[Point3],
        uvs: &[Point2],
        indices: &[u32],
        normals: &[Vector3],
    ) -> (Vec<Vector3>, DegenerateStats) {
        assert!(indices.len() % 3 == 0, "Index count must be a multiple of 3");
        assert!(
            uvs.len() >= positions.len() && normals.len() >= positions.len(),
            "Every vertex needs a UV and a normal"
        );

        let mut stats = DegenerateStats::default();
        let mut sums = vec![Vector3::ZERO; positions.len()];

        for tri in indices.chunks_exact(3) {
            let (i0, i1, i2) = (tri[0] as usize, tri[1] as usize, tri[2] as usize);
            let (tangent, singular) = self.face_tangent(
                [positions[i0], positions[i1], positions[i2]],
                [uvs[i0], uvs[i1], uvs[i2]],
            );
            if singular {
                stats.singular_uv_faces += 1;
            }
            sums[i0] += tangent;
            sums[i1] += tangent;
            sums[i2] += tangent;
        }

        let tangents: Vec<Vector3> = sums
            .into_iter()
            .zip(normals)
            .map(|(sum, &normal)| {
                let (t, fallback) = normalize_or(sum, FALLBACK_TANGENT, self.tolerance);
                if fallback {
                    stats.zero_vertex_tangents += 1;
                }
                let (t, parallel) =
                    normalize_or(t - normal * normal.dot(t), Vector3::ZERO, self.tolerance);
                if parallel {
                    stats.parallel_tangents += 1;
                    perpendicular_to(normal)
                } else {
                    t
                }
            })
            .collect();

        (tangents, stats)
    }
}

/// Unit normal of triangle `(p1, p2, p3)` with the default tolerance.
pub fn face_normal(p1: Point3, p2: Point3, p3: Point3) -> Vector3 {
    NormalAccumulator::default().face_normal(p1, p2, p3).0
}

/// Unit face tangent with the default tolerance.
pub fn face_tangent(p: [Point3; 3], uv: [Point2; 3]) -> Vector3 {
    NormalAccumulator::default().face_tangent(p, uv).0
}

/// Any unit vector perpendicular to the unit vector `n`.
fn perpendicular_to(n: Vector3) -> Vector3 {
    let axis = if n.x.abs() < 0.9 { Vector3::X } else { Vector3::Y };
    (axis - n * n.dot(axis)).normalize()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use sievert_math::{DVec2, DVec3};

    fn quad() -> (Vec<Point3>, Vec<Point2>, Vec<u32>) {
        // 0 - 1      uv: (0,0) (1,0)
        // |   |          (0,1) (1,1)
        // 2 - 3
        let positions = vec![
            DVec3::new(0.0, 0.0, 0.0),
            DVec3::new(1.0, 0.0, 0.0),
            DVec3::new(0.0, 1.0, 0.0),
            DVec3::new(1.0, 1.0, 0.0),
        ];
        let uvs = vec![
            DVec2::new(0.0, 0.0),
            DVec2::new(1.0, 0.0),
            DVec2::new(0.0, 1.0),
            DVec2::new(1.0, 1.0),
        ];
        (positions, uvs, vec![0, 1, 2, 1, 3, 2])
    }

    #[test]
    fn test_face_normal_ccw() {
        let n = face_normal(DVec3::ZERO, DVec3::X, DVec3::Y);
        assert_eq!(n, DVec3::Z);
    }

    #[test]
    fn test_face_normal_collinear_falls_back() {
        let acc = NormalAccumulator::default();
        let (n, degenerate) = acc.face_normal(
            DVec3::new(0.0, 0.0, 0.0),
            DVec3::new(1.0, 1.0, 1.0),
            DVec3::new(2.0, 2.0, 2.0),
        );
        assert!(degenerate);
        assert_eq!(n, DVec3::new(0.0, 1.0, 0.0));
        assert!(!n.is_nan());
    }

    #[test]
    fn test_face_normal_coincident_points() {
        let p = DVec3::new(3.0, -1.0, 2.0);
        assert_eq!(face_normal(p, p, p), FALLBACK_NORMAL);
    }

    #[test]
    fn test_face_tangent_follows_u() {
        let t = face_tangent(
            [DVec3::ZERO, DVec3::new(2.0, 0.0, 0.0), DVec3::new(0.0, 0.0, 3.0)],
            [DVec2::new(0.0, 0.0), DVec2::new(1.0, 0.0), DVec2::new(0.0, 1.0)],
        );
        assert!((t - DVec3::X).length() < 1e-12);

        // Flip U: tangent points the other way
        let t = face_tangent(
            [DVec3::ZERO, DVec3::new(2.0, 0.0, 0.0), DVec3::new(0.0, 0.0, 3.0)],
            [DVec2::new(1.0, 0.0), DVec2::new(0.0, 0.0), DVec2::new(1.0, 1.0)],
        );
        assert!((t + DVec3::X).length() < 1e-12);
    }

    #[test]
    fn test_face_tangent_singular_uv_falls_back() {
        let acc = NormalAccumulator::default();
        let (t, singular) = acc.face_tangent(
            [DVec3::ZERO, DVec3::X, DVec3::Y],
            [DVec2::new(0.5, 0.5); 3],
        );
        assert!(singular);
        assert_eq!(t, DVec3::new(1.0, 0.0, 0.0));
    }

    #[test]
    fn test_vertex_normals_flat_quad() {
        let (positions, _, indices) = quad();
        let (normals, stats) = NormalAccumulator::default().vertex_normals(&positions, &indices);
        assert_eq!(normals.len(), 4);
        assert!(stats.is_clean());
        for n in &normals {
            assert!((*n - DVec3::Z).length() < 1e-12, "got {n:?}");
        }
    }

    #[test]
    fn test_vertex_normals_average_folded_faces() {
        // Two faces folded 90 degrees along the shared edge 0-1
        let positions = vec![
            DVec3::new(0.0, 0.0, 0.0),
            DVec3::new(1.0, 0.0, 0.0),
            DVec3::new(0.0, 1.0, 0.0),
            DVec3::new(0.0, 0.0, 1.0),
        ];
        let indices = vec![0, 1, 2, 0, 3, 1];
        let (normals, _) = NormalAccumulator::default().vertex_normals(&positions, &indices);
        let expected = DVec3::new(0.0, 1.0, 1.0).normalize();
        assert!((normals[0] - expected).length() < 1e-12, "got {:?}", normals[0]);
        assert_abs_diff_eq!(normals[2].z, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_unreferenced_vertex_gets_fallback() {
        let mut positions = quad().0;
        positions.push(DVec3::new(5.0, 5.0, 5.0));
        let (normals, stats) =
            NormalAccumulator::default().vertex_normals(&positions, &quad().2);
        assert_eq!(normals[4], FALLBACK_NORMAL);
        assert_eq!(stats.zero_vertex_normals, 1);
    }

    #[test]
    fn test_vertex_tangents_orthonormal() {
        let (positions, uvs, indices) = quad();
        let acc = NormalAccumulator::default();
        let (normals, _) = acc.vertex_normals(&positions, &indices);
        let (tangents, stats) = acc.vertex_tangents(&positions, &uvs, &indices, &normals);
        assert!(stats.is_clean());
        for (t, n) in tangents.iter().zip(&normals) {
            assert_abs_diff_eq!(t.length(), 1.0, epsilon = 1e-12);
            assert!(t.dot(*n).abs() < 1e-12);
            assert!((*t - DVec3::X).length() < 1e-12);
        }
    }

    #[test]
    fn test_tangent_parallel_to_normal_is_replaced() {
        let (positions, uvs, indices) = quad();
        let acc = NormalAccumulator::default();
        // Pretend the normal lies along +X, the same direction as the tangent
        let normals = vec![DVec3::X; 4];
        let (tangents, stats) = acc.vertex_tangents(&positions, &uvs, &indices, &normals);
        assert_eq!(stats.parallel_tangents, 4);
        for t in &tangents {
            assert_abs_diff_eq!(t.length(), 1.0, epsilon = 1e-12);
            assert!(t.dot(DVec3::X).abs() < 1e-12);
        }
    }

    #[test]
    fn test_stats_merge() {
        let mut a = DegenerateStats {
            degenerate_faces: 1,
            ..Default::default()
        };
        a.merge(&DegenerateStats {
            singular_uv_faces: 2,
            parallel_tangents: 1,
            ..Default::default()
        });
        assert_eq!(a.total(), 4);
        assert!(!a.is_clean());
    }
}
