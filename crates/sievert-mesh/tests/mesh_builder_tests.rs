// Integration tests for the full surface mesh pipeline

use std::f64::consts::{FRAC_PI_2, PI};

use approx::assert_abs_diff_eq;
use sievert_geometry::surface::V_RANGE_OFFSET;
use sievert_geometry::{SievertSurface, Surface, SurfaceParams};
use sievert_mesh::{build_surface_mesh, MeshBuilder, MeshOptions, NormalAccumulator};
use sievert_math::{lerp, DVec3};

const UNIT_EPSILON: f64 = 1e-9;

fn textured(c: f64, u_steps: u32, v_steps: u32) -> sievert_mesh::SurfaceMesh {
    build_surface_mesh(&SurfaceParams::new(c, u_steps, v_steps), MeshOptions::textured()).unwrap()
}

#[test]
fn integration_counts_match_resolution() {
    for &(u, v) in &[(1, 1), (2, 2), (7, 3), (16, 40)] {
        let mesh = textured(1.0, u, v);
        let expected_vertices = (u as usize + 1) * (v as usize + 1);
        assert_eq!(mesh.vertex_count(), expected_vertices);
        assert_eq!(mesh.indices().len(), 6 * u as usize * v as usize);
        assert_eq!(mesh.triangle_count(), 2 * u as usize * v as usize);
        assert_eq!(mesh.normals().len(), expected_vertices);
        assert_eq!(mesh.tangents().unwrap().len(), expected_vertices);
        assert_eq!(mesh.uvs().unwrap().len(), expected_vertices);
    }
}

#[test]
fn integration_normals_and_tangents_are_unit() {
    for &c in &[0.25, 1.0, 3.0] {
        let mesh = textured(c, 24, 24);
        let tangents = mesh.tangents().unwrap();
        for (i, (n, t)) in mesh.normals().iter().zip(tangents).enumerate() {
            assert_abs_diff_eq!(n.length(), 1.0, epsilon = UNIT_EPSILON);
            assert_abs_diff_eq!(t.length(), 1.0, epsilon = UNIT_EPSILON);
            assert!(
                n.dot(*t).abs() < 1e-9,
                "C={c} vertex {i}: tangent {t:?} not orthogonal to normal {n:?}"
            );
        }
        assert!(mesh.stats().is_clean(), "C={c}: {:?}", mesh.stats());
    }
}

#[test]
fn integration_rebuild_is_identical() {
    let params = SurfaceParams::new(1.7, 20, 13);
    let builder = MeshBuilder::new(MeshOptions::textured());
    let a = builder.build(&params).unwrap();
    let b = builder.build(&params).unwrap();
    assert_eq!(a, b);
    assert_eq!(a.positions(), b.positions());
    assert_eq!(a.indices(), b.indices());
}

#[test]
fn integration_minimal_grid() {
    let mesh = textured(1.0, 1, 1);
    assert_eq!(mesh.vertex_count(), 4);
    assert_eq!(mesh.triangle_count(), 2);
    for n in mesh.normals() {
        assert_abs_diff_eq!(n.length(), 1.0, epsilon = UNIT_EPSILON);
    }
    for t in mesh.tangents().unwrap() {
        assert_abs_diff_eq!(t.length(), 1.0, epsilon = UNIT_EPSILON);
    }
}

#[test]
fn integration_first_cell_winding_independent_of_c() {
    for &c in &[0.1, 1.0, 9.0] {
        let mesh = textured(c, 3, 5);
        // top_left = 0, top_right = 1, bottom_left = 6, bottom_right = 7
        assert_eq!(&mesh.indices()[..6], &[0, 6, 7, 0, 7, 1]);
    }
}

#[test]
fn integration_two_by_two_example() {
    let mesh = build_surface_mesh(&SurfaceParams::new(1.0, 2, 2), MeshOptions::default()).unwrap();
    assert_eq!(mesh.vertex_count(), 9);
    assert_eq!(mesh.triangle_count(), 8);
    assert_eq!(mesh.indices().len(), 24);

    let first = mesh.positions()[0];
    assert!(first.is_finite(), "first vertex {first:?}");
    let surface = SievertSurface::new(1.0).unwrap();
    assert_eq!(first, surface.point_at(-FRAC_PI_2, V_RANGE_OFFSET));
    assert!(mesh.positions().iter().all(|p| p.is_finite()));
}

#[test]
fn integration_collinear_face_falls_back() {
    let acc = NormalAccumulator::default();
    let (n, degenerate) = acc.face_normal(
        DVec3::new(-1.0, 0.0, 2.0),
        DVec3::new(0.0, 0.0, 2.0),
        DVec3::new(3.0, 0.0, 2.0),
    );
    assert!(degenerate);
    assert_eq!(n, DVec3::new(0.0, 1.0, 0.0));
}

#[test]
fn integration_normals_follow_surface_orientation() {
    let (u_steps, v_steps) = (48u32, 48u32);
    let mesh = textured(1.0, u_steps, v_steps);
    let surface = SievertSurface::new(1.0).unwrap();

    for i in u_steps / 4..=3 * u_steps / 4 {
        for j in v_steps / 4..=3 * v_steps / 4 {
            let u = lerp(-FRAC_PI_2, FRAC_PI_2, i as f64 / u_steps as f64);
            let v = lerp(V_RANGE_OFFSET, PI - V_RANGE_OFFSET, j as f64 / v_steps as f64);
            let idx = (i * (v_steps + 1) + j) as usize;

            let analytic = surface.normal_at(u, v);
            let averaged = mesh.normals()[idx];
            assert!(
                averaged.dot(analytic) > 0.95,
                "vertex ({i},{j}): averaged {averaged:?} vs analytic {analytic:?}"
            );

            let h = 1e-5;
            let along_u = (surface.point_at(u + h, v) - surface.point_at(u - h, v)).normalize();
            let tangent = mesh.tangents().unwrap()[idx];
            assert!(
                tangent.dot(along_u) > 0.9,
                "vertex ({i},{j}): tangent {tangent:?} vs dP/du {along_u:?}"
            );
        }
    }
}

#[test]
fn integration_shape_change_changes_geometry_not_topology() {
    let a = textured(0.5, 10, 10);
    let b = textured(2.0, 10, 10);
    assert_eq!(a.indices(), b.indices());
    assert_ne!(a.positions(), b.positions());
}
