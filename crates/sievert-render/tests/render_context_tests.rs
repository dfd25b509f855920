use sievert_core::SvError;
use sievert_geometry::SurfaceParams;
use sievert_mesh::MeshOptions;
use sievert_render::{
    FrameUniforms, Primitive, RecordingBackend, RenderContext, RenderMode, VertexAttribute,
};

fn textured_context() -> RenderContext<RecordingBackend> {
    RenderContext::new(RecordingBackend::new(), MeshOptions::textured())
}

#[test]
fn test_invalid_parameters_keep_previous_mesh() {
    let mut ctx = textured_context();
    ctx.rebuild(&SurfaceParams::new(1.0, 8, 8)).unwrap();
    let handle = ctx.current_gpu_mesh().unwrap().handle;

    let err = ctx.set_shape(0.0).unwrap_err();
    assert!(matches!(err, SvError::InvalidParameter(_)));
    let err = ctx.rebuild(&SurfaceParams::new(1.0, 0, 8)).unwrap_err();
    assert!(matches!(err, SvError::InvalidParameter(_)));

    assert_eq!(ctx.current_gpu_mesh().unwrap().handle, handle);
    assert_eq!(ctx.current_mesh().unwrap().params().c, 1.0);
    assert!(ctx.draw_frame().unwrap());
}

#[test]
fn test_upload_failure_keeps_previous_mesh() {
    let mut ctx = textured_context();
    ctx.rebuild(&SurfaceParams::new(1.0, 8, 8)).unwrap();

    ctx.backend_mut().fail_uploads = true;
    let err = ctx.set_shape(2.0).unwrap_err();
    assert!(err.is_fatal());

    assert_eq!(ctx.current_mesh().unwrap().params().c, 1.0);
    assert_eq!(ctx.backend().live_meshes(), 1);

    ctx.backend_mut().fail_uploads = false;
    ctx.set_shape(2.0).unwrap();
    assert_eq!(ctx.current_mesh().unwrap().params().c, 2.0);
    assert_eq!(ctx.backend().live_meshes(), 1);
}

#[test]
fn test_draw_failure_is_reported() {
    let mut ctx = textured_context();
    ctx.rebuild(&SurfaceParams::new(1.0, 2, 2)).unwrap();
    ctx.backend_mut().fail_draws = true;
    assert!(matches!(ctx.draw_frame(), Err(SvError::Backend(_))));
}

#[test]
fn test_uploaded_buffers_match_mesh() {
    let mut ctx = textured_context();
    ctx.rebuild(&SurfaceParams::new(1.0, 5, 7)).unwrap();

    let handle = ctx.current_gpu_mesh().unwrap().handle;
    let uploaded = ctx.backend().mesh(handle).unwrap();
    let vertices = 6 * 8;

    assert_eq!(uploaded.primitive, Primitive::Triangles);
    assert_eq!(uploaded.index_count, 5 * 7 * 6);
    assert_eq!(uploaded.index_bytes.len(), 5 * 7 * 6 * 4);
    for attribute in [
        VertexAttribute::Position,
        VertexAttribute::Normal,
        VertexAttribute::Tangent,
        VertexAttribute::Uv,
    ] {
        let bytes = uploaded.attribute(attribute).unwrap();
        assert_eq!(bytes.len(), vertices * attribute.stride());
    }
}

#[test]
fn test_frame_loop_orbits_camera() {
    let mut ctx = textured_context().with_mode(RenderMode::Wireframe);
    ctx.rebuild(&SurfaceParams::new(1.0, 16, 16)).unwrap();
    ctx.fit_camera();

    for _ in 0..3 {
        ctx.camera.orbit(0.1, 0.0);
        assert!(ctx.draw_frame().unwrap());
    }

    let draws = &ctx.backend().draws;
    assert_eq!(draws.len(), 3);
    assert!(draws.iter().all(|d| d.primitive == Primitive::Lines));
    assert_ne!(draws[0].uniforms.model_view, draws[2].uniforms.model_view);

    let expected = FrameUniforms::new(&ctx.camera, &ctx.material);
    assert_eq!(draws[2].uniforms, expected);
}

#[test]
fn test_shutdown_releases_everything() {
    let mut ctx = textured_context();
    ctx.rebuild(&SurfaceParams::new(1.0, 4, 4)).unwrap();
    ctx.set_mode(RenderMode::Wireframe).unwrap();
    ctx.set_shape(0.7).unwrap();

    let backend = ctx.shutdown();
    assert_eq!(backend.live_meshes(), 0);
    assert_eq!(backend.resident_bytes(), 0);
}
