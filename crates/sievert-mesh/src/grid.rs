//! Index buffers for a `(u_steps+1) x (v_steps+1)` vertex grid.

/// Triangulate a vertex grid into `2 * u_steps * v_steps` triangles.
///
/// For cell `(i, j)` with corners
/// `top_left = i*(v_steps+1) + j`, `top_right = top_left + 1`,
/// `bottom_left = (i+1)*(v_steps+1) + j`, `bottom_right = bottom_left + 1`
/// the triangles are `(top_left, bottom_left, bottom_right)` and
/// `(top_left, bottom_right, top_right)`. The winding decides which side is
/// front-facing and the sign of the face normals, so it must not change.
pub fn triangulate_grid(u_steps: u32, v_steps: u32) -> Vec<u32> {
    let row = v_steps + 1;
    let mut indices = Vec::with_capacity(u_steps as usize * v_steps as usize * 6);
    for i in 0..u_steps {
        for j in 0..v_steps {
            let top_left = i * row + j;
            let top_right = top_left + 1;
            let bottom_left = (i + 1) * row + j;
            let bottom_right = bottom_left + 1;

            indices.extend_from_slice(&[top_left, bottom_left, bottom_right]);
            indices.extend_from_slice(&[top_left, bottom_right, top_right]);
        }
    }
    indices
}

/// Line-list indices tracing every grid line: each row along `v`, then each
/// column along `u`.
pub fn grid_wireframe(u_steps: u32, v_steps: u32) -> Vec<u32> {
    let row = v_steps + 1;
    let segments = (u_steps as usize + 1) * v_steps as usize
        + u_steps as usize * (v_steps as usize + 1);
    let mut indices = Vec::with_capacity(segments * 2);
    for i in 0..=u_steps {
        for j in 0..v_steps {
            indices.extend_from_slice(&[i * row + j, i * row + j + 1]);
        }
    }
    for j in 0..=v_steps {
        for i in 0..u_steps {
            indices.extend_from_slice(&[i * row + j, (i + 1) * row + j]);
        }
    }
    indices
}
