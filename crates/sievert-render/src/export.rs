//! File export for a generated surface mesh.
//!
//! Two formats: Wavefront OBJ for interchange, and a compact little-endian
//! binary dump that mirrors the GPU attribute layout.

use std::io::Write;
use std::path::Path;

use sievert_core::{Result, SvError};
use sievert_mesh::SurfaceMesh;

/// Magic bytes at the start of a binary mesh file.
pub const BINARY_MAGIC: [u8; 4] = *b"SVMS";
/// Current binary layout version.
pub const BINARY_VERSION: u8 = 1;
/// Flag bit set when per-vertex tangents follow the normals.
pub const FLAG_TANGENTS: u8 = 1 << 0;
/// Flag bit set when texture coordinates follow the normals (and tangents).
pub const FLAG_UVS: u8 = 1 << 1;
/// Size of the fixed binary header in bytes.
pub const BINARY_HEADER_LEN: usize = 4 + 1 + 1 + 4 + 4 + 4 + 4 + 4;

/// Write the mesh as Wavefront OBJ.
///
/// Faces reference positions, texture coordinates and normals with the same
/// 1-based index since all attributes share one vertex index.
pub fn write_obj<W: Write>(mesh: &SurfaceMesh, out: &mut W) -> Result<()> {
    let params = mesh.params();
    writeln!(
        out,
        "# Sievert surface C={} grid {}x{}",
        params.c, params.u_steps, params.v_steps
    )?;
    writeln!(out, "# {} vertices, {} triangles", mesh.vertex_count(), mesh.triangle_count())?;
    writeln!(out, "o sievert")?;

    for p in mesh.positions() {
        writeln!(out, "v {:.6} {:.6} {:.6}", p.x, p.y, p.z)?;
    }
    let uvs = mesh.uvs();
    if let Some(uvs) = uvs {
        for uv in uvs {
            writeln!(out, "vt {:.6} {:.6}", uv.x, uv.y)?;
        }
    }
    for n in mesh.normals() {
        writeln!(out, "vn {:.6} {:.6} {:.6}", n.x, n.y, n.z)?;
    }

    for tri in mesh.indices().chunks_exact(3) {
        let [a, b, c] = [tri[0] + 1, tri[1] + 1, tri[2] + 1];
        if uvs.is_some() {
            writeln!(out, "f {a}/{a}/{a} {b}/{b}/{b} {c}/{c}/{c}")?;
        } else {
            writeln!(out, "f {a}//{a} {b}//{b} {c}//{c}")?;
        }
    }
    Ok(())
}

/// Write the mesh as OBJ to `path`.
pub fn export_obj(mesh: &SurfaceMesh, path: &Path) -> Result<()> {
    let file = std::fs::File::create(path)?;
    let mut out = std::io::BufWriter::new(file);
    write_obj(mesh, &mut out)?;
    out.flush()?;
    log::info!("wrote OBJ mesh to {}", path.display());
    Ok(())
}

/// Encode the mesh in the binary layout.
///
/// Header: magic, version, flags, vertex count, index count, C as f32,
/// u steps, v steps. Body: positions, normals, optional tangents, optional
/// UVs (all f32), then u32 indices. Everything little-endian.
///
/// Fails when the vertex or index count does not fit its u32 header field.
pub fn encode_binary(mesh: &SurfaceMesh) -> Result<Vec<u8>> {
    let vertex_count = header_count(mesh.vertex_count(), "vertex")?;
    let index_count = header_count(mesh.indices().len(), "index")?;
    let params = mesh.params();
    let tangents = mesh.tangents();
    let uvs = mesh.uvs();

    let mut flags = 0u8;
    if tangents.is_some() {
        flags |= FLAG_TANGENTS;
    }
    if uvs.is_some() {
        flags |= FLAG_UVS;
    }

    let floats_per_vertex = 6 + if tangents.is_some() { 3 } else { 0 } + if uvs.is_some() { 2 } else { 0 };
    let mut buf = Vec::with_capacity(
        BINARY_HEADER_LEN + mesh.vertex_count() * floats_per_vertex * 4 + mesh.indices().len() * 4,
    );

    buf.extend_from_slice(&BINARY_MAGIC);
    buf.push(BINARY_VERSION);
    buf.push(flags);
    buf.extend_from_slice(&vertex_count.to_le_bytes());
    buf.extend_from_slice(&index_count.to_le_bytes());
    buf.extend_from_slice(&(params.c as f32).to_le_bytes());
    buf.extend_from_slice(&params.u_steps.to_le_bytes());
    buf.extend_from_slice(&params.v_steps.to_le_bytes());

    let vectors = [Some(mesh.positions()), Some(mesh.normals()), tangents];
    for v in vectors.into_iter().flatten().flatten() {
        buf.extend_from_slice(&(v.x as f32).to_le_bytes());
        buf.extend_from_slice(&(v.y as f32).to_le_bytes());
        buf.extend_from_slice(&(v.z as f32).to_le_bytes());
    }
    if let Some(uvs) = uvs {
        for uv in uvs {
            buf.extend_from_slice(&(uv.x as f32).to_le_bytes());
            buf.extend_from_slice(&(uv.y as f32).to_le_bytes());
        }
    }
    for &i in mesh.indices() {
        buf.extend_from_slice(&i.to_le_bytes());
    }
    Ok(buf)
}

fn header_count(len: usize, what: &str) -> Result<u32> {
    u32::try_from(len).map_err(|_| {
        SvError::invalid(format!("{what} count {len} does not fit the binary mesh header"))
    })
}

/// Write the binary layout to `path`.
pub fn export_binary(mesh: &SurfaceMesh, path: &Path) -> Result<()> {
    let buf = encode_binary(mesh)?;
    std::fs::write(path, &buf)?;
    log::info!("wrote binary mesh to {} ({} bytes)", path.display(), buf.len());
    Ok(())
}
