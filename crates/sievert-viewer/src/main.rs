//! Sievert surface viewer CLI
//!
//! Builds the surface mesh, draws it headless through the recording backend,
//! and optionally exports it.
//!
//! # Usage
//!
//! ```bash
//! # Default surface (C = 1, 250x250 grid), one frame
//! sievert-viewer --summary
//!
//! # Flatter shape, coarse grid, wireframe, exported to OBJ
//! sievert-viewer --c 0.3 --steps 40 40 --wireframe --obj sievert.obj
//! ```

mod cli;
mod config;

use std::process;

use sievert_core::Result;
use sievert_mesh::SurfaceMesh;
use sievert_render::{export, RecordingBackend, RenderContext};

use crate::cli::CliArgs;
use crate::config::ViewerConfig;

fn print_usage() {
    eprintln!(
        r#"Sievert surface viewer

USAGE:
    sievert-viewer [OPTIONS]

OPTIONS:
    --config <file.json>   Load settings from a JSON file
    --c <C>                Shape constant, must be > 0 (default 1)
    --steps <U> <V>        Grid resolution in cells (default 250 250)
    --tangents             Generate tangents for normal mapping
    --wireframe            Draw the sample grid as lines
    --frames <N>           Frames to draw, orbiting the camera (default 1)
    --obj <out.obj>        Export the mesh as Wavefront OBJ
    --bin <out.bin>        Export the mesh in the binary layout
    --summary              Print mesh statistics
    --help                 Show this help message

Log verbosity follows RUST_LOG (default: info).
"#
    );
}

fn main() {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let args = match CliArgs::parse(std::env::args().skip(1)) {
        Ok(args) => args,
        Err(e) => {
            eprintln!("Error: {}\n", e);
            print_usage();
            process::exit(1);
        }
    };

    if args.help {
        print_usage();
        process::exit(0);
    }

    if let Err(e) = run(&args) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run(args: &CliArgs) -> Result<()> {
    let mut config = match &args.config {
        Some(path) => ViewerConfig::load_json(path)?,
        None => ViewerConfig::default(),
    };
    args.apply(&mut config);

    let mut ctx = RenderContext::new(RecordingBackend::new(), config.mesh).with_mode(config.mode);
    ctx.camera = config.camera.clone();
    ctx.material = config.material;
    ctx.rebuild(&config.surface)?;

    for _ in 0..config.frames {
        ctx.draw_frame()?;
        ctx.camera.orbit(config.orbit_step, 0.0);
    }
    log::info!("drew {} frame(s)", ctx.backend().draws.len());

    if let Some(mesh) = ctx.current_mesh() {
        if args.summary {
            print_summary(mesh, ctx.backend());
        }
        if let Some(path) = &args.obj {
            export::export_obj(mesh, path)?;
        }
        if let Some(path) = &args.bin {
            export::export_binary(mesh, path)?;
        }
    }

    ctx.shutdown();
    Ok(())
}

fn print_summary(mesh: &SurfaceMesh, backend: &RecordingBackend) {
    let params = mesh.params();
    let bounds = mesh.bounds();
    let stats = mesh.stats();

    println!("Sievert surface");
    println!("  C:          {}", params.c);
    println!("  grid:       {} x {}", params.u_steps, params.v_steps);
    println!("  vertices:   {}", mesh.vertex_count());
    println!("  triangles:  {}", mesh.triangle_count());
    println!("  tangents:   {}", if mesh.tangents().is_some() { "yes" } else { "no" });
    println!(
        "  bounds:     ({:.3}, {:.3}, {:.3}) .. ({:.3}, {:.3}, {:.3})",
        bounds.min.x, bounds.min.y, bounds.min.z, bounds.max.x, bounds.max.y, bounds.max.z
    );
    println!("  fallbacks:  {}", stats.total());
    println!("  gpu bytes:  {}", backend.resident_bytes());
}
