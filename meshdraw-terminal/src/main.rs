/// meshdraw terminal viewer
///
/// Shows a mesh (a cube unless --obj is given) as a backface-culled wireframe
/// or as its texture-coordinate layout.
/// Controls:
///   - WASD / Arrow Keys: Rotate the mesh
///   - E/R: Roll rotation
///   - T: Toggle wireframe / texcoord view
///   - O: Toggle perspective / orthographic camera
///   - Q/ESC: Quit

use anyhow::{Context, Result};
use clap::Parser;
use meshdraw_core::{obj, DrawConfig, Mesh, ProjectionMode};
use meshdraw_terminal::{TerminalApp, ViewMode};
use std::path::PathBuf;

#[derive(Parser)]
#[command(about = "Debug view of a mesh's wireframe or UV layout in the terminal")]
struct Args {
    /// Wavefront OBJ file to show instead of the built-in cube
    #[arg(long)]
    obj: Option<PathBuf>,

    /// JSON draw configuration (colours, default canvas size, degenerate policy)
    #[arg(long)]
    config: Option<PathBuf>,

    /// View to start in
    #[arg(long, value_enum, default_value_t = ViewMode::Wireframe)]
    mode: ViewMode,

    /// Start with an orthographic instead of a perspective camera
    #[arg(long, default_value_t = false)]
    ortho: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => DrawConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => DrawConfig::default(),
    };

    let mesh = match &args.obj {
        Some(path) => obj::load_obj(path)?,
        None => Mesh::cube(2.0),
    };
    mesh.validate().context("mesh failed validation")?;
    log::info!(
        "{} vertices, {} triangles, texcoords: {}",
        mesh.vertices.len(),
        mesh.triangle_count(),
        mesh.has_texcoords()
    );

    let mut app = TerminalApp::new(mesh, config, args.mode)?;
    if args.ortho {
        app.set_projection_mode(ProjectionMode::Orthographic);
    }
    app.run()?;
    Ok(())
}
