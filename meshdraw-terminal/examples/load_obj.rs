/// Example: Load an OBJ file and write its UV layout next to it as a PPM image
///
/// Usage: cargo run --example load_obj -- path/to/mesh.obj [size]

use anyhow::{bail, Context, Result};
use meshdraw_core::{draw_texcoords, obj, Canvas, DrawConfig};
use std::env;
use std::fs::File;
use std::io::{BufWriter, Write};

fn main() -> Result<()> {
    env_logger::init();
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        bail!("Usage: {} <obj-file> [size]", args[0]);
    }

    let mut config = DrawConfig::default();
    if let Some(size) = args.get(2) {
        let size: u32 = size.parse().context("size must be a positive integer")?;
        config.canvas_size = (size, size);
        config.validate()?;
    }

    let obj_path = &args[1];
    println!("Loading OBJ file: {}", obj_path);
    let mesh = obj::load_obj(obj_path)?;
    println!("Loaded {} triangles", mesh.triangle_count());

    if !mesh.has_texcoords() {
        bail!("{} has no texture coordinates", obj_path);
    }

    let canvas = draw_texcoords(&mesh, None, &config)?;

    // Binary PPM: RGB only, alpha dropped
    let out_path = format!("{}.uv.ppm", obj_path);
    let mut out = BufWriter::new(File::create(&out_path)?);
    write!(out, "P6\n{} {}\n255\n", canvas.width(), canvas.height())?;
    for px in canvas.as_raw().chunks_exact(4) {
        out.write_all(&px[..3])?;
    }
    out.flush()?;

    println!("Wrote {}", out_path);
    Ok(())
}
