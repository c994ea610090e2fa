/// Debug renderers: backface-culled wireframe and texture-coordinate layout
use nalgebra::Point2;

use crate::canvas::{Canvas, Rgba, RgbaCanvas};
use crate::config::{DegeneratePolicy, DrawConfig};
use crate::error::{DrawError, VertexBuffer};
use crate::geometry::Mesh;
use crate::orientation::is_front_facing;
use crate::projection::{is_degenerate, project_with};
use crate::transform::Transforms;

/// Per-call triangle counts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DrawStats {
    /// Triangles whose three edges were drawn
    pub drawn: usize,
    /// Triangles skipped as back-facing or zero-area
    pub culled: usize,
    /// Triangles with at least one vertex at zero or non-finite clip `w`
    pub degenerate: usize,
}

/// Draw the front-facing triangles of `mesh` as a wireframe.
///
/// Degenerate projections are tolerated: they're logged and the resulting
/// coordinates are passed on to the canvas, which clips them.
pub fn draw_wireframe<C: Canvas + ?Sized>(
    canvas: &mut C,
    mesh: &Mesh,
    transforms: &Transforms,
    colour: Rgba,
) -> Result<DrawStats, DrawError> {
    draw_wireframe_with_policy(canvas, mesh, transforms, colour, DegeneratePolicy::Tolerate)
}

/// Draw the front-facing triangles of `mesh` as a wireframe.
///
/// Each triangle is projected and kept only if its screen-space winding is
/// counter-clockwise (see [`crate::orientation`]). There is no depth test, so
/// front faces occluded by other geometry are still drawn.
///
/// Triangles are processed in storage order. An out-of-range vertex index
/// stops the call with [`DrawError::IndexOutOfRange`]; edges of earlier
/// triangles stay on the canvas.
pub fn draw_wireframe_with_policy<C: Canvas + ?Sized>(
    canvas: &mut C,
    mesh: &Mesh,
    transforms: &Transforms,
    colour: Rgba,
    policy: DegeneratePolicy,
) -> Result<DrawStats, DrawError> {
    let mut stats = DrawStats::default();

    for triangle in 0..mesh.tvi.len() {
        let indices = mesh.checked_triangle(triangle, VertexBuffer::Vertices)?;
        let projected = indices.map(|i| project_with(&mesh.vertices[i], transforms));

        if let Some(vertex) = projected.iter().position(is_degenerate) {
            if policy == DegeneratePolicy::Reject {
                return Err(DrawError::DegenerateTransform { triangle, vertex });
            }
            log::warn!(
                "triangle {} vertex {} projects to {:?}",
                triangle,
                vertex,
                projected[vertex]
            );
            stats.degenerate += 1;
        }

        let [p1, p2, p3] = projected.map(|p| Point2::new(p.x, p.y));
        if !is_front_facing(&p1, &p2, &p3) {
            log::trace!("culled triangle {}", triangle);
            stats.culled += 1;
            continue;
        }

        canvas.draw_line(p1, p2, colour);
        canvas.draw_line(p2, p3, colour);
        canvas.draw_line(p3, p1, colour);
        stats.drawn += 1;
    }

    log::debug!(
        "wireframe: {} drawn, {} culled, {} degenerate of {} triangles",
        stats.drawn,
        stats.culled,
        stats.degenerate,
        mesh.tvi.len()
    );
    Ok(stats)
}

/// Draw every triangle's UV layout into `canvas`. No culling: texture space
/// has no front or back. UV `(u, v)` lands at pixel `(u * width, v * height)`.
pub fn draw_texcoords_into<C: Canvas + ?Sized>(
    canvas: &mut C,
    mesh: &Mesh,
    colour: Rgba,
) -> Result<DrawStats, DrawError> {
    let (width, height) = (canvas.width() as f32, canvas.height() as f32);
    let mut stats = DrawStats::default();

    for triangle in 0..mesh.tvi.len() {
        let indices = mesh.checked_triangle(triangle, VertexBuffer::Texcoords)?;
        let [p1, p2, p3] = indices.map(|i| {
            let uv = mesh.texcoords[i];
            Point2::new(uv.x * width, uv.y * height)
        });

        canvas.draw_line(p1, p2, colour);
        canvas.draw_line(p2, p3, colour);
        canvas.draw_line(p3, p1, colour);
        stats.drawn += 1;
    }

    log::debug!("texcoords: {} triangles drawn", stats.drawn);
    Ok(stats)
}

/// Draw the UV layout of `mesh` onto `canvas`, or onto a new
/// `config.canvas_size` canvas filled with `config.background` when none is
/// given, and hand the canvas back.
pub fn draw_texcoords(
    mesh: &Mesh,
    canvas: Option<RgbaCanvas>,
    config: &DrawConfig,
) -> Result<RgbaCanvas, DrawError> {
    let mut canvas =
        canvas.unwrap_or_else(|| RgbaCanvas::from_size(config.canvas_size, config.background));
    draw_texcoords_into(&mut canvas, mesh, config.texcoord_colour)?;
    Ok(canvas)
}
