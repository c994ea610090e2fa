/// Screen-space winding test used for backface culling
use nalgebra::Point2;

/// Winding of a triangle as it appears on screen, named after the mesh's
/// authored (y-up) orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Winding {
    CounterClockwise,
    Clockwise,
    Degenerate,
}

/// z component of `(p2 - p1) x (p3 - p1)`, i.e. twice the signed area in pixel coordinates
pub fn signed_area(p1: &Point2<f32>, p2: &Point2<f32>, p3: &Point2<f32>) -> f32 {
    let a = p2 - p1;
    let b = p3 - p1;
    a.x * b.y - a.y * b.x
}

pub fn winding(p1: &Point2<f32>, p2: &Point2<f32>, p3: &Point2<f32>) -> Winding {
    let area = signed_area(p1, p2, p3);
    if area < 0.0 {
        Winding::CounterClockwise
    } else if area > 0.0 {
        Winding::Clockwise
    } else {
        // zero or NaN
        Winding::Degenerate
    }
}

/// True if the pixel-space triangle is front-facing. Zero-area triangles are not.
///
/// Pixel coordinates grow downwards, which mirrors the y-up convention the
/// mesh is authored in. A triangle that is counter-clockwise in the mesh's
/// own winding (and still looks counter-clockwise on screen) therefore has a
/// *negative* signed area when computed from its pixel coordinates.
///
/// Culling on winding alone has no depth information, so a front-facing
/// triangle hidden behind another is still reported as visible.
pub fn is_front_facing(p1: &Point2<f32>, p2: &Point2<f32>, p3: &Point2<f32>) -> bool {
    winding(p1, p2, p3) == Winding::CounterClockwise
}
