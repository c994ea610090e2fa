/// Camera setup and the 3D to pixel projection
use nalgebra::{Matrix4, Point3, Vector3, Vector4};

use crate::transform::{Transforms, Viewport};

/// Project an object-space point to pixel coordinates.
///
/// The point goes through `projection * modelview`, is divided by its clip
/// `w`, and the resulting NDC is mapped onto `viewport` with y flipped so the
/// origin is the top-left pixel:
///
/// ```text
/// px    = viewport.x + (ndc.x + 1) / 2 * viewport.width
/// py    = viewport.y + (1 - ndc.y) / 2 * viewport.height
/// depth = (ndc.z + 1) / 2
/// ```
///
/// Returns `(px, py, depth, clip_w)`. A clip `w` of zero is not guarded
/// against and yields infinite or NaN coordinates; see [`is_degenerate`].
pub fn project(
    point: &Point3<f32>,
    modelview: &Matrix4<f32>,
    projection: &Matrix4<f32>,
    viewport: &Viewport,
) -> Vector4<f32> {
    let clip = projection * modelview * point.to_homogeneous();
    let ndc = clip.xyz() / clip.w;

    Vector4::new(
        viewport.x + (ndc.x + 1.0) * 0.5 * viewport.width,
        viewport.y + (1.0 - ndc.y) * 0.5 * viewport.height,
        (ndc.z + 1.0) * 0.5,
        clip.w,
    )
}

/// [`project`] using a bundled transform set
pub fn project_with(point: &Point3<f32>, transforms: &Transforms) -> Vector4<f32> {
    project(
        point,
        &transforms.modelview,
        &transforms.projection,
        &transforms.viewport,
    )
}

/// True when a projected point came from a (near) zero clip `w` or has a
/// non-finite component.
pub fn is_degenerate(projected: &Vector4<f32>) -> bool {
    projected.w.abs() < f32::EPSILON || projected.iter().any(|c| !c.is_finite())
}

/// Projection mode for rendering
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ProjectionMode {
    Orthographic,
    Perspective,
}

/// Look-at camera producing the model-view and projection matrices
#[derive(Debug, Clone)]
pub struct Camera {
    pub position: Point3<f32>,
    pub target: Point3<f32>,
    pub up: Vector3<f32>,
    pub fov: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    pub mode: ProjectionMode,
}

impl Camera {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            position: Point3::new(0.0, 0.0, 5.0),
            target: Point3::new(0.0, 0.0, 0.0),
            up: Vector3::new(0.0, 1.0, 0.0),
            fov: std::f32::consts::PI / 4.0, // 45 degrees
            aspect: width as f32 / height.max(1) as f32,
            near: 0.1,
            far: 100.0,
            mode: ProjectionMode::Perspective,
        }
    }

    /// Create the view matrix (camera transformation)
    pub fn view_matrix(&self) -> Matrix4<f32> {
        Matrix4::look_at_rh(&self.position, &self.target, &self.up)
    }

    /// Create the projection matrix
    pub fn projection_matrix(&self) -> Matrix4<f32> {
        match self.mode {
            ProjectionMode::Perspective => {
                Matrix4::new_perspective(self.aspect, self.fov, self.near, self.far)
            }
            ProjectionMode::Orthographic => {
                let height = (self.position - self.target).norm();
                let width = height * self.aspect;
                Matrix4::new_orthographic(
                    -width / 2.0,
                    width / 2.0,
                    -height / 2.0,
                    height / 2.0,
                    self.near,
                    self.far,
                )
            }
        }
    }

    /// Transform set drawing a model with matrix `model` onto a `width` x `height` canvas
    pub fn transforms(&self, model: &Matrix4<f32>, width: u32, height: u32) -> Transforms {
        Transforms::new(
            self.view_matrix() * model,
            self.projection_matrix(),
            Viewport::from_size(width, height),
        )
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(512, 512)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identity_project(point: Point3<f32>, viewport: Viewport) -> Vector4<f32> {
        project(&point, &Matrix4::identity(), &Matrix4::identity(), &viewport)
    }

    #[test]
    fn test_origin_maps_to_viewport_centre() {
        let p = identity_project(Point3::origin(), Viewport::from_size(640, 480));
        assert!((p.x - 320.0).abs() < 1e-4);
        assert!((p.y - 240.0).abs() < 1e-4);
        assert!((p.z - 0.5).abs() < 1e-6);
        assert!((p.w - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_ndc_corners_flip_vertically() {
        let viewport = Viewport::from_size(100, 50);
        let top_left = identity_project(Point3::new(-1.0, 1.0, 0.0), viewport);
        let bottom_right = identity_project(Point3::new(1.0, -1.0, 0.0), viewport);
        assert!((top_left.x - 0.0).abs() < 1e-4 && (top_left.y - 0.0).abs() < 1e-4);
        assert!((bottom_right.x - 100.0).abs() < 1e-4 && (bottom_right.y - 50.0).abs() < 1e-4);
    }

    #[test]
    fn test_viewport_offset() {
        let p = identity_project(Point3::origin(), Viewport::new(10.0, 20.0, 100.0, 100.0));
        assert!((p.x - 60.0).abs() < 1e-4);
        assert!((p.y - 70.0).abs() < 1e-4);
    }

    #[test]
    fn test_perspective_divide() {
        // w = 2 halves the NDC position
        let projection = Matrix4::from_diagonal(&Vector4::new(1.0, 1.0, 1.0, 2.0));
        let p = project(
            &Point3::new(1.0, 1.0, 0.0),
            &Matrix4::identity(),
            &projection,
            &Viewport::from_size(100, 100),
        );
        assert!((p.x - 75.0).abs() < 1e-4);
        assert!((p.y - 25.0).abs() < 1e-4);
        assert!((p.w - 2.0).abs() < 1e-6);
    }

    #[test]
    fn test_zero_w_is_degenerate() {
        let projection = Matrix4::from_diagonal(&Vector4::new(1.0, 1.0, 1.0, 0.0));
        let p = project(
            &Point3::new(1.0, 0.0, 0.0),
            &Matrix4::identity(),
            &projection,
            &Viewport::from_size(10, 10),
        );
        assert!(is_degenerate(&p));
        assert!(!is_degenerate(&identity_project(
            Point3::origin(),
            Viewport::from_size(10, 10)
        )));
    }

    #[test]
    fn test_camera_creation() {
        let camera = Camera::new(800, 600);
        assert_eq!(camera.mode, ProjectionMode::Perspective);
        assert!((camera.aspect - 800.0 / 600.0).abs() < 1e-6);
    }

    #[test]
    fn test_camera_centres_target() {
        let camera = Camera::new(200, 100);
        let transforms = camera.transforms(&Matrix4::identity(), 200, 100);
        let p = project_with(&camera.target, &transforms);
        assert!((p.x - 100.0).abs() < 1e-3);
        assert!((p.y - 50.0).abs() < 1e-3);
        assert!(p.z > 0.0 && p.z < 1.0);
    }

    #[test]
    fn test_orthographic_keeps_target_centred() {
        let mut camera = Camera::new(100, 100);
        camera.mode = ProjectionMode::Orthographic;
        let transforms = camera.transforms(&Matrix4::identity(), 100, 100);
        let p = project_with(&Point3::origin(), &transforms);
        assert!((p.x - 50.0).abs() < 1e-3);
        assert!((p.y - 50.0).abs() < 1e-3);
    }
}
