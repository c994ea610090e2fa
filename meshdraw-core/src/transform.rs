/// Transform set (model-view, projection, viewport) and model pose helpers
use nalgebra::{Matrix4, Vector3, Vector4};

/// Maps normalized device coordinates to pixel coordinates.
///
/// `(x, y)` is the top-left corner of the target rectangle in pixels; the
/// vertical flip to a y-down raster is applied by the projector, so `height`
/// is always positive here.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Viewport covering a whole `width` x `height` canvas
    pub fn from_size(width: u32, height: u32) -> Self {
        Self::new(0.0, 0.0, width as f32, height as f32)
    }

    /// `(x, y, width, height)`
    pub fn from_vector(v: &Vector4<f32>) -> Self {
        Self::new(v.x, v.y, v.z, v.w)
    }

    pub fn to_vector(&self) -> Vector4<f32> {
        Vector4::new(self.x, self.y, self.width, self.height)
    }
}

/// Everything needed to take a mesh vertex to a pixel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transforms {
    pub modelview: Matrix4<f32>,
    pub projection: Matrix4<f32>,
    pub viewport: Viewport,
}

impl Transforms {
    pub fn new(modelview: Matrix4<f32>, projection: Matrix4<f32>, viewport: Viewport) -> Self {
        Self {
            modelview,
            projection,
            viewport,
        }
    }

    /// Identity model-view and projection over `viewport`, so object
    /// coordinates are already NDC.
    pub fn identity(viewport: Viewport) -> Self {
        Self::new(Matrix4::identity(), Matrix4::identity(), viewport)
    }

    pub fn mvp(&self) -> Matrix4<f32> {
        self.projection * self.modelview
    }
}

/// Rotation (Euler angles, radians), translation and scale of a model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModelPose {
    pub rotation: Vector3<f32>,
    pub translation: Vector3<f32>,
    pub scale: f32,
}

impl ModelPose {
    pub fn new(rotation: Vector3<f32>) -> Self {
        Self {
            rotation,
            ..Self::default()
        }
    }

    /// Rotate by delta amounts (in radians)
    pub fn rotate(&mut self, dx: f32, dy: f32, dz: f32) {
        self.rotation += Vector3::new(dx, dy, dz);
    }

    /// Model matrix: scale first, then rotate X, Y, Z, then translate
    pub fn matrix(&self) -> Matrix4<f32> {
        let rx = Matrix4::new_rotation(Vector3::new(self.rotation.x, 0.0, 0.0));
        let ry = Matrix4::new_rotation(Vector3::new(0.0, self.rotation.y, 0.0));
        let rz = Matrix4::new_rotation(Vector3::new(0.0, 0.0, self.rotation.z));

        Matrix4::new_translation(&self.translation) * rz * ry * rx * Matrix4::new_scaling(self.scale)
    }
}

impl Default for ModelPose {
    fn default() -> Self {
        Self {
            rotation: Vector3::zeros(),
            translation: Vector3::zeros(),
            scale: 1.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Point3;

    #[test]
    fn test_viewport_vector_roundtrip() {
        let v = Viewport::new(10.0, 20.0, 640.0, 480.0);
        assert_eq!(Viewport::from_vector(&v.to_vector()), v);
        assert_eq!(Viewport::from_size(640, 480), Viewport::new(0.0, 0.0, 640.0, 480.0));
    }

    #[test]
    fn test_identity_pose() {
        let pose = ModelPose::default();
        assert!((pose.matrix() - Matrix4::identity()).norm() < 1e-6);
    }

    #[test]
    fn test_pose_rotate_accumulates() {
        let mut pose = ModelPose::default();
        pose.rotate(0.1, 0.2, 0.3);
        pose.rotate(0.1, 0.0, 0.0);
        assert!((pose.rotation.x - 0.2).abs() < 1e-6);
        assert!((pose.rotation.y - 0.2).abs() < 1e-6);
        assert!((pose.rotation.z - 0.3).abs() < 1e-6);
    }

    #[test]
    fn test_pose_scales_before_translating() {
        let pose = ModelPose {
            translation: Vector3::new(1.0, 0.0, 0.0),
            scale: 2.0,
            ..ModelPose::default()
        };
        let p = pose.matrix().transform_point(&Point3::new(1.0, 1.0, 0.0));
        assert!((p - Point3::new(3.0, 2.0, 0.0)).norm() < 1e-6);
    }

    #[test]
    fn test_mvp_order() {
        let t = Transforms::new(
            Matrix4::new_translation(&Vector3::new(1.0, 0.0, 0.0)),
            Matrix4::new_scaling(2.0),
            Viewport::from_size(1, 1),
        );
        let p = t.mvp().transform_point(&Point3::origin());
        assert!((p - Point3::new(2.0, 0.0, 0.0)).norm() < 1e-6);
    }
}
