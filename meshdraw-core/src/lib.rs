/// meshdraw core library - debug drawing of meshes into pixel canvases
///
/// Projects a mesh through model-view, projection and viewport transforms,
/// culls back faces by their screen-space winding and draws the remaining
/// triangles as a wireframe. The texture-coordinate layout of a mesh can be
/// drawn the same way. Also provides the canvas, configuration and OBJ
/// loading the front ends build on.

pub mod canvas;
pub mod config;
pub mod draw;
pub mod error;
pub mod geometry;
pub mod obj;
pub mod orientation;
pub mod projection;
pub mod transform;

// Re-export commonly used types
pub use canvas::{Canvas, Rgba, RgbaCanvas};
pub use config::{DegeneratePolicy, DrawConfig};
pub use draw::{
    draw_texcoords, draw_texcoords_into, draw_wireframe, draw_wireframe_with_policy, DrawStats,
};
pub use error::{ConfigError, DrawError, ObjError, VertexBuffer};
pub use geometry::Mesh;
pub use orientation::{is_front_facing, Winding};
pub use projection::{project, Camera, ProjectionMode};
pub use transform::{ModelPose, Transforms, Viewport};
