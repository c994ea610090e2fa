/// Indexed triangle mesh with per-vertex texture coordinates
use nalgebra::{Point2, Point3};

use crate::error::{DrawError, VertexBuffer};

/// An indexed triangle mesh.
///
/// `texcoords` is index-aligned with `vertices`: the UV of vertex `i` is
/// `texcoords[i]`. Triangles in `tvi` are wound counter-clockwise when seen
/// from the side they face.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    pub vertices: Vec<Point3<f32>>,
    pub texcoords: Vec<Point2<f32>>,
    pub tvi: Vec<[usize; 3]>,
}

impl Mesh {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(vertices: usize, triangles: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(vertices),
            texcoords: Vec::with_capacity(vertices),
            tvi: Vec::with_capacity(triangles),
        }
    }

    /// Append a vertex with its UV and return its index
    pub fn add_vertex(&mut self, position: Point3<f32>, uv: Point2<f32>) -> usize {
        self.vertices.push(position);
        self.texcoords.push(uv);
        self.vertices.len() - 1
    }

    pub fn add_triangle(&mut self, indices: [usize; 3]) {
        self.tvi.push(indices);
    }

    pub fn triangle_count(&self) -> usize {
        self.tvi.len()
    }

    pub fn has_texcoords(&self) -> bool {
        !self.texcoords.is_empty()
    }

    /// Indices of triangle `triangle`, checked against the length of `buffer`.
    pub fn checked_triangle(
        &self,
        triangle: usize,
        buffer: VertexBuffer,
    ) -> Result<[usize; 3], DrawError> {
        let indices = *self.tvi.get(triangle).ok_or(DrawError::NoSuchTriangle {
            triangle,
            len: self.tvi.len(),
        })?;
        let len = match buffer {
            VertexBuffer::Vertices => self.vertices.len(),
            VertexBuffer::Texcoords => self.texcoords.len(),
        };
        match indices.iter().find(|&&index| index >= len) {
            Some(&index) => Err(DrawError::IndexOutOfRange {
                triangle,
                index,
                len,
                buffer,
            }),
            None => Ok(indices),
        }
    }

    /// Check every triangle against the vertex buffer, and against the
    /// texcoord buffer when the mesh has texcoords.
    pub fn validate(&self) -> Result<(), DrawError> {
        for triangle in 0..self.tvi.len() {
            self.checked_triangle(triangle, VertexBuffer::Vertices)?;
            if self.has_texcoords() {
                self.checked_triangle(triangle, VertexBuffer::Texcoords)?;
            }
        }
        Ok(())
    }

    /// Axis-aligned cube centred on the origin, 4 vertices per face so each
    /// face gets its own cell in a 3x2 UV atlas.
    pub fn cube(size: f32) -> Self {
        let h = size / 2.0;
        // Corners of each face, counter-clockwise seen from outside.
        let faces: [[[f32; 3]; 4]; 6] = [
            [[-h, -h, h], [h, -h, h], [h, h, h], [-h, h, h]],     // +z
            [[h, -h, -h], [-h, -h, -h], [-h, h, -h], [h, h, -h]], // -z
            [[h, -h, h], [h, -h, -h], [h, h, -h], [h, h, h]],     // +x
            [[-h, -h, -h], [-h, -h, h], [-h, h, h], [-h, h, -h]], // -x
            [[-h, h, h], [h, h, h], [h, h, -h], [-h, h, -h]],     // +y
            [[-h, -h, -h], [h, -h, -h], [h, -h, h], [-h, -h, h]], // -y
        ];
        let (du, dv) = (1.0 / 3.0, 1.0 / 2.0);

        let mut mesh = Self::with_capacity(24, 12);
        for (face, corners) in faces.iter().enumerate() {
            let u0 = (face % 3) as f32 * du;
            let v0 = (face / 3) as f32 * dv;
            // v grows downwards in the atlas, so the face's bottom edge sits at v0 + dv
            let uvs = [
                Point2::new(u0, v0 + dv),
                Point2::new(u0 + du, v0 + dv),
                Point2::new(u0 + du, v0),
                Point2::new(u0, v0),
            ];
            let base = mesh.vertices.len();
            for (corner, uv) in corners.iter().zip(uvs) {
                mesh.add_vertex(Point3::new(corner[0], corner[1], corner[2]), uv);
            }
            mesh.add_triangle([base, base + 1, base + 2]);
            mesh.add_triangle([base, base + 2, base + 3]);
        }
        mesh
    }
}
