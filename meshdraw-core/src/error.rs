/// Error types for drawing, mesh loading and configuration
use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Which per-vertex buffer a triangle index was checked against
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VertexBuffer {
    Vertices,
    Texcoords,
}

impl fmt::Display for VertexBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VertexBuffer::Vertices => f.write_str("vertices"),
            VertexBuffer::Texcoords => f.write_str("texcoords"),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DrawError {
    #[error("triangle {triangle} references index {index}, but {buffer} has only {len} entries")]
    IndexOutOfRange {
        triangle: usize,
        index: usize,
        len: usize,
        buffer: VertexBuffer,
    },
    #[error("triangle {triangle} does not exist, the mesh has {len} triangles")]
    NoSuchTriangle { triangle: usize, len: usize },
    #[error("vertex {vertex} of triangle {triangle} projects to a non-finite or zero-w point")]
    DegenerateTransform { triangle: usize, vertex: usize },
}

#[derive(Error, Debug)]
pub enum ObjError {
    #[error("line {line}: {message}")]
    Parse { line: usize, message: String },
    #[error("line {line}: {kind} index {index} is out of range ({len} defined)")]
    IndexOutOfRange {
        line: usize,
        kind: &'static str,
        index: i64,
        len: usize,
    },
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid draw configuration: {0}")]
    Json(#[from] serde_json::Error),
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("canvas size must be non-zero, got {0}x{1}")]
    EmptyCanvas(u32, u32),
}
