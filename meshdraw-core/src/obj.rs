/// Wavefront OBJ reader (positions, texture coordinates and faces only)
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use nalgebra::{Point2, Point3};
use nom::{
    character::complete::{char, digit1, space0, space1},
    combinator::{all_consuming, map_res, opt, recognize},
    multi::many1,
    number::complete::float,
    sequence::{pair, preceded, terminated},
    IResult,
};

use crate::error::ObjError;
use crate::geometry::Mesh;

/// One corner of a face: 1-based (or negative, relative) indices as written
#[derive(Debug, Clone, Copy, PartialEq)]
struct FaceVertex {
    v: i64,
    vt: Option<i64>,
}

/// Read and parse an OBJ file
pub fn load_obj(path: impl AsRef<Path>) -> Result<Mesh, ObjError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|source| ObjError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let mesh = parse_obj(&text)?;
    log::debug!(
        "loaded {}: {} vertices, {} triangles",
        path.display(),
        mesh.vertices.len(),
        mesh.triangle_count()
    );
    Ok(mesh)
}

/// Parse OBJ text into a [`Mesh`].
///
/// Each distinct `(v, vt)` pair used by a face becomes one mesh vertex, so
/// texcoords stay index-aligned with vertices. Polygons are fan-triangulated.
/// Faces without `vt` references get a `(0, 0)` UV when other faces do use
/// texcoords; a file with no `vt` usage at all yields a mesh without texcoords.
pub fn parse_obj(input: &str) -> Result<Mesh, ObjError> {
    let mut positions: Vec<Point3<f32>> = Vec::new();
    let mut uvs: Vec<Point2<f32>> = Vec::new();
    let mut faces: Vec<(usize, Vec<FaceVertex>)> = Vec::new();

    for (n, raw) in input.lines().enumerate() {
        let line_no = n + 1;
        let line = raw.split('#').next().unwrap_or("").trim();
        let Some((keyword, rest)) = split_keyword(line) else {
            continue;
        };
        let parse_err = |message: String| ObjError::Parse {
            line: line_no,
            message,
        };

        match keyword {
            "v" => {
                let (_, (x, y, z)) =
                    vector3(rest).map_err(|e| parse_err(format!("bad vertex: {e}")))?;
                positions.push(Point3::new(x, y, z));
            }
            "vt" => {
                let (_, (u, v)) =
                    vector2(rest).map_err(|e| parse_err(format!("bad texture coordinate: {e}")))?;
                uvs.push(Point2::new(u, v));
            }
            "f" => {
                let (_, corners) =
                    face(rest).map_err(|e| parse_err(format!("bad face: {e}")))?;
                if corners.len() < 3 {
                    return Err(parse_err(format!(
                        "face needs at least 3 vertices, got {}",
                        corners.len()
                    )));
                }
                faces.push((line_no, corners));
            }
            _ => log::trace!("line {}: skipping '{}'", line_no, keyword),
        }
    }

    let textured = faces
        .iter()
        .any(|(_, corners)| corners.iter().any(|c| c.vt.is_some()));

    let mut mesh = Mesh::with_capacity(positions.len(), faces.len());
    let mut remap: HashMap<(usize, Option<usize>), usize> = HashMap::new();

    for (line, corners) in &faces {
        let mut indices = Vec::with_capacity(corners.len());
        for corner in corners {
            let v = resolve(corner.v, positions.len(), *line, "vertex")?;
            let vt = corner
                .vt
                .map(|vt| resolve(vt, uvs.len(), *line, "texture coordinate"))
                .transpose()?;

            let index = *remap.entry((v, vt)).or_insert_with(|| {
                mesh.vertices.push(positions[v]);
                if textured {
                    mesh.texcoords
                        .push(vt.map(|t| uvs[t]).unwrap_or_else(Point2::origin));
                }
                mesh.vertices.len() - 1
            });
            indices.push(index);
        }

        for i in 1..indices.len() - 1 {
            mesh.add_triangle([indices[0], indices[i], indices[i + 1]]);
        }
    }

    Ok(mesh)
}

fn split_keyword(line: &str) -> Option<(&str, &str)> {
    if line.is_empty() {
        return None;
    }
    match line.split_once(char::is_whitespace) {
        Some((keyword, rest)) => Some((keyword, rest)),
        None => Some((line, "")),
    }
}

/// Turn an OBJ index (1-based, or negative counting back from the end) into a 0-based one
fn resolve(index: i64, len: usize, line: usize, kind: &'static str) -> Result<usize, ObjError> {
    let resolved = if index > 0 {
        index - 1
    } else {
        len as i64 + index
    };
    if index == 0 || resolved < 0 || resolved >= len as i64 {
        return Err(ObjError::IndexOutOfRange {
            line,
            kind,
            index,
            len,
        });
    }
    Ok(resolved as usize)
}

fn vector3(input: &str) -> IResult<&str, (f32, f32, f32)> {
    let (input, _) = space0(input)?;
    let (input, x) = float(input)?;
    let (input, _) = space1(input)?;
    let (input, y) = float(input)?;
    let (input, _) = space1(input)?;
    let (input, z) = float(input)?;
    // optional w
    let (input, _) = opt(preceded(space1, float))(input)?;
    let (input, _) = all_consuming(space0)(input)?;
    Ok((input, (x, y, z)))
}

fn vector2(input: &str) -> IResult<&str, (f32, f32)> {
    let (input, _) = space0(input)?;
    let (input, u) = float(input)?;
    let (input, _) = space1(input)?;
    let (input, v) = float(input)?;
    // optional w
    let (input, _) = opt(preceded(space1, float))(input)?;
    let (input, _) = all_consuming(space0)(input)?;
    Ok((input, (u, v)))
}

fn index(input: &str) -> IResult<&str, i64> {
    map_res(recognize(pair(opt(char('-')), digit1)), str::parse::<i64>)(input)
}

/// `v`, `v/vt`, `v//vn` or `v/vt/vn`; normals are ignored
fn face_vertex(input: &str) -> IResult<&str, FaceVertex> {
    let (input, v) = index(input)?;
    let (input, vt) = opt(preceded(char('/'), opt(index)))(input)?;
    let (input, _) = opt(preceded(char('/'), index))(input)?;
    Ok((
        input,
        FaceVertex {
            v,
            vt: vt.flatten(),
        },
    ))
}

fn face(input: &str) -> IResult<&str, Vec<FaceVertex>> {
    all_consuming(terminated(
        many1(preceded(space0, face_vertex)),
        space0,
    ))(input)
}
