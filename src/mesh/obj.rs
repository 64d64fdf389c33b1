//! Minimal Wavefront OBJ text: `v x y z` records followed by `f i1 … ik`
//! records with 1-based indices, both in insertion order.
use super::{Face, Mesh};
use crate::error::{Result, ShadowMeshError};
use nalgebra::Point3;
use std::io::{self, BufRead, Write};

pub fn write_obj<W: Write>(mesh: &Mesh, writer: &mut W) -> io::Result<()> {
    for v in &mesh.vertices {
        writeln!(writer, "v {} {} {}", v.x, v.y, v.z)?;
    }
    for face in &mesh.faces {
        write!(writer, "f")?;
        for i in face {
            write!(writer, " {i}")?;
        }
        writeln!(writer)?;
    }
    writer.flush()
}

/// Parse `v`/`f` records back into a mesh. Blank lines and `#` comments are
/// skipped; `f` entries of the form `i/t/n` keep only the vertex index.
pub fn read_obj<R: BufRead>(reader: R) -> Result<Mesh> {
    let mut mesh = Mesh::new();
    for (lineno, line) in reader.lines().enumerate() {
        let line = line.map_err(|e| ShadowMeshError::input(format!("failed to read OBJ: {e}")))?;
        let mut tokens = line.split_whitespace();
        match tokens.next() {
            None => {}
            Some(tag) if tag.starts_with('#') => {}
            Some("v") => mesh.vertices.push(parse_vertex(tokens, lineno + 1)?),
            Some("f") => mesh.faces.push(parse_face(tokens, lineno + 1)?),
            Some(other) => {
                return Err(ShadowMeshError::input(format!(
                    "line {}: unsupported OBJ record '{other}'",
                    lineno + 1
                )))
            }
        }
    }
    mesh.validate()
        .map_err(|e| ShadowMeshError::input(format!("invalid OBJ mesh: {e}")))?;
    Ok(mesh)
}

fn parse_vertex<'a>(tokens: impl Iterator<Item = &'a str>, lineno: usize) -> Result<Point3<f64>> {
    let coords = tokens
        .map(|t| {
            t.parse::<f64>().map_err(|e| {
                ShadowMeshError::input(format!("line {lineno}: bad coordinate '{t}': {e}"))
            })
        })
        .collect::<Result<Vec<f64>>>()?;
    match coords.as_slice() {
        [x, y, z] | [x, y, z, _] => Ok(Point3::new(*x, *y, *z)),
        _ => Err(ShadowMeshError::input(format!(
            "line {lineno}: vertex needs 3 coordinates, got {}",
            coords.len()
        ))),
    }
}

fn parse_face<'a>(tokens: impl Iterator<Item = &'a str>, lineno: usize) -> Result<Face> {
    tokens
        .map(|t| {
            let index = t.split('/').next().unwrap_or(t);
            index.parse::<usize>().map_err(|e| {
                ShadowMeshError::input(format!("line {lineno}: bad face index '{t}': {e}"))
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quad() -> Mesh {
        Mesh {
            vertices: vec![
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(1.5, 0.0, 0.0),
                Point3::new(1.5, 2.0, 0.25),
                Point3::new(0.0, 2.0, 0.0),
            ],
            faces: vec![vec![1, 2, 3, 4]],
        }
    }

    #[test]
    fn writes_vertex_records_before_faces() {
        let mut out = Vec::new();
        write_obj(&quad(), &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "v 0 0 0");
        assert_eq!(lines[2], "v 1.5 2 0.25");
        assert_eq!(lines[4], "f 1 2 3 4");
        assert_eq!(lines.len(), 5);
    }

    #[test]
    fn text_reads_back_identically() {
        let mesh = quad();
        let mut out = Vec::new();
        write_obj(&mesh, &mut out).unwrap();
        let parsed = read_obj(out.as_slice()).unwrap();
        assert_eq!(parsed, mesh);
    }

    #[test]
    fn reader_accepts_comments_and_slashed_indices() {
        let text = "# header\nv 0 0 0\nv 1 0 0\n\nv 0 1 0\nf 1/1 2/2/2 3//3\n";
        let mesh = read_obj(text.as_bytes()).unwrap();
        assert_eq!(mesh.faces, vec![vec![1, 2, 3]]);
    }

    #[test]
    fn out_of_range_index_is_rejected() {
        let text = "v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 4\n";
        let err = read_obj(text.as_bytes()).unwrap_err();
        assert!(matches!(err, ShadowMeshError::Input { .. }), "{err}");
    }
}
