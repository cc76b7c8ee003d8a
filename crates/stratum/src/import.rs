//! Reading Wavefront OBJ text back into a [`Mesh`].
//!
//! Only geometry survives: `v` lines give vertices and `f` lines give
//! polygons, which are fanned into triangles. Texture and normal references
//! in `a/b/c` face groups are dropped, as is every other statement.

use log::{debug, info};

use stratum_core::{
    geometry::Point3,
    mesh::{Mesh, Triangle, triangulate},
};

use crate::StratumError;

/// A face waiting for the vertex count to be known.
struct PendingFace {
    line: usize,
    indices: Vec<u32>,
}

/// Parses OBJ text into a mesh.
///
/// Face indices are 1-based; negative indices count back from the last
/// vertex read before the face.
///
/// # Errors
///
/// Returns [`StratumError::InvalidMesh`] with the 1-based line number when
/// a vertex coordinate is not a number or a face index is zero, unparsable
/// or out of range.
///
/// # Examples
///
/// ```
/// # use stratum::import::parse_obj;
/// let mesh = parse_obj("v 0 0 0\nv 1 0 0\nv 1 1 0\nv 0 1 0\nf 1 2 3 4\n").unwrap();
/// assert_eq!(mesh.vertex_count(), 4);
/// assert_eq!(mesh.triangles(), [[0, 1, 2], [0, 2, 3]]);
/// ```
pub fn parse_obj(text: &str) -> Result<Mesh, StratumError> {
    let mut vertices = Vec::new();
    let mut faces = Vec::new();
    let mut skipped = 0_usize;

    for (number, line) in (1..).zip(text.lines()) {
        let mut tokens = line.split_whitespace();
        match tokens.next() {
            Some("v") => vertices.push(parse_vertex(number, tokens)?),
            Some("f") => {
                let indices = tokens
                    .map(|token| parse_index(number, token, vertices.len()))
                    .collect::<Result<Vec<_>, _>>()?;
                faces.push(PendingFace {
                    line: number,
                    indices,
                });
            }
            _ => skipped += 1,
        }
    }

    let triangles = resolve_faces(&faces, vertices.len())?;

    debug!(skipped, faces = faces.len(); "OBJ statements read");
    info!(
        vertices = vertices.len(),
        triangles = triangles.len();
        "Parsed OBJ mesh"
    );
    Ok(Mesh::new(vertices, triangles))
}

fn parse_vertex<'a>(
    line: usize,
    mut tokens: impl Iterator<Item = &'a str>,
) -> Result<Point3, StratumError> {
    let mut coordinate = |axis: &str| -> Result<f64, StratumError> {
        let token = tokens
            .next()
            .ok_or_else(|| invalid(line, format!("missing {axis} coordinate")))?;
        let value = token
            .parse::<f64>()
            .map_err(|_| invalid(line, format!("invalid {axis} coordinate `{token}`")))?;
        // Positions are packed as f32; the value must survive the narrowing.
        if !(value as f32).is_finite() {
            return Err(invalid(
                line,
                format!("{axis} coordinate `{token}` is not a finite 32-bit float"),
            ));
        }
        Ok(value)
    };
    let x = coordinate("x")?;
    let y = coordinate("y")?;
    let z = coordinate("z")?;
    Ok(Point3::new(x, y, z))
}

/// Converts one face group to a 0-based index.
///
/// Only the part before the first `/` is read. Positive indices are checked
/// against the final vertex count later; negative ones resolve immediately
/// against the `seen` vertices.
fn parse_index(line: usize, token: &str, seen: usize) -> Result<u32, StratumError> {
    let head = token.split('/').next().unwrap_or(token);
    let value: i64 = head
        .parse()
        .map_err(|_| invalid(line, format!("invalid face index `{head}`")))?;

    let resolved = match value {
        0 => return Err(invalid(line, "face index 0 is not allowed".to_string())),
        1.. => value - 1,
        _ => seen as i64 + value,
    };
    if resolved < 0 {
        return Err(invalid(
            line,
            format!("relative index {value} reaches before the first vertex"),
        ));
    }
    u32::try_from(resolved).map_err(|_| invalid(line, format!("face index {value} is too large")))
}

fn resolve_faces(
    faces: &[PendingFace],
    vertex_count: usize,
) -> Result<Vec<Triangle>, StratumError> {
    let mut triangles = Vec::new();
    for face in faces {
        if let Some(&index) = face.indices.iter().find(|&&i| i as usize >= vertex_count) {
            return Err(invalid(
                face.line,
                format!(
                    "face index {} out of range for {vertex_count} vertices",
                    u64::from(index) + 1
                ),
            ));
        }
        triangles.extend(triangulate(&face.indices));
    }
    Ok(triangles)
}

fn invalid(line: usize, reason: String) -> StratumError {
    StratumError::InvalidMesh { line, reason }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reason(err: StratumError) -> (usize, String) {
        match err {
            StratumError::InvalidMesh { line, reason } => (line, reason),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_quads_and_ngons_fan_out() {
        let text = "\
v 0 0 0
v 1 0 0
v 1 1 0
v 0 1 0
v 0.5 2 0
f 1 2 3 4
f 1 2 3 4 5
f 1 2 3
";
        let mesh = parse_obj(text).unwrap();
        assert_eq!(mesh.vertex_count(), 5);
        assert_eq!(
            mesh.triangles(),
            [
                [0, 1, 2],
                [0, 2, 3],
                [0, 1, 2],
                [0, 2, 3],
                [0, 3, 4],
                [0, 1, 2]
            ]
        );
    }

    #[test]
    fn test_slash_groups_keep_vertex_index() {
        let mesh = parse_obj("v 0 0 0\nv 1 0 0\nv 0 1 0\nvt 0 0\nvn 0 0 1\nf 1/1/1 2//1 3/2\n")
            .unwrap();
        assert_eq!(mesh.triangles(), [[0, 1, 2]]);
    }

    #[test]
    fn test_other_statements_ignored() {
        let text = "# comment\no cube\ng side\nusemtl grey\ns off\n\nv 1 2 3 4.5\nf 1 1\n";
        let mesh = parse_obj(text).unwrap();
        assert_eq!(mesh.vertices(), [Point3::new(1.0, 2.0, 3.0)]);
        assert!(mesh.triangles().is_empty());
    }

    #[test]
    fn test_negative_indices_are_relative() {
        let mesh = parse_obj("v 0 0 0\nv 1 0 0\nv 0 1 0\nf -3 -2 -1\nv 5 5 5\nf -4 -1 -2\n").unwrap();
        assert_eq!(mesh.triangles(), [[0, 1, 2], [0, 3, 2]]);
    }

    #[test]
    fn test_forward_reference_allowed() {
        let mesh = parse_obj("f 1 2 3\nv 0 0 0\nv 1 0 0\nv 0 1 0\n").unwrap();
        assert_eq!(mesh.triangle_count(), 1);
    }

    #[test]
    fn test_invalid_coordinate() {
        let (line, reason) = reason(parse_obj("v 0 0 0\nv 1 zero 0\n").unwrap_err());
        assert_eq!(line, 2);
        assert!(reason.contains("zero"), "{reason}");
    }

    #[test]
    fn test_missing_coordinate() {
        let (line, reason) = reason(parse_obj("v 1 2\n").unwrap_err());
        assert_eq!(line, 1);
        assert!(reason.contains("missing z"), "{reason}");
    }

    #[test]
    fn test_non_finite_coordinates_rejected() {
        for (text, expected_line, axis) in [
            ("v inf 0 0\nf 1 1 1\n", 1, "x"),
            ("v 0 0 0\nv 0 NaN 0\n", 2, "y"),
            ("v 0 0 0\nv 0 0 0\nv 0 0 1e39\n", 3, "z"),
            ("v -infinity 0 0\n", 1, "x"),
        ] {
            let (line, reason) = reason(parse_obj(text).unwrap_err());
            assert_eq!(line, expected_line, "{text:?}");
            assert!(reason.starts_with(axis), "{text:?}: {reason}");
            assert!(reason.contains("not a finite"), "{reason}");
        }
    }

    #[test]
    fn test_f32_max_coordinate_accepted() {
        let mesh = parse_obj("v 3.4028235e38 -3.4028235e38 0\n").unwrap();
        assert_eq!(mesh.vertex_count(), 1);
    }

    #[test]
    fn test_zero_index_rejected() {
        let (line, _) = reason(parse_obj("v 0 0 0\nf 0 1 1\n").unwrap_err());
        assert_eq!(line, 2);
    }

    #[test]
    fn test_out_of_range_reports_face_line() {
        let text = "v 0 0 0\nv 1 0 0\nv 0 1 0\n\nf 1 2 9\n";
        let (line, reason) = reason(parse_obj(text).unwrap_err());
        assert_eq!(line, 5);
        assert!(reason.contains("9"), "{reason}");
    }

    #[test]
    fn test_relative_index_before_first_vertex() {
        let (line, _) = reason(parse_obj("v 0 0 0\nf -1 -2 -1\n").unwrap_err());
        assert_eq!(line, 2);
    }

    #[test]
    fn test_empty_text_gives_empty_mesh() {
        let mesh = parse_obj("").unwrap();
        assert!(mesh.is_empty());
    }
}
