//! Indexed triangle meshes.
//!
//! A [`Mesh`] is a flat vertex list plus triangles referencing it by
//! 0-based index. Polygonal faces are reduced to triangles with
//! [`triangulate`].

use crate::geometry::Point3;

/// Three 0-based vertex indices.
pub type Triangle = [u32; 3];

/// Ordered vertices and triangles.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    vertices: Vec<Point3>,
    triangles: Vec<Triangle>,
}

impl Mesh {
    /// Creates a mesh from vertices and 0-based triangles.
    pub fn new(vertices: Vec<Point3>, triangles: Vec<Triangle>) -> Self {
        Self {
            vertices,
            triangles,
        }
    }

    /// A unit cube centred at the origin: 8 vertices, 12 triangles.
    ///
    /// Vertices 0-3 walk the -Z face as `(-,-) (+,-) (+,+) (-,+)` over X/Y;
    /// vertices 4-7 repeat the walk at +Z.
    pub fn unit_cube() -> Self {
        const H: f64 = 0.5;
        let vertices = vec![
            Point3::new(-H, -H, -H),
            Point3::new(H, -H, -H),
            Point3::new(H, H, -H),
            Point3::new(-H, H, -H),
            Point3::new(-H, -H, H),
            Point3::new(H, -H, H),
            Point3::new(H, H, H),
            Point3::new(-H, H, H),
        ];
        let triangles = vec![
            [0, 1, 2],
            [0, 2, 3],
            [4, 7, 6],
            [4, 6, 5],
            [0, 4, 5],
            [0, 5, 1],
            [1, 5, 6],
            [1, 6, 2],
            [2, 6, 7],
            [2, 7, 3],
            [3, 7, 4],
            [3, 4, 0],
        ];
        Self::new(vertices, triangles)
    }

    pub fn vertices(&self) -> &[Point3] {
        &self.vertices
    }

    pub fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    /// Number of scalar indices (three per triangle).
    pub fn index_count(&self) -> usize {
        self.triangles.len() * 3
    }

    /// Returns `true` when there is nothing to draw: no vertices or no triangles.
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty() || self.triangles.is_empty()
    }
}

/// Splits a polygon into triangles fanning out from its first vertex.
///
/// Triangles yield themselves, quads become `[0,1,2]` and `[0,2,3]`, and
/// an n-gon yields `n - 2` triangles. Faces with fewer than three indices
/// produce nothing.
///
/// # Examples
///
/// ```
/// # use stratum_core::mesh::triangulate;
/// assert_eq!(triangulate(&[0, 1, 2, 3]), vec![[0, 1, 2], [0, 2, 3]]);
/// assert_eq!(triangulate(&[4, 5]), Vec::<[u32; 3]>::new());
/// ```
pub fn triangulate(face: &[u32]) -> Vec<Triangle> {
    match face {
        [] | [_] | [_, _] => Vec::new(),
        [first, rest @ ..] => rest
            .windows(2)
            .map(|pair| [*first, pair[0], pair[1]])
            .collect(),
    }
}
