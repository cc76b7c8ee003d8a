//! Wavefront OBJ text mesh backend.
//!
//! Each node becomes an axis-aligned cube preceded by `#` comment lines that
//! carry its metadata, which is the only place the metadata survives in this
//! format. Face indices are 1-based and absolute, so every cube is offset by
//! the vertices emitted before it.

use std::fmt::Write as _;

use log::{debug, info};

use stratum_core::{geometry::Point3, mesh::Mesh};

use crate::{
    export::{Error, Exporter},
    layout::{Layout, LayoutedNode},
};

/// Quad faces of a cube, 1-based into its own eight vertices.
const CUBE_FACES: [[u32; 4]; 6] = [
    [1, 2, 3, 4],
    [5, 8, 7, 6],
    [1, 5, 6, 2],
    [2, 6, 7, 3],
    [3, 7, 8, 4],
    [5, 1, 4, 8],
];

/// Renders layouts as OBJ text.
#[derive(Debug, Clone, Copy)]
pub struct ObjExporter {
    cube_size: f64,
}

impl ObjExporter {
    pub fn new(cube_size: f64) -> Self {
        Self { cube_size }
    }

    /// Writes one annotated cube whose first vertex is number `base + 1`.
    fn write_cube(
        &self,
        out: &mut String,
        corners: &[Point3],
        placed: &LayoutedNode,
        base: u32,
    ) -> std::fmt::Result {
        let node = placed.node();
        writeln!(out, "# {}", node.id())?;
        if let Some(kind) = node.kind() {
            writeln!(out, "# type:{kind}")?;
        }
        if !node.name().is_empty() {
            writeln!(out, "# name:{}", node.name())?;
        }
        if let Some(subgraph) = node.subgraph() {
            writeln!(out, "# subgraph:{subgraph}")?;
        }

        let center = placed.position();
        for corner in corners {
            let v = center.offset(
                corner.x() * self.cube_size,
                corner.y() * self.cube_size,
                corner.z() * self.cube_size,
            );
            writeln!(out, "v {} {} {}", v.x(), v.y(), v.z())?;
        }
        for [a, b, c, d] in CUBE_FACES {
            writeln!(out, "f {} {} {} {}", a + base, b + base, c + base, d + base)?;
        }
        writeln!(out)
    }
}

impl Default for ObjExporter {
    fn default() -> Self {
        Self::new(1.6)
    }
}

impl Exporter for ObjExporter {
    fn name(&self) -> &'static str {
        "obj"
    }

    fn export_layout(&self, layout: &Layout) -> Result<String, Error> {
        info!(nodes = layout.nodes().len(); "Rendering OBJ mesh");

        // The unit cube's corners in emission order, scaled per node.
        let cube = Mesh::unit_cube();
        let corners = cube.vertices();
        let stride = corners.len() as u32;

        let (text, vertices) = layout.nodes().iter().try_fold(
            (String::new(), 0_u32),
            |(mut text, base), placed| {
                self.write_cube(&mut text, corners, placed, base)?;
                Ok::<_, std::fmt::Error>((text, base + stride))
            },
        )?;

        debug!(vertices, bytes = text.len(); "OBJ mesh rendered");
        Ok(text)
    }
}
