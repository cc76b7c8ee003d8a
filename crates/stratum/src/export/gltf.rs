//! glTF 2.0 scene backend.
//!
//! The document is JSON with its single binary buffer embedded as a base64
//! `data:` URI, so one file carries the whole scene. Two modes share the
//! buffer packing in [`buffer`]:
//!
//! - layouts render as one shared unit cube instanced by a node per diagram
//!   node, each translated to its position and carrying the diagram
//!   metadata in `extras`;
//! - raw meshes render as a single node drawing the whole mesh.

pub mod buffer;
mod document;

use log::{debug, info};

use stratum_core::mesh::Mesh;

use self::{
    buffer::PackedGeometry,
    document::{Document, SceneNode},
};
use crate::{
    export::{Error, Exporter},
    layout::Layout,
};

/// Renders layouts and meshes as glTF JSON.
#[derive(Debug, Clone, Copy, Default)]
pub struct GltfExporter;

impl GltfExporter {
    pub fn new() -> Self {
        Self
    }

    fn serialize(document: &Document) -> Result<String, Error> {
        let json = serde_json::to_string_pretty(document)?;
        debug!(bytes = json.len(); "glTF document serialized");
        Ok(json)
    }
}

impl Exporter for GltfExporter {
    fn name(&self) -> &'static str {
        "gltf"
    }

    fn export_layout(&self, layout: &Layout) -> Result<String, Error> {
        info!(nodes = layout.nodes().len(); "Rendering glTF scene");

        if layout.is_empty() {
            return Err(Error::EmptyGeometry {
                vertices: 0,
                triangles: 0,
            });
        }

        let geometry = PackedGeometry::pack(&Mesh::unit_cube())?;
        let nodes = layout.nodes().iter().map(SceneNode::annotated).collect();
        Self::serialize(&Document::new(&geometry, nodes))
    }

    fn export_mesh(&self, mesh: &Mesh) -> Result<String, Error> {
        info!(
            vertices = mesh.vertex_count(),
            triangles = mesh.triangle_count();
            "Rendering glTF mesh"
        );

        let geometry = PackedGeometry::pack(mesh)?;
        Self::serialize(&Document::new(&geometry, vec![SceneNode::plain()]))
    }
}
