//! Serializable subset of the glTF 2.0 JSON schema.

use serde::Serialize;

use stratum_core::graph::NodeKind;

use super::buffer::{ARRAY_BUFFER, ELEMENT_ARRAY_BUFFER, FLOAT, PackedGeometry};
use crate::layout::LayoutedNode;

/// Primitive topology of indexed triangles.
const TRIANGLES: u32 = 4;

const GENERATOR: &str = concat!("stratum ", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    asset: Asset,
    scenes: Vec<Scene>,
    nodes: Vec<SceneNode>,
    meshes: Vec<MeshEntry>,
    buffers: Vec<Buffer>,
    buffer_views: Vec<BufferView>,
    accessors: Vec<Accessor>,
}

impl Document {
    /// Builds a single-scene document whose nodes all reference the mesh
    /// stored in `geometry`.
    pub fn new(geometry: &PackedGeometry, nodes: Vec<SceneNode>) -> Self {
        let positions = geometry.positions();
        let indices = geometry.indices();
        let bounds = geometry.bounds();

        Self {
            asset: Asset {
                version: "2.0",
                generator: GENERATOR,
            },
            scenes: vec![Scene {
                nodes: (0..nodes.len()).collect(),
            }],
            nodes,
            meshes: vec![MeshEntry {
                primitives: vec![Primitive {
                    attributes: Attributes { position: 0 },
                    indices: 1,
                    mode: TRIANGLES,
                }],
            }],
            buffers: vec![Buffer {
                byte_length: geometry.byte_length(),
                uri: geometry.data_uri(),
            }],
            buffer_views: vec![
                BufferView {
                    buffer: 0,
                    byte_offset: positions.offset,
                    byte_length: positions.length,
                    target: ARRAY_BUFFER,
                },
                BufferView {
                    buffer: 0,
                    byte_offset: indices.offset,
                    byte_length: indices.length,
                    target: ELEMENT_ARRAY_BUFFER,
                },
            ],
            accessors: vec![
                Accessor {
                    buffer_view: 0,
                    byte_offset: 0,
                    component_type: FLOAT,
                    count: geometry.vertex_count(),
                    kind: "VEC3",
                    min: Some(bounds.min()),
                    max: Some(bounds.max()),
                },
                Accessor {
                    buffer_view: 1,
                    byte_offset: 0,
                    component_type: geometry.index_width().component_type(),
                    count: geometry.index_count(),
                    kind: "SCALAR",
                    min: None,
                    max: None,
                },
            ],
        }
    }
}

#[derive(Debug, Serialize)]
struct Asset {
    version: &'static str,
    generator: &'static str,
}

#[derive(Debug, Serialize)]
struct Scene {
    nodes: Vec<usize>,
}

/// A scene node instancing mesh 0.
#[derive(Debug, Serialize)]
pub struct SceneNode {
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    mesh: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    translation: Option<[f64; 3]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    extras: Option<NodeExtras>,
}

impl SceneNode {
    /// A bare node placing the mesh at the origin.
    pub fn plain() -> Self {
        Self {
            name: None,
            mesh: 0,
            translation: None,
            extras: None,
        }
    }

    /// A node named after a diagram node, translated to its position and
    /// carrying its metadata.
    pub fn annotated(placed: &LayoutedNode) -> Self {
        let node = placed.node();
        Self {
            name: Some(node.id().to_string()),
            mesh: 0,
            translation: Some(placed.position().to_array()),
            extras: Some(NodeExtras {
                id: node.id().to_string(),
                name: node.name().to_string(),
                kind: node.kind(),
                subgraph: node.subgraph().map(str::to_string),
            }),
        }
    }
}

/// Diagram metadata attached to a scene node.
#[derive(Debug, Serialize)]
struct NodeExtras {
    id: String,
    name: String,
    #[serde(rename = "type")]
    kind: Option<NodeKind>,
    subgraph: Option<String>,
}

#[derive(Debug, Serialize)]
struct MeshEntry {
    primitives: Vec<Primitive>,
}

#[derive(Debug, Serialize)]
struct Primitive {
    attributes: Attributes,
    indices: usize,
    mode: u32,
}

#[derive(Debug, Serialize)]
struct Attributes {
    #[serde(rename = "POSITION")]
    position: usize,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Buffer {
    byte_length: usize,
    uri: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct BufferView {
    buffer: usize,
    byte_offset: usize,
    byte_length: usize,
    target: u32,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Accessor {
    buffer_view: usize,
    byte_offset: usize,
    component_type: u32,
    count: usize,
    #[serde(rename = "type")]
    kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    min: Option<[f32; 3]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max: Option<[f32; 3]>,
}
