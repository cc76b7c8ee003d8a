//! Packing geometry into a single glTF binary buffer.
//!
//! Layout of the blob:
//!
//! ```text
//! ┌──────────────────────────┬─────┬───────────────────────┬─────┐
//! │ positions: f32 × 3 × V   │ pad │ indices: u16|u32 × 3T │ pad │
//! └──────────────────────────┴─────┴───────────────────────┴─────┘
//! ```
//!
//! Every block is zero-padded to a 4-byte boundary and buffer views cover
//! the padded length. All values are little-endian.

use base64::{Engine as _, engine::general_purpose::STANDARD};
use log::trace;

use stratum_core::{geometry::Bounds3, mesh::Mesh};

use crate::export::Error;

/// `componentType` of 32-bit floats.
pub const FLOAT: u32 = 5126;
/// `componentType` of 16-bit unsigned indices.
pub const UNSIGNED_SHORT: u32 = 5123;
/// `componentType` of 32-bit unsigned indices.
pub const UNSIGNED_INT: u32 = 5125;
/// Buffer view target for vertex attributes.
pub const ARRAY_BUFFER: u32 = 34962;
/// Buffer view target for indices.
pub const ELEMENT_ARRAY_BUFFER: u32 = 34963;

const DATA_URI_PREFIX: &str = "data:application/octet-stream;base64,";

/// Width of each packed index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexWidth {
    U16,
    U32,
}

impl IndexWidth {
    /// Picks the narrowest width able to address the mesh.
    ///
    /// 32-bit indices are required once either the vertex count or the index
    /// count exceeds `u16::MAX`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use stratum::export::gltf::buffer::IndexWidth;
    /// assert_eq!(IndexWidth::for_counts(65_535, 36), IndexWidth::U16);
    /// assert_eq!(IndexWidth::for_counts(65_536, 36), IndexWidth::U32);
    /// assert_eq!(IndexWidth::for_counts(8, 65_536), IndexWidth::U32);
    /// ```
    pub fn for_counts(vertex_count: usize, index_count: usize) -> Self {
        let limit = usize::from(u16::MAX);
        if vertex_count > limit || index_count > limit {
            Self::U32
        } else {
            Self::U16
        }
    }

    pub fn component_type(self) -> u32 {
        match self {
            Self::U16 => UNSIGNED_SHORT,
            Self::U32 => UNSIGNED_INT,
        }
    }
}

/// A byte range of the packed blob.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Block {
    pub offset: usize,
    pub length: usize,
}

/// Positions and indices of one mesh, packed and ready to embed.
#[derive(Debug, Clone)]
pub struct PackedGeometry {
    bytes: Vec<u8>,
    positions: Block,
    indices: Block,
    vertex_count: usize,
    index_count: usize,
    index_width: IndexWidth,
    bounds: Bounds3,
}

impl PackedGeometry {
    /// Packs `mesh` into one padded little-endian blob.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyGeometry`] if the mesh has no vertices or no
    /// triangles.
    pub fn pack(mesh: &Mesh) -> Result<Self, Error> {
        if mesh.is_empty() {
            return Err(Error::EmptyGeometry {
                vertices: mesh.vertex_count(),
                triangles: mesh.triangle_count(),
            });
        }

        let components: Vec<[f32; 3]> = mesh
            .vertices()
            .iter()
            .map(|v| [v.x() as f32, v.y() as f32, v.z() as f32])
            .collect();
        let bounds = Bounds3::from_components(components.iter().copied());

        let mut bytes: Vec<u8> = components
            .iter()
            .flatten()
            .flat_map(|component| component.to_le_bytes())
            .collect();
        pad_to_four(&mut bytes);
        let positions = Block {
            offset: 0,
            length: bytes.len(),
        };

        let index_width = IndexWidth::for_counts(mesh.vertex_count(), mesh.index_count());
        let index_offset = bytes.len();
        for &index in mesh.triangles().iter().flatten() {
            match index_width {
                IndexWidth::U16 => {
                    let narrow = u16::try_from(index).map_err(|_| Error::IndexOverflow(index))?;
                    bytes.extend_from_slice(&narrow.to_le_bytes());
                }
                IndexWidth::U32 => bytes.extend_from_slice(&index.to_le_bytes()),
            }
        }
        pad_to_four(&mut bytes);
        let indices = Block {
            offset: index_offset,
            length: bytes.len() - index_offset,
        };

        trace!(
            bytes = bytes.len(),
            index_width:? = index_width;
            "Packed geometry buffer"
        );

        Ok(Self {
            bytes,
            positions,
            indices,
            vertex_count: mesh.vertex_count(),
            index_count: mesh.index_count(),
            index_width,
            bounds,
        })
    }

    /// Total byte length, padding included.
    pub fn byte_length(&self) -> usize {
        self.bytes.len()
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn positions(&self) -> Block {
        self.positions
    }

    pub fn indices(&self) -> Block {
        self.indices
    }

    pub fn vertex_count(&self) -> usize {
        self.vertex_count
    }

    pub fn index_count(&self) -> usize {
        self.index_count
    }

    pub fn index_width(&self) -> IndexWidth {
        self.index_width
    }

    /// Per-axis bounds of the packed `f32` positions.
    pub fn bounds(&self) -> Bounds3 {
        self.bounds
    }

    /// The blob as a base64 `data:` URI.
    pub fn data_uri(&self) -> String {
        format!("{DATA_URI_PREFIX}{}", STANDARD.encode(&self.bytes))
    }
}

/// Zero-pads `bytes` to a multiple of four.
fn pad_to_four(bytes: &mut Vec<u8>) {
    bytes.resize(bytes.len().next_multiple_of(4), 0);
}
