//! Export functionality for Stratum layouts and meshes.
//!
//! This module provides the [`Exporter`] trait that turns positioned nodes or
//! raw geometry into the text of an output file. It is the final stage in
//! the pipeline; writing the text to disk is left to the caller.
//!
//! # Available Backends
//!
//! - [`obj`]: Wavefront text mesh, one cube per node
//! - [`gltf`]: glTF 2.0 JSON with an embedded base64 buffer
//! - [`meta`]: JSON layout metadata
//!
//! # Error Handling
//!
//! Export operations return [`Error`]. It converts into
//! [`StratumError`](crate::StratumError) at the crate boundary, where
//! [`Error::EmptyGeometry`] keeps its own variant.

pub mod gltf;
pub mod meta;
pub mod obj;

use stratum_core::mesh::Mesh;

use crate::layout::Layout;

/// Abstraction for export backends.
///
/// Each backend supports the inputs that make sense for its format; the
/// others keep the default implementation, which reports
/// [`Error::Unsupported`].
pub trait Exporter {
    /// Short name used in logs and errors.
    fn name(&self) -> &'static str;

    /// Renders positioned diagram nodes.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyGeometry`] if the backend cannot emit an empty
    /// scene, or [`Error::Serialize`] if the document cannot be encoded.
    fn export_layout(&self, layout: &Layout) -> Result<String, Error> {
        let _ = layout;
        Err(Error::Unsupported {
            exporter: self.name(),
            input: "layout",
        })
    }

    /// Renders raw geometry.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyGeometry`] if `mesh` has no vertices or no
    /// triangles.
    fn export_mesh(&self, mesh: &Mesh) -> Result<String, Error> {
        let _ = mesh;
        Err(Error::Unsupported {
            exporter: self.name(),
            input: "mesh",
        })
    }
}

/// Errors that can occur during export.
#[derive(Debug)]
pub enum Error {
    /// The geometry has no vertices or no triangles.
    EmptyGeometry { vertices: usize, triangles: usize },
    /// An index does not fit the chosen component width.
    IndexOverflow(u32),
    /// Writing text output failed.
    Format(std::fmt::Error),
    /// Encoding a JSON document failed.
    Serialize(serde_json::Error),
    /// The backend has no rendering for this kind of input.
    Unsupported {
        exporter: &'static str,
        input: &'static str,
    },
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyGeometry {
                vertices,
                triangles,
            } => write!(
                f,
                "Empty geometry: {vertices} vertices, {triangles} triangles"
            ),
            Self::IndexOverflow(index) => write!(f, "Index {index} does not fit index buffer"),
            Self::Format(err) => write!(f, "Format error: {err}"),
            Self::Serialize(err) => write!(f, "Serialization error: {err}"),
            Self::Unsupported { exporter, input } => {
                write!(f, "The {exporter} exporter cannot render a {input}")
            }
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Format(err) => Some(err),
            Self::Serialize(err) => Some(err),
            Self::EmptyGeometry { .. } | Self::IndexOverflow(_) | Self::Unsupported { .. } => None,
        }
    }
}

impl From<std::fmt::Error> for Error {
    fn from(err: std::fmt::Error) -> Self {
        Self::Format(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialize(err)
    }
}
