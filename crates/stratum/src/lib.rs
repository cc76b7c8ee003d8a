//! Stratum - compile flowchart diagrams into 3D scene geometry.
//!
//! Diagram text is parsed into a graph, laid out on a column grid in 3D and
//! exported as a Wavefront OBJ mesh, a glTF scene or a JSON layout
//! document. Existing OBJ meshes can be re-encoded as glTF.

pub mod config;
pub mod export;
pub mod import;
pub mod layout;

mod error;
mod source;

pub use stratum_core::{geometry, graph, mesh};

pub use error::StratumError;
pub use source::{OutputFormat, SourceFormat};

use std::{
    fs,
    io::{self, Write as _},
    path::Path,
};

use log::{debug, info, trace};
use tempfile::NamedTempFile;

use config::AppConfig;
use export::{Exporter, gltf::GltfExporter, meta::MetaExporter, obj::ObjExporter};
use graph::ParsedGraph;
use layout::{Engine, Layout};
use mesh::Mesh;

/// Builder for converting diagrams and meshes.
///
/// Each stage of the pipeline is exposed on its own, and the `convert_*`
/// methods chain them from an input file to a written output file.
///
/// # Examples
///
/// ```rust
/// use stratum::{DiagramBuilder, config::AppConfig};
///
/// let source = "
///     subgraph Core
///     A[Deployment: api]
///     end
/// ";
///
/// let builder = DiagramBuilder::new(AppConfig::default());
///
/// let graph = builder.parse(source).expect("Failed to parse");
/// let layout = builder.layout(&graph);
///
/// let obj = builder.render_obj(&layout).expect("Failed to render");
/// assert!(obj.starts_with("# A\n"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct DiagramBuilder {
    config: AppConfig,
    generated_at: Option<u64>,
}

impl DiagramBuilder {
    /// Create a new diagram builder with the given configuration.
    ///
    /// # Arguments
    ///
    /// * `config` - Application configuration for layout, export and parsing
    pub fn new(config: AppConfig) -> Self {
        Self {
            config,
            generated_at: None,
        }
    }

    /// Stamp layout metadata with `generatedAt`.
    ///
    /// Without a stamp every output is byte-identical across runs.
    pub fn with_generated_at(mut self, seconds: u64) -> Self {
        self.generated_at = Some(seconds);
        self
    }

    /// Returns the active configuration.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Parse diagram text into a graph.
    ///
    /// # Errors
    ///
    /// Returns [`StratumError::EmptyInput`] for blank text and
    /// [`StratumError::Parse`] when strict parsing rejects a line.
    pub fn parse(&self, source: &str) -> Result<ParsedGraph, StratumError> {
        let graph = stratum_parser::parse(source, self.config.parser().options())
            .map_err(|err| StratumError::new_parse_error(err, source))?;

        trace!(graph:?; "Parsed graph");
        Ok(graph)
    }

    /// Position every node of `graph`.
    pub fn layout(&self, graph: &ParsedGraph) -> Layout {
        info!("Calculating layout");
        Engine::new(*self.config.layout()).calculate(graph)
    }

    /// Render a layout as OBJ text.
    ///
    /// # Errors
    ///
    /// Returns [`StratumError::Export`] if the text cannot be written.
    pub fn render_obj(&self, layout: &Layout) -> Result<String, StratumError> {
        let exporter = ObjExporter::new(self.config.export().cube_size());
        Ok(exporter.export_layout(layout)?)
    }

    /// Render a layout as a glTF scene with one annotated node per diagram node.
    ///
    /// # Errors
    ///
    /// Returns [`StratumError::EmptyGeometry`] if the layout has no nodes.
    pub fn render_gltf(&self, layout: &Layout) -> Result<String, StratumError> {
        Ok(GltfExporter::new().export_layout(layout)?)
    }

    /// Render a layout as a JSON metadata document.
    ///
    /// # Errors
    ///
    /// Returns [`StratumError::Export`] if serialization fails.
    pub fn render_layout_json(&self, layout: &Layout) -> Result<String, StratumError> {
        let exporter = match self.generated_at {
            Some(seconds) => MetaExporter::new().with_generated_at(seconds),
            None => MetaExporter::new(),
        };
        Ok(exporter.export_layout(layout)?)
    }

    /// Render raw geometry as a single-node glTF scene.
    ///
    /// # Errors
    ///
    /// Returns [`StratumError::EmptyGeometry`] if `mesh` has no vertices or
    /// no triangles.
    pub fn render_mesh_gltf(&self, mesh: &Mesh) -> Result<String, StratumError> {
        Ok(GltfExporter::new().export_mesh(mesh)?)
    }

    /// Render a layout in the given output format.
    ///
    /// # Errors
    ///
    /// Propagates the error of the chosen renderer.
    pub fn render(&self, layout: &Layout, format: OutputFormat) -> Result<String, StratumError> {
        info!(format:? = format; "Rendering output");
        match format {
            OutputFormat::Obj => self.render_obj(layout),
            OutputFormat::Gltf => self.render_gltf(layout),
            OutputFormat::Layout => self.render_layout_json(layout),
        }
    }

    /// Convert a document containing a diagram into an output file.
    ///
    /// # Arguments
    ///
    /// * `input` - Markdown, HTML or raw diagram file
    /// * `output` - Destination file, replaced only on success
    /// * `source` - How to locate the diagram inside `input`
    /// * `format` - What to write
    ///
    /// # Errors
    ///
    /// Returns [`StratumError::InputNotFound`] if `input` does not exist,
    /// [`StratumError::NoDiagramBlock`] if no diagram is found, and any
    /// error of [`DiagramBuilder::convert_text`].
    pub fn convert_file(
        &self,
        input: &Path,
        output: &Path,
        source: SourceFormat,
        format: OutputFormat,
    ) -> Result<(), StratumError> {
        info!(input:? = input; "Reading diagram document");
        let document = read_input(input)?;

        let source = source.resolve(input);
        let text = source.extract(&document)?;
        debug!(source_format:? = source, bytes = text.len(); "Diagram text located");

        self.convert_text(&text, output, format)
    }

    /// Convert diagram text into an output file.
    ///
    /// # Errors
    ///
    /// Returns [`StratumError::EmptyInput`] for blank text,
    /// [`StratumError::EmptyGeometry`] if the format cannot represent an
    /// empty diagram, or [`StratumError::Io`] if writing fails. Nothing is
    /// written on failure.
    pub fn convert_text(
        &self,
        text: &str,
        output: &Path,
        format: OutputFormat,
    ) -> Result<(), StratumError> {
        let graph = self.parse(text)?;
        let layout = self.layout(&graph);
        let rendered = self.render(&layout, format)?;
        write_output(output, &rendered)
    }

    /// Re-encode an OBJ mesh file as a glTF scene.
    ///
    /// # Errors
    ///
    /// Returns [`StratumError::InputNotFound`] if `input` does not exist,
    /// [`StratumError::InvalidMesh`] for malformed statements and
    /// [`StratumError::EmptyGeometry`] if the mesh has nothing to draw.
    pub fn reencode_mesh_file(&self, input: &Path, output: &Path) -> Result<(), StratumError> {
        info!(input:? = input; "Reading OBJ mesh");
        let text = read_input(input)?;
        let mesh = import::parse_obj(&text)?;
        let rendered = self.render_mesh_gltf(&mesh)?;
        write_output(output, &rendered)
    }
}

fn read_input(path: &Path) -> Result<String, StratumError> {
    fs::read_to_string(path).map_err(|err| match err.kind() {
        io::ErrorKind::NotFound => StratumError::InputNotFound(path.to_path_buf()),
        _ => StratumError::Io(err),
    })
}

/// Writes `contents` through a temporary file in the destination directory,
/// so `path` holds either its previous contents or the complete new file.
fn write_output(path: &Path, contents: &str) -> Result<(), StratumError> {
    let directory = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut file = NamedTempFile::new_in(directory)?;
    file.write_all(contents.as_bytes())?;
    file.persist(path).map_err(|err| err.error)?;

    info!(output:? = path, bytes = contents.len(); "Output written");
    Ok(())
}
